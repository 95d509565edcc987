//! # Geographic Utilities
//!
//! Core geographic computation utilities for walk route analysis.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`distance_between`] | Great-circle distance between two GPS fixes |
//! | [`total_distance`] | Total length of a route in meters |
//! | [`compute_bounds`] | Bounding box of a route |
//! | [`compute_center`] | Centroid of a route |
//!
//! ## Example
//!
//! ```rust
//! use walk_route::{GeoCoordinate, geo_utils};
//!
//! let route = vec![
//!     GeoCoordinate::new(51.5074, -0.1278, "2024-05-01T08:00:00Z"),
//!     GeoCoordinate::new(51.5080, -0.1290, "2024-05-01T08:01:00Z"),
//!     GeoCoordinate::new(51.5090, -0.1300, "2024-05-01T08:02:00Z"),
//! ];
//!
//! let length = geo_utils::total_distance(&route);
//! println!("Walk length: {:.0}m", length);
//!
//! let bounds = geo_utils::compute_bounds(&route).unwrap();
//! println!("Bounds: {:.4}N to {:.4}N", bounds.min_lat, bounds.max_lat);
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! Distances assume a spherical Earth with radius 6,371,000 m. There is no
//! ellipsoidal correction; at walking scale (under ~10 km) the error is well
//! below GPS noise.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)

use geo::{BoundingRect, Centroid, Coord, LineString};

use crate::{Bounds, GeoCoordinate, Location};

/// Mean Earth radius used by [`distance_between`], in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two GPS fixes using the Haversine formula.
///
/// Returns the distance in meters. The result is symmetric and exactly `0.0`
/// when both fixes share the same coordinates.
///
/// # Example
///
/// ```rust
/// use walk_route::{GeoCoordinate, geo_utils};
///
/// let a = GeoCoordinate::new(0.0, 0.0, "2024-05-01T08:00:00Z");
/// let b = GeoCoordinate::new(0.0, 0.001, "2024-05-01T08:01:00Z");
///
/// let distance = geo_utils::distance_between(&a, &b);
/// assert!((distance - 111.2).abs() < 1.0);
/// ```
#[inline]
pub fn distance_between(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    haversine(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Haversine distance over raw degree pairs.
#[inline]
pub(crate) fn haversine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_METERS * c
}

/// Calculate the total length of a route in meters.
///
/// Sums the haversine distance between consecutive fixes. Empty or single-point
/// routes return 0.0.
pub fn total_distance(route: &[GeoCoordinate]) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }

    route
        .windows(2)
        .map(|w| distance_between(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Bounding Box / Center
// =============================================================================

fn to_line_string(route: &[GeoCoordinate]) -> LineString<f64> {
    route
        .iter()
        .map(|p| Coord { x: p.longitude, y: p.latitude })
        .collect()
}

/// Compute the bounding box of a route.
///
/// Returns `None` for an empty route.
///
/// # Example
///
/// ```rust
/// use walk_route::{GeoCoordinate, geo_utils};
///
/// let route = vec![
///     GeoCoordinate::new(51.5000, -0.1300, "2024-05-01T08:00:00Z"),
///     GeoCoordinate::new(51.5100, -0.1200, "2024-05-01T08:05:00Z"),
///     GeoCoordinate::new(51.5050, -0.1250, "2024-05-01T08:10:00Z"),
/// ];
///
/// let bounds = geo_utils::compute_bounds(&route).unwrap();
/// assert_eq!(bounds.min_lat, 51.5000);
/// assert_eq!(bounds.max_lat, 51.5100);
/// assert_eq!(bounds.min_lng, -0.1300);
/// assert_eq!(bounds.max_lng, -0.1200);
/// ```
pub fn compute_bounds(route: &[GeoCoordinate]) -> Option<Bounds> {
    let rect = to_line_string(route).bounding_rect()?;

    Some(Bounds {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lng: rect.min().x,
        max_lng: rect.max().x,
    })
}

/// Compute the centroid of a route, weighted by segment length.
///
/// Suitable for centring a map on a walk. Returns `None` for an empty route.
///
/// # Notes
///
/// Computed in raw lat/lng space, so routes crossing the antimeridian produce
/// a meaningless center. Walks don't do that in practice.
pub fn compute_center(route: &[GeoCoordinate]) -> Option<Location> {
    let centroid = to_line_string(route).centroid()?;
    Some(Location::new(centroid.y(), centroid.x()))
}

// =============================================================================
// Unit Tests
// =============================================================================
