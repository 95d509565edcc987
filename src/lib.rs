//! # Walk Route
//!
//! GPS route simplification and walk analytics for a mobile step-tracking app.
//!
//! This library provides:
//! - Great-circle distance and route length ([`geo_utils`])
//! - Ramer–Douglas–Peucker route simplification ([`simplify`])
//! - Elevation, pace and profile metrics ([`analytics`])
//! - A one-call end-of-walk summary ([`summarize_route`])
//!
//! Everything is pure computation: no I/O, no shared state, safe to call
//! from any thread. GPS collection and persistence are the caller's job.
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch summaries with rayon
//! - **`serde`** - Serialize records for the persistence layer
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use walk_route::{GeoCoordinate, RouteConfig, summarize_route};
//!
//! let route = vec![
//!     GeoCoordinate::new(51.5074, -0.1278, "2024-05-01T08:00:00Z").with_altitude(11.0),
//!     GeoCoordinate::new(51.5080, -0.1290, "2024-05-01T08:01:10Z").with_altitude(14.5),
//!     GeoCoordinate::new(51.5090, -0.1300, "2024-05-01T08:02:30Z").with_altitude(12.0),
//! ];
//!
//! let summary = summarize_route(&route, &RouteConfig::default());
//! println!(
//!     "{:.0}m, +{}m / -{}m, pace {:?} min/mi",
//!     summary.total_distance, summary.elevation_gain, summary.elevation_loss, summary.average_pace
//! );
//! ```

use std::borrow::Cow;

use log::debug;

pub mod analytics;
pub mod geo_utils;
pub mod simplify;

pub use analytics::{
    average_pace, elevation_gain, elevation_loss, elevation_profile, format_pace, pace_segments,
    ElevationPoint, PaceSegment, METERS_PER_MILE,
};
pub use geo_utils::{distance_between, total_distance};
pub use simplify::DEFAULT_TOLERANCE;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("WalkRouteRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A single GPS fix from the platform location service.
///
/// # Example
/// ```
/// use walk_route::GeoCoordinate;
/// let fix = GeoCoordinate::new(51.5074, -0.1278, "2024-05-01T08:00:00Z").with_altitude(11.0);
/// assert_eq!(fix.altitude, Some(11.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// RFC 3339 instant. Should be non-decreasing along a route.
    pub timestamp: String,
    /// Meters above sea level; `None` when the fix carried no altitude
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub accuracy: Option<f64>,
    /// Instantaneous speed reported by the platform
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub speed: Option<f64>,
}

impl GeoCoordinate {
    /// Create a fix without altitude, accuracy or speed.
    pub fn new(latitude: f64, longitude: f64, timestamp: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: timestamp.into(),
            altitude: None,
            accuracy: None,
            speed: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Check if the fix has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A bare map position, used for start/end markers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl From<&GeoCoordinate> for Location {
    fn from(fix: &GeoCoordinate) -> Self {
        Self::new(fix.latitude, fix.longitude)
    }
}

/// Bounding box for a route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Get the center point of the bounds.
    pub fn center(&self) -> Location {
        Location::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Configuration for the end-of-walk pipeline.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Tolerance for Douglas-Peucker simplification (in degrees).
    /// Smaller values preserve more detail. Default: 0.00001 (~1 meter)
    pub simplification_tolerance: f64,

    /// Length of each pace segment in meters.
    /// Default: 1609.34 (one mile)
    pub pace_segment_meters: f64,

    /// Drop fixes with non-finite or out-of-range coordinates before processing.
    /// Default: true
    pub drop_invalid_points: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            simplification_tolerance: DEFAULT_TOLERANCE,
            pace_segment_meters: METERS_PER_MILE,
            drop_invalid_points: true,
        }
    }
}

/// Everything a completed walk record needs from its GPS trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    /// Simplified route for storage and map rendering
    pub simplified: Vec<GeoCoordinate>,
    /// Number of fixes processed (after filtering, before simplification),
    /// saturating at `u32::MAX`
    pub original_point_count: u32,
    /// First fix of the simplified route
    pub start_location: Option<Location>,
    /// Last fix of the simplified route
    pub end_location: Option<Location>,
    /// Length of the full trace in meters
    pub total_distance: f64,
    /// Total climb in meters
    pub elevation_gain: f64,
    /// Total descent in meters
    pub elevation_loss: f64,
    /// Seconds from first to last fix, when timestamps parse
    pub duration_seconds: Option<f64>,
    /// Minutes per mile; `None` when undefined
    pub average_pace: Option<f64>,
    /// Per-segment pace over the full trace
    pub pace_segments: Vec<PaceSegment>,
    /// Distance/elevation samples over the full trace
    pub elevation_profile: Vec<ElevationPoint>,
    /// Pre-computed bounding box for fitting the map camera
    pub bounds: Option<Bounds>,
    /// Pre-computed center point
    pub center: Option<Location>,
}

// ============================================================================
// Summary Pipeline
// ============================================================================

/// Run the end-of-walk pipeline: simplify the trace and compute its metrics.
///
/// Metrics come from the full trace: simplification shortens the measured
/// path and, being purely horizontal, can flatten hills out of the altitude
/// series. The simplified route is what gets stored and drawn, and supplies
/// the start/end markers.
///
/// Never fails: an empty trace produces a summary of zeros, `None`s and empty
/// lists.
///
/// # Example
/// ```
/// use walk_route::{GeoCoordinate, RouteConfig, summarize_route};
///
/// let summary = summarize_route(&[], &RouteConfig::default());
/// assert_eq!(summary.total_distance, 0.0);
/// assert!(summary.average_pace.is_none());
/// ```
pub fn summarize_route(route: &[GeoCoordinate], config: &RouteConfig) -> RouteSummary {
    let points: Cow<'_, [GeoCoordinate]> =
        if config.drop_invalid_points && route.iter().any(|p| !p.is_valid()) {
            let valid: Vec<GeoCoordinate> =
                route.iter().filter(|p| p.is_valid()).cloned().collect();
            debug!("[WalkRoute] Dropped {} invalid fixes", route.len() - valid.len());
            Cow::Owned(valid)
        } else {
            Cow::Borrowed(route)
        };

    let simplified = simplify::simplify(&points, config.simplification_tolerance);
    let distance = total_distance(&points);

    RouteSummary {
        original_point_count: analytics::saturating_u32(points.len()),
        start_location: simplified.first().map(Location::from),
        end_location: simplified.last().map(Location::from),
        total_distance: distance,
        elevation_gain: elevation_gain(&points),
        elevation_loss: elevation_loss(&points),
        duration_seconds: analytics::elapsed_seconds(&points),
        average_pace: average_pace(&points, distance),
        pace_segments: pace_segments(&points, config.pace_segment_meters),
        elevation_profile: elevation_profile(&points),
        bounds: geo_utils::compute_bounds(&points),
        center: geo_utils::compute_center(&points),
        simplified,
    }
}

/// Summarize several walks, preserving input order.
pub fn summarize_routes(routes: &[Vec<GeoCoordinate>], config: &RouteConfig) -> Vec<RouteSummary> {
    routes
        .iter()
        .map(|route| summarize_route(route, config))
        .collect()
}

/// Summarize several walks using parallel processing.
///
/// This is the same as `summarize_routes` but uses rayon to spread routes
/// across threads. Recommended for backfilling large histories.
#[cfg(feature = "parallel")]
pub fn summarize_routes_parallel(
    routes: &[Vec<GeoCoordinate>],
    config: &RouteConfig,
) -> Vec<RouteSummary> {
    use rayon::prelude::*;

    routes
        .par_iter()
        .map(|route| summarize_route(route, config))
        .collect()
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::info;

    /// Distance in meters between two fixes.
    #[uniffi::export]
    pub fn ffi_distance_between(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
        distance_between(&a, &b)
    }

    /// Simplify a route with the given tolerance (degrees).
    #[uniffi::export]
    pub fn ffi_simplify_route(points: Vec<GeoCoordinate>, tolerance: f64) -> Vec<GeoCoordinate> {
        init_logging();
        simplify::simplify(&points, tolerance)
    }

    /// Summarize a finished walk.
    #[uniffi::export]
    pub fn ffi_summarize_route(points: Vec<GeoCoordinate>, config: RouteConfig) -> RouteSummary {
        init_logging();
        info!("[WalkRouteRust] summarize_route called with {} points", points.len());

        let start = std::time::Instant::now();
        let summary = summarize_route(&points, &config);

        info!(
            "[WalkRouteRust] Summarized: {} -> {} points, {:.0}m in {:?}",
            summary.original_point_count,
            summary.simplified.len(),
            summary.total_distance,
            start.elapsed()
        );

        summary
    }

    /// Summarize many walks at once (e.g. history backfill).
    #[uniffi::export]
    pub fn ffi_summarize_routes(
        routes: Vec<Vec<GeoCoordinate>>,
        config: RouteConfig,
    ) -> Vec<RouteSummary> {
        init_logging();
        info!("[WalkRouteRust] BATCH summarize_routes called with {} routes", routes.len());

        let start = std::time::Instant::now();
        let summaries = summarize_routes_parallel(&routes, &config);

        info!(
            "[WalkRouteRust] Summarized {} routes in {:?}",
            summaries.len(),
            start.elapsed()
        );

        summaries
    }

    #[uniffi::export]
    pub fn ffi_pace_segments(points: Vec<GeoCoordinate>, segment_meters: f64) -> Vec<PaceSegment> {
        pace_segments(&points, segment_meters)
    }

    #[uniffi::export]
    pub fn ffi_elevation_profile(points: Vec<GeoCoordinate>) -> Vec<ElevationPoint> {
        elevation_profile(&points)
    }

    /// Render a pace as `m:ss` for display.
    #[uniffi::export]
    pub fn ffi_format_pace(minutes_per_mile: f64) -> String {
        format_pace(minutes_per_mile)
    }

    /// Get default configuration for route summaries.
    #[uniffi::export]
    pub fn default_route_config() -> RouteConfig {
        init_logging();
        info!("[WalkRouteRust] default_route_config called - Rust is active!");
        RouteConfig::default()
    }
}

// ============================================================================
// Tests
// ============================================================================
