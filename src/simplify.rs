//! # Route Simplification
//!
//! Ramer–Douglas–Peucker simplification of a recorded walk, reducing a dense
//! GPS trace to the subset of fixes needed to preserve its shape.
//!
//! ## Algorithm
//! 1. The straight line from the first to the last fix approximates the range
//! 2. Find the interior fix farthest from that line
//! 3. If it lies further than `tolerance`, split the range there and process both halves
//! 4. Otherwise every interior fix of the range is dropped
//!
//! Ranges are processed from an explicit work stack rather than by recursion,
//! so very long or adversarial traces cannot exhaust the call stack. The
//! result is identical to the recursive formulation.
//!
//! Distances are measured in raw (lat, lng) degree space. One unit of
//! tolerance is therefore shorter on the ground in longitude than in latitude
//! away from the equator; at walking scale this is accepted.
//!
//! ```rust
//! use walk_route::{GeoCoordinate, simplify};
//!
//! let route: Vec<GeoCoordinate> = (0..20)
//!     .map(|i| GeoCoordinate::new(51.5, -0.1 + i as f64 * 0.0001, "2024-05-01T08:00:00Z"))
//!     .collect();
//!
//! let simplified = simplify::simplify(&route, simplify::DEFAULT_TOLERANCE);
//! assert_eq!(simplified.len(), 2);
//! ```

use log::debug;

use crate::GeoCoordinate;

/// Default tolerance in lat/lng degrees (~1 meter).
pub const DEFAULT_TOLERANCE: f64 = 0.00001;

/// Shortest distance from `point` to the segment `start`→`end`, in degrees.
///
/// The projection parameter is clamped to `[0, 1]`, so fixes beyond either
/// end of the segment measure to the nearer endpoint. A zero-length segment
/// measures to `start`.
pub fn perpendicular_distance(
    point: &GeoCoordinate,
    start: &GeoCoordinate,
    end: &GeoCoordinate,
) -> f64 {
    let seg_lat = end.latitude - start.latitude;
    let seg_lng = end.longitude - start.longitude;
    let rel_lat = point.latitude - start.latitude;
    let rel_lng = point.longitude - start.longitude;

    let length_sq = seg_lat * seg_lat + seg_lng * seg_lng;
    let t = if length_sq > 0.0 {
        ((rel_lat * seg_lat + rel_lng * seg_lng) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let d_lat = rel_lat - t * seg_lat;
    let d_lng = rel_lng - t * seg_lng;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

/// Simplify a route, returning the kept fixes in their original order.
///
/// Routes with two or fewer fixes are returned unchanged. For longer routes the
/// first and last fixes are always kept. Larger tolerances never keep more fixes.
pub fn simplify(route: &[GeoCoordinate], tolerance: f64) -> Vec<GeoCoordinate> {
    let simplified: Vec<GeoCoordinate> = simplify_indices(route, tolerance)
        .into_iter()
        .map(|i| route[i].clone())
        .collect();

    if route.len() > 2 {
        debug!(
            "[WalkRoute] Simplified {} -> {} points ({:.0}% reduction, tolerance {})",
            route.len(),
            simplified.len(),
            100.0 * (1.0 - simplified.len() as f64 / route.len() as f64),
            tolerance
        );
    }

    simplified
}

/// Simplify a route and return the indices of the kept fixes (ascending).
pub fn simplify_indices(route: &[GeoCoordinate], tolerance: f64) -> Vec<usize> {
    let n = route.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let (index, max_distance) = farthest_point(route, start, end);
        if max_distance > tolerance {
            keep[index] = true;
            stack.push((index, end));
            stack.push((start, index));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| if k { Some(i) } else { None })
        .collect()
}

/// Interior fix of `start..=end` farthest from the chord; the first one wins ties.
///
/// Requires at least one interior fix (`end > start + 1`).
fn farthest_point(route: &[GeoCoordinate], start: usize, end: usize) -> (usize, f64) {
    let first = &route[start];
    let last = &route[end];

    let mut max_index = start + 1;
    let mut max_distance = perpendicular_distance(&route[max_index], first, last);

    for (offset, point) in route[start + 2..end].iter().enumerate() {
        let distance = perpendicular_distance(point, first, last);
        if distance > max_distance {
            max_distance = distance;
            max_index = start + 2 + offset;
        }
    }

    (max_index, max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(lat: f64, lng: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lng, "2024-05-01T08:00:00Z")
    }

    /// Textbook recursive formulation, used to check the iterative one.
    fn simplify_recursive(points: &[GeoCoordinate], tolerance: f64) -> Vec<GeoCoordinate> {
        if points.len() <= 2 {
            return points.to_vec();
        }
        let last = points.len() - 1;
        let mut max_distance = -1.0;
        let mut max_index = 0;
        for i in 1..last {
            let d = perpendicular_distance(&points[i], &points[0], &points[last]);
            if d > max_distance {
                max_distance = d;
                max_index = i;
            }
        }
        if max_distance > tolerance {
            let mut left = simplify_recursive(&points[..=max_index], tolerance);
            let right = simplify_recursive(&points[max_index..], tolerance);
            left.pop();
            left.extend(right);
            left
        } else {
            vec![points[0].clone(), points[last].clone()]
        }
    }

    fn wiggly_route(n: usize) -> Vec<GeoCoordinate> {
        (0..n)
            .map(|i| {
                let t = i as f64 / 10.0;
                fix(46.2 + t.sin() * 0.0004 + (t * 3.7).cos() * 0.00003, 6.1 + i as f64 * 0.00005)
            })
            .collect()
    }

    #[test]
    fn test_perpendicular_distance_on_line() {
        let d = perpendicular_distance(&fix(0.5, 0.5), &fix(0.0, 0.0), &fix(1.0, 1.0));
        assert!(d < 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_offset() {
        let d = perpendicular_distance(&fix(1.0, 0.5), &fix(0.0, 0.0), &fix(0.0, 1.0));
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_clamped_past_end() {
        // Beyond the end of the segment, measure to the endpoint
        let d = perpendicular_distance(&fix(0.0, 4.0), &fix(0.0, 0.0), &fix(0.0, 1.0));
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_degenerate_segment() {
        let d = perpendicular_distance(&fix(3.0, 4.0), &fix(0.0, 0.0), &fix(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_routes_unchanged() {
        let empty: Vec<GeoCoordinate> = vec![];
        assert!(simplify(&empty, DEFAULT_TOLERANCE).is_empty());

        let single = vec![fix(51.5, -0.1)];
        assert_eq!(simplify(&single, 10.0), single);

        let pair = vec![fix(51.5, -0.1), fix(51.6, -0.2)];
        assert_eq!(simplify(&pair, 0.0), pair);
        assert_eq!(simplify(&pair, 1000.0), pair);
    }

    #[test]
    fn test_small_zigzag_collapses_to_endpoints() {
        // Lateral deviations of ~0.3m, well inside the 1m default tolerance
        let route = vec![
            fix(0.0, 0.0),
            fix(0.000003, 0.001),
            fix(-0.000003, 0.002),
            fix(0.000003, 0.003),
            fix(0.0, 0.004),
        ];
        let simplified = simplify(&route, DEFAULT_TOLERANCE);
        assert_eq!(simplified, vec![route[0].clone(), route[4].clone()]);
    }

    #[test]
    fn test_collinear_fixes_dropped_at_zero_tolerance() {
        // Distance must exceed the tolerance, so exactly collinear and
        // repeated fixes go even at tolerance 0
        let route = vec![
            fix(0.0, 0.0),
            fix(0.0, 1.0),
            fix(0.0, 2.0),
            fix(0.0, 2.0),
            fix(0.0, 3.0),
            fix(0.0, 4.0),
        ];
        assert_eq!(simplify_indices(&route, 0.0), vec![0, 5]);
    }

    #[test]
    fn test_corner_is_kept() {
        let route = vec![
            fix(0.0, 0.0),
            fix(0.0, 0.001),
            fix(0.0, 0.002),
            fix(0.001, 0.002),
            fix(0.002, 0.002),
        ];
        let indices = simplify_indices(&route, DEFAULT_TOLERANCE);
        assert_eq!(indices, vec![0, 2, 4]);
    }

    #[test]
    fn test_endpoints_preserved() {
        let route = wiggly_route(300);
        for tolerance in [0.0, 0.000001, DEFAULT_TOLERANCE, 0.0001, 0.01, 1.0] {
            let simplified = simplify(&route, tolerance);
            assert_eq!(simplified.first(), route.first());
            assert_eq!(simplified.last(), route.last());
        }
    }

    #[test]
    fn test_tolerance_monotonicity() {
        let route = wiggly_route(500);
        let tolerances = [0.0, 0.000002, DEFAULT_TOLERANCE, 0.00005, 0.0002, 0.001];
        let counts: Vec<usize> = tolerances
            .iter()
            .map(|&t| simplify(&route, t).len())
            .collect();
        for pair in counts.windows(2) {
            assert!(pair[0] >= pair[1], "counts not monotone: {:?}", counts);
        }
    }

    #[test]
    fn test_matches_recursive_formulation() {
        let route = wiggly_route(400);
        for tolerance in [0.0, 0.000005, DEFAULT_TOLERANCE, 0.0001] {
            assert_eq!(simplify(&route, tolerance), simplify_recursive(&route, tolerance));
        }
    }

    #[test]
    fn test_output_is_subsequence() {
        let route = wiggly_route(200);
        let indices = simplify_indices(&route, DEFAULT_TOLERANCE);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(indices[0], 0);
        assert_eq!(*indices.last().unwrap(), route.len() - 1);
    }

    #[test]
    fn test_long_route_keeps_everything_at_zero_tolerance() {
        // Sharp zigzag: no fix is redundant
        let route: Vec<GeoCoordinate> = (0..5_000)
            .map(|i| fix(if i % 2 == 0 { 0.0 } else { 0.001 }, i as f64 * 0.0001))
            .collect();
        assert_eq!(simplify_indices(&route, 0.0).len(), route.len());
    }

    #[test]
    fn test_convex_curve_deep_split() {
        // Farthest point always sits next to the start, the worst case for recursion depth
        let route: Vec<GeoCoordinate> = (0..3_000)
            .map(|i| {
                let x = i as f64 * 0.0001;
                fix((x + 1.0).ln(), x)
            })
            .collect();
        let indices = simplify_indices(&route, 0.0);
        assert_eq!(indices[0], 0);
        assert_eq!(*indices.last().unwrap(), route.len() - 1);
    }
}
