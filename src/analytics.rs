//! Route analytics: elevation, pace and profile metrics derived from a walk.
//!
//! Every function here is pure and tolerant of missing data. Routes that are
//! too short, fixes without altitude and unparseable timestamps all produce a
//! neutral value (`0.0`, `None` or an empty list) rather than an error, so a
//! walk summary can always be rendered.
//!
//! Functions accept either the raw trace or a simplified one; none of them
//! depends on simplification having been applied.

use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;

use crate::geo_utils::distance_between;
use crate::GeoCoordinate;

pub use crate::geo_utils::total_distance;

/// Meters in one statute mile. Pace is reported in minutes per mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Pace over one segment of a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaceSegment {
    /// Index of the first fix of the segment in the input route (saturates at `u32::MAX`)
    pub start_index: u32,
    /// Index of the last fix of the segment, shared with the next segment's start
    /// (saturates at `u32::MAX`)
    pub end_index: u32,
    /// Minutes per mile, rounded to one decimal
    pub pace: f64,
    /// Distance covered by the segment in meters
    pub distance: f64,
}

/// One sample of an elevation profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationPoint {
    /// Cumulative distance from the start of the route in meters
    pub distance: f64,
    /// Altitude in meters
    pub elevation: f64,
}

// =============================================================================
// Elevation
// =============================================================================

/// Total climb in meters, rounded to one decimal.
///
/// Consecutive pairs where either fix lacks altitude are skipped.
pub fn elevation_gain(route: &[GeoCoordinate]) -> f64 {
    round_to_tenth(altitude_deltas(route).filter(|d| *d > 0.0).sum())
}

/// Total descent in meters (positive), rounded to one decimal.
///
/// Consecutive pairs where either fix lacks altitude are skipped.
pub fn elevation_loss(route: &[GeoCoordinate]) -> f64 {
    round_to_tenth(altitude_deltas(route).filter(|d| *d < 0.0).map(f64::abs).sum())
}

fn altitude_deltas(route: &[GeoCoordinate]) -> impl Iterator<Item = f64> + '_ {
    route.windows(2).filter_map(|w| match (w[0].altitude, w[1].altitude) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    })
}

/// Cumulative distance paired with altitude for every fix that has one.
///
/// Fixes without altitude are left out, but the distance they cover still
/// counts towards later samples, so indices do not line up with the route.
pub fn elevation_profile(route: &[GeoCoordinate]) -> Vec<ElevationPoint> {
    let mut profile = Vec::new();
    let mut cumulative = 0.0;

    for (i, point) in route.iter().enumerate() {
        if i > 0 {
            cumulative += distance_between(&route[i - 1], point);
        }
        if let Some(elevation) = point.altitude {
            profile.push(ElevationPoint { distance: cumulative, elevation });
        }
    }

    profile
}

// =============================================================================
// Time & Pace
// =============================================================================

/// ISO 8601 forms with an offset that RFC 3339 rejects: `+0000` without a
/// colon, and times without seconds.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Offset-less forms, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a fix timestamp. RFC 3339 is expected, with the common ISO 8601
/// variants accepted; values without an offset are read as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|naive| naive.and_utc())
        })
}

/// Seconds between the first and last fix.
///
/// `None` for routes with fewer than two fixes or when either timestamp can't
/// be parsed. The result may be zero or negative for out-of-order input.
pub fn elapsed_seconds(route: &[GeoCoordinate]) -> Option<f64> {
    if route.len() < 2 {
        return None;
    }

    let first = &route[0].timestamp;
    let last = &route[route.len() - 1].timestamp;

    let (Some(start), Some(end)) = (parse_timestamp(first), parse_timestamp(last)) else {
        debug!("[WalkRoute] Unparseable timestamp in {:?} / {:?}", first, last);
        return None;
    };

    Some((end - start).num_milliseconds() as f64 / 1000.0)
}

/// Average pace in minutes per mile, rounded to one decimal.
///
/// Elapsed time comes from the first and last timestamps of `route`; distance
/// is supplied by the caller (usually the dense-trace [`total_distance`]).
/// Returns `None` when pace is undefined: fewer than two fixes, non-positive
/// distance, non-positive duration, or unparseable timestamps.
///
/// ```rust
/// use walk_route::{GeoCoordinate, analytics};
///
/// let route = vec![
///     GeoCoordinate::new(0.0, 0.0, "2024-05-01T08:00:00Z"),
///     GeoCoordinate::new(0.0, 0.0145, "2024-05-01T08:15:30Z"),
/// ];
/// assert_eq!(analytics::average_pace(&route, 1609.34), Some(15.5));
/// ```
pub fn average_pace(route: &[GeoCoordinate], total_distance_meters: f64) -> Option<f64> {
    if route.len() < 2 || total_distance_meters.is_nan() || total_distance_meters <= 0.0 {
        return None;
    }

    let seconds = elapsed_seconds(route)?;
    if seconds <= 0.0 {
        debug!("[WalkRoute] Non-positive duration ({}s), pace undefined", seconds);
        return None;
    }

    let minutes = seconds / 60.0;
    let miles = total_distance_meters / METERS_PER_MILE;
    Some(round_to_tenth(minutes / miles))
}

/// Split a route into consecutive segments of at least `segment_meters` and
/// report the pace of each.
///
/// A segment closes at the first fix where the accumulated distance reaches
/// `segment_meters`. Segments whose pace is undefined are dropped, though the
/// next segment still starts where the dropped one ended. Distance after the
/// last complete segment is not reported.
pub fn pace_segments(route: &[GeoCoordinate], segment_meters: f64) -> Vec<PaceSegment> {
    let mut segments = Vec::new();
    if route.len() < 2 || segment_meters.is_nan() || segment_meters <= 0.0 {
        return segments;
    }

    let mut start = 0;
    let mut accumulated = 0.0;

    for i in 1..route.len() {
        accumulated += distance_between(&route[i - 1], &route[i]);
        if accumulated < segment_meters {
            continue;
        }

        if let Some(pace) = average_pace(&route[start..=i], accumulated) {
            segments.push(PaceSegment {
                start_index: saturating_u32(start),
                end_index: saturating_u32(i),
                pace,
                distance: accumulated,
            });
        }

        start = i;
        accumulated = 0.0;
    }

    segments
}

/// Render a pace as `m:ss`, or `--:--` when there is nothing meaningful to show.
pub fn format_pace(minutes_per_mile: f64) -> String {
    if !minutes_per_mile.is_finite() || minutes_per_mile <= 0.0 {
        return "--:--".to_string();
    }

    let total_seconds = (minutes_per_mile * 60.0).round() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Narrow an index or count for the FFI records, saturating at `u32::MAX`.
#[inline]
pub(crate) fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[inline]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
