//! Basic example of summarizing a recorded walk.
//!
//! Run with: cargo run --example summarize_walk

use walk_route::{format_pace, simplify, summarize_route, GeoCoordinate, RouteConfig};

fn main() {
    // A loop around a park (London area), one fix every 5 seconds
    let route = park_loop(360);

    let config = RouteConfig::default();
    let summary = summarize_route(&route, &config);

    println!("Walk Summary\n");
    println!(
        "Config: tolerance={} deg, segment={}m\n",
        config.simplification_tolerance, config.pace_segment_meters
    );

    println!(
        "Points: {} -> {} after simplification",
        summary.original_point_count, summary.simplified.len()
    );
    println!("Distance: {:.0}m", summary.total_distance);
    println!("Elevation: +{}m / -{}m", summary.elevation_gain, summary.elevation_loss);
    match summary.average_pace {
        Some(pace) => println!("Average pace: {} min/mi", format_pace(pace)),
        None => println!("Average pace: unavailable"),
    }

    println!("\nSplits:");
    for (i, segment) in summary.pace_segments.iter().enumerate() {
        println!(
            "  Mile {}: {} ({:.0}m, fixes {}-{})",
            i + 1,
            format_pace(segment.pace),
            segment.distance,
            segment.start_index,
            segment.end_index
        );
    }

    // Compare tolerances
    println!("\nSimplification:");
    for tolerance in [0.000001, simplify::DEFAULT_TOLERANCE, 0.0001] {
        let kept = simplify::simplify(&route, tolerance).len();
        println!(
            "  tolerance {:>8}: {:>4} points ({:.0}% reduction)",
            tolerance, kept, 100.0 * (1.0 - kept as f64 / route.len() as f64)
        );
    }
}

/// Circular walk with a gentle hill and a little GPS noise.
fn park_loop(fixes: usize) -> Vec<GeoCoordinate> {
    (0..fixes)
        .map(|i| {
            let angle = i as f64 / fixes as f64 * std::f64::consts::TAU;
            let noise = 0.000004 * ((i * 7) % 5) as f64 - 0.000008;
            let seconds = i * 5;
            GeoCoordinate::new(
                51.5074 + 0.004 * angle.sin() + noise,
                -0.1278 + 0.006 * angle.cos() - noise,
                format!("2024-05-01T08:{:02}:{:02}Z", seconds / 60, seconds % 60),
            )
            .with_altitude(25.0 + 8.0 * angle.sin())
            .with_accuracy(4.0)
        })
        .collect()
}
