//! Example of summarizing many walks at once.
//!
//! Run with: cargo run --example batch_summaries --features parallel

use std::time::Instant;
use walk_route::{summarize_routes, summarize_routes_parallel, GeoCoordinate, RouteConfig};

fn main() {
    println!("Batch Walk Summaries Example\n");

    // A month of daily walks of varying length
    let routes: Vec<Vec<GeoCoordinate>> = (0..30)
        .map(|day| straight_walk(51.5074, -0.1278, 200 + day * 40, day as f64 * 0.00001))
        .collect();

    let config = RouteConfig::default();
    println!("Created {} walks\n", routes.len());

    let start = Instant::now();
    let sequential = summarize_routes(&routes, &config);
    println!("Sequential: {:?}", start.elapsed());

    let start = Instant::now();
    let parallel = summarize_routes_parallel(&routes, &config);
    println!("Parallel:   {:?}\n", start.elapsed());

    assert_eq!(sequential, parallel);

    // Stats
    let total_distance: f64 = parallel.iter().map(|s| s.total_distance).sum();
    let total_fixes: u32 = parallel.iter().map(|s| s.original_point_count).sum();
    let stored_fixes: usize = parallel.iter().map(|s| s.simplified.len()).sum();
    let paced = parallel.iter().filter(|s| s.average_pace.is_some()).count();

    println!("Stats:");
    println!("  Total distance: {:.1}km", total_distance / 1000.0);
    println!("  Fixes recorded: {}", total_fixes);
    println!("  Fixes stored: {}", stored_fixes);
    println!("  Walks with pace: {}", paced);
}

/// Walk north-east from a start point with a slight zig-zag.
fn straight_walk(lat: f64, lng: f64, fixes: usize, wobble: f64) -> Vec<GeoCoordinate> {
    (0..fixes)
        .map(|i| {
            let side = if i % 2 == 0 { wobble } else { -wobble };
            let seconds = i * 4;
            GeoCoordinate::new(
                lat + i as f64 * 0.00003 + side,
                lng + i as f64 * 0.00002,
                format!(
                    "2024-05-01T{:02}:{:02}:{:02}Z",
                    7 + seconds / 3600, (seconds / 60) % 60, seconds % 60
                ),
            )
        })
        .collect()
}
