//! Basic example demonstrating burst filtering.
//!
//! INFO and below may burst up to 5 events, then recover 2 events every
//! second. WARN and ERROR are never throttled.

use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_burst::{BurstFilterLayer, Severity};
use tracing_subscriber::prelude::*;

fn main() {
    let burst = BurstFilterLayer::builder()
        .with_threshold(Severity::Info)
        .with_recovery_amount(2)
        .with_recovery_interval(Duration::from_secs(1))
        .with_max_burst(5)
        .build()
        .expect("valid burst filter configuration");

    let metrics = burst.metrics().clone();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(burst))
        .init();

    println!("=== Burst Filter Example ===\n");
    println!("Burst of 5, then 2 more per second for INFO and below\n");

    println!("Emitting 10 INFO messages at once:");
    for i in 1..=10 {
        info!(iteration = i, "Burst message");
    }

    println!("\nEmitting 3 WARN and 3 ERROR messages (never throttled):");
    for i in 1..=3 {
        warn!(iteration = i, "Warning passes");
        error!(iteration = i, "Error passes");
    }

    println!("\nWaiting 2 seconds, then emitting 10 DEBUG messages:");
    thread::sleep(Duration::from_secs(2));
    for i in 1..=10 {
        debug!(iteration = i, "Recovered message");
    }

    let snapshot = metrics.snapshot();
    println!("\n=== Example Complete ===");
    println!(
        "Admitted: {}, denied: {}, above threshold: {}",
        snapshot.events_admitted, snapshot.events_denied, snapshot.events_bypassed
    );
}
