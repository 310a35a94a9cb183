use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn, Level};
use tracing_burst::infrastructure::mocks::{MockCaptureLayer, MockClock};
use tracing_burst::{BurstFilterLayer, FilterState, Severity};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

fn burst_layer(clock: &MockClock) -> BurstFilterLayer {
    BurstFilterLayer::builder()
        .with_threshold(Severity::Info)
        .with_recovery_amount(10)
        .with_recovery_interval(Duration::from_secs(6))
        .with_max_burst(100)
        .with_clock(Arc::new(clock.clone()))
        .build()
        .unwrap()
}

#[test]
fn test_burst_then_recovery() {
    let clock = MockClock::new(Instant::now());
    let burst = burst_layer(&clock);
    let capture = MockCaptureLayer::new();

    let subscriber =
        tracing_subscriber::registry().with(capture.clone().with_filter(burst.clone()));

    tracing::subscriber::with_default(subscriber, || {
        // Empty the bucket: only 100 of 110 get through
        for i in 0..110 {
            info!("Logging 110 messages, should only see 100 logs # {}", i + 1);
        }
        assert_eq!(capture.count(), 100);
        assert_eq!(burst.metrics().events_denied(), 10);

        // Two recovery intervals later 20 more get through
        clock.advance(Duration::from_secs(12));
        for i in 0..110 {
            info!("Waited 12 seconds, should only see 20 logs # {}", i + 1);
        }
        assert_eq!(capture.count(), 120);
        assert_eq!(burst.metrics().events_denied(), 100);

        // Debug is below the threshold and the bucket is empty
        for i in 0..110 {
            debug!("Debug message that should be dropped # {}", i + 1);
        }
        assert_eq!(capture.count(), 120);
        assert_eq!(burst.metrics().events_denied(), 210);

        // 18 seconds after the last admitted event: three intervals
        clock.advance(Duration::from_secs(18));
        for i in 0..110 {
            info!("Waited 18 seconds, should see 30 logs # {}", i + 1);
        }
        assert_eq!(capture.count(), 150);
        assert_eq!(burst.metrics().events_denied(), 290);
    });

    assert_eq!(capture.count_at(Level::DEBUG), 0);
    assert_eq!(capture.count_at(Level::INFO), 150);
}

#[test]
fn test_above_threshold_always_passes() {
    let clock = MockClock::new(Instant::now());
    let burst = burst_layer(&clock);
    let capture = MockCaptureLayer::new();

    let subscriber =
        tracing_subscriber::registry().with(capture.clone().with_filter(burst.clone()));

    tracing::subscriber::with_default(subscriber, || {
        for _ in 0..150 {
            info!("drain");
        }
        for _ in 0..200 {
            warn!("warning while throttled");
            error!("error while throttled");
        }
    });

    assert_eq!(capture.count_at(Level::INFO), 100);
    assert_eq!(capture.count_at(Level::WARN), 200);
    assert_eq!(capture.count_at(Level::ERROR), 200);

    let snapshot = burst.metrics().snapshot();
    assert_eq!(snapshot.events_bypassed, 400);
    assert_eq!(snapshot.events_denied, 50);
    assert_eq!(burst.available_tokens(), Some(0));
}

#[test]
fn test_bypass_never_creates_bucket() {
    let clock = MockClock::new(Instant::now());
    let burst = burst_layer(&clock);
    let capture = MockCaptureLayer::new();

    let subscriber =
        tracing_subscriber::registry().with(capture.clone().with_filter(burst.clone()));

    tracing::subscriber::with_default(subscriber, || {
        warn!("one");
        error!("two");
    });

    assert_eq!(capture.count(), 2);
    assert_eq!(burst.state(), FilterState::Uninitialized);

    tracing::subscriber::with_default(
        tracing_subscriber::registry().with(capture.clone().with_filter(burst.clone())),
        || trace!("three"),
    );

    assert_eq!(burst.state(), FilterState::Active);
    assert_eq!(burst.available_tokens(), Some(99));
}

#[test]
fn test_filter_only_affects_its_layer() {
    let clock = MockClock::new(Instant::now());
    let burst = BurstFilterLayer::builder()
        .with_threshold(Severity::Info)
        .with_recovery_interval(Duration::from_secs(60))
        .with_max_burst(3)
        .with_clock(Arc::new(clock))
        .build()
        .unwrap();

    let filtered = MockCaptureLayer::new();
    let unfiltered = MockCaptureLayer::new();

    let subscriber = tracing_subscriber::registry()
        .with(unfiltered.clone())
        .with(filtered.clone().with_filter(burst));

    tracing::subscriber::with_default(subscriber, || {
        for _ in 0..10 {
            info!("event");
        }
    });

    assert_eq!(filtered.count(), 3);
    assert_eq!(unfiltered.count(), 10);
}

#[test]
fn test_metrics_match_captured_events() {
    let clock = MockClock::new(Instant::now());
    let burst = BurstFilterLayer::builder()
        .with_threshold(Severity::Warn)
        .with_recovery_amount(1)
        .with_recovery_interval(Duration::from_secs(1))
        .with_max_burst(5)
        .with_clock(Arc::new(clock.clone()))
        .build()
        .unwrap();
    let capture = MockCaptureLayer::new();

    let subscriber =
        tracing_subscriber::registry().with(capture.clone().with_filter(burst.clone()));

    tracing::subscriber::with_default(subscriber, || {
        for second in 0..10 {
            for _ in 0..3 {
                warn!("tick");
            }
            error!("tock");
            if second % 2 == 0 {
                clock.advance(Duration::from_secs(1));
            }
        }
    });

    let snapshot = burst.metrics().snapshot();
    assert_eq!(snapshot.events_admitted as usize, capture.count());
    assert_eq!(snapshot.total_events(), 40);
    assert_eq!(snapshot.events_bypassed, 10);
}
