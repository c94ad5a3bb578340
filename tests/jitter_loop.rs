//! Timing and cancellation tests for the jitter loop, run under tokio's
//! paused clock so virtual time advances deterministically.

use std::sync::{Arc, Mutex};

use tokio::time::{Duration, Instant};

use roipulse::jitter::{RandomSource, ThreadRngSource};
use roipulse::snapshot::MetricSnapshot;
use roipulse::ticker::JitterTicker;

struct Fixed(f64);

impl RandomSource for Fixed {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of draws, wrapping around at the end. Each tick
/// consumes four field draws followed by one delay draw.
struct Script {
    vals: Vec<f64>,
    idx: usize,
}

impl Script {
    fn new(vals: Vec<f64>) -> Self {
        Self { vals, idx: 0 }
    }
}

impl RandomSource for Script {
    fn next_unit(&mut self) -> f64 {
        let v = self.vals[self.idx % self.vals.len()];
        self.idx += 1;
        v
    }
}

fn seed() -> MetricSnapshot {
    MetricSnapshot {
        efficiency_gain_pct: 28.4,
        oee_pct: 84.2,
        downtime_pct: -14.5,
        payback_months: 11.8,
    }
}

type TickLog = Arc<Mutex<Vec<(Instant, MetricSnapshot)>>>;

fn collector() -> (TickLog, impl FnMut(&MetricSnapshot) + Send + 'static) {
    let log: TickLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let push = move |snap: &MetricSnapshot| {
        sink.lock().unwrap().push((Instant::now(), *snap));
    };
    (log, push)
}

#[tokio::test(start_paused = true)]
async fn midpoint_draws_tick_on_schedule_without_moving_the_snapshot() {
    let (log, sink) = collector();
    let t0 = Instant::now();
    let _handle = JitterTicker::default().start(seed(), Fixed(0.5), sink);

    // First tick after 3000ms, then 2000 + 0.5 * 3000 = 3500ms apart.
    tokio::time::sleep(Duration::from_millis(10_100)).await;

    let ticks = log.lock().unwrap();
    assert_eq!(ticks.len(), 3, "expected ticks at 3000, 6500, 10000");
    assert_eq!(ticks[0].0 - t0, Duration::from_millis(3000));
    assert_eq!(ticks[1].0 - ticks[0].0, Duration::from_millis(3500));
    assert_eq!(ticks[2].0 - ticks[1].0, Duration::from_millis(3500));
    for (_, snap) in ticks.iter() {
        assert_eq!(*snap, seed());
    }
}

#[tokio::test(start_paused = true)]
async fn inter_tick_gaps_follow_the_delay_draw_and_stay_inside_the_window() {
    let (log, sink) = collector();
    // Delay draws of 0.0, 0.75, 0.25 give gaps of 2000, 4250, 2750ms.
    let script = Script::new(vec![
        0.5, 0.5, 0.5, 0.5, 0.0,
        0.5, 0.5, 0.5, 0.5, 0.75,
        0.5, 0.5, 0.5, 0.5, 0.25,
    ]);
    let _handle = JitterTicker::default().start(seed(), script, sink);

    tokio::time::sleep(Duration::from_millis(22_000)).await;

    let ticks = log.lock().unwrap();
    assert!(ticks.len() >= 6, "got {} ticks", ticks.len());
    let expected = [2000u64, 4250, 2750];
    for (i, pair) in ticks.windows(2).enumerate() {
        let gap = pair[1].0 - pair[0].0;
        assert_eq!(gap, Duration::from_millis(expected[i % expected.len()]));
        assert!(gap >= Duration::from_millis(2000));
        assert!(gap < Duration::from_millis(5000));
    }
}

#[tokio::test(start_paused = true)]
async fn first_tick_waits_the_configured_initial_delay() {
    let (log, sink) = collector();
    let ticker = JitterTicker {
        first_delay: Duration::from_millis(1000),
        ..JitterTicker::default()
    };
    let _handle = ticker.start(seed(), Fixed(0.5), sink);

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(log.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_before_the_first_tick_suppresses_all_ticks() {
    let (log, sink) = collector();
    let handle = JitterTicker::default().start(seed(), Fixed(0.5), sink);
    handle.cancel();

    tokio::time::sleep(Duration::from_secs(60)).await;

    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_a_running_sequence() {
    let (log, sink) = collector();
    let handle = JitterTicker::default().start(seed(), Fixed(0.5), sink);

    // Ticks land at 3000 and 6500; cancel at 7000 while the next is pending.
    tokio::time::sleep(Duration::from_millis(7_000)).await;
    handle.cancel();
    let seen = log.lock().unwrap().len();
    assert_eq!(seen, 2);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(log.lock().unwrap().len(), seen);

    handle.cancel();
    assert!(handle.is_cancelled());
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(log.lock().unwrap().len(), seen);
}

#[tokio::test(start_paused = true)]
async fn independent_sequences_do_not_interfere() {
    let (log_a, sink_a) = collector();
    let (log_b, sink_b) = collector();
    let ticker = JitterTicker::default();
    let handle_a = ticker.start(seed(), Fixed(0.5), sink_a);
    let _handle_b = ticker.start(seed(), Fixed(0.5), sink_b);

    tokio::time::sleep(Duration::from_millis(4_000)).await;
    handle_a.cancel();

    tokio::time::sleep(Duration::from_millis(10_000)).await;

    assert_eq!(log_a.lock().unwrap().len(), 1);
    assert!(log_b.lock().unwrap().len() > 1);
}

#[tokio::test(start_paused = true)]
async fn long_run_keeps_fields_finite_and_on_their_rounding_grid() {
    let (log, sink) = collector();
    let _handle = JitterTicker::default().start(seed(), ThreadRngSource, sink);

    tokio::time::sleep(Duration::from_secs(600)).await;

    let ticks = log.lock().unwrap();
    assert!(ticks.len() >= 100, "got {} ticks", ticks.len());
    for (_, snap) in ticks.iter() {
        assert!(snap.is_finite());
        for v in [snap.efficiency_gain_pct, snap.oee_pct, snap.downtime_pct] {
            assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-6, "off grid: {}", v);
        }
        let p = snap.payback_months;
        assert!(((p * 100.0).round() - p * 100.0).abs() < 1e-6, "off grid: {}", p);
    }
}
