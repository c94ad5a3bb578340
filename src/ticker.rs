use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::{sleep, Duration};

use crate::config::Config;
use crate::jitter::{jitter_step, RandomSource};
use crate::snapshot::MetricSnapshot;

/// Stops a running jitter sequence. Cancellation is one-way and idempotent;
/// clones share the same flag.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Self-rescheduling jitter loop. Every `start` call spawns an independent
/// sequence with its own snapshot, random source, and cancel flag.
#[derive(Debug, Clone)]
pub struct JitterTicker {
    pub first_delay: Duration,
    pub min_delay: Duration,
    pub delay_spread: Duration,
}

impl Default for JitterTicker {
    fn default() -> Self {
        Self {
            first_delay: Duration::from_millis(3000),
            min_delay: Duration::from_millis(2000),
            delay_spread: Duration::from_millis(3000),
        }
    }
}

impl JitterTicker {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            first_delay: Duration::from_millis(cfg.first_tick_ms),
            min_delay: Duration::from_millis(cfg.tick_min_ms),
            delay_spread: Duration::from_millis(cfg.tick_spread_ms),
        }
    }

    /// Begin a sequence. The first mutation fires after `first_delay`; each
    /// later one after a uniform draw from `[min_delay, min_delay +
    /// delay_spread)`. The flag is checked after every sleep, before the
    /// mutation, so a cancel that races an already-fired timer still
    /// suppresses the tick.
    pub fn start<R, F>(&self, initial: MetricSnapshot, mut rng: R, mut on_tick: F) -> CancelHandle
    where
        R: RandomSource + Send + 'static,
        F: FnMut(&MetricSnapshot) + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let (first, min, spread) = (self.first_delay, self.min_delay, self.delay_spread);
        tokio::spawn(async move {
            let mut snap = initial;
            sleep(first).await;
            loop {
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                snap = jitter_step(&snap, &mut rng);
                on_tick(&snap);
                let wait = min + spread.mul_f64(rng.next_unit());
                sleep(wait).await;
            }
        });
        CancelHandle { cancelled }
    }
}
