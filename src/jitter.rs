use rand::Rng;

use crate::snapshot::{round_to, MetricSnapshot};

/// Per-tick drift amplitude for each field. A single tick moves a field by at
/// most half its amplitude before rounding.
pub const EFFICIENCY_AMPLITUDE: f64 = 0.1;
pub const OEE_AMPLITUDE: f64 = 0.05;
pub const DOWNTIME_AMPLITUDE: f64 = 0.08;
pub const PAYBACK_AMPLITUDE: f64 = 0.01;

/// Uniform source over `[0, 1)`. Injected so tests can script the draws.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

fn centered(rng: &mut impl RandomSource) -> f64 {
    rng.next_unit() - 0.5
}

/// One jitter mutation. Draw order is fixed: efficiency, oee, downtime,
/// payback. A draw of exactly 0.5 leaves a field's raw value unchanged.
pub fn jitter_step(prev: &MetricSnapshot, rng: &mut impl RandomSource) -> MetricSnapshot {
    let next = MetricSnapshot {
        efficiency_gain_pct: round_to(
            prev.efficiency_gain_pct + centered(rng) * EFFICIENCY_AMPLITUDE,
            1,
        ),
        oee_pct: round_to(prev.oee_pct + centered(rng) * OEE_AMPLITUDE, 1),
        downtime_pct: round_to(prev.downtime_pct + centered(rng) * DOWNTIME_AMPLITUDE, 1),
        payback_months: round_to(prev.payback_months + centered(rng) * PAYBACK_AMPLITUDE, 2),
    };
    debug_assert!(next.is_finite());
    next
}
