use serde::{Deserialize, Serialize};

/// Point-in-time record of the four displayed metrics.
///
/// Replaced wholesale on every tick; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub efficiency_gain_pct: f64,
    pub oee_pct: f64,
    pub downtime_pct: f64,
    pub payback_months: f64,
}

impl MetricSnapshot {
    pub fn is_finite(&self) -> bool {
        self.efficiency_gain_pct.is_finite()
            && self.oee_pct.is_finite()
            && self.downtime_pct.is_finite()
            && self.payback_months.is_finite()
    }
}

/// Round half away from zero to `places` decimal digits.
pub fn round_to(x: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (x * scale).round() / scale
}
