use crate::snapshot::MetricSnapshot;

/// Runtime knobs, all overridable through the environment. Defaults reproduce
/// the stock panel: seeds {28.4, 84.2, -14.5, 11.8}, first tick after 3s,
/// then a uniform wait in [2s, 5s).
#[derive(Debug, Clone)]
pub struct Config {
    pub efficiency_seed: f64,
    pub oee_seed: f64,
    pub downtime_seed: f64,
    pub payback_seed: f64,
    pub first_tick_ms: u64,
    pub tick_min_ms: u64,
    pub tick_spread_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            efficiency_seed: std::env::var("EFFICIENCY_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(28.4),
            oee_seed: std::env::var("OEE_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(84.2),
            downtime_seed: std::env::var("DOWNTIME_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(-14.5),
            payback_seed: std::env::var("PAYBACK_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(11.8),
            first_tick_ms: std::env::var("FIRST_TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            tick_min_ms: std::env::var("TICK_MIN_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(2000),
            tick_spread_ms: std::env::var("TICK_SPREAD_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
        }
    }

    pub fn initial_snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            efficiency_gain_pct: self.efficiency_seed,
            oee_pct: self.oee_seed,
            downtime_pct: self.downtime_seed,
            payback_months: self.payback_seed,
        }
    }
}
