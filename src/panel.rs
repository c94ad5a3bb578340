//! Static dashboard content and the plain-text frame renderer.
//!
//! Everything here is decorative fixture data; only the four metric values
//! change between frames.

use crate::snapshot::MetricSnapshot;

/// One phase of the rollout strip at the top of the panel.
#[derive(Debug, Clone, Copy)]
pub struct RolloutStep {
    pub id: &'static str,
    pub label: &'static str,
    pub completed: bool,
}

pub const ROLLOUT_STEPS: [RolloutStep; 3] = [
    RolloutStep { id: "01", label: "Proof of Concept", completed: true },
    RolloutStep { id: "02", label: "Pilot Phase", completed: true },
    RolloutStep { id: "03", label: "Global Rollout", completed: false },
];

pub const VALIDATION_ITEMS: [&str; 4] = [
    "Ops Throughput: +12%",
    "Finance Capex: Cleared",
    "IT Security: SOC2 Cert.",
    "Engineering API: Live",
];

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: &'static str,
    pub status_badge: &'static str,
    pub rollout: [RolloutStep; 3],
    pub validation: [&'static str; 4],
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            title: "Industrial ROI Dashboard",
            status_badge: "System Active",
            rollout: ROLLOUT_STEPS,
            validation: VALIDATION_ITEMS,
        }
    }
}

impl Panel {
    /// Render one full text frame for a snapshot.
    pub fn render(&self, snap: &MetricSnapshot) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "{}  [{}]",
            self.title.to_uppercase(),
            self.status_badge.to_uppercase()
        ));
        for step in &self.rollout {
            let mark = if step.completed { "x" } else { " " };
            lines.push(format!("[{}] {} {}", mark, step.id, step.label));
        }
        lines.push(format!(
            "EFFICIENCY GAIN  {:+.1}%       Target: +25% reached",
            snap.efficiency_gain_pct
        ));
        lines.push(format!(
            "OVERALL OEE      {:.1}% LIVE   Industry Avg: 72%",
            snap.oee_pct
        ));
        lines.push(format!(
            "DOWNTIME RED.    {:.1}%       Critical reduction phase",
            snap.downtime_pct
        ));
        lines.push(format!(
            "ROI PAYBACK      {:.2} Months  Estimated break-even",
            snap.payback_months
        ));
        lines.push("ROI VALIDATION MATRIX: all key stakeholders verified performance metrics".to_string());
        for item in &self.validation {
            lines.push(format!("  * {}", item));
        }
        lines.push("ROI ACHIEVED".to_string());
        lines.push("REAL-TIME SYNC ACTIVE".to_string());
        lines
    }
}
