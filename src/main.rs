use anyhow::Result;

use roipulse::config::Config;
use roipulse::jitter::ThreadRngSource;
use roipulse::logging::{json_log, obj, v_num, v_str};
use roipulse::panel::Panel;
use roipulse::snapshot::MetricSnapshot;
use roipulse::ticker::JitterTicker;

fn log_metrics(snap: &MetricSnapshot) {
    json_log(
        "metrics",
        obj(&[
            ("efficiency_gain_pct", v_num(snap.efficiency_gain_pct)),
            ("oee_pct", v_num(snap.oee_pct)),
            ("downtime_pct", v_num(snap.downtime_pct)),
            ("payback_months", v_num(snap.payback_months)),
        ]),
    );
}

fn print_frame(panel: &Panel, snap: &MetricSnapshot) {
    for line in panel.render(snap) {
        eprintln!("{}", line);
    }
    log_metrics(snap);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let panel = Panel::default();
    let initial = cfg.initial_snapshot();

    json_log(
        "panel",
        obj(&[
            ("status", v_str("start")),
            ("first_tick_ms", v_num(cfg.first_tick_ms as f64)),
            ("tick_min_ms", v_num(cfg.tick_min_ms as f64)),
            ("tick_spread_ms", v_num(cfg.tick_spread_ms as f64)),
        ]),
    );
    print_frame(&panel, &initial);

    let ticker = JitterTicker::from_config(&cfg);
    let handle = ticker.start(initial, ThreadRngSource, move |snap| {
        print_frame(&panel, snap);
    });

    tokio::signal::ctrl_c().await?;
    handle.cancel();
    json_log("panel", obj(&[("status", v_str("cancelled"))]));
    Ok(())
}
