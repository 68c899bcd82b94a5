use anyhow::Result;
use polymarket_position_replay::bin_common::{load_replay_config, print_banner, print_shutdown};
use replay::application::{init_logging_with_level, ReplayApp};

fn main() -> Result<()> {
    let config = load_replay_config()?;
    init_logging_with_level(&config.log_level);

    print_banner("Strategy Analysis");

    let app = ReplayApp::new(config);
    let analysis = app.analyze()?;

    print_shutdown(
        "Strategy Analysis",
        Some(&format!(
            "Outcome {} | profit ${:+.2} | ROI {:+.2}%",
            analysis.outcome, analysis.profit, analysis.roi_pct
        )),
    );

    Ok(())
}
