use anyhow::Result;
use polymarket_position_replay::bin_common::{load_replay_config, print_banner, print_shutdown};
use replay::application::{init_logging_with_level, ReplayApp};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_replay_config()?;
    init_logging_with_level(&config.log_level);
    config.log();

    print_banner("Position Replay");

    let app = ReplayApp::new(config);

    info!("Step 1/3: fetching trades");
    if let Err(e) = app.fetch_trades().await {
        error!("fetch_trades failed: {:#}", e);
        return Err(e);
    }

    info!("Step 2/3: merging reference prices");
    if let Err(e) = app.merge_prices().await {
        error!("merge_prices failed: {:#}", e);
        return Err(e);
    }

    info!("Step 3/3: analyzing strategy");
    let analysis = match app.analyze() {
        Ok(analysis) => analysis,
        Err(e) => {
            error!("analyze_strategy failed: {:#}", e);
            return Err(e);
        }
    };

    print_shutdown(
        "Position Replay",
        Some(&format!(
            "Outcome {} | profit ${:+.2} | ROI {:+.2}%",
            analysis.outcome, analysis.profit, analysis.roi_pct
        )),
    );

    Ok(())
}
