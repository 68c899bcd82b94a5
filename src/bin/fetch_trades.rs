use anyhow::Result;
use polymarket_position_replay::bin_common::{load_replay_config, print_banner, print_shutdown};
use replay::application::{init_logging_with_level, ReplayApp};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_replay_config()?;
    init_logging_with_level(&config.log_level);
    config.log();

    print_banner("Trade Fetcher");

    let app = ReplayApp::new(config);
    let snapshot = app.fetch_trades().await?;

    print_shutdown(
        "Trade Fetcher",
        Some(&format!("Saved {} trade(s) to {:?}", snapshot.trades.len(), app.snapshot_path())),
    );

    Ok(())
}
