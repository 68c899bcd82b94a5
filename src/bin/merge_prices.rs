use anyhow::Result;
use polymarket_position_replay::bin_common::{load_replay_config, print_banner, print_shutdown};
use replay::application::{init_logging_with_level, ReplayApp};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_replay_config()?;
    init_logging_with_level(&config.log_level);
    config.log();

    print_banner("Price Merger");

    let app = ReplayApp::new(config);
    let series = app.merge_prices().await?;

    print_shutdown(
        "Price Merger",
        Some(&format!("Wrote {} row(s) to {:?}", series.len(), app.merged_csv_path())),
    );

    Ok(())
}
