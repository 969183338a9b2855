use anyhow::Context;
use clap::Parser;
use fpl_fetcher::cli::Cli;
use fpl_fetcher::{FetcherConfig, FplFetcher, WhatIfRequest, WhatIfService};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = FetcherConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let fetcher = FplFetcher::new(config.fpl.clone())?;
    let snapshot = fetcher.fetch_snapshot(cli.entry, cli.gameweek, &config.rank).await?;

    let service = WhatIfService::new(&config.rank);
    let request = WhatIfRequest::from(cli.command);

    match service.run(&snapshot, &request) {
        Ok(response) => {
            let body = serde_json::to_string_pretty(&response)
                .context("Failed to serialize what-if response")?;
            println!("{body}");
            Ok(())
        }
        Err(e) => {
            error!("What-if simulation failed: {}", e);
            Err(e.into())
        }
    }
}
