//! deskdash - help-desk dashboard in the terminal
//!
//! Loads tickets, articles, community posts and status panels from a help-desk
//! API, prints them, and keeps tickets and status fresh every minute.

use std::process;
use std::sync::Arc;

use clap::Parser;

use deskdash::app::Dashboard;
use deskdash::cache::ResponseCache;
use deskdash::cli::{Cli, StartupConfig};
use deskdash::data::ApiClient;
use deskdash::logging::init_logging;
use deskdash::refresh::RefreshScheduler;
use deskdash::ui::{DashboardView, TerminalView};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let client = ApiClient::new(&config.origin)?;
    let cache = Arc::new(ResponseCache::new());
    let view: Arc<dyn DashboardView> = Arc::new(TerminalView::new());
    let dashboard = Arc::new(Dashboard::new(client, cache, view, config.settings));

    let Some(mut handle) = RefreshScheduler::new(config.refresh, dashboard).start() else {
        return Ok(());
    };

    if !handle.is_periodic() {
        handle.startup_settled().await;
        return Ok(());
    }

    tokio::select! {
        _ = handle.run_forever() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!(event = "app.interrupted", "Stopping on Ctrl-C");
        }
    }

    Ok(())
}
