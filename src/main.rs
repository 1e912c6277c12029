//! colorwheel server binary
//!
//! Serves the web and chat endpoints and, optionally, a terminal chat session
//! against the same ledger.

use clap::Parser;
use colorwheel::{
    api::{ApiServer, AppState},
    config::{generate_sample_config, ConfigLoader},
    console::run_console,
    AccountId, ColorwheelResult, Services,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "colorwheel")]
#[command(about = "Color and number wager service", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Balance for newly seen accounts (overrides config)
    #[arg(long)]
    starting_balance: Option<i64>,

    /// Also run a terminal chat session for this account id
    #[arg(long, value_name = "ACCOUNT_ID")]
    console: Option<String>,

    /// Write a sample config to this path and exit
    #[arg(long, value_name = "PATH")]
    write_sample_config: Option<String>,
}

#[tokio::main]
async fn main() -> ColorwheelResult<()> {
    let args = Args::parse();

    if let Some(path) = args.write_sample_config {
        generate_sample_config(&path)?;
        println!("✅ Sample configuration written to {}", path);
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(balance) = args.starting_balance {
        config.game.starting_balance = balance;
    }
    loader.validate(&config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .init();

    info!("🎰 colorwheel starting, starting balance {}", config.game.starting_balance);

    let services = Services::new(&config.game);

    if let Some(account) = args.console {
        let sessions = services.sessions.clone();
        tokio::spawn(async move {
            if let Err(e) = run_console(sessions, AccountId::from(account)).await {
                error!("Console session failed: {}", e);
            }
        });
    }

    let state = Arc::new(AppState::new(services.sessions.clone()));
    ApiServer::new(config.server, state).run().await
}
