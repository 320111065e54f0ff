use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use scrt_orc::client::secret::RpcConnector;
use scrt_orc::config::cfg::Config;
use scrt_orc::contract::application::Application;
use scrt_orc::orchestrator::observer::LogObserver;
use scrt_orc::orchestrator::{scenario, wallet, DeploymentManifest};

/// Writes and reads the deployed application contract with several wallets
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file of a completed deployment
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = Cli::parse().config else {
        let program = std::env::args().next().unwrap_or_else(|| "smoke".to_string());
        println!("{program} <config file>");
        return Ok(());
    };

    let cfg = Config::from_json(&path)?;
    let wallets = wallet::initialize(&cfg, &RpcConnector).await?;
    let manifest = DeploymentManifest::require(&cfg.path)?;
    let readers = wallet::test_clients(&cfg, &RpcConnector).await?;

    println!("{manifest:?}");

    let owner = wallets.first().context("no wallet configured")?;
    let app = Application::new(manifest.app_info, &LogObserver);

    scenario::run(&app, owner, &readers, "test").await?;
    println!("ok");

    Ok(())
}
