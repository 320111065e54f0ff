use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use scrt_orc::client::secret::RpcConnector;
use scrt_orc::config::cfg::Config;
use scrt_orc::orchestrator::gas_profiler::GasProfiler;
use scrt_orc::orchestrator::observer::{LogObserver, Observer};
use scrt_orc::orchestrator::{wallet, ContractDeployer};

/// Deploys the storage and application contracts described by a config file
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file. The manifest is written to `<config>.deploy.json`
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = Cli::parse().config else {
        let program = std::env::args().next().unwrap_or_else(|| "deploy".to_string());
        println!("{program} <config file>");
        return Ok(());
    };

    let cfg = Config::from_json(&path)?;
    let wallets = wallet::initialize(&cfg, &RpcConnector).await?;
    let deployer_wallet = wallets.first().context("no wallet configured")?;

    let profiler = GasProfiler::new();
    let observers: Vec<&dyn Observer> = vec![&LogObserver, &profiler];

    let manifest = ContractDeployer::new(&cfg, deployer_wallet, &observers)
        .run()
        .await?;

    println!("deployed: {}", serde_json::to_string_pretty(&manifest)?);
    println!("gas: {}", serde_json::to_string_pretty(&profiler.report())?);

    Ok(())
}
