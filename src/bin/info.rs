use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use scrt_orc::client::secret::RpcConnector;
use scrt_orc::config::cfg::Config;
use scrt_orc::orchestrator::wallet;

// Number of most recently uploaded codes to list.
const RECENT_CODES: usize = 4;

/// Lists the most recently uploaded codes and their contracts
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = Cli::parse().config else {
        let program = std::env::args().next().unwrap_or_else(|| "info".to_string());
        println!("{program} <config file>");
        return Ok(());
    };

    let cfg = Config::from_json(&path)?;
    let wallets = wallet::initialize(&cfg, &RpcConnector).await?;
    let client = wallets.first().context("no wallet configured")?.client();

    let codes = client.codes().await?;
    for code in codes.iter().rev().take(RECENT_CODES) {
        println!("{}", serde_json::to_string(code)?);

        let contracts = client.contracts_by_code(code.code_id).await?;
        println!("{}", serde_json::to_string_pretty(&contracts)?);
    }

    Ok(())
}
