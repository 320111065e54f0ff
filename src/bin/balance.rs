use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use scrt_orc::client::secret::RpcConnector;
use scrt_orc::config::cfg::Config;
use scrt_orc::orchestrator::wallet;

/// Prints the balance of the first configured wallet
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = Cli::parse().config else {
        let program = std::env::args().next().unwrap_or_else(|| "balance".to_string());
        println!("{program} <config file>");
        return Ok(());
    };

    let cfg = Config::from_json(&path)?;
    let wallets = wallet::initialize(&cfg, &RpcConnector).await?;
    let wallet = wallets.first().context("no wallet configured")?;

    let amount = wallet.client().balance(&cfg.denom).await?;
    println!("{amount}{}", cfg.denom);
    println!("{}scrt", to_scrt(&amount)?);

    Ok(())
}

// 1 scrt = 10^6 uscrt, printed without trailing zeros
fn to_scrt(uscrt: &str) -> Result<String> {
    let uscrt: u128 = uscrt.parse().context("balance is not an integer")?;
    let whole = uscrt / 1_000_000;
    let frac = uscrt % 1_000_000;

    if frac == 0 {
        return Ok(whole.to_string());
    }

    let frac = format!("{frac:06}");
    Ok(format!("{whole}.{}", frac.trim_end_matches('0')))
}

#[cfg(test)]
mod tests {
    use super::to_scrt;

    #[test]
    fn converts_uscrt() {
        assert_eq!(to_scrt("0").unwrap(), "0");
        assert_eq!(to_scrt("25000000").unwrap(), "25");
        assert_eq!(to_scrt("1234500").unwrap(), "1.2345");
        assert_eq!(to_scrt("7").unwrap(), "0.000007");
        assert!(to_scrt("1.5").is_err());
    }
}
