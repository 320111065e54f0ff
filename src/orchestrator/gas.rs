use log::debug;
use std::future::Future;

use super::error::GasError;
use super::observer::CommandType;
use crate::client::chain_res::SimulateResponse;
use crate::client::error::ClientError;

/// Added to the simulated gas usage to absorb estimation noise.
pub const GAS_ESTIMATE_MARGIN: u64 = 10_000;

/// Gas budget of a single call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GasPolicy {
    /// Used as the gas limit unchanged.
    Fixed(u64),
    /// Dry run the call and add [`GAS_ESTIMATE_MARGIN`] to its gas usage.
    Estimate,
}

impl GasPolicy {
    pub fn is_estimate(&self) -> bool {
        matches!(self, GasPolicy::Estimate)
    }
}

impl From<Option<u64>> for GasPolicy {
    fn from(gas: Option<u64>) -> Self {
        match gas {
            Some(gas) => GasPolicy::Fixed(gas),
            None => GasPolicy::Estimate,
        }
    }
}

impl From<u64> for GasPolicy {
    fn from(gas: u64) -> Self {
        GasPolicy::Fixed(gas)
    }
}

/// Resolves `policy` to a gas limit. `dry_run` is only invoked for [`GasPolicy::Estimate`].
pub async fn resolve<F, Fut>(policy: GasPolicy, op: CommandType, dry_run: F) -> Result<u64, GasError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<SimulateResponse, ClientError>>,
{
    match policy {
        GasPolicy::Fixed(gas) => Ok(gas),
        GasPolicy::Estimate => {
            let sim = dry_run()
                .await
                .map_err(|e| GasError::Simulation { op, source: e })?;
            debug!("simulated {op}: {sim:?}");

            sim.gas_used
                .filter(|used| *used > 0)
                .and_then(|used| used.checked_add(GAS_ESTIMATE_MARGIN))
                .ok_or(GasError::Estimation { op })
        }
    }
}
