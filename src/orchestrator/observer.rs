use log::{debug, info};
use std::fmt;

use super::deploy::DeployState;
use super::manifest::ContractInfo;
use crate::client::chain_res::TxResponse;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CommandType {
    Store,
    Instantiate,
    Execute,
    Query,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single chain operation as reported to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Op {
    pub kind: CommandType,
    /// Contract label for uploads and instantiations, contract address otherwise.
    pub contract: String,
    pub name: String,
}

impl Op {
    pub fn new<C: Into<String>, N: Into<String>>(kind: CommandType, contract: C, name: N) -> Self {
        Self {
            kind,
            contract: contract.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{} ({})", self.kind, self.name, self.contract)
    }
}

/// Receives the intermediate state of deployments and contract calls.
///
/// Every callback defaults to a no-op so implementors only pick what they need.
pub trait Observer: Send + Sync {
    fn gas_resolved(&self, _op: &Op, _gas_limit: u64, _estimated: bool) {}

    fn tx_committed(&self, _op: &Op, _res: &TxResponse) {}

    fn query_issued(&self, _contract: &ContractInfo, _msg: &[u8]) {}

    fn deploy_state(&self, _state: DeployState) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards every callback to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn gas_resolved(&self, op: &Op, gas_limit: u64, estimated: bool) {
        if estimated {
            info!("{op}: estimated gas limit {gas_limit}");
        } else {
            debug!("{op}: configured gas limit {gas_limit}");
        }
    }

    fn tx_committed(&self, op: &Op, res: &TxResponse) {
        info!(
            "{op}: tx {} code {} gas used {}/{}",
            res.tx_hash, res.code, res.gas_used, res.gas_wanted
        );
        if res.is_failure() {
            debug!("{op}: {}", res.raw_log);
        }
    }

    fn query_issued(&self, contract: &ContractInfo, msg: &[u8]) {
        debug!(
            "query {}: {}",
            contract.address,
            String::from_utf8_lossy(msg)
        );
    }

    fn deploy_state(&self, state: DeployState) {
        info!("deploy: {state}");
    }
}

impl<'a> Observer for Vec<&'a dyn Observer> {
    fn gas_resolved(&self, op: &Op, gas_limit: u64, estimated: bool) {
        for o in self {
            o.gas_resolved(op, gas_limit, estimated);
        }
    }

    fn tx_committed(&self, op: &Op, res: &TxResponse) {
        for o in self {
            o.tx_committed(op, res);
        }
    }

    fn query_issued(&self, contract: &ContractInfo, msg: &[u8]) {
        for o in self {
            o.query_issued(contract, msg);
        }
    }

    fn deploy_state(&self, state: DeployState) {
        for o in self {
            o.deploy_state(state);
        }
    }
}
