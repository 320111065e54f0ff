use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use super::observer::{CommandType, Observer, Op};
use crate::client::chain_res::TxResponse;

/// Records the gas of every committed transaction, keyed by contract then `<Op>__<name>`.
#[derive(Debug, Default)]
pub struct GasProfiler {
    report: Mutex<Report>,
}

pub type Report = HashMap<String, HashMap<String, GasReport>>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GasReport {
    pub gas_wanted: u64,
    pub gas_used: u64,
    pub tx_hash: String,
}

impl GasProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instrument(&self, op: &Op, response: &TxResponse) {
        if op.kind == CommandType::Query {
            // Wasm Query msgs don't cost gas
            return;
        }

        let op_key = format!("{:?}__{}", op.kind, op.name);

        let mut report = match self.report.lock() {
            Ok(report) => report,
            Err(poisoned) => poisoned.into_inner(),
        };
        report.entry(op.contract.clone()).or_default().insert(
            op_key,
            GasReport {
                gas_used: response.gas_used,
                gas_wanted: response.gas_wanted,
                tx_hash: response.tx_hash.clone(),
            },
        );
    }

    pub fn report(&self) -> Report {
        match self.report.lock() {
            Ok(report) => report.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Observer for GasProfiler {
    fn tx_committed(&self, op: &Op, res: &TxResponse) {
        self.instrument(op, res);
    }
}
