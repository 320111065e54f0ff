use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::chain_res::{CodeInfo, ContractSummary, SimulateResponse, TxResponse};
use super::error::ClientError;
use crate::config::cfg::ChainCfg;
use crate::config::key::SigningKey;
use crate::orchestrator::manifest::ContractInfo;
use crate::orchestrator::observer::CommandType;

/// A state changing compute module call. Simulation takes the same value as broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComputeMsg {
    StoreCode {
        wasm: Vec<u8>,
    },
    Instantiate {
        code_id: u64,
        code_hash: String,
        label: String,
        msg: Vec<u8>,
    },
    Execute {
        contract: ContractInfo,
        msg: Vec<u8>,
    },
}

impl ComputeMsg {
    pub fn kind(&self) -> CommandType {
        match self {
            ComputeMsg::StoreCode { .. } => CommandType::Store,
            ComputeMsg::Instantiate { .. } => CommandType::Instantiate,
            ComputeMsg::Execute { .. } => CommandType::Execute,
        }
    }
}

/// Signing client bound to a single wallet.
#[async_trait]
pub trait ComputeClient: Send + Sync {
    /// Bech32 address of the signing wallet.
    fn address(&self) -> &str;

    async fn broadcast(&self, msg: &ComputeMsg, gas_limit: u64) -> Result<TxResponse, ClientError>;

    async fn simulate(&self, msg: &ComputeMsg) -> Result<SimulateResponse, ClientError>;

    /// Smart query. A JSON string result carries the chain's own error text.
    async fn query(&self, contract: &ContractInfo, msg: Vec<u8>) -> Result<Value, ClientError>;

    async fn code_hash(&self, code_id: u64) -> Result<String, ClientError>;

    async fn balance(&self, denom: &str) -> Result<String, ClientError>;

    async fn codes(&self) -> Result<Vec<CodeInfo>, ClientError>;

    async fn contracts_by_code(&self, code_id: u64) -> Result<Vec<ContractSummary>, ClientError>;
}

/// Builds one authenticated client per signing key.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        chain: &ChainCfg,
        key: &SigningKey,
    ) -> Result<Arc<dyn ComputeClient>, ClientError>;
}
