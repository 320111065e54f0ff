use log::{debug, info};
use serde::Serialize;

use super::error::ExecError;
use super::gas::{self, GasPolicy};
use super::manifest::ContractInfo;
use super::observer::{CommandType, Observer, Op};
use super::wallet::WalletClient;
use crate::client::chain_res::{ExecResponse, InstantiateResponse, StoreCodeResponse, TxResponse};
use crate::client::compute::ComputeMsg;

/// Uploads wasm bytecode and returns the code id assigned by the chain.
pub async fn store(
    wallet: &WalletClient,
    wasm: Vec<u8>,
    label: &str,
    gas: GasPolicy,
    observer: &dyn Observer,
) -> Result<StoreCodeResponse, ExecError> {
    info!("Uploading contract: {label}");

    let res = submit(wallet, ComputeMsg::StoreCode { wasm }, gas, label, "store", observer).await?;

    let code_id = res
        .attribute("code_id")
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ExecError::Upload {
            log: format!("no code_id in upload response: {}", res.raw_log),
        })?;

    info!("Contract codeId: {code_id}");
    Ok(StoreCodeResponse { code_id, res })
}

/// Instantiates a stored code and returns the new contract's address.
pub async fn instantiate<T: Serialize>(
    wallet: &WalletClient,
    code_id: u64,
    code_hash: &str,
    label: &str,
    msg: &T,
    gas: GasPolicy,
    observer: &dyn Observer,
) -> Result<InstantiateResponse, ExecError> {
    let msg = ComputeMsg::Instantiate {
        code_id,
        code_hash: code_hash.to_string(),
        label: label.to_string(),
        msg: serde_json::to_vec(msg).map_err(ExecError::json)?,
    };

    let res = submit(wallet, msg, gas, label, "instantiate", observer).await?;

    let address = res
        .find_log("message", "contract_address")
        .map(str::to_string)
        .ok_or_else(|| ExecError::Instantiate {
            log: format!("no contract_address in instantiate response: {}", res.raw_log),
        })?;

    info!("Contract address: {address}");
    Ok(InstantiateResponse { address, res })
}

/// Executes `msg` against `contract` and returns the first message response as text.
pub async fn execute<T: Serialize>(
    wallet: &WalletClient,
    contract: &ContractInfo,
    msg: &T,
    gas: GasPolicy,
    observer: &dyn Observer,
) -> Result<ExecResponse, ExecError> {
    let name = msg_name(&serde_json::to_value(msg).map_err(ExecError::json)?);

    let msg = ComputeMsg::Execute {
        contract: contract.clone(),
        msg: serde_json::to_vec(msg).map_err(ExecError::json)?,
    };

    let res = submit(wallet, msg, gas, &contract.address, &name, observer).await?;

    let data = res
        .data
        .first()
        .map(|d| String::from_utf8_lossy(d).into_owned())
        .unwrap_or_default();

    Ok(ExecResponse { data, res })
}

// Resolves gas, broadcasts and classifies the outcome.
async fn submit(
    wallet: &WalletClient,
    msg: ComputeMsg,
    gas: GasPolicy,
    contract: &str,
    name: &str,
    observer: &dyn Observer,
) -> Result<TxResponse, ExecError> {
    let op = Op::new(msg.kind(), contract, name);
    let client = wallet.client();
    let msg_ref = &msg;

    let gas_limit = gas::resolve(gas, op.kind, move || client.simulate(msg_ref)).await?;
    observer.gas_resolved(&op, gas_limit, gas.is_estimate());

    let res = client.broadcast(&msg, gas_limit).await?;
    observer.tx_committed(&op, &res);
    debug!("{op}: gasUsed: {}", res.gas_used);

    if res.is_failure() {
        let log = res.raw_log;
        return Err(match op.kind {
            CommandType::Store => ExecError::Upload { log },
            CommandType::Instantiate => ExecError::Instantiate { log },
            CommandType::Execute | CommandType::Query => ExecError::Execution { log },
        });
    }

    Ok(res)
}

// `{"set_applications": {..}}` is reported as `set_applications`.
fn msg_name(msg: &serde_json::Value) -> String {
    msg.as_object()
        .and_then(|o| o.keys().next())
        .cloned()
        .unwrap_or_else(|| "execute".to_string())
}
