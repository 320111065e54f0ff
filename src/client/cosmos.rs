use super::chain_res::SimulateResponse;
use super::error::ClientError;
use crate::config::cfg::ChainCfg;
use crate::config::key::SigningKey;
use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest, QueryAccountResponse,
};
use cosmos_sdk_proto::cosmos::bank::v1beta1::{QueryBalanceRequest, QueryBalanceResponse};
use cosmos_sdk_proto::cosmos::tx::v1beta1::{SimulateRequest, SimulateResponse as SimulateRes};
use cosmrs::crypto::secp256k1;
use cosmrs::rpc::endpoint::broadcast::tx_commit::Response;
use cosmrs::rpc::Client;
use cosmrs::tendermint::abci::Code;
use cosmrs::tx::{Fee, SignDoc, SignerInfo};
use cosmrs::{
    rpc::HttpClient,
    tx::{self},
};
use cosmrs::{AccountId, Any, Coin, Denom};
use prost::Message;
use tendermint_rpc::endpoint::abci_query::AbciQuery;

/// Signs and broadcasts `msg` with an explicit gas limit.
///
/// The commit response is returned as is, including check/deliver failures:
/// classifying a failed transaction is up to the caller.
pub async fn send_tx(
    client: &HttpClient,
    msg: Any,
    key: &SigningKey,
    account_id: AccountId,
    cfg: &ChainCfg,
    gas_limit: u64,
) -> Result<Response, ClientError> {
    let account = account(client, account_id).await?;
    let tx_raw = sign_tx(msg, key, &account, cfg, fee(cfg, gas_limit)?)?;

    tx_raw
        .broadcast_commit(client)
        .await
        .map_err(ClientError::proto_encoding)
}

/// Dry runs `msg` against the current chain state.
#[allow(deprecated)]
pub async fn simulate(
    client: &HttpClient,
    msg: Any,
    key: &SigningKey,
    account_id: AccountId,
    cfg: &ChainCfg,
) -> Result<SimulateResponse, ClientError> {
    let account = account(client, account_id).await?;
    let tx_raw = sign_tx(msg, key, &account, cfg, fee(cfg, 0)?)?;

    let res = abci_query(
        client,
        SimulateRequest {
            tx: None,
            tx_bytes: tx_raw.to_bytes().map_err(ClientError::proto_encoding)?,
        },
        "/cosmos.tx.v1beta1.Service/Simulate",
    )
    .await?;

    let gas_info = SimulateRes::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .gas_info;

    Ok(SimulateResponse {
        gas_wanted: gas_info.as_ref().map(|g| g.gas_wanted),
        gas_used: gas_info.as_ref().map(|g| g.gas_used),
    })
}

// The derived key must not live across an await.
fn sign_tx(
    msg: Any,
    key: &SigningKey,
    account: &BaseAccount,
    cfg: &ChainCfg,
    fee: Fee,
) -> Result<tx::Raw, ClientError> {
    let key: secp256k1::SigningKey = key.try_into()?;
    let timeout_height = 0u16;

    let tx_body = tx::Body::new(vec![msg], "", timeout_height);

    // NOTE: if we are making requests in parallel with the same key, we need to serialize `account.sequence` to avoid errors
    let auth_info =
        SignerInfo::single_direct(Some(key.public_key()), account.sequence).auth_info(fee);

    let sign_doc = SignDoc::new(
        &tx_body,
        &auth_info,
        &cfg.chain_id.parse().map_err(|_| ClientError::ChainId {
            chain_id: cfg.chain_id.to_string(),
        })?,
        account.account_number,
    )
    .map_err(ClientError::proto_encoding)?;

    sign_doc.sign(&key).map_err(ClientError::crypto)
}

fn fee(cfg: &ChainCfg, gas_limit: u64) -> Result<Fee, ClientError> {
    let denom: Denom = cfg.denom.parse().map_err(|_| ClientError::Denom {
        name: cfg.denom.clone(),
    })?;

    let amount = Coin {
        denom,
        amount: ((gas_limit as f64 * cfg.gas_price).ceil() as u64).into(),
    };

    Ok(Fee::from_amount_and_gas(amount, gas_limit))
}

/// Issues an abci query, failing on a non-zero response code.
pub async fn abci_query<T: Message>(
    client: &HttpClient,
    req: T,
    path: &str,
) -> Result<AbciQuery, ClientError> {
    let res = abci_query_raw(client, req, path).await?;

    if res.code != Code::Ok {
        return Err(ClientError::CosmosSdk { res: res.into() });
    }

    Ok(res)
}

/// Issues an abci query and returns the response whatever its code.
pub async fn abci_query_raw<T: Message>(
    client: &HttpClient,
    req: T,
    path: &str,
) -> Result<AbciQuery, ClientError> {
    let mut buf = Vec::with_capacity(req.encoded_len());
    req.encode(&mut buf).map_err(ClientError::prost_proto_en)?;

    let path = path.parse().map_err(|_| ClientError::QueryPath {
        path: path.to_string(),
    })?;

    Ok(client.abci_query(Some(path), buf, None, false).await?)
}

async fn account(client: &HttpClient, account_id: AccountId) -> Result<BaseAccount, ClientError> {
    let res = abci_query(
        client,
        QueryAccountRequest {
            address: account_id.as_ref().into(),
        },
        "/cosmos.auth.v1beta1.Query/Account",
    )
    .await?;

    let res = QueryAccountResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .account
        .ok_or(ClientError::AccountId {
            id: account_id.to_string(),
        })?;

    let base_account =
        BaseAccount::decode(res.value.as_slice()).map_err(ClientError::prost_proto_de)?;

    Ok(base_account)
}

/// Bank balance of `account_id` in `denom`, as the chain's decimal string.
pub async fn balance(
    client: &HttpClient,
    account_id: &AccountId,
    denom: &str,
) -> Result<String, ClientError> {
    let res = abci_query(
        client,
        QueryBalanceRequest {
            address: account_id.to_string(),
            denom: denom.to_string(),
        },
        "/cosmos.bank.v1beta1.Query/Balance",
    )
    .await?;

    let balance = QueryBalanceResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .balance
        .map(|c| c.amount)
        .unwrap_or_else(|| "0".to_string());

    Ok(balance)
}
