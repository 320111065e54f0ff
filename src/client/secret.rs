use async_trait::async_trait;
use cosmos_sdk_proto::cosmos::base::abci::v1beta1::TxMsgData;
use cosmrs::rpc::endpoint::broadcast::tx_commit::Response;
use cosmrs::rpc::HttpClient;
use cosmrs::{AccountId, Any};
use log::{debug, warn};
use prost::Message;
use serde_json::Value;
use std::sync::Arc;

use super::chain_res::{CodeInfo, ContractSummary, SimulateResponse, TxEvent, TxResponse};
use super::compute::{ComputeClient, ComputeMsg, Connector};
use super::cosmos::{abci_query, abci_query_raw, balance, send_tx, simulate};
use super::encryption::{EnigmaUtils, Nonce};
use super::error::ClientError;
use super::proto;
use crate::config::cfg::ChainCfg;
use crate::config::key::SigningKey;
use crate::orchestrator::manifest::ContractInfo;

/// Secret Network compute client speaking tendermint RPC, signing as one wallet.
#[derive(Clone)]
pub struct SecretClient {
    // http tendermint RPC client
    rpc_client: HttpClient,
    cfg: ChainCfg,
    key: SigningKey,
    account_id: AccountId,
    address: String,
    enigma: EnigmaUtils,
}

impl SecretClient {
    /// Opens the RPC client and fetches the chain's transaction encryption key.
    pub async fn connect(cfg: ChainCfg, key: SigningKey) -> Result<Self, ClientError> {
        let rpc_client = HttpClient::new(cfg.rpc_endpoint.as_str())?;
        let account_id = key.to_account(&cfg.prefix)?;

        let res = abci_query(&rpc_client, (), proto::QUERY_TX_KEY).await?;
        let io_key: [u8; 32] = proto::Key::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?
            .key
            .as_slice()
            .try_into()
            .map_err(|_| ClientError::ConsensusKey)?;

        debug!("connected {} to {}", account_id, cfg.rpc_endpoint);

        Ok(Self {
            rpc_client,
            address: account_id.to_string(),
            account_id,
            cfg,
            key,
            enigma: EnigmaUtils::new(io_key),
        })
    }

    fn encode(&self, msg: &ComputeMsg) -> Result<(Any, Option<Nonce>), ClientError> {
        let sender = self.account_id.to_bytes();

        match msg {
            ComputeMsg::StoreCode { wasm } => {
                let msg = proto::MsgStoreCode {
                    sender,
                    wasm_byte_code: wasm.clone(),
                    source: String::new(),
                    builder: String::new(),
                };
                Ok((to_any(proto::MSG_STORE_CODE, &msg), None))
            }
            ComputeMsg::Instantiate {
                code_id,
                code_hash,
                label,
                msg,
            } => {
                let (nonce, init_msg) = self.enigma.encrypt(code_hash, msg)?;
                let msg = proto::MsgInstantiateContract {
                    sender,
                    callback_code_hash: String::new(),
                    code_id: *code_id,
                    label: label.clone(),
                    init_msg,
                    init_funds: vec![],
                    callback_sig: vec![],
                    admin: String::new(),
                };
                Ok((to_any(proto::MSG_INSTANTIATE_CONTRACT, &msg), Some(nonce)))
            }
            ComputeMsg::Execute { contract, msg } => {
                let contract_id: AccountId =
                    contract
                        .address
                        .parse()
                        .map_err(|_| ClientError::AccountId {
                            id: contract.address.clone(),
                        })?;
                let (nonce, msg) = self.enigma.encrypt(&contract.code_hash, msg)?;
                let msg = proto::MsgExecuteContract {
                    sender,
                    contract: contract_id.to_bytes(),
                    msg,
                    callback_code_hash: String::new(),
                    sent_funds: vec![],
                    callback_sig: vec![],
                };
                Ok((to_any(proto::MSG_EXECUTE_CONTRACT, &msg), Some(nonce)))
            }
        }
    }

    fn tx_response(&self, res: Response, nonce: Option<&Nonce>) -> TxResponse {
        let tx = if res.check_tx.code.is_err() {
            res.check_tx
        } else {
            res.deliver_tx
        };

        let log = tx.log.to_string();
        let raw_log = match nonce {
            Some(nonce) if tx.code.is_err() => self.enigma.decrypt_log(&log, nonce),
            _ => log,
        };

        let data = match tx.data {
            Some(data) if tx.code.is_ok() => committed_data(&self.enigma, data.into(), nonce),
            _ => vec![],
        };

        TxResponse {
            code: tx.code.value(),
            raw_log,
            events: tx.events.iter().map(TxEvent::from).collect(),
            data,
            gas_wanted: tx.gas_wanted.into(),
            gas_used: tx.gas_used.into(),
            tx_hash: res.hash.to_string(),
            height: res.height.value(),
        }
    }
}

// A committed tx stays committed even when its payload cannot be read.
fn committed_data(enigma: &EnigmaUtils, raw: Vec<u8>, nonce: Option<&Nonce>) -> Vec<Vec<u8>> {
    msg_data(enigma, &raw, nonce).unwrap_or_else(|e| {
        warn!("unreadable data in committed tx: {e}");
        vec![]
    })
}

fn msg_data(
    enigma: &EnigmaUtils,
    raw: &[u8],
    nonce: Option<&Nonce>,
) -> Result<Vec<Vec<u8>>, ClientError> {
    TxMsgData::decode(raw)
        .map_err(ClientError::prost_proto_de)?
        .data
        .into_iter()
        .map(|m| match (m.msg_type.as_str(), nonce) {
            (proto::MSG_EXECUTE_CONTRACT, Some(nonce)) => {
                let res = proto::MsgExecuteContractResponse::decode(m.data.as_slice())
                    .map_err(ClientError::prost_proto_de)?;
                enigma.decrypt_data(&res.data, nonce)
            }
            (proto::MSG_INSTANTIATE_CONTRACT, Some(nonce)) => {
                let res = proto::MsgInstantiateContractResponse::decode(m.data.as_slice())
                    .map_err(ClientError::prost_proto_de)?;
                enigma.decrypt_data(&res.data, nonce)
            }
            _ => Ok(m.data),
        })
        .collect()
}

fn to_any<M: Message>(type_url: &str, msg: &M) -> Any {
    Any {
        type_url: type_url.to_string(),
        value: msg.encode_to_vec(),
    }
}

#[async_trait]
impl ComputeClient for SecretClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn broadcast(&self, msg: &ComputeMsg, gas_limit: u64) -> Result<TxResponse, ClientError> {
        let (any, nonce) = self.encode(msg)?;

        let res = send_tx(
            &self.rpc_client,
            any,
            &self.key,
            self.account_id.clone(),
            &self.cfg,
            gas_limit,
        )
        .await?;

        Ok(self.tx_response(res, nonce.as_ref()))
    }

    async fn simulate(&self, msg: &ComputeMsg) -> Result<SimulateResponse, ClientError> {
        let (any, _) = self.encode(msg)?;

        simulate(
            &self.rpc_client,
            any,
            &self.key,
            self.account_id.clone(),
            &self.cfg,
        )
        .await
    }

    async fn query(&self, contract: &ContractInfo, msg: Vec<u8>) -> Result<Value, ClientError> {
        let (nonce, query) = self.enigma.encrypt(&contract.code_hash, &msg)?;

        let res = abci_query_raw(
            &self.rpc_client,
            proto::QuerySecretContractRequest {
                contract_address: contract.address.clone(),
                query,
            },
            proto::QUERY_SECRET_CONTRACT,
        )
        .await?;

        if res.code.is_err() {
            let log = res.log.to_string();
            return Ok(Value::String(self.enigma.decrypt_log(&log, &nonce)));
        }

        let data = proto::QuerySecretContractResponse::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?
            .data;
        let plain = self.enigma.decrypt_data(&data, &nonce)?;

        Ok(serde_json::from_slice(&plain)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&plain).into_owned())))
    }

    async fn code_hash(&self, code_id: u64) -> Result<String, ClientError> {
        let res = abci_query(
            &self.rpc_client,
            proto::QueryByCodeIdRequest { code_id },
            proto::QUERY_CODE_HASH,
        )
        .await?;

        Ok(proto::QueryCodeHashResponse::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?
            .code_hash)
    }

    async fn balance(&self, denom: &str) -> Result<String, ClientError> {
        balance(&self.rpc_client, &self.account_id, denom).await
    }

    async fn codes(&self) -> Result<Vec<CodeInfo>, ClientError> {
        let res = abci_query(&self.rpc_client, (), proto::QUERY_CODES).await?;

        Ok(proto::QueryCodesResponse::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?
            .code_infos
            .into_iter()
            .map(|c| CodeInfo {
                code_id: c.code_id,
                creator: c.creator,
                code_hash: c.code_hash,
            })
            .collect())
    }

    async fn contracts_by_code(&self, code_id: u64) -> Result<Vec<ContractSummary>, ClientError> {
        let res = abci_query(
            &self.rpc_client,
            proto::QueryByCodeIdRequest { code_id },
            proto::QUERY_CONTRACTS_BY_CODE,
        )
        .await?;

        Ok(
            proto::QueryContractsByCodeIdResponse::decode(res.value.as_slice())
                .map_err(ClientError::prost_proto_de)?
                .contract_infos
                .into_iter()
                .map(|c| ContractSummary {
                    address: c.contract_address,
                    code_id,
                    label: c.contract_info.map(|i| i.label).unwrap_or_default(),
                })
                .collect(),
        )
    }
}

/// Connects a [`SecretClient`] per key.
#[derive(Clone, Copy, Debug, Default)]
pub struct RpcConnector;

#[async_trait]
impl Connector for RpcConnector {
    async fn connect(
        &self,
        chain: &ChainCfg,
        key: &SigningKey,
    ) -> Result<Arc<dyn ComputeClient>, ClientError> {
        Ok(Arc::new(
            SecretClient::connect(chain.clone(), key.clone()).await?,
        ))
    }
}
