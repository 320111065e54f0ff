//! In-memory chain emulating the storage and application contracts.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use scrt_orc::client::chain_res::{
    ChainResponse, CodeInfo, ContractSummary, EventAttribute, SimulateResponse, TxEvent, TxResponse,
};
use scrt_orc::client::compute::{ComputeClient, ComputeMsg, Connector};
use scrt_orc::client::error::ClientError;
use scrt_orc::config::cfg::{ChainCfg, Config};
use scrt_orc::config::key::SigningKey;
use scrt_orc::contract::{application, storage};
use scrt_orc::orchestrator::manifest::ContractInfo;
use scrt_orc::orchestrator::observer::CommandType;
use scrt_orc::orchestrator::permit::Permit;
use scrt_orc::orchestrator::query::QUERY_ERROR_PREFIX;

pub const STORAGE_WASM: &[u8] = b"\0asm storage contract";
pub const APP_WASM: &[u8] = b"\0asm application contract";

pub const DEPLOYER_MNEMONIC: &str = "budget post bunker this scout clarify salon glance cannon decorate short initial admit dog vehicle bitter female reunion typical toe lottery glow grace muffin";

const PREFIX: &str = "secret";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    Storage,
    Application,
}

struct Code {
    kind: ContractKind,
    hash: String,
    creator: String,
}

struct Entry {
    owner: String,
    value: u32,
    everyone: bool,
    readers: Vec<String>,
}

enum ContractState {
    Storage {
        applications: Vec<String>,
        entries: HashMap<String, Entry>,
    },
    Application {
        storage: ContractInfo,
    },
}

struct Contract {
    code_id: u64,
    label: String,
    state: ContractState,
}

pub struct ChainState {
    codes: Vec<Code>,
    contracts: BTreeMap<String, Contract>,
    /// Gas consumed by every transaction.
    pub gas_cost: u64,
    /// When false, simulations report no gas usage.
    pub simulation_usable: bool,
    /// Instantiations whose label starts with this fail.
    pub fail_instantiate: Option<String>,
    /// `(operation, gas limit)` of every broadcast, in order.
    pub broadcasts: Vec<(CommandType, u64)>,
    pub simulations: usize,
}

impl Default for ChainState {
    fn default() -> Self {
        Self {
            codes: vec![],
            contracts: BTreeMap::new(),
            gas_cost: 100_000,
            simulation_usable: true,
            fail_instantiate: None,
            broadcasts: vec![],
            simulations: 0,
        }
    }
}

pub type FakeChain = Arc<Mutex<ChainState>>;

pub fn chain() -> FakeChain {
    Arc::new(Mutex::new(ChainState::default()))
}

impl ChainState {
    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    pub fn contract_count(&self, kind: ContractKind) -> usize {
        self.contracts
            .values()
            .filter(|c| self.codes[c.code_id as usize - 1].kind == kind)
            .count()
    }

    pub fn applications(&self, storage: &str) -> Vec<String> {
        match self.contracts.get(storage).map(|c| &c.state) {
            Some(ContractState::Storage { applications, .. }) => applications.clone(),
            _ => vec![],
        }
    }

    fn store(&mut self, sender: &str, wasm: &[u8]) -> Result<Vec<TxEvent>, String> {
        let kind = if wasm == STORAGE_WASM {
            ContractKind::Storage
        } else if wasm == APP_WASM {
            ContractKind::Application
        } else {
            return Err("invalid wasm".to_string());
        };

        self.codes.push(Code {
            kind,
            hash: format!("{:064x}", self.codes.len() + 0xc0de),
            creator: sender.to_string(),
        });
        let code_id = self.codes.len();

        Ok(vec![message_event(
            "/secret.compute.v1beta1.MsgStoreCode",
            sender,
            ("code_id", &code_id.to_string()),
        )])
    }

    fn instantiate(
        &mut self,
        sender: &str,
        code_id: u64,
        code_hash: &str,
        label: &str,
        msg: &[u8],
    ) -> Result<Vec<TxEvent>, String> {
        if let Some(prefix) = &self.fail_instantiate {
            if label.starts_with(prefix.as_str()) {
                return Err("out of gas in location: wasm contract; out of gas".to_string());
            }
        }

        let code = self
            .codes
            .get((code_id as usize).wrapping_sub(1))
            .ok_or_else(|| format!("no such code {code_id}"))?;
        if code.hash != code_hash {
            return Err("code hash mismatch".to_string());
        }

        let state = match code.kind {
            ContractKind::Storage => {
                let _: storage::InstantiateMsg = parse(msg)?;
                ContractState::Storage {
                    applications: vec![],
                    entries: HashMap::new(),
                }
            }
            ContractKind::Application => {
                let init: application::InstantiateMsg = parse(msg)?;
                ContractState::Application {
                    storage: ContractInfo {
                        address: init.storage_address,
                        code_hash: init.storage_codehash,
                    },
                }
            }
        };

        let n = self.contracts.len() as u8 + 1;
        let address = cosmrs::AccountId::new(PREFIX, &[n; 20])
            .map_err(|e| e.to_string())?
            .to_string();

        self.contracts.insert(
            address.clone(),
            Contract {
                code_id,
                label: label.to_string(),
                state,
            },
        );

        Ok(vec![
            TxEvent {
                kind: "wasm".to_string(),
                attributes: vec![attr("contract_address", "not-the-instantiated-contract")],
            },
            message_event(
                "/secret.compute.v1beta1.MsgInstantiateContract",
                sender,
                ("contract_address", &address),
            ),
        ])
    }

    fn execute(
        &mut self,
        sender: &str,
        contract: &ContractInfo,
        msg: &[u8],
    ) -> Result<Vec<TxEvent>, String> {
        let linked_storage = match &self.lookup(contract)?.state {
            ContractState::Storage { .. } => None,
            ContractState::Application { storage } => Some(storage.address.clone()),
        };

        match linked_storage {
            None => {
                let storage::ExecuteMsg::SetApplications { applications } = parse(msg)?;
                if let Some(ContractState::Storage {
                    applications: apps, ..
                }) = self.contracts.get_mut(&contract.address).map(|c| &mut c.state)
                {
                    *apps = applications;
                }
            }
            Some(storage_address) => self.set(&storage_address, msg)?,
        }

        Ok(vec![message_event(
            "/secret.compute.v1beta1.MsgExecuteContract",
            sender,
            ("contract_address", &contract.address),
        )])
    }

    // The application forwards `set` to its storage contract, which owns the entry.
    fn set(&mut self, storage_address: &str, msg: &[u8]) -> Result<(), String> {
        let application::ExecuteMsg::Set {
            permit,
            key,
            value,
            authz,
        } = parse(msg)?;

        let owner = self
            .authenticate(storage_address, permit.as_ref())?
            .ok_or_else(|| "unauthorized".to_string())?;

        let entries = match self.contracts.get_mut(storage_address).map(|c| &mut c.state) {
            Some(ContractState::Storage { entries, .. }) => entries,
            _ => return Err("storage contract not found".to_string()),
        };
        if entries.contains_key(&key) {
            return Err("alrady exists".to_string());
        }

        let (everyone, readers) = match authz {
            application::Authz::Public => (true, vec![]),
            application::Authz::Private => (false, vec![]),
            application::Authz::Protected(reader) => (false, vec![reader]),
        };
        entries.insert(
            key,
            Entry {
                owner,
                value,
                everyone,
                readers,
            },
        );

        Ok(())
    }

    fn query(&self, contract: &ContractInfo, msg: &[u8]) -> Result<Value, String> {
        let storage_address = match &self.lookup(contract)?.state {
            ContractState::Application { storage } => storage.address.clone(),
            ContractState::Storage { .. } => return Err("unsupported query".to_string()),
        };

        let application::QueryMsg::Get { permit, key } = parse(msg)?;
        let reader = self.authenticate(&storage_address, permit.as_ref())?;

        let entries = match self.contracts.get(&storage_address).map(|c| &c.state) {
            Some(ContractState::Storage { entries, .. }) => entries,
            _ => return Err("storage contract not found".to_string()),
        };

        let Some(entry) = entries.get(&key) else {
            return Ok(json!({ "value": null }));
        };

        let readable = entry.everyone
            || reader
                .as_ref()
                .map(|r| *r == entry.owner || entry.readers.contains(r))
                .unwrap_or(false);
        if !readable {
            return Err("unauthorized".to_string());
        }

        Ok(json!({ "value": entry.value }))
    }

    // Signer of `permit`, if the storage contract accepts it.
    fn authenticate(&self, storage: &str, permit: Option<&Permit>) -> Result<Option<String>, String> {
        let Some(permit) = permit else {
            return Ok(None);
        };

        let applications = self.applications(storage);
        let token = applications
            .iter()
            .find(|a| permit.params.allowed_tokens.contains(a))
            .ok_or_else(|| "no allowed address".to_string())?;

        permit
            .verify(token, PREFIX)
            .map(Some)
            .map_err(|_| "Failed to verify signatures for the given permit".to_string())
    }

    fn lookup(&self, contract: &ContractInfo) -> Result<&Contract, String> {
        let target = self
            .contracts
            .get(&contract.address)
            .ok_or_else(|| format!("contract {} not found", contract.address))?;
        if self.codes[target.code_id as usize - 1].hash != contract.code_hash {
            return Err("code hash mismatch".to_string());
        }
        Ok(target)
    }
}

fn parse<T: serde::de::DeserializeOwned>(msg: &[u8]) -> Result<T, String> {
    serde_json::from_slice(msg).map_err(|e| format!("Error parsing into type: {e}"))
}

fn attr(key: &str, value: &str) -> EventAttribute {
    EventAttribute {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn message_event(action: &str, sender: &str, extra: (&str, &str)) -> TxEvent {
    TxEvent {
        kind: "message".to_string(),
        attributes: vec![
            attr("action", action),
            attr("module", "compute"),
            attr("sender", sender),
            attr(extra.0, extra.1),
        ],
    }
}

fn failed(log: String, gas_limit: u64, gas_used: u64) -> TxResponse {
    TxResponse {
        code: 3,
        raw_log: format!("failed to execute message; message index: 0: {log}"),
        gas_wanted: gas_limit,
        gas_used,
        tx_hash: "FAILED".to_string(),
        ..Default::default()
    }
}

pub struct FakeClient {
    chain: FakeChain,
    address: String,
}

#[async_trait]
impl ComputeClient for FakeClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn broadcast(&self, msg: &ComputeMsg, gas_limit: u64) -> Result<TxResponse, ClientError> {
        let mut chain = self.chain.lock().unwrap();
        chain.broadcasts.push((msg.kind(), gas_limit));
        let height = chain.broadcasts.len() as u64;
        let cost = chain.gas_cost;

        if gas_limit < cost {
            return Ok(TxResponse {
                code: 11,
                raw_log: format!(
                    "out of gas in location: WriteFlat; gasWanted: {gas_limit}, gasUsed: {cost}: out of gas"
                ),
                gas_wanted: gas_limit,
                gas_used: cost,
                height,
                ..Default::default()
            });
        }

        let outcome = match msg {
            ComputeMsg::StoreCode { wasm } => chain.store(&self.address, wasm).map(|e| (e, vec![])),
            ComputeMsg::Instantiate {
                code_id,
                code_hash,
                label,
                msg,
            } => chain
                .instantiate(&self.address, *code_id, code_hash, label, msg)
                .map(|e| (e, vec![])),
            ComputeMsg::Execute { contract, msg } => chain
                .execute(&self.address, contract, msg)
                .map(|e| (e, vec![vec![]])),
        };

        Ok(match outcome {
            Ok((events, data)) => TxResponse {
                code: 0,
                raw_log: String::new(),
                events,
                data,
                gas_wanted: gas_limit,
                gas_used: cost,
                tx_hash: format!("{height:064X}"),
                height,
            },
            Err(log) => failed(format!("Generic error: {log}"), gas_limit, cost),
        })
    }

    async fn simulate(&self, _msg: &ComputeMsg) -> Result<SimulateResponse, ClientError> {
        let mut chain = self.chain.lock().unwrap();
        chain.simulations += 1;

        let used = chain.simulation_usable.then_some(chain.gas_cost);
        Ok(SimulateResponse {
            gas_wanted: used,
            gas_used: used,
        })
    }

    async fn query(&self, contract: &ContractInfo, msg: Vec<u8>) -> Result<Value, ClientError> {
        let chain = self.chain.lock().unwrap();
        Ok(chain
            .query(contract, &msg)
            .unwrap_or_else(|e| Value::String(format!("{QUERY_ERROR_PREFIX}Generic error: {e}"))))
    }

    async fn code_hash(&self, code_id: u64) -> Result<String, ClientError> {
        let chain = self.chain.lock().unwrap();
        chain
            .codes
            .get((code_id as usize).wrapping_sub(1))
            .map(|c| c.hash.clone())
            .ok_or_else(|| ClientError::CosmosSdk {
                res: ChainResponse {
                    log: format!("no code with id {code_id}"),
                    ..Default::default()
                },
            })
    }

    async fn balance(&self, _denom: &str) -> Result<String, ClientError> {
        Ok("25000000".to_string())
    }

    async fn codes(&self) -> Result<Vec<CodeInfo>, ClientError> {
        let chain = self.chain.lock().unwrap();
        Ok(chain
            .codes
            .iter()
            .enumerate()
            .map(|(i, c)| CodeInfo {
                code_id: i as u64 + 1,
                creator: c.creator.clone(),
                code_hash: c.hash.clone(),
            })
            .collect())
    }

    async fn contracts_by_code(&self, code_id: u64) -> Result<Vec<ContractSummary>, ClientError> {
        let chain = self.chain.lock().unwrap();
        Ok(chain
            .contracts
            .iter()
            .filter(|(_, c)| c.code_id == code_id)
            .map(|(address, c)| ContractSummary {
                address: address.clone(),
                code_id,
                label: c.label.clone(),
            })
            .collect())
    }
}

/// Connects [`FakeClient`]s to a shared [`FakeChain`].
pub struct FakeConnector {
    pub chain: FakeChain,
    /// Key names whose connection fails.
    pub unreachable: Vec<String>,
}

impl FakeConnector {
    pub fn new(chain: FakeChain) -> Self {
        Self {
            chain,
            unreachable: vec![],
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(
        &self,
        chain: &ChainCfg,
        key: &SigningKey,
    ) -> Result<Arc<dyn ComputeClient>, ClientError> {
        if self.unreachable.contains(&key.name) {
            return Err(ClientError::ConsensusKey);
        }

        let address = key.to_account(&chain.prefix)?.to_string();
        Ok(Arc::new(FakeClient {
            chain: self.chain.clone(),
            address,
        }))
    }
}

/// Writes both wasm files and a config document into `dir` and loads it.
pub fn config(dir: &Path, gas: Value) -> Config {
    config_with(dir, gas, vec![DEPLOYER_MNEMONIC])
}

pub fn config_with(dir: &Path, gas: Value, mnemonic: Vec<&str>) -> Config {
    let storage_wasm = dir.join("storage.wasm.gz");
    let app_wasm = dir.join("application.wasm.gz");
    fs::write(&storage_wasm, STORAGE_WASM).unwrap();
    fs::write(&app_wasm, APP_WASM).unwrap();

    let path = dir.join("dev.json");
    let doc = json!({
        "name": "demo",
        "endpoint": "http://localhost:26657",
        "chainId": "secretdev-1",
        "mnemonic": mnemonic,
        "gas": gas,
        "storageWasm": storage_wasm,
        "appWasm": app_wasm,
    });
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    Config::from_json(&path).unwrap()
}
