use cosmrs::tendermint::abci::{Code, Event};
use serde::{Deserialize, Serialize};
use tendermint_rpc::endpoint::abci_query::AbciQuery;


/// Result of a broadcast transaction, as loosely typed as the chain reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxResponse {
    pub code: u32,
    pub raw_log: String,
    pub events: Vec<TxEvent>,
    /// Per-message response payloads, already decrypted.
    pub data: Vec<Vec<u8>>,
    pub gas_wanted: u64,
    pub gas_used: u64,
    pub tx_hash: String,
    pub height: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEvent {
    pub kind: String,
    pub attributes: Vec<EventAttribute>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

/// One `(event type, key, value)` entry of the flattened event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayLog<'a> {
    pub kind: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

impl TxResponse {
    /// A non-zero code or a log starting with `failed` both mark a failed tx.
    pub fn is_failure(&self) -> bool {
        self.code != 0 || self.raw_log.starts_with("failed")
    }

    /// Value of the first event attribute named `key`, in any event.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.events
            .iter()
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn array_log(&self) -> impl Iterator<Item = ArrayLog<'_>> {
        self.events.iter().flat_map(|e| {
            e.attributes.iter().map(move |a| ArrayLog {
                kind: e.kind.as_str(),
                key: a.key.as_str(),
                value: a.value.as_str(),
            })
        })
    }

    /// Value of the first flattened log entry with event type `kind` and key `key`.
    pub fn find_log(&self, kind: &str, key: &str) -> Option<&str> {
        self.array_log()
            .find(|l| l.kind == kind && l.key == key)
            .map(|l| l.value)
    }
}

impl From<&Event> for TxEvent {
    fn from(event: &Event) -> TxEvent {
        TxEvent {
            kind: event.type_str.clone(),
            attributes: event
                .attributes
                .iter()
                .map(|tag| EventAttribute {
                    key: tag.key.to_string(),
                    value: tag.value.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulateResponse {
    pub gas_wanted: Option<u64>,
    pub gas_used: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeInfo {
    pub code_id: u64,
    pub creator: String,
    pub code_hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub address: String,
    pub code_id: u64,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct StoreCodeResponse {
    pub code_id: u64,
    pub res: TxResponse,
}

#[derive(Clone, Debug)]
pub struct InstantiateResponse {
    pub address: String,
    pub res: TxResponse,
}

#[derive(Clone, Debug)]
pub struct ExecResponse {
    /// First message response payload, utf8 decoded.
    pub data: String,
    pub res: TxResponse,
}

/// Raw abci result, kept for reporting failed chain queries.
#[derive(Clone, Debug, Default)]
pub struct ChainResponse {
    pub code: Code,
    pub data: Option<Vec<u8>>,
    pub log: String,
}

impl From<AbciQuery> for ChainResponse {
    fn from(res: AbciQuery) -> ChainResponse {
        ChainResponse {
            code: res.code,
            data: Some(res.value),
            log: res.log.to_string(),
        }
    }
}
