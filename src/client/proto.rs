//! Protobuf messages of the `secret.compute.v1beta1` and `secret.registration.v1beta1` packages.

use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;

pub const MSG_STORE_CODE: &str = "/secret.compute.v1beta1.MsgStoreCode";
pub const MSG_INSTANTIATE_CONTRACT: &str = "/secret.compute.v1beta1.MsgInstantiateContract";
pub const MSG_EXECUTE_CONTRACT: &str = "/secret.compute.v1beta1.MsgExecuteContract";

pub const QUERY_SECRET_CONTRACT: &str = "/secret.compute.v1beta1.Query/QuerySecretContract";
pub const QUERY_CODE_HASH: &str = "/secret.compute.v1beta1.Query/CodeHashByCodeId";
pub const QUERY_CODES: &str = "/secret.compute.v1beta1.Query/Codes";
pub const QUERY_CONTRACTS_BY_CODE: &str = "/secret.compute.v1beta1.Query/ContractsByCodeId";
pub const QUERY_TX_KEY: &str = "/secret.registration.v1beta1.Query/TxKey";

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgStoreCode {
    #[prost(bytes = "vec", tag = "1")]
    pub sender: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub wasm_byte_code: Vec<u8>,
    #[prost(string, tag = "3")]
    pub source: String,
    #[prost(string, tag = "4")]
    pub builder: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgInstantiateContract {
    #[prost(bytes = "vec", tag = "1")]
    pub sender: Vec<u8>,
    #[prost(string, tag = "2")]
    pub callback_code_hash: String,
    #[prost(uint64, tag = "3")]
    pub code_id: u64,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(bytes = "vec", tag = "5")]
    pub init_msg: Vec<u8>,
    #[prost(message, repeated, tag = "6")]
    pub init_funds: Vec<Coin>,
    #[prost(bytes = "vec", tag = "7")]
    pub callback_sig: Vec<u8>,
    #[prost(string, tag = "8")]
    pub admin: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgInstantiateContractResponse {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgExecuteContract {
    #[prost(bytes = "vec", tag = "1")]
    pub sender: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub msg: Vec<u8>,
    #[prost(string, tag = "4")]
    pub callback_code_hash: String,
    #[prost(message, repeated, tag = "5")]
    pub sent_funds: Vec<Coin>,
    #[prost(bytes = "vec", tag = "6")]
    pub callback_sig: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgExecuteContractResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QuerySecretContractRequest {
    #[prost(string, tag = "1")]
    pub contract_address: String,
    #[prost(bytes = "vec", tag = "2")]
    pub query: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QuerySecretContractResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryByCodeIdRequest {
    #[prost(uint64, tag = "1")]
    pub code_id: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryCodeHashResponse {
    #[prost(string, tag = "1")]
    pub code_hash: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CodeInfoResponse {
    #[prost(uint64, tag = "1")]
    pub code_id: u64,
    #[prost(string, tag = "2")]
    pub creator: String,
    #[prost(string, tag = "3")]
    pub code_hash: String,
    #[prost(string, tag = "4")]
    pub source: String,
    #[prost(string, tag = "5")]
    pub builder: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryCodesResponse {
    #[prost(message, repeated, tag = "1")]
    pub code_infos: Vec<CodeInfoResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ContractInfo {
    #[prost(uint64, tag = "1")]
    pub code_id: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub creator: Vec<u8>,
    #[prost(string, tag = "4")]
    pub label: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ContractInfoWithAddress {
    #[prost(string, tag = "1")]
    pub contract_address: String,
    #[prost(message, optional, tag = "2")]
    pub contract_info: Option<ContractInfo>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryContractsByCodeIdResponse {
    #[prost(message, repeated, tag = "1")]
    pub contract_infos: Vec<ContractInfoWithAddress>,
}

/// `secret.registration.v1beta1.Key`, the chain's transaction encryption key.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Key {
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
}
