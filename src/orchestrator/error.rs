use std::path::PathBuf;
use thiserror::Error;

use super::observer::CommandType;
use crate::client::error::ClientError;

#[derive(Error, Debug)]
pub enum GasError {
    #[error("simulation of {op} returned no usable gas figure")]
    Estimation { op: CommandType },

    #[error("simulation of {op} failed")]
    Simulation { op: CommandType, source: ClientError },
}

/// Failure of a state changing call. Chain logs are kept verbatim.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to upload contract: {log}")]
    Upload { log: String },

    #[error("failed to instantiate contract: {log}")]
    Instantiate { log: String },

    #[error("{log}")]
    Execution { log: String },

    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },

    #[error(transparent)]
    GasError(#[from] GasError),

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

impl ExecError {
    pub fn json(e: serde_json::Error) -> ExecError {
        ExecError::JsonSerialize { source: e }
    }
}

#[derive(Error, Debug)]
pub enum QueryError {
    /// Chain level query failure, with the querier prefix stripped when present.
    #[error("{msg}")]
    Chain { msg: String },

    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },

    #[error("unexpected query response")]
    JsonDeserialize { source: serde_json::Error },

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

#[derive(Error, Debug)]
pub enum SigningError {
    #[error("signing key unavailable")]
    Key(#[from] ClientError),

    #[error("error signing permit")]
    Signature { source: cosmrs::ErrorReport },

    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PermitError {
    #[error("permit does not allow contract {contract:?}")]
    TokenNotAllowed { contract: String },

    #[error("malformed permit public key")]
    PubKey,

    #[error("malformed permit signature")]
    Signature,

    #[error("permit signature does not match its parameters")]
    Unauthorized,

    #[error("unable to derive the permit signer address")]
    Address,
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("deployment manifest not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("error reading deployment manifest {path:?}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed deployment manifest {path:?}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("error writing deployment manifest {path:?}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("error reading wasm file {path:?}")]
    WasmFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    ManifestError(#[from] ManifestError),

    #[error(transparent)]
    ExecError(#[from] ExecError),

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

impl DeployError {
    pub fn wasmfile(path: &std::path::Path, e: std::io::Error) -> DeployError {
        DeployError::WasmFileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Failure of a typed contract call.
#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    SigningError(#[from] SigningError),

    #[error(transparent)]
    ExecError(#[from] ExecError),

    #[error(transparent)]
    QueryError(#[from] QueryError),
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("{check}: {detail}")]
    Check { check: String, detail: String },

    #[error(transparent)]
    ContractError(#[from] ContractError),
}

impl ScenarioError {
    pub fn check<C: Into<String>, D: Into<String>>(check: C, detail: D) -> ScenarioError {
        ScenarioError::Check {
            check: check.into(),
            detail: detail.into(),
        }
    }
}
