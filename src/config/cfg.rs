use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tendermint_rpc::error::ErrorDetail::UnsupportedScheme;
use tendermint_rpc::{Error, Url};

use super::error::ConfigError;
use super::key::SigningKey;

pub const DEFAULT_DENOM: &str = "uscrt";
pub const DEFAULT_PREFIX: &str = "secret";
pub const DEFAULT_GAS_PRICE: f64 = 0.1;
pub const DEFAULT_STORAGE_WASM: &str = "contract/storage/contract.wasm.gz";
pub const DEFAULT_APP_WASM: &str = "contract/application/contract.wasm.gz";

/// Deployment configuration, read from a JSON document.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source file of this config. The deployment manifest lives next to it.
    #[serde(skip)]
    pub path: PathBuf,
    pub name: String,
    pub endpoint: String,
    pub chain_id: String,
    pub mnemonic: Vec<String>,
    pub gas: GasCfg,
    pub storage_info: Option<ConfiguredContract>,
    pub app_info: Option<ConfiguredContract>,

    #[serde(default = "default_denom")]
    pub denom: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_gas_price")]
    pub gas_price: f64,
    #[serde(default = "default_storage_wasm")]
    pub storage_wasm: PathBuf,
    #[serde(default = "default_app_wasm")]
    pub app_wasm: PathBuf,
}

/// Per-operation gas limits. `None` means the limit is estimated by simulation.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GasCfg {
    pub store_storage: Option<u64>,
    pub instantiate_storage: Option<u64>,
    pub store_app: Option<u64>,
    pub instantiate_app: Option<u64>,
    pub set_applications: Option<u64>,
}

/// Contract identity as it may appear in the config document.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredContract {
    pub address: Option<String>,
    pub hash: Option<String>,
}

/// Connection parameters handed to the network client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChainCfg {
    pub denom: String,
    pub prefix: String,
    pub chain_id: String,
    pub rpc_endpoint: String,
    pub gas_price: f64,
}

fn default_denom() -> String {
    DEFAULT_DENOM.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_gas_price() -> f64 {
    DEFAULT_GAS_PRICE
}

fn default_storage_wasm() -> PathBuf {
    DEFAULT_STORAGE_WASM.into()
}

fn default_app_wasm() -> PathBuf {
    DEFAULT_APP_WASM.into()
}

impl Config {
    /// Reads and validates the config file at `path`.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(path, &raw)
    }

    /// Validates an already read config document. `path` is recorded as the config source.
    pub fn parse<P: AsRef<Path>>(path: P, raw: &str) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let mut cfg: Config = serde_json::from_str(raw)
            .map_err(|e| ConfigError::validation(path, e.to_string()))?;

        if cfg.mnemonic.is_empty() {
            return Err(ConfigError::validation(
                path,
                "mnemonic should contain at least one phrase",
            ));
        }

        cfg.endpoint = parse_url(&cfg.endpoint).map_err(|e| {
            ConfigError::validation(path, format!("invalid endpoint {:?}: {}", cfg.endpoint, e))
        })?;
        cfg.path = path.to_path_buf();

        Ok(cfg)
    }

    pub fn chain_cfg(&self) -> ChainCfg {
        ChainCfg {
            denom: self.denom.clone(),
            prefix: self.prefix.clone(),
            chain_id: self.chain_id.clone(),
            rpc_endpoint: self.endpoint.clone(),
            gas_price: self.gas_price,
        }
    }

    /// One signing key per configured mnemonic, in config order.
    pub fn signing_keys(&self) -> Vec<SigningKey> {
        self.mnemonic
            .iter()
            .enumerate()
            .map(|(i, phrase)| SigningKey::from_mnemonic(format!("{}-{}", self.name, i), phrase))
            .collect()
    }
}

// Attempt to parse the configured url to ensure that it is valid.
// If url is missing the Scheme then default to https.
pub(crate) fn parse_url(url: &str) -> Result<String, Error> {
    let u = Url::from_str(url);

    if let Err(Error(UnsupportedScheme(detail), report)) = u {
        // if url is missing the scheme, then we will default to https:
        if !url.contains("://") {
            return Ok(format!("https://{}", url));
        }

        return Err(Error(UnsupportedScheme(detail), report));
    }

    Ok(u?.to_string())
}
