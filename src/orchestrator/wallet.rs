use futures::future::try_join_all;
use log::info;
use std::fmt;
use std::sync::Arc;

use crate::client::compute::{ComputeClient, Connector};
use crate::client::error::ClientError;
use crate::config::cfg::{ChainCfg, Config};
use crate::config::key::{test_keys, SigningKey};

/// An authenticated network client bound to one signing identity.
#[derive(Clone)]
pub struct WalletClient {
    pub key: SigningKey,
    pub address: String,
    pub chain_id: String,
    client: Arc<dyn ComputeClient>,
}

impl fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WalletClient")
            .field("key", &self.key)
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl WalletClient {
    pub async fn connect(
        connector: &dyn Connector,
        chain: &ChainCfg,
        key: SigningKey,
    ) -> Result<Self, ClientError> {
        let client = connector.connect(chain, &key).await?;
        let address = client.address().to_string();
        info!("initialized client {} with address {}", key.name, address);

        Ok(Self {
            key,
            address,
            chain_id: chain.chain_id.clone(),
            client,
        })
    }

    pub fn client(&self) -> &dyn ComputeClient {
        self.client.as_ref()
    }
}

/// Connects one client per configured mnemonic, concurrently.
/// Fails as soon as any single connection fails.
pub async fn initialize(
    cfg: &Config,
    connector: &dyn Connector,
) -> Result<Vec<WalletClient>, ClientError> {
    connect_all(connector, &cfg.chain_cfg(), cfg.signing_keys()).await
}

/// Clients for the built-in test identities `u1`, `u2` and `u3`.
pub async fn test_clients(
    cfg: &Config,
    connector: &dyn Connector,
) -> Result<Vec<WalletClient>, ClientError> {
    connect_all(connector, &cfg.chain_cfg(), test_keys()).await
}

async fn connect_all(
    connector: &dyn Connector,
    chain: &ChainCfg,
    keys: Vec<SigningKey>,
) -> Result<Vec<WalletClient>, ClientError> {
    try_join_all(
        keys.into_iter()
            .map(|key| WalletClient::connect(connector, chain, key)),
    )
    .await
}
