use chrono::{SecondsFormat, Utc};
use log::info;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

use super::error::DeployError;
use super::executor;
use super::gas::GasPolicy;
use super::manifest::{ContractInfo, DeploymentManifest};
use super::observer::Observer;
use super::wallet::WalletClient;
use crate::config::cfg::Config;
use crate::contract::{application, storage};

/// Deployment progress. States are only ever entered in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployState {
    NotDeployed,
    StorageReady,
    AppReady,
    Linked,
    Persisted,
}

impl fmt::Display for DeployState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeployState::NotDeployed => "not deployed",
            DeployState::StorageReady => "storage ready",
            DeployState::AppReady => "app ready",
            DeployState::Linked => "linked",
            DeployState::Persisted => "persisted",
        };
        f.write_str(s)
    }
}

/// Deploys the storage contract and a new application contract, links them
/// and records both in the deployment manifest.
pub struct ContractDeployer<'a> {
    cfg: &'a Config,
    wallet: &'a WalletClient,
    observer: &'a dyn Observer,
}

impl<'a> ContractDeployer<'a> {
    pub fn new(cfg: &'a Config, wallet: &'a WalletClient, observer: &'a dyn Observer) -> Self {
        Self {
            cfg,
            wallet,
            observer,
        }
    }

    /// Runs the whole sequence. The manifest is only written once every step succeeded.
    pub async fn run(&self) -> Result<DeploymentManifest, DeployError> {
        self.observer.deploy_state(DeployState::NotDeployed);
        let prior = DeploymentManifest::load(&self.cfg.path)?;

        let storage_info = match prior {
            Some(manifest) => {
                info!(
                    "reusing storage contract {}",
                    manifest.storage_info.address
                );
                manifest.storage_info
            }
            None => self.deploy_storage().await?,
        };
        self.observer.deploy_state(DeployState::StorageReady);

        // The application contract is redeployed on every run.
        let app_info = self.deploy_app(&storage_info).await?;
        self.observer.deploy_state(DeployState::AppReady);

        self.link(&storage_info, &app_info).await?;
        self.observer.deploy_state(DeployState::Linked);

        let manifest = DeploymentManifest {
            storage_info,
            app_info,
        };
        let path = manifest.save(&self.cfg.path)?;
        self.observer.deploy_state(DeployState::Persisted);

        info!("deployed: {manifest:?} to {path:?}");
        Ok(manifest)
    }

    async fn deploy_storage(&self) -> Result<ContractInfo, DeployError> {
        self.upload_and_instantiate(
            &format!("{}-storage", self.cfg.name),
            &self.cfg.storage_wasm,
            &storage::InstantiateMsg {},
            self.cfg.gas.store_storage.into(),
            self.cfg.gas.instantiate_storage.into(),
        )
        .await
    }

    async fn deploy_app(&self, storage_info: &ContractInfo) -> Result<ContractInfo, DeployError> {
        self.upload_and_instantiate(
            &format!("{}-app", self.cfg.name),
            &self.cfg.app_wasm,
            &application::InstantiateMsg {
                storage_address: storage_info.address.clone(),
                storage_codehash: storage_info.code_hash.clone(),
            },
            self.cfg.gas.store_app.into(),
            self.cfg.gas.instantiate_app.into(),
        )
        .await
    }

    async fn link(&self, storage_info: &ContractInfo, app_info: &ContractInfo) -> Result<(), DeployError> {
        executor::execute(
            self.wallet,
            storage_info,
            &storage::ExecuteMsg::SetApplications {
                applications: vec![app_info.address.clone()],
            },
            self.cfg.gas.set_applications.into(),
            self.observer,
        )
        .await?;

        Ok(())
    }

    async fn upload_and_instantiate<T: Serialize>(
        &self,
        label: &str,
        wasm_path: &Path,
        init_msg: &T,
        store_gas: GasPolicy,
        instantiate_gas: GasPolicy,
    ) -> Result<ContractInfo, DeployError> {
        let wasm = fs::read(wasm_path).map_err(|e| DeployError::wasmfile(wasm_path, e))?;

        let stored = executor::store(self.wallet, wasm, label, store_gas, self.observer).await?;

        let code_hash = self.wallet.client().code_hash(stored.code_id).await?;
        info!("Contract hash: {code_hash}");

        // labels must be unique on chain
        let label = format!(
            "{label} {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        );

        let instantiated = executor::instantiate(
            self.wallet,
            stored.code_id,
            &code_hash,
            &label,
            init_msg,
            instantiate_gas,
            self.observer,
        )
        .await?;

        Ok(ContractInfo {
            address: instantiated.address,
            code_hash,
        })
    }
}
