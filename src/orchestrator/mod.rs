pub mod deploy;

pub mod error;

pub mod executor;

pub mod gas;

pub mod gas_profiler;

pub mod manifest;

pub mod observer;

pub mod permit;

pub mod query;

pub mod scenario;

pub mod wallet;

pub use deploy::{ContractDeployer, DeployState};
pub use manifest::{ContractInfo, DeploymentManifest};
pub use wallet::WalletClient;
