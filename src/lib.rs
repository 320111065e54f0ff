//! Secret Network deployment orchestrator and contract client
//!
//! Deploys a storage contract and a dependent application contract against a
//! configured [Secret Network] chain, links them, and records the result in a
//! deployment manifest next to the config file. Re-running a deployment reuses
//! the recorded storage contract.
//!
//! After deployment the application contract can be written and read with
//! permit authenticated calls through [`contract::application::Application`].
//!
//! [Secret Network]: https://scrt.network
//!
//!
//! # Quick Start
//!
//! ```no_run
//! use scrt_orc::{
//!     client::secret::RpcConnector,
//!     config::cfg::Config,
//!     orchestrator::{observer::LogObserver, wallet, ContractDeployer},
//! };
//!
//! # async fn deploy() -> anyhow::Result<()> {
//! let cfg = Config::from_json("config/dev.json")?;
//! let wallets = wallet::initialize(&cfg, &RpcConnector).await?;
//!
//! let manifest = ContractDeployer::new(&cfg, &wallets[0], &LogObserver)
//!     .run()
//!     .await?;
//! println!("{manifest:?}");
//! # Ok(())
//! # }
//! ```

pub mod client;

pub mod config;

pub mod contract;

pub mod orchestrator;
