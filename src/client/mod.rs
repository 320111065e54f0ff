pub mod error;

pub mod chain_res;

pub mod compute;

pub mod cosmos;

pub mod encryption;

pub mod proto;

pub mod secret;

pub use cosmrs::tendermint::abci::Code;
