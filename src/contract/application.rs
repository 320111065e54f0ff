use serde::{Deserialize, Serialize};

use crate::orchestrator::error::ContractError;
use crate::orchestrator::executor;
use crate::orchestrator::manifest::ContractInfo;
use crate::orchestrator::observer::Observer;
use crate::orchestrator::permit::{self, Permit};
use crate::orchestrator::query::query;
use crate::orchestrator::wallet::WalletClient;

/// Gas limit of a `set` call.
pub const SET_GAS: u64 = 240_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InstantiateMsg {
    pub storage_address: String,
    pub storage_codehash: String,
}

/// Who may read a stored value besides its owner.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Authz {
    #[serde(rename = "p_u_b_l_i_c")]
    Public,
    #[serde(rename = "p_r_i_v_a_t_e")]
    Private,
    /// Readable by one extra address.
    #[serde(rename = "p_r_o_t_e_c_t_e_d")]
    Protected(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Set {
        permit: Option<Permit>,
        key: String,
        value: u32,
        authz: Authz,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Get { permit: Option<Permit>, key: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryAnswer {
    Value(Option<u32>),
}

/// Typed handle on a deployed application contract.
///
/// Every call signs a fresh permit for the calling wallet.
pub struct Application<'a> {
    info: ContractInfo,
    observer: &'a dyn Observer,
}

impl<'a> Application<'a> {
    pub fn new(info: ContractInfo, observer: &'a dyn Observer) -> Self {
        Self { info, observer }
    }

    pub fn info(&self) -> &ContractInfo {
        &self.info
    }

    /// Stores `value` under `key`, owned by `wallet`. Existing keys are never overwritten.
    pub async fn set(
        &self,
        wallet: &WalletClient,
        key: &str,
        value: u32,
        authz: Authz,
    ) -> Result<(), ContractError> {
        let permit = permit::issue(wallet, &self.info.address)?;

        executor::execute(
            wallet,
            &self.info,
            &ExecuteMsg::Set {
                permit: Some(permit),
                key: key.to_string(),
                value,
                authz,
            },
            SET_GAS.into(),
            self.observer,
        )
        .await?;

        Ok(())
    }

    /// Reads `key` as `wallet`. `None` when nothing is stored under it.
    pub async fn get(&self, wallet: &WalletClient, key: &str) -> Result<Option<u32>, ContractError> {
        let permit = permit::issue(wallet, &self.info.address)?;

        let QueryAnswer::Value(value) = query(
            wallet.client(),
            &self.info,
            &QueryMsg::Get {
                permit: Some(permit),
                key: key.to_string(),
            },
            self.observer,
        )
        .await?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn authz_wire_names() {
        assert_eq!(serde_json::to_value(Authz::Public).unwrap(), json!("p_u_b_l_i_c"));
        assert_eq!(serde_json::to_value(Authz::Private).unwrap(), json!("p_r_i_v_a_t_e"));
        assert_eq!(
            serde_json::to_value(Authz::Protected("secret1u1".to_string())).unwrap(),
            json!({"p_r_o_t_e_c_t_e_d": "secret1u1"})
        );
    }

    #[test]
    fn query_answer() {
        let answer: QueryAnswer = serde_json::from_value(json!({"value": 31})).unwrap();
        assert_eq!(answer, QueryAnswer::Value(Some(31)));

        let answer: QueryAnswer = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(answer, QueryAnswer::Value(None));
    }

    #[test]
    fn set_msg_shape() {
        let msg = ExecuteMsg::Set {
            permit: None,
            key: "test-1".to_string(),
            value: 31,
            authz: Authz::Public,
        };
        assert_eq!(
            serde_json::to_value(msg).unwrap(),
            json!({"set": {"permit": null, "key": "test-1", "value": 31, "authz": "p_u_b_l_i_c"}})
        );
    }
}
