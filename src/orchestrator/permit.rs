//! Query permits.
//!
//! A permit is an off-chain signature over an amino JSON document that names
//! the contracts it may be presented to. Contracts recover the signer from
//! it, so reads can be authenticated without a transaction.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cosmrs::crypto::secp256k1;
use k256::ecdsa::signature::Verifier;
use serde::{Deserialize, Serialize};

use super::error::{PermitError, SigningError};
use super::wallet::WalletClient;
use crate::config::key::SigningKey;

const PUB_KEY_TYPE: &str = "tendermint/PubKeySecp256k1";
const PERMIT_MSG_TYPE: &str = "query_permit";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Access,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit {
    pub params: PermitParams,
    pub signature: PermitSignature,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitParams {
    pub permit_name: String,
    pub allowed_tokens: Vec<String>,
    pub chain_id: String,
    pub permissions: Vec<Permission>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSignature {
    pub pub_key: PubKey,
    /// base64 encoded compact secp256k1 signature
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub kind: String,
    /// base64 encoded compressed public key
    pub value: String,
}

// Amino sign doc. Fields are declared in sorted order, which is the order
// serde_json writes them in.
#[derive(Serialize)]
struct SignDoc<'a> {
    account_number: &'static str,
    chain_id: &'a str,
    fee: SignFee,
    memo: &'static str,
    msgs: [SignMsg<'a>; 1],
    sequence: &'static str,
}

#[derive(Serialize)]
struct SignFee {
    amount: [SignCoin; 1],
    gas: &'static str,
}

#[derive(Serialize)]
struct SignCoin {
    amount: &'static str,
    denom: &'static str,
}

#[derive(Serialize)]
struct SignMsg<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: SignMsgValue<'a>,
}

#[derive(Serialize)]
struct SignMsgValue<'a> {
    allowed_tokens: &'a [String],
    permissions: &'a [Permission],
    permit_name: &'a str,
}

impl PermitParams {
    fn sign_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&SignDoc {
            account_number: "0",
            chain_id: &self.chain_id,
            fee: SignFee {
                amount: [SignCoin {
                    amount: "0",
                    denom: "uscrt",
                }],
                gas: "1",
            },
            memo: "",
            msgs: [SignMsg {
                kind: PERMIT_MSG_TYPE,
                value: SignMsgValue {
                    allowed_tokens: &self.allowed_tokens,
                    permissions: &self.permissions,
                    permit_name: &self.permit_name,
                },
            }],
            sequence: "0",
        })
    }
}

/// Signs a permit for `contract` with the `access` permission.
pub fn sign(key: &SigningKey, chain_id: &str, contract: &str) -> Result<Permit, SigningError> {
    let params = PermitParams {
        permit_name: String::new(),
        allowed_tokens: vec![contract.to_string()],
        chain_id: chain_id.to_string(),
        permissions: vec![Permission::Access],
    };

    let signing_key: secp256k1::SigningKey = key.try_into()?;
    let doc = params
        .sign_bytes()
        .map_err(|e| SigningError::JsonSerialize { source: e })?;
    let signature = signing_key
        .sign(&doc)
        .map_err(|e| SigningError::Signature { source: e })?;

    Ok(Permit {
        params,
        signature: PermitSignature {
            pub_key: PubKey {
                kind: PUB_KEY_TYPE.to_string(),
                value: STANDARD.encode(signing_key.public_key().to_bytes()),
            },
            signature: STANDARD.encode(signature.as_ref()),
        },
    })
}

/// Issues a fresh permit binding `wallet` to `contract`. Nothing is sent to the chain.
pub fn issue(wallet: &WalletClient, contract: &str) -> Result<Permit, SigningError> {
    sign(&wallet.key, &wallet.chain_id, contract)
}

impl Permit {
    /// Checks the permit as a contract at `contract` would and returns the signer address.
    pub fn verify(&self, contract: &str, prefix: &str) -> Result<String, PermitError> {
        if !self.params.allowed_tokens.iter().any(|t| t == contract) {
            return Err(PermitError::TokenNotAllowed {
                contract: contract.to_string(),
            });
        }

        let pub_key = STANDARD
            .decode(&self.signature.pub_key.value)
            .map_err(|_| PermitError::PubKey)?;
        let verifying_key =
            k256::ecdsa::VerifyingKey::from_sec1_bytes(&pub_key).map_err(|_| PermitError::PubKey)?;

        let signature = STANDARD
            .decode(&self.signature.signature)
            .map_err(|_| PermitError::Signature)?;
        let signature =
            k256::ecdsa::Signature::from_slice(&signature).map_err(|_| PermitError::Signature)?;

        let doc = self
            .params
            .sign_bytes()
            .map_err(|_| PermitError::Unauthorized)?;
        verifying_key
            .verify(&doc, &signature)
            .map_err(|_| PermitError::Unauthorized)?;

        let pub_key = cosmrs::tendermint::PublicKey::from_raw_secp256k1(&pub_key)
            .ok_or(PermitError::PubKey)?;
        let account = cosmrs::crypto::PublicKey::from(pub_key)
            .account_id(prefix)
            .map_err(|_| PermitError::Address)?;

        Ok(account.to_string())
    }
}
