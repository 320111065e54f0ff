use cosmrs::bip32;
use cosmrs::crypto::secp256k1;
use cosmrs::AccountId;
use std::fmt;

use crate::client::error::ClientError;

// Secret Network registers coin type 529:
// https://github.com/satoshilabs/slips/blob/master/slip-0044.md
const DERIVATION_PATH: &str = "m/44'/529'/0'/0/0";

// Built-in identities for test and demo flows. DO NOT USE FOR MAINNET
const TEST_ACCOUNTS: [(&str, &str); 3] = [
    (
        "u1",
        "omit siren result bomb click junior shoe cream horror spoil okay wood purity siren extend hen benefit snake frame battle reflect moon merit undo",
    ),
    (
        "u2",
        "pioneer second husband paper catch wolf federal rib list scan clown retreat length town runway enable change second load object dress industry amateur master",
    ),
    (
        "u3",
        "budget post bunker this scout clarify salon glance cannon decorate short initial admit dog vehicle bitter female reunion typical toe lottery glow grace muffin",
    ),
];

#[derive(Clone)]
pub struct SigningKey {
    /// human readable key name
    pub name: String,
    /// private key associated with `name`
    pub key: Key,
}

#[derive(Clone)]
pub enum Key {
    /// Mnemonic allows you to pass the private key mnemonic words
    /// for configuring a transaction signing key.
    /// DO NOT USE FOR MAINNET
    Mnemonic(String),
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    pub fn from_mnemonic<S: Into<String>, P: Into<String>>(name: S, phrase: P) -> Self {
        Self {
            name: name.into(),
            key: Key::Mnemonic(phrase.into()),
        }
    }

    /// Bech32 account address of this key under `prefix`.
    pub fn to_account(&self, prefix: &str) -> Result<AccountId, ClientError> {
        let key: secp256k1::SigningKey = self.try_into()?;
        key.public_key()
            .account_id(prefix)
            .map_err(ClientError::crypto)
    }
}

impl TryFrom<&SigningKey> for secp256k1::SigningKey {
    type Error = ClientError;
    fn try_from(signer: &SigningKey) -> Result<secp256k1::SigningKey, ClientError> {
        match &signer.key {
            Key::Mnemonic(phrase) => {
                let seed = bip32::Mnemonic::new(phrase.trim(), bip32::Language::English)
                    .map_err(|_| ClientError::Mnemonic)?
                    .to_seed("");
                let path: bip32::DerivationPath = DERIVATION_PATH
                    .parse()
                    .map_err(|_| ClientError::DerivationPath)?;
                Ok(bip32::XPrv::derive_from_path(seed, &path)
                    .map_err(|_| ClientError::DerivationPath)?
                    .into())
            }
        }
    }
}

/// The three built-in test identities `u1`, `u2` and `u3`.
pub fn test_keys() -> Vec<SigningKey> {
    TEST_ACCOUNTS
        .iter()
        .map(|(name, phrase)| SigningKey::from_mnemonic(*name, *phrase))
        .collect()
}
