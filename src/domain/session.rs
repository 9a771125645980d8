//! Credentials and the authenticated session shared by every operation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Name of the hash algorithm announced in the pin hash.
pub const PIN_HASH_TYPE: &str = "sha256";

/// Startup credentials: remote endpoint, source key and pin.
#[derive(Clone)]
pub struct Credentials {
    pub endpoint: String,
    pub source_key: String,
    pub pin: String,
}

impl Credentials {
    pub fn new(
        endpoint: impl Into<String>,
        source_key: impl Into<String>,
        pin: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            source_key: source_key.into(),
            pin: pin.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("source_key", &self.source_key)
            .field("pin", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PinHash {
    #[serde(rename = "Type")]
    pub hash_type: String,
    pub seed: String,
    pub hash_value: String,
}

/// Opaque token attached to every remote call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityToken {
    pub source_key: String,
    pub pin_hash: PinHash,
    #[serde(rename = "ClientIP")]
    pub client_ip: String,
}

impl SecurityToken {
    /// Salts the pin with `seed` and hashes it together with the source key.
    pub fn issue(credentials: &Credentials, seed: &str, client_ip: impl Into<String>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(credentials.source_key.as_bytes());
        hasher.update(seed.as_bytes());
        hasher.update(credentials.pin.as_bytes());

        Self {
            source_key: credentials.source_key.clone(),
            pin_hash: PinHash {
                hash_type: PIN_HASH_TYPE.to_string(),
                seed: seed.to_string(),
                hash_value: hex::encode(hasher.finalize()),
            },
            client_ip: client_ip.into(),
        }
    }
}

/// Immutable result of authenticating against the remote service.
#[derive(Clone, Debug)]
pub struct Session {
    endpoint: String,
    token: SecurityToken,
}

impl Session {
    pub fn new(endpoint: impl Into<String>, token: SecurityToken) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> &SecurityToken {
        &self.token
    }
}
