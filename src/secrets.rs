//! Database credential retrieval from AWS Secrets Manager.
//!
//! The secret payload is a JSON document written by the RDS credential
//! rotation tooling: host, username, password, dbname, and an optional port.
//! [`SecretStore`] is the seam the database probe depends on; tests swap in
//! scripted implementations.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::Client;
use serde::Deserialize;

use crate::error::SecretStoreError;

/// Fallback MySQL port when the secret omits one
const DEFAULT_DB_PORT: u16 = 3306;

/// Database credentials as stored in the secret payload.
#[derive(Debug, Clone, Deserialize)]
pub struct DbCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
    pub dbname: String,
    port: Option<u16>,
}

impl DbCredentials {
    /// Connection port, defaulting to the standard MySQL port.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_DB_PORT)
    }
}

/// Retrieval of database credentials by secret identifier.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_credentials(&self, secret_id: &str) -> Result<DbCredentials, SecretStoreError>;
}

/// Secrets Manager backed [`SecretStore`].
#[derive(Clone)]
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    /// Build a client for the given region using the ambient AWS credential
    /// chain (instance profile, task role, or environment).
    pub async fn connect(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&config),
        }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_credentials(&self, secret_id: &str) -> Result<DbCredentials, SecretStoreError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| SecretStoreError::Request(e.to_string()))?;

        let payload = response
            .secret_string()
            .ok_or(SecretStoreError::MissingSecretString)?;

        Ok(serde_json::from_str(payload)?)
    }
}
