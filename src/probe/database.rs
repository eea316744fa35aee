//! Database connectivity probe.
//!
//! Fetches credentials from the secret store, opens a MySQL connection, asks
//! the server for its current time, and closes the connection again. Every
//! run opens its own connection - connections are never pooled or reused
//! across requests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use crate::error::ProbeError;
use crate::secrets::SecretStore;

use super::Probe;

/// Critical probe confirming the database is reachable end to end:
/// secret retrieval, TCP connect, authentication, and a trivial query.
pub struct DatabaseProbe {
    secrets: Arc<dyn SecretStore>,
    secret_id: String,
}

impl DatabaseProbe {
    pub fn new(secrets: Arc<dyn SecretStore>, secret_id: impl Into<String>) -> Self {
        Self {
            secrets,
            secret_id: secret_id.into(),
        }
    }
}

#[async_trait]
impl Probe for DatabaseProbe {
    async fn execute(&self) -> Result<String, ProbeError> {
        let creds = self.secrets.get_credentials(&self.secret_id).await?;

        let options = MySqlConnectOptions::new()
            .host(&creds.host)
            .port(creds.port())
            .username(&creds.username)
            .password(&creds.password)
            .database(&creds.dbname);

        let mut conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(ProbeError::DatabaseConnection)?;

        let now: NaiveDateTime = sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&mut conn)
            .await
            .map_err(ProbeError::DatabaseQuery)?;

        conn.close().await.map_err(ProbeError::DatabaseConnection)?;

        Ok(now.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
