use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::DatabaseConfig;
use crate::vault::{Credentials, SecretSource, VaultError};

/// Errors from DatabaseManager and the operations built on it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Malformed credential payload: {0}")]
    Credentials(#[source] serde_json::Error),

    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens one connection per operation, using credentials fetched fresh from
/// the vault each time. Nothing is pooled or cached.
pub struct DatabaseManager {
    vault: Arc<dyn SecretSource>,
    config: DatabaseConfig,
}

impl DatabaseManager {
    pub fn new(vault: Arc<dyn SecretSource>, config: DatabaseConfig) -> Self {
        Self { vault, config }
    }

    /// Fetch and parse the credential secret
    pub async fn credentials(&self) -> Result<Credentials, DatabaseError> {
        let raw = self.vault.fetch_secret().await?;
        Credentials::from_secret(&raw).map_err(|e| {
            error!(
                secret.name = %self.vault.secret_name(),
                "credential secret is not valid JSON: {}", e
            );
            DatabaseError::Credentials(e)
        })
    }

    fn connect_options(&self, creds: &Credentials) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&creds.host)
            .port(self.config.port)
            .username(&creds.username)
            .password(&creds.password)
            .database(&self.config.name);

        if self.config.enable_query_logging {
            options
        } else {
            options.disable_statement_logging()
        }
    }

    /// Fetch credentials and open a fresh connection. Callers must hand the
    /// connection back to [`DatabaseManager::close`].
    pub async fn connect(&self) -> Result<PgConnection, DatabaseError> {
        let creds = self.credentials().await?;
        let options = self.connect_options(&creds);

        let conn = PgConnection::connect_with(&options).await.map_err(|e| {
            error!(
                host = %creds.host,
                database = %self.config.name,
                "database connection failed: {}", e
            );
            DatabaseError::Connection(e)
        })?;

        debug!(host = %creds.host, database = %self.config.name, "opened database connection");
        Ok(conn)
    }

    /// Close a connection obtained from [`DatabaseManager::connect`]. A failed
    /// close is logged only; the server drops the session either way.
    pub async fn close(conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!("error while closing database connection: {}", e);
        }
    }
}
