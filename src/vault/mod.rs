//! # Secret vault
//!
//! The database credentials live in a named secret. Everything that needs
//! them goes through [`SecretSource`], so the HTTP and database layers never
//! see the concrete vault client.

pub mod aws;

pub use aws::AwsSecretsManager;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// A named secret that can be fetched on demand.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Identifier of the secret, used in log lines and error messages
    fn secret_name(&self) -> &str;

    /// Fetch the current secret payload. Nothing is cached between calls.
    async fn fetch_secret(&self) -> Result<String, VaultError>;
}

/// Failures talking to the vault, classified by service error code.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("The requested secret {secret_name} was not found")]
    NotFound { secret_name: String },

    #[error("The request was invalid due to: {0}")]
    InvalidRequest(String),

    #[error("The request had invalid params: {0}")]
    InvalidParameter(String),

    #[error("The requested secret can't be decrypted using the provided KMS key: {0}")]
    DecryptionFailure(String),

    #[error("An error occurred on service side: {0}")]
    InternalService(String),

    #[error("Secret {secret_name} has no string or binary value")]
    Empty { secret_name: String },

    #[error("Secrets Manager request failed: {0}")]
    Unclassified(String),
}

impl VaultError {
    /// Map a Secrets Manager error code onto a variant. `message` is the
    /// service's own rendering of the error.
    pub fn classify(secret_name: &str, code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some("ResourceNotFoundException") => VaultError::NotFound {
                secret_name: secret_name.to_string(),
            },
            Some("InvalidRequestException") => VaultError::InvalidRequest(message),
            Some("InvalidParameterException") => VaultError::InvalidParameter(message),
            Some("DecryptionFailure") => VaultError::DecryptionFailure(message),
            Some("InternalServiceError") => VaultError::InternalService(message),
            _ => VaultError::Unclassified(message),
        }
    }

    /// Short stable name for structured logging
    pub fn kind(&self) -> &'static str {
        match self {
            VaultError::NotFound { .. } => "not_found",
            VaultError::InvalidRequest(_) => "invalid_request",
            VaultError::InvalidParameter(_) => "invalid_parameter",
            VaultError::DecryptionFailure(_) => "decryption_failure",
            VaultError::InternalService(_) => "internal_service_error",
            VaultError::Empty { .. } => "empty",
            VaultError::Unclassified(_) => "unclassified",
        }
    }
}

/// Connection credentials stored in the secret as JSON.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_secret(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
