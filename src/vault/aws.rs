//! # AWS Secrets Manager client
//!
//! Fetches the credential secret with `GetSecretValue`. AWS credentials come
//! from the SDK's default provider chain (env, profile, instance role).

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use tracing::{debug, error, info};

use super::{SecretSource, VaultError};
use crate::config::VaultConfig;

pub struct AwsSecretsManager {
    client: SecretsManagerClient,
    secret_name: String,
    region: String,
}

impl std::fmt::Debug for AwsSecretsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManager")
            .field("secret_name", &self.secret_name)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsSecretsManager {
    pub async fn new(config: &VaultConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        info!(
            secret.name = %config.secret_name,
            region = %config.region,
            "Secrets Manager client ready"
        );

        Self {
            client: SecretsManagerClient::new(&sdk_config),
            secret_name: config.secret_name.clone(),
            region: config.region.clone(),
        }
    }
}

#[async_trait]
impl SecretSource for AwsSecretsManager {
    fn secret_name(&self) -> &str {
        &self.secret_name
    }

    async fn fetch_secret(&self) -> Result<String, VaultError> {
        debug!(secret.name = %self.secret_name, region = %self.region, "fetching secret");

        let response = match self
            .client
            .get_secret_value()
            .secret_id(&self.secret_name)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let service_error = e.into_service_error();
                let err = VaultError::classify(
                    &self.secret_name,
                    service_error.code(),
                    DisplayErrorContext(&service_error).to_string(),
                );
                error!(
                    secret.name = %self.secret_name,
                    region = %self.region,
                    kind = err.kind(),
                    "{err}"
                );
                return Err(err);
            }
        };

        // Only one of the two fields is populated, depending on how the
        // secret was stored.
        response
            .secret_string()
            .map(ToString::to_string)
            .or_else(|| {
                response
                    .secret_binary()
                    .map(|blob| String::from_utf8_lossy(blob.as_ref()).into_owned())
            })
            .ok_or_else(|| {
                let err = VaultError::Empty {
                    secret_name: self.secret_name.clone(),
                };
                error!(secret.name = %self.secret_name, kind = err.kind(), "{err}");
                err
            })
    }
}
