use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub vault: VaultConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Where the database credentials live in Secrets Manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    pub secret_name: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub name: String,
    pub port: u16,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Map data-access failures to HTTP status codes instead of the legacy
    /// always-200 bodies.
    pub propagate_errors: bool,
    pub enable_request_logging: bool,
}

pub const DEFAULT_SECRET_NAME: &str = "flasksecret";
pub const DEFAULT_REGION: &str = "ap-southeast-1";
pub const DEFAULT_DATABASE_NAME: &str = "postgres";
pub const DEFAULT_DATABASE_PORT: u16 = 5432;
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 5000;

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::defaults_for(environment).with_overrides(lookup)
    }

    pub fn defaults_for(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Vault overrides
        if let Some(v) = lookup("VAULT_SECRET_NAME") {
            self.vault.secret_name = v;
        }
        if let Some(v) = lookup("VAULT_REGION") {
            self.vault.region = v;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DATABASE_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Some(v) = lookup("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging =
                v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // API overrides
        if let Some(v) = lookup("API_HOST") {
            self.api.host = v;
        }
        if let Some(v) = lookup("API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("API_PROPAGATE_ERRORS") {
            self.api.propagate_errors = v.parse().unwrap_or(self.api.propagate_errors);
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            vault: VaultConfig::default(),
            database: DatabaseConfig {
                enable_query_logging: true,
                ..DatabaseConfig::default()
            },
            api: ApiConfig {
                propagate_errors: false,
                enable_request_logging: true,
                ..ApiConfig::default()
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            vault: VaultConfig::default(),
            database: DatabaseConfig::default(),
            api: ApiConfig {
                propagate_errors: true,
                enable_request_logging: true,
                ..ApiConfig::default()
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            vault: VaultConfig::default(),
            database: DatabaseConfig::default(),
            api: ApiConfig {
                propagate_errors: true,
                enable_request_logging: false,
                ..ApiConfig::default()
            },
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            secret_name: DEFAULT_SECRET_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DATABASE_NAME.to_string(),
            port: DEFAULT_DATABASE_PORT,
            enable_query_logging: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
            propagate_errors: false,
            enable_request_logging: false,
        }
    }
}

impl ApiConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
