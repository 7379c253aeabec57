//! Server configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present.
//! Every variable has a development default except `JWT_SECRET_KEY`,
//! which is required when `APP_ENV` is `production`.

use std::env;

use tenantry_auth::AuthConfig;
use tenantry_auth::config::DEFAULT_ISSUER;
use tenantry_db::DbConfig;
use thiserror::Error;

/// Signing secret used when none is configured outside production.
pub const INSECURE_DEV_SECRET: &str = "development-secret-change-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Application environment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Defaults to `Development` if unset or unrecognized.
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: AppEnvironment,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub host: String,
    pub port: u16,
    pub app_name: String,
    pub app_version: String,
    /// Set when the development signing secret is in use.
    pub insecure_secret: bool,
}

fn parse_var<T, F>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: var.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok().filter(|v| !v.is_empty()))
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let environment =
            AppEnvironment::from_env_str(&var_or("APP_ENV", "development"));

        let defaults = DbConfig::default();
        let db = DbConfig {
            url: var_or("SURREAL_URL", &defaults.url),
            namespace: var_or("SURREAL_NAMESPACE", &defaults.namespace),
            database: var_or("SURREAL_DATABASE", &defaults.database),
            username: var_or("SURREAL_USERNAME", &defaults.username),
            password: var_or("SURREAL_PASSWORD", &defaults.password),
        };

        let (jwt_secret, insecure_secret) = match lookup("JWT_SECRET_KEY") {
            Some(secret) => (secret, false),
            None if environment == AppEnvironment::Production => {
                return Err(ConfigError::MissingVar("JWT_SECRET_KEY".into()));
            }
            None => (INSECURE_DEV_SECRET.to_string(), true),
        };

        let expiration_hours: u64 = parse_var(&lookup, "JWT_EXPIRATION_HOURS", 24)?;
        if expiration_hours == 0 {
            return Err(ConfigError::InvalidValue {
                var: "JWT_EXPIRATION_HOURS".into(),
                message: "must be at least 1".into(),
            });
        }

        let auth = AuthConfig {
            jwt_secret,
            jwt_issuer: var_or("JWT_ISSUER", DEFAULT_ISSUER),
            token_lifetime_secs: expiration_hours * 3600,
            pepper: lookup("PASSWORD_PEPPER"),
            ..AuthConfig::default()
        };

        let port: u16 = parse_var(&lookup, "PORT", 8000)?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".into(),
                message: "Port must be between 1 and 65535".into(),
            });
        }

        Ok(Self {
            environment,
            db,
            auth,
            host: var_or("HOST", "0.0.0.0"),
            port,
            app_name: var_or("APP_NAME", "Organization Management Service"),
            app_version: var_or("APP_VERSION", env!("CARGO_PKG_VERSION")),
            insecure_secret,
        })
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
