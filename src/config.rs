//! Runtime configuration.
//!
//! Parsed once at startup from CLI flags and environment variables, then
//! handed to the router as part of the shared state.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use thiserror::Error;
use tracing::warn;

/// Used only when `JWT_SECRET` is unset outside production.
pub const DEV_JWT_SECRET: &str = "dev-secret-not-for-production-use";
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Port for HTTP API
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Address to bind the HTTP API to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, env = "QUEST_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Secret for signing session tokens (required in production)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Username of the super-admin created on first admin login
    #[arg(long, env = "ADMIN_USERNAME")]
    pub admin_username: Option<String>,

    /// Password of the super-admin created on first admin login
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Browser origin allowed to call the API with credentials
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Deployment environment; production enables secure cookies
    #[arg(long, env = "QUEST_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub db_path: Option<PathBuf>,
    pub jwt_secret: String,
    pub admin: Option<AdminCredentials>,
    pub cors_origin: Option<String>,
    pub environment: Environment,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is required in production")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters in production")]
    WeakJwtSecret,
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let jwt_secret = match (self.jwt_secret, self.environment) {
            (Some(secret), Environment::Production) if secret.len() < MIN_JWT_SECRET_LEN => {
                return Err(ConfigError::WeakJwtSecret)
            }
            (Some(secret), _) => secret,
            (None, Environment::Production) => return Err(ConfigError::MissingJwtSecret),
            (None, Environment::Development) => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let admin = match (self.admin_username, self.admin_password) {
            (Some(username), Some(password)) if !username.trim().is_empty() && !password.is_empty() => {
                Some(AdminCredentials {
                    username: username.trim().to_string(),
                    password,
                })
            }
            _ => None,
        };

        Ok(Config {
            listen: SocketAddr::new(self.host, self.port),
            db_path: self.db_path,
            jwt_secret,
            admin,
            cors_origin: self.cors_origin,
            environment: self.environment,
        })
    }
}

impl Config {
    /// Local development defaults: loopback, dev secret, no admin bootstrap.
    pub fn development() -> Self {
        Self {
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
            db_path: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            admin: None,
            cors_origin: None,
            environment: Environment::Development,
        }
    }

    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}
