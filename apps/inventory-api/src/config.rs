//! Configuration for the inventory API

use eyre::WrapErr;

/// Deployment environment, selected via `APP_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub grpc_port: u16,
    pub db_max_connections: u32,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").wrap_err("DATABASE_URL must be set")?;

        let grpc_port = std::env::var("GRPC_PORT")
            .unwrap_or_else(|_| "8081".to_string())
            .parse()
            .wrap_err("GRPC_PORT must be a valid port number")?;

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .wrap_err("DB_MAX_CONNECTIONS must be a positive integer")?;

        Ok(Self {
            database_url,
            grpc_port,
            db_max_connections,
            environment: Environment::from_env(),
        })
    }
}
