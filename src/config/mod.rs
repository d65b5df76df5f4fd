use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: set SQLALCHEMY_DATABASE_URI or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Unsupported database URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// SQL dialect of the configured backing store, derived from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            Err(ConfigError::UnsupportedScheme(scheme.to_string()))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub backend: Backend,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration once from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let url = env::var("SQLALCHEMY_DATABASE_URI")
            .or_else(|_| env::var("DATABASE_URL"))
            .map_err(|_| ConfigError::MissingDatabaseUrl)?;

        Self::for_environment(environment, url)?.with_env_overrides()
    }

    /// Build a configuration with the presets of `environment` for the given connection string.
    pub fn for_environment(environment: Environment, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let backend = Backend::from_url(&url)?;

        let (max_connections, connection_timeout) = match environment {
            Environment::Development => (5, 30),
            Environment::Staging => (10, 10),
            Environment::Production => (20, 5),
        };

        Ok(Self {
            environment,
            database: DatabaseConfig {
                url,
                backend,
                max_connections,
                connection_timeout,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
        })
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        if let Ok(v) = env::var("MOVIES_API_HOST") {
            self.server.host = v;
        }
        // Allow tests or deployments to override port via env
        if let Some((name, v)) = env::var("MOVIES_API_PORT")
            .map(|v| ("MOVIES_API_PORT", v))
            .or_else(|_| env::var("PORT").map(|v| ("PORT", v)))
            .ok()
        {
            self.server.port = parse_var(name, &v)?;
        }

        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_backend_from_scheme() {
        assert_eq!(Backend::from_url("postgres://u:p@localhost/movies").unwrap(), Backend::Postgres);
        assert_eq!(Backend::from_url("postgresql://localhost/movies").unwrap(), Backend::Postgres);
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert_eq!(Backend::from_url("sqlite://movies.db").unwrap(), Backend::Sqlite);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = Backend::from_url("mysql://root@localhost/movies").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(ref s) if s == "mysql"));
    }

    #[test]
    fn environment_presets() {
        let dev = AppConfig::for_environment(Environment::Development, "sqlite::memory:").unwrap();
        assert_eq!(dev.database.max_connections, 5);
        assert_eq!(dev.server.port, 5000);

        let prod = AppConfig::for_environment(Environment::Production, "postgres://localhost/movies").unwrap();
        assert_eq!(prod.database.max_connections, 20);
        assert_eq!(prod.database.backend, Backend::Postgres);
        assert_eq!(prod.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn parse_var_reports_name() {
        let err = parse_var::<u16>("PORT", "eighty").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: eighty");
    }
}
