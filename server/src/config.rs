//! Configuration management for the server.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Public base URL advertised in the OpenAPI document
    pub server_url: String,
    pub database: DatabaseConfig,
}

/// MySQL connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the individual parts
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Upper bound on open connections
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let server_url = lookup("SERVER_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        let url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let (user, name) = if url.is_some() {
            (
                lookup("DB_USER").unwrap_or_default(),
                lookup("DB_NAME").unwrap_or_default(),
            )
        } else {
            (
                lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
                lookup("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
            )
        };

        let database = DatabaseConfig {
            url,
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            user,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
        };

        if database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            server_url,
            database,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid {var} value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_fill_in_optional_values() {
        let config =
            Config::from_lookup(lookup(&[("DB_USER", "root"), ("DB_NAME", "personas")])).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.server_url, "http://localhost:3000");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(30));
        assert!(config.database.url.is_none());
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("SERVER_URL", "https://personas.example.com"),
            ("DB_HOST", "db"),
            ("DB_PORT", "3307"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "censo"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.server_url, "https://personas.example.com");
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.name, "censo");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn server_url_follows_port() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "4000"),
            ("DB_USER", "root"),
            ("DB_NAME", "personas"),
        ]))
        .unwrap();
        assert_eq!(config.server_url, "http://localhost:4000");
    }

    #[test]
    fn database_url_makes_parts_optional() {
        let config =
            Config::from_lookup(lookup(&[("DATABASE_URL", "mysql://root@db/personas")])).unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("mysql://root@db/personas")
        );
    }

    #[test]
    fn missing_user_is_an_error() {
        let err = Config::from_lookup(lookup(&[("DB_NAME", "personas")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_USER")));
    }

    #[test]
    fn bad_numbers_are_errors() {
        let err = Config::from_lookup(lookup(&[
            ("PORT", "http"),
            ("DB_USER", "root"),
            ("DB_NAME", "personas"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid PORT value: \"http\"");

        let err = Config::from_lookup(lookup(&[
            ("DB_MAX_CONNECTIONS", "0"),
            ("DB_USER", "root"),
            ("DB_NAME", "personas"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn debug_hides_password() {
        let config = Config::from_lookup(lookup(&[
            ("DB_USER", "root"),
            ("DB_NAME", "personas"),
            ("DB_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
