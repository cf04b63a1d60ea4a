//! Database connection pool management.

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

use crate::config::DatabaseConfig;

/// Pooled MySQL sessions, shared by every request.
///
/// Cloning is cheap and every clone refers to the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pub(crate) pool: MySqlPool,
}

impl Database {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Wait for borrowed connections to come back, then close everything.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Build connect options from either the URL or the individual parts.
pub fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, sqlx::Error> {
    match &config.url {
        Some(url) => url.parse(),
        None => Ok(MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)),
    }
}

/// Create a new database connection pool.
///
/// Connections are opened on first use, so the server starts even while the
/// database is unreachable; requests made in the meantime fail with a 500.
pub fn create_pool(config: &DatabaseConfig) -> Result<Database, sqlx::Error> {
    let options = connect_options(config)?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(options);

    Ok(Database::new(pool))
}
