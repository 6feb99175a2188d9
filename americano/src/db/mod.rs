//! Postgres storage: pool setup, configuration and the tournament store.

use log::debug;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod codec;
pub mod config;
pub mod errors;
pub mod repository;

pub use config::{ConfigError, DatabaseConfig};
pub use errors::{RepositoryError, RepositoryResult};
pub use repository::{
    MemoryTournamentRepository, PgTournamentRepository, TournamentHandle, TournamentRepository,
    TournamentSummary,
};

/// Postgres pool shared by the tournament store and the entitlement lookup.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool sized and timed by `config`.
    ///
    /// ```no_run
    /// # async fn open() -> Result<(), Box<dyn std::error::Error>> {
    /// use americano::db::{Database, DatabaseConfig};
    ///
    /// let db = Database::new(&DatabaseConfig::from_env()?).await?;
    /// db.tournaments().ensure_schema().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        debug!(
            "Pool ready: {}..{} connections",
            config.min_connections, config.max_connections
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn tournaments(&self) -> PgTournamentRepository {
        PgTournamentRepository::new(self.pool.clone())
    }

    /// Round-trip a trivial query.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
