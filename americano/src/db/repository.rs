//! Tournament persistence behind a trait, with Postgres and in-memory stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use std::{collections::HashMap, fmt};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    codec,
    errors::{RepositoryError, RepositoryResult},
};
use crate::{
    entitlement::UserId,
    schedule::GameMode,
    tournament::{TournamentError, TournamentState},
};

const SCHEMA: &str = include_str!("../../migrations/0001_tournaments.sql");

/// Identifier of a stored tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TournamentHandle(pub Uuid);

impl TournamentHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TournamentHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TournamentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Listing row for an owner's saved tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub handle: TournamentHandle,
    pub owner: UserId,
    pub name: String,
    pub mode: GameMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Durable storage for running tournaments.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Store a new tournament and return its handle.
    async fn save(
        &self,
        owner: UserId,
        name: &str,
        state: &TournamentState,
    ) -> RepositoryResult<TournamentHandle>;

    /// Replace the stored state of an existing tournament.
    async fn update(
        &self,
        handle: TournamentHandle,
        state: &TournamentState,
    ) -> RepositoryResult<()>;

    /// Load a tournament. Snapshots that fail validation are rejected.
    async fn load(&self, handle: TournamentHandle) -> RepositoryResult<TournamentState>;

    async fn delete(&self, handle: TournamentHandle) -> RepositoryResult<()>;

    /// Owner's tournaments, newest first.
    async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<TournamentSummary>>;
}

fn checked(state: TournamentState) -> RepositoryResult<TournamentState> {
    state.check_consistency()?;
    Ok(state)
}

/// PostgreSQL implementation of `TournamentRepository`
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn save(
        &self,
        owner: UserId,
        name: &str,
        state: &TournamentState,
    ) -> RepositoryResult<TournamentHandle> {
        let handle = TournamentHandle::new();
        let settings = state.settings();
        let body = serde_json::to_value(state)?;

        sqlx::query(
            "INSERT INTO tournaments (id, user_id, name, mode, is_fixed, pairing_type, dispute_model, state)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(handle.0)
        .bind(owner)
        .bind(name)
        .bind(settings.mode.id())
        .bind(settings.mode.is_fixed_pairs())
        .bind(settings.pairing.to_string())
        .bind(settings.scoring.to_string())
        .bind(body)
        .execute(&self.pool)
        .await?;

        info!("Saved tournament {handle} ({}) for {owner}", settings.mode);
        Ok(handle)
    }

    async fn update(
        &self,
        handle: TournamentHandle,
        state: &TournamentState,
    ) -> RepositoryResult<()> {
        let body = serde_json::to_value(state)?;
        let result = sqlx::query("UPDATE tournaments SET state = $2, updated_at = NOW() WHERE id = $1")
            .bind(handle.0)
            .bind(body)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(handle));
        }
        debug!("Updated tournament {handle}");
        Ok(())
    }

    async fn load(&self, handle: TournamentHandle) -> RepositoryResult<TournamentState> {
        let row = sqlx::query("SELECT state FROM tournaments WHERE id = $1")
            .bind(handle.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(handle))?;

        let body: serde_json::Value = row.try_get("state")?;
        checked(serde_json::from_value(body)?)
    }

    async fn delete(&self, handle: TournamentHandle) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(handle.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(handle));
        }
        info!("Deleted tournament {handle}");
        Ok(())
    }

    async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<TournamentSummary>> {
        let rows = sqlx::query(
            "SELECT id, name, mode, created_at, updated_at FROM tournaments
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> RepositoryResult<TournamentSummary> {
                let mode: String = row.try_get("mode")?;
                Ok(TournamentSummary {
                    handle: TournamentHandle(row.try_get("id")?),
                    owner,
                    name: row.try_get("name")?,
                    mode: mode
                        .parse()
                        .map_err(|_| TournamentError::UnknownMode(mode.clone()))?,
                    created_at: row.try_get("created_at")?,
                    updated_at: row.try_get("updated_at")?,
                })
            })
            .collect()
    }
}

struct StoredTournament {
    summary: TournamentSummary,
    snapshot: Vec<u8>,
}

/// In-memory implementation storing bincode snapshots.
#[derive(Default)]
pub struct MemoryTournamentRepository {
    tournaments: RwLock<HashMap<TournamentHandle, StoredTournament>>,
}

impl MemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tournaments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tournaments.read().await.is_empty()
    }

    /// Overwrite the raw snapshot of a stored tournament.
    pub async fn put_snapshot(
        &self,
        handle: TournamentHandle,
        snapshot: Vec<u8>,
    ) -> RepositoryResult<()> {
        let mut tournaments = self.tournaments.write().await;
        let stored = tournaments
            .get_mut(&handle)
            .ok_or(RepositoryError::NotFound(handle))?;
        stored.snapshot = snapshot;
        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for MemoryTournamentRepository {
    async fn save(
        &self,
        owner: UserId,
        name: &str,
        state: &TournamentState,
    ) -> RepositoryResult<TournamentHandle> {
        let handle = TournamentHandle::new();
        let now = Utc::now();
        let stored = StoredTournament {
            summary: TournamentSummary {
                handle,
                owner,
                name: name.to_string(),
                mode: state.mode(),
                created_at: now,
                updated_at: now,
            },
            snapshot: codec::encode(state)?,
        };

        self.tournaments.write().await.insert(handle, stored);
        debug!("Stored tournament {handle} in memory");
        Ok(handle)
    }

    async fn update(
        &self,
        handle: TournamentHandle,
        state: &TournamentState,
    ) -> RepositoryResult<()> {
        let snapshot = codec::encode(state)?;
        let mut tournaments = self.tournaments.write().await;
        let stored = tournaments
            .get_mut(&handle)
            .ok_or(RepositoryError::NotFound(handle))?;
        stored.snapshot = snapshot;
        stored.summary.updated_at = Utc::now();
        Ok(())
    }

    async fn load(&self, handle: TournamentHandle) -> RepositoryResult<TournamentState> {
        let tournaments = self.tournaments.read().await;
        let stored = tournaments
            .get(&handle)
            .ok_or(RepositoryError::NotFound(handle))?;
        checked(codec::decode(&stored.snapshot)?)
    }

    async fn delete(&self, handle: TournamentHandle) -> RepositoryResult<()> {
        self.tournaments
            .write()
            .await
            .remove(&handle)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(handle))
    }

    async fn list_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<TournamentSummary>> {
        let tournaments = self.tournaments.read().await;
        let mut summaries: Vec<TournamentSummary> = tournaments
            .values()
            .filter(|stored| stored.summary.owner == owner)
            .map(|stored| stored.summary.clone())
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }
}
