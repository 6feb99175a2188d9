//! Premium entitlement and which modes a caller may start.
//!
//! Individual modes are free. Fixed-pair modes need a signed-in user whose
//! profile is flagged premium.

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use uuid::Uuid;

use crate::schedule::GameMode;

/// Account identifier of a signed-in user.
pub type UserId = Uuid;

/// Answers whether a user holds the premium flag.
#[async_trait]
pub trait EntitlementCheck: Send + Sync {
    async fn is_premium_entitled(&self, user: UserId) -> bool;
}

/// Outcome of asking to start a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeAccess {
    Granted,
    /// Premium mode requested without a signed-in user.
    LoginRequired,
    /// Signed in, but not premium.
    PremiumRequired,
}

impl ModeAccess {
    pub fn is_granted(self) -> bool {
        self == ModeAccess::Granted
    }
}

/// Decide whether `user` may start `mode`.
pub async fn mode_access<C>(mode: GameMode, user: Option<UserId>, check: &C) -> ModeAccess
where
    C: EntitlementCheck + ?Sized,
{
    if !mode.is_premium() {
        return ModeAccess::Granted;
    }
    match user {
        None => ModeAccess::LoginRequired,
        Some(user) if check.is_premium_entitled(user).await => ModeAccess::Granted,
        Some(_) => ModeAccess::PremiumRequired,
    }
}

/// Modes `user` may start, in catalog order.
pub async fn selectable_modes<C>(user: Option<UserId>, check: &C) -> Vec<GameMode>
where
    C: EntitlementCheck + ?Sized,
{
    let premium = match user {
        Some(user) => check.is_premium_entitled(user).await,
        None => false,
    };
    GameMode::ALL
        .iter()
        .copied()
        .filter(|mode| premium || !mode.is_premium())
        .collect()
}

/// In-memory set of premium users.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitlements {
    premium: HashSet<UserId>,
}

impl StaticEntitlements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_premium(mut self, user: UserId) -> Self {
        self.premium.insert(user);
        self
    }
}

#[async_trait]
impl EntitlementCheck for StaticEntitlements {
    async fn is_premium_entitled(&self, user: UserId) -> bool {
        self.premium.contains(&user)
    }
}

/// Reads `profiles.is_premium`. Lookup failures count as not entitled.
pub struct PgEntitlements {
    pool: PgPool,
}

impl PgEntitlements {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementCheck for PgEntitlements {
    async fn is_premium_entitled(&self, user: UserId) -> bool {
        let row = sqlx::query("SELECT is_premium FROM profiles WHERE id = $1")
            .bind(user)
            .fetch_optional(&self.pool)
            .await;

        match row {
            Ok(Some(row)) => row
                .try_get::<Option<bool>, _>("is_premium")
                .ok()
                .flatten()
                .unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                warn!("Premium lookup failed for {user}: {e}");
                false
            }
        }
    }
}
