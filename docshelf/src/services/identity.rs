//! Identity cache
//!
//! Remembers the signed-in user's id for a short window so that every
//! engine call does not cost an auth round trip.

use crate::config;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// The authenticated user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

/// Authentication collaborator
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<AuthUser>>;
}

/// Auth provider with a fixed answer, used by the CLI
pub struct StaticAuthProvider {
    user: Option<AuthUser>,
}

impl StaticAuthProvider {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user: user_id.map(|id| AuthUser { id }),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_user(&self) -> Result<Option<AuthUser>> {
        Ok(self.user.clone())
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CachedUser {
    user_id: String,
    fetched_at: DateTime<Utc>,
}

/// Time-bounded cache of the authenticated user's id
pub struct IdentityCache {
    auth: Arc<dyn AuthProvider>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    // Never held across an await
    cached: Mutex<Option<CachedUser>>,
}

impl IdentityCache {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_clock(
            auth,
            Arc::new(SystemClock),
            Duration::seconds(config::IDENTITY_CACHE_TTL_SECS),
        )
    }

    pub fn with_clock(auth: Arc<dyn AuthProvider>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            auth,
            clock,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Return the cached user id, refreshing it from the auth provider when stale.
    ///
    /// Provider errors propagate and leave the cache empty, so the next call retries.
    pub async fn get_cached_user_id(&self) -> Result<Option<String>> {
        if let Some(user_id) = self.fresh_entry(self.clock.now()) {
            return Ok(Some(user_id));
        }

        let user = match self.auth.current_user().await {
            Ok(user) => user,
            Err(e) => {
                self.store(None);
                return Err(e.during("get_current_user"));
            }
        };

        match user {
            Some(user) => {
                tracing::debug!("Refreshed cached user id: {}", user.id);
                self.store(Some(CachedUser {
                    user_id: user.id.clone(),
                    fetched_at: self.clock.now(),
                }));
                Ok(Some(user.id))
            }
            None => {
                self.store(None);
                Ok(None)
            }
        }
    }

    /// Forget the cached id (sign-out)
    pub fn invalidate(&self) {
        self.store(None);
    }

    fn fresh_entry(&self, now: DateTime<Utc>) -> Option<String> {
        let cached = self.cached.lock().unwrap_or_else(|p| p.into_inner());
        cached
            .as_ref()
            .filter(|entry| now - entry.fetched_at < self.ttl)
            .map(|entry| entry.user_id.clone())
    }

    fn store(&self, entry: Option<CachedUser>) {
        *self.cached.lock().unwrap_or_else(|p| p.into_inner()) = entry;
    }
}
