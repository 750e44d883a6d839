//! Per-visitor session storage.
//!
//! The store is an explicit object held in the router state; handlers get
//! it by reference and nothing in the grading path knows about it. Visitors
//! are identified by a random id carried in an `HttpOnly` cookie.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use triviaexam_core::GradingResult;
use triviaexam_report::Flash;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "triviaexam_session";

/// What the server remembers about one visitor.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub result: Option<GradingResult>,
    pub flashes: Vec<Flash>,
    pub last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            result: None,
            flashes: Vec::new(),
            last_seen: now,
        }
    }
}

/// Shared, expiring map of session id → [`SessionEntry`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    lifetime: Duration,
}

impl SessionStore {
    pub fn new(lifetime_secs: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            // chrono caps durations at i64::MAX milliseconds
            lifetime: Duration::seconds(
                i64::try_from(lifetime_secs)
                    .unwrap_or(i64::MAX)
                    .min(i64::MAX / 1000),
            ),
        }
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen > self.lifetime
    }

    /// Run `f` on the live entry for `id`, if there is one.
    async fn with_existing<T: Default>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionEntry) -> T,
    ) -> T {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(&id) else {
            return T::default();
        };
        if self.is_expired(entry, now) {
            return T::default();
        }
        entry.last_seen = now;
        f(entry)
    }

    /// Run `f` on the live entry for `id`, creating it if needed.
    async fn with_entry<T>(&self, id: Uuid, f: impl FnOnce(&mut SessionEntry) -> T) -> T {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let entry = entries.entry(id).or_insert_with(|| SessionEntry::new(now));
        if self.is_expired(entry, now) {
            *entry = SessionEntry::new(now);
        }
        entry.last_seen = now;
        f(entry)
    }

    /// The stored result, if the visitor has one that has not expired.
    pub async fn result(&self, id: Uuid) -> Option<GradingResult> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        entries
            .get(&id)
            .filter(|entry| !self.is_expired(entry, now))
            .and_then(|entry| entry.result.clone())
    }

    pub async fn store_result(&self, id: Uuid, result: GradingResult) {
        self.with_entry(id, |entry| entry.result = Some(result)).await;
    }

    pub async fn clear_result(&self, id: Uuid) {
        self.with_existing(id, |entry| entry.result = None).await;
    }

    pub async fn push_flash(&self, id: Uuid, flash: Flash) {
        self.with_entry(id, |entry| entry.flashes.push(flash)).await;
    }

    /// Remove and return pending flash messages.
    pub async fn take_flashes(&self, id: Uuid) -> Vec<Flash> {
        self.with_existing(id, |entry| std::mem::take(&mut entry.flashes))
            .await
    }

    /// Forget everything about the visitor.
    pub async fn remove(&self, id: Uuid) {
        self.entries.write().await.remove(&id);
    }

    /// Drop expired entries. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// The visitor's session id, taken from the request cookie or freshly minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    /// `true` when the request carried no usable session cookie.
    pub is_new: bool,
}

impl Session {
    /// `Set-Cookie` value for this session.
    pub fn cookie(&self, max_age_secs: i64, secure: bool) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}",
            self.id
        );
        if secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

fn session_from_cookie_header(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_from_cookie_header);

        Ok(match existing {
            Some(id) => Session { id, is_new: false },
            None => Session {
                id: Uuid::new_v4(),
                is_new: true,
            },
        })
    }
}
