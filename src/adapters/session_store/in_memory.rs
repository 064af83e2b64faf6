//! In-memory session store for development and tests.
//!
//! Transcripts live in a `HashMap` behind a single `tokio::sync::RwLock`.
//! Appends run under one write lock, which is what makes them atomic. Expired
//! entries are invisible to reads immediately and physically removed by
//! [`InMemorySessionStore::purge_expired`], driven by [`spawn_reaper`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::conversation::StoredMessage;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    messages: Vec<StoredMessage>,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Transient transcript storage.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Drops every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(now));
        before - sessions.len()
    }

    /// Number of entries held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn expiry(&self) -> Instant {
        Instant::now() + self.ttl
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<Vec<StoredMessage>>, StoreError> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.messages.clone()))
    }

    async fn set(&self, id: &SessionId, messages: Vec<StoredMessage>) -> Result<(), StoreError> {
        let entry = Entry {
            messages,
            expires_at: self.expiry(),
        };
        self.sessions.write().await.insert(id.clone(), entry);
        Ok(())
    }

    async fn append(
        &self,
        id: &SessionId,
        messages: Vec<StoredMessage>,
    ) -> Result<usize, StoreError> {
        let now = Instant::now();
        let expires_at = self.expiry();
        let mut sessions = self.sessions.write().await;

        let entry = sessions.entry(id.clone()).or_insert_with(|| Entry {
            messages: Vec::new(),
            expires_at,
        });
        if !entry.is_live(now) {
            entry.messages.clear();
        }
        entry.messages.extend(messages);
        entry.expires_at = expires_at;
        Ok(entry.messages.len())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn has(&self, id: &SessionId) -> Result<bool, StoreError> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).is_some_and(|entry| entry.is_live(now)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Spawns a task that purges expired sessions every `interval`.
pub fn spawn_reaper(store: InMemorySessionStore, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "reaped expired sessions");
            }
        }
    })
}
