//! Redis-backed session store for production deployments.
//!
//! Each transcript is a Redis list under `solace:session:<id>` holding one
//! JSON document per message. Appends are `RPUSH` plus `EXPIRE` inside one
//! `MULTI` block, so concurrent appends on one session serialize and stored
//! entries are never decoded and re-encoded server-side.
//!
//! Redis cannot hold an empty list, so a transcript that exists but has no
//! messages yet is represented by a marker key `solace:session:<id>:empty`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::time::Duration;

use crate::domain::conversation::StoredMessage;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, StoreError};

const KEY_PREFIX: &str = "solace:session:";
const EMPTY_SUFFIX: &str = ":empty";

fn unavailable(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// Durable transcript storage shared across server instances.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    /// Opens a multiplexed connection to `url`, bounded by `connect_timeout`.
    pub async fn connect(
        url: &str,
        ttl: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = tokio::time::timeout(connect_timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| StoreError::Unavailable("timed out connecting to redis".to_string()))?
            .map_err(unavailable)?;
        Ok(Self::new(conn, ttl))
    }

    fn key(id: &SessionId) -> String {
        format!("{KEY_PREFIX}{}", id.as_str())
    }

    fn empty_key(id: &SessionId) -> String {
        format!("{KEY_PREFIX}{}{EMPTY_SUFFIX}", id.as_str())
    }

    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }

    /// One JSON document per message, in order.
    fn encode_entries(messages: &[StoredMessage]) -> Result<Vec<String>, StoreError> {
        messages
            .iter()
            .map(|m| {
                serde_json::to_string(m).map_err(|e| StoreError::SerializationFailed(e.to_string()))
            })
            .collect()
    }

    fn decode_entries(raw: &[String]) -> Result<Vec<StoredMessage>, StoreError> {
        raw.iter()
            .map(|entry| {
                serde_json::from_str(entry)
                    .map_err(|e| StoreError::DeserializationFailed(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<Vec<StoredMessage>>, StoreError> {
        let mut conn = self.conn.clone();
        let (entries, empty): (Vec<String>, bool) = redis::pipe()
            .atomic()
            .cmd("LRANGE")
            .arg(Self::key(id))
            .arg(0)
            .arg(-1)
            .cmd("EXISTS")
            .arg(Self::empty_key(id))
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;

        if entries.is_empty() {
            return Ok(empty.then(Vec::new));
        }
        Self::decode_entries(&entries).map(Some)
    }

    async fn set(&self, id: &SessionId, messages: Vec<StoredMessage>) -> Result<(), StoreError> {
        let entries = Self::encode_entries(&messages)?;
        let key = Self::key(id);
        let empty_key = Self::empty_key(id);

        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("DEL")
            .arg(&key)
            .arg(&empty_key)
            .ignore();
        if entries.is_empty() {
            pipe.cmd("SET")
                .arg(&empty_key)
                .arg(1)
                .arg("EX")
                .arg(self.ttl_secs())
                .ignore();
        } else {
            pipe.cmd("RPUSH").arg(&key).arg(&entries).ignore();
            pipe.cmd("EXPIRE").arg(&key).arg(self.ttl_secs()).ignore();
        }

        let mut conn = self.conn.clone();
        let _: () = pipe.query_async(&mut conn).await.map_err(unavailable)?;
        Ok(())
    }

    async fn append(
        &self,
        id: &SessionId,
        messages: Vec<StoredMessage>,
    ) -> Result<usize, StoreError> {
        let entries = Self::encode_entries(&messages)?;
        let key = Self::key(id);
        let mut conn = self.conn.clone();

        if entries.is_empty() {
            return redis::cmd("LLEN")
                .arg(&key)
                .query_async(&mut conn)
                .await
                .map_err(unavailable);
        }

        let (len,): (usize,) = redis::pipe()
            .atomic()
            .cmd("RPUSH")
            .arg(&key)
            .arg(&entries)
            .cmd("EXPIRE")
            .arg(&key)
            .arg(self.ttl_secs())
            .ignore()
            .cmd("DEL")
            .arg(Self::empty_key(id))
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(len)
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("DEL")
            .arg(Self::key(id))
            .arg(Self::empty_key(id))
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn has(&self, id: &SessionId) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let count: usize = redis::cmd("EXISTS")
            .arg(Self::key(id))
            .arg(Self::empty_key(id))
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(count > 0)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
