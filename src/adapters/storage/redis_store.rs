//! Redis-backed key-value store for production deployments.
//!
//! One multiplexed connection is opened at startup and cloned per command.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;

use crate::ports::{KeyValueStore, StoreError};

/// Redis store using plain `GET` / `SET` / `DEL` on string values.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisKeyValueStore {
    /// Wrap an existing connection.
    pub fn new(conn: MultiplexedConnection, timeout: Duration) -> Self {
        Self { conn, timeout }
    }

    /// Open a client for `url` and establish the multiplexed connection.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let conn = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!("connect timed out after {}s", timeout.as_secs()))
            })?
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self::new(conn, timeout))
    }

    /// Bounds a single command by the configured timeout.
    async fn run<T, F>(&self, command: F) -> Result<T, StoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => result.map_err(|e| StoreError::CommandFailed(e.to_string())),
            Err(_) => Err(StoreError::Unavailable(format!(
                "command timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.set::<_, _, ()>(key, value)).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.del::<_, ()>(key)).await
    }
}

impl std::fmt::Debug for RedisKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires a running Redis; run with: cargo test -- --ignored
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
    }

    #[tokio::test]
    #[ignore]
    async fn set_get_delete_round_trip() {
        let store = RedisKeyValueStore::connect(&redis_url(), Duration::from_secs(5))
            .await
            .unwrap();
        let key = format!("test-{}", uuid::Uuid::new_v4());

        assert_eq!(store.get(&key).await.unwrap(), None);

        store.set(&key, r#"{"topic":"AI ethics"}"#).await.unwrap();
        assert_eq!(
            store.get(&key).await.unwrap().as_deref(),
            Some(r#"{"topic":"AI ethics"}"#)
        );

        store.delete(&key).await.unwrap();
        store.delete(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_url_is_unavailable() {
        let result = RedisKeyValueStore::connect("not a url", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
