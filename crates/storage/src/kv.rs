//! Key/value storage capability.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised by key/value backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String key/value store.
///
/// Implementations serialize access to a single key on their own; callers
/// performing read-modify-write sequences get no atomicity from this trait.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }
}
