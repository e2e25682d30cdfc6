//! `gatehouse-storage`
//!
//! **Responsibility:** durable storage of the entity collection.
//!
//! - [`KeyValueStore`]: the injected string key/value capability, with
//!   in-memory, file and SQLite backends.
//! - [`EntityGateway`]: keeps the whole entity collection as one JSON blob
//!   under a single storage key, rewriting it on every mutation.

pub mod file;
pub mod gateway;
pub mod kv;
pub mod memory;
pub mod sqlite;

pub use file::FileKeyValueStore;
pub use gateway::{DEFAULT_STORAGE_KEY, EntityGateway, GatewayError};
pub use kv::{KeyValueStore, StoreError};
pub use memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
