//! Wiring: tracing + configured store + state manager.

use std::sync::Arc;

use anyhow::Context;

use gatehouse_storage::{
    EntityGateway, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore,
};

use crate::config::{ClientConfig, StorageBackend};
use crate::manager::EntityStateManager;

/// Open the key/value backend selected by `config`.
pub async fn open_store(config: &ClientConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        StorageBackend::File => {
            let dir = config.resolve_data_dir()?;
            let store = FileKeyValueStore::open(&dir)
                .await
                .with_context(|| format!("failed to open file store at {:?}", dir))?;
            Arc::new(store)
        }
        StorageBackend::Sqlite => {
            let path = config.sqlite_path()?;
            let store = SqliteKeyValueStore::open(&path)
                .await
                .with_context(|| format!("failed to open sqlite store at {:?}", path))?;
            Arc::new(store)
        }
    };

    Ok(store)
}

/// Initialize tracing and return a manager over the configured store.
///
/// The working copy starts empty; call
/// [`load_entities`](EntityStateManager::load_entities) when the screen mounts.
pub async fn bootstrap(
    config: &ClientConfig,
) -> anyhow::Result<EntityStateManager<Arc<dyn KeyValueStore>>> {
    gatehouse_observability::init_with(config.log_format);

    let store = open_store(config).await?;
    let gateway = EntityGateway::new(store).with_key(config.storage_key.clone());

    tracing::info!(
        backend = config.backend.as_str(),
        key = %config.storage_key,
        "entity client ready"
    );

    Ok(EntityStateManager::with_gateway(gateway))
}
