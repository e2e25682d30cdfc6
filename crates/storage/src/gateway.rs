//! Persistence gateway for the entity collection.
//!
//! The whole collection lives as one JSON array under a single storage key.
//! Every mutation is load → mutate in memory → write the whole array back.
//! There is no locking around that sequence: two gateways over the same store
//! can interleave and the last write wins.

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use gatehouse_core::{Clock, EntityId, Identified, SystemClock};
use gatehouse_entities::{Entity, EntityFormData};

use crate::kv::KeyValueStore;

/// Storage key the entity collection is kept under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "@access_control:entities";

/// Gateway-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The store could not be read, or its content is not an entity array.
    #[error("failed to read entity collection: {0}")]
    StorageRead(String),

    /// The store could not be written (or read as part of a mutation).
    #[error("failed to write entity collection: {0}")]
    StorageWrite(String),

    /// No record with this id exists.
    #[error("entity not found: {0}")]
    NotFound(EntityId),
}

impl GatewayError {
    fn into_write(self) -> Self {
        match self {
            GatewayError::StorageRead(msg) => GatewayError::StorageWrite(msg),
            other => other,
        }
    }
}

/// Reads and writes the entity collection through an injected store.
#[derive(Debug, Clone)]
pub struct EntityGateway<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
}

impl<S> EntityGateway<S, SystemClock>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S, C> EntityGateway<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Use a different storage key (e.g. one collection per site).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All stored entities; an absent blob is an empty collection.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn get_all(&self) -> Result<Vec<Entity>, GatewayError> {
        let entities = self.read_collection().await?;
        tracing::debug!(count = entities.len(), "loaded entity collection");
        Ok(entities)
    }

    /// Single entity by id (linear scan).
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn get(&self, id: &EntityId) -> Result<Option<Entity>, GatewayError> {
        let entities = self.read_collection().await?;
        Ok(entities.into_iter().find(|e| e.has_id(id)))
    }

    /// Append a new entity with a fresh id and `createdAt == updatedAt == now`.
    #[tracing::instrument(skip(self, data), fields(key = %self.key))]
    pub async fn create(&self, data: EntityFormData) -> Result<Entity, GatewayError> {
        let mut entities = self
            .read_collection()
            .await
            .map_err(GatewayError::into_write)?;

        let entity = Entity::create(EntityId::generate(), data, self.now());
        entities.push(entity.clone());
        self.write_collection(&entities).await?;

        tracing::info!(entity_id = %entity.id(), total = entities.len(), "entity created");
        Ok(entity)
    }

    /// Replace the writable fields of `id` and refresh its `updatedAt`.
    ///
    /// Only the first record carrying `id` changes when ids collide. A miss is
    /// reported before anything is written; the stored collection is left
    /// untouched.
    #[tracing::instrument(skip(self, data), fields(key = %self.key))]
    pub async fn update(
        &self,
        id: &EntityId,
        data: EntityFormData,
    ) -> Result<Entity, GatewayError> {
        let mut entities = self
            .read_collection()
            .await
            .map_err(GatewayError::into_write)?;

        let now = self.now();
        let updated = match entities.iter_mut().find(|e| e.has_id(id)) {
            Some(entity) => {
                entity.apply_update(data, now);
                entity.clone()
            }
            None => {
                tracing::warn!(entity_id = %id, "update target not found");
                return Err(GatewayError::NotFound(id.clone()));
            }
        };

        self.write_collection(&entities).await?;

        tracing::info!(entity_id = %id, "entity updated");
        Ok(updated)
    }

    /// Remove every record with `id`. Deleting a missing id is a no-op success.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn delete(&self, id: &EntityId) -> Result<(), GatewayError> {
        let mut entities = self
            .read_collection()
            .await
            .map_err(GatewayError::into_write)?;

        let before = entities.len();
        entities.retain(|e| !e.has_id(id));
        self.write_collection(&entities).await?;

        tracing::info!(entity_id = %id, removed = before - entities.len(), "entity deleted");
        Ok(())
    }

    /// Replace the stored collection with an empty one.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn clear(&self) -> Result<(), GatewayError> {
        self.write_collection(&[]).await?;
        tracing::info!("entity collection cleared");
        Ok(())
    }

    /// Millisecond precision, matching ISO strings written by other clients.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    async fn read_collection(&self) -> Result<Vec<Entity>, GatewayError> {
        let raw = self.store.get(&self.key).await.map_err(|e| {
            tracing::error!(error = %e, "entity store read failed");
            GatewayError::StorageRead(e.to_string())
        })?;

        match raw {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                tracing::error!(error = %e, "stored entity collection is not parseable");
                GatewayError::StorageRead(format!("invalid entity collection: {e}"))
            }),
        }
    }

    async fn write_collection(&self, entities: &[Entity]) -> Result<(), GatewayError> {
        let payload = serde_json::to_string(entities).map_err(|e| {
            GatewayError::StorageWrite(format!("failed to serialize entities: {e}"))
        })?;

        self.store.set(&self.key, payload).await.map_err(|e| {
            tracing::error!(error = %e, "entity store write failed");
            GatewayError::StorageWrite(e.to_string())
        })
    }
}
