//! Reactive entity state over the storage gateway.

use tokio::sync::watch;

use gatehouse_core::{Clock, EntityId, Identified, SystemClock};
use gatehouse_entities::{Entity, EntityFilter, EntityFormData};
use gatehouse_storage::{EntityGateway, GatewayError, KeyValueStore};

use crate::error::{ClientError, Operation};
use crate::state::EntityState;

/// Working copy of the entity collection for one screen session.
///
/// Every operation follows the same transitions:
/// `loading = true, error = None` → gateway call → on success the working copy
/// is updated and `loading = false`; on failure `error` carries a generic
/// message, `loading = false`, and the typed error is returned to the caller.
///
/// Mutating operations take `&mut self`, so one manager never overlaps its own
/// calls. Nothing guards against other managers writing the same storage key;
/// their changes show up on the next [`load_entities`](Self::load_entities).
#[derive(Debug)]
pub struct EntityStateManager<S, C = SystemClock> {
    gateway: EntityGateway<S, C>,
    state: watch::Sender<EntityState>,
}

impl<S> EntityStateManager<S, SystemClock>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self::with_gateway(EntityGateway::new(store))
    }
}

impl<S, C> EntityStateManager<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn with_gateway(gateway: EntityGateway<S, C>) -> Self {
        let (state, _) = watch::channel(EntityState::default());
        Self { gateway, state }
    }

    pub fn gateway(&self) -> &EntityGateway<S, C> {
        &self.gateway
    }

    /// Current snapshot.
    pub fn state(&self) -> EntityState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<EntityState> {
        self.state.subscribe()
    }

    pub fn find(&self, id: &EntityId) -> Option<Entity> {
        self.state.borrow().find(id).cloned()
    }

    pub fn filtered(&self, filter: &EntityFilter) -> Vec<Entity> {
        self.state.borrow().filtered(filter)
    }

    /// Dismiss the current error message.
    pub fn clear_error(&mut self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Replace the working copy with the stored collection.
    pub async fn load_entities(&mut self) -> Result<(), ClientError> {
        self.begin(Operation::Load);
        match self.gateway.get_all().await {
            Ok(entities) => {
                self.succeed(|current| *current = entities);
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Load, err)),
        }
    }

    /// Persist a new entity and append it to the working copy.
    pub async fn create_entity(&mut self, data: EntityFormData) -> Result<Entity, ClientError> {
        data.validate()?;

        self.begin(Operation::Create);
        match self.gateway.create(data).await {
            Ok(created) => {
                let local = created.clone();
                self.succeed(move |current| current.push(local));
                Ok(created)
            }
            Err(err) => Err(self.fail(Operation::Create, err)),
        }
    }

    /// Persist new field values for `id` and swap the local record.
    ///
    /// Ids are not guaranteed unique; like the gateway, only the first record
    /// carrying `id` is replaced.
    pub async fn update_entity(
        &mut self,
        id: &EntityId,
        data: EntityFormData,
    ) -> Result<Entity, ClientError> {
        data.validate()?;

        self.begin(Operation::Update);
        match self.gateway.update(id, data).await {
            Ok(updated) => {
                let local = updated.clone();
                self.succeed(move |current| {
                    if let Some(entity) = current.iter_mut().find(|e| e.has_id(id)) {
                        *entity = local;
                    }
                });
                Ok(updated)
            }
            Err(err) => Err(self.fail(Operation::Update, err)),
        }
    }

    /// Delete `id` from storage and from the working copy. Missing ids succeed.
    pub async fn delete_entity(&mut self, id: &EntityId) -> Result<(), ClientError> {
        self.begin(Operation::Delete);
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.succeed(|current| current.retain(|e| !e.has_id(id)));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Delete, err)),
        }
    }

    fn begin(&self, op: Operation) {
        tracing::debug!(operation = op.as_str(), "entity operation started");
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn succeed(&self, apply: impl FnOnce(&mut Vec<Entity>)) {
        self.state.send_modify(|s| {
            apply(&mut s.entities);
            s.loading = false;
        });
    }

    fn fail(&self, op: Operation, err: GatewayError) -> ClientError {
        tracing::warn!(operation = op.as_str(), error = %err, "entity operation failed");
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(op.failure_message().to_string());
        });
        ClientError::Gateway(err)
    }
}
