//! State snapshot published to the rendering layer.

use gatehouse_core::{EntityId, Identified};
use gatehouse_entities::{Entity, EntityFilter};

/// Read-only view of the manager's working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityState {
    pub entities: Vec<Entity>,
    pub loading: bool,
    /// Message of the most recent failed operation, cleared when the next
    /// operation starts.
    pub error: Option<String>,
}

impl EntityState {
    pub fn find(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.has_id(id))
    }

    pub fn filtered(&self, filter: &EntityFilter) -> Vec<Entity> {
        filter.apply(&self.entities).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
