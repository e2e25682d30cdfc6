//! Create/edit form boundary.

use gatehouse_core::{Clock, DomainError, EntityId, Identified};
use gatehouse_entities::{Entity, EntityFormData};
use gatehouse_storage::KeyValueStore;

use crate::error::ClientError;
use crate::manager::EntityStateManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// Draft of an entity being created or edited.
///
/// `submit` validates first; an invalid draft never reaches the manager or the
/// store, and the returned error carries the inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityForm {
    mode: FormMode,
    draft: EntityFormData,
}

impl EntityForm {
    /// Blank form; `active` starts checked.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: EntityFormData::default(),
        }
    }

    /// Form prefilled from an existing record.
    pub fn edit(entity: &Entity) -> Self {
        Self {
            mode: FormMode::Edit(entity.id().clone()),
            draft: entity.form_data(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &EntityFormData {
        &self.draft
    }

    pub fn set_cpf(&mut self, cpf: impl Into<String>) -> &mut Self {
        self.draft.cpf = cpf.into();
        self
    }

    pub fn set_rg(&mut self, rg: impl Into<String>) -> &mut Self {
        self.draft.rg = rg.into();
        self
    }

    pub fn set_type(&mut self, entity_type: impl Into<String>) -> &mut Self {
        self.draft.entity_type = entity_type.into();
        self
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.draft.active = active;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.draft.validate()
    }

    /// Validate, then create or update through the manager.
    pub async fn submit<S, C>(
        &self,
        manager: &mut EntityStateManager<S, C>,
    ) -> Result<Entity, ClientError>
    where
        S: KeyValueStore,
        C: Clock,
    {
        if let Err(err) = self.validate() {
            tracing::debug!(error = %err, "entity form rejected");
            return Err(err.into());
        }

        match &self.mode {
            FormMode::Create => manager.create_entity(self.draft.clone()).await,
            FormMode::Edit(id) => manager.update_entity(id, self.draft.clone()).await,
        }
    }
}

impl Default for EntityForm {
    fn default() -> Self {
        Self::create()
    }
}
