use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_core::{EntityId, Identified};

use crate::form::EntityFormData;

/// A person or organization registered with the access control system.
///
/// Stored shape (camelCase JSON):
/// `{ id, cpf, rg, type, active, createdAt, updatedAt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    id: EntityId,
    cpf: String,
    rg: String,
    #[serde(rename = "type")]
    entity_type: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    created_at: DateTime<Utc>,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Entity {
    /// Build a freshly created record: `createdAt == updatedAt == now`.
    pub fn create(id: EntityId, data: EntityFormData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            cpf: data.cpf,
            rg: data.rg,
            entity_type: data.entity_type,
            active: data.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the writable fields and refresh `updatedAt`.
    ///
    /// `id` and `createdAt` are untouched. `updatedAt` never moves backwards,
    /// even if the clock does.
    pub fn apply_update(&mut self, data: EntityFormData, now: DateTime<Utc>) {
        self.cpf = data.cpf;
        self.rg = data.rg;
        self.entity_type = data.entity_type;
        self.active = data.active;
        self.updated_at = now.max(self.updated_at);
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn rg(&self) -> &str {
        &self.rg
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Writable fields, e.g. to prefill an edit form.
    pub fn form_data(&self) -> EntityFormData {
        EntityFormData {
            cpf: self.cpf.clone(),
            rg: self.rg.clone(),
            entity_type: self.entity_type.clone(),
            active: self.active,
        }
    }
}

impl Identified for Entity {
    type Id = EntityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
