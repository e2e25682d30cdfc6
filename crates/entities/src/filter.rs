use serde::{Deserialize, Serialize};

use gatehouse_core::ValueObject;

use crate::entity::Entity;

/// In-memory filter for entity tables.
///
/// Linear scan only; there is no index behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFilter {
    /// Case-insensitive substring matched against `cpf`, `rg` and `type`.
    pub query: Option<String>,
    /// Restrict to active (`Some(true)`) or inactive (`Some(false)`) records.
    pub active: Option<bool>,
}

impl ValueObject for EntityFilter {}

impl EntityFilter {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            active: None,
        }
    }

    pub fn only_active(mut self) -> Self {
        self.active = Some(true);
        self
    }

    pub fn only_inactive(mut self) -> Self {
        self.active = Some(false);
        self
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(active) = self.active {
            if entity.is_active() != active {
                return false;
            }
        }

        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let needle = query.to_lowercase();
                [entity.cpf(), entity.rg(), entity.entity_type()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    /// Borrowing filter over a slice, preserving order.
    pub fn apply<'a>(
        &'a self,
        entities: &'a [Entity],
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        entities.iter().filter(move |e| self.matches(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::EntityFormData;
    use chrono::Utc;

    fn entity(id: &str, cpf: &str, rg: &str, kind: &str, active: bool) -> Entity {
        Entity::create(
            id.parse().unwrap(),
            EntityFormData::new(cpf, rg, kind).with_active(active),
            Utc::now(),
        )
    }

    fn sample() -> Vec<Entity> {
        vec![
            entity("a", "111.111.111-11", "1111111", "Visitor", true),
            entity("b", "222.222.222-22", "2222222", "Employee", true),
            entity("c", "333.333.333-33", "3333333", "visitor", false),
        ]
    }

    fn ids<'a>(it: impl Iterator<Item = &'a Entity>) -> Vec<&'a str> {
        use gatehouse_core::Identified;
        it.map(|e| e.id().as_str()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let all = sample();
        assert_eq!(ids(EntityFilter::default().apply(&all)), vec!["a", "b", "c"]);
        assert_eq!(ids(EntityFilter::search("  ").apply(&all)), vec!["a", "b", "c"]);
    }

    #[test]
    fn query_matches_any_field_case_insensitively() {
        let all = sample();
        assert_eq!(ids(EntityFilter::search("VISITOR").apply(&all)), vec!["a", "c"]);
        assert_eq!(ids(EntityFilter::search("222.222").apply(&all)), vec!["b"]);
        assert_eq!(ids(EntityFilter::search("3333333").apply(&all)), vec!["c"]);
    }

    #[test]
    fn active_predicate_is_combined_with_query() {
        let all = sample();
        assert_eq!(
            ids(EntityFilter::search("visitor").only_active().apply(&all)),
            vec!["a"]
        );
        assert_eq!(
            ids(EntityFilter::default().only_inactive().apply(&all)),
            vec!["c"]
        );
    }
}
