use serde::{Deserialize, Serialize};

use gatehouse_core::{DomainError, DomainResult, ValueObject};

/// Upper bound for `cpf`, in characters (formatted `000.000.000-00`).
pub const CPF_MAX_LEN: usize = 14;
/// Upper bound for `rg`, in characters.
pub const RG_MAX_LEN: usize = 9;
/// Upper bound for `type`, in characters.
pub const TYPE_MAX_LEN: usize = 255;

/// Writable subset of an [`Entity`](crate::Entity): everything except
/// `id`, `createdAt` and `updatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityFormData {
    pub cpf: String,
    pub rg: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for EntityFormData {
    fn default() -> Self {
        Self {
            cpf: String::new(),
            rg: String::new(),
            entity_type: String::new(),
            active: true,
        }
    }
}

impl ValueObject for EntityFormData {}

impl EntityFormData {
    /// Active entity with the given identification fields.
    pub fn new(
        cpf: impl Into<String>,
        rg: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            cpf: cpf.into(),
            rg: rg.into(),
            entity_type: entity_type.into(),
            active: true,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check required fields and length bounds.
    ///
    /// Presence means non-blank after trimming. No format rules are applied to
    /// `cpf` or `rg`; duplicates across records are allowed.
    pub fn validate(&self) -> DomainResult<()> {
        require("cpf", &self.cpf, CPF_MAX_LEN)?;
        require("rg", &self.rg, RG_MAX_LEN)?;
        require("type", &self.entity_type, TYPE_MAX_LEN)?;
        Ok(())
    }
}

fn require(field: &str, value: &str, max_len: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max_len} characters (got {len})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor() -> EntityFormData {
        EntityFormData::new("123.456.789-00", "12345678", "Visitor")
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(visitor().validate(), Ok(()));
    }

    #[test]
    fn empty_cpf_is_rejected_first() {
        let form = EntityFormData {
            cpf: String::new(),
            rg: String::new(),
            ..visitor()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.inline_message(), "cpf is required");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let form = EntityFormData {
            rg: "   ".to_string(),
            ..visitor()
        };
        assert_eq!(
            form.validate(),
            Err(DomainError::validation("rg is required"))
        );

        let form = EntityFormData {
            entity_type: "\t".to_string(),
            ..visitor()
        };
        assert_eq!(
            form.validate(),
            Err(DomainError::validation("type is required"))
        );
    }

    #[test]
    fn length_bounds_are_enforced_in_characters() {
        let form = EntityFormData {
            rg: "1234567890".to_string(),
            ..visitor()
        };
        assert!(matches!(form.validate(), Err(DomainError::Validation(_))));

        // Multi-byte characters count once.
        let form = EntityFormData {
            rg: "ÁÉÍÓÚÃÕÇ9".to_string(),
            ..visitor()
        };
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn active_defaults_to_true() {
        assert!(EntityFormData::default().active);
        let parsed: EntityFormData =
            serde_json::from_str(r#"{"cpf":"1","rg":"2","type":"Staff"}"#).unwrap();
        assert!(parsed.active);
        assert_eq!(parsed.entity_type, "Staff");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: any non-blank input within bounds validates.
            #[test]
            fn in_bounds_input_is_valid(
                cpf in "[0-9.\\-]{1,14}",
                rg in "[0-9A-Z]{1,9}",
                entity_type in "[A-Za-z][A-Za-z ]{0,254}",
                active in any::<bool>(),
            ) {
                let form = EntityFormData { cpf, rg, entity_type, active };
                prop_assert_eq!(form.validate(), Ok(()));
            }

            /// Property: an over-long cpf never validates.
            #[test]
            fn over_long_cpf_is_invalid(cpf in "[0-9]{15,40}") {
                let form = EntityFormData { cpf, ..EntityFormData::new("x", "1", "Visitor") };
                prop_assert!(form.validate().is_err());
            }
        }
    }
}
