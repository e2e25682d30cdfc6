use thiserror::Error;

use gatehouse_core::DomainError;
use gatehouse_storage::GatewayError;

/// Client-side operation, used to pick the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Generic message for the dismissible alert.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Load => "could not load entities",
            Operation::Create | Operation::Update => "could not save entity",
            Operation::Delete => "could not delete entity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Form input rejected before reaching storage.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Storage gateway failure.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Gateway(GatewayError::NotFound(_)))
    }
}
