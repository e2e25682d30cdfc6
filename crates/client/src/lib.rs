//! `gatehouse-client`
//!
//! **Responsibility:** the client-side entity state layer.
//!
//! This crate provides:
//! - [`EntityStateManager`]: reactive `{ entities, loading, error }` state over
//!   the storage gateway
//! - [`EntityForm`]: the create/edit form boundary (validation before any
//!   storage call)
//! - [`ClientConfig`] and [`bootstrap`]: environment-driven wiring of tracing
//!   and the storage backend
//!
//! Rendering is out of scope; a UI layer subscribes to state snapshots.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod form;
pub mod manager;
pub mod state;

pub use bootstrap::{bootstrap, open_store};
pub use config::{ClientConfig, StorageBackend};
pub use error::{ClientError, Operation};
pub use form::{EntityForm, FormMode};
pub use manager::EntityStateManager;
pub use state::EntityState;
