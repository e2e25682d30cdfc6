//! `gatehouse-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the entity model,
//! the storage gateway and the client state layer (no IO).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::Identified;
pub use error::{DomainError, DomainResult};
pub use id::EntityId;
pub use value_object::ValueObject;
