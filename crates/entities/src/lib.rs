//! Entities domain module (people and organizations subject to access control).
//!
//! This crate contains the record shape, the writable form payload and its
//! validation rules, and in-memory filtering. No IO, no storage.

pub mod entity;
pub mod filter;
pub mod form;
mod timestamp;

pub use entity::Entity;
pub use filter::EntityFilter;
pub use form::{CPF_MAX_LEN, EntityFormData, RG_MAX_LEN, TYPE_MAX_LEN};
