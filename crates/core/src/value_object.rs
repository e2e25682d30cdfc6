//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Form payloads and filters are value objects: two with the same field values
/// are interchangeable. Records that carry an id implement
/// [`Identified`](crate::Identified) instead.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
