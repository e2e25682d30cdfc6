//! Identity trait: records that keep the same identity across mutations.

/// Identity marker + minimal interface.
pub trait Identified {
    /// Identifier type. Immutable once assigned.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the record identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this record carries the given identifier.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
