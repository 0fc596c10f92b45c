//! Stable identifiers for diagram elements.
//!
//! Every entity, member and relationship receives an id from a [`Sequence`]
//! owned by the model that created it. Ids are never reused, so an id that
//! outlives its element can only ever resolve to "not found".

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw sequence value.
            pub fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw sequence value.
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a class, interface or package.
    ///
    /// # Examples
    ///
    /// ```
    /// use umbra_core::identifier::EntityId;
    ///
    /// let id = EntityId::new(3);
    /// assert_eq!(id.to_string(), "entity#3");
    /// ```
    EntityId,
    "entity"
);

define_id!(
    /// Identifier of an attribute or operation within an entity.
    MemberId,
    "member"
);

define_id!(
    /// Identifier of a relationship edge.
    RelationshipId,
    "relationship"
);

/// Monotonic allocator for raw id values.
///
/// Values start at 1 and increase by one per allocation. Since relationship
/// ids are allocated from a single sequence, sorting them reproduces
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    last: u32,
}

impl Sequence {
    /// Creates a fresh sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next raw value.
    pub fn next_raw(&mut self) -> u32 {
        self.last += 1;
        self.last
    }

    /// Allocates the next entity id.
    pub fn next_entity(&mut self) -> EntityId {
        EntityId::new(self.next_raw())
    }

    /// Allocates the next member id.
    pub fn next_member(&mut self) -> MemberId {
        MemberId::new(self.next_raw())
    }

    /// Allocates the next relationship id.
    pub fn next_relationship(&mut self) -> RelationshipId {
        RelationshipId::new(self.next_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_prefix() {
        assert_eq!(EntityId::new(1).to_string(), "entity#1");
        assert_eq!(MemberId::new(7).to_string(), "member#7");
        assert_eq!(RelationshipId::new(42).to_string(), "relationship#42");
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let mut seq = Sequence::new();
        let first = seq.next_entity();
        let second = seq.next_entity();
        let third = seq.next_entity();

        assert_eq!(first.raw(), 1);
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_sequence_shared_across_kinds_never_repeats() {
        let mut seq = Sequence::new();
        let entity = seq.next_entity();
        let member = seq.next_member();
        let relationship = seq.next_relationship();

        assert_ne!(entity.raw(), member.raw());
        assert_ne!(member.raw(), relationship.raw());
    }

    #[test]
    fn test_ids_compare_by_raw_value() {
        assert_eq!(EntityId::new(5), EntityId::new(5));
        assert_ne!(EntityId::new(5), EntityId::new(6));
        assert!(RelationshipId::new(2) < RelationshipId::new(10));
    }
}
