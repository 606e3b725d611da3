//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "move" a
/// [`Location`](crate::Location) you build a new one; nothing mutates it in place.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
