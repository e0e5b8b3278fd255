//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. An
/// `Email` is a value object; an `Identity` (which carries an id) is an entity.
///
/// Implementors validate on construction, so holding one is proof that the
/// value is well-formed.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
