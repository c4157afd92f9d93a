//! Value object trait: equality by value, not identity.

/// Marker trait for immutable domain values.
///
/// Two value objects with the same attribute values are the same value;
/// there is no identity to track. "Modifying" one means constructing a
/// new one, which keeps them safe to copy and share.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
