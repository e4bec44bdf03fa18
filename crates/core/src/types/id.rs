//! Newtype ID for type-safe book references.
//!
//! Book identifiers are BSON `ObjectId`s assigned by the storage backend at
//! creation time. On the wire they travel as the 24-character hex encoding,
//! so the newtype serializes to and from plain JSON strings rather than the
//! extended-JSON `{"$oid": ...}` form.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a string is not a valid book identifier.
///
/// The accepted format is whatever the storage backend accepts, i.e. a
/// 24-character hex `ObjectId`.
#[derive(Debug, Error)]
#[error("invalid book id: {0}")]
pub struct ParseBookIdError(#[from] bson::oid::Error);

/// Type-safe identifier for a book record.
///
/// # Example
///
/// ```rust
/// use bookstore_core::BookId;
///
/// let id = BookId::parse("66f21ab07b2d0c34d8f0aa11").expect("valid id");
/// assert_eq!(id.to_string(), "66f21ab07b2d0c34d8f0aa11");
/// assert!(BookId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    /// Mint a fresh identifier.
    ///
    /// Identifiers are assigned by the storage layer, so this is only called
    /// from repository implementations (and from tests that need a
    /// well-formed id that is absent from storage).
    #[must_use]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identifier from its hex representation.
    ///
    /// This is the format check the HTTP layer runs before any storage
    /// lookup: a string the backend would reject is a client error, not a
    /// missing record.
    ///
    /// # Errors
    ///
    /// Returns `ParseBookIdError` if the input is not a 24-character hex
    /// `ObjectId`.
    pub fn parse(s: &str) -> Result<Self, ParseBookIdError> {
        Ok(Self(ObjectId::parse_str(s)?))
    }

    /// Get the underlying `ObjectId`.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }

    /// Hex encoding of the identifier, as it appears on the wire.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl FromStr for BookId {
    type Err = ParseBookIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ObjectId> for BookId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl From<BookId> for ObjectId {
    fn from(id: BookId) -> Self {
        id.0
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::parse(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VALID_HEX: &str = "66f21ab07b2d0c34d8f0aa11";

    #[test]
    fn test_parse_valid_hex() {
        let id = BookId::parse(VALID_HEX).unwrap();
        assert_eq!(id.to_hex(), VALID_HEX);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(BookId::parse("").is_err());
        assert!(BookId::parse("123").is_err());
        assert!(BookId::parse("not-a-book-id").is_err());
        // Right length, non-hex characters
        assert!(BookId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let id = BookId::new();
        let parsed: BookId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        assert_ne!(BookId::new(), BookId::new());
    }

    #[test]
    fn test_object_id_conversions() {
        let oid = ObjectId::new();
        let id = BookId::from(oid);
        assert_eq!(ObjectId::from(id), oid);
        assert_eq!(id.as_object_id(), oid);
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let id = BookId::parse(VALID_HEX).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{VALID_HEX}\""));
    }

    #[test]
    fn test_deserializes_from_hex_string() {
        let json = format!("\"{VALID_HEX}\"");
        let id: BookId = serde_json::from_str(&json).unwrap();
        assert_eq!(id.to_hex(), VALID_HEX);
    }

    #[test]
    fn test_deserialize_rejects_malformed_string() {
        assert!(serde_json::from_str::<BookId>("\"nope\"").is_err());
    }
}
