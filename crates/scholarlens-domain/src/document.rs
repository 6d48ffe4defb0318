//! Document identity and the persisted document record

use std::fmt;

/// Identifier for one loaded document, based on UUIDv7
///
/// A fresh id is minted every time a document is loaded, so it doubles as the
/// generation marker of the active corpus: a flow that resolves against a
/// corpus whose id is no longer active belongs to a replaced document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use scholarlens_domain::DocumentId;
    ///
    /// let a = DocumentId::new();
    /// let b = DocumentId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use scholarlens_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// let parsed = DocumentId::parse(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid document id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A document as held by the persistence boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Storage key the document was saved under
    pub id: String,

    /// Original file name
    pub name: String,

    /// Raw document bytes
    pub bytes: Vec<u8>,
}
