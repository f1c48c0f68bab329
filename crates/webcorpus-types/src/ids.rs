use std::fmt;

/// Opaque, display-friendly identifier assigned to a document during indexing.
///
/// Built from the entry's filename stem plus a random 4-digit suffix (see
/// `webcorpus-index`'s document-id assignment); stability is per-build, not
/// cross-run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct DocId(String);

impl DocId {
    /// Wrap a raw string as a `DocId` without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the `DocId`, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for DocId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
