use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ModelError;

/// Identifier of a record within its collection.
///
/// Fresh identifiers are UUID v4 strings. Identifiers read back from storage
/// or from an imported file are kept verbatim, whatever scheme produced them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh, practically unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_differ() {
        let first = EntityId::generate();
        let second = EntityId::generate();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
    }

    #[test]
    fn new_trims_and_rejects_blank() {
        assert_eq!(EntityId::new("  abc ").unwrap().as_str(), "abc");
        assert!(matches!(
            EntityId::new("   "),
            Err(ModelError::InvalidId(_))
        ));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntityId::new("18c3f0a2b1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"18c3f0a2b1\"");
        let back: EntityId = serde_json::from_str("\"18c3f0a2b1\"").unwrap();
        assert_eq!(back, id);
    }
}
