//! The document root holding every collection.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{Collection, Intervention, Machine, Part, Record, Supplier};

/// Schema tag written into `meta.version` on every save.
pub const SCHEMA_VERSION: u32 = 1;

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default = "schema_version")]
    pub version: u32,
    /// RFC 3339 timestamp of the last persisted write.
    #[serde(default)]
    pub updated_at: String,
}

fn schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            updated_at: timestamp_now(),
        }
    }
}

impl Meta {
    /// Stamp the schema version and the current time.
    pub fn touch(&mut self) {
        self.version = SCHEMA_VERSION;
        self.updated_at = timestamp_now();
    }
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether an upsert appended a record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    Updated,
}

/// All persisted data: four collections plus metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub machines: Vec<Machine>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    #[serde(default)]
    pub meta: Meta,
}

impl Document {
    /// An empty document stamped with the current schema version.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Suppliers => self.suppliers.len(),
            Collection::Machines => self.machines.len(),
            Collection::Parts => self.parts.len(),
            Collection::Interventions => self.interventions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    pub fn get<R: Record>(&self, id: &str) -> Option<&R> {
        R::collection(self).iter().find(|record| record.id() == id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.get::<Supplier>(id)
    }

    pub fn machine(&self, id: &str) -> Option<&Machine> {
        self.get::<Machine>(id)
    }

    /// Replace the record with the same id in place, or append it.
    pub fn upsert<R: Record>(&mut self, record: R) -> Upserted {
        let records = R::collection_mut(self);
        match records.iter().position(|existing| existing.id() == record.id()) {
            Some(index) => {
                records[index] = record;
                Upserted::Updated
            }
            None => {
                records.push(record);
                Upserted::Inserted
            }
        }
    }

    /// Drop every record with the given id. Returns whether anything was removed.
    pub fn remove(&mut self, collection: Collection, id: &str) -> bool {
        let before = self.len(collection);
        match collection {
            Collection::Suppliers => self.suppliers.retain(|r| r.id != id),
            Collection::Machines => self.machines.retain(|r| r.id != id),
            Collection::Parts => self.parts.retain(|r| r.id != id),
            Collection::Interventions => self.interventions.retain(|r| r.id != id),
        }
        self.len(collection) != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_has_version_one() {
        let document = Document::empty();
        assert!(document.is_empty());
        assert_eq!(document.meta.version, 1);
        assert!(document.meta.updated_at.ends_with('Z'));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut document = Document::empty();
        let first = Supplier::new("A");
        let second = Supplier::new("B");
        document.upsert(first.clone());
        document.upsert(second.clone());

        let mut edited = first.clone();
        edited.name = "A2".to_string();
        assert_eq!(document.upsert(edited), Upserted::Updated);
        assert_eq!(document.suppliers.len(), 2);
        assert_eq!(document.suppliers[0].name, "A2");
        assert_eq!(document.suppliers[1].id, second.id);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut document = Document::empty();
        let part = Part::new("Joint", 3.0);
        let id = part.id.to_string();
        document.upsert(part);
        assert!(!document.remove(Collection::Parts, "missing"));
        assert!(document.remove(Collection::Parts, &id));
        assert!(document.parts.is_empty());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let document: Document = serde_json::from_str(r#"{"suppliers":[]}"#).unwrap();
        assert!(document.machines.is_empty());
        assert_eq!(document.meta.version, 1);
    }
}
