//! The store: single owner of the in-memory document.

use gmao_model::{Collection, Document, Record, Upserted};

use crate::backend::Backend;
use crate::error::{Result, StoreError};
use crate::exchange::parse_import;
use crate::guard::check_delete;

/// Fixed key under which the whole document is persisted.
pub const STORAGE_KEY: &str = "gmao_v1_data";

/// Read the persisted document.
///
/// Never fails: an absent key, an unreadable backend or an unparsable value
/// all yield a fresh empty document.
pub fn load_document<B: Backend>(backend: &B) -> Document {
    match backend.get(STORAGE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Document>(&raw) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(%error, "stored document is corrupt, starting empty");
                Document::empty()
            }
        },
        Ok(None) => Document::empty(),
        Err(error) => {
            tracing::warn!(%error, "could not read stored document, starting empty");
            Document::empty()
        }
    }
}

/// Owns the document and persists it whole after every mutation.
#[derive(Debug)]
pub struct Store<B: Backend> {
    backend: B,
    document: Document,
}

impl<B: Backend> Store<B> {
    /// Open a store, loading whatever the backend holds.
    pub fn open(backend: B) -> Self {
        let document = load_document(&backend);
        tracing::debug!(
            suppliers = document.suppliers.len(),
            machines = document.machines.len(),
            parts = document.parts.len(),
            interventions = document.interventions.len(),
            "loaded document"
        );
        Self { backend, document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Re-read the document from the backend, dropping in-memory state.
    pub fn load(&mut self) -> &Document {
        self.document = load_document(&self.backend);
        &self.document
    }

    /// Stamp the metadata and write the full document.
    pub fn save(&mut self) -> Result<()> {
        self.document.meta.touch();
        let raw = serde_json::to_string(&self.document)
            .map_err(|source| StoreError::Serialization { source })?;
        self.backend.set(STORAGE_KEY, &raw)?;
        tracing::info!(updated_at = %self.document.meta.updated_at, "saved document");
        Ok(())
    }

    /// Insert or replace a record by id, then save.
    ///
    /// Text fields are trimmed first. A record missing a required field is
    /// rejected and nothing is written.
    pub fn upsert<R: Record>(&mut self, mut record: R) -> Result<Upserted> {
        record.normalize();
        if let Err(error) = record.validate() {
            tracing::warn!(collection = %R::COLLECTION, %error, "record rejected");
            return Err(error.into());
        }
        let id = record.id().to_string();
        let outcome = self.document.upsert(record);
        tracing::info!(collection = %R::COLLECTION, %id, ?outcome, "upserted record");
        self.save()?;
        Ok(outcome)
    }

    /// Filter `id` out of a collection, then save. No integrity check.
    pub fn remove(&mut self, collection: Collection, id: &str) -> Result<bool> {
        let removed = self.document.remove(collection, id);
        tracing::info!(%collection, %id, removed, "removed record");
        self.save()?;
        Ok(removed)
    }

    /// Remove a record after the integrity guard allows it.
    ///
    /// A blocked delete leaves the document untouched and writes nothing.
    pub fn delete(&mut self, collection: Collection, id: &str) -> Result<bool> {
        if let Err(blocked) = check_delete(&self.document, collection, id) {
            tracing::warn!(%collection, %id, "delete blocked by references");
            return Err(blocked.into());
        }
        self.remove(collection, id)
    }

    /// Erase the persisted key and fall back to an empty document.
    pub fn reset(&mut self) -> Result<()> {
        self.backend.remove(STORAGE_KEY)?;
        self.load();
        tracing::info!("store reset");
        Ok(())
    }

    /// Install a complete document as current state, then save.
    pub fn replace_all(&mut self, document: Document) -> Result<()> {
        self.document = document;
        self.save()
    }

    /// Validate an exported file and install it. On failure the current
    /// document is kept as is.
    pub fn import(&mut self, text: &str) -> Result<()> {
        let document = match parse_import(text) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(%error, "import rejected");
                return Err(error.into());
            }
        };
        self.replace_all(document)?;
        tracing::info!(
            suppliers = self.document.suppliers.len(),
            machines = self.document.machines.len(),
            parts = self.document.parts.len(),
            interventions = self.document.interventions.len(),
            "import complete"
        );
        Ok(())
    }

    /// Look up a record by id.
    pub fn get<R: Record>(&self, id: &str) -> Result<&R> {
        self.document
            .get::<R>(id)
            .ok_or_else(|| StoreError::NotFound {
                collection: R::COLLECTION,
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use gmao_model::{Machine, ModelError, Part, Supplier};

    fn store() -> Store<MemoryBackend> {
        Store::open(MemoryBackend::new())
    }

    #[test]
    fn absent_key_loads_empty_document() {
        let store = store();
        assert!(store.document().is_empty());
        assert_eq!(store.document().meta.version, 1);
    }

    #[test]
    fn corrupt_value_loads_empty_document() {
        let store = Store::open(MemoryBackend::with_entry(STORAGE_KEY, "{ broken"));
        assert!(store.document().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty_document() {
        let store = Store::open(MemoryBackend::with_entry(
            STORAGE_KEY,
            r#"{"suppliers": 42}"#,
        ));
        assert!(store.document().is_empty());
    }

    #[test]
    fn upsert_persists_whole_document() {
        let mut store = store();
        store.upsert(Supplier::new("Würth")).unwrap();

        let raw = store.backend().raw(STORAGE_KEY).expect("persisted");
        let stored: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(stored.suppliers.len(), 1);
        assert_eq!(stored.meta.version, 1);
    }

    #[test]
    fn invalid_record_writes_nothing() {
        let mut store = store();
        let err = store.upsert(Machine::new("Tour", "  ")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ModelError::MissingField { field: "ident", .. })
        ));
        assert!(store.document().machines.is_empty());
        assert!(store.backend().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn upsert_trims_text_fields() {
        let mut store = store();
        let supplier = Supplier::new("  Würth  ");
        let id = supplier.id.to_string();
        store.upsert(supplier).unwrap();
        assert_eq!(store.get::<Supplier>(&id).unwrap().name, "Würth");
    }

    #[test]
    fn save_overwrites_version_and_refreshes_timestamp() {
        let mut store = Store::open(MemoryBackend::with_entry(
            STORAGE_KEY,
            r#"{"suppliers":[],"machines":[],"parts":[],"interventions":[],
               "meta":{"version":7,"updatedAt":"2000-01-01T00:00:00.000Z"}}"#,
        ));
        assert_eq!(store.document().meta.version, 7);

        store.save().unwrap();
        assert_eq!(store.document().meta.version, 1);
        assert_ne!(store.document().meta.updated_at, "2000-01-01T00:00:00.000Z");
    }

    #[test]
    fn blocked_delete_leaves_state_unchanged() {
        let mut store = store();
        let supplier = Supplier::new("Würth");
        let supplier_id = supplier.id.to_string();
        let mut part = Part::new("Courroie", 2.0);
        part.supplier_id = supplier_id.clone();
        store.upsert(supplier).unwrap();
        store.upsert(part).unwrap();
        let before = store.document().clone();

        let err = store.delete(Collection::Suppliers, &supplier_id).unwrap_err();
        assert!(matches!(err, StoreError::DeleteBlocked(_)));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn unguarded_remove_filters_the_id() {
        let mut store = store();
        let part = Part::new("Courroie", 2.0);
        let id = part.id.to_string();
        store.upsert(part).unwrap();
        assert!(store.remove(Collection::Parts, &id).unwrap());
        assert!(!store.remove(Collection::Parts, &id).unwrap());
    }

    #[test]
    fn reset_erases_the_key() {
        let mut store = store();
        store.upsert(Supplier::new("Würth")).unwrap();
        store.reset().unwrap();
        assert!(store.document().is_empty());
        assert!(store.backend().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn failed_import_keeps_current_document() {
        let mut store = store();
        store.upsert(Supplier::new("Würth")).unwrap();
        let before = store.document().clone();

        assert!(store.import(r#"{"suppliers":[]}"#).is_err());
        assert!(store.import("not json").is_err());
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn get_reports_missing_ids() {
        let store = store();
        assert!(matches!(
            store.get::<Machine>("nope"),
            Err(StoreError::NotFound {
                collection: Collection::Machines,
                ..
            })
        ));
    }
}
