use serde::{Deserialize, Serialize};

use crate::record::{require, trim_in_place};
use crate::{Collection, Document, EntityId, Record, Result};

/// A supplier of machines and spare parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

impl Supplier {
    /// Create a supplier with a fresh id and empty contact details.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            contact: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
        }
    }
}

impl Record for Supplier {
    const COLLECTION: Collection = Collection::Suppliers;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.contact);
        trim_in_place(&mut self.email);
        trim_in_place(&mut self.phone);
        trim_in_place(&mut self.website);
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "supplier", "name")
    }

    fn collection(document: &Document) -> &[Self] {
        &document.suppliers
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.suppliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    #[test]
    fn blank_name_is_rejected() {
        let mut supplier = Supplier::new("   ");
        supplier.normalize();
        assert_eq!(
            supplier.validate(),
            Err(ModelError::MissingField {
                entity: "supplier",
                field: "name"
            })
        );
    }

    #[test]
    fn normalize_trims_text() {
        let mut supplier = Supplier::new("  Würth ");
        supplier.email = " contact@wurth.fr\n".to_string();
        supplier.normalize();
        assert_eq!(supplier.name, "Würth");
        assert_eq!(supplier.email, "contact@wurth.fr");
        assert!(supplier.validate().is_ok());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let supplier: Supplier = serde_json::from_str(r#"{"id":"s1","name":"Acme"}"#).unwrap();
        assert_eq!(supplier.contact, "");
        assert_eq!(supplier.website, "");
    }
}
