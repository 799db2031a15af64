use serde::{Deserialize, Serialize};

use crate::record::{require, trim_in_place};
use crate::{Collection, Document, EntityId, Record, Result};

/// A spare part held in stock.
///
/// `qty` is not range-checked: a negative or fractional quantity entered by
/// the user is stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qty: f64,
    /// Unit cost, in euros.
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub location: String,
}

impl Part {
    pub fn new(name: impl Into<String>, qty: f64) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            qty,
            cost: 0.0,
            supplier_id: String::new(),
            location: String::new(),
        }
    }

    pub fn supplier_ref(&self) -> Option<&str> {
        Some(self.supplier_id.as_str()).filter(|id| !id.is_empty())
    }
}

impl Record for Part {
    const COLLECTION: Collection = Collection::Parts;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.supplier_id);
        trim_in_place(&mut self.location);
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "part", "name")
    }

    fn collection(document: &Document) -> &[Self] {
        &document.parts
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_quantity_is_accepted() {
        let part = Part::new("Courroie", -4.0);
        assert!(part.validate().is_ok());
    }

    #[test]
    fn quantity_defaults_to_zero() {
        let part: Part = serde_json::from_str(r#"{"id":"p1","name":"Filtre"}"#).unwrap();
        assert_eq!(part.qty, 0.0);
        assert_eq!(part.cost, 0.0);
        assert_eq!(part.supplier_ref(), None);
    }

    #[test]
    fn fractional_quantity_is_kept() {
        let part: Part =
            serde_json::from_str(r#"{"id":"p1","name":"Huile","qty":2.5}"#).unwrap();
        assert_eq!(part.qty, 2.5);
        assert_eq!(serde_json::to_value(&part).unwrap()["qty"], 2.5);
    }
}
