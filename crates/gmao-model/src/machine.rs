use serde::{Deserialize, Serialize};

use crate::record::{require, trim_in_place};
use crate::{Collection, Document, EntityId, MachineState, ModelError, Record, Result};

/// A piece of equipment under maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Asset tag or serial number.
    #[serde(default)]
    pub ident: String,
    /// Purchase cost, in euros.
    #[serde(default)]
    pub cost: f64,
    /// Supplier id, empty when unset.
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub state: MachineState,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

impl Machine {
    pub fn new(name: impl Into<String>, ident: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name: name.into(),
            ident: ident.into(),
            cost: 0.0,
            supplier_id: String::new(),
            state: MachineState::default(),
            location: String::new(),
            notes: String::new(),
        }
    }

    /// The referenced supplier id, if any.
    pub fn supplier_ref(&self) -> Option<&str> {
        Some(self.supplier_id.as_str()).filter(|id| !id.is_empty())
    }
}

impl Record for Machine {
    const COLLECTION: Collection = Collection::Machines;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.ident);
        trim_in_place(&mut self.supplier_id);
        trim_in_place(&mut self.location);
        trim_in_place(&mut self.notes);
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "machine", "name")?;
        require(&self.ident, "machine", "ident")?;
        if self.cost < 0.0 {
            return Err(ModelError::NegativeValue {
                entity: "machine",
                field: "cost",
            });
        }
        Ok(())
    }

    fn collection(document: &Document) -> &[Self] {
        &document.machines
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.machines
    }
}
