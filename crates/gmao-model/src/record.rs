//! The `Record` trait shared by the four entity types.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Document, EntityId, Result};

/// The four collections held by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Suppliers,
    Machines,
    Parts,
    Interventions,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Suppliers,
        Collection::Machines,
        Collection::Parts,
        Collection::Interventions,
    ];

    /// Key of the collection in the persisted JSON document.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Suppliers => "suppliers",
            Collection::Machines => "machines",
            Collection::Parts => "parts",
            Collection::Interventions => "interventions",
        }
    }

    /// Singular entity name, used in messages.
    pub fn entity(self) -> &'static str {
        match self {
            Collection::Suppliers => "supplier",
            Collection::Machines => "machine",
            Collection::Parts => "part",
            Collection::Interventions => "intervention",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An entity stored in one of the document collections.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &EntityId;

    /// Trim every free-text field in place.
    fn normalize(&mut self);

    /// Check required fields. Call after [`Record::normalize`].
    fn validate(&self) -> Result<()>;

    fn collection(document: &Document) -> &[Self];

    fn collection_mut(document: &mut Document) -> &mut Vec<Self>;
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub(crate) fn require(value: &str, entity: &'static str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(crate::ModelError::MissingField { entity, field });
    }
    Ok(())
}
