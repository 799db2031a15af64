//! Referential-integrity checks run before destructive deletes.
//!
//! Suppliers are referenced by machines and parts; machines are referenced
//! by interventions. Parts and interventions are never referenced, so their
//! deletes are always allowed. Checks are linear scans over the document.

use gmao_model::{Collection, Document};
use thiserror::Error;

/// A delete refused because other records still point at the target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot delete {} {id}: still referenced", .collection.entity())]
pub struct DeleteBlocked {
    pub collection: Collection,
    pub id: String,
    pub machines: usize,
    pub parts: usize,
    pub interventions: usize,
}

impl DeleteBlocked {
    pub fn user_message(&self) -> String {
        match self.collection {
            Collection::Suppliers => {
                "Cannot delete: this supplier is used by a machine or a part.".to_string()
            }
            Collection::Machines => {
                "Cannot delete: this machine is linked to interventions.".to_string()
            }
            _ => format!("Cannot delete this {}.", self.collection.entity()),
        }
    }

    pub fn suggestion(&self) -> String {
        let mut holders = Vec::new();
        if self.machines > 0 {
            holders.push(format!("{} machine(s)", self.machines));
        }
        if self.parts > 0 {
            holders.push(format!("{} part(s)", self.parts));
        }
        if self.interventions > 0 {
            holders.push(format!("{} intervention(s)", self.interventions));
        }
        format!(
            "Reassign or delete the {} referencing it first.",
            holders.join(" and ")
        )
    }
}

/// False iff any machine or part references the supplier.
pub fn can_delete_supplier(document: &Document, id: &str) -> bool {
    !document.machines.iter().any(|m| m.supplier_id == id)
        && !document.parts.iter().any(|p| p.supplier_id == id)
}

/// False iff any intervention references the machine.
pub fn can_delete_machine(document: &Document, id: &str) -> bool {
    !document.interventions.iter().any(|i| i.machine_id == id)
}

/// Check whether `id` may be removed from `collection`.
pub fn check_delete(
    document: &Document,
    collection: Collection,
    id: &str,
) -> Result<(), DeleteBlocked> {
    let allowed = match collection {
        Collection::Suppliers => can_delete_supplier(document, id),
        Collection::Machines => can_delete_machine(document, id),
        Collection::Parts | Collection::Interventions => true,
    };
    if allowed {
        return Ok(());
    }

    let (machines, parts, interventions) = match collection {
        Collection::Suppliers => (
            document.machines.iter().filter(|m| m.supplier_id == id).count(),
            document.parts.iter().filter(|p| p.supplier_id == id).count(),
            0,
        ),
        _ => (
            0,
            0,
            document
                .interventions
                .iter()
                .filter(|i| i.machine_id == id)
                .count(),
        ),
    };
    Err(DeleteBlocked {
        collection,
        id: id.to_string(),
        machines,
        parts,
        interventions,
    })
}
