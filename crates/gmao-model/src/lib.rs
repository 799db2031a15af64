//! Data model for the GMAO maintenance-management tool.
//!
//! Four entity collections (suppliers, machines, parts, interventions) live
//! in a single [`Document`], which is persisted whole by `gmao-store`.

pub mod document;
pub mod enums;
pub mod error;
pub mod ids;
pub mod intervention;
pub mod machine;
pub mod part;
pub mod record;
pub mod supplier;

pub use document::{Document, Meta, SCHEMA_VERSION, Upserted};
pub use enums::{InterventionStatus, MachineState};
pub use error::{ModelError, Result};
pub use ids::EntityId;
pub use intervention::{DATE_FORMAT, Intervention};
pub use machine::Machine;
pub use part::Part;
pub use record::{Collection, Record};
pub use supplier::Supplier;
