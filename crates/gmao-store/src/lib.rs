//! Local document store for the GMAO maintenance-management tool.
//!
//! Every record lives in one [`gmao_model::Document`]. The [`Store`] owns
//! it, loads it once at startup, and writes it back whole after each
//! mutation.
//!
//! # Features
//!
//! - **Whole-document persistence** under a single key
//! - **Atomic writes** to prevent data corruption ([`FileBackend`])
//! - **Silent recovery** from a corrupt stored document (empty dataset)
//! - **Integrity guard** refusing deletes of referenced suppliers/machines
//! - **JSON import/export** with structural validation
//!
//! # Example
//!
//! ```ignore
//! use gmao_model::Supplier;
//! use gmao_store::{FileBackend, Store};
//!
//! let mut store = Store::open(FileBackend::new("/path/to/data"));
//! store.upsert(Supplier::new("Würth"))?;
//! ```
//!
//! # Architecture
//!
//! - `backend/` - Key-value backends (file, memory)
//! - `store.rs` - Load/save/upsert/remove/reset/replace
//! - `guard.rs` - Referential-integrity predicates
//! - `exchange.rs` - Export and import of documents
//! - `views.rs` - Derived lists and dashboard figures
//! - `error.rs` - Error types with user-friendly messages

mod backend;
mod error;
pub mod exchange;
pub mod guard;
mod store;
pub mod views;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::{Result, StoreError};
pub use exchange::{ImportError, export_file_name, export_json, parse_import};
pub use guard::{DeleteBlocked, can_delete_machine, can_delete_supplier, check_delete};
pub use store::{STORAGE_KEY, Store, load_document};
