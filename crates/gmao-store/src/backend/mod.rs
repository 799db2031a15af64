//! Key-value persistence backends.
//!
//! The store keeps its whole document under a single key, so a backend only
//! needs string get/set/remove.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Local key-value storage area.
pub trait Backend {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Erase `key`. Erasing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
