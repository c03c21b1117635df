pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over a named key-value persistence slot.
///
/// Each key holds one whole serialized value; there are no partial updates.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
    /// Erases `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

pub use json_backend::{write_atomic, JsonFileStore};
pub use memory::MemoryStore;

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
