//! Cart Storage Module
//!
//! Key/value persistence for the cart snapshot. The snapshot lives under the
//! `cartItems` key as a JSON array of cart rows, the same layout the browser
//! keeps in localStorage.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use crate::cart::item::CartItem;
use crate::error::{CartError, CartResult};

/// Storage key holding the cart snapshot.
pub const CART_STORAGE_KEY: &str = "cartItems";

// == Storage Trait ==
/// String key/value store with localStorage semantics.
pub trait KeyValueStorage {
    /// Returns the stored value, or None when the key is absent.
    fn get_item(&self, key: &str) -> CartResult<Option<String>>;
    /// Stores a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> CartResult<()>;
    /// Deletes a key; absent keys are not an error.
    fn remove_item(&mut self, key: &str) -> CartResult<()>;
}

// == Snapshot Helpers ==
/// Reads the cart snapshot.
///
/// A missing key yields an empty list. A corrupt snapshot is logged and
/// treated as empty so a bad write never locks the user out of the cart.
pub fn load_cart<S: KeyValueStorage + ?Sized>(storage: &S) -> CartResult<Vec<CartItem>> {
    let Some(raw) = storage.get_item(CART_STORAGE_KEY)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!("Discarding unreadable cart snapshot: {}", e);
            Ok(Vec::new())
        }
    }
}

/// Writes the full cart snapshot.
pub fn save_cart<S: KeyValueStorage + ?Sized>(storage: &mut S, items: &[CartItem]) -> CartResult<()> {
    let raw = serde_json::to_string(items).map_err(|e| CartError::Storage(e.to_string()))?;
    storage.set_item(CART_STORAGE_KEY, &raw)
}

/// Deletes the cart snapshot.
pub fn clear_cart<S: KeyValueStorage + ?Sized>(storage: &mut S) -> CartResult<()> {
    storage.remove_item(CART_STORAGE_KEY)
}

// == Memory Storage ==
/// In-process storage, used by tests and embedders without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> CartResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> CartResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> CartResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// == File Storage ==
/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for storage, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> CartResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CartError::Storage(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> CartResult<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CartError::Storage(e.to_string())),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> CartResult<()> {
        fs::write(self.path(key), value).map_err(|e| CartError::Storage(e.to_string()))
    }

    fn remove_item(&mut self, key: &str) -> CartResult<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CartError::Storage(e.to_string())),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<CartItem> {
        let mut foo = CartItem::new("Foo", "£19.99", "https://img/foo.jpg");
        foo.quantity = 2;
        vec![foo, CartItem::new("Bar", "£5.00", "")]
    }

    #[test]
    fn test_memory_snapshot_cycle() {
        let mut storage = MemoryStorage::new();
        assert!(load_cart(&storage).unwrap().is_empty());

        save_cart(&mut storage, &items()).unwrap();
        assert_eq!(load_cart(&storage).unwrap(), items());

        clear_cart(&mut storage).unwrap();
        assert!(storage.get_item(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_snapshot_is_json_array() {
        let mut storage = MemoryStorage::new();
        save_cart(&mut storage, &items()).unwrap();

        let raw = storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["title"], "Foo");
        assert_eq!(json[0]["quantity"], 2);
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, "{not json").unwrap();
        assert!(load_cart(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_cycle() {
        let dir = std::env::temp_dir().join(format!("cart-storage-{}", uuid::Uuid::new_v4()));
        let mut storage = FileStorage::new(&dir).unwrap();

        save_cart(&mut storage, &items()).unwrap();
        let reopened = FileStorage::new(&dir).unwrap();
        assert_eq!(load_cart(&reopened).unwrap(), items());

        clear_cart(&mut storage).unwrap();
        clear_cart(&mut storage).unwrap();
        assert!(load_cart(&storage).unwrap().is_empty());

        let _ = fs::remove_dir_all(dir);
    }
}
