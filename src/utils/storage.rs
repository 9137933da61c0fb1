// ============================================================================
// STORAGE - Almacenamiento durable clave/valor (localStorage o memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage no disponible: {0}")]
    Unavailable(String),
    #[error("error escribiendo '{key}' en storage: {reason}")]
    Write { key: String, reason: String },
    #[error("error leyendo '{key}' de storage: {reason}")]
    Read { key: String, reason: String },
    #[error("error eliminando '{key}' de storage: {reason}")]
    Remove { key: String, reason: String },
}

/// Almacenamiento síncrono de strings, con alcance del navegador
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// localStorage del navegador vía web-sys
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// Falla si no hay `window` (fuera del navegador) o si el storage está deshabilitado
    pub fn open() -> Result<Self, StorageError> {
        // Las llamadas a web-sys solo existen en wasm32
        if !cfg!(target_arch = "wasm32") {
            return Err(StorageError::Unavailable("fuera del navegador".to_string()));
        }

        let window = window()
            .ok_or_else(|| StorageError::Unavailable("no hay window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage deshabilitado".to_string()))?;
        Ok(Self { storage })
    }
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // QuotaExceededError llega por aquí
        self.storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|e| StorageError::Remove {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// Storage en memoria. Los clones comparten el mismo mapa.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// localStorage si está disponible; si no, memoria (solo dura el proceso)
pub fn browser_or_memory_storage() -> Rc<dyn SessionStorage> {
    match BrowserStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] {}, usando storage en memoria", e);
            Rc::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("username").unwrap(), None);

        storage.set_item("username", "alice").unwrap();
        assert_eq!(storage.get_item("username").unwrap().as_deref(), Some("alice"));

        storage.remove_item("username").unwrap();
        assert_eq!(storage.get_item("username").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_clones_share_items() {
        let storage = MemoryStorage::with_item("username", "bob");
        let other = storage.clone();
        other.set_item("theme", "dark").unwrap();

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_browser_storage_unavailable_outside_wasm() {
        assert!(matches!(
            BrowserStorage::open(),
            Err(StorageError::Unavailable(_))
        ));

        let fallback = browser_or_memory_storage();
        fallback.set_item("username", "carol").unwrap();
        assert_eq!(fallback.get_item("username").unwrap().as_deref(), Some("carol"));
    }

    #[test]
    fn test_removing_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("missing").is_ok());
    }
}
