//! Reusable contact profile cache.
//!
//! A successful checkout persists the customer's contact fields so the next
//! checkout can prefill them. Plain key-value with last-write-wins
//! semantics; durable storage belongs to an external collaborator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Keys of the profile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Phone,
    Email,
    Address,
}

/// Shared, clone-cheap profile cache.
#[derive(Debug, Clone, Default)]
pub struct ProfileCache {
    inner: Arc<Mutex<HashMap<ProfileField, String>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field value. Later writes win.
    pub fn put(&self, field: ProfileField, value: impl Into<String>) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(field, value.into());
        }
    }

    pub fn get(&self, field: ProfileField) -> Option<String> {
        self.inner.lock().ok().and_then(|map| map.get(&field).cloned())
    }
}
