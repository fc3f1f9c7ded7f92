use std::collections::HashMap;
use std::sync::Mutex;

/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "token";

/// Key/value credential storage. The browser build backs this with
/// localStorage; native callers and tests use [`MemoryStore`].
pub trait CredentialStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set_item(TOKEN_KEY, token);
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_items() {
        let store = MemoryStore::new();
        assert!(store.get_item(TOKEN_KEY).is_none());

        store.set_item(TOKEN_KEY, "abc");
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("abc"));

        store.remove_item(TOKEN_KEY);
        assert!(store.get_item(TOKEN_KEY).is_none());
    }

    #[test]
    fn with_token_seeds_the_token_key() {
        let store = MemoryStore::with_token("seeded");
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("seeded"));
    }
}
