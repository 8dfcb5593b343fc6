use std::cell::RefCell;

/// Persistent home of the session token.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);
}

/// Browser local storage under a fixed key.
pub struct LocalStorageStore {
    key: &'static str,
}

impl LocalStorageStore {
    /// Returns `None` when the page has no window or storage is disabled.
    pub fn open(key: &'static str) -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(_)) => Some(LocalStorageStore { key }),
            _ => None,
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenStore for LocalStorageStore {
    fn get(&self) -> Option<String> {
        self.storage()?
            .get_item(self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        if let Some(storage) = self.storage() {
            logged(storage.set_item(self.key, token), "persist");
        }
    }

    fn remove(&self) {
        if let Some(storage) = self.storage() {
            logged(storage.remove_item(self.key), "remove");
        }
    }
}

/// Logs a failed storage write. The stored token, not the caller's intent,
/// stays the source of truth for the session state.
fn logged<E>(result: Result<(), E>, action: &str) -> bool {
    let ok = result.is_ok();
    if !ok {
        log::error!("could not {} session token", action);
    }
    ok
}

/// In-memory store. Used when local storage is unavailable, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    token: RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        MemoryStore {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token
            .borrow()
            .clone()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        self.token.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(store.get(), None);
        store.set("abc");
        assert_eq!(store.get().as_deref(), Some("abc"));
        store.remove();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn failed_writes_are_reported() {
        assert!(logged(Ok::<(), ()>(()), "remove"));
        assert!(!logged(Err(()), "remove"));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let store = MemoryStore::with_token("");
        assert_eq!(store.get(), None);
    }
}
