//! Current-user session threaded explicitly through calls.
//!
//! # Design
//! The logged-in user is not ambient global state: callers construct a
//! [`Session`] over a [`SessionStore`] and pass it where it is needed. The
//! store persists the user as a JSON string under the single fixed key
//! `"currentUser"`, which keeps the layout compatible with the key-value
//! storage the front-ends used. A corrupt stored value reads back as
//! "nobody logged in" rather than an error.

use std::collections::HashMap;

use crate::error::ApiError;
use crate::types::User;

/// Storage key for the serialized current user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Minimal string key-value persistence for session data.
pub trait SessionStore {
    fn set(&mut self, key: &str, value: String);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&mut self, key: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

/// In-process store, used standalone and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The current-user session over some store.
#[derive(Debug, Default)]
pub struct Session<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&mut self, user: &User) -> Result<(), ApiError> {
        let json =
            serde_json::to_string(user).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.store.set(CURRENT_USER_KEY, json);
        Ok(())
    }

    /// The logged-in user, or `None` when nothing (or garbage) is stored.
    pub fn current(&self) -> Option<User> {
        let json = self.store.get(CURRENT_USER_KEY)?;
        serde_json::from_str(&json).ok()
    }

    pub fn clear(&mut self) {
        self.store.remove(CURRENT_USER_KEY);
    }
}
