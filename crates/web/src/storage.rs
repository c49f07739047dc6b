//! Client storage and the logged-in user.
//!
//! The login flow (out of this crate) persists the user as a JSON blob under
//! the `user` key. Pages only ever read it.

use std::collections::HashMap;

use billed_core::User;
use thiserror::Error;
use tower_sessions::Session;

/// Storage key holding the serialized [`User`].
pub const USER_KEY: &str = "user";

/// Errors reading client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored user blob is not valid JSON for a [`User`].
    #[error("Invalid user in storage: {0}")]
    InvalidUser(#[from] serde_json::Error),

    /// The HTTP session could not be read.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Persisted key/value client storage.
pub trait ClientStorage: Send + Sync {
    /// Returns the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: String);

    /// Remove the value stored under `key`.
    fn remove_item(&mut self, key: &str);
}

/// In-memory client storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage holding the given user under [`USER_KEY`].
    ///
    /// # Errors
    ///
    /// Returns error if the user cannot be serialized.
    pub fn with_user(user: &User) -> Result<Self, StorageError> {
        let mut storage = Self::new();
        storage.set_item(USER_KEY, serde_json::to_string(user)?);
        Ok(storage)
    }

    /// Snapshot the user blob of an HTTP session.
    ///
    /// # Errors
    ///
    /// Returns error if the session store fails.
    pub async fn from_session(session: &Session) -> Result<Self, StorageError> {
        let mut storage = Self::new();
        if let Some(user) = session.get::<String>(USER_KEY).await? {
            storage.set_item(USER_KEY, user);
        }
        Ok(storage)
    }
}

impl ClientStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Read the logged-in user.
///
/// # Errors
///
/// Returns error if a user blob is present but malformed.
pub fn current_user(storage: &dyn ClientStorage) -> Result<Option<User>, StorageError> {
    storage
        .get_item(USER_KEY)
        .map(|raw| serde_json::from_str::<User>(&raw))
        .transpose()
        .map_err(StorageError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use billed_core::{Email, UserRole};

    #[test]
    fn test_missing_user_is_none() {
        let storage = MemoryStorage::new();
        assert!(current_user(&storage).unwrap().is_none());
    }

    #[test]
    fn test_reads_employee_blob() {
        let mut storage = MemoryStorage::new();
        storage.set_item(USER_KEY, r#"{"type":"Employee"}"#.to_string());

        let user = current_user(&storage).unwrap().unwrap();
        assert_eq!(user.role, UserRole::Employee);
        assert!(user.email.is_none());
    }

    #[test]
    fn test_with_user_roundtrips() {
        let user = User::employee(Email::parse("employee@test.tld").ok());
        let storage = MemoryStorage::with_user(&user).unwrap();
        assert_eq!(current_user(&storage).unwrap(), Some(user));
    }

    #[test]
    fn test_malformed_blob_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(USER_KEY, "not json".to_string());
        assert!(matches!(
            current_user(&storage),
            Err(StorageError::InvalidUser(_))
        ));
    }

    #[test]
    fn test_remove_item() {
        let mut storage = MemoryStorage::new();
        storage.set_item(USER_KEY, r#"{"type":"Admin"}"#.to_string());
        storage.remove_item(USER_KEY);
        assert!(storage.get_item(USER_KEY).is_none());
    }

    #[test]
    fn test_user_written_through_trait_object() {
        let mut backing = MemoryStorage::new();
        let storage: &mut dyn ClientStorage = &mut backing;

        storage.set_item(USER_KEY, r#"{"type":"Employee","email":"a@a"}"#.to_string());
        let user = current_user(storage).unwrap().unwrap();
        assert_eq!(user.email.as_ref().map(Email::as_str), Some("a@a"));

        storage.set_item(USER_KEY, r#"{"type":"Admin"}"#.to_string());
        assert_eq!(current_user(storage).unwrap().unwrap().role, UserRole::Admin);

        storage.remove_item(USER_KEY);
        assert!(current_user(storage).unwrap().is_none());
    }
}
