//! In-process gateway over a seeded collection.
//!
//! Backs `--offline` runs (with the bundled sample directory or a JSON fixture) and
//! the test suite. It behaves like a well-behaved REST backend: it assigns increasing
//! numeric ids, rejects invalid input and reports unknown ids as not found.

use super::DirectoryGateway;
use crate::domain::{validate_user_input, DirectoryError, Result, User, UserId, UserInput};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 25 sample users, bundled into the binary.
const SAMPLE_USERS: &str = include_str!("../../data/sample-users.json");

#[derive(Debug)]
struct Directory {
    users: Vec<User>,
    /// `None` once the largest numeric id has been handed out.
    next_id: Option<i64>,
}

/// [`DirectoryGateway`] over an in-memory collection.
#[derive(Debug)]
pub struct InMemoryGateway {
    directory: Mutex<Directory>,
}

impl InMemoryGateway {
    /// Gateway over `users`. Created users get ids above the largest numeric id.
    ///
    /// # Parameters
    ///
    /// * `users` - Initial collection, in display order
    ///
    /// # Returns
    ///
    /// The gateway. If a seeded id is already `i64::MAX`, it still loads but
    /// [`DirectoryGateway::create`] fails.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|user| match user.id {
                UserId::Number(n) => Some(n),
                UserId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            .checked_add(1);
        if next_id.is_none() {
            tracing::warn!("seeded ids exhaust the numeric range, creating users will fail");
        }

        Self {
            directory: Mutex::new(Directory { users, next_id }),
        }
    }

    /// Gateway seeded with the bundled sample directory.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Decode`] if the bundled data does not parse.
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_USERS)
    }

    /// Gateway seeded from a JSON array of users.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Decode`] if `json` is not an array of users.
    pub fn from_json(json: &str) -> Result<Self> {
        let users: Vec<User> = serde_json::from_str(json)?;
        Ok(Self::new(users))
    }

    /// Gateway seeded from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Io`] if the file cannot be read and
    /// [`DirectoryError::Decode`] if it does not hold an array of users.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = json.len(), "loading fixture");
        Self::from_json(&json)
    }

    fn lock(&self) -> MutexGuard<'_, Directory> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reject_invalid(input: &UserInput) -> Result<()> {
        let errors = validate_user_input(input);
        if errors.is_empty() {
            return Ok(());
        }
        let message = errors.into_values().collect::<Vec<_>>().join(", ");
        Err(DirectoryError::Validation(message))
    }
}

#[async_trait]
impl DirectoryGateway for InMemoryGateway {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.lock().users.clone())
    }

    async fn get(&self, id: &UserId) -> Result<User> {
        self.lock()
            .users
            .iter()
            .find(|user| &user.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    async fn create(&self, input: &UserInput) -> Result<User> {
        Self::reject_invalid(input)?;

        let mut directory = self.lock();
        let Some(next) = directory.next_id else {
            return Err(DirectoryError::Validation("no numeric user ids left".to_string()));
        };
        let id = UserId::Number(next);
        directory.next_id = next.checked_add(1);

        let user = User::from_input(id, input);
        directory.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, input: &UserInput) -> Result<User> {
        Self::reject_invalid(input)?;

        let mut directory = self.lock();
        let slot = directory
            .users
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        let mut updated = User::from_input(id.clone(), input);
        if updated.extra.is_empty() {
            updated.extra = std::mem::take(&mut slot.extra);
        }
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> Result<UserId> {
        let mut directory = self.lock();
        let position = directory
            .users
            .iter()
            .position(|user| &user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        directory.users.remove(position);
        Ok(id.clone())
    }
}
