//! Directory service gateway.
//!
//! The dashboard talks to its backing store only through [`DirectoryGateway`]. Two
//! implementations ship with the crate:
//!
//! - [`HttpGateway`]: a `/users` REST resource over HTTP (the default).
//! - [`InMemoryGateway`]: a seeded in-process collection, used for `--offline` runs
//!   and in tests.
//!
//! Every failure is reported as a [`DirectoryError`](crate::domain::DirectoryError)
//! in one of the gateway categories: network, decode, validation or not found.

pub mod http;
pub mod memory;

pub use http::HttpGateway;
pub use memory::InMemoryGateway;

use crate::domain::{Result, User, UserId, UserInput};
use async_trait::async_trait;

/// Asynchronous CRUD operations against the user directory.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Fetches the whole collection.
    async fn list(&self) -> Result<Vec<User>>;

    /// Fetches one user.
    async fn get(&self, id: &UserId) -> Result<User>;

    /// Creates a user and returns it with its assigned identifier.
    async fn create(&self, input: &UserInput) -> Result<User>;

    /// Replaces the user's fields and returns the stored record.
    async fn update(&self, id: &UserId, input: &UserInput) -> Result<User>;

    /// Deletes a user and returns the deleted identifier.
    async fn delete(&self, id: &UserId) -> Result<UserId>;
}
