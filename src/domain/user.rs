//! User domain model.
//!
//! Defines the `User` record held by the directory store, its opaque identifier and
//! the `UserInput` payload sent to the gateway on create and update. The JSON shape
//! follows the common `/users` REST resource: the organization travels under the key
//! `company`, and fields this crate does not model (such as `address`) are kept in
//! [`User::extra`] so an edit round-trips them unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque user identifier assigned by the backing store or by the client.
///
/// Identifiers are either numbers or strings on the wire. They are never derived from
/// other fields and never mutated by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Organization a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(rename = "catchPhrase", default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

impl Organization {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Same organization under a new name; the catch phrase and `bs` are kept.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// A record in the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(rename = "company", default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    /// Fields present in the backend payload that the dashboard does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Builds a record from a create/update payload and an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use userdeck::domain::{User, UserId, UserInput};
    ///
    /// let input = UserInput {
    ///     name: "Ada".into(),
    ///     email: "ada@example.com".into(),
    ///     ..UserInput::default()
    /// };
    /// let user = User::from_input(UserId::Number(1), &input);
    /// assert_eq!(user.name, "Ada");
    /// assert_eq!(user.username, "");
    /// ```
    #[must_use]
    pub fn from_input(id: UserId, input: &UserInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            username: input.username.clone().unwrap_or_default(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            website: input.website.clone(),
            organization: input.organization.clone(),
            extra: input.extra.clone(),
        }
    }

    /// Organization name, or `None` when the user has no organization.
    #[must_use]
    pub fn organization_name(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.name.as_str())
    }
}

/// Payload for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub phone: String,
    pub website: String,
    #[serde(rename = "company", default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    /// Unmodelled fields of the record being edited, sent back as they were read.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl From<&User> for UserInput {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: (!user.username.is_empty()).then(|| user.username.clone()),
            email: user.email.clone(),
            phone: user.phone.clone(),
            website: user.website.clone(),
            organization: user.organization.clone(),
            extra: user.extra.clone(),
        }
    }
}
