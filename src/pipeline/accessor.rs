//! Dotted-path field resolution over user records.
//!
//! Sorting and the organization filter both address fields by path (`"name"`,
//! `"company.name"`). Modelled fields are read directly; any other path is walked
//! through the preserved JSON fields in [`User::extra`], so `"address.city"` works for
//! backends that send an address.

use crate::domain::{User, UserId};
use serde_json::Value;
use std::cmp::Ordering;

/// A resolved field value.
///
/// Missing values resolve to the empty-text sentinel ([`FieldValue::empty`]).
///
/// # Ordering
///
/// The order is total so it can drive a stable sort:
///
/// 1. the empty sentinel sorts first,
/// 2. then numbers, compared numerically,
/// 3. then non-empty text, compared ordinally by bytes (no locale rules, case
///    sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// String rendering, as used by text matching.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Text(s) if s.is_empty() => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }

    fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => Self::empty(),
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Resolves `path` against `user`.
///
/// `company.*` and `organization.*` are aliases for the nested organization. Never
/// panics; absent or null segments yield [`FieldValue::empty`].
///
/// # Examples
///
/// ```
/// use userdeck::domain::{Organization, User, UserId, UserInput};
/// use userdeck::pipeline::accessor::{resolve, FieldValue};
///
/// let mut user = User::from_input(UserId::Number(5), &UserInput::default());
/// assert_eq!(resolve(&user, "organization.name"), FieldValue::empty());
///
/// user.organization = Some(Organization::named("Acme"));
/// assert_eq!(resolve(&user, "company.name"), FieldValue::Text("Acme".into()));
/// assert_eq!(resolve(&user, "id"), FieldValue::Number(5));
/// ```
#[must_use]
pub fn resolve(user: &User, path: &str) -> FieldValue {
    let mut segments = path.split('.');
    let head = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();

    match (head, rest.as_slice()) {
        ("id", []) => match &user.id {
            UserId::Number(n) => FieldValue::Number(*n),
            UserId::Text(s) => FieldValue::text(s),
        },
        ("name", []) => FieldValue::text(&user.name),
        ("username", []) => FieldValue::text(&user.username),
        ("email", []) => FieldValue::text(&user.email),
        ("phone", []) => FieldValue::text(&user.phone),
        ("website", []) => FieldValue::text(&user.website),
        ("company" | "organization", [field]) => user
            .organization
            .as_ref()
            .and_then(|org| match *field {
                "name" => Some(org.name.as_str()),
                "catchPhrase" => org.catch_phrase.as_deref(),
                "bs" => org.bs.as_deref(),
                _ => None,
            })
            .map_or_else(FieldValue::empty, FieldValue::text),
        ("company" | "organization", _) => FieldValue::empty(),
        _ => user
            .extra
            .get(head)
            .and_then(|value| rest.iter().try_fold(value, |current, key| current.get(*key)))
            .map_or_else(FieldValue::empty, FieldValue::from_json),
    }
}
