//! Local validation of user form input.
//!
//! Runs before any gateway call is issued. Failures are reported per field so the form
//! can render each message next to the offending input.

use super::user::UserInput;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name to message, ordered by field name for stable rendering.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Validates a create/update payload.
///
/// Name, email, phone and website are required (blank after trimming counts as
/// missing). A present email must look like `local@domain.tld`.
///
/// # Examples
///
/// ```
/// use userdeck::domain::{validate_user_input, UserInput};
///
/// let errors = validate_user_input(&UserInput::default());
/// assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
/// assert_eq!(errors.len(), 4);
/// ```
#[must_use]
pub fn validate_user_input(input: &UserInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if input.name.trim().is_empty() {
        errors.insert("name", "Name is required".to_string());
    }

    if input.email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !is_plausible_email(&input.email) {
        errors.insert("email", "Email is invalid".to_string());
    }

    if input.phone.trim().is_empty() {
        errors.insert("phone", "Phone is required".to_string());
    }

    if input.website.trim().is_empty() {
        errors.insert("website", "Website is required".to_string());
    }

    errors
}

/// An address somewhere in the text: non-blank runs around `@` and a later `.`.
const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn is_plausible_email(text: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}
