//! Domain layer for the userdeck dashboard.
//!
//! Core types shared by every other layer, independent of the terminal, the HTTP
//! client and the async runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: User record, identifier and create/update payload
//! - [`validation`]: Field-level validation of form input
//!
//! # Examples
//!
//! ```
//! use userdeck::domain::{User, UserId, UserInput, validate_user_input};
//!
//! let input = UserInput {
//!     name: "Ada Lovelace".to_string(),
//!     email: "ada@example.com".to_string(),
//!     phone: "555-0101".to_string(),
//!     website: "ada.dev".to_string(),
//!     ..UserInput::default()
//! };
//! assert!(validate_user_input(&input).is_empty());
//! let user = User::from_input(UserId::Number(1), &input);
//! assert_eq!(user.email, "ada@example.com");
//! ```

pub mod error;
pub mod user;
pub mod validation;

pub use error::{DirectoryError, Result};
pub use user::{Organization, User, UserId, UserInput};
pub use validation::{validate_user_input, FieldErrors};
