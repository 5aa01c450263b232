//! userdeck: a terminal dashboard for a REST-backed user directory.
//!
//! The dashboard lists the users of a `/users` resource and lets you:
//! - Search across every field and narrow by name, email and company
//! - Sort by any column, ascending or descending
//! - Page through results with an adjustable page size
//! - Create, edit, refresh and delete users
//! - Work offline against a bundled or user-supplied data set

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shim (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Store + transitions                              │
//! │  - Event handling / actions                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Pipeline      │   │ Worker Layer  │
//! │ (ui/)         │   │ (pipeline/)   │   │ (worker/)     │
//! │ - Rendering   │   │ - Filter      │   │ - tokio tasks │
//! │ - Theming     │   │ - Sort        │   │ - Gateway I/O │
//! │ - Components  │   │ - Paginate    │   │ - Stale loads │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Gateway (gateway/): HTTP or in-memory              │
//! │  Domain (domain/): User, errors, validation         │
//! │  Infrastructure (infrastructure/): platform paths   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans as JSON lines                │
//! │  - Rotating log files                               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! `~/.config/userdeck/config.toml` (or `--config <file>`); every key is optional:
//!
//! ```toml
//! api_base_url = "https://jsonplaceholder.typicode.com"
//! request_timeout_secs = 10
//! page_size = 10
//! client_ids = true
//! theme = "catppuccin-latte"
//! # theme_file = "~/themes/nord.toml"
//! trace_level = "debug"
//! ```
//!
//! Command-line flags override the file.
//!
//! # Example
//!
//! ```rust
//! use userdeck::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (rerender, actions) = handle_event(&mut state, &Event::MoveDown)?;
//! assert!(rerender && actions.is_empty());
//! # Ok::<(), userdeck::DirectoryError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod pipeline;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Store};
pub use domain::{DirectoryError, Result, User, UserId, UserInput};
pub use ui::Theme;

use app::DirectoryState;
use serde::Deserialize;
use std::path::Path;

/// Dashboard configuration.
///
/// Read from TOML with every key optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the `/users` API. Default: `https://jsonplaceholder.typicode.com`
    pub api_base_url: String,

    /// Per-request timeout. Default: 10
    pub request_timeout_secs: u64,

    /// Initial rows per page. Default: 10
    pub page_size: usize,

    /// Assign ids to created users locally instead of trusting the server's.
    ///
    /// The public demo API answers every create with the same id, which would make
    /// new users collide. Default: `true`
    pub client_ids: bool,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. Takes precedence over `theme`. See [`ui::theme`].
    pub theme_file: Option<String>,

    /// Tracing filter: `trace`, `debug`, `info`, `warn`, `error` or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: gateway::http::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            page_size: pipeline::DEFAULT_PAGE_SIZE,
            client_ids: true,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. `None` leaves the configured value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub page_size: Option<usize>,
    pub theme_name: Option<String>,
    pub theme_file: Option<String>,
    pub trace_level: Option<String>,
}

impl Config {
    /// Loads `path` if given, otherwise the default config file if it exists,
    /// otherwise the defaults.
    ///
    /// # Parameters
    ///
    /// * `path` - Explicit config file from `--config`, if any
    ///
    /// # Returns
    ///
    /// The validated configuration, before command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if an explicitly given file is missing, or
    /// if the file that is read is not valid configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match infrastructure::default_config_file() {
            Some(default) if default.is_file() => Self::from_file(&default),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parses and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if the file cannot be read, is not valid
    /// TOML, has unknown keys, or fails [`Config::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DirectoryError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| DirectoryError::Config(format!("failed to parse {}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line values on top of the file.
    ///
    /// A theme name given on the command line clears a configured theme file, so
    /// `--theme` always wins over the file's `theme_file`.
    ///
    /// # Parameters
    ///
    /// * `overrides` - Values given on the command line; `None` keeps the file's value
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if the result fails [`Config::validate`].
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(url) = overrides.api_base_url {
            self.api_base_url = url;
        }
        if let Some(size) = overrides.page_size {
            self.page_size = size;
        }
        if overrides.theme_name.is_some() {
            self.theme_name = overrides.theme_name;
            self.theme_file = None;
        }
        if overrides.theme_file.is_some() {
            self.theme_file = overrides.theme_file;
        }
        if let Some(level) = overrides.trace_level {
            self.trace_level = level;
        }

        self.validate()?;
        Ok(self)
    }

    /// Rejects values the dashboard cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] for an empty API URL, a zero timeout or a
    /// zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(DirectoryError::Config("api_base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(DirectoryError::Config("request_timeout_secs must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(DirectoryError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default. A theme
    /// that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the application state: an empty store with the configured page size
/// and the resolved theme. Records arrive once the worker runs the first load.
///
/// # Parameters
///
/// * `config` - Configuration after command-line overrides
///
/// # Returns
///
/// An [`AppState`] in normal mode with nothing selected.
///
/// # Example
///
/// ```rust
/// use userdeck::{initialize, Config};
///
/// let config = Config { page_size: 25, theme_name: Some("catppuccin-latte".into()), ..Config::default() };
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "catppuccin-latte");
/// assert_eq!(state.store.read(|s| s.pagination.page_size), 25);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(page_size = config.page_size, "initializing userdeck");

    let store = Store::new(DirectoryState::with_page_size(config.page_size));
    AppState::new(store, config.resolve_theme())
}
