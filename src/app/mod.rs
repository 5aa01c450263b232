//! Application layer: directory state, UI state and event handling.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! Key press → Event → handle_event ─┬─▶ Transition ─▶ Store ─▶ compute_viewmodel ─▶ render
//!                                   └─▶ Action::PostToWorker
//!                                             │
//!                  WorkerResponse ◀── worker ─┴─▶ Transition ─▶ Store
//! ```
//!
//! The [`Store`] is the single shared piece of state. The UI thread and the worker
//! tasks both write to it, only through [`Transition`]s.
//!
//! # Modules
//!
//! - [`store`]: `DirectoryState`, the `reduce` function and the shared `Store`
//! - [`transitions`]: the closed set of state transitions
//! - [`state`]: UI state container and view model computation
//! - [`handler`]: event processing
//! - [`modes`]: input modes and sortable columns
//! - [`form`]: user form and filter panel drafts
//! - [`actions`]: side effects returned to the binary
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{handle_event, AppState, Event, Store};
//! use userdeck::ui::Theme;
//!
//! let mut state = AppState::new(Store::default(), Theme::default());
//! let (rerender, actions) = handle_event(&mut state, &Event::MoveDown)?;
//! assert!(rerender);
//! assert!(actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;
pub mod transitions;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Column, InputMode};
pub use state::AppState;
pub use store::{reduce, DirectoryState, LoadTicket, LoadingGuard, RequestStatus, Store};
pub use transitions::Transition;
