//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates in-process state. Anything
//! that leaves the process (a gateway call, terminating the program) comes back to the
//! binary as an [`Action`], which executes them in order.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::Action;
//! use userdeck::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::load_users())];
//! assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::LoadUsers { .. })));
//! ```

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the dashboard and restore the terminal.
    Quit,

    /// Hand a gateway operation to the worker. Its outcome arrives later as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),
}
