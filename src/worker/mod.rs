//! Background execution of gateway calls.
//!
//! Each [`WorkerMessage`] runs as its own tokio task so the UI never waits on the
//! network. The task applies its result to the shared store and reports a
//! [`WorkerResponse`] back over a channel, which the UI turns into a redraw.
//!
//! # Architecture
//!
//! - `messages`: request/response types with trace context propagation
//! - `handler`: [`DirectoryWorker`] and the per-operation logic

pub mod handler;
pub mod messages;

pub use handler::DirectoryWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
