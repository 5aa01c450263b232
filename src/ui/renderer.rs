//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` becomes a `UIViewModel`
//! 2. **Component Rendering**: the layout draws each region into a [`Canvas`]
//!
//! The result is a complete ANSI frame. The caller clears the screen and writes it.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{AppState, Store};
//! use userdeck::ui::{render, Theme};
//!
//! let state = AppState::new(Store::default(), Theme::default());
//! let frame = render(&state, 24, 80);
//! assert!(frame.contains("User Directory"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Canvas;

/// Renders one frame for a terminal of `rows` x `cols`.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut canvas = Canvas::new();
    components::render_layout(&mut canvas, &viewmodel, &state.theme, rows, cols);
    canvas.into_string()
}
