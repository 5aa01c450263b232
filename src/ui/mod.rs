//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: frame entry point
//! - [`components`]: one renderer per screen region
//! - [`helpers`]: the [`Canvas`](helpers::Canvas) buffer and text fitting
//! - [`theme`]: color palettes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    ColumnHeader, DisplayItem, EmptyState, FilterChip, FooterInfo, HeaderInfo, Overlay, PaginationBar,
    SearchBarInfo, StatusLine, UIViewModel,
};
