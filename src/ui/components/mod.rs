//! Composable UI components.
//!
//! Each component draws one region into a [`Canvas`] and, where it owns a run of
//! rows, returns the next free row so the layout can stack them.
//!
//! # Layout
//!
//! ```text
//!  1  (blank)
//!  2  header
//!  3  ──────────────
//!     search box (3 rows, optional)
//!     filter chips (optional)
//!     column titles
//!     table rows / empty state
//!  …
//! -3  pagination
//! -2  status
//! -1  ──────────────
//!  0  footer
//! ```

pub mod empty;
pub mod footer;
pub mod header;
pub mod overlay;
pub mod pagination;
pub mod search;
pub mod status;
pub mod table;

pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;
pub use overlay::render_overlay;
pub use pagination::render_pagination;
pub use search::{render_filter_chips, render_search_bar};
pub use status::render_status;
pub use table::{render_table_headers, render_table_rows};

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Rows occupied below the table.
const BOTTOM_ROWS: usize = 4;

/// Draws every region of the view model.
///
/// The header, optional search box and chips, and the table (or empty state)
/// stack from the top. Pagination, status and footer are pinned to the bottom
/// rows, and an overlay is drawn last on top of everything.
///
/// # Parameters
///
/// * `canvas` - Frame being drawn
/// * `vm` - View model computed for this frame
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render_layout(canvas: &mut Canvas, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut row = render_header(canvas, 2, &vm.header, theme, cols);
    row = canvas.rule(row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        row = render_search_bar(canvas, row, search, theme, cols);
    }
    if !vm.filter_chips.is_empty() {
        row = render_filter_chips(canvas, row, &vm.filter_chips, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(canvas, row + 2, empty, theme, cols);
    } else {
        row = render_table_headers(canvas, row, &vm.columns, theme);
        render_table_rows(canvas, row, &vm.display_items, &vm.columns, theme, cols);
    }

    let bottom = rows.saturating_sub(BOTTOM_ROWS - 1).max(row);
    if let Some(bar) = &vm.pagination {
        render_pagination(canvas, bottom, bar, theme, cols);
    }
    render_status(canvas, bottom + 1, &vm.status, theme, cols);
    canvas.rule(bottom + 2, &theme.colors.border, cols);
    render_footer(canvas, bottom + 3, &vm.footer, theme, cols);

    if let Some(overlay) = &vm.overlay {
        render_overlay(canvas, overlay, theme, rows, cols);
    }
}
