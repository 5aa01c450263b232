//! Empty state shown in place of the table.

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and a dimmed subtitle, both centered, starting at `row`.
///
/// # Parameters
///
/// * `row` - Row of the message; the subtitle goes one row below
/// * `empty` - Message and subtitle (no users loaded vs. no matches)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
pub fn render_empty_state(canvas: &mut Canvas, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    canvas.move_to(row, 1);
    canvas.bold();
    canvas.fg(&theme.colors.empty_state_fg);
    canvas.centered(&empty.message, cols);
    canvas.reset();

    canvas.move_to(row + 1, 1);
    canvas.push(Theme::dim());
    canvas.fg(&theme.colors.text_dim);
    canvas.centered(&empty.subtitle, cols);
    canvas.reset();
}
