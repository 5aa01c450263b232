//! Header component: centered title bar.

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title centered across the full width.
///
/// # Parameters
///
/// * `canvas` - Frame being drawn
/// * `row` - Row to draw on (1-indexed)
/// * `header` - Title text
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row (`row + 1`).
pub fn render_header(canvas: &mut Canvas, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.bold();
    canvas.fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        canvas.bg(bg);
    }
    canvas.centered(&header.title, cols);
    canvas.reset();
    row + 1
}
