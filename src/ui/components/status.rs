//! Status line: loading indicator, error banner or the last notice.

use crate::ui::helpers::{fit, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line: loading, an error, or the last notice.
///
/// # Returns
///
/// The next row (`row + 1`). Nothing is drawn when idle.
pub fn render_status(canvas: &mut Canvas, row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let (color, text) = match status {
        StatusLine::Idle => return row + 1,
        StatusLine::Loading => (&theme.colors.warning_fg, " ⟳ Loading...".to_string()),
        StatusLine::Error(message) => (&theme.colors.error_fg, format!(" ✗ {message}  (x: dismiss, r: retry)")),
        StatusLine::Notice(message) => (&theme.colors.success_fg, format!(" ✓ {message}")),
    };

    canvas.move_to(row, 1);
    canvas.fg(color);
    canvas.push(&fit(&text, cols));
    canvas.reset();
    row + 1
}
