//! Footer component: keybinding hints.

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the hints dimmed and centered, truncated on narrow terminals.
///
/// # Parameters
///
/// * `row` - Row to draw on, normally the last terminal row
/// * `footer` - Key hints for the current mode
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next row (`row + 1`).
pub fn render_footer(canvas: &mut Canvas, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.fg(&theme.colors.text_dim);
    canvas.centered(&footer.keybindings, cols);
    canvas.reset();
    row + 1
}
