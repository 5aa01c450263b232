//! Search box and active filter chips.

use crate::ui::helpers::{fit, fit_trimmed, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, SearchBarInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-line search box and returns the row after it.
///
/// ```text
/// [margin] ┌──────────────────┐
/// [margin] │ Search: query█   │
/// [margin] └──────────────────┘
/// ```
///
/// The cursor block is only drawn while the box has focus.
pub fn render_search_bar(canvas: &mut Canvas, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused { &theme.colors.accent } else { &theme.colors.border };

    canvas.move_to(row, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);
    canvas.fg(border);
    canvas.push(&format!("┌{}┐", "─".repeat(inner_width)));

    let cursor = if search.focused { "█" } else { "" };
    canvas.move_to(row + 1, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);
    canvas.push("│");
    canvas.fg(&theme.colors.text_normal);
    canvas.push(&fit(&format!(" Search: {}{cursor}", search.query), inner_width));
    canvas.fg(border);
    canvas.push("│");

    canvas.move_to(row + 2, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);
    canvas.push(&format!("└{}┘", "─".repeat(inner_width)));
    canvas.reset();

    row + 3
}

/// Renders one line of `Label: value` chips.
///
/// Chips that do not fit are truncated, and any after the first one that runs
/// out of room are skipped.
///
/// # Parameters
///
/// * `row` - Row to draw on (1-indexed)
/// * `chips` - Active per-field filters, in display order
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row (`row + 1`).
pub fn render_filter_chips(canvas: &mut Canvas, row: usize, chips: &[FilterChip], theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);

    let mut used = SEARCH_BOX_MARGIN;
    for chip in chips {
        let text = format!(" {}: {} ", chip.label, chip.value);
        let remaining = cols.saturating_sub(used + 1);
        if remaining == 0 {
            break;
        }
        let text = fit_trimmed(&text, remaining);
        used += text.chars().count() + 1;

        canvas.fg(&theme.colors.chip_fg);
        canvas.bg(&theme.colors.chip_bg);
        canvas.push(&text);
        canvas.reset();
        canvas.spaces(1);
    }

    row + 1
}
