//! Pagination bar: result summary on the left, page numbers on the right.

use crate::ui::helpers::{fit_trimmed, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationBar;

/// Renders the bar and returns the next row.
///
/// ```text
/// Showing 11 to 20 of 25 results  (10 per page)          ‹ 1 [2] 3 ›
/// ```
///
/// The page list is dropped first when the terminal is too narrow for both.
pub fn render_pagination(canvas: &mut Canvas, row: usize, bar: &PaginationBar, theme: &Theme, cols: usize) -> usize {
    let summary = format!(" {}  ({} per page)", bar.summary, bar.page_size);
    let pages_len = pages_width(bar);
    let summary_len = summary.chars().count();

    canvas.move_to(row, 1);
    canvas.fg(&theme.colors.text_dim);

    if summary_len + pages_len + 2 > cols {
        canvas.push(&fit_trimmed(&summary, cols));
        canvas.reset();
        return row + 1;
    }

    canvas.push(&summary);
    canvas.spaces(cols - summary_len - pages_len - 1);
    canvas.push("‹");
    for page in &bar.pages {
        canvas.spaces(1);
        if page.is_current {
            canvas.bold();
            canvas.fg(&theme.colors.accent);
            canvas.push(&format!("[{}]", page.label));
            canvas.reset();
            canvas.fg(&theme.colors.text_dim);
        } else {
            canvas.push(&page.label);
        }
    }
    canvas.push(" ›");
    canvas.reset();
    row + 1
}

/// Width of `‹ 1 [2] 3 ›`.
fn pages_width(bar: &PaginationBar) -> usize {
    let labels: usize = bar
        .pages
        .iter()
        .map(|p| p.label.chars().count() + 1 + if p.is_current { 2 } else { 0 })
        .sum();
    labels + 3
}
