//! Table component renderer.
//!
//! Columns are laid out left to right with a single space between them, using the
//! widths computed in the view model. The NAME cell also carries the dimmed
//! `@username` when it fits.

use crate::ui::helpers::{fit, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayItem};

/// Renders the column titles with the sort arrow on the active column.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(canvas: &mut Canvas, row: usize, columns: &[ColumnHeader], theme: &Theme) -> usize {
    canvas.move_to(row, 1);
    canvas.bold();
    for (index, column) in columns.iter().enumerate() {
        if index > 0 {
            canvas.spaces(1);
        }
        match column.indicator {
            Some(arrow) => {
                let title = format!("{} ", column.title);
                let title_len = title.chars().count();
                canvas.fg(&theme.colors.header_fg);
                canvas.push(&title);
                canvas.fg(&theme.colors.accent);
                canvas.push(&fit(arrow, column.width.saturating_sub(title_len)));
            }
            None => {
                canvas.fg(&theme.colors.header_fg);
                canvas.push(&fit(column.title, column.width));
            }
        }
    }
    canvas.reset();
    row + 1
}

/// Renders all rows starting at `row`.
///
/// # Parameters
///
/// * `row` - Starting row position for the table (1-indexed)
/// * `items` - Rows of the visible window
/// * `columns` - Column widths, in display order
/// * `theme` - Active color theme
/// * `cols` - Terminal width, used to extend the selection highlight
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(
    canvas: &mut Canvas,
    row: usize,
    items: &[DisplayItem],
    columns: &[ColumnHeader],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        render_table_row(canvas, current_row, item, columns, theme, cols);
        current_row += 1;
    }
    current_row
}

fn render_table_row(
    canvas: &mut Canvas,
    row: usize,
    item: &DisplayItem,
    columns: &[ColumnHeader],
    theme: &Theme,
    cols: usize,
) {
    let widths: Vec<usize> = columns.iter().map(|c| c.width).collect();
    let &[id_w, name_w, email_w, phone_w, company_w] = widths.as_slice() else {
        return;
    };

    let text_color = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    canvas.move_to(row, 1);
    if item.is_selected {
        canvas.bg(&theme.colors.selection_bg);
        canvas.bold();
    }
    canvas.fg(text_color);

    canvas.push(&fit(&item.id, id_w));
    canvas.spaces(1);
    render_name_cell(canvas, item, name_w, text_color, theme);
    canvas.spaces(1);
    canvas.push(&fit(&item.email, email_w));
    canvas.spaces(1);
    canvas.push(&fit(&item.phone, phone_w));
    canvas.spaces(1);
    canvas.push(&fit(&item.company, company_w));

    let used = id_w + name_w + email_w + phone_w + company_w + columns.len() - 1;
    canvas.spaces(cols.saturating_sub(used));
    canvas.reset();
}

fn render_name_cell(canvas: &mut Canvas, item: &DisplayItem, width: usize, text_color: &str, theme: &Theme) {
    let name_len = item.name.chars().count();
    let username_len = item.username.chars().count();

    if item.username.is_empty() || name_len + 1 + username_len > width {
        canvas.push(&fit(&item.name, width));
        return;
    }

    canvas.push(&item.name);
    canvas.spaces(1);
    if !item.is_selected {
        canvas.fg(&theme.colors.text_dim);
    }
    canvas.push(&item.username);
    canvas.fg(text_color);
    canvas.spaces(width - name_len - 1 - username_len);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnHeader> {
        ["ID", "NAME", "EMAIL", "PHONE", "COMPANY"]
            .into_iter()
            .map(|title| ColumnHeader { title, indicator: None, width: 20 })
            .collect()
    }

    fn item(username: &str) -> DisplayItem {
        DisplayItem {
            id: "1".into(),
            name: "Leanne Graham".into(),
            username: username.into(),
            email: "Sincere@april.biz".into(),
            phone: "1-770-736-8031".into(),
            company: "Romaguera-Crona".into(),
            is_selected: false,
        }
    }

    #[test]
    fn long_username_is_dropped_from_name_cell() {
        let mut canvas = Canvas::new();
        render_table_rows(&mut canvas, 5, &[item("@Bret")], &columns(), &Theme::default(), 120);
        assert!(canvas.into_string().contains("@Bret"));

        let mut canvas = Canvas::new();
        render_table_rows(&mut canvas, 5, &[item("@averyveryverylongname")], &columns(), &Theme::default(), 120);
        let out = canvas.into_string();
        assert!(!out.contains("@averyvery"));
        assert!(out.contains("Romaguera-Crona"));
    }

    #[test]
    fn header_shows_sort_arrow() {
        let mut cols = columns();
        cols[1].indicator = Some("↑");
        let mut canvas = Canvas::new();
        let next = render_table_headers(&mut canvas, 4, &cols, &Theme::default());

        assert_eq!(next, 5);
        assert!(canvas.into_string().contains("NAME \u{1b}[38;2;"));
    }
}
