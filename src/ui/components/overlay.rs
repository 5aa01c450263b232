//! Modal boxes drawn over the table: the user form, the filter panel and the
//! delete confirmation.

use crate::ui::helpers::{fit, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormView, Overlay};

const MAX_BOX_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 10;

/// Draws `overlay` as a bordered box centered over the frame.
///
/// # Parameters
///
/// * `overlay` - Form, filter panel or delete confirmation
/// * `theme` - Active color theme
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render_overlay(canvas: &mut Canvas, overlay: &Overlay, theme: &Theme, rows: usize, cols: usize) {
    match overlay {
        Overlay::Form(form) | Overlay::FilterPanel(form) => render_form(canvas, form, theme, rows, cols),
        Overlay::ConfirmDelete { name } => render_confirm(canvas, name, theme, rows, cols),
    }
}

/// Geometry of a centered box: first row, first column and outer width.
fn centered_box(height: usize, rows: usize, cols: usize) -> (usize, usize, usize) {
    let width = cols.saturating_sub(4).min(MAX_BOX_WIDTH).max(LABEL_WIDTH + 6);
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    (top, left, width)
}

/// Draws the border and title, blanking the interior.
fn draw_frame(canvas: &mut Canvas, title: &str, top: usize, left: usize, width: usize, height: usize, theme: &Theme) {
    let inner = width.saturating_sub(2);
    let title = fit(&format!(" {title} "), inner.min(title.chars().count() + 2));
    let title_len = title.chars().count();

    canvas.fg(&theme.colors.accent);
    canvas.move_to(top, left);
    canvas.push("┌");
    canvas.bold();
    canvas.push(&title);
    canvas.reset();
    canvas.fg(&theme.colors.accent);
    canvas.push(&"─".repeat(inner.saturating_sub(title_len)));
    canvas.push("┐");

    for offset in 1..height.saturating_sub(1) {
        canvas.move_to(top + offset, left);
        canvas.push("│");
        canvas.spaces(inner);
        canvas.push("│");
    }

    canvas.move_to(top + height.saturating_sub(1), left);
    canvas.push(&format!("└{}┘", "─".repeat(inner)));
    canvas.reset();
}

fn render_form(canvas: &mut Canvas, form: &FormView, theme: &Theme, rows: usize, cols: usize) {
    // Title border, one line per field plus its error, a blank line, the hint, bottom border.
    let errors = form.fields.iter().filter(|f| f.error.is_some()).count();
    let height = form.fields.len() + errors + 4;
    let (top, left, width) = centered_box(height, rows, cols);
    let value_width = width.saturating_sub(LABEL_WIDTH + 5);

    draw_frame(canvas, &form.title, top, left, width, height, theme);

    let mut row = top + 1;
    for field in &form.fields {
        canvas.move_to(row, left + 2);
        if field.focused {
            canvas.bold();
            canvas.fg(&theme.colors.accent);
        } else {
            canvas.fg(&theme.colors.text_dim);
        }
        canvas.push(&fit(field.label, LABEL_WIDTH));
        canvas.reset();
        canvas.spaces(1);

        canvas.fg(&theme.colors.text_normal);
        let cursor = if field.focused { "█" } else { "" };
        canvas.push(&fit(&format!("{}{cursor}", field.value), value_width));
        canvas.reset();
        row += 1;

        if let Some(error) = &field.error {
            canvas.move_to(row, left + 2 + LABEL_WIDTH + 1);
            canvas.fg(&theme.colors.error_fg);
            canvas.push(&fit(error, value_width));
            canvas.reset();
            row += 1;
        }
    }

    canvas.move_to(row + 1, left + 2);
    canvas.fg(&theme.colors.text_dim);
    canvas.push(&fit(&form.hint, width.saturating_sub(4)));
    canvas.reset();
}

fn render_confirm(canvas: &mut Canvas, name: &str, theme: &Theme, rows: usize, cols: usize) {
    let height = 5;
    let (top, left, width) = centered_box(height, rows, cols);
    let inner = width.saturating_sub(4);

    draw_frame(canvas, "Delete User", top, left, width, height, theme);

    canvas.move_to(top + 1, left + 2);
    canvas.fg(&theme.colors.error_fg);
    canvas.push(&fit(&format!("Delete {name}?"), inner));
    canvas.move_to(top + 3, left + 2);
    canvas.fg(&theme.colors.text_dim);
    canvas.push(&fit("y: delete  n: keep", inner));
    canvas.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::FieldView;

    #[test]
    fn form_shows_errors_under_fields() {
        let form = FormView {
            title: "Add User".into(),
            fields: vec![
                FieldView { label: "Name", value: "A".into(), error: Some("Name must be at least 2 characters".into()), focused: true },
                FieldView { label: "Email", value: String::new(), error: None, focused: false },
            ],
            hint: "Tab: next field  Enter: save  Esc: cancel".into(),
        };
        let mut canvas = Canvas::new();
        render_overlay(&mut canvas, &Overlay::Form(form), &Theme::default(), 30, 100);
        let out = canvas.into_string();

        assert!(out.contains(" Add User "));
        assert!(out.contains("Name must be at least 2 characters"));
        assert!(out.contains("A█"));
    }

    #[test]
    fn confirm_names_the_user() {
        let mut canvas = Canvas::new();
        let overlay = Overlay::ConfirmDelete { name: "Ervin Howell".into() };
        render_overlay(&mut canvas, &overlay, &Theme::default(), 24, 80);
        assert!(canvas.into_string().contains("Delete Ervin Howell?"));
    }
}
