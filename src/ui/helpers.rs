//! Shared rendering utilities.
//!
//! Components draw into a [`Canvas`], an ANSI string buffer with absolute cursor
//! positioning, instead of printing directly. The binary writes the finished frame
//! to the terminal in one go, and tests can inspect it.
//!
//! Widths are measured in `char`s. The dashboard only renders text it owns or user
//! fields, so double-width glyphs are not accounted for. User fields come from a
//! remote backend and may hold control characters; [`fit`], [`fit_trimmed`] and
//! [`printable`] replace them so a record cannot emit its own escape sequences.
//!
//! # Example
//!
//! ```rust
//! use userdeck::ui::helpers::{fit, Canvas};
//!
//! let mut canvas = Canvas::new();
//! canvas.move_to(2, 1);
//! canvas.push(&fit("Leanne Graham", 8));
//! assert_eq!(canvas.into_string(), "\u{1b}[2;1HLeanne …");
//! ```

use crate::ui::theme::Theme;
use std::borrow::Cow;

/// ANSI output buffer for one frame.
#[derive(Debug, Default)]
pub struct Canvas {
    buffer: String,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed row and column.
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.buffer.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    pub fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn fg(&mut self, hex: &str) {
        self.buffer.push_str(&Theme::fg(hex));
    }

    pub fn bg(&mut self, hex: &str) {
        self.buffer.push_str(&Theme::bg(hex));
    }

    pub fn bold(&mut self) {
        self.buffer.push_str(Theme::bold());
    }

    pub fn reset(&mut self) {
        self.buffer.push_str(Theme::reset());
    }

    pub fn spaces(&mut self, count: usize) {
        self.buffer.extend(std::iter::repeat(' ').take(count));
    }

    /// Draws a full-width horizontal rule.
    ///
    /// # Parameters
    ///
    /// * `row` - Row to draw on (1-indexed)
    /// * `color` - Hex color of the line
    /// * `cols` - Terminal width in columns
    ///
    /// # Returns
    ///
    /// The next available row (`row + 1`).
    pub fn rule(&mut self, row: usize, color: &str, cols: usize) -> usize {
        self.move_to(row, 1);
        self.fg(color);
        self.push(&"─".repeat(cols));
        self.reset();
        row + 1
    }

    /// Writes `text` centered in `cols` columns, truncating if needed.
    pub fn centered(&mut self, text: &str, cols: usize) {
        let text = fit_trimmed(text, cols);
        let len = text.chars().count();
        let padding = cols.saturating_sub(len) / 2;
        self.spaces(padding);
        self.push(&text);
        self.spaces(cols.saturating_sub(padding + len));
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

/// Replaces control characters (`ESC`, `BEL`, newlines, ...) with spaces.
///
/// Each character maps to exactly one character, so widths are unchanged.
///
/// # Parameters
///
/// * `text` - Text that may come from outside the dashboard
///
/// # Returns
///
/// `text` itself when it is already printable, otherwise a cleaned copy.
///
/// # Example
///
/// ```rust
/// use userdeck::ui::helpers::printable;
///
/// assert_eq!(printable("Ada\u{1b}[2J"), "Ada [2J");
/// assert_eq!(printable("Ada"), "Ada");
/// ```
#[must_use]
pub fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Pads or truncates `text` to exactly `width` characters.
///
/// # Parameters
///
/// * `text` - Cell contents; control characters are replaced, see [`printable`]
/// * `width` - Target width in characters
///
/// # Returns
///
/// A string of exactly `width` characters. Truncated text ends with an ellipsis.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let text = printable(text);
    let len = text.chars().count();
    if len <= width {
        let mut fitted = text.into_owned();
        fitted.extend(std::iter::repeat(' ').take(width - len));
        return fitted;
    }
    fit_trimmed(&text, width)
}

/// Truncates `text` to at most `width` characters without padding.
///
/// # Returns
///
/// `text` with control characters replaced, cut to `width - 1` characters plus
/// `…` when it is too long, and an empty string for a zero width.
#[must_use]
pub fn fit_trimmed(text: &str, width: usize) -> String {
    let text = printable(text);
    if text.chars().count() <= width {
        return text.into_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}
