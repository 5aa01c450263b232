//! Input mode state machine.
//!
//! The mode decides how key presses are interpreted and which overlay is drawn.
//!
//! ```text
//! Normal ── /  ──▶ Search         Enter keeps the query, Esc clears it
//! Normal ── f  ──▶ FilterPanel    Enter applies the draft, Esc discards it
//! Normal ── a/e ─▶ UserForm       Enter submits, Esc discards
//! Normal ── d  ──▶ ConfirmDelete  y deletes, n or Esc cancels
//! ```
//!
//! Every mode returns to `Normal` when it is left.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::InputMode;
//!
//! let mode = InputMode::Search;
//! assert!(mode.captures_text());
//! assert!(!InputMode::Normal.captures_text());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and commands. Single keys trigger actions.
    #[default]
    Normal,

    /// Typing into the live search box. Every keystroke refilters the table.
    Search,

    /// Editing the per-field filter draft (name, email, company).
    FilterPanel,

    /// Editing the add/edit user form.
    UserForm,

    /// Waiting for `y`/`n` on a pending delete.
    ConfirmDelete,
}

impl InputMode {
    /// True when printable keys are text input rather than commands.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search | Self::FilterPanel | Self::UserForm)
    }

    /// True when an overlay is drawn over the table.
    #[must_use]
    pub const fn has_overlay(self) -> bool {
        matches!(self, Self::FilterPanel | Self::UserForm | Self::ConfirmDelete)
    }
}

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Email,
    Phone,
    Company,
}

impl Column {
    /// All columns in display order. Keys `1`..`5` sort by these.
    pub const ALL: [Self; 5] = [Self::Id, Self::Name, Self::Email, Self::Phone, Self::Company];

    /// Field path handed to the sort engine.
    #[must_use]
    pub const fn sort_key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company.name",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Company => "COMPANY",
        }
    }

    /// Column bound to a digit key, `'1'` being the first.
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_columns() {
        assert_eq!(Column::from_digit('1'), Some(Column::Id));
        assert_eq!(Column::from_digit('5'), Some(Column::Company));
        assert_eq!(Column::from_digit('0'), None);
        assert_eq!(Column::from_digit('6'), None);
        assert_eq!(Column::from_digit('x'), None);
    }

    #[test]
    fn only_editing_modes_capture_text() {
        assert!(InputMode::UserForm.captures_text());
        assert!(!InputMode::ConfirmDelete.captures_text());
        assert!(InputMode::ConfirmDelete.has_overlay());
        assert!(!InputMode::Search.has_overlay());
    }
}
