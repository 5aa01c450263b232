//! View model types representing renderable UI state.
//!
//! Computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! from a store snapshot and consumed by the renderer. They hold display-ready
//! strings only; no business rules live here.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while searching or while a search query is in effect.
    pub search_bar: Option<SearchBarInfo>,

    /// One chip per non-blank per-field filter.
    pub filter_chips: Vec<FilterChip>,

    pub columns: Vec<ColumnHeader>,

    /// Rows of the current page that fit on screen.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Hidden when nothing matches.
    pub pagination: Option<PaginationBar>,

    pub status: StatusLine,

    /// Shown instead of the table when nothing matches.
    pub empty_state: Option<EmptyState>,

    pub overlay: Option<Overlay>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the search box.
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub title: &'static str,
    /// Sort direction arrow when this column is the active sort key.
    pub indicator: Option<&'static str>,
    pub width: usize,
}

/// One table row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: String,
    pub name: String,
    /// `@username`, or empty when the user has none.
    pub username: String,
    pub email: String,
    pub phone: String,
    /// Organization name, `N/A` when absent.
    pub company: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub page_size: usize,
    /// "Showing X to Y of Z results".
    pub summary: String,
    pub pages: Vec<PageLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLabel {
    /// Page number, or `...` for a gap.
    pub label: String,
    pub is_current: bool,
}

/// Single-line status below the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Idle,
    Loading,
    Error(String),
    Notice(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Modal content drawn over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Form(FormView),
    FilterPanel(FormView),
    ConfirmDelete { name: String },
}

/// A titled list of labelled inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
