//! Application state and view model computation.
//!
//! [`AppState`] is everything the terminal front end needs between frames: the shared
//! [`Store`] holding the directory, plus purely presentational state (mode, row
//! selection, overlay drafts, the last notice and the theme).
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] takes one store snapshot, runs the view pipeline on
//! it and turns the result into display strings, so a frame never mixes two states.
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{AppState, Store};
//! use userdeck::ui::Theme;
//!
//! let state = AppState::new(Store::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 100);
//! assert!(viewmodel.display_items.is_empty());
//! assert_eq!(viewmodel.empty_state.unwrap().message, "No users found");
//! ```

use super::form::{FilterDraft, FilterField, FormField, UserForm};
use super::modes::{Column, InputMode};
use super::store::{DirectoryState, Store};
use crate::domain::User;
use crate::pipeline::{page_numbers, PageMarker, PageView, SortDirection};
use crate::ui::helpers::printable;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnHeader, DisplayItem, EmptyState, FieldView, FilterChip, FooterInfo, FormView,
    HeaderInfo, Overlay, PageLabel, PaginationBar, SearchBarInfo, StatusLine, UIViewModel,
};

/// Rows used by everything except table rows: blank line, header, border, table
/// header, pagination bar, status line, border, footer.
const BASE_CHROME_ROWS: usize = 8;
const SEARCH_BAR_ROWS: usize = 3;
const CHIP_ROWS: usize = 1;

const ID_WIDTH: usize = 6;
const PHONE_WIDTH: usize = 22;
const MIN_FLEX_WIDTH: usize = 8;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared directory state, also written by the worker.
    pub store: Store,

    pub input_mode: InputMode,

    /// Zero-based row index within the current page.
    pub selected_index: usize,

    /// Draft behind the filter panel while it is open.
    pub filter_draft: Option<FilterDraft>,

    /// Draft behind the add/edit dialog while it is open.
    pub form: Option<UserForm>,

    /// User awaiting delete confirmation.
    pub pending_delete: Option<User>,

    /// Outcome of the last completed operation, shown in the status line.
    pub notice: Option<String>,

    pub theme: Theme,
}

impl AppState {
    /// Creates the UI state around an existing store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use userdeck::app::{AppState, InputMode, Store};
    /// use userdeck::ui::Theme;
    ///
    /// let state = AppState::new(Store::default(), Theme::default());
    /// assert_eq!(state.input_mode, InputMode::Normal);
    /// assert_eq!(state.selected_index, 0);
    /// ```
    #[must_use]
    pub fn new(store: Store, theme: Theme) -> Self {
        Self {
            store,
            input_mode: InputMode::Normal,
            selected_index: 0,
            filter_draft: None,
            form: None,
            pending_delete: None,
            notice: None,
            theme,
        }
    }

    /// The page currently visible, computed from the store.
    #[must_use]
    pub fn view(&self) -> PageView {
        self.store.read(DirectoryState::view)
    }

    /// Moves the selection down one row, wrapping to the top of the page.
    pub fn move_selection_down(&mut self) {
        let len = self.view().rows.len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up one row, wrapping to the bottom of the page.
    pub fn move_selection_up(&mut self) {
        let len = self.view().rows.len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 { len - 1 } else { self.selected_index - 1 };
    }

    /// Keeps the selection on an existing row after the page contents changed.
    pub fn clamp_selection(&mut self) {
        let len = self.view().rows.len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// The user under the cursor.
    ///
    /// # Returns
    ///
    /// A copy of the selected record, or `None` when the page is empty.
    #[must_use]
    pub fn selected_user(&self) -> Option<User> {
        self.view().rows.into_iter().nth(self.selected_index)
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols` cells.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in rows
    /// * `cols` - Terminal width in columns
    ///
    /// # Returns
    ///
    /// Everything the renderer needs, with the table rows already windowed and
    /// `selected_index` relative to the window.
    ///
    /// # Windowing
    ///
    /// A page may hold more rows than the terminal can show. The visible window is
    /// centered on the selection and shifted back when it would run past the last row.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let snapshot = self.store.snapshot();
        let view = snapshot.view();

        let _span = tracing::trace_span!(
            "compute_viewmodel",
            rows,
            cols,
            page_rows = view.rows.len(),
            total_filtered = view.total_filtered
        )
        .entered();

        let search_bar = self.compute_search_bar(&snapshot);
        let filter_chips = Self::compute_filter_chips(&snapshot);
        let available_rows =
            Self::calculate_available_rows(rows, search_bar.is_some(), !filter_chips.is_empty());

        let selected = self.selected_index.min(view.rows.len().saturating_sub(1));
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(view.rows.len());
        if visible_end - visible_start < available_rows && view.rows.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = view.rows[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, user)| Self::compute_display_item(user, visible_start + offset == selected))
            .collect();

        UIViewModel {
            header: HeaderInfo {
                title: format!(" User Directory ({}) ", view.total_filtered),
            },
            search_bar,
            filter_chips,
            columns: Self::compute_columns(&snapshot, cols),
            display_items,
            selected_index: selected - visible_start,
            pagination: Self::compute_pagination(&view),
            status: self.compute_status(&snapshot),
            empty_state: Self::compute_empty_state(&snapshot, &view),
            overlay: self.compute_overlay(),
            footer: self.compute_footer(&snapshot),
        }
    }

    /// Row text for `user`, with control characters replaced.
    fn compute_display_item(user: &User, is_selected: bool) -> DisplayItem {
        let text = |value: &str| printable(value).into_owned();
        DisplayItem {
            id: text(&user.id.to_string()),
            name: text(&user.name),
            username: if user.username.is_empty() {
                String::new()
            } else {
                format!("@{}", printable(&user.username))
            },
            email: text(&user.email),
            phone: text(&user.phone),
            company: text(user.organization_name().unwrap_or("N/A")),
            is_selected,
        }
    }

    fn compute_search_bar(&self, snapshot: &DirectoryState) -> Option<SearchBarInfo> {
        let focused = self.input_mode == InputMode::Search;
        (focused || !snapshot.filters.search.is_empty()).then(|| SearchBarInfo {
            query: snapshot.filters.search.clone(),
            focused,
        })
    }

    fn compute_filter_chips(snapshot: &DirectoryState) -> Vec<FilterChip> {
        let filters = &snapshot.filters;
        [
            (FilterField::Name, &filters.name),
            (FilterField::Email, &filters.email),
            (FilterField::Company, &filters.company),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(field, value)| FilterChip {
            label: field.label(),
            value: value.trim().to_string(),
        })
        .collect()
    }

    /// Splits the width left after the fixed ID and PHONE columns between NAME,
    /// EMAIL and COMPANY.
    fn compute_columns(snapshot: &DirectoryState, cols: usize) -> Vec<ColumnHeader> {
        let separators = Column::ALL.len() - 1;
        let flexible = cols
            .saturating_sub(ID_WIDTH + PHONE_WIDTH + separators)
            .max(MIN_FLEX_WIDTH * 3);
        let name_width = flexible * 35 / 100;
        let email_width = flexible * 35 / 100;
        let company_width = flexible - name_width - email_width;

        Column::ALL
            .into_iter()
            .map(|column| ColumnHeader {
                title: column.title(),
                indicator: snapshot
                    .sort
                    .direction_for(column.sort_key())
                    .map(SortDirection::indicator),
                width: match column {
                    Column::Id => ID_WIDTH,
                    Column::Name => name_width,
                    Column::Email => email_width,
                    Column::Phone => PHONE_WIDTH,
                    Column::Company => company_width,
                },
            })
            .collect()
    }

    fn compute_pagination(view: &PageView) -> Option<PaginationBar> {
        let summary = view.summary()?;
        let pages = page_numbers(view.current_page, view.page_count())
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Page(page) => PageLabel {
                    label: page.to_string(),
                    is_current: page == view.current_page,
                },
                PageMarker::Gap => PageLabel {
                    label: "...".to_string(),
                    is_current: false,
                },
            })
            .collect();

        Some(PaginationBar {
            page_size: view.page_size,
            summary,
            pages,
        })
    }

    fn compute_status(&self, snapshot: &DirectoryState) -> StatusLine {
        if let Some(message) = snapshot.error() {
            StatusLine::Error(message.to_string())
        } else if snapshot.is_loading() {
            StatusLine::Loading
        } else if let Some(notice) = &self.notice {
            StatusLine::Notice(notice.clone())
        } else {
            StatusLine::Idle
        }
    }

    fn compute_empty_state(snapshot: &DirectoryState, view: &PageView) -> Option<EmptyState> {
        if !view.rows.is_empty() {
            return None;
        }
        Some(if snapshot.is_loading() && snapshot.records.is_empty() {
            EmptyState {
                message: "Loading users".to_string(),
                subtitle: "Fetching the directory".to_string(),
            }
        } else {
            EmptyState {
                message: "No users found".to_string(),
                subtitle: "Try adjusting your search or filter criteria".to_string(),
            }
        })
    }

    fn compute_overlay(&self) -> Option<Overlay> {
        match self.input_mode {
            InputMode::UserForm => self.form.as_ref().map(|form| {
                Overlay::Form(FormView {
                    title: form.title().to_string(),
                    fields: FormField::ALL
                        .into_iter()
                        .map(|field| FieldView {
                            label: field.label(),
                            value: form.value(field).to_string(),
                            error: form.error(field).map(str::to_string),
                            focused: form.focused() == field,
                        })
                        .collect(),
                    hint: "Enter: save  Esc: cancel".to_string(),
                })
            }),
            InputMode::FilterPanel => self.filter_draft.as_ref().map(|draft| {
                Overlay::FilterPanel(FormView {
                    title: "Filters".to_string(),
                    fields: FilterField::ALL
                        .into_iter()
                        .map(|field| FieldView {
                            label: field.label(),
                            value: draft.value(field).to_string(),
                            error: None,
                            focused: draft.focused() == field,
                        })
                        .collect(),
                    hint: "Enter: apply  Del: clear all  Esc: cancel".to_string(),
                })
            }),
            InputMode::ConfirmDelete => self.pending_delete.as_ref().map(|user| Overlay::ConfirmDelete {
                name: user.name.clone(),
            }),
            InputMode::Normal | InputMode::Search => None,
        }
    }

    fn compute_footer(&self, snapshot: &DirectoryState) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal if snapshot.error().is_some() => {
                "x: dismiss error  r: retry  j/k: move  h/l: page  /: search  q: quit"
            }
            InputMode::Normal => {
                "j/k: move  h/l: page  /: search  f: filters  c: clear  1-5: sort  +/-: size  a: add  e: edit  d: delete  u: refresh  r: reload  q: quit"
            }
            InputMode::Search => "Type to search  Enter: done  Esc: clear search",
            InputMode::FilterPanel => "Tab: next field  Enter: apply  Del: clear all  Esc: cancel",
            InputMode::UserForm => "Tab/Shift+Tab: field  Enter: save  Esc: cancel",
            InputMode::ConfirmDelete => "y: delete  n: cancel",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Table rows that fit after the fixed chrome. Never less than one.
    const fn calculate_available_rows(total_rows: usize, has_search_bar: bool, has_chips: bool) -> usize {
        let mut chrome = BASE_CHROME_ROWS;
        if has_search_bar {
            chrome += SEARCH_BAR_ROWS;
        }
        if has_chips {
            chrome += CHIP_ROWS;
        }
        let available = total_rows.saturating_sub(chrome);
        if available == 0 { 1 } else { available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Transition;
    use crate::domain::{Organization, UserId, UserInput};
    use crate::pipeline::{FilterPatch, PaginationPatch, SortSpec};

    fn users(count: i64) -> Vec<User> {
        (1..=count)
            .map(|id| {
                User::from_input(
                    UserId::Number(id),
                    &UserInput {
                        name: format!("User {id:02}"),
                        username: (id % 2 == 0).then(|| format!("user{id}")),
                        email: format!("user{id}@example.com"),
                        phone: "555-0100".into(),
                        website: "example.com".into(),
                        organization: (id != 3).then(|| Organization::named("Initech")),
                        ..UserInput::default()
                    },
                )
            })
            .collect()
    }

    fn loaded(count: i64) -> AppState {
        let store = Store::default();
        store.dispatch(Transition::RecordsLoaded(users(count)));
        AppState::new(store, Theme::default())
    }

    #[test]
    fn rows_show_username_and_company_fallback() {
        let state = loaded(5);
        let vm = state.compute_viewmodel(40, 120);

        assert_eq!(vm.display_items.len(), 5);
        assert_eq!(vm.display_items[0].username, "");
        assert_eq!(vm.display_items[1].username, "@user2");
        assert_eq!(vm.display_items[2].company, "N/A");
        assert!(vm.display_items[0].is_selected);
        assert_eq!(vm.header.title, " User Directory (5) ");
    }

    #[test]
    fn pagination_bar_reflects_view() {
        let state = loaded(25);
        state.store.dispatch(Transition::PaginationChanged(PaginationPatch::page(3)));

        let bar = state.compute_viewmodel(40, 120).pagination.unwrap();
        assert_eq!(bar.summary, "Showing 21 to 25 of 25 results");
        let labels: Vec<_> = bar.pages.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        assert!(bar.pages[2].is_current);
    }

    #[test]
    fn empty_result_shows_empty_state() {
        let state = loaded(5);
        state.store.dispatch(Transition::FiltersChanged(FilterPatch::search("nobody")));

        let vm = state.compute_viewmodel(40, 120);
        assert!(vm.pagination.is_none());
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "No users found");
        assert_eq!(empty.subtitle, "Try adjusting your search or filter criteria");
        assert_eq!(vm.search_bar.unwrap().query, "nobody");
    }

    #[test]
    fn sort_indicator_marks_active_column() {
        let state = loaded(3);
        state
            .store
            .dispatch(Transition::SortChanged(SortSpec::by("email", SortDirection::Descending)));

        let vm = state.compute_viewmodel(40, 120);
        let indicators: Vec<_> = vm.columns.iter().map(|c| c.indicator).collect();
        assert_eq!(indicators, [None, None, Some("▼"), None, None]);
    }

    #[test]
    fn status_prefers_error_over_notice() {
        let mut state = loaded(3);
        state.notice = Some("User 1 updated".into());
        assert_eq!(state.compute_viewmodel(40, 120).status, StatusLine::Notice("User 1 updated".into()));

        state.store.dispatch(Transition::OperationFailed("Network error: offline".into()));
        assert_eq!(
            state.compute_viewmodel(40, 120).status,
            StatusLine::Error("Network error: offline".into())
        );
    }

    #[test]
    fn window_follows_selection_on_short_terminals() {
        let mut state = loaded(25);
        state.store.dispatch(Transition::PaginationChanged(PaginationPatch::page_size(25)));
        state.selected_index = 20;

        // 12 rows leave room for 4 table rows.
        let vm = state.compute_viewmodel(12, 120);
        assert_eq!(vm.display_items.len(), 4);
        assert_eq!(vm.display_items[vm.selected_index].id, "21");
        assert_eq!(vm.display_items.last().map(|i| i.id.as_str()), Some("22"));
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut state = loaded(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_user().map(|u| u.id), Some(UserId::Number(1)));
    }
}
