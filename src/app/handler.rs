//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place UI input turns into store transitions or
//! worker messages. Filter, sort and page changes are applied to the store right
//! away; anything that needs the gateway is returned as an [`Action`].
//!
//! # Event Types
//!
//! - **Navigation**: `MoveDown`, `MoveUp`, `NextPage`, `PreviousPage`, `FirstPage`, `LastPage`
//! - **View**: `SortBy`, `GrowPageSize`, `ShrinkPageSize`, `ClearFilters`
//! - **Modes**: `SearchMode`, `OpenFilterPanel`, `AddUser`, `EditUser`, `DeleteUser`
//! - **Text input**: `Char`, `Backspace`, `NextField`, `PreviousField`, `Confirm`, `Cancel`
//! - **Commands**: `RefreshUser`, `Reload`, `DismissError`, `Quit`
//! - **Worker**: `WorkerResponse` once an operation has been applied to the store
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{handle_event, AppState, Event, Store};
//! use userdeck::ui::Theme;
//!
//! let mut state = AppState::new(Store::default(), Theme::default());
//! let (rerender, actions) = handle_event(&mut state, &Event::Reload)?;
//! assert!(!rerender);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), userdeck::domain::DirectoryError>(())
//! ```

use super::form::{FilterDraft, FormTarget, UserForm};
use super::modes::{Column, InputMode};
use super::{Action, AppState, Transition};
use crate::domain::Result;
use crate::pipeline::{FilterPatch, PaginationPatch};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Input events, already interpreted for the current mode by the key mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MoveDown,
    MoveUp,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    /// Next larger page size; returns to page 1.
    GrowPageSize,
    /// Next smaller page size; returns to page 1.
    ShrinkPageSize,
    /// Sort by a column, toggling direction when it is already the sort key.
    SortBy(Column),

    SearchMode,
    OpenFilterPanel,
    /// Clears every filter in normal mode, or the draft inside the filter panel.
    ClearFilters,
    AddUser,
    EditUser,
    DeleteUser,

    Char(char),
    Backspace,
    NextField,
    PreviousField,
    /// Enter: leave search, apply filters, submit the form or confirm a delete.
    Confirm,
    /// Esc: clear search, or close the open overlay without applying it.
    Cancel,

    /// Re-fetch the selected user from the server.
    RefreshUser,
    /// Reload the whole collection.
    Reload,
    DismissError,
    Quit,

    /// The worker finished an operation and the store already reflects it.
    WorkerResponse(WorkerResponse),
}

/// Processes an event and returns whether to re-render plus the actions to run.
///
/// What an event does depends on the input mode: `Char` types into the search
/// box, the form or the filter panel, and `Confirm` submits whichever is open.
///
/// # Parameters
///
/// * `state` - Application state, updated in place
/// * `event` - Key-level event or a worker response
///
/// # Returns
///
/// A tuple of:
/// - `bool` - Whether the frame must be redrawn
/// - `Vec<Action>` - Work for the caller, such as messages for the worker
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that can fail
/// without changing every caller.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.input_mode).entered();

    match event {
        Event::MoveDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage | Event::PreviousPage | Event::FirstPage | Event::LastPage => {
            Ok((change_page(state, event), vec![]))
        }
        Event::GrowPageSize | Event::ShrinkPageSize => {
            let larger = matches!(event, Event::GrowPageSize);
            let Some(size) = state.store.read(|s| s.pagination.step_page_size(larger)) else {
                return Ok((false, vec![]));
            };
            tracing::debug!(page_size = size, "page size changed");
            state.store.dispatch(Transition::PaginationChanged(PaginationPatch {
                current_page: Some(1),
                page_size: Some(size),
                total_items: None,
            }));
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::SortBy(column) => {
            let sort = state.store.read(|s| s.sort.toggled(column.sort_key()));
            tracing::debug!(key = column.sort_key(), direction = ?sort.direction, "sort changed");
            state.store.dispatch(Transition::SortChanged(sort));
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::OpenFilterPanel => {
            let draft = state.store.read(|s| FilterDraft::from_spec(&s.filters));
            state.filter_draft = Some(draft);
            state.input_mode = InputMode::FilterPanel;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            if state.input_mode == InputMode::FilterPanel {
                if let Some(draft) = state.filter_draft.as_mut() {
                    draft.clear();
                }
            } else {
                apply_filters(state, FilterPatch::clear_all());
            }
            Ok((true, vec![]))
        }
        Event::AddUser => {
            state.form = Some(UserForm::create());
            state.input_mode = InputMode::UserForm;
            Ok((true, vec![]))
        }
        Event::EditUser => {
            let Some(user) = state.selected_user() else {
                tracing::debug!("no user selected to edit");
                return Ok((false, vec![]));
            };
            state.form = Some(UserForm::edit(&user));
            state.input_mode = InputMode::UserForm;
            Ok((true, vec![]))
        }
        Event::DeleteUser => {
            let Some(user) = state.selected_user() else {
                tracing::debug!("no user selected to delete");
                return Ok((false, vec![]));
            };
            state.pending_delete = Some(user);
            state.input_mode = InputMode::ConfirmDelete;
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((edit_text(state, TextEdit::Push(*c)), vec![])),
        Event::Backspace => Ok((edit_text(state, TextEdit::Pop), vec![])),
        Event::NextField | Event::PreviousField => {
            let forward = matches!(event, Event::NextField);
            match state.input_mode {
                InputMode::FilterPanel => {
                    if let Some(draft) = state.filter_draft.as_mut() {
                        if forward { draft.focus_next() } else { draft.focus_previous() }
                    }
                }
                InputMode::UserForm => {
                    if let Some(form) = state.form.as_mut() {
                        if forward { form.focus_next() } else { form.focus_previous() }
                    }
                }
                _ => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }
        Event::Confirm => Ok(confirm(state)),
        Event::Cancel => Ok((cancel(state), vec![])),
        Event::RefreshUser => {
            let Some(user) = state.selected_user() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(user_id = %user.id, "refreshing user");
            Ok((false, vec![Action::PostToWorker(WorkerMessage::refresh_user(user.id))]))
        }
        Event::Reload => {
            tracing::debug!("reloading directory");
            Ok((false, vec![Action::PostToWorker(WorkerMessage::load_users())]))
        }
        Event::DismissError => {
            if state.store.read(|s| s.error().is_some()) {
                state.store.dispatch(Transition::ErrorDismissed);
                Ok((true, vec![]))
            } else if state.notice.take().is_some() {
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => Ok((handle_worker_response(state, response), vec![])),
    }
}

/// Applies a filter patch. The store resets to page 1, so the cursor goes back to
/// the first row.
fn apply_filters(state: &mut AppState, patch: FilterPatch) {
    state.store.dispatch(Transition::FiltersChanged(patch));
    state.selected_index = 0;
}

fn change_page(state: &mut AppState, event: &Event) -> bool {
    let view = state.view();
    let last = view.page_count();
    let target = match event {
        Event::NextPage => (view.current_page < last).then_some(view.current_page + 1),
        Event::PreviousPage => (view.current_page > 1).then(|| view.current_page - 1),
        Event::FirstPage => (view.current_page != 1).then_some(1),
        Event::LastPage => (view.current_page != last).then_some(last),
        _ => None,
    };

    let Some(page) = target else {
        return false;
    };
    tracing::debug!(from = view.current_page, to = page, "page changed");
    state.store.dispatch(Transition::PaginationChanged(PaginationPatch::page(page)));
    state.selected_index = 0;
    true
}

#[derive(Debug, Clone, Copy)]
enum TextEdit {
    Push(char),
    Pop,
}

impl TextEdit {
    fn apply(self, text: &mut String) {
        match self {
            Self::Push(c) => text.push(c),
            Self::Pop => {
                text.pop();
            }
        }
    }
}

/// Routes a text edit to whichever input currently has focus.
fn edit_text(state: &mut AppState, edit: TextEdit) -> bool {
    match state.input_mode {
        InputMode::Search => {
            let mut query = state.store.read(|s| s.filters.search.clone());
            edit.apply(&mut query);
            tracing::trace!(query = %query, "search query updated");
            apply_filters(state, FilterPatch::search(query));
            true
        }
        InputMode::FilterPanel => state.filter_draft.as_mut().is_some_and(|draft| {
            match edit {
                TextEdit::Push(c) => draft.push(c),
                TextEdit::Pop => draft.pop(),
            }
            true
        }),
        InputMode::UserForm => state.form.as_mut().is_some_and(|form| {
            match edit {
                TextEdit::Push(c) => form.push(c),
                TextEdit::Pop => form.pop(),
            }
            true
        }),
        InputMode::Normal | InputMode::ConfirmDelete => false,
    }
}

fn confirm(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode {
        InputMode::Search => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        InputMode::FilterPanel => {
            if let Some(draft) = state.filter_draft.take() {
                tracing::debug!("filter panel applied");
                apply_filters(state, draft.to_patch());
            }
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        InputMode::UserForm => {
            let Some(form) = state.form.as_mut() else {
                state.input_mode = InputMode::Normal;
                return (true, vec![]);
            };
            let Some(input) = form.submit() else {
                return (true, vec![]);
            };
            let message = match &form.target {
                FormTarget::Create => WorkerMessage::create_user(input),
                FormTarget::Edit(id) => WorkerMessage::update_user(id.clone(), input),
            };
            state.form = None;
            state.input_mode = InputMode::Normal;
            (true, vec![Action::PostToWorker(message)])
        }
        InputMode::ConfirmDelete => {
            state.input_mode = InputMode::Normal;
            match state.pending_delete.take() {
                Some(user) => {
                    tracing::debug!(user_id = %user.id, "delete confirmed");
                    (true, vec![Action::PostToWorker(WorkerMessage::delete_user(user.id))])
                }
                None => (true, vec![]),
            }
        }
        InputMode::Normal => (false, vec![]),
    }
}

fn cancel(state: &mut AppState) -> bool {
    match state.input_mode {
        InputMode::Search => {
            apply_filters(state, FilterPatch::search(""));
            state.input_mode = InputMode::Normal;
        }
        InputMode::FilterPanel => state.filter_draft = None,
        InputMode::UserForm => state.form = None,
        InputMode::ConfirmDelete => state.pending_delete = None,
        InputMode::Normal => return state.notice.take().is_some(),
    }
    state.input_mode = InputMode::Normal;
    true
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> bool {
    let notice = match response {
        WorkerResponse::UsersLoaded { count } => {
            tracing::debug!(count, "directory loaded");
            None
        }
        WorkerResponse::UserCreated { id } => Some(format!("User {id} created")),
        WorkerResponse::UserUpdated { id } => Some(format!("User {id} updated")),
        WorkerResponse::UserDeleted { id } => Some(format!("User {id} deleted")),
        WorkerResponse::UserRefreshed { id } => Some(format!("User {id} refreshed")),
        WorkerResponse::StaleDiscarded => {
            tracing::debug!("stale load discarded, skipping render");
            return false;
        }
        WorkerResponse::Failed { operation, message } => {
            tracing::debug!(operation = %operation, error = %message, "operation failed");
            None
        }
    };

    state.notice = notice;
    state.clamp_selection();
    true
}
