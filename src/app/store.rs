//! Directory state store.
//!
//! [`DirectoryState`] is the single source of truth for the dashboard: the full record
//! collection, the filter, sort and pagination specs, and the request status.
//! [`reduce`] applies one [`Transition`] to it as a pure function, and [`Store`] shares
//! the state between the UI loop and the worker tasks, applying each transition under
//! one lock so no transition is ever observed half-applied.
//!
//! # Page clamping
//!
//! After every transition that can change the filtered total or the page size, the
//! current page is clamped into `[1, max(1, ceil(total_filtered / page_size))]`.
//! Filter changes always reset the page to 1.

use super::transitions::Transition;
use crate::domain::User;
use crate::pipeline::{
    clamp_page, compute_view, count_matching, FilterSpec, PageView, PaginationSpec, SortSpec,
    DEFAULT_PAGE_SIZE,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Status of gateway requests as seen by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    /// The last failed operation's message. Stays until dismissed or a reload succeeds.
    Error(String),
}

impl RequestStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Idle | Self::Loading => None,
        }
    }
}

/// Full dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryState {
    pub records: Vec<User>,
    pub status: RequestStatus,
    pub filters: FilterSpec,
    pub sort: SortSpec,
    pub pagination: PaginationSpec,
    /// Gateway calls started and not yet finished.
    in_flight: usize,
    /// Bumped whenever the record collection changes.
    revision: u64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl DirectoryState {
    /// Initial state with the given page size. A zero size falls back to the default.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Self {
            records: Vec::new(),
            status: RequestStatus::Idle,
            filters: FilterSpec::default(),
            sort: SortSpec::default(),
            pagination: PaginationSpec {
                page_size,
                ..PaginationSpec::default()
            },
            in_flight: 0,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.status.error_message()
    }

    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Records matching the current filters, across all pages.
    #[must_use]
    pub fn total_filtered(&self) -> usize {
        count_matching(&self.records, &self.filters)
    }

    /// The page currently visible, derived from the collection and specs.
    #[must_use]
    pub fn view(&self) -> PageView {
        compute_view(
            &self.records,
            &self.filters,
            &self.sort,
            self.pagination.current_page,
            self.pagination.page_size,
        )
    }

    /// Status to fall back to once nothing is failing: loading while calls remain.
    fn settled_status(&self) -> RequestStatus {
        if self.in_flight > 0 {
            RequestStatus::Loading
        } else {
            RequestStatus::Idle
        }
    }

    fn records_changed(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.clamp_current_page();
    }

    fn clamp_current_page(&mut self) {
        let total = self.total_filtered();
        self.pagination.current_page =
            clamp_page(self.pagination.current_page, total, self.pagination.page_size);
    }
}

/// Applies `transition` to `state` and returns the new state.
///
/// Total over every transition. Updates and deletes naming an id that is not in the
/// collection leave the state unchanged.
///
/// # Examples
///
/// ```
/// use userdeck::app::store::{reduce, DirectoryState};
/// use userdeck::app::Transition;
/// use userdeck::pipeline::FilterPatch;
///
/// let mut state = DirectoryState::default();
/// state.pagination.current_page = 3;
///
/// let state = reduce(state, Transition::FiltersChanged(FilterPatch::default()));
/// assert_eq!(state.pagination.current_page, 1);
/// ```
#[must_use]
pub fn reduce(mut state: DirectoryState, transition: Transition) -> DirectoryState {
    match transition {
        Transition::BeginLoading => {
            state.in_flight += 1;
            state.status = RequestStatus::Loading;
        }
        Transition::LoadingFinished => {
            state.in_flight = state.in_flight.saturating_sub(1);
            if state.status.is_loading() {
                state.status = state.settled_status();
            }
        }
        Transition::RecordsLoaded(records) => {
            state.records = records;
            state.status = state.settled_status();
            state.records_changed();
        }
        Transition::OperationFailed(message) => {
            state.status = RequestStatus::Error(message);
        }
        Transition::ErrorDismissed => {
            if state.error().is_some() {
                state.status = state.settled_status();
            }
        }
        Transition::RecordCreated(user) => {
            state.records.insert(0, user);
            state.pagination.total_items += 1;
            state.records_changed();
        }
        Transition::RecordUpdated(user) => {
            if let Some(slot) = state.records.iter_mut().find(|record| record.id == user.id) {
                *slot = user;
                state.records_changed();
            } else {
                tracing::debug!(id = %user.id, "update for unknown user ignored");
            }
        }
        Transition::RecordDeleted(id) => {
            if let Some(position) = state.records.iter().position(|record| record.id == id) {
                state.records.remove(position);
                state.pagination.total_items = state.pagination.total_items.saturating_sub(1);
                state.records_changed();
            } else {
                tracing::debug!(%id, "delete for unknown user ignored");
            }
        }
        Transition::FiltersChanged(patch) => {
            state.filters.merge(patch);
            state.pagination.current_page = 1;
        }
        Transition::PaginationChanged(patch) => {
            state.pagination.merge(patch);
            state.clamp_current_page();
        }
        Transition::SortChanged(spec) => {
            state.sort = spec;
        }
    }
    state
}

/// Token taken when a load is issued, used to detect that its result went stale.
///
/// A load result is current only if no later load was issued and the record collection
/// has not changed since the ticket was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    revision: u64,
}

#[derive(Debug, Default)]
struct Shared {
    state: DirectoryState,
    load_seq: u64,
}

impl Shared {
    fn apply(&mut self, transition: Transition) {
        let name = transition.name();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, transition);
        tracing::debug!(
            transition = name,
            revision = self.state.revision,
            in_flight = self.state.in_flight,
            page = self.state.pagination.current_page,
            status = ?self.state.status,
            "transition applied"
        );
    }

    const fn is_current(&self, ticket: LoadTicket) -> bool {
        self.load_seq == ticket.seq && self.state.revision == ticket.revision
    }
}

/// Shared handle to the directory state.
///
/// Cloning is cheap and every clone sees the same state. Construct one at startup and
/// pass it to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct Store {
    shared: Arc<Mutex<Shared>>,
}

impl Store {
    #[must_use]
    pub fn new(state: DirectoryState) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared { state, load_seq: 0 })),
        }
    }

    // A panic while holding the lock cannot leave the state half-updated: `reduce`
    // runs on an owned value and the result is stored in one assignment.
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one transition atomically.
    pub fn dispatch(&self, transition: Transition) {
        self.lock().apply(transition);
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DirectoryState {
        self.lock().state.clone()
    }

    /// Runs `f` against the current state while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&DirectoryState) -> R) -> R {
        f(&self.lock().state)
    }

    /// Registers a new load and returns its ticket. Earlier tickets become stale.
    #[must_use]
    pub fn begin_load(&self) -> LoadTicket {
        let mut shared = self.lock();
        shared.load_seq += 1;
        LoadTicket {
            seq: shared.load_seq,
            revision: shared.state.revision,
        }
    }

    /// Applies `transitions` only if `ticket` is still current.
    ///
    /// The check and every transition happen under one lock. Returns whether the
    /// transitions were applied.
    pub fn dispatch_if_current(
        &self,
        ticket: LoadTicket,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> bool {
        let mut shared = self.lock();
        if !shared.is_current(ticket) {
            tracing::debug!(
                ticket_seq = ticket.seq,
                latest_seq = shared.load_seq,
                ticket_revision = ticket.revision,
                revision = shared.state.revision,
                "stale load result discarded"
            );
            return false;
        }
        for transition in transitions {
            shared.apply(transition);
        }
        true
    }

    /// Marks a request as in flight until the returned guard is dropped.
    #[must_use = "loading ends as soon as the guard is dropped"]
    pub fn loading(&self) -> LoadingGuard {
        self.dispatch(Transition::BeginLoading);
        LoadingGuard { store: self.clone() }
    }
}

/// Keeps the store in the loading state for the guard's lifetime.
///
/// Dropping the guard dispatches [`Transition::LoadingFinished`] on every exit path,
/// including early returns, task cancellation and unwinding.
#[derive(Debug)]
pub struct LoadingGuard {
    store: Store,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.dispatch(Transition::LoadingFinished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Organization, UserId, UserInput};
    use crate::pipeline::{FilterPatch, PaginationPatch, SortDirection};

    fn user(id: i64, company: &str) -> User {
        let mut user = User::from_input(UserId::Number(id), &UserInput {
            name: format!("User {id:02}"),
            email: format!("user{id}@example.com"),
            ..UserInput::default()
        });
        user.organization = Some(Organization::named(company));
        user
    }

    /// 25 users; ids 5, 12 and 19 work at Acme.
    fn loaded_state() -> DirectoryState {
        let users: Vec<User> = (1..=25)
            .map(|id| user(id, if id % 7 == 5 { "Acme" } else { "Initech" }))
            .collect();
        let state = reduce(DirectoryState::default(), Transition::RecordsLoaded(users));
        reduce(state, Transition::PaginationChanged(PaginationPatch::total_items(25)))
    }

    #[test]
    fn initial_state() {
        let state = DirectoryState::default();
        assert!(state.records.is_empty());
        assert_eq!(state.status, RequestStatus::Idle);
        assert!(state.filters.is_empty());
        assert_eq!(state.sort, SortSpec::default());
        assert_eq!(state.pagination, PaginationSpec::default());
        assert_eq!(DirectoryState::with_page_size(0).pagination.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(DirectoryState::with_page_size(25).pagination.page_size, 25);
    }

    #[test]
    fn filters_changed_always_resets_page() {
        let mut state = loaded_state();
        state.pagination.current_page = 2;

        let same = FilterPatch::replace_with(&state.filters);
        let state = reduce(state, Transition::FiltersChanged(same));
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn company_filter_from_page_three_shows_single_page() {
        let state = reduce(loaded_state(), Transition::PaginationChanged(PaginationPatch::page(3)));
        assert_eq!(state.pagination.current_page, 3);

        let state = reduce(state, Transition::FiltersChanged(FilterPatch::company("Acme")));
        let view = state.view();
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(view.total_filtered, 3);
        assert_eq!(view.page_count(), 1);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn created_record_goes_first_and_counts() {
        let state = loaded_state();
        let created = User::from_input(UserId::Number(99), &UserInput {
            name: "X".into(),
            ..UserInput::default()
        });

        let state = reduce(state, Transition::RecordCreated(created.clone()));
        assert_eq!(state.records.len(), 26);
        assert_eq!(state.records[0], created);
        assert_eq!(state.pagination.total_items, 26);
    }

    #[test]
    fn repeated_delete_is_a_noop() {
        let state = reduce(loaded_state(), Transition::RecordDeleted(UserId::Number(7)));
        assert_eq!(state.records.len(), 24);
        assert_eq!(state.pagination.total_items, 24);

        let again = reduce(state.clone(), Transition::RecordDeleted(UserId::Number(7)));
        assert_eq!(again, state);
    }

    #[test]
    fn update_for_absent_id_leaves_collection_unchanged() {
        let state = loaded_state();
        let ghost = user(404, "Nowhere");
        let after = reduce(state.clone(), Transition::RecordUpdated(ghost));
        assert_eq!(after, state);
    }

    #[test]
    fn update_replaces_in_place() {
        let state = loaded_state();
        let mut changed = user(3, "Acme");
        changed.name = "Renamed".into();

        let state = reduce(state, Transition::RecordUpdated(changed.clone()));
        assert_eq!(state.records[2], changed);
        assert_eq!(state.records.len(), 25);
    }

    #[test]
    fn deleting_last_record_of_last_page_clamps_page() {
        let state = reduce(loaded_state(), Transition::PaginationChanged(PaginationPatch::page(3)));
        let state = (21..=25).fold(state, |state, id| {
            reduce(state, Transition::RecordDeleted(UserId::Number(id)))
        });
        assert_eq!(state.records.len(), 20);
        assert_eq!(state.pagination.current_page, 2);
    }

    #[test]
    fn larger_page_size_clamps_page() {
        let state = reduce(loaded_state(), Transition::PaginationChanged(PaginationPatch::page(3)));
        let state = reduce(state, Transition::PaginationChanged(PaginationPatch::page_size(50)));
        assert_eq!(state.pagination.current_page, 1);

        let state = reduce(state, Transition::PaginationChanged(PaginationPatch::page(9)));
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn sort_is_replaced_wholesale() {
        let spec = SortSpec::by("email", SortDirection::Descending);
        let state = reduce(loaded_state(), Transition::SortChanged(spec.clone()));
        assert_eq!(state.sort, spec);
        let state = reduce(state, Transition::SortChanged(SortSpec::default()));
        assert_eq!(state.sort.key, None);
    }

    #[test]
    fn loading_tracks_overlapping_calls() {
        let state = reduce(DirectoryState::default(), Transition::BeginLoading);
        let state = reduce(state, Transition::BeginLoading);
        let state = reduce(state, Transition::LoadingFinished);
        assert!(state.is_loading());
        let state = reduce(state, Transition::LoadingFinished);
        assert_eq!(state.status, RequestStatus::Idle);
        assert_eq!(state.in_flight(), 0);

        let state = reduce(state, Transition::LoadingFinished);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn failure_survives_loading_finished_until_dismissed() {
        let state = reduce(loaded_state(), Transition::BeginLoading);
        let state = reduce(state, Transition::OperationFailed("User 7 not found".into()));
        assert!(!state.is_loading());
        let state = reduce(state, Transition::LoadingFinished);
        assert_eq!(state.error(), Some("User 7 not found"));

        let state = reduce(state, Transition::ErrorDismissed);
        assert_eq!(state.status, RequestStatus::Idle);
    }

    #[test]
    fn successful_load_clears_error() {
        let state = reduce(DirectoryState::default(), Transition::OperationFailed("boom".into()));
        let state = reduce(state, Transition::RecordsLoaded(vec![user(1, "Acme")]));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn guard_clears_loading_on_drop() {
        let store = Store::default();
        {
            let _guard = store.loading();
            assert!(store.read(DirectoryState::is_loading));
        }
        assert!(!store.read(DirectoryState::is_loading));
        assert_eq!(store.read(DirectoryState::in_flight), 0);
    }

    #[test]
    fn guard_clears_loading_when_unwinding() {
        let store = Store::default();
        let cloned = store.clone();
        let outcome = std::panic::catch_unwind(move || {
            let _guard = cloned.loading();
            panic!("request task panicked");
        });
        assert!(outcome.is_err());
        assert!(!store.read(DirectoryState::is_loading));
    }

    #[test]
    fn stale_ticket_is_rejected() {
        let store = Store::new(loaded_state());

        let first = store.begin_load();
        let second = store.begin_load();
        assert!(!store.dispatch_if_current(first, [Transition::RecordsLoaded(vec![])]));
        assert_eq!(store.read(|state| state.records.len()), 25);

        let third = store.begin_load();
        assert!(!store.dispatch_if_current(second, [Transition::RecordsLoaded(vec![])]));

        store.dispatch(Transition::RecordDeleted(UserId::Number(1)));
        assert!(!store.dispatch_if_current(third, [Transition::RecordsLoaded(vec![])]));
        assert_eq!(store.read(|state| state.records.len()), 24);

        let fourth = store.begin_load();
        store.dispatch(Transition::FiltersChanged(FilterPatch::search("user")));
        assert!(store.dispatch_if_current(
            fourth,
            [
                Transition::RecordsLoaded(vec![user(1, "Acme")]),
                Transition::PaginationChanged(PaginationPatch::total_items(1)),
            ]
        ));
        let state = store.snapshot();
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.pagination.total_items, 1);
    }
}
