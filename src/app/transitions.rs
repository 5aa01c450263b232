//! State transitions accepted by the directory store.
//!
//! [`Transition`] is the closed set of changes the store understands. The UI dispatches
//! filter, sort and page transitions directly; the worker dispatches the loading and
//! record transitions around each gateway call.

use crate::domain::{User, UserId};
use crate::pipeline::{FilterPatch, PaginationPatch, SortSpec};

/// A named state-change request.
///
/// Applied by [`reduce`](super::store::reduce), which handles every variant. There is
/// no catch-all variant; a new transition must be handled before the crate compiles.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A gateway call is about to be issued.
    BeginLoading,

    /// A gateway call settled, successfully or not.
    ///
    /// Emitted by the loading guard when it is dropped, so it arrives after the
    /// call's success or failure transition.
    LoadingFinished,

    /// A full load replaced the collection.
    RecordsLoaded(Vec<User>),

    /// A gateway call failed; the message is shown to the user.
    OperationFailed(String),

    /// The user acknowledged the current error.
    ErrorDismissed,

    /// A user was created and goes to the front of the collection.
    RecordCreated(User),

    /// A user was changed on the server; replaces the record with the same id.
    RecordUpdated(User),

    /// A user was deleted on the server.
    RecordDeleted(UserId),

    FiltersChanged(FilterPatch),

    PaginationChanged(PaginationPatch),

    /// Replaces the sort spec wholesale.
    SortChanged(SortSpec),
}

impl Transition {
    /// Short variant name for log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BeginLoading => "begin_loading",
            Self::LoadingFinished => "loading_finished",
            Self::RecordsLoaded(_) => "records_loaded",
            Self::OperationFailed(_) => "operation_failed",
            Self::ErrorDismissed => "error_dismissed",
            Self::RecordCreated(_) => "record_created",
            Self::RecordUpdated(_) => "record_updated",
            Self::RecordDeleted(_) => "record_deleted",
            Self::FiltersChanged(_) => "filters_changed",
            Self::PaginationChanged(_) => "pagination_changed",
            Self::SortChanged(_) => "sort_changed",
        }
    }
}
