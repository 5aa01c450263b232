//! View pipeline: filter, then sort, then paginate.
//!
//! Every stage is a pure function over the record collection. [`compute_view`]
//! composes them in that fixed order and reports the filtered total alongside the
//! visible page, since page bounds and the "showing X to Y" readout both depend on the
//! filtered count rather than the raw collection size.

pub mod accessor;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use accessor::{resolve, FieldValue};
pub use filter::{count_matching, filter_records, FilterPatch, FilterSpec};
pub use paginate::{
    clamp_page, page_count, page_numbers, paginate, PageMarker, PaginationPatch, PaginationSpec,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES,
};
pub use sort::{sort_records, SortDirection, SortSpec};

use crate::domain::User;

/// The rows visible on the current page plus the figures needed to describe them.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub rows: Vec<User>,
    /// Records matching the filters, across all pages.
    pub total_filtered: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl PageView {
    #[must_use]
    pub fn page_count(&self) -> usize {
        page_count(self.total_filtered, self.page_size)
    }

    /// 1-based positions of the first and last visible rows within the filtered set.
    #[must_use]
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let start = (self.current_page - 1) * self.page_size + 1;
        Some((start, start + self.rows.len() - 1))
    }

    /// Readout such as `"Showing 1 to 10 of 25 results"`; `None` when nothing is visible.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.visible_range().map(|(start, end)| {
            format!("Showing {start} to {end} of {} results", self.total_filtered)
        })
    }
}

/// Derives the visible page from the full collection and the current specs.
///
/// # Examples
///
/// ```
/// use userdeck::domain::{User, UserId, UserInput};
/// use userdeck::pipeline::{compute_view, FilterSpec, SortSpec};
///
/// let users: Vec<User> = (1..=25)
///     .map(|id| User::from_input(UserId::Number(id), &UserInput::default()))
///     .collect();
///
/// let view = compute_view(&users, &FilterSpec::default(), &SortSpec::default(), 1, 10);
/// assert_eq!(view.rows.len(), 10);
/// assert_eq!(view.total_filtered, 25);
/// assert_eq!(view.summary().as_deref(), Some("Showing 1 to 10 of 25 results"));
/// ```
#[must_use]
pub fn compute_view(
    records: &[User],
    filters: &FilterSpec,
    sort: &SortSpec,
    page: usize,
    page_size: usize,
) -> PageView {
    let filtered = filter_records(records, filters);
    let ordered = sort_records(&filtered, sort);
    let rows = paginate(&ordered, page, page_size).to_vec();

    PageView {
        rows,
        total_filtered: ordered.len(),
        current_page: page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Organization, UserId, UserInput};

    fn directory(size: i64) -> Vec<User> {
        (1..=size)
            .map(|id| {
                let mut user = User::from_input(UserId::Number(id), &UserInput {
                    name: format!("User {id:02}"),
                    email: format!("user{id}@example.com"),
                    ..UserInput::default()
                });
                user.organization = Some(Organization::named(if id % 8 == 0 { "Acme" } else { "Globex" }));
                user
            })
            .collect()
    }

    #[test]
    fn first_page_of_twenty_five() {
        let users = directory(25);
        let view = compute_view(&users, &FilterSpec::default(), &SortSpec::default(), 1, 10);

        let ids: Vec<String> = view.rows.iter().map(|u| u.id.to_string()).collect();
        assert_eq!(ids, (1..=10).map(|i| i.to_string()).collect::<Vec<_>>());
        assert_eq!(view.total_filtered, 25);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.summary().as_deref(), Some("Showing 1 to 10 of 25 results"));
    }

    #[test]
    fn last_partial_page_summary() {
        let users = directory(25);
        let view = compute_view(&users, &FilterSpec::default(), &SortSpec::default(), 3, 10);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.summary().as_deref(), Some("Showing 21 to 25 of 25 results"));
    }

    #[test]
    fn changing_page_never_changes_filtered_total() {
        let users = directory(25);
        let filters = FilterSpec {
            company: "globex".into(),
            ..FilterSpec::default()
        };
        let sort = SortSpec::by("name", SortDirection::Descending);

        let totals: Vec<usize> = (0..=6)
            .map(|page| compute_view(&users, &filters, &sort, page, 10).total_filtered)
            .collect();
        assert!(totals.iter().all(|&total| total == 22), "{totals:?}");
    }

    #[test]
    fn stages_run_filter_then_sort_then_paginate() {
        let users = directory(25);
        let filters = FilterSpec {
            company: "acme".into(),
            ..FilterSpec::default()
        };
        let sort = SortSpec::by("id", SortDirection::Descending);

        let view = compute_view(&users, &filters, &sort, 1, 2);
        let ids: Vec<String> = view.rows.iter().map(|u| u.id.to_string()).collect();
        assert_eq!(ids, vec!["24", "16"]);
        assert_eq!(view.total_filtered, 3);
        assert_eq!(view.page_count(), 2);
    }

    #[test]
    fn empty_page_has_no_summary() {
        let view = compute_view(&[], &FilterSpec::default(), &SortSpec::default(), 1, 10);
        assert!(view.rows.is_empty());
        assert_eq!(view.summary(), None);
        assert_eq!(view.page_count(), 1);
    }
}
