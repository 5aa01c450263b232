//! Page slicing and the page-number window shown by the pagination bar.

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pages shown on each side of the current page before a gap.
const WINDOW_DELTA: usize = 2;

/// Current page position. `current_page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSpec {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

/// Partial pagination update; `None` leaves the current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub current_page: Option<usize>,
    pub page_size: Option<usize>,
    pub total_items: Option<usize>,
}

impl PaginationPatch {
    #[must_use]
    pub const fn page(page: usize) -> Self {
        Self {
            current_page: Some(page),
            page_size: None,
            total_items: None,
        }
    }

    #[must_use]
    pub const fn page_size(size: usize) -> Self {
        Self {
            current_page: None,
            page_size: Some(size),
            total_items: None,
        }
    }

    #[must_use]
    pub const fn total_items(total: usize) -> Self {
        Self {
            current_page: None,
            page_size: None,
            total_items: Some(total),
        }
    }
}

impl PaginationSpec {
    /// Applies a partial update. A zero page size is rejected and leaves the size as is.
    pub fn merge(&mut self, patch: PaginationPatch) {
        if let Some(page) = patch.current_page {
            self.current_page = page;
        }
        if let Some(size) = patch.page_size.filter(|&size| size > 0) {
            self.page_size = size;
        }
        if let Some(total) = patch.total_items {
            self.total_items = total;
        }
    }

    /// Next entry of [`PAGE_SIZE_CHOICES`] above or below the current size.
    ///
    /// Returns `None` at either end of the list. A size that is not one of the choices
    /// steps to the nearest choice in the requested direction.
    #[must_use]
    pub fn step_page_size(&self, larger: bool) -> Option<usize> {
        if larger {
            PAGE_SIZE_CHOICES.iter().copied().find(|&size| size > self.page_size)
        } else {
            PAGE_SIZE_CHOICES.iter().rev().copied().find(|&size| size < self.page_size)
        }
    }
}

/// Returns the `page`-th slice of `items` (1-based), clipped to the slice bounds.
///
/// Out-of-range pages, page 0 and a zero page size all yield an empty slice. Keeping
/// the page in range is the caller's job.
///
/// # Examples
///
/// ```
/// use userdeck::pipeline::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
/// assert!(paginate(&items, 4, 10).is_empty());
/// ```
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items; at least 1.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Clamps `page` into `[1, page_count(total, page_size)]`.
#[must_use]
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total, page_size))
}

/// One entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Gap,
}

/// Page window for the pagination bar.
///
/// The first and last pages are always listed, together with up to two pages on
/// either side of `current`. Skipped runs collapse into a single [`PageMarker::Gap`].
///
/// # Examples
///
/// ```
/// use userdeck::pipeline::{page_numbers, PageMarker::{Gap, Page}};
///
/// assert_eq!(
///     page_numbers(6, 12),
///     vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7), Page(8), Gap, Page(12)]
/// );
/// ```
#[must_use]
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return vec![PageMarker::Page(1)];
    }

    let low = current.saturating_sub(WINDOW_DELTA).max(2);
    let high = current.saturating_add(WINDOW_DELTA).min(total_pages - 1);

    let mut markers = vec![PageMarker::Page(1)];
    if current.saturating_sub(WINDOW_DELTA) > 2 {
        markers.push(PageMarker::Gap);
    }
    markers.extend((low..=high).map(PageMarker::Page));
    if current.saturating_add(WINDOW_DELTA) < total_pages - 1 {
        markers.push(PageMarker::Gap);
    }
    markers.push(PageMarker::Page(total_pages));
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::PageMarker::{Gap, Page};

    #[test]
    fn slice_length_law() {
        let items: Vec<usize> = (0..23).collect();
        for size in 1..=12 {
            for page in 1..=30 {
                let expected = size.min(items.len().saturating_sub((page - 1) * size));
                assert_eq!(paginate(&items, page, size).len(), expected, "page {page} size {size}");
            }
        }
    }

    #[test]
    fn concatenated_pages_reconstruct_input() {
        let items: Vec<usize> = (0..47).collect();
        for size in [1, 5, 10, 25, 47, 100] {
            let rebuilt: Vec<usize> = (1..=page_count(items.len(), size))
                .flat_map(|page| paginate(&items, page, size).iter().copied())
                .collect();
            assert_eq!(rebuilt, items, "size {size}");
        }
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, usize::MAX).is_empty());
        assert!(paginate::<u8>(&[], 1, 10).is_empty());
    }

    #[test]
    fn page_count_and_clamp() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(30, 10), 3);
        assert_eq!(clamp_page(0, 25, 10), 1);
        assert_eq!(clamp_page(7, 25, 10), 3);
        assert_eq!(clamp_page(2, 3, 10), 1);
    }

    #[test]
    fn merge_ignores_zero_page_size() {
        let mut spec = PaginationSpec::default();
        spec.merge(PaginationPatch {
            current_page: Some(3),
            page_size: Some(0),
            total_items: Some(40),
        });
        assert_eq!(spec.current_page, 3);
        assert_eq!(spec.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(spec.total_items, 40);
    }

    #[test]
    fn page_size_steps_through_choices() {
        let spec = PaginationSpec::default();
        assert_eq!(spec.step_page_size(true), Some(25));
        assert_eq!(spec.step_page_size(false), None);

        let spec = PaginationSpec {
            page_size: 30,
            ..PaginationSpec::default()
        };
        assert_eq!(spec.step_page_size(true), Some(50));
        assert_eq!(spec.step_page_size(false), Some(25));
    }

    #[test]
    fn window_near_edges_has_no_gaps() {
        assert_eq!(page_numbers(1, 1), vec![Page(1)]);
        assert_eq!(page_numbers(1, 0), vec![Page(1)]);
        assert_eq!(page_numbers(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_numbers(3, 5), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
        assert_eq!(page_numbers(1, 5), vec![Page(1), Page(2), Page(3), Gap, Page(5)]);
        assert_eq!(
            page_numbers(1, 8),
            vec![Page(1), Page(2), Page(3), Gap, Page(8)]
        );
        assert_eq!(
            page_numbers(8, 8),
            vec![Page(1), Gap, Page(6), Page(7), Page(8)]
        );
    }
}
