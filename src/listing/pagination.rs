//! Page slicing and page-number clamping.
//!
//! An empty input has **zero** pages. The effective page is still 1 in that case so
//! callers always hold a valid page number; renderers treat zero pages as the empty
//! state and never show "Page 1 of 0".

use std::num::NonZeroUsize;

/// Cards per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// One page of a filtered sequence plus the numbers needed to navigate it.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    /// 1-based, always within `[1, max(total_pages, 1)]`
    pub effective_page: usize,
}

impl<T> Page<'_, T> {
    /// No items matched at all
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    pub fn has_previous(&self) -> bool {
        self.effective_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.effective_page < self.total_pages
    }

    /// `Page X of Y`, or `None` for the empty state.
    pub fn label(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!(
                "Page {} of {}",
                self.effective_page, self.total_pages
            ))
        }
    }
}

/// `ceil(len / page_size)`; zero for an empty sequence.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Clamp any requested page number into `[1, max(total_pages, 1)]`.
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    if requested < 1 {
        return 1;
    }
    usize::try_from(requested).map_or(last, |page| page.min(last))
}

/// Slice `items` into the page nearest to `requested_page`.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, requested_page: i64) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let effective_page = clamp_page(requested_page, total_pages);

    let start = ((effective_page - 1) * page_size.get()).min(items.len());
    let end = (start + page_size.get()).min(items.len());

    Page {
        items: &items[start..end],
        total_pages,
        effective_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn empty_input_has_zero_pages_and_page_one() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, size(4), 7);

        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.effective_page, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.label(), None);
    }

    #[test]
    fn last_page_may_be_short() {
        let items: Vec<u32> = (1..=9).collect();
        let page = paginate(&items, size(4), 3);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.effective_page, 3);
        assert_eq!(page.items, &[9]);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.label().as_deref(), Some("Page 3 of 3"));
    }

    #[test]
    fn middle_page() {
        let items: Vec<u32> = (1..=9).collect();
        let page = paginate(&items, size(4), 2);
        assert_eq!(page.items, &[5, 6, 7, 8]);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn out_of_range_requests_are_clamped() {
        let items: Vec<u32> = (1..=5).collect();

        assert_eq!(paginate(&items, size(4), 0).effective_page, 1);
        assert_eq!(paginate(&items, size(4), -3).effective_page, 1);
        assert_eq!(paginate(&items, size(4), 99).effective_page, 2);
        assert_eq!(paginate(&items, size(4), i64::MAX).effective_page, 2);
        assert_eq!(paginate(&items, size(4), i64::MIN).effective_page, 1);
    }

    #[test]
    fn exact_multiple_fills_every_page() {
        let items: Vec<u32> = (1..=8).collect();
        assert_eq!(total_pages(items.len(), size(4)), 2);
        assert_eq!(paginate(&items, size(4), 2).items, &[5, 6, 7, 8]);
    }

    #[test]
    fn clamp_page_with_no_pages() {
        assert_eq!(clamp_page(5, 0), 1);
        assert_eq!(clamp_page(1, 0), 1);
    }
}
