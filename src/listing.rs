//! The listing pipeline: filter, paginate, derive category options.
//!
//! Everything here is pure. The controller calls these on every state change and
//! the results depend only on the arguments.

pub mod categories;
pub mod filter;
pub mod pagination;

pub use categories::{category_options, CategoryOption, CycleDirection};
pub use filter::{filter_posts, FilterCriteria, ALL_CATEGORIES};
pub use pagination::{clamp_page, paginate, total_pages, Page, DEFAULT_PAGE_SIZE};

/// Case-insensitive equality used for every category comparison.
pub(crate) fn same_category(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
