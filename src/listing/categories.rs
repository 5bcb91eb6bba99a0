//! The category selector's option set.

use crate::listing::filter::ALL_CATEGORIES;
use crate::listing::same_category;
use crate::store::Post;

/// Direction for stepping through the category options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Value handed to the filter (first spelling seen in the data)
    pub value: String,
    /// First letter upper-cased
    pub label: String,
}

impl CategoryOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = capitalize(&value);
        Self { value, label }
    }

    /// The sentinel option that disables category filtering
    pub fn all() -> Self {
        Self::new(ALL_CATEGORIES)
    }

    pub fn matches(&self, category: &str) -> bool {
        same_category(&self.value, category)
    }
}

/// `"all"` followed by each distinct category in first-seen order.
///
/// Categories differing only in case collapse into one option.
pub fn category_options(posts: &[Post]) -> Vec<CategoryOption> {
    let mut options = vec![CategoryOption::all()];
    for post in posts {
        if !options.iter().any(|option| option.matches(&post.category)) {
            options.push(CategoryOption::new(post.category.as_str()));
        }
    }
    options
}

/// The option one step away from `current`, wrapping at both ends.
///
/// An unknown `current` steps from the `"all"` position.
pub fn step_category<'a>(
    options: &'a [CategoryOption],
    current: &str,
    direction: CycleDirection,
) -> Option<&'a CategoryOption> {
    if options.is_empty() {
        return None;
    }
    let position = options
        .iter()
        .position(|option| option.matches(current))
        .unwrap_or(0);
    let next = match direction {
        CycleDirection::Forward => (position + 1) % options.len(),
        CycleDirection::Backward => (position + options.len() - 1) % options.len(),
    };
    options.get(next)
}

/// Upper-case the first character, leave the rest alone.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
