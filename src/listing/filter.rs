//! Text and category filtering over the post store.

use crate::listing::same_category;
use crate::store::Post;

/// Category sentinel that disables the category predicate.
pub const ALL_CATEGORIES: &str = "all";

/// The two filter inputs, as owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FilterCriteria {
    pub fn new(search_text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            category: category.into(),
        }
    }

    pub fn is_all_categories(&self) -> bool {
        same_category(&self.category, ALL_CATEGORIES)
    }

    /// Apply the criteria to `posts`, keeping order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        filter_posts(posts, &self.search_text, &self.category)
    }
}

/// Posts whose title or summary contains `search_text` (case-insensitive) and whose
/// category equals `category` (case-insensitive, `"all"` matches every post).
///
/// The result is a subsequence of `posts` in the original order.
pub fn filter_posts<'a>(posts: &'a [Post], search_text: &str, category: &str) -> Vec<&'a Post> {
    let needle = search_text.to_lowercase();
    let any_category = same_category(category, ALL_CATEGORIES);
    let wanted_category = category.to_lowercase();

    posts
        .iter()
        .filter(|post| {
            let matches_text = needle.is_empty()
                || post.title.to_lowercase().contains(&needle)
                || post.summary.to_lowercase().contains(&needle);
            let matches_category =
                any_category || post.category.to_lowercase() == wanted_category;
            matches_text && matches_category
        })
        .collect()
}
