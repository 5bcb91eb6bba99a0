//! Turns a page of posts into display instructions.

use crate::listing::Page;
use crate::render::protocol::{NavControls, PostCard, RenderInstruction};
use crate::store::Post;

/// Shown instead of cards when no post matches the filters.
pub const EMPTY_STATE_MESSAGE: &str = "No posts found matching your criteria.";

/// Message shown for the terminal load failure state.
pub fn load_failure_message(source_name: &str) -> String {
    format!(
        "Failed to load posts. Please check the '{}' data file.",
        source_name
    )
}

pub fn post_card(post: &Post) -> PostCard {
    PostCard {
        title: post.title.clone(),
        date: post.display_date(),
        summary: post.summary.clone(),
        category: post.category.clone(),
        link: post.link.clone(),
        image: post.image.clone(),
    }
}

/// Instructions for one page: cards (or the empty state), label and nav controls.
///
/// For zero pages both controls are disabled and the label is cleared.
pub fn render_listing(page: &Page<'_, &Post>) -> Vec<RenderInstruction> {
    if page.is_empty() {
        return vec![
            RenderInstruction::ShowEmptyState(EMPTY_STATE_MESSAGE.to_string()),
            RenderInstruction::SetPaginationLabel(String::new()),
            RenderInstruction::SetNavControls(NavControls::disabled()),
        ];
    }

    let cards = page.items.iter().map(|post| post_card(post)).collect();
    vec![
        RenderInstruction::ShowCards(cards),
        RenderInstruction::SetPaginationLabel(page.label().unwrap_or_default()),
        RenderInstruction::SetNavControls(NavControls {
            previous_enabled: page.has_previous(),
            next_enabled: page.has_next(),
        }),
    ]
}

/// Instructions for the terminal failure state.
pub fn render_load_failure(source_name: &str) -> Vec<RenderInstruction> {
    vec![
        RenderInstruction::ShowLoadFailure(load_failure_message(source_name)),
        RenderInstruction::SetPaginationLabel(String::new()),
        RenderInstruction::SetNavControls(NavControls::disabled()),
    ]
}
