//! Instructions passed from the controller to the display sink.
//!
//! The controller never touches the terminal. It returns a list of these values after
//! every transition and the sink applies them in order.

use crate::listing::CategoryOption;
use crate::preferences::ThemeMode;

/// Everything a card shows for one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub title: String,
    /// Human-readable, e.g. `Wed Jan 03 2024`
    pub date: String,
    pub summary: String,
    pub category: String,
    pub link: String,
    pub image: String,
}

/// Enabled state of the previous/next page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl NavControls {
    pub fn disabled() -> Self {
        Self::default()
    }
}

/// A single change to apply to the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Replace the listing body with these cards
    ShowCards(Vec<PostCard>),
    /// Replace the listing body with a "nothing matched" message
    ShowEmptyState(String),
    /// Replace the listing body with the load failure message
    ShowLoadFailure(String),
    /// `Page X of Y`, empty when there is nothing to page through
    SetPaginationLabel(String),
    SetNavControls(NavControls),
    SetCategoryOptions(Vec<CategoryOption>),
    SetSelectedCategory(String),
    SetSearchText(String),
    SetTheme(ThemeMode),
    /// Smoothly scroll the listing back to its first row
    ScrollToTop,
    SetBackToTopVisible(bool),
    /// Short transient note for the status line
    ShowNotice(String),
}

impl RenderInstruction {
    /// True for instructions that put post content on screen
    pub fn shows_posts(&self) -> bool {
        matches!(self, RenderInstruction::ShowCards(_))
    }
}

/// Anything that can consume render instructions.
pub trait DisplaySink {
    fn apply(&mut self, instruction: RenderInstruction);

    fn apply_all(&mut self, instructions: Vec<RenderInstruction>) {
        for instruction in instructions {
            self.apply(instruction);
        }
    }
}
