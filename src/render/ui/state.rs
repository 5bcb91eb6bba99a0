//! What the terminal currently shows.
//!
//! `ViewState` is the display sink: it applies render instructions from the
//! controller and keeps the purely visual state (scroll rows, prompt focus,
//! terminal size) that the controller does not own.

use crate::input::ScrollDirection;
use crate::listing::CategoryOption;
use crate::preferences::ThemeMode;
use crate::render::protocol::{DisplaySink, NavControls, PostCard, RenderInstruction};
use crate::render::scroll::rows_to_units;

/// Rows used above the listing (search box and category bar).
pub const HEADER_ROWS: u16 = 2;
/// Rows used below the listing (pagination bar and status line).
pub const FOOTER_ROWS: u16 = 2;
/// Rows each card occupies, including its separator.
pub const CARD_ROWS: u16 = 5;

/// Main content of the listing area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingBody {
    /// Posts are still loading
    Loading,
    Cards(Vec<PostCard>),
    Empty(String),
    LoadFailed(String),
}

#[derive(Debug)]
pub struct ViewState {
    pub body: ListingBody,
    pub pagination_label: String,
    pub nav: NavControls,
    pub category_options: Vec<CategoryOption>,
    pub selected_category: String,
    pub search_text: String,
    pub theme: ThemeMode,
    pub back_to_top_visible: bool,

    /// Rows scrolled off the top of the listing
    pub scroll_rows: u16,
    /// A smooth scroll-to-top is in progress
    pub scrolling_to_top: bool,

    pub status_line: StatusLine,

    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            body: ListingBody::Loading,
            pagination_label: String::new(),
            nav: NavControls::disabled(),
            category_options: vec![CategoryOption::all()],
            selected_category: CategoryOption::all().value,
            search_text: String::new(),
            theme: ThemeMode::default(),
            back_to_top_visible: false,
            scroll_rows: 0,
            scrolling_to_top: false,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Rows available to the listing body
    pub fn body_rows(&self) -> u16 {
        self.viewport_height
            .saturating_sub(HEADER_ROWS + FOOTER_ROWS)
    }

    /// Total rows the current body needs
    pub fn content_rows(&self) -> u16 {
        match &self.body {
            ListingBody::Cards(cards) => {
                u16::try_from(cards.len()).unwrap_or(u16::MAX).saturating_mul(CARD_ROWS)
            }
            _ => 1,
        }
    }

    pub fn max_scroll_rows(&self) -> u16 {
        self.content_rows().saturating_sub(self.body_rows())
    }

    /// Scroll offset in scroll units, as reported to the controller
    pub fn scroll_units(&self) -> u32 {
        rows_to_units(self.scroll_rows)
    }

    /// Move the listing by `lines` rows. Returns true if the offset changed.
    pub fn scroll_by(&mut self, direction: ScrollDirection, lines: u64) -> bool {
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        let before = self.scroll_rows;
        self.scrolling_to_top = false;
        self.scroll_rows = match direction {
            ScrollDirection::Up => self.scroll_rows.saturating_sub(lines),
            ScrollDirection::Down => self
                .scroll_rows
                .saturating_add(lines)
                .min(self.max_scroll_rows()),
        };
        self.scroll_rows != before
    }

    /// One step of a smooth scroll-to-top. Returns true if the offset changed.
    pub fn advance_scroll_animation(&mut self) -> bool {
        if !self.scrolling_to_top {
            return false;
        }
        if self.scroll_rows == 0 {
            self.scrolling_to_top = false;
            return false;
        }
        let step = (self.scroll_rows / 3).max(1);
        self.scroll_rows -= step;
        if self.scroll_rows == 0 {
            self.scrolling_to_top = false;
        }
        true
    }

    /// Update terminal dimensions. Returns true if they changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;

        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            self.scroll_rows = self.scroll_rows.min(self.max_scroll_rows());
        }

        changed
    }

    /// Label of the selected category option
    pub fn selected_category_label(&self) -> &str {
        self.category_options
            .iter()
            .find(|option| option.matches(&self.selected_category))
            .map_or(self.selected_category.as_str(), |option| option.label.as_str())
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(self.theme, self.back_to_top_visible)
    }
}

impl DisplaySink for ViewState {
    fn apply(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::ShowCards(cards) => {
                self.body = ListingBody::Cards(cards);
                self.scroll_rows = self.scroll_rows.min(self.max_scroll_rows());
            }
            RenderInstruction::ShowEmptyState(message) => {
                self.body = ListingBody::Empty(message);
                self.scroll_rows = 0;
            }
            RenderInstruction::ShowLoadFailure(message) => {
                self.body = ListingBody::LoadFailed(message);
                self.scroll_rows = 0;
            }
            RenderInstruction::SetPaginationLabel(label) => self.pagination_label = label,
            RenderInstruction::SetNavControls(nav) => self.nav = nav,
            RenderInstruction::SetCategoryOptions(options) => self.category_options = options,
            RenderInstruction::SetSelectedCategory(category) => {
                self.selected_category = category
            }
            RenderInstruction::SetSearchText(text) => self.search_text = text,
            RenderInstruction::SetTheme(theme) => self.theme = theme,
            RenderInstruction::ScrollToTop => {
                self.scrolling_to_top = self.scroll_rows > 0;
            }
            RenderInstruction::SetBackToTopVisible(visible) => {
                self.back_to_top_visible = visible
            }
            RenderInstruction::ShowNotice(message) => self.status_line.set_message(message),
        }
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    /// The search box has keyboard focus
    pub editing_search: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn start_search_edit(&mut self) {
        self.editing_search = true;
    }

    pub fn finish_search_edit(&mut self) {
        self.editing_search = false;
    }

    /// Key hints, theme glyph and the back-to-top hint when it is offered
    pub fn format_status_line(&self, theme: ThemeMode, back_to_top: bool) -> String {
        let mut parts = Vec::new();
        if self.editing_search {
            parts.push("Enter/Esc done · Ctrl-U clear".to_string());
        } else {
            parts.push("/ search · Tab category · ←/→ page · q quit".to_string());
        }
        parts.push(format!("t {}", theme.toggle_glyph()));
        if back_to_top {
            parts.push("g ↑ top".to_string());
        }
        if let Some(ref message) = self.message {
            parts.push(message.clone());
        }
        parts.join(" | ")
    }
}
