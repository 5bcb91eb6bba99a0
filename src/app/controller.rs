//! The listing controller.
//!
//! Owns every piece of mutable listing state: the load lifecycle, the filter
//! criteria, the current page, the theme and the scroll tracker. Each notification
//! method mutates that state and returns the render instructions describing the
//! result. Nothing here touches the terminal.

use crate::app::lifecycle::LoadState;
use crate::config::Config;
use crate::error::Result;
use crate::listing::categories::step_category;
use crate::listing::{
    category_options, paginate, total_pages, CategoryOption, CycleDirection, FilterCriteria,
    DEFAULT_PAGE_SIZE,
};
use crate::preferences::{PreferenceStore, ThemeMode, THEME_KEY};
use crate::render::protocol::RenderInstruction;
use crate::render::scroll::{ScrollState, DEFAULT_BACK_TO_TOP_THRESHOLD};
use crate::render::view;
use crate::store::{Post, PostStore};
use log::{debug, error, info, warn};
use std::num::NonZeroUsize;

/// Status line note shown when the theme could not be persisted.
pub const THEME_NOT_SAVED_NOTICE: &str = "Theme preference not saved";

/// Construction parameters for [`ListingController`].
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub page_size: NonZeroUsize,
    pub back_to_top_threshold: u32,
    /// Named in the load failure message
    pub source_name: String,
    /// Session-only theme; the stored preference is not read when set
    pub theme_override: Option<ThemeMode>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD,
            source_name: crate::config::DEFAULT_DATA_PATH.to_string(),
            theme_override: None,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            page_size: config.page_size()?,
            back_to_top_threshold: config.back_to_top_threshold,
            source_name: config.data_path.display().to_string(),
            theme_override: None,
        })
    }
}

/// Filter and pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub criteria: FilterCriteria,
    /// 1-based; clamped after every render
    pub current_page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            current_page: 1,
        }
    }
}

pub struct ListingController {
    lifecycle: LoadState,
    listing: ListingState,
    page_size: NonZeroUsize,
    categories: Vec<CategoryOption>,
    theme: ThemeMode,
    scroll: ScrollState,
    source_name: String,
    preferences: Box<dyn PreferenceStore>,
}

impl ListingController {
    /// Create the controller in the pending state. Reads the theme preference once.
    pub fn new(settings: ControllerSettings, preferences: Box<dyn PreferenceStore>) -> Self {
        let theme = match settings.theme_override {
            Some(theme) => theme,
            None => match preferences.get(THEME_KEY) {
                Ok(stored) => ThemeMode::from_stored(stored.as_deref()),
                Err(e) => {
                    warn!("Could not read theme preference: {}", e);
                    ThemeMode::default()
                }
            },
        };

        Self {
            lifecycle: LoadState::Pending,
            listing: ListingState::default(),
            page_size: settings.page_size,
            categories: vec![CategoryOption::all()],
            theme,
            scroll: ScrollState::new(settings.back_to_top_threshold),
            source_name: settings.source_name,
            preferences,
        }
    }

    /// Instructions that bring a fresh display in line with the controller.
    pub fn initial_instructions(&self) -> Vec<RenderInstruction> {
        vec![
            RenderInstruction::SetTheme(self.theme),
            RenderInstruction::SetCategoryOptions(self.categories.clone()),
            RenderInstruction::SetSelectedCategory(self.listing.criteria.category.clone()),
            RenderInstruction::SetSearchText(self.listing.criteria.search_text.clone()),
            RenderInstruction::SetBackToTopVisible(self.scroll.back_to_top_visible()),
        ]
    }

    /// The single lifecycle transition: pending to loaded or failed.
    pub fn on_load(&mut self, outcome: Result<PostStore>) -> Vec<RenderInstruction> {
        if !self.lifecycle.complete(outcome) {
            debug!("ignoring repeated load completion");
            return Vec::new();
        }

        if let LoadState::Failed(reason) = &self.lifecycle {
            error!("Error loading posts from {}: {}", self.source_name, reason);
            return view::render_load_failure(&self.source_name);
        }

        if let Some(store) = self.lifecycle.store() {
            self.categories = category_options(store.posts());
            info!(
                "{} posts loaded, {} categories",
                store.len(),
                self.categories.len() - 1
            );
        }
        self.listing.current_page = 1;

        let mut instructions = vec![
            RenderInstruction::SetCategoryOptions(self.categories.clone()),
            RenderInstruction::SetSelectedCategory(self.listing.criteria.category.clone()),
        ];
        instructions.extend(self.render());
        instructions
    }

    pub fn on_search_text(&mut self, text: impl Into<String>) -> Vec<RenderInstruction> {
        let text = text.into();
        debug!("search text changed to {:?}", text);
        self.listing.criteria.search_text = text.clone();
        self.listing.current_page = 1;

        let mut instructions = vec![RenderInstruction::SetSearchText(text)];
        instructions.extend(self.render());
        instructions
    }

    pub fn on_category(&mut self, category: impl Into<String>) -> Vec<RenderInstruction> {
        let category = category.into();
        debug!("category changed to {:?}", category);
        self.listing.criteria.category = category.clone();
        self.listing.current_page = 1;

        let mut instructions = vec![RenderInstruction::SetSelectedCategory(category)];
        instructions.extend(self.render());
        instructions
    }

    /// Step the category selector. Inert until posts are loaded.
    pub fn cycle_category(&mut self, direction: CycleDirection) -> Vec<RenderInstruction> {
        if self.lifecycle.store().is_none() {
            return Vec::new();
        }
        match step_category(&self.categories, &self.listing.criteria.category, direction) {
            Some(option) => {
                let value = option.value.clone();
                self.on_category(value)
            }
            None => Vec::new(),
        }
    }

    pub fn on_previous_page(&mut self) -> Vec<RenderInstruction> {
        if self.lifecycle.store().is_none() || self.listing.current_page <= 1 {
            return Vec::new();
        }
        self.listing.current_page -= 1;
        self.render_page_change()
    }

    pub fn on_next_page(&mut self) -> Vec<RenderInstruction> {
        let Some(store) = self.lifecycle.store() else {
            return Vec::new();
        };
        let matching = self.listing.criteria.apply(store.posts()).len();
        if self.listing.current_page >= total_pages(matching, self.page_size) {
            return Vec::new();
        }
        self.listing.current_page += 1;
        self.render_page_change()
    }

    /// Flip the theme and persist it. A failed write keeps the new theme for
    /// this session and leaves a note on the status line.
    pub fn on_toggle_theme(&mut self) -> Vec<RenderInstruction> {
        self.theme = self.theme.toggled();
        let mut instructions = vec![RenderInstruction::SetTheme(self.theme)];
        if let Err(e) = self.preferences.set(THEME_KEY, self.theme.as_str()) {
            warn!("Failed to save theme preference: {}", e);
            instructions.push(RenderInstruction::ShowNotice(
                THEME_NOT_SAVED_NOTICE.to_string(),
            ));
        }
        instructions
    }

    /// Scroll smoothly to the top and hide the affordance right away.
    pub fn on_back_to_top(&mut self) -> Vec<RenderInstruction> {
        let mut instructions = vec![RenderInstruction::ScrollToTop];
        instructions.extend(self.on_scroll(0));
        instructions
    }

    /// Record the display's scroll offset (in scroll units).
    pub fn on_scroll(&mut self, offset: u32) -> Vec<RenderInstruction> {
        self.scroll
            .update(offset)
            .map(RenderInstruction::SetBackToTopVisible)
            .into_iter()
            .collect()
    }

    /// Filter, paginate and describe the current page. Empty until loaded.
    pub fn render(&mut self) -> Vec<RenderInstruction> {
        let Some(store) = self.lifecycle.store() else {
            return Vec::new();
        };

        let filtered = self.listing.criteria.apply(store.posts());
        let requested = i64::try_from(self.listing.current_page).unwrap_or(i64::MAX);
        let page = paginate(&filtered, self.page_size, requested);
        self.listing.current_page = page.effective_page;

        debug!(
            "render: {} matching, page {} of {}",
            filtered.len(),
            page.effective_page,
            page.total_pages
        );
        view::render_listing(&page)
    }

    /// A new page starts at the top, so the affordance goes away with the old one.
    fn render_page_change(&mut self) -> Vec<RenderInstruction> {
        let mut instructions = self.render();
        instructions.push(RenderInstruction::ScrollToTop);
        instructions.extend(self.on_scroll(0));
        instructions
    }

    pub fn lifecycle(&self) -> &LoadState {
        &self.lifecycle
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn current_page(&self) -> usize {
        self.listing.current_page
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn category_options(&self) -> &[CategoryOption] {
        &self.categories
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.scroll.back_to_top_visible()
    }

    /// Posts matching the current criteria (empty until loaded)
    pub fn filtered_posts(&self) -> Vec<&Post> {
        self.lifecycle
            .store()
            .map(|store| self.listing.criteria.apply(store.posts()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PostdeckError;
    use crate::preferences::MemoryPreferenceStore;
    use crate::render::protocol::NavControls;
    use chrono::NaiveDate;

    fn post(title: &str, category: &str) -> Post {
        Post::new(
            title,
            format!("About {}", title),
            category,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    fn loaded(posts: Vec<Post>) -> ListingController {
        let mut controller = ListingController::new(
            ControllerSettings::default(),
            Box::new(MemoryPreferenceStore::new()),
        );
        controller.on_load(Ok(PostStore::new(posts)));
        controller
    }

    fn numbered(n: usize) -> Vec<Post> {
        (1..=n).map(|i| post(&format!("Post {}", i), "misc")).collect()
    }

    fn nav(instructions: &[RenderInstruction]) -> Option<NavControls> {
        instructions.iter().find_map(|i| match i {
            RenderInstruction::SetNavControls(nav) => Some(*nav),
            _ => None,
        })
    }

    #[test]
    fn pending_controller_is_inert() {
        let mut controller = ListingController::new(
            ControllerSettings::default(),
            Box::new(MemoryPreferenceStore::new()),
        );
        assert!(controller.render().is_empty());
        assert!(controller.on_next_page().is_empty());
        assert!(controller.on_previous_page().is_empty());
        assert!(controller.cycle_category(CycleDirection::Forward).is_empty());

        // Filter input is remembered but nothing is rendered
        let out = controller.on_search_text("go");
        assert_eq!(out, vec![RenderInstruction::SetSearchText("go".to_string())]);
        assert_eq!(controller.listing().criteria.search_text, "go");
    }

    #[test]
    fn load_success_publishes_categories_and_first_page() {
        let mut controller = ListingController::new(
            ControllerSettings::default(),
            Box::new(MemoryPreferenceStore::new()),
        );
        let out = controller.on_load(Ok(PostStore::new(vec![
            post("A", "tech"),
            post("B", "Food"),
            post("C", "TECH"),
        ])));

        match &out[0] {
            RenderInstruction::SetCategoryOptions(options) => {
                let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
                assert_eq!(labels, vec!["All", "Tech", "Food"]);
            }
            other => panic!("unexpected instruction: {other:?}"),
        }
        assert!(out.iter().any(RenderInstruction::shows_posts));
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn load_failure_never_shows_posts() {
        let mut controller = ListingController::new(
            ControllerSettings::default(),
            Box::new(MemoryPreferenceStore::new()),
        );
        let out = controller.on_load(Err(PostdeckError::load_failure("data/posts.json", "boom")));
        assert!(matches!(out[0], RenderInstruction::ShowLoadFailure(_)));
        assert!(controller.lifecycle().is_failed());

        let mut later = controller.on_search_text("x");
        later.extend(controller.on_next_page());
        later.extend(controller.render());
        later.extend(controller.on_load(Ok(PostStore::new(numbered(3)))));
        assert!(!later.iter().any(RenderInstruction::shows_posts));
    }

    #[test]
    fn next_and_previous_respect_bounds() {
        let mut controller = loaded(numbered(9));

        assert!(controller.on_previous_page().is_empty());

        let out = controller.on_next_page();
        assert_eq!(controller.current_page(), 2);
        assert_eq!(out.last(), Some(&RenderInstruction::ScrollToTop));

        controller.on_next_page();
        assert_eq!(controller.current_page(), 3);
        assert!(controller.on_next_page().is_empty());
        assert_eq!(controller.current_page(), 3);

        controller.on_previous_page();
        assert_eq!(controller.current_page(), 2);
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut controller = loaded(numbered(9));
        controller.on_next_page();
        controller.on_next_page();

        let out = controller.on_search_text("Post");
        assert_eq!(controller.current_page(), 1);
        assert_eq!(
            nav(&out),
            Some(NavControls {
                previous_enabled: false,
                next_enabled: true
            })
        );

        controller.on_next_page();
        controller.on_category("misc");
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn cycling_categories_walks_the_option_set() {
        let mut controller = loaded(vec![post("A", "tech"), post("B", "food")]);

        let out = controller.cycle_category(CycleDirection::Forward);
        assert_eq!(out[0], RenderInstruction::SetSelectedCategory("tech".to_string()));
        assert_eq!(controller.filtered_posts().len(), 1);

        controller.cycle_category(CycleDirection::Backward);
        controller.cycle_category(CycleDirection::Backward);
        assert_eq!(controller.listing().criteria.category, "food");
    }

    #[test]
    fn theme_toggle_persists_choice() {
        let mut controller = ListingController::new(
            ControllerSettings::default(),
            Box::new(MemoryPreferenceStore::new().with_value(THEME_KEY, "dark")),
        );
        assert_eq!(controller.theme(), ThemeMode::Dark);

        let out = controller.on_toggle_theme();
        assert_eq!(out, vec![RenderInstruction::SetTheme(ThemeMode::Light)]);
        assert_eq!(controller.preferences.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    struct ReadOnlyPreferences;

    impl PreferenceStore for ReadOnlyPreferences {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(PostdeckError::preference("read-only store"))
        }
    }

    #[test]
    fn failed_theme_write_still_flips_and_leaves_a_notice() {
        let mut controller =
            ListingController::new(ControllerSettings::default(), Box::new(ReadOnlyPreferences));

        let out = controller.on_toggle_theme();
        assert_eq!(controller.theme(), ThemeMode::Dark);
        assert_eq!(
            out,
            vec![
                RenderInstruction::SetTheme(ThemeMode::Dark),
                RenderInstruction::ShowNotice(THEME_NOT_SAVED_NOTICE.to_string()),
            ]
        );
    }

    #[test]
    fn page_change_hides_back_to_top() {
        let mut controller = loaded(numbered(9));
        controller.on_scroll(320);
        assert!(controller.back_to_top_visible());

        let out = controller.on_next_page();
        assert_eq!(
            &out[out.len() - 2..],
            &[
                RenderInstruction::ScrollToTop,
                RenderInstruction::SetBackToTopVisible(false),
            ]
        );
        assert!(!controller.back_to_top_visible());
    }

    #[test]
    fn theme_override_skips_stored_preference() {
        let settings = ControllerSettings {
            theme_override: Some(ThemeMode::Light),
            ..ControllerSettings::default()
        };
        let controller = ListingController::new(
            settings,
            Box::new(MemoryPreferenceStore::new().with_value(THEME_KEY, "dark")),
        );
        assert_eq!(controller.theme(), ThemeMode::Light);
    }

    #[test]
    fn scroll_reports_visibility_changes_only() {
        let mut controller = loaded(numbered(2));
        assert!(controller.on_scroll(120).is_empty());
        assert_eq!(
            controller.on_scroll(240),
            vec![RenderInstruction::SetBackToTopVisible(true)]
        );
        assert!(controller.on_scroll(300).is_empty());
        assert!(controller.back_to_top_visible());
        assert_eq!(
            controller.on_back_to_top(),
            vec![
                RenderInstruction::ScrollToTop,
                RenderInstruction::SetBackToTopVisible(false),
            ]
        );
        assert!(!controller.back_to_top_visible());
        assert!(controller.on_scroll(0).is_empty());
        assert_eq!(
            controller.on_scroll(400),
            vec![RenderInstruction::SetBackToTopVisible(true)]
        );
    }
}
