//! Color themes for the light and dark presentation, using ratatui colors directly.

use crate::preferences::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Screen background (None uses terminal default)
    pub background: Option<Color>,

    /// Body text
    pub normal_text: Color,

    /// Card titles
    pub title: Style,

    /// Dates, links and other secondary text
    pub muted_text: Color,

    /// Category badge
    pub category: Style,

    /// Search matches inside titles and summaries
    pub search_match: Style,

    /// Header and footer bars
    pub bar_bg: Color,
    pub bar_fg: Color,

    /// Focused input (search box while editing, selected category)
    pub focus: Style,

    /// Disabled navigation controls
    pub disabled: Style,

    /// Error text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ColorTheme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: None,
            normal_text: Color::Black,
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            muted_text: Color::DarkGray,
            category: Style::default().fg(Color::White).bg(Color::Blue),
            search_match: Style::default().fg(Color::Black).bg(Color::Yellow),
            bar_bg: Color::Blue,
            bar_fg: Color::White,
            focus: Style::default().fg(Color::Black).bg(Color::LightCyan),
            disabled: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::DIM),
            error_text: Color::Red,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Some(Color::Black),
            normal_text: Color::Gray,
            title: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            muted_text: Color::DarkGray,
            category: Style::default().fg(Color::Black).bg(Color::LightMagenta),
            search_match: Style::default().fg(Color::Black).bg(Color::LightYellow),
            bar_bg: Color::DarkGray,
            bar_fg: Color::White,
            focus: Style::default().fg(Color::Black).bg(Color::LightGreen),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            error_text: Color::LightRed,
        }
    }

    /// Base style for the whole screen
    pub fn base(&self) -> Style {
        let style = Style::default().fg(self.normal_text);
        match self.background {
            Some(bg) => style.bg(bg),
            None => style,
        }
    }

    pub fn bar(&self) -> Style {
        Style::default().bg(self.bar_bg).fg(self.bar_fg)
    }
}
