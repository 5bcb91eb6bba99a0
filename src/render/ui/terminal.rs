//! Terminal UI implementation using ratatui
//!
//! Draws a [`ViewState`]; it never decides what to show. Input is read elsewhere
//! (see [`crate::input`]).

use crate::error::Result;
use crate::render::protocol::PostCard;
use crate::render::ui::state::{ListingBody, ViewState};
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const SEARCH_PREFIX: &str = " Search: ";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self { terminal: None })
    }

    fn draw_frame(frame: &mut Frame, view_state: &ViewState) {
        let theme = ColorTheme::for_mode(view_state.theme);
        let size = frame.size();
        frame.render_widget(Block::default().style(theme.base()), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(size);

        Self::render_search_box(frame, chunks[0], view_state, &theme);
        Self::render_category_bar(frame, chunks[1], view_state, &theme);
        Self::render_listing(frame, chunks[2], view_state, &theme);
        Self::render_pagination(frame, chunks[3], view_state, &theme);

        let status = Paragraph::new(view_state.format_status_line()).style(theme.bar());
        frame.render_widget(status, chunks[4]);
    }

    fn render_search_box(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let input_style = if view_state.status_line.editing_search {
            theme.focus
        } else {
            theme.base()
        };
        let line = Line::from(vec![
            Span::styled(SEARCH_PREFIX, theme.bar()),
            Span::styled(format!(" {} ", view_state.search_text), input_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        if view_state.status_line.editing_search {
            let x = area
                .x
                .saturating_add(text_width(SEARCH_PREFIX))
                .saturating_add(1)
                .saturating_add(text_width(&view_state.search_text));
            frame.set_cursor(x.min(area.right().saturating_sub(1)), area.y);
        }
    }

    fn render_category_bar(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let mut spans = vec![Span::styled(" Category: ", Style::default().fg(theme.muted_text))];
        for option in &view_state.category_options {
            let style = if option.matches(&view_state.selected_category) {
                theme.focus
            } else {
                theme.base()
            };
            spans.push(Span::styled(format!(" {} ", option.label), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_listing(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let lines: Vec<Line> = match &view_state.body {
            ListingBody::Loading => vec![Line::styled(
                " Loading posts…",
                Style::default().fg(theme.muted_text),
            )],
            ListingBody::Empty(message) => vec![Line::raw(format!(" {}", message))],
            ListingBody::LoadFailed(message) => vec![Line::styled(
                format!(" {}", message),
                Style::default().fg(theme.error_text),
            )],
            ListingBody::Cards(cards) => cards
                .iter()
                .flat_map(|card| {
                    Self::card_lines(card, &view_state.search_text, area.width, theme)
                })
                .collect(),
        };

        let paragraph = Paragraph::new(lines).scroll((view_state.scroll_rows, 0));
        frame.render_widget(paragraph, area);
    }

    /// Five rows per card: title, date and category, summary, link, spacer.
    fn card_lines<'a>(
        card: &'a PostCard,
        search_text: &str,
        width: u16,
        theme: &ColorTheme,
    ) -> Vec<Line<'a>> {
        let inner = usize::from(width.saturating_sub(2));
        let body = Style::default().fg(theme.normal_text);

        let mut title = vec![Span::raw(" ")];
        title.extend(highlight_spans(
            truncate_to_width(&card.title, inner),
            search_text,
            theme.title,
            theme.search_match,
        ));

        let mut summary = vec![Span::raw(" ")];
        summary.extend(highlight_spans(
            truncate_to_width(&card.summary, inner),
            search_text,
            body,
            theme.search_match,
        ));

        let muted = Style::default().fg(theme.muted_text);
        let mut link = format!(" → {}", card.link);
        if !card.image.is_empty() {
            link.push_str(&format!("  [{}]", card.image));
        }

        vec![
            Line::from(title),
            Line::from(vec![
                Span::styled(format!(" {} ", card.date), muted),
                Span::styled(format!(" {} ", card.category), theme.category),
            ]),
            Line::from(summary),
            Line::styled(truncate_to_width(&link, inner + 1), muted),
            Line::raw(""),
        ]
    }

    fn render_pagination(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let control = |label: &'static str, enabled: bool| {
            if enabled {
                Span::styled(label, theme.bar())
            } else {
                Span::styled(label, theme.disabled)
            }
        };

        let mut spans = vec![
            control(" ◀ Prev ", view_state.nav.previous_enabled),
            Span::raw(format!("  {}  ", view_state.pagination_label)),
            control(" Next ▶ ", view_state.nav.next_enabled),
        ];
        if view_state.back_to_top_visible {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(" ↑ Top ", theme.focus));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Byte ranges where `needle` occurs in `haystack`, ignoring ASCII case.
///
/// Non-ASCII input yields no ranges because case folding may change byte lengths.
pub fn match_ranges(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() || !haystack.is_ascii() || !needle.is_ascii() {
        return Vec::new();
    }
    let folded = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(found) = folded[from..].find(&needle) {
        let start = from + found;
        let end = start + needle.len();
        ranges.push((start, end));
        from = end;
    }
    ranges
}

fn highlight_spans<'a>(
    content: String,
    needle: &str,
    normal: Style,
    highlight: Style,
) -> Vec<Span<'a>> {
    let ranges = match_ranges(&content, needle);
    if ranges.is_empty() {
        return vec![Span::styled(content, normal)];
    }

    let mut spans = Vec::new();
    let mut last_end = 0;
    for (start, end) in ranges {
        if start > last_end {
            spans.push(Span::styled(content[last_end..start].to_string(), normal));
        }
        spans.push(Span::styled(content[start..end].to_string(), highlight));
        last_end = end;
    }
    if last_end < content.len() {
        spans.push(Span::styled(content[last_end..].to_string(), normal));
    }
    spans
}

/// Width of `text` in terminal columns, one per character, saturating at `u16::MAX`.
fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            terminal.draw(|frame| Self::draw_frame(frame, view_state))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::protocol::{DisplaySink, NavControls, RenderInstruction};
    use ratatui::backend::TestBackend;

    fn card(title: &str) -> PostCard {
        PostCard {
            title: title.to_string(),
            date: "Wed Jan 03 2024".to_string(),
            summary: "Goroutines and channels".to_string(),
            category: "tech".to_string(),
            link: "posts/go.html".to_string(),
            image: "img/go.png".to_string(),
        }
    }

    fn screen_text(view_state: &ViewState) -> String {
        let backend = TestBackend::new(view_state.viewport_width, view_state.viewport_height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| TerminalUI::draw_frame(frame, view_state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
    }

    #[test]
    fn test_draws_cards_and_pagination() {
        let mut state = ViewState::new(60, 16);
        state.apply_all(vec![
            RenderInstruction::ShowCards(vec![card("Go Basics")]),
            RenderInstruction::SetPaginationLabel("Page 1 of 1".to_string()),
            RenderInstruction::SetNavControls(NavControls::disabled()),
        ]);

        let text = screen_text(&state);
        assert!(text.contains("Go Basics"));
        assert!(text.contains("Wed Jan 03 2024"));
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("posts/go.html"));
    }

    #[test]
    fn test_draws_empty_and_failure_messages() {
        let mut state = ViewState::new(60, 10);
        state.apply(RenderInstruction::ShowEmptyState(
            "No posts found matching your criteria.".to_string(),
        ));
        assert!(screen_text(&state).contains("No posts found"));

        state.apply(RenderInstruction::ShowLoadFailure(
            "Failed to load posts.".to_string(),
        ));
        assert!(screen_text(&state).contains("Failed to load posts."));
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("Go and go", "GO"), vec![(0, 2), (7, 9)]);
        assert!(match_ranges("anything", "").is_empty());
        assert!(match_ranges("Café", "caf").is_empty());
    }

    #[test]
    fn test_highlight_spans_split_around_matches() {
        let spans = highlight_spans(
            "Go Basics".to_string(),
            "bas",
            Style::default(),
            Style::default(),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Go ", "Bas", "ics"]);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer line", 6), "a lon…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_text_width_saturates() {
        assert_eq!(text_width(SEARCH_PREFIX), 9);
        assert_eq!(text_width("café"), 4);
        assert_eq!(text_width(&"x".repeat(70_000)), u16::MAX);
    }
}
