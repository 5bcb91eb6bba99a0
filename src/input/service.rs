//! High-level input service.
//!
//! Runs the key-binding state machine over raw events and yields the notifications
//! the controller understands: search text changed, category stepped, page
//! previous/next, theme toggled, back to top, scrolled.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use crate::listing::CycleDirection;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Whether keystrokes go to the search box or to the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Browsing,
    EditingSearch,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: u64,
    },
    StartSearchEdit,
    /// Full search text after the edit
    SearchTextChanged(String),
    FinishSearchEdit,
    CycleCategory(CycleDirection),
    PreviousPage,
    NextPage,
    ToggleTheme,
    BackToTop,
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
    InvalidInput,
}

/// Key bindings for browsing and for editing the search box.
pub struct InputStateMachine {
    state: InputState,
    search_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Browsing,
            search_buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (self.state, key_event.code) {
            (_, KeyCode::Char('c')) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            (_, KeyCode::Char('u')) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.replace_search(String::new())
            }

            (InputState::EditingSearch, KeyCode::Enter | KeyCode::Esc) => {
                self.state = InputState::Browsing;
                InputAction::FinishSearchEdit
            }
            (InputState::EditingSearch, KeyCode::Backspace) => {
                let mut text = self.search_buffer.clone();
                if text.pop().is_none() {
                    return InputAction::NoAction;
                }
                self.replace_search(text)
            }
            (InputState::EditingSearch, KeyCode::Char(ch)) if plain && !ch.is_control() => {
                let mut text = self.search_buffer.clone();
                text.push(ch);
                self.replace_search(text)
            }
            (InputState::EditingSearch, KeyCode::Tab) => {
                InputAction::CycleCategory(CycleDirection::Forward)
            }
            (InputState::EditingSearch, KeyCode::BackTab) => {
                InputAction::CycleCategory(CycleDirection::Backward)
            }
            (InputState::EditingSearch, _) => InputAction::InvalidInput,

            (InputState::Browsing, KeyCode::Char('/')) if plain => {
                self.state = InputState::EditingSearch;
                InputAction::StartSearchEdit
            }
            (InputState::Browsing, KeyCode::Esc) => {
                if self.search_buffer.is_empty() {
                    InputAction::NoAction
                } else {
                    self.replace_search(String::new())
                }
            }
            (InputState::Browsing, KeyCode::Char('q')) if plain => InputAction::Quit,
            (InputState::Browsing, KeyCode::Tab) => {
                InputAction::CycleCategory(CycleDirection::Forward)
            }
            (InputState::Browsing, KeyCode::Char('c')) if plain => {
                InputAction::CycleCategory(CycleDirection::Forward)
            }
            (InputState::Browsing, KeyCode::BackTab) => {
                InputAction::CycleCategory(CycleDirection::Backward)
            }
            (InputState::Browsing, KeyCode::Char('C')) if plain => {
                InputAction::CycleCategory(CycleDirection::Backward)
            }
            (InputState::Browsing, KeyCode::Left | KeyCode::PageUp) => InputAction::PreviousPage,
            (InputState::Browsing, KeyCode::Char('h' | 'p')) if plain => InputAction::PreviousPage,
            (InputState::Browsing, KeyCode::Right | KeyCode::PageDown) => InputAction::NextPage,
            (InputState::Browsing, KeyCode::Char('l' | 'n')) if plain => InputAction::NextPage,
            (InputState::Browsing, KeyCode::Char('t')) if plain => InputAction::ToggleTheme,
            (InputState::Browsing, KeyCode::Home) => InputAction::BackToTop,
            (InputState::Browsing, KeyCode::Char('g')) if plain => InputAction::BackToTop,
            (InputState::Browsing, KeyCode::Down) => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (InputState::Browsing, KeyCode::Char('j')) if plain => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (InputState::Browsing, KeyCode::Up) => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            (InputState::Browsing, KeyCode::Char('k')) if plain => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            _ => InputAction::InvalidInput,
        }
    }

    fn replace_search(&mut self, text: String) -> InputAction {
        if text == self.search_buffer {
            return InputAction::NoAction;
        }
        self.search_buffer = text.clone();
        InputAction::SearchTextChanged(text)
    }

    pub fn get_search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces [`InputAction`]s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    /// Wait up to `timeout` for input and return every action that became ready.
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));
            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    /// Feed a synthetic terminal event.
    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, lines } => InputAction::Scroll { direction, lines },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(sm: &mut InputStateMachine, text: &str) -> Vec<InputAction> {
        text.chars()
            .map(|ch| sm.handle_key_event(key(KeyCode::Char(ch))))
            .collect()
    }

    #[test]
    fn browsing_bindings() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Right)), InputAction::NextPage);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('h'))), InputAction::PreviousPage);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('t'))), InputAction::ToggleTheme);
        assert_eq!(sm.handle_key_event(key(KeyCode::Home)), InputAction::BackToTop);
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Tab)),
            InputAction::CycleCategory(CycleDirection::Forward)
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::BackTab)),
            InputAction::CycleCategory(CycleDirection::Backward)
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(sm.handle_key_event(ctrl('c')), InputAction::Quit);
    }

    #[test]
    fn typing_emits_full_search_text_on_every_keystroke() {
        let mut sm = InputStateMachine::new();
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('/'))),
            InputAction::StartSearchEdit
        );
        assert_eq!(sm.get_state(), InputState::EditingSearch);

        let actions = type_text(&mut sm, "Go");
        assert_eq!(
            actions,
            vec![
                InputAction::SearchTextChanged("G".to_string()),
                InputAction::SearchTextChanged("Go".to_string()),
            ]
        );

        // Bindings are plain text while editing
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('q'))),
            InputAction::SearchTextChanged("Goq".to_string())
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::SearchTextChanged("Go".to_string())
        );

        assert_eq!(
            sm.handle_key_event(key(KeyCode::Enter)),
            InputAction::FinishSearchEdit
        );
        assert_eq!(sm.get_state(), InputState::Browsing);
        assert_eq!(sm.get_search_buffer(), "Go");
    }

    #[test]
    fn backspace_on_empty_buffer_does_nothing() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(sm.handle_key_event(key(KeyCode::Backspace)), InputAction::NoAction);
        assert_eq!(sm.get_state(), InputState::EditingSearch);
    }

    #[test]
    fn clearing_search() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        type_text(&mut sm, "zzz");
        assert_eq!(
            sm.handle_key_event(ctrl('u')),
            InputAction::SearchTextChanged(String::new())
        );

        type_text(&mut sm, "a");
        sm.handle_key_event(key(KeyCode::Esc));
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Esc)),
            InputAction::SearchTextChanged(String::new())
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::NoAction);
    }

    #[test]
    fn service_translates_wheel_and_keys() {
        let mut service = InputService::new();
        let actions = service.process_event(Event::Key(key(KeyCode::Char('j'))));
        assert_eq!(
            actions,
            vec![InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            }]
        );

        let actions = service.process_event(Event::Resize(90, 30));
        assert_eq!(
            actions,
            vec![InputAction::Resize {
                width: 90,
                height: 30
            }]
        );
    }

    #[test]
    fn service_drops_unbound_keys() {
        let mut service = InputService::new();
        assert!(service
            .process_event(Event::Key(key(KeyCode::Char('z'))))
            .is_empty());
    }
}
