//! Low-level input collection: crossterm polling, mouse wheel coalescing, and
//! translation into primitive events for the input service.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Wheel ticks closer together than this are merged into one scroll.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Rows moved by a single mouse wheel tick.
const MOUSE_SCROLL_LINES: u64 = 3;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    Scroll {
        direction: ScrollDirection,
        lines: u64,
    },
}

/// Merges bursts of wheel events in the same direction.
#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    window: Duration,
    pending: Option<PendingScroll>,
}

#[derive(Debug, Clone)]
struct PendingScroll {
    direction: ScrollDirection,
    lines: u64,
    last_event: Instant,
}

impl ScrollCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Add a wheel step. A direction change returns the scroll it displaced.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        lines: u64,
        now: Instant,
    ) -> Option<(ScrollDirection, u64)> {
        match self.pending {
            Some(ref mut pending) if pending.direction == direction => {
                pending.lines = pending.lines.saturating_add(lines);
                pending.last_event = now;
                None
            }
            _ => {
                let flushed = self.flush();
                self.pending = Some(PendingScroll {
                    direction,
                    lines,
                    last_event: now,
                });
                flushed
            }
        }
    }

    /// Emit the accumulated scroll once the window has passed without new steps.
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<(ScrollDirection, u64)> {
        match &self.pending {
            Some(pending) if now.duration_since(pending.last_event) >= self.window => self.flush(),
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Option<(ScrollDirection, u64)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.lines))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

impl Default for ScrollCoalescer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }
}

/// Polls crossterm and queues primitive events in arrival order.
#[derive(Debug, Default)]
pub struct RawInputCollector {
    coalescer: ScrollCoalescer,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector with a custom coalescing window (useful for tests).
    pub fn with_window(window: Duration) -> Self {
        Self {
            coalescer: ScrollCoalescer::new(window),
            pending_events: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Feed a synthetic event, bypassing crossterm.
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Next queued event, or a coalesced scroll whose window has closed.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .flush_if_stale(Instant::now())
            .map(|(direction, lines)| RawInputEvent::Scroll { direction, lines })
            .or_else(|| self.pending_events.pop_front())
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(self.try_flush());
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pending_events.pop_front())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            // Some terminals also report releases; only presses count.
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.flush_pending_scroll();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let direction = match mouse_event.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return,
        };

        if let Some((flushed, lines)) =
            self.coalescer
                .push(direction, MOUSE_SCROLL_LINES, Instant::now())
        {
            self.pending_events.push_back(RawInputEvent::Scroll {
                direction: flushed,
                lines,
            });
        }
    }

    fn flush_pending_scroll(&mut self) {
        if let Some((direction, lines)) = self.coalescer.flush() {
            self.pending_events
                .push_back(RawInputEvent::Scroll { direction, lines });
        }
    }
}
