//! Application orchestration layer
//!
//! Wires the post source, the listing controller and the terminal front end
//! together. Input arrives from a blocking thread and the post load runs as a task;
//! both feed one channel that the main loop drains.

pub mod controller;
pub mod lifecycle;
pub mod messages;
pub mod runtime;

pub use controller::{ControllerSettings, ListingController};
pub use lifecycle::LoadState;
pub use messages::AppEvent;

use crate::error::Result;
use crate::preferences::PreferenceStore;
use crate::render::protocol::DisplaySink;
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use crate::store::PostSource;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Frame interval for the smooth scroll-to-top animation.
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    controller: ListingController,
    ui_renderer: Box<dyn UIRenderer>,
    source: Arc<dyn PostSource>,
    render_loop: RenderLoopState,
}

impl Application {
    pub fn new(
        source: Arc<dyn PostSource>,
        settings: ControllerSettings,
        preferences: Box<dyn PreferenceStore>,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Self {
        Self {
            controller: ListingController::new(settings, preferences),
            ui_renderer,
            source,
            render_loop: RenderLoopState::new(),
        }
    }

    /// Run until the user quits. The terminal is restored on every exit path.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height);
        view_state.apply_all(self.controller.initial_instructions());

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let load_task = runtime::spawn_post_load(Arc::clone(&self.source), event_tx.clone());

        let shutdown = Arc::new(AtomicBool::new(false));
        let input_handle =
            runtime::spawn_input_thread(event_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.drive(&mut view_state, &mut event_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        load_task.abort();
        if input_handle.join().is_err() {
            debug!("input thread panicked during shutdown");
        }

        self.ui_renderer.cleanup()?;
        result
    }

    /// Drain events until quit or until every producer has gone away.
    pub async fn drive(
        &mut self,
        view_state: &mut ViewState,
        events: &mut UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        let mut animation = tokio::time::interval(ANIMATION_TICK);
        animation.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            if self.render_loop.take_redraw() {
                self.ui_renderer.render(view_state)?;
            }

            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        debug!("event channel closed");
                        return Ok(());
                    };
                    if !self.handle_event(event, view_state) {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                _ = animation.tick(), if self.render_loop.is_animating(view_state) => {
                    self.render_loop.tick(&mut self.controller, view_state);
                }
            }
        }
    }

    /// Returns false when the application should stop.
    fn handle_event(&mut self, event: AppEvent, view_state: &mut ViewState) -> bool {
        match event {
            AppEvent::Input(action) => {
                self.render_loop
                    .process_action(action, &mut self.controller, view_state)
            }
            AppEvent::PostsLoaded(outcome) => {
                self.render_loop
                    .process_load(outcome, &mut self.controller, view_state);
                true
            }
        }
    }

    pub fn controller(&self) -> &ListingController {
        &self.controller
    }
}
