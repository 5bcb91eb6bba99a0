//! Render coordination.
//!
//! Routes input actions to the listing controller, applies the resulting render
//! instructions to the view state and feeds scroll offsets back to the controller
//! so the back-to-top affordance follows the display.

use crate::app::controller::ListingController;
use crate::error::Result;
use crate::input::InputAction;
use crate::render::protocol::{DisplaySink, RenderInstruction};
use crate::render::ui::ViewState;
use crate::store::PostStore;
use log::trace;

/// Tracks whether the view changed since the last frame.
#[derive(Debug)]
pub struct RenderLoopState {
    dirty: bool,
}

impl Default for RenderLoopState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoopState {
    pub fn new() -> Self {
        // The first frame always draws
        Self { dirty: true }
    }

    /// Handle one input action. Returns false when the application should quit.
    pub fn process_action(
        &mut self,
        action: InputAction,
        controller: &mut ListingController,
        view_state: &mut ViewState,
    ) -> bool {
        trace!("processing {:?}", action);
        if !matches!(
            action,
            InputAction::Resize { .. } | InputAction::NoAction | InputAction::InvalidInput
        ) && view_state.status_line.message.is_some()
        {
            // Notices last until the next user action
            view_state.status_line.clear_message();
            self.dirty = true;
        }
        match action {
            InputAction::Quit => return false,
            InputAction::Scroll { direction, lines } => {
                if view_state.scroll_by(direction, lines) {
                    self.report_scroll(controller, view_state);
                    self.dirty = true;
                }
            }
            InputAction::StartSearchEdit => {
                view_state.status_line.start_search_edit();
                self.dirty = true;
            }
            InputAction::FinishSearchEdit => {
                view_state.status_line.finish_search_edit();
                self.dirty = true;
            }
            InputAction::SearchTextChanged(text) => {
                let instructions = controller.on_search_text(text);
                self.apply(instructions, controller, view_state);
            }
            InputAction::CycleCategory(direction) => {
                let instructions = controller.cycle_category(direction);
                self.apply(instructions, controller, view_state);
            }
            InputAction::PreviousPage => {
                let instructions = controller.on_previous_page();
                self.apply(instructions, controller, view_state);
            }
            InputAction::NextPage => {
                let instructions = controller.on_next_page();
                self.apply(instructions, controller, view_state);
            }
            InputAction::ToggleTheme => {
                let instructions = controller.on_toggle_theme();
                self.apply(instructions, controller, view_state);
            }
            InputAction::BackToTop => {
                let instructions = controller.on_back_to_top();
                self.apply(instructions, controller, view_state);
            }
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    self.report_scroll(controller, view_state);
                    self.dirty = true;
                }
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        true
    }

    /// Deliver the load outcome to the controller and show the result.
    pub fn process_load(
        &mut self,
        outcome: Result<PostStore>,
        controller: &mut ListingController,
        view_state: &mut ViewState,
    ) {
        let instructions = controller.on_load(outcome);
        self.apply(instructions, controller, view_state);
    }

    /// Advance any running scroll animation by one step. The offset is reported
    /// once the animation settles.
    pub fn tick(&mut self, controller: &mut ListingController, view_state: &mut ViewState) {
        if view_state.advance_scroll_animation() {
            if !view_state.scrolling_to_top {
                self.report_scroll(controller, view_state);
            }
            self.dirty = true;
        }
    }

    /// Apply controller output to the view.
    pub fn apply(
        &mut self,
        instructions: Vec<RenderInstruction>,
        controller: &mut ListingController,
        view_state: &mut ViewState,
    ) {
        if instructions.is_empty() {
            return;
        }
        view_state.apply_all(instructions);
        // New content can clamp the scroll offset. A running scroll-to-top
        // reports from `tick` once it settles.
        if !view_state.scrolling_to_top {
            self.report_scroll(controller, view_state);
        }
        self.dirty = true;
    }

    /// True once per change; the caller redraws when it returns true.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_animating(&self, view_state: &ViewState) -> bool {
        view_state.scrolling_to_top
    }

    fn report_scroll(&mut self, controller: &mut ListingController, view_state: &mut ViewState) {
        let feedback = controller.on_scroll(view_state.scroll_units());
        view_state.apply_all(feedback);
    }
}
