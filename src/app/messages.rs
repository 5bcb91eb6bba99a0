//! Events delivered to the application loop.

use crate::error::Result;
use crate::input::InputAction;
use crate::store::PostStore;

/// Everything the main loop reacts to, from either the input thread or the load task.
#[derive(Debug)]
pub enum AppEvent {
    Input(InputAction),
    /// Completion of the one-shot post load
    PostsLoaded(Result<PostStore>),
}

impl From<InputAction> for AppEvent {
    fn from(action: InputAction) -> Self {
        AppEvent::Input(action)
    }
}
