//! The post load lifecycle: pending, then loaded or failed, once.

use crate::error::Result;
use crate::store::PostStore;

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// The load has not completed yet
    #[default]
    Pending,
    Loaded(PostStore),
    /// Terminal: no retry, no partial data
    Failed(String),
}

impl LoadState {
    /// Apply the load outcome. Only the first completion counts; returns whether
    /// this call changed the state.
    pub fn complete(&mut self, outcome: Result<PostStore>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = match outcome {
            Ok(store) => LoadState::Loaded(store),
            Err(error) => LoadState::Failed(error.to_string()),
        };
        true
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn store(&self) -> Option<&PostStore> {
        match self {
            LoadState::Loaded(store) => Some(store),
            _ => None,
        }
    }
}
