//! Input subsystem: raw terminal events in, controller notifications out.

pub mod raw;
pub mod service;

pub use raw::ScrollDirection;
pub use service::{InputAction, InputService, InputState, InputStateMachine};
