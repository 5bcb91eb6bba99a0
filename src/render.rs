//! Rendering subsystem.
//!
//! The controller emits [`protocol::RenderInstruction`]s built by [`view`]; the
//! terminal front end in [`ui`] applies and draws them. [`service`] connects input
//! actions to controller notifications.

pub mod protocol;
pub mod scroll;
pub mod service;
pub mod ui;
pub mod view;

pub use protocol::{DisplaySink, NavControls, PostCard, RenderInstruction};
pub use service::RenderLoopState;
