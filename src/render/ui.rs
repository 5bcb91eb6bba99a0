//! Terminal rendering components.
//!
//! Hosts the ratatui front end along with the view state it draws and its color
//! themes.

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{ListingBody, StatusLine, ViewState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
