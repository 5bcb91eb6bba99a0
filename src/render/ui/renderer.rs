//! Renderer trait implemented by the terminal front end.

use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Draws a [`ViewState`] and owns the terminal's lifecycle.
pub trait UIRenderer {
    /// Draw the full screen: header, listing body, pagination bar, status line.
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Enter raw mode and the alternate screen.
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// (width, height)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
