//! UI components
//!
//! Components own their state, translate key events into actions, and draw
//! themselves into a frame.

use crate::action::Action;
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

mod logs;

pub use logs::LogsComponent;

/// Common interface for UI components
pub trait Component {
    /// Handle a key event, optionally bubbling an action to the app
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>>;

    /// Handle an app-level action (tick, resize)
    fn update(&mut self, action: Action) -> Result<Option<Action>>;

    /// Draw the component into the given area
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
