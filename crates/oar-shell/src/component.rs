//! Component trait, implemented by every view.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Lifecycle: `handle_key_event` | `update` | `render`, in any order, until
/// the app swaps the view out.
pub trait Component: Send {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    ///
    /// An error here is contained by the error boundary; the view is
    /// replaced by an error panel until the next navigation.
    fn render(&self, frame: &mut Frame, area: Rect) -> Result<()>;

    /// Whether every key should go to this component, bypassing the
    /// global bindings (e.g. while a text field is being edited).
    fn captures_input(&self) -> bool {
        false
    }
}
