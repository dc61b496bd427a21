use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    theme::Theme,
    tui::{Event, EventResponse, Frame},
};

pub mod form;
pub mod header;
pub mod status_bar;

/// `Component` is a visual and interactive element of the user interface.
///
/// Components are registered with the application loop, receive events,
/// update their state from actions and render into the area they are given.
pub trait Component {
    /// Short, stable name (used in logs and the status line).
    fn name(&self) -> &'static str;

    fn height_constraint(&self) -> Constraint;

    /// Hand the component a sender for actions it wants to emit outside of
    /// an event response.
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        let _ = tx;
        Ok(())
    }

    fn handle_events(&mut self, event: Event) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event)?,
            Event::Paste(text) => self.handle_paste(text)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(&mut self, _key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_paste(&mut self, _text: String) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, theme: &Theme) -> Result<()>;
}
