use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Rect};

use crate::{
    action::Action,
    state::State,
    tui::{Event, EventResponse, Frame},
};

pub mod footer;
pub mod form;
pub mod header;
pub mod popup;
pub mod popups;

pub use popup::PopupComponent;

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Implementors receive terminal events, react to actions from the main loop
/// and render themselves into the area they are given.
pub trait Component {
    fn init(&mut self, _state: &State) -> Result<()> {
        Ok(())
    }

    /// Vertical space requested from the main layout.
    fn height_constraint(&self) -> Constraint;

    fn handle_events(
        &mut self,
        event: Event,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn update(&mut self, _action: Action, _state: &mut State) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()>;
}
