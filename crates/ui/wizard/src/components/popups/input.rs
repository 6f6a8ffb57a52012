use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use provisioning::{MAC_LEN, sanitize_mac};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler};

use crate::{
    action::{Action, PopupResult},
    components::{Component, PopupComponent},
    state::State,
    tui::{Event, EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

pub type Validator = Box<dyn Fn(&str) -> std::result::Result<(), String> + Send + Sync + 'static>;

/// Popup for editing one free-text field.
/// - Enter: submit (validates, then emits Action::PopupResult(PopupResult::InputSubmitted(String)))
/// - Esc: cancel (emits Action::PopupResult(PopupResult::Cancelled))
/// - Other keystrokes edit the input and stop propagation
pub struct InputPopup {
    title: String,
    help: String,
    input: Input,
    error: Option<String>,
    validator: Option<Validator>,
    min_width: u16,
    min_height: u16,
}

impl InputPopup {
    pub fn new(
        title: impl Into<String>,
        help: impl Into<String>,
        initial_value: impl Into<String>,
        validator: Option<Validator>,
    ) -> Self {
        Self {
            title: title.into(),
            help: help.into(),
            input: Input::new(initial_value.into()),
            error: None,
            validator,
            min_width: 70,
            min_height: 12,
        }
    }

    #[cfg(test)]
    pub fn value(&self) -> &str {
        self.input.value()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Insert pasted text at the cursor. Line breaks are dropped.
    fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !matches!(c, '\n' | '\r')) {
            self.input.handle(InputRequest::InsertChar(c));
        }
        self.error = None;
    }

    fn validate_current(&self) -> std::result::Result<(), String> {
        match &self.validator {
            Some(v) => v(self.input.value()),
            None => Ok(()),
        }
    }

    fn submit(&mut self) -> Option<Action> {
        match self.validate_current() {
            Ok(()) => {
                self.error = None;
                Some(Action::PopupResult(PopupResult::InputSubmitted(
                    self.input.value().to_string(),
                )))
            }
            Err(msg) => {
                self.error = Some(msg);
                Some(Action::Update)
            }
        }
    }
}

/// Accepts an empty value or anything that sanitizes to a complete MAC.
pub fn validate_mac(v: &str) -> std::result::Result<(), String> {
    if v.trim().is_empty() {
        return Ok(());
    }
    let digits = sanitize_mac(v).len();
    if digits < MAC_LEN {
        return Err(format!(
            "MAC address needs {MAC_LEN} hex digits, found {digits}"
        ));
    }
    Ok(())
}

impl Component for InputPopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(self.min_height)
    }

    fn handle_events(
        &mut self,
        event: Event,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        match event {
            Event::Key(key) => self.handle_key_events(key, state),
            Event::Paste(text) => {
                self.paste(&text);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            _ => Ok(None),
        }
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Enter => Ok(Some(EventResponse::Stop(Action::Submit))),
            KeyCode::Esc => Ok(Some(EventResponse::Stop(Action::PopupResult(
                PopupResult::Cancelled,
            )))),
            _ => {
                self.input.handle_event(&CrosstermEvent::Key(key));
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
        }
    }

    fn update(&mut self, action: Action, _state: &mut State) -> Result<Option<Action>> {
        match action {
            Action::Submit => Ok(self.submit()),
            Action::PopupResult(PopupResult::InputSubmitted(_))
            | Action::PopupResult(PopupResult::Cancelled) => Ok(Some(Action::ClosePopup)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = centered_rect_fixed(area, self.min_width, self.min_height);
        let inner = draw_popup_frame(f, dialog, &self.title);

        // help | input box | error | hints
        let help_height = inner.height.saturating_sub(6).max(1);
        let help_area = Rect {
            height: help_height,
            ..inner
        };
        let box_area = Rect {
            y: inner.y + help_height,
            height: 3,
            ..inner
        };
        let error_area = Rect {
            y: box_area.y + 3,
            height: 1,
            ..inner
        };
        let hints_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: 1,
            ..inner
        };

        let help = Paragraph::new(Text::from(Span::styled(
            self.help.as_str(),
            Style::default().fg(Color::Gray),
        )))
        .wrap(Wrap { trim: true });
        f.render_widget(help, help_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let input_inner = input_block.inner(box_area);
        f.render_widget(input_block, box_area);

        let width = input_inner.width.max(1) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = Paragraph::new(self.input.value()).scroll((0, scroll as u16));
        f.render_widget(value, input_inner);

        if input_inner.width > 0 && input_inner.height > 0 {
            let cursor_col = self.input.visual_cursor().max(scroll) - scroll;
            f.set_cursor_position((input_inner.x + cursor_col as u16, input_inner.y));
        }

        if let Some(err) = &self.error {
            let err_line = Span::styled(err.as_str(), Style::default().fg(Color::Red));
            f.render_widget(Paragraph::new(err_line), error_area);
        }

        let hints = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": Submit   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Cancel"),
        ])
        .fg(Color::DarkGray);
        f.render_widget(Paragraph::new(hints), hints_area);

        Ok(())
    }
}

impl PopupComponent for InputPopup {
    fn submit_action(&mut self) -> Option<Action> {
        self.submit()
    }

    fn cancel_action(&mut self) -> Option<Action> {
        Some(Action::PopupResult(PopupResult::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn press(
        popup: &mut InputPopup,
        state: &mut State,
        code: KeyCode,
    ) -> Option<EventResponse<Action>> {
        popup.handle_key_events(KeyEvent::from(code), state).unwrap()
    }

    #[test]
    fn typing_then_enter_submits_the_value() {
        let mut state = State::new(&Config::default());
        let mut popup = InputPopup::new("Extension", "", "", None);
        for c in "1001".chars() {
            assert_eq!(
                press(&mut popup, &mut state, KeyCode::Char(c)),
                Some(EventResponse::Stop(Action::Update))
            );
        }
        assert_eq!(
            press(&mut popup, &mut state, KeyCode::Enter),
            Some(EventResponse::Stop(Action::Submit))
        );
        assert_eq!(
            popup.update(Action::Submit, &mut state).unwrap(),
            Some(Action::PopupResult(PopupResult::InputSubmitted("1001".into())))
        );
    }

    #[test]
    fn initial_value_is_editable() {
        let mut state = State::new(&Config::default());
        let mut popup = InputPopup::new("SIP Port", "", "5060", None);
        press(&mut popup, &mut state, KeyCode::Backspace);
        press(&mut popup, &mut state, KeyCode::Char('1'));
        assert_eq!(popup.value(), "5061");
    }

    #[test]
    fn invalid_mac_keeps_the_popup_open() {
        let mut state = State::new(&Config::default());
        let mut popup =
            InputPopup::new("MAC Address", "", "00:07:a1", Some(Box::new(validate_mac)));
        assert_eq!(popup.update(Action::Submit, &mut state).unwrap(), Some(Action::Update));
        assert_eq!(popup.error(), Some("MAC address needs 12 hex digits, found 6"));
    }

    #[test]
    fn escape_cancels() {
        let mut state = State::new(&Config::default());
        let mut popup = InputPopup::new("Label", "", "x", None);
        let cancel = Action::PopupResult(PopupResult::Cancelled);
        assert_eq!(
            press(&mut popup, &mut state, KeyCode::Esc),
            Some(EventResponse::Stop(cancel.clone()))
        );
        assert_eq!(popup.update(cancel, &mut state).unwrap(), Some(Action::ClosePopup));
    }

    #[test]
    fn pasted_text_lands_in_the_input() {
        let mut state = State::new(&Config::default());
        let mut popup = InputPopup::new("MAC Address", "", "", Some(Box::new(validate_mac)));
        let response = popup
            .handle_events(Event::Paste("00:07:a1:b2:c3:d4\n".into()), &mut state)
            .unwrap();
        assert_eq!(response, Some(EventResponse::Stop(Action::Update)));
        assert_eq!(popup.value(), "00:07:a1:b2:c3:d4");

        press(&mut popup, &mut state, KeyCode::Home);
        popup
            .handle_events(Event::Paste("x".into()), &mut state)
            .unwrap();
        assert_eq!(popup.value(), "x00:07:a1:b2:c3:d4");
    }

    #[test]
    fn mac_validator() {
        assert!(validate_mac("").is_ok());
        assert!(validate_mac("00:07:a1-B2.c3d4").is_ok());
        assert!(validate_mac("xyz").is_err());
    }
}
