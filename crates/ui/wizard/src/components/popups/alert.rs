use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::{Component, PopupComponent},
    state::State,
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

/// Severity decides the colour of the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

/// Read-only message dialog. Enter or Esc closes it.
pub struct AlertPopup {
    title: String,
    lines: Vec<String>,
    kind: AlertKind,
}

impl AlertPopup {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            title: title.into(),
            lines: message.into().lines().map(str::to_string).collect(),
            kind,
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    fn color(&self) -> Color {
        match self.kind {
            AlertKind::Info => Color::Green,
            AlertKind::Warning => Color::Yellow,
            AlertKind::Error => Color::Red,
        }
    }
}

impl Component for AlertPopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(8)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => Ok(Some(EventResponse::Stop(Action::ClosePopup))),
            _ => Ok(Some(EventResponse::Stop(Action::Update))),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &State) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let height = (self.lines.len() as u16).saturating_add(4).max(6);
        let dialog = centered_rect_fixed(area, 72, height);
        let inner = draw_popup_frame(f, dialog, &self.title);

        let style = Style::default().fg(self.color());
        let mut text: Vec<Line> = self
            .lines
            .iter()
            .map(|line| Line::from(Span::styled(line.as_str(), style)))
            .collect();
        text.push(Line::raw(""));
        text.push(
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Close"),
            ])
            .fg(Color::DarkGray),
        );

        f.render_widget(
            Paragraph::new(Text::from(text)).wrap(Wrap { trim: false }),
            inner,
        );
        Ok(())
    }
}

impl PopupComponent for AlertPopup {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn any_confirm_key_closes() {
        let mut state = State::new(&Config::default());
        let mut popup = AlertPopup::new("Saved", "Wrote SEP0007A1B2C3D4.cnf.xml", AlertKind::Info);
        for code in [KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(
                popup.handle_key_events(KeyEvent::from(code), &mut state).unwrap(),
                Some(EventResponse::Stop(Action::ClosePopup))
            );
        }
        assert_eq!(
            popup
                .handle_key_events(KeyEvent::from(KeyCode::Char('x')), &mut state)
                .unwrap(),
            Some(EventResponse::Stop(Action::Update))
        );
    }

    #[test]
    fn message_is_split_into_lines() {
        let popup = AlertPopup::new("Warning", "first\nsecond", AlertKind::Warning);
        assert_eq!(popup.lines, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(popup.kind(), AlertKind::Warning);
    }
}
