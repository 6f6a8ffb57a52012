use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use provisioning::Choice;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use crate::{
    action::{Action, PopupResult},
    components::{Component, PopupComponent},
    state::State,
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

/// SingleChoicePopup picks exactly one option of a dropdown field.
///
/// Emits:
/// - Action::PopupResult(PopupResult::ChoiceSelected(index)) on Enter
/// - Action::PopupResult(PopupResult::Cancelled) on Esc
///
/// Navigation: Up/Down (wrapping), PageUp/PageDown, Home/End. Long catalogs
/// such as the time zone list scroll inside the dialog.
pub struct SingleChoicePopup {
    title: String,
    options: Vec<String>,
    selected: usize,
    scroll: usize,
    min_width: u16,
    min_height: u16,
}

impl SingleChoicePopup {
    pub fn new(title: impl Into<String>, options: &[Choice], selected: usize) -> Self {
        let options: Vec<String> = options.iter().map(|c| c.label.to_string()).collect();
        let width = options
            .iter()
            .map(|label| label.chars().count() as u16 + 6)
            .max()
            .unwrap_or(0)
            .max(40);
        Self {
            title: title.into(),
            selected: selected.min(options.len().saturating_sub(1)),
            options,
            scroll: 0,
            min_width: width,
            min_height: 16,
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Rows available for options inside `inner`, leaving room for the hints.
    fn max_visible(inner: Rect) -> usize {
        let reserve = if inner.height > 6 { 2 } else { 1 };
        inner.height.saturating_sub(reserve).max(1) as usize
    }

    fn ensure_visible(&mut self, max_visible: usize) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + max_visible {
            self.scroll = self.selected + 1 - max_visible;
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    fn submit_action(&self) -> Option<Action> {
        if self.options.is_empty() {
            return Some(Action::PopupResult(PopupResult::Cancelled));
        }
        Some(Action::PopupResult(PopupResult::ChoiceSelected(self.selected)))
    }

    fn cancel_action(&self) -> Option<Action> {
        Some(Action::PopupResult(PopupResult::Cancelled))
    }
}

impl Component for SingleChoicePopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(self.min_height)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        let len = self.options.len();
        match key.code {
            KeyCode::Up if len > 0 => {
                self.selected = if self.selected == 0 {
                    len - 1
                } else {
                    self.selected - 1
                };
            }
            KeyCode::Down if len > 0 => self.selected = (self.selected + 1) % len,
            KeyCode::PageUp => self.move_by(-10),
            KeyCode::PageDown => self.move_by(10),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = len.saturating_sub(1),
            KeyCode::Enter => {
                return Ok(Some(EventResponse::Stop(
                    self.submit_action().unwrap_or(Action::Update),
                )));
            }
            KeyCode::Esc => {
                return Ok(Some(EventResponse::Stop(
                    self.cancel_action().unwrap_or(Action::Update),
                )));
            }
            _ => return Ok(None),
        }
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn update(&mut self, action: Action, _state: &mut State) -> Result<Option<Action>> {
        match action {
            Action::Submit => Ok(self.submit_action()),
            Action::PopupResult(PopupResult::ChoiceSelected(_))
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

        let max_visible = Self::max_visible(inner);
        self.ensure_visible(max_visible);
        let end = (self.scroll + max_visible).min(self.options.len());

        let mut lines: Vec<Line> = Vec::new();
        if self.options.is_empty() {
            lines.push(Line::from(Span::styled(
                "No options available",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (idx, label) in self.options[self.scroll..end].iter().enumerate() {
            if self.scroll + idx == self.selected {
                lines.push(Line::from(vec![
                    Span::raw("> "),
                    Span::styled(
                        label.as_str(),
                        Style::default().fg(Color::Black).bg(Color::White).bold(),
                    ),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(label.as_str(), Style::default().fg(Color::White)),
                ]));
            }
        }

        if inner.height >= 3 {
            lines.push(Line::raw(""));
            let hints = Line::from(vec![
                Span::styled("Up/Down", Style::default().fg(Color::White)),
                Span::raw(": Select   "),
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Choose   "),
                Span::styled("Esc", Style::default().fg(Color::White)),
                Span::raw(": Cancel"),
            ])
            .fg(Color::DarkGray);
            lines.push(hints);
        }

        f.render_widget(Paragraph::new(Text::from(lines)), inner);
        Ok(())
    }
}

impl PopupComponent for SingleChoicePopup {
    fn submit_action(&mut self) -> Option<Action> {
        Self::submit_action(self)
    }

    fn cancel_action(&mut self) -> Option<Action> {
        Self::cancel_action(self)
    }
}
