use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use provisioning::Field;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
};

use crate::{
    action::Action,
    components::Component,
    state::State,
    tui::{EventResponse, Frame},
};

const PAGE: isize = 10;
const LABEL_WIDTH: usize = 30;

/// Scrollable list of every visible field. Headers are inert; the highlighted
/// row always tracks `State::focused`.
pub struct FormComponent {
    list: ListState,
}

impl FormComponent {
    pub fn new() -> Self {
        Self {
            list: ListState::default(),
        }
    }

    fn row(field: &Field) -> ListItem<'static> {
        if field.is_header() {
            return ListItem::new(Line::from(Span::styled(
                field.label().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        let label_style = if field.is_required() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let value = if field.is_dropdown() {
            Span::styled(
                format!("< {} >", field.raw_value()),
                Style::default().fg(Color::Yellow),
            )
        } else if field.raw_value().is_empty() {
            Span::styled("-", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(field.raw_value().to_string())
        };

        ListItem::new(Line::from(vec![
            Span::styled(
                format!("  {:<width$}", field.label(), width = LABEL_WIDTH),
                label_style,
            ),
            value,
        ]))
    }
}

impl Default for FormComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FormComponent {
    fn height_constraint(&self) -> Constraint {
        Constraint::Fill(1)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Action::Down,
            KeyCode::BackTab => Action::Up,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Home => Action::Home,
            KeyCode::End => Action::End,
            KeyCode::Enter => Action::Edit,
            KeyCode::Char('s') => Action::Save,
            KeyCode::Char('q') => Action::Quit,
            _ => return Ok(None),
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn update(&mut self, action: Action, state: &mut State) -> Result<Option<Action>> {
        match action {
            Action::Up => state.focus_prev(),
            Action::Down => state.focus_next(),
            Action::PageUp => state.focus_by(-PAGE),
            Action::PageDown => state.focus_by(PAGE),
            Action::Home => state.focus_first(),
            Action::End => state.focus_last(),
            _ => return Ok(None),
        }
        Ok(Some(Action::Render))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let registry = state.session.registry();
        let mut selected = None;
        let items: Vec<ListItem> = registry
            .visible()
            .enumerate()
            .map(|(row, (id, field))| {
                if state.focused == Some(id) {
                    selected = Some(row);
                }
                Self::row(field)
            })
            .collect();
        self.list.select(selected);

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        f.render_stateful_widget(list, area, &mut self.list);
        Ok(())
    }
}
