use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{
    components::Component,
    state::{InputMode, State},
    tui::Frame,
};

/// Help text of the focused field plus the key hints for the current mode.
pub struct FooterComponent;

impl FooterComponent {
    pub fn new() -> Self {
        Self
    }

    fn hints(mode: InputMode) -> Line<'static> {
        let keys: &[(&str, &str)] = match mode {
            InputMode::Normal => &[
                ("Up/Down", "Move"),
                ("Enter", "Edit"),
                ("s", "Save"),
                ("q", "Quit"),
            ],
            InputMode::Insert => &[("Enter", "Apply"), ("Esc", "Cancel")],
        };
        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (key, what) in keys {
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::raw(format!(": {what}   ")));
        }
        Line::from(spans).fg(Color::DarkGray)
    }
}

impl Default for FooterComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FooterComponent {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(4)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let help = state
            .focused
            .map(|id| state.session.field(id).help())
            .unwrap_or_default();

        let text = Text::from(vec![
            Line::from(Span::styled(help, Style::default().fg(Color::Gray))),
            Self::hints(state.input_mode),
        ]);
        let footer = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Help "),
        );
        f.render_widget(footer, area);
        Ok(())
    }
}
