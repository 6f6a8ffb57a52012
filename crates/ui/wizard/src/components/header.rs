use color_eyre::Result;
use provisioning::is_complete_mac;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{components::Component, state::State, tui::Frame};

/// One-line title bar: product name, visible field count and MAC status.
pub struct HeaderComponent {
    title: String,
}

impl HeaderComponent {
    pub fn new(version: &str) -> Self {
        Self {
            title: format!("Cisco 8945 SIP Provisioning v{version}"),
        }
    }

    fn status(state: &State) -> Line<'static> {
        let registry = state.session.registry();
        let visible = registry.visible().count();
        let mac = registry
            .mac_field()
            .map(|id| registry.field(id).raw_value().to_string())
            .unwrap_or_default();

        let mac_span = if is_complete_mac(&mac) {
            Span::styled(format!("SEP{mac}"), Style::default().fg(Color::Green))
        } else {
            Span::styled("MAC missing", Style::default().fg(Color::Red))
        };

        Line::from(vec![
            Span::raw(format!("{visible}/{} fields | ", registry.len())),
            mac_span,
        ])
    }
}

impl Component for HeaderComponent {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(1)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let title = Paragraph::new(Span::styled(
            self.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        f.render_widget(title, area);

        let status = Self::status(state);
        let width = status.width() as u16;
        if width < area.width {
            let right = Rect {
                x: area.x + area.width - width,
                width,
                ..area
            };
            f.render_widget(Paragraph::new(status), right);
        }
        Ok(())
    }
}
