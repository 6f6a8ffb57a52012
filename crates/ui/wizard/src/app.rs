use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use provisioning::ProvisionError;
use ratatui::layout::{Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::{Action, PopupResult},
    components::{
        Component, PopupComponent,
        footer::FooterComponent,
        form::FormComponent,
        header::HeaderComponent,
        popups::{
            alert::{AlertKind, AlertPopup},
            input::{InputPopup, validate_mac},
            single_choice::SingleChoicePopup,
        },
    },
    config::Config,
    state::{InputMode, State},
    tui::{Event, EventResponse, Frame, Tui},
};

pub struct App {
    pub config: Config,
    pub state: State,
    pub header: HeaderComponent,
    pub form: FormComponent,
    pub footer: FooterComponent,
    pub popup: Option<Box<dyn PopupComponent>>,
    pub should_quit: bool,
    pub should_suspend: bool,
}

/// Forward a component's answer to the action channel. Returns true when the
/// event must not reach the components behind it.
fn forward(
    response: Option<EventResponse<Action>>,
    action_tx: &UnboundedSender<Action>,
) -> bool {
    match response {
        Some(EventResponse::Stop(action)) => {
            action_tx.send(action).ok();
            true
        }
        None => false,
    }
}

fn is_input(e: &Event) -> bool {
    matches!(e, Event::Key(_) | Event::Paste(_))
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Keys handled before any component sees them.
fn global_action(key: &KeyEvent) -> Option<Action> {
    if is_ctrl(key, 'c') {
        Some(Action::Quit)
    } else if is_ctrl(key, 'z') {
        Some(Action::Suspend)
    } else {
        None
    }
}

impl App {
    pub fn new(config: Config, version: &str) -> Self {
        let state = State::new(&config);
        Self {
            config,
            state,
            header: HeaderComponent::new(version),
            form: FormComponent::new(),
            footer: FooterComponent::new(),
            popup: None,
            should_quit: false,
            should_suspend: false,
        }
    }

    fn tui(&self) -> Result<Tui> {
        Ok(Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate)
            .paste(true))
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = self.tui()?;
        tui.enter()?;

        self.header.init(&self.state)?;
        self.form.init(&self.state)?;
        self.footer.init(&self.state)?;
        info!(output_dir = %self.state.output_dir.display(), "wizard started");

        loop {
            if let Some(e) = tui.next().await {
                self.handle_event(e, &action_tx)?;
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        tui.draw(|f| self.render_or_report(f, &action_tx))?;
                    }
                    Action::Render => {
                        tui.draw(|f| self.render_or_report(f, &action_tx))?;
                    }
                    Action::Edit => self.open_editor(),
                    Action::PopupResult(result) => self.apply_result(result.clone()),
                    Action::Save => {
                        self.popup = Some(Box::new(save_report(&self.state)));
                    }
                    Action::ClosePopup => {
                        self.popup = None;
                        self.state.editing = None;
                        self.state.input_mode = InputMode::Normal;
                    }
                    Action::Error(msg) => {
                        error!("{msg}");
                        self.popup = Some(Box::new(AlertPopup::new(
                            "Error",
                            msg.clone(),
                            AlertKind::Error,
                        )));
                    }
                    _ => {}
                }

                if let Some(popup) = &mut self.popup {
                    if let Some(action) = popup.update(action.clone(), &mut self.state)? {
                        action_tx.send(action)?
                    };
                } else if let Some(action) = self.form.update(action.clone(), &mut self.state)? {
                    action_tx.send(action)?
                }

                if let Some(action) = self.footer.update(action.clone(), &mut self.state)? {
                    action_tx.send(action)?
                };
            }

            if self.should_suspend {
                tui.suspend()?;
                // back here after SIGCONT
                tui.resume()?;
                action_tx.send(Action::Resume)?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("wizard closed");
        Ok(())
    }

    /// Route one terminal event: popup first (modal), then form, then footer.
    fn handle_event(&mut self, e: Event, action_tx: &UnboundedSender<Action>) -> Result<()> {
        if let Event::Key(key) = &e {
            if let Some(action) = global_action(key) {
                action_tx.send(action)?;
                return Ok(());
            }
        }

        let mut stop_event_propagation = match self.popup.as_mut() {
            Some(popup) => {
                let stop = forward(popup.handle_events(e.clone(), &mut self.state)?, action_tx);
                stop || (popup.is_modal() && is_input(&e))
            }
            None => false,
        };
        stop_event_propagation = stop_event_propagation
            || forward(self.form.handle_events(e.clone(), &mut self.state)?, action_tx);
        stop_event_propagation = stop_event_propagation
            || forward(self.footer.handle_events(e.clone(), &mut self.state)?, action_tx);

        if !stop_event_propagation {
            match e {
                Event::Error => {
                    action_tx.send(Action::Error("Terminal input failed".to_string()))?
                }
                Event::Tick => action_tx.send(Action::Tick)?,
                Event::Render => action_tx.send(Action::Render)?,
                Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Open the editor matching the focused field: a choice list for
    /// dropdowns, a text box for everything else.
    fn open_editor(&mut self) {
        let Some(id) = self.state.focused else {
            return;
        };
        let registry = self.state.session.registry();
        let field = registry.field(id);
        if !field.is_editable() {
            return;
        }

        let popup: Box<dyn PopupComponent> = if field.is_dropdown() {
            Box::new(SingleChoicePopup::new(
                field.label(),
                field.options(),
                field.selected_index().unwrap_or_default(),
            ))
        } else {
            let validator = (registry.mac_field() == Some(id))
                .then(|| Box::new(validate_mac) as crate::components::popups::input::Validator);
            Box::new(InputPopup::new(
                field.label(),
                field.help(),
                field.raw_value(),
                validator,
            ))
        };

        self.popup = Some(popup);
        self.state.editing = Some(id);
        self.state.input_mode = InputMode::Insert;
    }

    /// Write an editor result into the session. The popup closes itself via
    /// `Action::ClosePopup` afterwards.
    fn apply_result(&mut self, result: PopupResult) {
        let Some(id) = self.state.editing.take() else {
            return;
        };
        let changed = match result {
            PopupResult::InputSubmitted(value) => self.state.session.commit_text(id, &value),
            PopupResult::ChoiceSelected(index) => self.state.session.select(id, index),
            PopupResult::Cancelled => false,
        };
        if changed {
            self.state.repair_focus();
        }
        self.state.input_mode = InputMode::Normal;
    }

    fn render_or_report(&mut self, frame: &mut Frame<'_>, action_tx: &UnboundedSender<Action>) {
        if let Err(err) = self.render(frame) {
            action_tx
                .send(Action::Error(format!("Failed to draw: {err:?}")))
                .ok();
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let [header, form, footer] = Layout::vertical([
            self.header.height_constraint(),
            self.form.height_constraint(),
            self.footer.height_constraint(),
        ])
        .areas(frame.area());

        self.header.draw(frame, header, &self.state)?;
        self.form.draw(frame, form, &self.state)?;
        self.footer.draw(frame, footer, &self.state)?;

        if let Some(popup) = &mut self.popup {
            popup.draw(frame, frame.area(), &self.state)?;
        }
        Ok(())
    }
}

/// Save the session and describe the outcome for the operator.
fn save_report(state: &State) -> AlertPopup {
    let session = &state.session;
    match session.save(&state.serialize_options, &state.output_dir) {
        Ok(path) => {
            let mut lines = vec![format!("Saved {}", path.display())];
            let missing = session.missing_required();
            if !missing.is_empty() {
                let labels: Vec<&str> =
                    missing.iter().map(|id| session.field(*id).label()).collect();
                lines.push(format!("Required but empty: {}", labels.join(", ")));
            }
            let hidden = session.hidden_values();
            if !hidden.is_empty() {
                let labels: Vec<&str> =
                    hidden.iter().map(|id| session.field(*id).label()).collect();
                lines.push(format!("Hidden fields still written: {}", labels.join(", ")));
            }
            let kind = if lines.len() > 1 {
                AlertKind::Warning
            } else {
                AlertKind::Info
            };
            AlertPopup::new("Saved", lines.join("\n"), kind)
        }
        Err(ProvisionError::InvalidMac { sanitized }) => AlertPopup::new(
            "Cannot save",
            format!("Enter the full 12-digit MAC address first (have {sanitized:?})."),
            AlertKind::Error,
        ),
        Err(err) => {
            error!("save failed: {err}");
            AlertPopup::new("Cannot save", err.to_string(), AlertKind::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app(dir: &std::path::Path) -> App {
        let config = Config {
            output_dir: dir.to_path_buf(),
            ..Config::default()
        };
        App::new(config, "0.0.0")
    }

    #[test]
    fn save_without_mac_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());
        let report = save_report(&app.state);
        assert_eq!(report.kind(), AlertKind::Error);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_with_missing_pbx_warns_but_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.state.session.set_value("device", "0007a1b2c3d4");
        let report = save_report(&app.state);
        assert_eq!(report.kind(), AlertKind::Warning);
        assert!(dir.path().join("SEP0007A1B2C3D4.cnf.xml").exists());
    }

    #[test]
    fn editor_round_trip_commits_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let mac = app.state.focused.unwrap();

        app.open_editor();
        assert!(app.popup.is_some());
        assert_eq!(app.state.editing, Some(mac));
        assert_eq!(app.state.input_mode, InputMode::Insert);

        app.apply_result(PopupResult::InputSubmitted("00-07-a1-b2-c3-d4".into()));
        assert_eq!(app.state.session.field(mac).raw_value(), "0007A1B2C3D4");
        assert_eq!(app.state.editing, None);
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn choosing_an_option_reveals_dependents() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let registry = app.state.session.registry();
        let mode = registry.find("pcVoiceVlanAccess").unwrap();
        let vlan = registry.find("pcPortVlanId").unwrap();
        assert!(registry.field(vlan).is_hidden());

        app.state.focused = Some(mode);
        app.open_editor();
        app.apply_result(PopupResult::ChoiceSelected(2));
        assert!(!app.state.session.field(vlan).is_hidden());
    }

    #[test]
    fn cancel_leaves_value_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let mac = app.state.focused.unwrap();
        app.open_editor();
        app.apply_result(PopupResult::Cancelled);
        assert_eq!(app.state.session.field(mac).raw_value(), "");
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn global_keys_quit_and_suspend() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.handle_event(ctrl('c'), &tx).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::Quit);

        // an open popup does not swallow them
        app.open_editor();
        app.handle_event(ctrl('z'), &tx).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::Suspend);
        assert!(rx.try_recv().is_err());

        app.handle_event(Event::Key(KeyEvent::from(KeyCode::Char('z'))), &tx)
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::Update);
    }

    #[test]
    fn paste_reaches_the_open_editor() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mac = app.state.focused.unwrap();

        app.open_editor();
        app.handle_event(Event::Paste("00:07:a1:b2:c3:d4".into()), &tx)
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::Update);

        app.handle_event(Event::Key(KeyEvent::from(KeyCode::Enter)), &tx)
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::Submit);
        let submitted = app
            .popup
            .as_mut()
            .unwrap()
            .update(Action::Submit, &mut app.state)
            .unwrap();
        let Some(Action::PopupResult(result)) = submitted else {
            panic!("expected a popup result, got {submitted:?}");
        };
        app.apply_result(result);
        assert_eq!(app.state.session.field(mac).raw_value(), "0007A1B2C3D4");
    }

    #[test]
    fn terminal_errors_surface_as_actions() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.handle_event(Event::Error, &tx).unwrap();
        assert!(matches!(rx.try_recv().unwrap(), Action::Error(_)));
    }
}
