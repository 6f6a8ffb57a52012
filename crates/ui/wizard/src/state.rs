use std::path::PathBuf;

use provisioning::{FieldId, SerializeOptions, Session};

use crate::config::Config;

/// Everything the components read while drawing and mutate while handling
/// input. The session is the only owner of field values.
pub struct State {
    pub session: Session,
    pub focused: Option<FieldId>,
    /// Field whose editor popup is open.
    pub editing: Option<FieldId>,
    pub input_mode: InputMode,
    pub output_dir: PathBuf,
    pub serialize_options: SerializeOptions,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

impl State {
    pub fn new(config: &Config) -> Self {
        Self::with_session(Session::new(), config)
    }

    pub fn with_session(session: Session, config: &Config) -> Self {
        let focused = session.registry().first_editable();
        Self {
            session,
            focused,
            editing: None,
            input_mode: InputMode::Normal,
            output_dir: config.output_dir.clone(),
            serialize_options: config.serialize_options(),
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(next) = self
            .focused
            .and_then(|id| self.session.registry().next_editable(id))
        {
            self.focused = Some(next);
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(prev) = self
            .focused
            .and_then(|id| self.session.registry().prev_editable(id))
        {
            self.focused = Some(prev);
        }
    }

    /// Move focus by up to `steps` editable fields; negative moves up.
    pub fn focus_by(&mut self, steps: isize) {
        for _ in 0..steps.unsigned_abs() {
            if steps < 0 {
                self.focus_prev();
            } else {
                self.focus_next();
            }
        }
    }

    pub fn focus_first(&mut self) {
        self.focused = self.session.registry().first_editable();
    }

    pub fn focus_last(&mut self) {
        let registry = self.session.registry();
        self.focused = registry
            .visible()
            .filter(|(_, field)| field.is_editable())
            .map(|(id, _)| id)
            .last();
    }

    /// Keep focus on an editable field after visibility changed under it.
    pub fn repair_focus(&mut self) {
        let registry = self.session.registry();
        let still_editable = self
            .focused
            .and_then(|id| registry.get(id))
            .is_some_and(|field| field.is_editable());
        if still_editable {
            return;
        }
        self.focused = self
            .focused
            .and_then(|id| registry.next_editable(id).or_else(|| registry.prev_editable(id)))
            .or_else(|| registry.first_editable());
    }
}
