//! Field model: the atomic configuration unit of the provisioning form.
//!
//! A [`Field`] is either free text or a dropdown over a static option
//! catalog. Section headers are fields too (kind [`FieldKind::Header`]) so
//! the registry can be rendered as one flat ordered list.
//!
//! See also:
//! - `registry.rs`   : ordered collection, sections, button groups, lookups
//! - `visibility.rs` : dependency table deciding `hidden`
//! - `session.rs`    : the mutation API used by the terminal shell

use crate::mac::sanitize_mac;

/// Stable handle to a field: its position in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) usize);

impl FieldId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One dropdown option: operator-facing label and the encoded firmware value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub value: &'static str,
}

impl Choice {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

/// Rendering emphasis of a field.
///
/// Only the MAC address blocks saving; other `Required` fields are
/// highlighted and reported, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Header,
    Required,
    Optional,
}

/// Normalisation applied when text is committed into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFilter {
    #[default]
    None,
    MacAddress,
}

impl TextFilter {
    pub fn apply(self, input: &str) -> String {
        match self {
            TextFilter::None => input.to_string(),
            TextFilter::MacAddress => sanitize_mac(input),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choice {
        options: &'static [Choice],
        selected: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Field {
    label: String,
    key: &'static str,
    kind: FieldKind,
    help: &'static str,
    value: FieldValue,
    filter: TextFilter,
    hidden: bool,
}

impl Field {
    pub(crate) fn text(
        label: impl Into<String>,
        key: &'static str,
        kind: FieldKind,
        help: &'static str,
    ) -> Self {
        Self {
            label: label.into(),
            key,
            kind,
            help,
            value: FieldValue::Text(String::new()),
            filter: TextFilter::None,
            hidden: false,
        }
    }

    /// Panics when `default` is out of range: the catalogs are static data and
    /// a bad default is a programming error.
    pub(crate) fn dropdown(
        label: impl Into<String>,
        key: &'static str,
        help: &'static str,
        options: &'static [Choice],
        default: usize,
    ) -> Self {
        let label = label.into();
        assert!(
            default < options.len(),
            "default option {default} out of range for dropdown `{label}` ({} options)",
            options.len()
        );
        Self {
            label,
            key,
            kind: FieldKind::Optional,
            help,
            value: FieldValue::Choice {
                options,
                selected: default,
            },
            filter: TextFilter::None,
            hidden: false,
        }
    }

    pub(crate) fn with_filter(mut self, filter: TextFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// XML element name; empty for section headers.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn filter(&self) -> TextFilter {
        self.filter
    }

    pub fn is_header(&self) -> bool {
        self.kind == FieldKind::Header
    }

    pub fn is_required(&self) -> bool {
        self.kind == FieldKind::Required
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_dropdown(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// True if the operator can focus and edit this field right now.
    pub fn is_editable(&self) -> bool {
        !self.is_header() && !self.hidden
    }

    /// Option catalog; empty for text fields.
    pub fn options(&self) -> &'static [Choice] {
        match self.value {
            FieldValue::Choice { options, .. } => options,
            FieldValue::Text(_) => &[],
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self.value {
            FieldValue::Choice { selected, .. } => Some(selected),
            FieldValue::Text(_) => None,
        }
    }

    pub fn selected_choice(&self) -> Option<&'static Choice> {
        match self.value {
            FieldValue::Choice { options, selected } => options.get(selected),
            FieldValue::Text(_) => None,
        }
    }

    /// Value as the operator sees it: the typed text, or the selected label.
    pub fn raw_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(text) => text,
            FieldValue::Choice { .. } => self.selected_choice().map_or("", |c| c.label),
        }
    }

    /// Firmware value of the selected option; empty for text fields.
    pub fn encoded_value(&self) -> &'static str {
        self.selected_choice().map_or("", |c| c.value)
    }

    /// Replace the text of a free-text field, running it through the field's
    /// filter. Returns `false` (and changes nothing) for dropdowns and headers.
    pub(crate) fn set_text(&mut self, input: &str) -> bool {
        if self.is_header() {
            return false;
        }
        let filter = self.filter;
        match &mut self.value {
            FieldValue::Text(text) => {
                *text = filter.apply(input);
                true
            }
            FieldValue::Choice { .. } => false,
        }
    }

    /// Select option `index`. Out-of-range indices are rejected.
    pub(crate) fn select(&mut self, index: usize) -> bool {
        match &mut self.value {
            FieldValue::Choice { options, selected } if index < options.len() => {
                *selected = index;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
