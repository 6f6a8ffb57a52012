//! Editing session: the only way to mutate a registry.
//!
//! Every value-changing call re-evaluates the visibility rules triggered by
//! the changed field before returning, so `hidden` never goes stale.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::field::{Field, FieldId};
use crate::registry::Registry;
use crate::serializer::{self, Document, SerializeOptions};
use crate::visibility::{recompute_dependents, recompute_visibility};

#[derive(Debug, Clone)]
pub struct Session {
    registry: Registry,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh Cisco 8945 form with initial visibility applied.
    pub fn new() -> Self {
        Self::with_registry(Registry::cisco_8945())
    }

    pub fn with_registry(mut registry: Registry) -> Self {
        recompute_visibility(&mut registry);
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn field(&self, id: FieldId) -> &Field {
        self.registry.field(id)
    }

    /// Commit operator text into a free-text field. Returns `false` for
    /// headers, dropdowns and unknown ids.
    pub fn commit_text(&mut self, id: FieldId, input: &str) -> bool {
        let Some(field) = self.registry.fields.get_mut(id.index()) else {
            return false;
        };
        if !field.set_text(input) {
            return false;
        }
        debug!(key = field.key(), "text committed");
        recompute_dependents(&mut self.registry, id);
        true
    }

    /// Select option `index` of a dropdown. Out-of-range indices and
    /// non-dropdown fields are rejected and leave the session unchanged.
    pub fn select(&mut self, id: FieldId, index: usize) -> bool {
        let Some(field) = self.registry.fields.get_mut(id.index()) else {
            return false;
        };
        if !field.select(index) {
            debug!(key = field.key(), index, "selection rejected");
            return false;
        }
        debug!(key = field.key(), value = field.raw_value(), "option selected");
        recompute_dependents(&mut self.registry, id);
        true
    }

    /// Set the first text field carrying `key`.
    pub fn set_value(&mut self, key: &str, input: &str) -> bool {
        self.registry
            .find(key)
            .is_some_and(|id| self.commit_text(id, input))
    }

    /// Select an option on the first dropdown carrying `key`.
    pub fn select_key(&mut self, key: &str, index: usize) -> bool {
        self.registry
            .find(key)
            .is_some_and(|id| self.select(id, index))
    }

    /// Required fields still empty, in registry order.
    pub fn missing_required(&self) -> Vec<FieldId> {
        self.registry
            .iter()
            .filter(|(_, field)| field.is_required() && field.raw_value().is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Hidden text fields that still hold a value. Those values are written on
    /// save even though the operator can no longer see them.
    pub fn hidden_values(&self) -> Vec<FieldId> {
        self.registry
            .iter()
            .filter(|(_, field)| {
                field.is_hidden() && !field.is_dropdown() && !field.raw_value().is_empty()
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn serialize(&self, options: &SerializeOptions) -> Result<Document> {
        serializer::serialize(&self.registry, options)
    }

    /// Serialize and write `SEP<MAC>.cnf.xml` into `dir`.
    pub fn save(&self, options: &SerializeOptions, dir: impl AsRef<Path>) -> Result<PathBuf> {
        for id in self.missing_required() {
            warn!(key = self.field(id).key(), "required field is empty");
        }
        let path = serializer::save(&self.registry, options, dir)?;
        info!(path = %path.display(), "session saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ButtonFunction;

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut session = Session::new();
        let transport = session.registry().find("transportLayerProtocol").unwrap();
        assert!(!session.select(transport, 3));
        assert_eq!(session.field(transport).selected_index(), Some(0));
        assert!(session.select(transport, 2));
        assert_eq!(session.registry().encoded_value("transportLayerProtocol"), "3");
    }

    #[test]
    fn commit_text_rejects_dropdowns_and_headers() {
        let mut session = Session::new();
        let nat = session.registry().find("natEnabled").unwrap();
        assert!(!session.commit_text(nat, "Yes"));
        let header = session.registry().sections()[0].header;
        assert!(!session.commit_text(header, "x"));
    }

    #[test]
    fn mac_is_sanitized_on_commit() {
        let mut session = Session::new();
        assert!(session.set_value("device", "00:07:a1-B2.c3d4"));
        assert_eq!(session.registry().value("device"), "0007A1B2C3D4");
    }

    #[test]
    fn key_function_drives_button_visibility() {
        let mut session = Session::new();
        let button = session.registry().buttons()[1];
        for id in button.sub_fields() {
            assert!(session.field(id).is_hidden());
        }

        assert!(session.select(button.key_function, ButtonFunction::Line.index()));
        for id in button.sub_fields() {
            assert!(!session.field(id).is_hidden());
        }

        assert!(session.select(button.key_function, ButtonFunction::Blf.index()));
        for id in button.identity_fields() {
            assert!(!session.field(id).is_hidden());
        }
        for id in button.line_fields() {
            assert!(session.field(id).is_hidden());
        }

        assert!(session.select(button.key_function, ButtonFunction::Disabled.index()));
        for id in button.sub_fields() {
            assert!(session.field(id).is_hidden());
        }
    }

    #[test]
    fn nat_address_follows_nat_toggle() {
        let mut session = Session::new();
        let address = session.registry().find("natAddress").unwrap();
        assert!(session.field(address).is_hidden());
        assert!(session.select_key("natEnabled", 1));
        assert!(!session.field(address).is_hidden());
        assert!(session.select_key("natEnabled", 0));
        assert!(session.field(address).is_hidden());
    }

    #[test]
    fn hidden_values_are_kept_and_reported() {
        let mut session = Session::new();
        assert!(session.select_key("snmpEnabled", 1));
        assert!(session.set_value("snmpCommunity", "public"));
        assert!(session.select_key("snmpEnabled", 0));

        let community = session.registry().find("snmpCommunity").unwrap();
        assert_eq!(session.registry().value("snmpCommunity"), "public");
        assert_eq!(session.hidden_values(), vec![community]);
    }

    #[test]
    fn missing_required_lists_empty_required_fields() {
        let mut session = Session::new();
        let keys: Vec<&str> = session
            .missing_required()
            .into_iter()
            .map(|id| session.field(id).key())
            .collect();
        assert_eq!(keys, ["device", "processNodeName1"]);

        session.set_value("processNodeName1", "pbx.local");
        assert_eq!(session.missing_required().len(), 1);
    }
}
