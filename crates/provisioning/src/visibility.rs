//! Visibility engine.
//!
//! Every cross-field dependency is a [`Rule`]: a trigger field, a condition on
//! the trigger's selection, and the dependents that are shown while the
//! condition holds (and hidden otherwise). Rules are indexed by trigger so a
//! mutation only re-evaluates the rules it can affect.
//!
//! Visibility only decides what the operator is offered. Values of hidden
//! fields are kept and the serializer ignores `hidden` entirely.

use std::collections::HashMap;

use tracing::trace;

use crate::field::{Field, FieldId};
use crate::registry::Registry;

/// Condition on a dropdown trigger's selected option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Selected(usize),
    NotSelected(usize),
}

impl Condition {
    /// Text triggers never satisfy a condition.
    pub fn holds(self, trigger: &Field) -> bool {
        match (self, trigger.selected_index()) {
            (Condition::Selected(wanted), Some(selected)) => selected == wanted,
            (Condition::NotSelected(unwanted), Some(selected)) => selected != unwanted,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub trigger: FieldId,
    pub show_when: Condition,
    pub dependents: Vec<FieldId>,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyTable {
    rules: Vec<Rule>,
    by_trigger: HashMap<FieldId, Vec<usize>>,
}

impl DependencyTable {
    pub fn add(&mut self, rule: Rule) {
        self.by_trigger
            .entry(rule.trigger)
            .or_default()
            .push(self.rules.len());
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_for(&self, trigger: FieldId) -> impl Iterator<Item = &Rule> + '_ {
        self.by_trigger
            .get(&trigger)
            .into_iter()
            .flatten()
            .map(|&index| &self.rules[index])
    }

    pub fn is_trigger(&self, id: FieldId) -> bool {
        self.by_trigger.contains_key(&id)
    }

    /// Every field that some rule can hide.
    pub fn dependents(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.rules.iter().flat_map(|rule| rule.dependents.iter().copied())
    }
}

fn apply(fields: &mut [Field], rule: &Rule) {
    let show = fields
        .get(rule.trigger.index())
        .is_some_and(|trigger| rule.show_when.holds(trigger));
    for dependent in &rule.dependents {
        if let Some(field) = fields.get_mut(dependent.index()) {
            field.set_hidden(!show);
        }
    }
}

/// Full pass over the dependency table. Idempotent.
pub fn recompute_visibility(registry: &mut Registry) {
    let Registry {
        fields,
        dependencies,
        ..
    } = registry;
    for rule in dependencies.rules() {
        apply(fields, rule);
    }
}

/// Re-evaluate only the rules triggered by `changed`.
pub fn recompute_dependents(registry: &mut Registry, changed: FieldId) {
    let Registry {
        fields,
        dependencies,
        ..
    } = registry;
    for rule in dependencies.rules_for(changed) {
        apply(fields, rule);
        trace!(
            trigger = changed.index(),
            dependents = rule.dependents.len(),
            "visibility rule re-evaluated"
        );
    }
}
