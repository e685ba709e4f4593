//! Form controller: the form plus one autocomplete per bound field.
//!
//! This is the headless half of the application: the TUI translates
//! terminal events into calls on [`FormController`] and renders what it
//! exposes. Everything the user can do to the form goes through here, so the
//! whole interaction can be exercised without a terminal.

use crate::autocomplete::{Autocomplete, Commit, KeyOutcome, Nav};
use crate::config::Config;
use crate::form::{FieldId, Form};
use crate::provider::{NarrowedProvider, RecordProvider};
use crate::types::RecordStore;

/// An autocomplete attached to one field, with its provider and fill rules.
#[derive(Debug, Clone)]
pub struct BoundField {
    field: FieldId,
    autocomplete: Autocomplete,
    /// `None` when the record source could not be loaded.
    provider: Option<NarrowedProvider>,
    fill: Vec<(String, FieldId)>,
}

impl BoundField {
    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    /// Companion fields this binding may fill on commit.
    pub fn fill_targets(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fill.iter().map(|(_, field)| *field)
    }

    fn refresh(&mut self, form: &Form) {
        let records = self.provider.records(form);
        self.autocomplete.on_input(form.get(self.field), records);
    }
}

/// Result of committing a row: the label written and the companions filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub commit: Commit,
    pub filled: Vec<FieldId>,
}

#[derive(Debug, Clone)]
pub struct FormController {
    form: Form,
    bound: Vec<BoundField>,
}

impl FormController {
    /// Bind every configured field. With `store == None` the fields are
    /// still bound but never find anything.
    pub fn new(config: &Config, store: Option<&RecordStore>) -> Self {
        let bound = config
            .fields
            .iter()
            .map(|binding| BoundField {
                field: binding.field,
                autocomplete: Autocomplete::new(binding.autocomplete_config()),
                provider: store.map(|s| {
                    NarrowedProvider::new(
                        s.collection(binding.source).clone(),
                        binding.narrow_constraints(),
                    )
                }),
                fill: binding
                    .fill
                    .iter()
                    .map(|(key, field)| (key.clone(), *field))
                    .collect(),
            })
            .collect();

        Self {
            form: Form::new(),
            bound,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn bound(&self, field: FieldId) -> Option<&BoundField> {
        self.bound.iter().find(|b| b.field == field)
    }

    pub fn autocomplete(&self, field: FieldId) -> Option<&Autocomplete> {
        self.bound(field).map(BoundField::autocomplete)
    }

    /// The field whose popup is currently open, if any.
    pub fn open_field(&self) -> Option<FieldId> {
        self.bound
            .iter()
            .find(|b| b.autocomplete.is_open())
            .map(|b| b.field)
    }

    /// The user changed a field's text. Re-runs that field's search and
    /// closes any popup open on another field.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.form.set(field, value);
        for bound in &mut self.bound {
            if bound.field == field {
                bound.refresh(&self.form);
            } else {
                bound.autocomplete.dismiss();
            }
        }
    }

    /// Send a navigation key to `field`'s popup. A commit is applied to the
    /// form before it is returned.
    pub fn key(&mut self, field: FieldId, nav: Nav) -> KeyOutcome {
        let Some(bound) = self.bound.iter_mut().find(|b| b.field == field) else {
            return KeyOutcome::Ignored;
        };
        let outcome = bound.autocomplete.key(nav);
        if let KeyOutcome::Committed(commit) = &outcome {
            self.apply(field, commit);
        }
        outcome
    }

    pub fn hover(&mut self, field: FieldId, row: usize) {
        if let Some(bound) = self.bound.iter_mut().find(|b| b.field == field) {
            bound.autocomplete.hover(row);
        }
    }

    /// Click on a popup row: commits it and applies it to the form.
    pub fn click(&mut self, field: FieldId, row: usize) -> Option<Applied> {
        let bound = self.bound.iter_mut().find(|b| b.field == field)?;
        let commit = bound.autocomplete.click(row)?;
        let filled = self.apply(field, &commit);
        Some(Applied { commit, filled })
    }

    /// Close `field`'s popup without committing.
    pub fn dismiss(&mut self, field: FieldId) {
        if let Some(bound) = self.bound.iter_mut().find(|b| b.field == field) {
            bound.autocomplete.dismiss();
        }
    }

    pub fn dismiss_all(&mut self) {
        self.bound.iter_mut().for_each(|b| b.autocomplete.dismiss());
    }

    /// Start a new task.
    pub fn clear(&mut self) {
        self.form.clear();
        self.dismiss_all();
        tracing::debug!("form cleared");
    }

    /// Write the committed label and fill empty companion fields.
    fn apply(&mut self, field: FieldId, commit: &Commit) -> Vec<FieldId> {
        self.form.choose(field, commit.label.clone());

        let fill = self
            .bound
            .iter()
            .find(|b| b.field == field)
            .map(|b| b.fill.clone())
            .unwrap_or_default();

        let mut filled = Vec::new();
        for (key, target) in &fill {
            if self.form.fill_if_empty(*target, commit.record.detail(key)) {
                filled.push(*target);
            }
        }

        tracing::debug!(%field, label = %commit.label, ?filled, "commit applied");
        filled
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
