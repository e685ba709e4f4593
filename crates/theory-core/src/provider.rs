//! Record providers: how a bound field obtains the records it searches.
//!
//! The autocomplete never reaches for ambient state; on every input change
//! the host asks the field's [`RecordProvider`] for the current collection,
//! handing it the form so the provider can narrow by fields the user has
//! already chosen (e.g. locations inside the selected building).

use crate::form::{FieldId, Form};
use crate::types::RecordCollection;

/// Capability that yields the records a field currently searches.
///
/// `None` means the source is unavailable; the autocomplete treats that the
/// same as an empty collection and simply never opens.
pub trait RecordProvider {
    fn records(&self, form: &Form) -> Option<RecordCollection>;
}

impl RecordProvider for RecordCollection {
    fn records(&self, _form: &Form) -> Option<RecordCollection> {
        Some(self.clone())
    }
}

impl<P: RecordProvider> RecordProvider for Option<P> {
    fn records(&self, form: &Form) -> Option<RecordCollection> {
        self.as_ref().and_then(|p| p.records(form))
    }
}

/// Restricts a base collection to the records that agree with fields the
/// user has already chosen.
///
/// Every constraint pairs a record detail key with a form field. A record is
/// kept only if it agrees with **all** constraints whose field holds a value
/// chosen from a record (see [`Form::chosen`]); typed text and empty fields
/// do not constrain. Comparison ignores case and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct NarrowedProvider {
    base: RecordCollection,
    constraints: Vec<(String, FieldId)>,
}

impl NarrowedProvider {
    pub fn new(base: RecordCollection, constraints: Vec<(String, FieldId)>) -> Self {
        Self { base, constraints }
    }

    /// `(detail key, lowercased wanted value)` for every active constraint.
    fn active<'a>(&'a self, form: &Form) -> Vec<(&'a str, String)> {
        self.constraints
            .iter()
            .filter_map(|(key, field)| {
                form.chosen(*field)
                    .map(|wanted| (key.as_str(), wanted.trim().to_lowercase()))
            })
            .collect()
    }
}

impl RecordProvider for NarrowedProvider {
    fn records(&self, form: &Form) -> Option<RecordCollection> {
        let active = self.active(form);
        if active.is_empty() {
            return Some(self.base.clone());
        }
        Some(self.base.narrow(|r| {
            active
                .iter()
                .all(|(key, wanted)| r.detail(key).trim().to_lowercase() == *wanted)
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
