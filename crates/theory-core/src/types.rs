//! Core types for theory-core.
//!
//! This module defines the data the autocomplete searches over: a single
//! [`Record`], the immutable name-sorted [`RecordCollection`], and the
//! [`RecordStore`] produced by one load of the record source.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A structured item (location, discipline) available for selection.
///
/// The searchable text is computed once at construction and never changes;
/// records are immutable after they are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    display_name: String,
    search_blob: String,
    details: BTreeMap<String, String>,
}

impl Record {
    /// Build a record from its display name and its attribute mapping.
    ///
    /// Attribute keys are stored lowercase. The search blob is the lowercased
    /// concatenation of the display name and every non-empty attribute value,
    /// separated by single spaces.
    pub fn new<I, K, V>(display_name: impl Into<String>, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let display_name = display_name.into();
        let details: BTreeMap<String, String> = details
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v.into()))
            .collect();

        let search_blob = std::iter::once(display_name.as_str())
            .chain(details.values().map(String::as_str))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        Self {
            display_name,
            search_blob,
            details,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lowercased text every query is matched against.
    pub fn search_blob(&self) -> &str {
        &self.search_blob
    }

    pub fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    /// Value of one attribute, looked up case-insensitively. Missing
    /// attributes read as the empty string.
    pub fn detail(&self, key: &str) -> &str {
        self.details
            .get(&key.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Case-insensitive ordering on display names; exact name breaks ties so the
/// order is total and stable across loads.
fn name_order(a: &Record, b: &Record) -> Ordering {
    a.display_name
        .to_lowercase()
        .cmp(&b.display_name.to_lowercase())
        .then_with(|| a.display_name.cmp(&b.display_name))
}

/// Ordered, name-sorted, immutable sequence of [`Record`]s.
///
/// Cloning is cheap: clones share the same backing storage, so every bound
/// field can hold its own handle to the same loaded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCollection {
    records: Arc<[Record]>,
}

impl Default for RecordCollection {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl RecordCollection {
    /// Sort `records` by name and freeze them.
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by(name_order);
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Sub-collection of the records accepted by `keep`, in the same order.
    pub fn narrow(&self, mut keep: impl FnMut(&Record) -> bool) -> Self {
        // Already sorted, so skip `new` and its re-sort.
        let records: Vec<Record> = self.records.iter().filter(|r| keep(*r)).cloned().collect();
        Self {
            records: records.into(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Which collection of a [`RecordStore`] a field searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Locations,
    Disciplines,
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionKind::Locations => write!(f, "locations"),
            CollectionKind::Disciplines => write!(f, "disciplines"),
        }
    }
}

/// Everything one load of the record source yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    /// Task reference shown in the header (e.g. `A12345`).
    pub reference: String,
    pub locations: RecordCollection,
    pub disciplines: RecordCollection,
}

impl RecordStore {
    pub fn collection(&self, kind: CollectionKind) -> &RecordCollection {
        match kind {
            CollectionKind::Locations => &self.locations,
            CollectionKind::Disciplines => &self.disciplines,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
