//! Test builders: ergonomic constructors for records, collections and
//! stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use theory_core::{Record, RecordCollection, RecordStore};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] test fixtures.
///
/// ```rust
/// let record = RecordBuilder::new("RCB00030 - Store")
///     .detail("code", "RCB00030")
///     .detail("department", "RUG - DAY SURGERY")
///     .build();
/// ```
pub struct RecordBuilder {
    name: String,
    details: Vec<(String, String)>,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: Vec::new(),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Record {
        Record::new(self.name, self.details)
    }
}

/// A location record named `"<code> - <room>"`, the way the seed data names
/// them.
pub fn location(code: &str, room: &str, building: &str, department: &str) -> Record {
    RecordBuilder::new(format!("{code} - {room}"))
        .detail("code", code)
        .detail("room", room)
        .detail("building", building)
        .detail("department", department)
        .build()
}

/// A discipline record carrying its name as the `discipline` detail.
pub fn discipline(name: &str) -> Record {
    RecordBuilder::new(name).detail("discipline", name).build()
}

/// A record with no details at all.
pub fn bare(name: &str) -> Record {
    RecordBuilder::new(name).build()
}

// ---------------------------------------------------------------------------
// StoreBuilder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StoreBuilder {
    reference: String,
    locations: Vec<Record>,
    disciplines: Vec<Record>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn location(mut self, record: Record) -> Self {
        self.locations.push(record);
        self
    }

    pub fn discipline(mut self, name: &str) -> Self {
        self.disciplines.push(discipline(name));
        self
    }

    pub fn build(self) -> RecordStore {
        RecordStore {
            reference: self.reference,
            locations: RecordCollection::new(self.locations),
            disciplines: RecordCollection::new(self.disciplines),
        }
    }
}
