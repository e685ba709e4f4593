//! JSON record format.
//!
//! ```json
//! {
//!   "reference": "A12345",
//!   "locations":   [ { "name": "RCB00025 - Phlebotomy Waiting Room",
//!                      "details": { "code": "RCB00025", "building": "…" } } ],
//!   "disciplines": [ { "name": "Electrical", "details": { "discipline": "Electrical" } } ]
//! }
//! ```
//!
//! Every member is optional. A record without a name or details still loads;
//! missing attributes simply read as empty. Non-string detail values (numbers,
//! booleans) are kept in their JSON text form and `null` is dropped.

use crate::error::SourceError;
use crate::RecordSource;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use theory_core::{Record, RecordCollection, RecordStore};

const SEED: &str = include_str!("seed/records.json");

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordFile {
    reference: String,
    locations: Vec<RawRecord>,
    disciplines: Vec<RawRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    name: String,
    details: BTreeMap<String, Value>,
}

impl RawRecord {
    fn into_record(self) -> Record {
        let details = self.details.into_iter().filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, text))
        });
        Record::new(self.name, details)
    }
}

impl RecordFile {
    fn into_store(self) -> RecordStore {
        let collect = |raw: Vec<RawRecord>| {
            RecordCollection::new(raw.into_iter().map(RawRecord::into_record).collect())
        };
        RecordStore {
            reference: self.reference,
            locations: collect(self.locations),
            disciplines: collect(self.disciplines),
        }
    }
}

/// Parse a JSON document into a store. `origin` names the document in errors.
pub fn parse_store(text: &str, origin: &str) -> Result<RecordStore, SourceError> {
    let file: RecordFile = serde_json::from_str(text).map_err(|source| SourceError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    Ok(file.into_store())
}

fn log_loaded(origin: &str, store: &RecordStore) {
    tracing::info!(
        origin,
        reference = %store.reference,
        locations = store.locations.len(),
        disciplines = store.disciplines.len(),
        "records loaded"
    );
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The seed data compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl RecordSource for EmbeddedSource {
    fn describe(&self) -> String {
        "built-in records".to_string()
    }

    async fn load(&self) -> Result<RecordStore, SourceError> {
        let store = parse_store(SEED, "<embedded>")?;
        log_loaded("<embedded>", &store);
        Ok(store)
    }
}

/// A JSON record file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<RecordStore, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let origin = self.describe();
        let store = parse_store(&text, &origin)?;
        log_loaded(&origin, &store);
        Ok(store)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
