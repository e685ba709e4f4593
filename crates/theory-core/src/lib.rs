//! theory-core: records, search and the autocomplete state machine.
//!
//! Everything here is headless: no terminal, no I/O beyond reading the
//! config file. The TUI crate drives it through [`controller::FormController`].
//!
//! # Architecture
//!
//! ```text
//! RecordStore ──► RecordProvider ──► Autocomplete ──► FormController
//!                  (narrowing)        (per field)        │
//!                                                        ▼
//!                                                      Form
//! ```

pub mod autocomplete;
pub mod config;
pub mod controller;
pub mod form;
pub mod provider;
pub mod search;
pub mod types;

pub use autocomplete::{Autocomplete, AutocompleteConfig, Commit, KeyOutcome, MatchRow, Nav};
pub use controller::FormController;
pub use form::{Endpoint, FieldId, Form, Role};
pub use types::{CollectionKind, Record, RecordCollection, RecordStore};
