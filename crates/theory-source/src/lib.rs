//! theory-source: where the records come from.
//!
//! A [`RecordSource`] is loaded exactly once, before the form opens. The
//! result is an immutable [`RecordStore`]; nothing is re-read afterwards.
//!
//! Two sources ship with the crate:
//!
//! - [`EmbeddedSource`]: the seed data compiled into the binary.
//! - [`JsonFileSource`]: a JSON document on disk, see [`json`] for the format.

pub mod error;
pub mod json;

pub use error::SourceError;
pub use json::{EmbeddedSource, JsonFileSource};

use std::future::Future;
use theory_core::RecordStore;

/// One-shot asynchronous loader for the record store.
pub trait RecordSource {
    /// Short human-readable description, used in log lines and the status bar.
    fn describe(&self) -> String;

    fn load(&self) -> impl Future<Output = Result<RecordStore, SourceError>> + Send;
}
