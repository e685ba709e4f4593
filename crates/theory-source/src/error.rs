use std::path::PathBuf;

/// Why a record source could not produce a store.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read record file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record data in {origin}: {source}")]
    Parse {
        /// File path, or `<embedded>` for the built-in seed.
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}
