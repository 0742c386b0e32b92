//! Store error types.

/// Errors from loading or querying rail data stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading a data file failed.
    #[error("I/O error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A data file could not be deserialized.
    #[error("malformed data in {file}: {message}")]
    Malformed { file: String, message: String },

    /// The backing data source is unavailable.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}
