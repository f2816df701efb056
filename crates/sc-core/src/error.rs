use crate::record::RecordKind;

/// Alias for `Result<T, CrystalError>`.
pub type CrystalResult<T> = Result<T, CrystalError>;

/// Errors a caller of the store or export helpers can observe.
///
/// Persistence failures never surface here: the store logs them and keeps
/// working from memory.
#[derive(Debug, thiserror::Error)]
pub enum CrystalError {
    /// A record form was submitted without its required field.
    #[error("{kind} {field} must not be empty")]
    MissingField {
        /// The kind of record being added.
        kind: RecordKind,
        /// The form field the user has to fill in.
        field: &'static str,
    },

    /// A field name did not match any editable campaign or note field.
    #[error("unknown field: \"{0}\"")]
    UnknownField(String),

    /// A record section name could not be parsed.
    #[error("unknown section: \"{0}\"")]
    UnknownSection(String),

    /// The export document could not be serialized.
    #[error("cannot serialize campaign: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The export file could not be written.
    #[error("cannot write export: {0}")]
    Export(#[from] std::io::Error),
}

/// Failures of a [`Storage`](crate::storage::Storage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying file system refused the operation.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is not accepting reads or writes.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
