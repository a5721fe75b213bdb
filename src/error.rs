use thiserror::Error;

/// Fatal input problems: the whole export is unusable and no statistics
/// are produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("check-in export contains no rows")]
    Empty,

    #[error("no row carries a recognizable title type")]
    NoRecognizedTypes,

    #[error("export header has {columns} recognized column(s); not a valid check-in export")]
    UnusableExport { columns: usize },
}

/// Per-field problems on a single row. Recovered locally: the row is
/// skipped for the affected metric but still counted toward the total.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("field '{0}' is missing")]
    Missing(&'static str),

    #[error("field '{field}' has unparseable value '{value}'")]
    Invalid { field: &'static str, value: String },
}
