/// Error types shared by the site and MCP binaries.
///
/// Storage failures are deliberately absent: the key-value layer logs and degrades
/// instead of failing. These errors describe rejected edits and bad caller input.
/// Binary crates wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("no item with id {id} in section {section}")]
    UnknownItem { section: String, id: String },

    #[error("unknown field {field} for section {section}")]
    UnknownField { section: String, field: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("operation {op} is not supported by section {section}")]
    UnsupportedOp { section: String, op: String },

    #[error("index {index} out of range for {field} (len {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("open edit session is on {found}, expected {expected}")]
    SectionMismatch { expected: String, found: String },

    #[error("no edit session is open")]
    NoActiveSession,

    #[error("validation failed for {section}: {message}")]
    Validation { section: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
