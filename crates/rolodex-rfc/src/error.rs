use thiserror::Error;

/// Errors raised by caller-facing record operations.
///
/// Import never produces these; its diagnostics are reported as
/// [`ParseWarning`](crate::rfc::vcard::ParseWarning) values instead.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid type tag {tag:?} for field {field}")]
    InvalidTypeTag { field: String, tag: String },

    #[error("Field {field} does not accept {found} values")]
    ValueKindMismatch { field: String, found: &'static str },

    #[error(transparent)]
    Core(#[from] rolodex_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
