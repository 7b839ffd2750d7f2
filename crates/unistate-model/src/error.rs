//! Errors raised while constructing or deriving records.

use thiserror::Error;

/// Errors that can occur when building, updating or converting a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A field name that the record type never declared
    #[error("unknown field `{field}` for record type `{record_type}`")]
    UnknownField { record_type: String, field: String },

    /// A record of one type was converted into a model of another type
    #[error("expected record of type `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },

    /// A value that is not a record was converted into a model
    #[error("expected record of type `{expected}`, found non-record value {found}")]
    NotARecord { expected: String, found: String },
}

impl ModelError {
    pub(crate) fn unknown_field(record_type: &str, field: &str) -> Self {
        Self::UnknownField {
            record_type: record_type.to_string(),
            field: field.to_string(),
        }
    }
}
