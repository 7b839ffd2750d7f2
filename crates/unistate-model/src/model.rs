//! Statically declared record types
//!
//! Types produced by [`crate::record!`] and [`crate::action!`] are newtypes
//! over [`Record`]. Each one lazily defines its own [`RecordType`] the first
//! time it is used, so two declarations never share a type identity.

use crate::error::ModelError;
use crate::record::{Record, RecordType};

/// A nominal record type with a single, process-wide [`RecordType`].
pub trait Model: Sized {
    /// The record type backing every instance of `Self`
    fn record_type() -> &'static RecordType;

    /// Wrap a record, checking it was built from [`Model::record_type`]
    fn from_record(record: Record) -> Result<Self, ModelError>;

    fn as_record(&self) -> &Record;

    fn into_record(self) -> Record;
}

#[doc(hidden)]
pub fn type_mismatch<M: Model>(record: &Record) -> ModelError {
    ModelError::TypeMismatch {
        expected: M::record_type().name().to_string(),
        found: record.type_name().to_string(),
    }
}
