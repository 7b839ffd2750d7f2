//! Immutable value records for unidirectional state
//!
//! This crate provides:
//! - [`Record`] / [`RecordType`]: named-field values with structural equality,
//!   hashing and non-destructive [`Record::update`]
//! - [`Value`]: the dynamic field value type
//! - [`SameRef`]: the O(1) reference-identity test, kept separate from `==`
//! - Action tags: [`ActionType`] for runtime-declared actions and the
//!   [`action!`] macro for nominal ones
//! - [`record!`] and [`fields!`] for declaring and populating record types
//!
//! Nothing here knows about stores; these are plain values.

#[macro_use]
mod macros;

pub mod action;
mod error;
mod identity;
#[doc(hidden)]
pub mod model;
mod record;
mod value;

pub use action::{Action, ActionType, TaggedAction};
pub use error::ModelError;
pub use identity::SameRef;
pub use model::Model;
pub use record::{Record, RecordType};
pub use value::Value;
