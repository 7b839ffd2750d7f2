//! Action tags
//!
//! Actions are plain records used as dispatch payloads. They carry no
//! dispatch behaviour of their own; what makes them useful is that every
//! action type is nominally distinct, so a reducer can branch on *which*
//! action it received even when two actions have the same fields.
//!
//! Statically known actions are declared with [`crate::action!`] and usually
//! wrapped in an enum the reducer matches on. [`ActionType`] covers the
//! dynamic case, where action types are created at runtime.

use crate::error::ModelError;
use crate::model::Model;
use crate::record::{Record, RecordType};
use crate::value::Value;
use crate::SameRef;
use std::fmt;

/// Implemented by every type declared with [`crate::action!`]
pub trait Action: Model {
    /// Type name, for logging
    fn name(&self) -> &'static str;
}

/// A runtime-declared action type
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ActionType {
    record_type: RecordType,
}

impl ActionType {
    /// Declare a new action type carrying the given attributes.
    ///
    /// Each call yields a distinct type, even for identical arguments.
    pub fn with_attributes<N, I, F>(name: N, attributes: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        Self {
            record_type: RecordType::define(name, attributes),
        }
    }

    pub fn name(&self) -> &str {
        self.record_type.name()
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Build an action of this type; undeclared attributes are rejected
    pub fn create<K, V, I>(&self, attributes: I) -> Result<TaggedAction, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.record_type.create(attributes).map(TaggedAction)
    }

    /// Build an attribute-less (or all-`nil`) action of this type
    pub fn tag(&self) -> TaggedAction {
        TaggedAction(
            self.record_type
                .create_lenient(std::iter::empty::<(&str, Value)>()),
        )
    }
}

/// An instance of an [`ActionType`]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TaggedAction(Record);

impl TaggedAction {
    /// Whether this action was built from `action_type`
    pub fn is(&self, action_type: &ActionType) -> bool {
        self.0.is_a(&action_type.record_type)
    }

    /// The type this action was built from
    pub fn action_type(&self) -> ActionType {
        ActionType {
            record_type: self.0.record_type().clone(),
        }
    }

    pub fn name(&self) -> &str {
        self.0.type_name()
    }

    pub fn get(&self, attribute: &str) -> Result<&Value, ModelError> {
        self.0.get(attribute)
    }

    pub fn attribute(&self, attribute: &str) -> &Value {
        self.0.field(attribute)
    }

    pub fn update<K, V, I>(&self, attributes: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.0.update(attributes).map(Self)
    }

    pub fn as_record(&self) -> &Record {
        &self.0
    }
}

impl SameRef for TaggedAction {
    fn same_ref(&self, other: &Self) -> bool {
        self.0.same_ref(&other.0)
    }
}

impl fmt::Debug for TaggedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
