//! Declarative macros for record and action types.

/// Declare a nominal immutable record type.
///
/// ```
/// use unistate_model::{fields, record, Value};
///
/// record! {
///     /// A single todo item
///     pub struct Todo { title, done }
/// }
///
/// impl Todo {
///     pub fn is_done(&self) -> bool {
///         self.done().as_bool().unwrap_or(false)
///     }
/// }
///
/// let todo = Todo::new(fields! { title: "write docs", done: false })?;
/// let finished = todo.update(fields! { done: true })?;
///
/// assert!(!todo.is_done());
/// assert!(finished.is_done());
/// assert_eq!(finished.title(), &Value::from("write docs"));
/// # Ok::<(), unistate_model::ModelError>(())
/// ```
///
/// The generated type gets `new`, `update` and `get` plus one read-only
/// accessor per field, so fields must not be named `new`, `update` or `get`
/// (nor `name` for [`action!`] types, which would shadow [`crate::Action::name`]).
/// `Default` builds an instance with every field `nil`.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        $vis struct $name($crate::Record);

        #[allow(dead_code)]
        impl $name {
            /// Declared field names, in declaration order
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            /// Construct an instance; undeclared field names are rejected
            pub fn new<K, V, I>(fields: I) -> ::std::result::Result<Self, $crate::ModelError>
            where
                I: ::std::iter::IntoIterator<Item = (K, V)>,
                K: ::std::convert::AsRef<str>,
                V: ::std::convert::Into<$crate::Value>,
            {
                <Self as $crate::Model>::record_type().create(fields).map(Self)
            }

            /// Derive a new instance with the given fields overridden
            pub fn update<K, V, I>(&self, fields: I) -> ::std::result::Result<Self, $crate::ModelError>
            where
                I: ::std::iter::IntoIterator<Item = (K, V)>,
                K: ::std::convert::AsRef<str>,
                V: ::std::convert::Into<$crate::Value>,
            {
                self.0.update(fields).map(Self)
            }

            pub fn get(&self, field: &str) -> ::std::result::Result<&$crate::Value, $crate::ModelError> {
                self.0.get(field)
            }

            $(
                $(#[$field_meta])*
                pub fn $field(&self) -> &$crate::Value {
                    self.0.field(stringify!($field))
                }
            )*
        }

        impl $crate::Model for $name {
            fn record_type() -> &'static $crate::RecordType {
                static TYPE: ::std::sync::OnceLock<$crate::RecordType> = ::std::sync::OnceLock::new();
                TYPE.get_or_init(|| $crate::RecordType::define(stringify!($name), $name::FIELDS))
            }

            fn from_record(record: $crate::Record) -> ::std::result::Result<Self, $crate::ModelError> {
                if record.is_a(<Self as $crate::Model>::record_type()) {
                    Ok(Self(record))
                } else {
                    Err($crate::model::type_mismatch::<Self>(&record))
                }
            }

            fn as_record(&self) -> &$crate::Record {
                &self.0
            }

            fn into_record(self) -> $crate::Record {
                self.0
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self(<Self as $crate::Model>::record_type()
                    .create_lenient(::std::iter::empty::<(&str, $crate::Value)>()))
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl $crate::SameRef for $name {
            fn same_ref(&self, other: &Self) -> bool {
                $crate::SameRef::same_ref(&self.0, &other.0)
            }
        }

        impl ::std::convert::From<$name> for $crate::Value {
            fn from(model: $name) -> Self {
                $crate::Value::Record(model.0)
            }
        }

        impl ::std::convert::TryFrom<$crate::Value> for $name {
            type Error = $crate::ModelError;

            fn try_from(value: $crate::Value) -> ::std::result::Result<Self, Self::Error> {
                match value {
                    $crate::Value::Record(record) => <Self as $crate::Model>::from_record(record),
                    other => Err($crate::ModelError::NotARecord {
                        expected: stringify!($name).to_string(),
                        found: other.kind().to_string(),
                    }),
                }
            }
        }
    };
}

/// Declare an action tag type: a [`record!`] that also implements
/// [`crate::Action`].
///
/// Two `action!` declarations with identical fields are still distinct types,
/// so a reducer routes on the type, never on the field shape.
#[macro_export]
macro_rules! action {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::record! {
            $(#[$meta])*
            $vis struct $name { $($body)* }
        }

        impl $crate::Action for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

/// Build a field list for `new`/`update` from `name: value` pairs.
///
/// Values may be of different types as long as each converts into
/// [`crate::Value`].
#[macro_export]
macro_rules! fields {
    () => {{
        let empty: [(&'static str, $crate::Value); 0] = [];
        empty
    }};
    ( $($field:ident : $value:expr),+ $(,)? ) => {
        [ $( (stringify!($field), $crate::Value::from($value)) ),+ ]
    };
}
