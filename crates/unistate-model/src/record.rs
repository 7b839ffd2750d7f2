//! Immutable records
//!
//! A [`RecordType`] is a named, ordered list of field names. Every call to
//! [`RecordType::define`] produces a new type identity, even when two
//! definitions share a name and field list. A [`Record`] is an instance of a
//! record type: its field values are fixed at construction and can only be
//! "changed" by deriving a new record through [`Record::update`].

use crate::error::ModelError;
use crate::value::{Value, NIL};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

struct Schema {
    id: u64,
    name: String,
    fields: Vec<String>,
    index: HashMap<String, usize>,
}

/// Declared shape of a record: a name plus ordered field names
#[derive(Clone)]
pub struct RecordType {
    schema: Arc<Schema>,
}

impl RecordType {
    /// Declare a new record type.
    ///
    /// Repeated field names collapse onto their first occurrence.
    pub fn define<N, I, F>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let name = name.into();
        let mut names = Vec::new();
        let mut index = HashMap::new();

        for field in fields {
            let field = field.as_ref();
            if index.contains_key(field) {
                log::warn!("record type {}: duplicate field `{}` ignored", name, field);
                continue;
            }
            index.insert(field.to_string(), names.len());
            names.push(field.to_string());
        }

        let id = NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed);
        log::trace!("defined record type {}#{} with fields {:?}", name, id, names);

        Self {
            schema: Arc::new(Schema {
                id,
                name,
                fields: names,
                index,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// Process-unique identity of this type
    pub fn id(&self) -> u64 {
        self.schema.id
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.schema.fields.iter().map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.schema.index.contains_key(field)
    }

    /// Construct an instance, rejecting undeclared field names.
    ///
    /// Declared fields missing from `fields` are `Value::Nil`.
    pub fn create<K, V, I>(&self, fields: I) -> Result<Record, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut values = vec![Value::Nil; self.schema.fields.len()];
        self.assign(&mut values, fields, false)?;
        Ok(self.instance(values))
    }

    /// Construct an instance, silently dropping undeclared field names.
    pub fn create_lenient<K, V, I>(&self, fields: I) -> Record
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut values = vec![Value::Nil; self.schema.fields.len()];
        // Unknown keys are skipped in lenient mode, so this cannot fail.
        let _ = self.assign(&mut values, fields, true);
        self.instance(values)
    }

    fn assign<K, V, I>(
        &self,
        values: &mut [Value],
        fields: I,
        allow_unknown: bool,
    ) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in fields {
            let key = key.as_ref();
            match self.schema.index.get(key) {
                Some(&slot) => values[slot] = value.into(),
                None if allow_unknown => {
                    log::trace!("record type {}: dropping unknown field `{}`", self.name(), key);
                }
                None => return Err(ModelError::unknown_field(self.name(), key)),
            }
        }
        Ok(())
    }

    fn instance(&self, values: Vec<Value>) -> Record {
        Record {
            record_type: self.clone(),
            values: Arc::from(values),
        }
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.schema.id == other.schema.id
    }
}

impl Eq for RecordType {}

impl Hash for RecordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.schema.id.hash(state);
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecordType({}#{} {:?})",
            self.schema.name, self.schema.id, self.schema.fields
        )
    }
}

/// An immutable instance of a [`RecordType`].
///
/// Cloning is cheap and shares the field storage; a clone is the *same*
/// record as far as [`crate::SameRef`] is concerned.
#[derive(Clone)]
pub struct Record {
    record_type: RecordType,
    values: Arc<[Value]>,
}

impl Record {
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn type_name(&self) -> &str {
        self.record_type.name()
    }

    /// Whether this record was built from exactly `record_type`
    pub fn is_a(&self, record_type: &RecordType) -> bool {
        self.record_type == *record_type
    }

    /// Read a declared field
    pub fn get(&self, field: &str) -> Result<&Value, ModelError> {
        self.record_type
            .schema
            .index
            .get(field)
            .map(|&slot| &self.values[slot])
            .ok_or_else(|| ModelError::unknown_field(self.type_name(), field))
    }

    /// Read a field, yielding `nil` for undeclared names
    pub fn field(&self, field: &str) -> &Value {
        self.get(field).unwrap_or(&NIL)
    }

    /// `(name, value)` pairs in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.record_type.field_names().zip(self.values.iter())
    }

    /// Derive a new record with the given fields overridden.
    ///
    /// The receiver is left untouched and the result never shares storage
    /// with it.
    pub fn update<K, V, I>(&self, fields: I) -> Result<Record, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut values = self.values.to_vec();
        self.record_type.assign(&mut values, fields, false)?;
        Ok(self.record_type.instance(values))
    }

    pub(crate) fn shares_storage_with(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type
            && (self.shares_storage_with(other) || self.values == other.values)
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record_type.hash(state);
        self.values.hash(state);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for (name, value) in self.fields() {
            s.field(name, value);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SameRef;
    use pretty_assertions::assert_eq;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn point() -> RecordType {
        RecordType::define("Point", ["x", "y"])
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_fields_mean_equal_records_and_hashes() {
        let ty = point();
        let a = ty.create([("x", 1), ("y", 2)]).unwrap();
        let b = ty.create([("y", 2), ("x", 1)]).unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(!a.same_ref(&b));

        let c = ty.create([("x", 1), ("y", 3)]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_missing_fields_default_to_nil() {
        let rec = point().create([("x", 1)]).unwrap();
        assert_eq!(rec.get("x").unwrap(), &Value::Int(1));
        assert!(rec.get("y").unwrap().is_nil());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let ty = point();
        let err = ty.create([("x", 1), ("z", 9)]).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownField {
                record_type: "Point".to_string(),
                field: "z".to_string(),
            }
        );

        let rec = ty.create([("x", 1)]).unwrap();
        assert!(rec.get("z").is_err());
        assert!(rec.field("z").is_nil());
        assert!(rec.update([("z", 1)]).is_err());
    }

    #[test]
    fn test_lenient_constructor_drops_unknown_fields() {
        let rec = point().create_lenient([("x", 1), ("z", 9)]);
        assert_eq!(rec.field("x"), &Value::Int(1));
        assert_eq!(rec.fields().count(), 2);
    }

    #[test]
    fn test_update_merges_and_leaves_receiver_alone() {
        let ty = RecordType::define("Pair", ["a", "b"]);
        let original = ty.create([("a", 1), ("b", 2)]).unwrap();
        let updated = original.update([("b", 5)]).unwrap();

        assert_eq!(updated, ty.create([("a", 1), ("b", 5)]).unwrap());
        assert_eq!(original.field("b"), &Value::Int(2));
        assert!(!original.same_ref(&updated));
    }

    #[test]
    fn test_update_with_same_values_is_equal_but_not_same() {
        let rec = point().create([("x", 1), ("y", 2)]).unwrap();
        let copy = rec.update([("x", 1)]).unwrap();
        assert_eq!(rec, copy);
        assert!(!rec.same_ref(&copy));
        assert!(rec.same_ref(&rec.clone()));
    }

    #[test]
    fn test_distinct_definitions_are_distinct_types() {
        let a = RecordType::define("Point", ["x", "y"]);
        let b = RecordType::define("Point", ["x", "y"]);
        assert_ne!(a, b);

        let ra = a.create([("x", 1)]).unwrap();
        let rb = b.create([("x", 1)]).unwrap();
        assert_ne!(ra, rb);
        assert!(ra.is_a(&a));
        assert!(!ra.is_a(&b));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn test_has_field() {
        let ty = point();
        assert!(ty.has_field("x"));
        assert!(ty.has_field("y"));
        assert!(!ty.has_field("z"));
    }

    #[test]
    fn test_nested_records_compare_structurally() {
        let ty = point();
        let line = RecordType::define("Line", ["from", "to"]);
        let make = || {
            line.create([
                ("from", Value::from(ty.create([("x", 0), ("y", 0)]).unwrap())),
                ("to", Value::from(ty.create([("x", 3), ("y", 4)]).unwrap())),
            ])
            .unwrap()
        };

        let set: HashSet<Record> = [make(), make()].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_field_names_collapse() {
        let ty = RecordType::define("Dup", ["a", "b", "a"]);
        assert_eq!(ty.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_debug_lists_fields_in_order() {
        let rec = point().create([("y", 2), ("x", 1)]).unwrap();
        assert_eq!(format!("{:?}", rec), "Point { x: 1, y: 2 }");
    }
}
