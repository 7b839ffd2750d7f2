//! Reference identity
//!
//! `==` on records is structural and costs a walk over every field. Code that
//! only needs to know "is this literally the value I had before" (an observer
//! deciding whether to re-render, a memoized selector) should use
//! [`SameRef::same_ref`] instead, which is O(1).

use crate::record::Record;
use crate::value::Value;
use std::rc::Rc;
use std::sync::Arc;

/// O(1) "same object" test, independent of structural equality.
///
/// `a.same_ref(&b)` implies `a == b`; the converse does not hold.
pub trait SameRef {
    fn same_ref(&self, other: &Self) -> bool;
}

impl<T: ?Sized> SameRef for Arc<T> {
    fn same_ref(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> SameRef for Rc<T> {
    fn same_ref(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl SameRef for Record {
    fn same_ref(&self, other: &Self) -> bool {
        self.shares_storage_with(other)
    }
}

impl SameRef for Value {
    /// Immediates (`nil`, booleans, integers) have no identity beyond their
    /// value; everything else compares by pointer.
    fn same_ref(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => a.same_ref(b),
            _ => false,
        }
    }
}
