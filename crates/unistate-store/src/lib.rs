//! Unidirectional state store
//!
//! A [`Store`] holds one state value and a reducer fixed at construction.
//! State changes only through [`Store::dispatch`]:
//!
//! ```text
//! dispatch(action) ──→ reducer(state, action) ──→ commit ──→ observers(old, new)
//! ```
//!
//! Reducers return a *new* value when something changed and the *same* value
//! (a cheap clone of an `Arc`, a record, ...) when nothing did, so observers
//! can decide whether to react with an O(1) identity check instead of a deep
//! comparison.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use unistate_store::Store;
//!
//! enum Msg {
//!     Inc,
//!     Noop,
//! }
//!
//! let mut store = Store::new(Arc::new(0_i64), |state: &Arc<i64>, msg: &Msg| match msg {
//!     Msg::Inc => Arc::new(**state + 1),
//!     Msg::Noop => Arc::clone(state),
//! });
//!
//! store.on_dispatch(|old, new| {
//!     if !Arc::ptr_eq(old, new) {
//!         println!("changed: {} -> {}", old, new);
//!     }
//! });
//!
//! store.dispatch(Msg::Inc)?;
//! store.dispatch(Msg::Noop)?;
//! assert_eq!(**store.state(), 1);
//! # Ok::<(), unistate_store::DispatchError>(())
//! ```

mod error;
mod store;

pub use error::{BoxError, DispatchError};
pub use store::Store;
