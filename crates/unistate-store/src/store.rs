use crate::error::{BoxError, DispatchError};
use std::fmt;

type ReduceFn<S, A> = Box<dyn Fn(&S, &A) -> Result<S, BoxError> + Send>;
type ObserverFn<S> = Box<dyn FnMut(&S, &S) -> Result<(), BoxError> + Send>;

/// Store - holds the current state and runs the dispatch loop
///
/// Every `dispatch` computes `reducer(state, action)`, commits the result and
/// then notifies observers, in registration order, with `(old, new)`. All of
/// it happens synchronously on the caller's thread before `dispatch`
/// returns.
///
/// The store never inspects state or actions. It also never locks: a host
/// that shares a store between threads wraps it in a mutex itself.
pub struct Store<S, A> {
    state: S,
    reducer: ReduceFn<S, A>,
    observers: Vec<ObserverFn<S>>,
}

impl<S: 'static, A: 'static> Store<S, A> {
    /// Create a store from an initial state and an infallible reducer.
    ///
    /// The reducer must return a new value for a changed state and the same
    /// (e.g. cloned `Arc`) value for an unchanged one; observers rely on that
    /// to detect changes by reference identity.
    pub fn new<R>(initial_state: S, reducer: R) -> Self
    where
        R: Fn(&S, &A) -> S + Send + 'static,
    {
        Self {
            state: initial_state,
            reducer: Box::new(move |state: &S, action: &A| Ok(reducer(state, action))),
            observers: Vec::new(),
        }
    }

    /// Create a store whose reducer may fail.
    ///
    /// A failing reducer leaves the stored state untouched.
    pub fn with_fallible_reducer<R, E>(initial_state: S, reducer: R) -> Self
    where
        R: Fn(&S, &A) -> Result<S, E> + Send + 'static,
        E: Into<BoxError>,
    {
        Self {
            state: initial_state,
            reducer: Box::new(move |state: &S, action: &A| {
                reducer(state, action).map_err(Into::<BoxError>::into)
            }),
            observers: Vec::new(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Register an observer called with `(old, new)` after every dispatch.
    ///
    /// Observers accumulate; registering one never replaces another, and a
    /// new observer only sees dispatches made after it was added.
    pub fn on_dispatch<F>(&mut self, mut observer: F)
    where
        F: FnMut(&S, &S) + Send + 'static,
    {
        self.observers.push(Box::new(move |old: &S, new: &S| {
            observer(old, new);
            Ok(())
        }));
    }

    /// Register an observer that may fail.
    ///
    /// A failure is returned from `dispatch` as [`DispatchError::Observer`]
    /// and stops notification of the observers registered after it.
    pub fn try_on_dispatch<F, E>(&mut self, mut observer: F)
    where
        F: FnMut(&S, &S) -> Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.observers.push(Box::new(move |old: &S, new: &S| {
            observer(old, new).map_err(Into::<BoxError>::into)
        }));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Apply `action` to the current state and notify observers
    pub fn dispatch(&mut self, action: A) -> Result<(), DispatchError> {
        let next = (self.reducer)(&self.state, &action).map_err(|e| {
            log::debug!("dispatch: reducer failed, state unchanged: {}", e);
            DispatchError::Reducer(e)
        })?;

        let previous = std::mem::replace(&mut self.state, next);
        log::trace!(
            "dispatch: state committed, notifying {} observer(s)",
            self.observers.len()
        );

        for (index, observer) in self.observers.iter_mut().enumerate() {
            observer(&previous, &self.state).map_err(|source| {
                log::debug!("dispatch: observer #{} failed: {}", index, source);
                DispatchError::Observer { index, source }
            })?;
        }

        Ok(())
    }

    /// Consume the store, returning its current state
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        a: i64,
    }

    #[derive(Debug)]
    enum Msg {
        Inc,
        Noop,
        Explode,
    }

    fn reduce(state: &Arc<Counter>, msg: &Msg) -> Arc<Counter> {
        match msg {
            Msg::Inc => Arc::new(Counter { a: state.a + 1 }),
            _ => Arc::clone(state),
        }
    }

    fn fallible(state: &Arc<Counter>, msg: &Msg) -> Result<Arc<Counter>, BoxError> {
        match msg {
            Msg::Explode => Err("reducer exploded".into()),
            other => Ok(reduce(state, other)),
        }
    }

    type Seen = Arc<Mutex<Vec<(String, Arc<Counter>, Arc<Counter>)>>>;

    fn recorder(store: &mut Store<Arc<Counter>, Msg>, label: &str, seen: &Seen) {
        let seen = Arc::clone(seen);
        let label = label.to_string();
        store.on_dispatch(move |old, new| {
            seen.lock()
                .unwrap()
                .push((label.clone(), Arc::clone(old), Arc::clone(new)));
        });
    }

    #[test]
    fn test_dispatch_updates_state() {
        let mut store = Store::new(Arc::new(Counter { a: 1 }), reduce);
        let before = Arc::clone(store.state());

        store.dispatch(Msg::Inc).unwrap();

        assert_eq!(store.state().a, 2);
        assert!(!Arc::ptr_eq(&before, store.state()));
        assert_eq!(before.a, 1);
    }

    #[test]
    fn test_unmatched_action_keeps_same_reference() {
        let mut store = Store::new(Arc::new(Counter { a: 1 }), reduce);
        let seen: Seen = Arc::default();
        recorder(&mut store, "o", &seen);
        let before = Arc::clone(store.state());

        store.dispatch(Msg::Noop).unwrap();

        assert!(Arc::ptr_eq(&before, store.state()));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(Arc::ptr_eq(&seen[0].1, &seen[0].2));
    }

    #[test]
    fn test_observers_run_in_order_with_old_and_new() {
        let mut store = Store::new(Arc::new(Counter { a: 0 }), reduce);
        let seen: Seen = Arc::default();
        recorder(&mut store, "first", &seen);
        recorder(&mut store, "second", &seen);

        store.dispatch(Msg::Inc).unwrap();
        recorder(&mut store, "late", &seen);

        {
            let seen = seen.lock().unwrap();
            let labels: Vec<&str> = seen.iter().map(|(l, _, _)| l.as_str()).collect();
            assert_eq!(labels, vec!["first", "second"]);
            for (_, old, new) in seen.iter() {
                assert_eq!(old.a, 0);
                assert_eq!(new.a, 1);
                assert!(Arc::ptr_eq(new, store.state()));
            }
        }

        store.dispatch(Msg::Inc).unwrap();
        let seen = seen.lock().unwrap();
        let labels: Vec<&str> = seen.iter().map(|(l, _, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "first", "second", "late"]);
        assert_eq!(store.observer_count(), 3);
    }

    #[test]
    fn test_reducer_failure_leaves_state_untouched() {
        let mut store = Store::with_fallible_reducer(Arc::new(Counter { a: 5 }), fallible);
        let seen: Seen = Arc::default();
        recorder(&mut store, "o", &seen);
        let before = Arc::clone(store.state());

        let err = store.dispatch(Msg::Explode).unwrap_err();

        assert!(err.is_reducer_failure());
        assert!(!err.is_observer_failure());
        assert_eq!(err.to_string(), "reducer failed");
        assert_eq!(
            std::error::Error::source(&err).map(|s| s.to_string()),
            Some("reducer exploded".to_string())
        );
        assert!(Arc::ptr_eq(&before, store.state()));
        assert!(seen.lock().unwrap().is_empty());

        store.dispatch(Msg::Inc).unwrap();
        assert_eq!(store.state().a, 6);
    }

    #[test]
    fn test_observer_failure_is_fail_fast_after_commit() {
        let mut store = Store::new(Arc::new(Counter { a: 0 }), reduce);
        let seen: Seen = Arc::default();
        recorder(&mut store, "before", &seen);
        store.try_on_dispatch(|_, new: &Arc<Counter>| {
            if new.a == 1 {
                Err("render failed")
            } else {
                Ok(())
            }
        });
        recorder(&mut store, "after", &seen);

        let err = store.dispatch(Msg::Inc).unwrap_err();

        assert!(err.is_observer_failure());
        assert!(!err.is_reducer_failure());
        assert_eq!(err.to_string(), "observer #1 failed");
        match err {
            DispatchError::Observer { index, ref source } => {
                assert_eq!(index, 1);
                assert_eq!(source.to_string(), "render failed");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.state().a, 1);
        let labels: Vec<String> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|(l, _, _)| l.clone())
            .collect();
        assert_eq!(labels, vec!["before".to_string()]);
    }

    #[test]
    fn test_into_state_returns_committed_state() {
        let mut store = Store::new(Arc::new(Counter { a: 0 }), reduce);
        store.dispatch(Msg::Inc).unwrap();
        store.dispatch(Msg::Inc).unwrap();
        let committed = Arc::clone(store.state());

        let state = store.into_state();

        assert_eq!(state.a, 2);
        assert!(Arc::ptr_eq(&state, &committed));
    }

    #[test]
    fn test_store_can_live_behind_a_mutex() {
        let store = Arc::new(Mutex::new(Store::new(Arc::new(Counter { a: 0 }), reduce)));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.lock().unwrap().dispatch(Msg::Inc).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.lock().unwrap().state().a, 100);
    }

    #[test]
    fn test_debug_shows_state_and_observer_count() {
        let mut store = Store::new(Arc::new(Counter { a: 3 }), reduce);
        store.on_dispatch(|_, _| {});
        let debug = format!("{:?}", store);
        assert!(debug.contains("a: 3"));
        assert!(debug.contains("observers: 1"));
    }
}
