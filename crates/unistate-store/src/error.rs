use thiserror::Error;

/// Boxed error returned by fallible reducers and observers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`crate::Store::dispatch`]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The reducer failed; the store still holds its pre-dispatch state
    #[error("reducer failed")]
    Reducer(#[source] BoxError),

    /// An observer failed after the new state was committed.
    /// Observers registered after `index` were not notified.
    #[error("observer #{index} failed")]
    Observer {
        index: usize,
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    pub fn is_reducer_failure(&self) -> bool {
        matches!(self, DispatchError::Reducer(_))
    }

    pub fn is_observer_failure(&self) -> bool {
        matches!(self, DispatchError::Observer { .. })
    }
}
