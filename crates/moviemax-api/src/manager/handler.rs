//! Two-slot success/failure result handler.

use std::fmt;

use crate::catalog::CatalogError;

/// Success callback slot.
type SuccessFn<T> = Box<dyn Fn(T) + Send + Sync>;

/// Failure callback slot.
type FailureFn = Box<dyn Fn(CatalogError) + Send + Sync>;

/// Receives the outcome of one manager call.
///
/// [`ResultHandler::dispatch`] consumes the result, so each call reaches
/// exactly one slot exactly once.
#[allow(clippy::module_name_repetitions)]
pub struct ResultHandler<T> {
    on_success: SuccessFn<T>,
    on_failure: FailureFn,
}

impl<T> ResultHandler<T> {
    /// Creates a handler from a success and a failure callback.
    pub fn new<S, F>(on_success: S, on_failure: F) -> Self
    where
        S: Fn(T) + Send + Sync + 'static,
        F: Fn(CatalogError) + Send + Sync + 'static,
    {
        Self {
            on_success: Box::new(on_success),
            on_failure: Box::new(on_failure),
        }
    }

    /// Routes `result` to the matching callback.
    pub fn dispatch(&self, result: Result<T, CatalogError>) {
        match result {
            Ok(value) => (self.on_success)(value),
            Err(err) => (self.on_failure)(err),
        }
    }
}

impl<T> fmt::Debug for ResultHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandler").finish_non_exhaustive()
    }
}
