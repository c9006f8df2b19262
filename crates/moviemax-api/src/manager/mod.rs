//! Stateful request managers.
//!
//! [`ListManager`] pages through the catalog list with a per-session cursor,
//! and [`DetailManager`] loads single movie records. Both can deliver their
//! outcome to a [`ResultHandler`] instead of returning it.

mod cursor;
mod detail;
mod handler;
mod list;
#[cfg(test)]
mod mock;

pub use cursor::PageCursor;
#[allow(clippy::module_name_repetitions)]
pub use detail::DetailManager;
pub use handler::ResultHandler;
#[allow(clippy::module_name_repetitions)]
pub use list::ListManager;
