//! Handler middleware.
//!
//! A middleware is a function from handler to handler. [`compose`] stacks
//! a list of them around a terminal handler; [`log_requests`] is the one
//! shipped with the crate.

pub mod compose;
pub mod logging;

pub use compose::{compose, middleware, Middleware};
pub use logging::log_requests;
