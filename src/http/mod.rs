//! HTTP glue around the routing core.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, timeout, trace span)
//!     → health endpoint, or fallback into routing::Router::dispatch
//!     → static route or template resolution
//!     → middleware.rs / gate / params (handler wrapping)
//!     → response.rs (fixed JSON errors)
//! ```

pub mod handler;
pub mod middleware;
pub mod response;
pub mod server;

pub use handler::{handler, Handler};
pub use middleware::{compose, log_requests, middleware, Middleware};
pub use server::HttpServer;
