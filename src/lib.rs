//! Request routing with static and templated (`{name}`) paths on axum.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use error::RouteError;
pub use http::{compose, handler, log_requests, middleware, Handler, HttpServer, Middleware};
pub use lifecycle::Shutdown;
pub use routing::{route_variable, sub_route, RouteParams, RouteVariablesExt, Router, SubRoute};
