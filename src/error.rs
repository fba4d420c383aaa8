//! Routing error taxonomy.
//!
//! Registration errors are returned to the caller of `register`/`group`.
//! Dispatch errors (`NotFound`, `MethodRejected`) are terminal for the
//! request and rendered by `http::response`.

use thiserror::Error;

/// Errors produced while registering or resolving routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A declared method is outside {GET, POST, PUT, DELETE}.
    #[error("Method {method} on {path} not allowed")]
    InvalidMethod { method: String, path: String },

    /// No static route and no template matched the incoming path.
    #[error("No route matches {0}")]
    NotFound(String),

    /// The route exists but does not accept the request method.
    #[error("Method {method} is not declared for {path}")]
    MethodRejected { method: String, path: String },

    /// The route template could not be parsed.
    #[error("Malformed route template {path}: {reason}")]
    MalformedTemplate { path: String, reason: &'static str },

    /// A variable name appears more than once in one template.
    #[error("Variable {name} declared twice in {path}")]
    DuplicateVariable { name: String, path: String },

    /// The exact path (or template string) is already registered.
    #[error("Route {0} is already registered")]
    DuplicateRoute(String),
}

impl RouteError {
    /// True for errors raised while handling a request rather than at registration.
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, RouteError::NotFound(_) | RouteError::MethodRejected { .. })
    }
}
