//! Request-scoped route variables.
//!
//! Resolved `{name}` values travel with the request in its extensions, the
//! same place other per-request context is attached. Handlers read them back
//! with [`route_variable`], the [`RouteVariablesExt`] methods, or by taking
//! [`RouteParams`] as an axum extractor.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
};
use std::convert::Infallible;
use std::sync::Arc;

use crate::http::handler::Handler;

/// Ordered variable name → value pairs for one request.
///
/// Values are always strings; no coercion is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    entries: Vec<(Arc<str>, String)>,
}

impl RouteParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding. A later binding for the same name shadows earlier ones.
    pub fn push(&mut self, name: impl Into<Arc<str>>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    fn extend_from(&mut self, other: &RouteParams) {
        self.entries.extend(other.entries.iter().cloned());
    }
}

/// Wrap `next` so each request carries `params` in its extensions.
pub fn bind_params(next: Handler, params: RouteParams) -> Handler {
    Arc::new(move |mut req: Request<Body>| {
        match req.extensions_mut().get_mut::<RouteParams>() {
            Some(existing) => existing.extend_from(&params),
            None => {
                req.extensions_mut().insert(params.clone());
            }
        }
        next(req)
    })
}

/// Look up a bound route variable on a request.
pub fn route_variable<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.extensions()
        .get::<RouteParams>()
        .and_then(|params| params.get(name))
}

/// Extension trait for reading route variables off a request.
pub trait RouteVariablesExt {
    /// All variables bound for this request.
    fn route_params(&self) -> Option<&RouteParams>;

    /// A single variable by name.
    fn route_var(&self, name: &str) -> Option<&str> {
        self.route_params().and_then(|p| p.get(name))
    }
}

impl<B> RouteVariablesExt for Request<B> {
    fn route_params(&self) -> Option<&RouteParams> {
        self.extensions().get::<RouteParams>()
    }
}

impl RouteVariablesExt for Parts {
    fn route_params(&self) -> Option<&RouteParams> {
        self.extensions.get::<RouteParams>()
    }
}

/// Extracts the bound variables; empty when the route had none.
impl<S> FromRequestParts<S> for RouteParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.route_params().cloned().unwrap_or_default())
    }
}
