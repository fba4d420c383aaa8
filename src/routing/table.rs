//! Route table storage.
//!
//! # Responsibilities
//! - Hold static routes keyed by exact path
//! - Hold templated routes in registration order
//! - Cache resolved templated paths as static routes
//!
//! # Design Decisions
//! - Static routes live in a `DashMap`; caching a resolution is an
//!   insert-if-absent, so concurrent first hits on one path yield one entry
//! - Templates live behind an `ArcSwap`; matching reads a snapshot without
//!   locking, registration swaps in a new vector
//! - Entries are immutable once stored

use arc_swap::ArcSwap;
use axum::http::Method;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::config::MethodMismatch;
use crate::error::RouteError;
use crate::http::handler::Handler;
use crate::routing::gate::gate_method;
use crate::routing::params::{bind_params, RouteParams};
use crate::routing::template::PathTemplate;

/// A registered templated route.
pub struct RouteTemplate {
    pub template: PathTemplate,
    pub methods: Vec<Method>,
    pub handler: Handler,
}

impl std::fmt::Debug for RouteTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTemplate")
            .field("template", &self.template)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// A template bound to the values of one incoming path.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub template: Arc<RouteTemplate>,
    pub params: RouteParams,
    /// The template source with every `{name}` substituted.
    pub concrete_path: String,
}

/// An exact-path route, registered directly or produced by resolution.
pub struct StaticRoute {
    path: String,
    methods: Vec<Method>,
    params: RouteParams,
    endpoint: Handler,
}

impl StaticRoute {
    /// Build a route whose endpoint is `handler` behind the method gate,
    /// with `params` bound when non-empty.
    pub fn new(
        path: impl Into<String>,
        handler: Handler,
        methods: Vec<Method>,
        params: RouteParams,
        policy: MethodMismatch,
    ) -> Self {
        let gated = gate_method(handler, methods.clone(), policy);
        let endpoint = if params.is_empty() {
            gated
        } else {
            bind_params(gated, params.clone())
        };
        Self {
            path: path.into(),
            methods,
            params,
            endpoint,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Variables bound when this route came from a template.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Handler with gate and parameter binding applied.
    pub fn endpoint(&self) -> &Handler {
        &self.endpoint
    }
}

impl std::fmt::Debug for StaticRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRoute")
            .field("path", &self.path)
            .field("methods", &self.methods)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Static and templated routes.
#[derive(Default)]
pub struct RouteTable {
    statics: DashMap<String, Arc<StaticRoute>>,
    templates: ArcSwap<Vec<Arc<RouteTemplate>>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicitly registered static route.
    pub fn insert_static(&self, route: StaticRoute) -> Result<(), RouteError> {
        match self.statics.entry(route.path.clone()) {
            Entry::Occupied(_) => Err(RouteError::DuplicateRoute(route.path)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(route));
                Ok(())
            }
        }
    }

    /// Store a resolved route unless its path is already present.
    ///
    /// Returns whichever entry ends up in the table.
    pub fn cache_static(&self, route: StaticRoute) -> Arc<StaticRoute> {
        self.statics
            .entry(route.path.clone())
            .or_insert_with(|| Arc::new(route))
            .value()
            .clone()
    }

    /// Exact-path lookup.
    pub fn find_static(&self, path: &str) -> Option<Arc<StaticRoute>> {
        self.statics.get(path).map(|r| r.value().clone())
    }

    /// Append a template unless the same source string is already registered.
    pub fn push_template(&self, template: RouteTemplate) -> Result<(), RouteError> {
        let template = Arc::new(template);
        let mut duplicate = false;
        self.templates.rcu(|current| {
            duplicate = current
                .iter()
                .any(|t| t.template.source() == template.template.source());
            let mut next = Vec::clone(current);
            if !duplicate {
                next.push(template.clone());
            }
            next
        });

        if duplicate {
            return Err(RouteError::DuplicateRoute(template.template.source().to_string()));
        }
        Ok(())
    }

    /// Snapshot of templates in registration order.
    pub fn templates(&self) -> Arc<Vec<Arc<RouteTemplate>>> {
        self.templates.load_full()
    }

    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    /// Registered static paths, sorted.
    pub fn static_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.statics.iter().map(|r| r.key().clone()).collect();
        paths.sort();
        paths
    }
}
