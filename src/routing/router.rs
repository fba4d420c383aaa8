//! Route registration, resolution and dispatch.
//!
//! # Responsibilities
//! - Register static and templated routes, returning registration errors
//! - Register groups of sub-routes under a shared prefix
//! - Resolve an incoming path: exact static route first, then templates
//! - Cache first-hit template resolutions as static routes
//! - Dispatch the request through the method gate and parameter binder
//!
//! # Design Decisions
//! - One `Router` per process, owned by the composition root and shared via `Arc`
//! - Registration takes `&self`; the table handles its own synchronisation
//! - Unknown paths are an explicit `RouteError::NotFound`, never a silent default
//! - Paths are percent-decoded before lookup, so handlers see decoded values
//! - A resolution is cached only under the exact path that produced it

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::borrow::Cow;
use std::sync::Arc;

use crate::config::RoutingConfig;
use crate::error::RouteError;
use crate::http::handler::Handler;
use crate::observability::metrics;
use crate::routing::gate::parse_methods;
use crate::routing::matcher::find_match;
use crate::routing::params::RouteParams;
use crate::routing::table::{ResolvedRoute, RouteTable, RouteTemplate, StaticRoute};
use crate::routing::template::{parse_path, ParsedPath};

/// A route declared relative to a group prefix.
pub struct SubRoute {
    pub path: String,
    pub handler: Handler,
    pub methods: Vec<String>,
}

impl SubRoute {
    pub fn new<S: AsRef<str>>(path: impl Into<String>, handler: Handler, methods: &[S]) -> Self {
        Self {
            path: path.into(),
            handler,
            methods: methods.iter().map(|m| m.as_ref().to_string()).collect(),
        }
    }
}

/// Shorthand for [`SubRoute::new`], for use inside [`Router::group`].
pub fn sub_route<S: AsRef<str>>(path: impl Into<String>, handler: Handler, methods: &[S]) -> SubRoute {
    SubRoute::new(path, handler, methods)
}

/// The route table plus the policies used to resolve against it.
#[derive(Default)]
pub struct Router {
    table: RouteTable,
    config: RoutingConfig,
}

impl Router {
    /// Create a router with default routing policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with the given routing policies.
    pub fn with_config(config: RoutingConfig) -> Self {
        Self {
            table: RouteTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Register `handler` at `path` for `methods`.
    ///
    /// Paths containing `{name}` markers become templates; all others are
    /// exact. On error nothing is registered.
    pub fn register<S: AsRef<str>>(
        &self,
        path: &str,
        handler: Handler,
        methods: &[S],
    ) -> Result<(), RouteError> {
        let result = self.try_register(path, handler, methods);
        if let Err(e) = &result {
            tracing::warn!(path = %path, error = %e, "Route registration rejected");
        }
        result
    }

    fn try_register<S: AsRef<str>>(
        &self,
        path: &str,
        handler: Handler,
        methods: &[S],
    ) -> Result<(), RouteError> {
        if path == self.config.health_path {
            return Err(RouteError::DuplicateRoute(path.to_string()));
        }

        let parsed = parse_path(path)?;
        let methods = parse_methods(path, methods)?;

        match parsed {
            ParsedPath::Static(path) => {
                tracing::debug!(path = %path, methods = ?methods, "Registering static route");
                self.table.insert_static(StaticRoute::new(
                    path,
                    handler,
                    methods,
                    RouteParams::new(),
                    self.config.method_mismatch,
                ))?;
                metrics::record_static_routes(self.table.static_count());
            }
            ParsedPath::Template(template) => {
                tracing::debug!(
                    template = %template.source(),
                    prefix = %template.prefix(),
                    variables = template.variables().len(),
                    methods = ?methods,
                    "Registering templated route"
                );
                self.table.push_template(RouteTemplate {
                    template,
                    methods,
                    handler,
                })?;
            }
        }
        Ok(())
    }

    /// Register each sub-route with `prefix` prepended to its path.
    ///
    /// Stops at the first failing sub-route; earlier ones stay registered.
    pub fn group<I>(&self, prefix: &str, routes: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = SubRoute>,
    {
        for route in routes {
            let path = format!("{}{}", prefix, route.path);
            self.register(&path, route.handler, route.methods.as_slice())?;
        }
        Ok(())
    }

    /// Match `path` against the templates without touching the table.
    pub fn match_path(&self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let templates = self.table.templates();
        find_match(&templates, path, self.config.prefix_match)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    /// Turn a resolution of `path` into a static route, caching it when enabled.
    ///
    /// The route is cached only when the substituted template equals `path`;
    /// a cached entry under any other key would capture requests that the
    /// template order sends elsewhere. Resolving the same path again returns
    /// the cached entry.
    pub fn resolve(&self, resolved: ResolvedRoute, path: &str) -> Arc<StaticRoute> {
        let ResolvedRoute {
            template,
            params,
            concrete_path,
        } = resolved;

        let route = StaticRoute::new(
            concrete_path,
            template.handler.clone(),
            template.methods.clone(),
            params,
            self.config.method_mismatch,
        );

        if !self.config.cache_resolved_routes || route.path() != path {
            return Arc::new(route);
        }

        let cached = self.table.cache_static(route);
        tracing::debug!(
            template = %template.template.source(),
            path = %cached.path(),
            "Resolved templated route"
        );
        metrics::record_static_routes(self.table.static_count());
        cached
    }

    /// Find the route serving `path`: exact match first, then templates.
    pub fn lookup(&self, path: &str) -> Result<Arc<StaticRoute>, RouteError> {
        if let Some(route) = self.table.find_static(path) {
            metrics::record_resolution("static");
            return Ok(route);
        }

        match self.match_path(path) {
            Ok(resolved) => {
                metrics::record_resolution("resolved");
                Ok(self.resolve(resolved, path))
            }
            Err(e) => {
                metrics::record_resolution("not_found");
                Err(e)
            }
        }
    }

    /// Route and handle one request.
    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        let path = decode_path(req.uri().path()).into_owned();
        match self.lookup(&path) {
            Ok(route) => {
                let endpoint = route.endpoint().clone();
                endpoint(req).await
            }
            Err(e) => {
                tracing::warn!(method = %req.method(), path = %path, "No route matched");
                e.into_response()
            }
        }
    }

    /// Static paths, including those cached from resolutions, sorted.
    pub fn routes(&self) -> Vec<String> {
        self.table.static_paths()
    }

    /// Template sources in registration order.
    pub fn templates(&self) -> Vec<String> {
        self.table
            .templates()
            .iter()
            .map(|t| t.template.source().to_string())
            .collect()
    }
}

/// Percent-decode a request path, keeping it raw when the bytes are not UTF-8.
fn decode_path(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(path = %raw, error = %e, "Path is not valid UTF-8 once decoded");
            Cow::Borrowed(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MethodMismatch;
    use crate::http::handler::handler;
    use crate::http::response::{METHOD_REJECTED_BODY, NOT_FOUND_BODY};
    use crate::routing::params::RouteVariablesExt;
    use axum::http::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(method: Method, path: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn echo(var: &'static str) -> Handler {
        handler(move |req: Request<Body>| async move {
            req.route_var(var).unwrap_or("<absent>").to_string()
        })
    }

    fn text(body: &'static str) -> Handler {
        handler(move |_req| async move { body })
    }

    #[tokio::test]
    async fn test_static_route_dispatch() {
        let router = Router::new();
        router.register("/status", text("up"), &["GET"]).unwrap();

        let resp = router.dispatch(request(Method::GET, "/status")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "up");

        let resp = router.dispatch(request(Method::POST, "/status")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, METHOD_REJECTED_BODY);
    }

    #[tokio::test]
    async fn test_templated_route_binds_variable() {
        let router = Router::new();
        router.register("/users/{id}", echo("id"), &["GET"]).unwrap();

        let resp = router.dispatch(request(Method::GET, "/users/42")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "42");
    }

    #[tokio::test]
    async fn test_segment_mismatch_is_not_found() {
        let router = Router::new();
        router.register("/users/{id}", echo("id"), &["GET"]).unwrap();

        let resp = router.dispatch(request(Method::GET, "/users/42/extra")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn test_unregistered_path_is_not_found() {
        let router = Router::new();
        let resp = router.dispatch(request(Method::GET, "/nothing/here")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, r#"{"msg": "route not found"}"#);
    }

    #[test]
    fn test_invalid_method_drops_route() {
        let router = Router::new();
        let err = router.register("/items", text("x"), &["GET", "PATCH"]).unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidMethod {
                method: "PATCH".into(),
                path: "/items".into()
            }
        );
        assert!(router.routes().is_empty());

        assert!(router.register("/items/{id}", text("x"), &["TRACE"]).is_err());
        assert!(router.templates().is_empty());
    }

    #[test]
    fn test_malformed_template_rejected() {
        let router = Router::new();
        let err = router.register("/items/{id", text("x"), &["GET"]).unwrap_err();
        assert!(matches!(err, RouteError::MalformedTemplate { .. }));
        assert!(router.routes().is_empty() && router.templates().is_empty());
    }

    #[test]
    fn test_health_path_reserved() {
        let router = Router::new();
        assert_eq!(
            router.register("/health", text("x"), &["GET"]),
            Err(RouteError::DuplicateRoute("/health".into()))
        );
    }

    #[tokio::test]
    async fn test_group_equals_direct_registration() {
        let grouped = Router::new();
        grouped
            .group(
                "/api",
                [
                    sub_route("/users", text("users"), &["GET"]),
                    sub_route("/users/{id}", echo("id"), &["GET", "DELETE"]),
                ],
            )
            .unwrap();

        let direct = Router::new();
        direct.register("/api/users", text("users"), &["GET"]).unwrap();
        direct.register("/api/users/{id}", echo("id"), &["GET", "DELETE"]).unwrap();

        assert_eq!(grouped.routes(), direct.routes());
        assert_eq!(grouped.templates(), direct.templates());

        let resp = grouped.dispatch(request(Method::GET, "/api/users")).await;
        assert_eq!(body_string(resp).await, "users");
        let resp = grouped.dispatch(request(Method::DELETE, "/api/users/3")).await;
        assert_eq!(body_string(resp).await, "3");
    }

    #[test]
    fn test_group_stops_at_first_error() {
        let router = Router::new();
        let result = router.group(
            "/v1",
            [
                sub_route("/a", text("a"), &["GET"]),
                sub_route("/b", text("b"), &["OPTIONS"]),
                sub_route("/c", text("c"), &["GET"]),
            ],
        );
        assert!(matches!(result, Err(RouteError::InvalidMethod { .. })));
        assert_eq!(router.routes(), vec!["/v1/a".to_string()]);
    }

    #[tokio::test]
    async fn test_resolution_is_cached_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let router = Router::new();
        router
            .register(
                "/users/{id}",
                handler(move |_req| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { StatusCode::OK }
                }),
                &["GET"],
            )
            .unwrap();

        for _ in 0..3 {
            let resp = router.dispatch(request(Method::GET, "/users/42")).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(router.routes(), vec!["/users/42".to_string()]);

        let cached = router.lookup("/users/42").unwrap();
        assert_eq!(cached.params().get("id"), Some("42"));
    }

    #[test]
    fn test_resolving_twice_keeps_table_duplicate_free() {
        let router = Router::new();
        router.register("/users/{id}", echo("id"), &["GET"]).unwrap();

        let first = router.resolve(router.match_path("/users/9").unwrap(), "/users/9");
        let second = router.resolve(router.match_path("/users/9").unwrap(), "/users/9");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(router.routes(), vec!["/users/9".to_string()]);
    }

    #[test]
    fn test_cache_disabled() {
        let router = Router::with_config(RoutingConfig {
            cache_resolved_routes: false,
            ..RoutingConfig::default()
        });
        router.register("/users/{id}", echo("id"), &["GET"]).unwrap();

        let route = router.lookup("/users/5").unwrap();
        assert_eq!(route.path(), "/users/5");
        assert!(router.routes().is_empty());
    }

    #[tokio::test]
    async fn test_method_not_allowed_policy() {
        let router = Router::with_config(RoutingConfig {
            method_mismatch: MethodMismatch::MethodNotAllowed,
            ..RoutingConfig::default()
        });
        router.register("/users/{id}", echo("id"), &["GET", "PUT"]).unwrap();

        let resp = router.dispatch(request(Method::POST, "/users/1")).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, PUT");
    }

    #[tokio::test]
    async fn test_static_route_takes_precedence() {
        let router = Router::new();
        router.register("/users/{id}", echo("id"), &["GET"]).unwrap();
        router.register("/users/me", text("me"), &["GET"]).unwrap();

        let resp = router.dispatch(request(Method::GET, "/users/me")).await;
        assert_eq!(body_string(resp).await, "me");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_hits() {
        let router = Arc::new(Router::new());
        router.register("/orders/{id}", echo("id"), &["GET"]).unwrap();

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let router = router.clone();
                tokio::spawn(async move {
                    let resp = router.dispatch(request(Method::GET, "/orders/77")).await;
                    body_string(resp).await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), "77");
        }
        assert_eq!(router.routes(), vec!["/orders/77".to_string()]);
    }

    #[tokio::test]
    async fn test_routing_does_not_depend_on_earlier_requests() {
        fn overlapping() -> Router {
            let router = Router::new();
            router.register("/users/{id}/posts/{postId}", echo("postId"), &["GET"]).unwrap();
            router.register("/users/{id}/{a}/{b}", echo("a"), &["GET"]).unwrap();
            router
        }

        let cold = overlapping();
        let resp = cold.dispatch(request(Method::GET, "/users/1/posts/2")).await;
        assert_eq!(body_string(resp).await, "posts");

        let warm = overlapping();
        // Served by the first template, whose substitution is /users/1/posts/2.
        let resp = warm.dispatch(request(Method::GET, "/users/1/2")).await;
        assert_eq!(body_string(resp).await, "2");
        assert!(warm.routes().is_empty());

        let resp = warm.dispatch(request(Method::GET, "/users/1/posts/2")).await;
        assert_eq!(body_string(resp).await, "posts");
        assert_eq!(warm.routes(), cold.routes());
    }

    #[test]
    fn test_contained_prefix_match_is_not_cached() {
        let router = Router::new();
        router.register("/user/{id}", echo("id"), &["GET"]).unwrap();

        let route = router.lookup("/api/user/42").unwrap();
        assert_eq!(route.path(), "/user/42");
        assert!(router.routes().is_empty());
    }

    #[tokio::test]
    async fn test_percent_encoded_path_is_decoded() {
        let router = Router::new();
        router.register("/users/{id}", echo("id"), &["GET"]).unwrap();
        router.register("/status", text("up"), &["GET"]).unwrap();

        let resp = router.dispatch(request(Method::GET, "/users/john%20doe")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "john doe");
        assert_eq!(router.routes(), vec!["/status".to_string(), "/users/john doe".to_string()]);

        let resp = router.dispatch(request(Method::GET, "/st%61tus")).await;
        assert_eq!(body_string(resp).await, "up");
    }

    #[test]
    fn test_decode_path_keeps_invalid_utf8_raw() {
        assert_eq!(decode_path("/a%20b"), "/a b");
        assert_eq!(decode_path("/plain"), "/plain");
        assert_eq!(decode_path("/bad%FF"), "/bad%FF");
    }
}
