//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     register(path, handler, methods)
//!     → template.rs (static path, or prefix + ordered variables)
//!     → gate.rs (method names validated)
//!     → table.rs (static map, or template list)
//!
//! Incoming request path:
//!     → table.rs (exact static lookup)
//!     → matcher.rs (first template with matching prefix and segment count)
//!     → router.rs (substitute, cache as static route)
//!     → params.rs + gate.rs (bind variables, check method)
//!     → handler, or NotFound
//! ```
//!
//! # Design Decisions
//! - Deterministic: first registered template wins
//! - Resolution never mutates a template; it yields a fresh `ResolvedRoute`
//! - Explicit NotFound rather than a silent default

pub mod gate;
pub mod matcher;
pub mod params;
pub mod router;
pub mod table;
pub mod template;

pub use params::{bind_params, route_variable, RouteParams, RouteVariablesExt};
pub use router::{sub_route, Router, SubRoute};
pub use table::{ResolvedRoute, RouteTemplate, StaticRoute};
pub use template::{PathTemplate, TemplateVariable};
