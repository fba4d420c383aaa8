//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and server code produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (resolution counters, route table gauge)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
