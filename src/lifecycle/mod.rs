//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl+C / SIGTERM → Shutdown::trigger → server stops accepting → in-flight requests drain
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
