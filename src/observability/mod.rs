//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! workflow / retries / activation produce:
//!     → logging.rs (structured log events, per-wallet spans)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
