//! # sieve-observability
//!
//! Running performance statistics, a bounded query log, degradation event
//! tracking with recovery status, and structured tracing (span macros and
//! event helpers).

pub mod degradation;
pub mod engine;
pub mod monitor;
pub mod query_log;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use engine::ObservabilityEngine;
pub use monitor::{PerformanceMonitor, PerformanceStats};
pub use query_log::{QueryLog, QueryLogEntry};
