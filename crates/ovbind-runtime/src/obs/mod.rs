//! In-process observability for the simulated native layer.
//!
//! Counters live as atomics next to the handle registry and are rendered in
//! Prometheus text format on demand. Logging goes through `tracing`; the
//! subscriber is installed by the binary.

pub mod metrics;

pub use metrics::EngineMetrics;
