//! Metrics collection for the ranking engine
//!
//! This module provides Prometheus metrics for votes, matchups, ratings and
//! comments, exposed through the HTTP adapter's `/metrics` endpoint.

pub mod collector;

// Re-export commonly used types
pub use collector::MetricsCollector;
