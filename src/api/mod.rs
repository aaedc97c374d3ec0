//! HTTP transport adapter for the ranking engine
//!
//! This module exposes every engine operation over HTTP using Axum, plus
//! health and Prometheus metrics endpoints. It is strictly an adapter: all
//! semantics live in the engine, and the contract stays defined at the level
//! of the structured request/response types.

pub mod handlers;
pub mod server;

// Re-export commonly used types
pub use server::{ApiServer, ApiServerConfig, ApiState};
