//! Podium - Head-to-head company ranking engine
//!
//! This crate provides matchup selection, ELO-rated voting, per-criterion
//! rating aggregation, paginated leaderboards and a comment ledger, exposed
//! through an HTTP API adapter.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod matchup;
pub mod metrics;
pub mod rating;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use engine::RankingEngine;
pub use store::{CompanyStore, InMemoryCompanyStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
