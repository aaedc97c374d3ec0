//! Rating systems for the ranking engine
//!
//! This module provides the ELO exchange calculation applied after each
//! head-to-head vote, and the running per-criterion rating aggregates.

pub mod aggregator;
pub mod elo;

// Re-export commonly used types
pub use aggregator::{CriterionAccumulator, InMemoryRatingAggregator, RatingAggregator};
pub use elo::{EloCalculator, EloConfig, EloExchange};
