//! Matchup selection for head-to-head votes
//!
//! This module picks the pair of companies presented for a vote. Selection
//! is a pure read over the eligible pool; the trait is the seam for
//! alternative policies (e.g. weighting toward under-voted companies).

pub mod selector;

// Re-export commonly used types
pub use selector::{MatchupSelector, RandomMatchupSelector};
