//! ELO rating exchange for head-to-head votes
//!
//! This module computes the rating points exchanged between the winner and
//! loser of a vote, using the expected score from the skillratings crate's
//! Elo implementation. The winner's delta is rounded once and the loser's
//! delta is its negation, so every vote is exactly zero-sum.

use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score, EloRating};

/// Configuration for the ELO exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloConfig {
    /// Maximum rating points exchanged per vote
    pub k_factor: f64,
    /// Rating assigned to companies with no vote history
    pub initial_rating: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1500.0,
        }
    }
}

impl EloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(crate::error::RankingError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !self.initial_rating.is_finite() || self.initial_rating <= 0.0 {
            return Err(crate::error::RankingError::ConfigurationError {
                message: "Initial rating must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Rating points exchanged by one vote
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EloExchange {
    pub winner_delta: i32,
    pub loser_delta: i32,
    /// Pre-vote win probability of the winner
    pub expected_winner: f64,
}

/// ELO exchange calculator
#[derive(Debug, Clone)]
pub struct EloCalculator {
    config: EloConfig,
}

impl EloCalculator {
    /// Create a new ELO calculator
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Rating assigned to new companies
    pub fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    /// Expected score of the first rating against the second
    pub fn expected(&self, rating: f64, opponent_rating: f64) -> f64 {
        let (expected, _) = expected_score(
            &EloRating { rating },
            &EloRating {
                rating: opponent_rating,
            },
        );

        expected
    }

    /// Points exchanged when `winner_rating` beats `loser_rating`.
    ///
    /// The winner delta is `round(K * (1 - E_winner))`; the loser delta is
    /// its negation rather than an independently rounded term, so the two
    /// always sum to exactly zero.
    pub fn exchange(&self, winner_rating: f64, loser_rating: f64) -> EloExchange {
        let expected_winner = self.expected(winner_rating, loser_rating);
        let winner_delta = (self.config.k_factor * (1.0 - expected_winner)).round() as i32;

        EloExchange {
            winner_delta,
            loser_delta: -winner_delta,
            expected_winner,
        }
    }
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self {
            config: EloConfig::default(),
        }
    }
}
