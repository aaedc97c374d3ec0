//! Running per-criterion rating aggregates
//!
//! Every criterion score submission is appended to an immutable log and
//! folded into a running (sum, count) accumulator per (company, criterion).
//! Averages derived from the integer sum match the incremental recurrence
//! `avg' = (avg * n + score) / (n + 1)` with no floating-point drift.

use crate::error::RankingError;
use crate::types::{AggregatedRating, CompanyId, CompanyRating, Criterion};
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Running sum and count for one (company, criterion) pair
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriterionAccumulator {
    pub total_score: u64,
    pub count: u64,
}

impl CriterionAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one score into the running aggregate
    pub fn record(&mut self, score: u8) {
        self.total_score += u64::from(score);
        self.count += 1;
    }

    /// Current average; 0.0 when no scores have been recorded
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        self.total_score as f64 / self.count as f64
    }
}

/// Trait for rating aggregation operations
pub trait RatingAggregator: Send + Sync {
    /// Append one score submission and fold it into the running aggregate
    fn record(
        &self,
        company_id: CompanyId,
        criterion: Criterion,
        score: u8,
        session_id: &str,
    ) -> crate::error::Result<CompanyRating>;

    /// Aggregates for one company; every criterion is reported, zero-filled
    /// when it has no submissions
    fn aggregates_for(&self, company_id: CompanyId)
        -> crate::error::Result<Vec<AggregatedRating>>;

    /// Total score submissions recorded
    fn count(&self) -> crate::error::Result<u64>;
}

#[derive(Debug, Default)]
struct AggregatorInner {
    log: Vec<CompanyRating>,
    accumulators: HashMap<(CompanyId, Criterion), CriterionAccumulator>,
    next_id: i64,
}

/// In-memory rating aggregator implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingAggregator {
    inner: RwLock<AggregatorInner>,
}

impl InMemoryRatingAggregator {
    /// Create a new empty aggregator
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingAggregator for InMemoryRatingAggregator {
    fn record(
        &self,
        company_id: CompanyId,
        criterion: Criterion,
        score: u8,
        session_id: &str,
    ) -> crate::error::Result<CompanyRating> {
        let mut inner = self.inner.write().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire rating aggregator write lock".to_string(),
        })?;

        inner.next_id += 1;
        let rating = CompanyRating {
            id: inner.next_id,
            company_id,
            criterion,
            score,
            session_id: session_id.to_string(),
            created_at: current_timestamp(),
        };

        inner
            .accumulators
            .entry((company_id, criterion))
            .or_default()
            .record(score);
        inner.log.push(rating.clone());

        Ok(rating)
    }

    fn aggregates_for(
        &self,
        company_id: CompanyId,
    ) -> crate::error::Result<Vec<AggregatedRating>> {
        let inner = self.inner.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire rating aggregator read lock".to_string(),
        })?;

        let aggregates = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let accumulator = inner
                    .accumulators
                    .get(&(company_id, criterion))
                    .cloned()
                    .unwrap_or_default();

                AggregatedRating {
                    criterion,
                    average_score: accumulator.average(),
                    total_ratings: accumulator.count,
                }
            })
            .collect();

        Ok(aggregates)
    }

    fn count(&self) -> crate::error::Result<u64> {
        let inner = self.inner.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire rating aggregator read lock".to_string(),
        })?;

        Ok(inner.log.len() as u64)
    }
}
