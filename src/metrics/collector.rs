//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the podium ranking service
//! using Prometheus metrics.

use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Main metrics collector for the ranking service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Total votes committed
    pub votes_total: IntCounter,

    /// Vote commits that raced and were retried
    pub vote_retries_total: IntCounter,

    /// Votes rejected after exhausting the retry budget
    pub vote_conflicts_total: IntCounter,

    /// Matchups served
    pub matchups_served_total: IntCounter,

    /// Criterion scores submitted, labeled by criterion
    pub ratings_submitted_total: IntCounterVec,

    /// Comments published
    pub comments_total: IntCounter,

    /// Comment upvotes applied
    pub comment_upvotes_total: IntCounter,

    /// Distribution of rating points exchanged per vote
    pub elo_exchange_points: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());

        let votes_total = IntCounter::new("podium_votes_total", "Total votes committed")?;
        let vote_retries_total = IntCounter::new(
            "podium_vote_retries_total",
            "Vote commits that raced with a concurrent update and were retried",
        )?;
        let vote_conflicts_total = IntCounter::new(
            "podium_vote_conflicts_total",
            "Votes rejected after exhausting the optimistic retry budget",
        )?;
        let matchups_served_total =
            IntCounter::new("podium_matchups_served_total", "Matchups served")?;
        let ratings_submitted_total = IntCounterVec::new(
            Opts::new(
                "podium_ratings_submitted_total",
                "Criterion scores submitted",
            ),
            &["criterion"],
        )?;
        let comments_total = IntCounter::new("podium_comments_total", "Comments published")?;
        let comment_upvotes_total =
            IntCounter::new("podium_comment_upvotes_total", "Comment upvotes applied")?;
        let elo_exchange_points = Histogram::with_opts(
            HistogramOpts::new(
                "podium_elo_exchange_points",
                "Rating points exchanged per vote",
            )
            .buckets(vec![0.0, 2.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 28.0, 32.0]),
        )?;

        registry.register(Box::new(votes_total.clone()))?;
        registry.register(Box::new(vote_retries_total.clone()))?;
        registry.register(Box::new(vote_conflicts_total.clone()))?;
        registry.register(Box::new(matchups_served_total.clone()))?;
        registry.register(Box::new(ratings_submitted_total.clone()))?;
        registry.register(Box::new(comments_total.clone()))?;
        registry.register(Box::new(comment_upvotes_total.clone()))?;
        registry.register(Box::new(elo_exchange_points.clone()))?;

        Ok(Self {
            registry,
            votes_total,
            vote_retries_total,
            vote_conflicts_total,
            matchups_served_total,
            ratings_submitted_total,
            comments_total,
            comment_upvotes_total,
            elo_exchange_points,
        })
    }

    /// The underlying registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn gather(&self) -> Result<String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&metric_families, &mut buffer)?;

        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation_and_exposition() {
        let metrics = MetricsCollector::new().unwrap();

        metrics.votes_total.inc();
        metrics.votes_total.inc();
        metrics
            .ratings_submitted_total
            .with_label_values(&["culture"])
            .inc();
        metrics.elo_exchange_points.observe(16.0);

        let rendered = metrics.gather().unwrap();
        assert!(rendered.contains("podium_votes_total 2"));
        assert!(rendered.contains("podium_ratings_submitted_total"));
        assert!(rendered.contains("culture"));
    }

    #[test]
    fn test_collectors_have_independent_registries() {
        let first = MetricsCollector::new().unwrap();
        let second = MetricsCollector::new().unwrap();

        first.votes_total.inc();
        assert!(second.gather().unwrap().contains("podium_votes_total 0"));
    }
}
