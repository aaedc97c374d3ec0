//! Ranking engine facade
//!
//! `RankingEngine` coordinates the stores, the matchup selector and the ELO
//! calculator behind the transport-agnostic operation contract: matchups,
//! votes, leaderboards, criterion ratings, comments and platform stats.

use crate::config::EngineSettings;
use crate::error::RankingError;
use crate::leaderboard::ranker::{
    category_counts, distinct_categories, global_rank, paginate, rank_identities, sort_companies,
    PageParams,
};
use crate::matchup::selector::{MatchupSelector, RandomMatchupSelector};
use crate::metrics::MetricsCollector;
use crate::rating::aggregator::{InMemoryRatingAggregator, RatingAggregator};
use crate::rating::elo::{EloCalculator, EloConfig};
use crate::store::comments::{CommentStore, InMemoryCommentStore, NewComment};
use crate::store::company::{CompanyRecord, CompanyStore, InMemoryCompanyStore};
use crate::store::votes::{InMemoryVoteLedger, NewVote, VoteLedger};
use crate::types::{
    AggregatedRating, CategoryCount, Comment, CommentId, CommentRequest, Company, CompanyRating,
    LeaderboardPage, Matchup, NewCompany, RatingRequest, Stats, UserLeaderboardEntry,
    UserLeaderboardPage, VoteOutcome, VoteRequest,
};
use crate::utils::normalize_category;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stateless request-handling facade over the shared stores
pub struct RankingEngine {
    config: EngineSettings,
    companies: Arc<dyn CompanyStore>,
    votes: Arc<dyn VoteLedger>,
    ratings: Arc<dyn RatingAggregator>,
    comments: Arc<dyn CommentStore>,
    selector: Arc<dyn MatchupSelector>,
    calculator: EloCalculator,
    metrics: Option<Arc<MetricsCollector>>,
}

impl RankingEngine {
    /// Create an engine over explicit store implementations
    pub fn new(
        config: EngineSettings,
        companies: Arc<dyn CompanyStore>,
        votes: Arc<dyn VoteLedger>,
        ratings: Arc<dyn RatingAggregator>,
        comments: Arc<dyn CommentStore>,
        selector: Arc<dyn MatchupSelector>,
    ) -> crate::error::Result<Self> {
        let calculator = EloCalculator::new(EloConfig {
            k_factor: config.k_factor,
            initial_rating: config.initial_rating,
        })?;

        Ok(Self {
            config,
            companies,
            votes,
            ratings,
            comments,
            selector,
            calculator,
            metrics: None,
        })
    }

    /// Create an engine backed entirely by in-memory stores
    pub fn in_memory(config: EngineSettings) -> crate::error::Result<Self> {
        let companies = Arc::new(InMemoryCompanyStore::new(config.initial_rating));

        Self::new(
            config,
            companies,
            Arc::new(InMemoryVoteLedger::new()),
            Arc::new(InMemoryRatingAggregator::new()),
            Arc::new(InMemoryCommentStore::new()),
            Arc::new(RandomMatchupSelector::new()),
        )
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Add a company to the catalog (seed loading and tests)
    pub fn add_company(&self, company: NewCompany) -> crate::error::Result<Company> {
        let record = self.companies.insert(company)?;
        Ok(record.to_company(0))
    }

    /// Direct access to the company store (seed loading)
    pub fn company_store(&self) -> Arc<dyn CompanyStore> {
        self.companies.clone()
    }

    /// Draw two distinct companies for a head-to-head vote
    pub fn get_matchup(&self, category: Option<&str>) -> crate::error::Result<Matchup> {
        let filter = normalize_category(category);
        let pool = self.companies.list(filter.as_deref())?;

        match self.selector.select_pair(&pool) {
            Some((first, second)) => {
                debug!(
                    "Matchup drawn: '{}' vs '{}' (pool size {})",
                    first.slug,
                    second.slug,
                    pool.len()
                );
                if let Some(metrics) = &self.metrics {
                    metrics.matchups_served_total.inc();
                }

                Ok(Matchup {
                    company1: first.to_company(0),
                    company2: second.to_company(0),
                })
            }
            None => Err(RankingError::InsufficientCompanies {
                category: filter.unwrap_or_else(|| "all".to_string()),
                eligible: pool.len(),
            }
            .into()),
        }
    }

    /// Record a vote: apply the ELO exchange to both companies atomically
    /// and append an immutable vote record.
    ///
    /// The paired update is a read-modify-write protected by the store's
    /// version-checked commit; a raced commit is retried with fresh reads up
    /// to the configured budget, after which the vote fails with `Conflict`.
    pub fn submit_vote(&self, request: VoteRequest) -> crate::error::Result<VoteOutcome> {
        if request.winner_id == request.loser_id {
            return Err(RankingError::InvalidArgument {
                reason: "winner and loser must be different companies".to_string(),
            }
            .into());
        }

        for attempt in 1..=self.config.max_update_retries {
            let winner = self.companies.get(request.winner_id)?.ok_or_else(|| {
                RankingError::CompanyNotFound {
                    key: request.winner_id.to_string(),
                }
            })?;
            let loser = self.companies.get(request.loser_id)?.ok_or_else(|| {
                RankingError::CompanyNotFound {
                    key: request.loser_id.to_string(),
                }
            })?;

            let exchange = self.calculator.exchange(winner.elo_rating, loser.elo_rating);

            let mut updated_winner = winner;
            let mut updated_loser = loser;
            updated_winner.apply_win(exchange.winner_delta);
            updated_loser.apply_loss(exchange.loser_delta);

            if self
                .companies
                .commit_pair(updated_winner.clone(), updated_loser.clone())?
            {
                let vote = self.votes.append(NewVote {
                    winner_id: request.winner_id,
                    loser_id: request.loser_id,
                    session_id: request.session_id.clone(),
                    user_id: request.user_id.clone(),
                    winner_elo_diff: exchange.winner_delta,
                    loser_elo_diff: exchange.loser_delta,
                })?;

                info!(
                    "Vote {} recorded: '{}' beat '{}' ({:+}/{:+})",
                    vote.id,
                    updated_winner.slug,
                    updated_loser.slug,
                    exchange.winner_delta,
                    exchange.loser_delta
                );
                if let Some(metrics) = &self.metrics {
                    metrics.votes_total.inc();
                    metrics
                        .elo_exchange_points
                        .observe(f64::from(exchange.winner_delta));
                }

                return Ok(VoteOutcome {
                    winner: updated_winner.to_company(0),
                    loser: updated_loser.to_company(0),
                    winner_elo_diff: exchange.winner_delta,
                    loser_elo_diff: exchange.loser_delta,
                });
            }

            warn!(
                "Vote commit raced on companies {}/{}, retrying (attempt {}/{})",
                request.winner_id, request.loser_id, attempt, self.config.max_update_retries
            );
            if let Some(metrics) = &self.metrics {
                metrics.vote_retries_total.inc();
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.vote_conflicts_total.inc();
        }

        Err(RankingError::Conflict {
            winner_id: request.winner_id,
            loser_id: request.loser_id,
            attempts: self.config.max_update_retries,
        }
        .into())
    }

    /// One page of the company leaderboard
    pub fn get_leaderboard(
        &self,
        category: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> crate::error::Result<LeaderboardPage> {
        let filter = normalize_category(category);
        let mut records = self.companies.list(filter.as_deref())?;
        sort_companies(&mut records);

        let params = PageParams::normalize(page, page_size, &self.config);
        let (page_records, total_count) = paginate(&records, params);
        let offset = params.offset();

        let companies = page_records
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_company((offset + i) as u32 + 1))
            .collect();

        Ok(LeaderboardPage {
            companies,
            total_count,
            page: params.page,
            page_size: params.page_size,
        })
    }

    /// One page of the voter leaderboard
    pub fn get_user_leaderboard(
        &self,
        page: u32,
        page_size: u32,
    ) -> crate::error::Result<UserLeaderboardPage> {
        let tallies = rank_identities(self.votes.identity_tallies()?);

        let params = PageParams::normalize(page, page_size, &self.config);
        let (rows, total_count) = paginate(&tallies, params);
        let offset = params.offset();

        let users = rows
            .into_iter()
            .enumerate()
            .map(|(i, (identity, total_votes))| UserLeaderboardEntry {
                user_id: identity,
                total_votes,
                rank: (offset + i) as u32 + 1,
            })
            .collect();

        Ok(UserLeaderboardPage {
            users,
            total_count,
            page: params.page,
            page_size: params.page_size,
        })
    }

    /// Every distinct category with its member count
    pub fn list_categories(&self) -> crate::error::Result<Vec<CategoryCount>> {
        let records = self.companies.list(None)?;
        Ok(category_counts(&records))
    }

    /// Platform-wide counters
    pub fn get_stats(&self) -> crate::error::Result<Stats> {
        let records = self.companies.list(None)?;

        Ok(Stats {
            total_companies: records.len() as u64,
            total_votes: self.votes.count()?,
            total_ratings: self.ratings.count()?,
            total_comments: self.comments.count()?,
            categories: distinct_categories(&records),
        })
    }

    /// A single company by slug, with its global rank
    pub fn get_company(&self, slug: &str) -> crate::error::Result<Company> {
        let record = self.require_company_by_slug(slug)?;

        let mut all = self.companies.list(None)?;
        sort_companies(&mut all);
        let rank = global_rank(&all, record.id).unwrap_or(0);

        Ok(record.to_company(rank))
    }

    /// Full company listing with optional category filter and substring
    /// search over name and description
    pub fn list_companies(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> crate::error::Result<Vec<Company>> {
        let filter = normalize_category(category);
        let mut records = self.companies.list(filter.as_deref())?;

        if let Some(query) = search.filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            records.retain(|record| {
                record.name.to_lowercase().contains(&needle)
                    || record
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            });
        }

        sort_companies(&mut records);

        Ok(records
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_company(i as u32 + 1))
            .collect())
    }

    /// Record a criterion score for a company
    pub fn submit_rating(&self, request: RatingRequest) -> crate::error::Result<CompanyRating> {
        if !(1..=5).contains(&request.score) {
            return Err(RankingError::InvalidArgument {
                reason: format!("score must be between 1 and 5, got {}", request.score),
            }
            .into());
        }

        let criterion = crate::types::Criterion::parse(&request.criterion).ok_or_else(|| {
            RankingError::InvalidArgument {
                reason: format!("unknown criterion '{}'", request.criterion),
            }
        })?;

        if self.companies.get(request.company_id)?.is_none() {
            return Err(RankingError::CompanyNotFound {
                key: request.company_id.to_string(),
            }
            .into());
        }

        let rating = self.ratings.record(
            request.company_id,
            criterion,
            request.score as u8,
            &request.session_id,
        )?;

        debug!(
            "Rating recorded: company {} scored {} on {}",
            request.company_id, request.score, criterion
        );
        if let Some(metrics) = &self.metrics {
            metrics
                .ratings_submitted_total
                .with_label_values(&[criterion.as_str()])
                .inc();
        }

        Ok(rating)
    }

    /// Aggregated criterion ratings for a company, every criterion reported
    pub fn get_company_ratings(
        &self,
        slug: &str,
    ) -> crate::error::Result<Vec<AggregatedRating>> {
        let record = self.require_company_by_slug(slug)?;
        self.ratings.aggregates_for(record.id)
    }

    /// Publish a review comment
    pub fn submit_comment(&self, request: CommentRequest) -> crate::error::Result<Comment> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(RankingError::InvalidArgument {
                reason: "comment content is required".to_string(),
            }
            .into());
        }
        if content.chars().count() > self.config.max_comment_length {
            return Err(RankingError::InvalidArgument {
                reason: format!(
                    "comment content exceeds {} characters",
                    self.config.max_comment_length
                ),
            }
            .into());
        }

        if self.companies.get(request.company_id)?.is_none() {
            return Err(RankingError::CompanyNotFound {
                key: request.company_id.to_string(),
            }
            .into());
        }

        let comment = self.comments.insert(NewComment {
            company_id: request.company_id,
            content: content.to_string(),
            is_current_employee: request.is_current_employee,
            session_id: request.session_id,
        })?;

        info!(
            "Comment {} published for company {}",
            comment.id, comment.company_id
        );
        if let Some(metrics) = &self.metrics {
            metrics.comments_total.inc();
        }

        Ok(comment)
    }

    /// Comments for a company, most recent first
    pub fn get_company_comments(&self, slug: &str) -> crate::error::Result<Vec<Comment>> {
        let record = self.require_company_by_slug(slug)?;
        self.comments
            .for_company(record.id, self.config.comment_list_limit)
    }

    /// Apply one upvote to a comment
    pub fn upvote_comment(&self, comment_id: CommentId) -> crate::error::Result<Comment> {
        let comment = self
            .comments
            .upvote(comment_id)?
            .ok_or(RankingError::CommentNotFound { comment_id })?;

        if let Some(metrics) = &self.metrics {
            metrics.comment_upvotes_total.inc();
        }

        Ok(comment)
    }

    fn require_company_by_slug(&self, slug: &str) -> crate::error::Result<CompanyRecord> {
        self.companies
            .get_by_slug(slug)?
            .ok_or_else(|| {
                RankingError::CompanyNotFound {
                    key: slug.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::company::MockCompanyStore;
    use crate::types::Criterion;

    fn test_company(slug: &str, category: &str) -> NewCompany {
        NewCompany {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            category: category.to_string(),
            tags: vec![],
            logo_url: None,
            description: None,
            website: None,
            founded_year: None,
            hq_location: None,
            employee_range: None,
            funding_stage: None,
        }
    }

    fn test_engine() -> RankingEngine {
        RankingEngine::in_memory(EngineSettings::default()).unwrap()
    }

    fn vote_request(winner_id: i64, loser_id: i64) -> VoteRequest {
        VoteRequest {
            winner_id,
            loser_id,
            session_id: "sess-1".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_vote_worked_example() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();

        let outcome = engine.submit_vote(vote_request(a.id, b.id)).unwrap();

        assert_eq!(outcome.winner_elo_diff, 16);
        assert_eq!(outcome.loser_elo_diff, -16);
        assert_eq!(outcome.winner.elo_rating, 1516.0);
        assert_eq!(outcome.loser.elo_rating, 1484.0);
        assert_eq!(outcome.winner.wins, 1);
        assert_eq!(outcome.winner.total_votes, 1);
        assert_eq!(outcome.loser.losses, 1);
        assert_eq!(outcome.loser.total_votes, 1);
    }

    #[test]
    fn test_self_vote_rejected() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();

        let err = engine.submit_vote(vote_request(a.id, a.id)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_vote_on_unknown_company() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();

        let err = engine.submit_vote(vote_request(a.id, 999)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::CompanyNotFound { .. })
        ));
    }

    #[test]
    fn test_vote_retries_raced_commits() {
        let store = Arc::new(MockCompanyStore::new());
        let engine = RankingEngine::new(
            EngineSettings::default(),
            store.clone(),
            Arc::new(InMemoryVoteLedger::new()),
            Arc::new(InMemoryRatingAggregator::new()),
            Arc::new(InMemoryCommentStore::new()),
            Arc::new(RandomMatchupSelector::new()),
        )
        .unwrap();

        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();

        // Two raced commits, then success on the third attempt
        store.fail_next_commits(2);
        let outcome = engine.submit_vote(vote_request(a.id, b.id)).unwrap();
        assert_eq!(outcome.winner_elo_diff, 16);
        assert_eq!(store.commit_attempts(), 3);
    }

    #[test]
    fn test_vote_conflict_after_retry_budget() {
        let settings = EngineSettings {
            max_update_retries: 3,
            ..EngineSettings::default()
        };
        let store = Arc::new(MockCompanyStore::new());
        let engine = RankingEngine::new(
            settings,
            store.clone(),
            Arc::new(InMemoryVoteLedger::new()),
            Arc::new(InMemoryRatingAggregator::new()),
            Arc::new(InMemoryCommentStore::new()),
            Arc::new(RandomMatchupSelector::new()),
        )
        .unwrap();

        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();

        store.fail_next_commits(10);
        let err = engine.submit_vote(vote_request(a.id, b.id)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::Conflict { attempts: 3, .. })
        ));

        // No vote record and no counter movement on a failed vote
        assert_eq!(engine.get_stats().unwrap().total_votes, 0);
        let current = store.get(a.id).unwrap().unwrap();
        assert_eq!(current.total_votes, 0);
    }

    #[test]
    fn test_matchup_requires_two_eligible_companies() {
        let engine = test_engine();
        engine.add_company(test_company("acme", "infrastructure")).unwrap();

        let err = engine.get_matchup(None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InsufficientCompanies { eligible: 1, .. })
        ));
    }

    #[test]
    fn test_matchup_respects_category_filter() {
        let engine = test_engine();
        engine.add_company(test_company("acme", "infrastructure")).unwrap();
        engine.add_company(test_company("globex", "infrastructure")).unwrap();
        engine.add_company(test_company("initech", "devtools")).unwrap();

        // Only one devtools company: category matchup must fail
        let err = engine.get_matchup(Some("devtools")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InsufficientCompanies { eligible: 1, .. })
        ));

        let matchup = engine.get_matchup(Some("infrastructure")).unwrap();
        assert_eq!(matchup.company1.category, "infrastructure");
        assert_eq!(matchup.company2.category, "infrastructure");
        assert_ne!(matchup.company1.id, matchup.company2.id);

        // "all" and absent are equivalent
        assert!(engine.get_matchup(Some("all")).is_ok());
    }

    #[test]
    fn test_leaderboard_ranks_and_counters() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();
        let c = engine.add_company(test_company("initech", "devtools")).unwrap();

        engine.submit_vote(vote_request(a.id, b.id)).unwrap();
        engine.submit_vote(vote_request(a.id, c.id)).unwrap();
        engine.submit_vote(vote_request(b.id, c.id)).unwrap();

        let board = engine.get_leaderboard(None, 1, 25).unwrap();
        assert_eq!(board.total_count, 3);
        assert_eq!(board.companies[0].slug, "acme");
        assert_eq!(board.companies[0].rank, 1);
        assert_eq!(board.companies[1].rank, 2);
        assert_eq!(board.companies[2].slug, "initech");

        for company in &board.companies {
            assert_eq!(company.wins + company.losses, company.total_votes);
        }

        let devtools = engine.get_leaderboard(Some("devtools"), 1, 25).unwrap();
        assert_eq!(devtools.total_count, 2);
    }

    #[test]
    fn test_user_leaderboard_identities() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();

        engine
            .submit_vote(VoteRequest {
                winner_id: a.id,
                loser_id: b.id,
                session_id: "sess-1".to_string(),
                user_id: None,
            })
            .unwrap();
        engine
            .submit_vote(VoteRequest {
                winner_id: b.id,
                loser_id: a.id,
                session_id: "sess-1".to_string(),
                user_id: None,
            })
            .unwrap();
        engine
            .submit_vote(VoteRequest {
                winner_id: a.id,
                loser_id: b.id,
                session_id: "sess-2".to_string(),
                user_id: Some("user-7".to_string()),
            })
            .unwrap();

        let board = engine.get_user_leaderboard(1, 25).unwrap();
        assert_eq!(board.total_count, 2);
        assert_eq!(board.users[0].user_id, "sess-1");
        assert_eq!(board.users[0].total_votes, 2);
        assert_eq!(board.users[0].rank, 1);
        assert_eq!(board.users[1].user_id, "user-7");
    }

    #[test]
    fn test_rating_validation_order() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();

        // Score is validated before anything else
        let err = engine
            .submit_rating(RatingRequest {
                company_id: 999,
                criterion: "culture".to_string(),
                score: 6,
                session_id: "sess-1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InvalidArgument { .. })
        ));

        // Then the criterion
        let err = engine
            .submit_rating(RatingRequest {
                company_id: a.id,
                criterion: "salary".to_string(),
                score: 3,
                session_id: "sess-1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InvalidArgument { .. })
        ));

        // Then company existence
        let err = engine
            .submit_rating(RatingRequest {
                company_id: 999,
                criterion: "culture".to_string(),
                score: 3,
                session_id: "sess-1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::CompanyNotFound { .. })
        ));
    }

    #[test]
    fn test_company_ratings_zero_filled() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();

        engine
            .submit_rating(RatingRequest {
                company_id: a.id,
                criterion: "culture".to_string(),
                score: 4,
                session_id: "sess-1".to_string(),
            })
            .unwrap();
        engine
            .submit_rating(RatingRequest {
                company_id: a.id,
                criterion: "culture".to_string(),
                score: 5,
                session_id: "sess-1".to_string(),
            })
            .unwrap();

        let ratings = engine.get_company_ratings("acme").unwrap();
        assert_eq!(ratings.len(), Criterion::ALL.len());

        let culture = ratings
            .iter()
            .find(|r| r.criterion == Criterion::Culture)
            .unwrap();
        assert_eq!(culture.average_score, 4.5);
        assert_eq!(culture.total_ratings, 2);

        let interview = ratings
            .iter()
            .find(|r| r.criterion == Criterion::Interview)
            .unwrap();
        assert_eq!(interview.average_score, 0.0);
        assert_eq!(interview.total_ratings, 0);
    }

    #[test]
    fn test_comment_validation_and_upvotes() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();

        // Whitespace-only content is rejected
        let err = engine
            .submit_comment(CommentRequest {
                company_id: a.id,
                content: "   ".to_string(),
                is_current_employee: false,
                session_id: "sess-1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InvalidArgument { .. })
        ));

        // Oversized content is rejected
        let err = engine
            .submit_comment(CommentRequest {
                company_id: a.id,
                content: "x".repeat(2001),
                is_current_employee: false,
                session_id: "sess-1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::InvalidArgument { .. })
        ));

        let comment = engine
            .submit_comment(CommentRequest {
                company_id: a.id,
                content: "  solid engineering culture  ".to_string(),
                is_current_employee: true,
                session_id: "sess-1".to_string(),
            })
            .unwrap();
        assert_eq!(comment.content, "solid engineering culture");
        assert_eq!(comment.upvotes, 0);

        let upvoted = engine.upvote_comment(comment.id).unwrap();
        assert_eq!(upvoted.upvotes, 1);

        let err = engine.upvote_comment(999).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::CommentNotFound { .. })
        ));
    }

    #[test]
    fn test_get_company_includes_rank() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();

        engine.submit_vote(vote_request(b.id, a.id)).unwrap();

        let globex = engine.get_company("globex").unwrap();
        assert_eq!(globex.rank, 1);
        let acme = engine.get_company("acme").unwrap();
        assert_eq!(acme.rank, 2);

        let err = engine.get_company("missing").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::CompanyNotFound { .. })
        ));
    }

    #[test]
    fn test_list_companies_search() {
        let engine = test_engine();
        engine
            .add_company(NewCompany {
                description: Some("Cloud infrastructure provider".to_string()),
                ..test_company("acme", "infrastructure")
            })
            .unwrap();
        engine.add_company(test_company("globex", "devtools")).unwrap();

        let matches = engine.list_companies(None, Some("CLOUD")).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].slug, "acme");
        assert_eq!(matches[0].rank, 1);

        let all = engine.list_companies(None, None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_stats_counts_everything() {
        let engine = test_engine();
        let a = engine.add_company(test_company("acme", "infrastructure")).unwrap();
        let b = engine.add_company(test_company("globex", "devtools")).unwrap();

        engine.submit_vote(vote_request(a.id, b.id)).unwrap();
        engine
            .submit_rating(RatingRequest {
                company_id: a.id,
                criterion: "growth".to_string(),
                score: 5,
                session_id: "sess-1".to_string(),
            })
            .unwrap();
        engine
            .submit_comment(CommentRequest {
                company_id: a.id,
                content: "shipping fast".to_string(),
                is_current_employee: false,
                session_id: "sess-1".to_string(),
            })
            .unwrap();

        let stats = engine.get_stats().unwrap();
        assert_eq!(stats.total_companies, 2);
        assert_eq!(stats.total_votes, 1);
        assert_eq!(stats.total_ratings, 1);
        assert_eq!(stats.total_comments, 1);
        assert_eq!(
            stats.categories,
            vec!["devtools".to_string(), "infrastructure".to_string()]
        );
    }

    #[test]
    fn test_list_categories_counts() {
        let engine = test_engine();
        engine.add_company(test_company("acme", "infrastructure")).unwrap();
        engine.add_company(test_company("globex", "devtools")).unwrap();
        engine.add_company(test_company("initech", "devtools")).unwrap();

        let categories = engine.list_categories().unwrap();
        assert_eq!(categories[0].category, "devtools");
        assert_eq!(categories[0].count, 2);
        assert_eq!(categories[1].category, "infrastructure");
        assert_eq!(categories[1].count, 1);
    }
}
