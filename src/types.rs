//! Common types used throughout the ranking engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable integer key for companies
pub type CompanyId = i64;

/// Stable integer key for comments
pub type CommentId = i64;

/// Opaque, caller-generated session identity label
pub type SessionId = String;

/// Fixed set of rating axes a company can be scored on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Compensation,
    Culture,
    WorkLifeBalance,
    Growth,
    TechStack,
    Leadership,
    Interview,
}

impl Criterion {
    /// Every criterion, in reporting order
    pub const ALL: [Criterion; 7] = [
        Criterion::Compensation,
        Criterion::Culture,
        Criterion::WorkLifeBalance,
        Criterion::Growth,
        Criterion::TechStack,
        Criterion::Leadership,
        Criterion::Interview,
    ];

    /// Wire name of the criterion
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Compensation => "compensation",
            Criterion::Culture => "culture",
            Criterion::WorkLifeBalance => "work_life_balance",
            Criterion::Growth => "growth",
            Criterion::TechStack => "tech_stack",
            Criterion::Leadership => "leadership",
            Criterion::Interview => "interview",
        }
    }

    /// Parse a wire name; `None` for anything outside the fixed set
    pub fn parse(name: &str) -> Option<Criterion> {
        Criterion::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Public view of a company, including its leaderboard rank when computed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<i32>,
    pub hq_location: Option<String>,
    pub employee_range: Option<String>,
    pub funding_stage: Option<String>,
    pub elo_rating: f64,
    pub total_votes: u64,
    pub wins: u64,
    pub losses: u64,
    /// 1-based global rank; 0 when not computed for this view
    pub rank: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry for creating a company (seed file / tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub hq_location: Option<String>,
    #[serde(default)]
    pub employee_range: Option<String>,
    #[serde(default)]
    pub funding_stage: Option<String>,
}

/// Two distinct companies presented for a head-to-head vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub company1: Company,
    pub company2: Company,
}

/// Request to record a head-to-head vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub winner_id: CompanyId,
    pub loser_id: CompanyId,
    pub session_id: SessionId,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Result of a vote: updated companies and the exchanged rating points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub winner: Company,
    pub loser: Company,
    pub winner_elo_diff: i32,
    pub loser_elo_diff: i32,
}

/// Immutable record of a single vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: i64,
    pub winner_id: CompanyId,
    pub loser_id: CompanyId,
    pub session_id: SessionId,
    pub user_id: Option<String>,
    pub winner_elo_diff: i32,
    pub loser_elo_diff: i32,
    pub created_at: DateTime<Utc>,
}

/// Request to score a company on one criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRequest {
    pub company_id: CompanyId,
    pub criterion: String,
    pub score: i64,
    pub session_id: SessionId,
}

/// Stored criterion score submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRating {
    pub id: i64,
    pub company_id: CompanyId,
    pub criterion: Criterion,
    pub score: u8,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

/// Running average for one criterion of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRating {
    pub criterion: Criterion,
    pub average_score: f64,
    pub total_ratings: u64,
}

/// Request to publish a review comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub company_id: CompanyId,
    pub content: String,
    #[serde(default)]
    pub is_current_employee: bool,
    pub session_id: SessionId,
}

/// Published review comment with its upvote counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub company_id: CompanyId,
    pub content: String,
    pub is_current_employee: bool,
    pub session_id: SessionId,
    pub upvotes: u64,
    pub created_at: DateTime<Utc>,
}

/// One page of the company leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardPage {
    pub companies: Vec<Company>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

/// One row of the voter leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLeaderboardEntry {
    pub user_id: String,
    pub total_votes: u64,
    pub rank: u32,
}

/// One page of the voter leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLeaderboardPage {
    pub users: Vec<UserLeaderboardEntry>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Distinct category with its member count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Platform-wide counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_companies: u64,
    pub total_votes: u64,
    pub total_ratings: u64,
    pub total_comments: u64,
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_parse_roundtrip() {
        for criterion in Criterion::ALL {
            let parsed = Criterion::parse(criterion.as_str());
            assert_eq!(parsed, Some(criterion));
        }
    }

    #[test]
    fn test_criterion_rejects_unknown_names() {
        assert_eq!(Criterion::parse("salary"), None);
        assert_eq!(Criterion::parse(""), None);
        assert_eq!(Criterion::parse("Compensation"), None);
    }

    #[test]
    fn test_criterion_serde_uses_wire_names() {
        let json = serde_json::to_string(&Criterion::WorkLifeBalance).unwrap();
        assert_eq!(json, "\"work_life_balance\"");

        let parsed: Criterion = serde_json::from_str("\"tech_stack\"").unwrap();
        assert_eq!(parsed, Criterion::TechStack);
    }

    #[test]
    fn test_new_company_defaults_optional_fields() {
        let parsed: NewCompany = serde_json::from_str(
            r#"{"name": "Acme", "slug": "acme", "category": "infrastructure"}"#,
        )
        .unwrap();

        assert_eq!(parsed.name, "Acme");
        assert!(parsed.tags.is_empty());
        assert!(parsed.website.is_none());
        assert!(parsed.founded_year.is_none());
    }
}
