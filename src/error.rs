//! Error types for the ranking engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ranking scenarios
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("company not found: {key}")]
    CompanyNotFound { key: String },

    #[error("comment not found: {comment_id}")]
    CommentNotFound { comment_id: i64 },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("insufficient companies for matchup: {eligible} eligible in category '{category}'")]
    InsufficientCompanies { category: String, eligible: usize },

    #[error(
        "concurrent update conflict on companies {winner_id}/{loser_id} after {attempts} attempts"
    )]
    Conflict {
        winner_id: i64,
        loser_id: i64,
        attempts: u32,
    },

    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("configuration error: {message}")]
    ConfigurationError { message: String },
}
