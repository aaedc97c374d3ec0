//! Leaderboard ordering and pagination
//!
//! This module owns the deterministic total order over companies and voting
//! identities, plus the pagination rules shared by every ranked view.

pub mod ranker;

// Re-export commonly used types
pub use ranker::{
    category_counts, company_order, distinct_categories, global_rank, paginate, rank_identities,
    sort_companies, PageParams,
};
