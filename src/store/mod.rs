//! Storage interfaces and in-memory implementations
//!
//! This module defines the persistence seams of the ranking engine: the
//! company table with optimistic concurrency, the append-only vote ledger,
//! and the comment store with its serialized upvote counter.

pub mod comments;
pub mod company;
pub mod seed;
pub mod votes;

// Re-export commonly used types
pub use comments::{CommentStore, InMemoryCommentStore, NewComment};
pub use company::{CompanyRecord, CompanyStore, InMemoryCompanyStore, MockCompanyStore};
pub use seed::{apply_seed, load_seed_file};
pub use votes::{voting_identity, InMemoryVoteLedger, NewVote, VoteLedger};
