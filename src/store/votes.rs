//! Append-only vote ledger
//!
//! Vote records are immutable once appended; there is no retraction. The
//! ledger also maintains a running per-identity tally so the voter
//! leaderboard never rescans the full log.

use crate::error::RankingError;
use crate::types::{CompanyId, VoteRecord};
use crate::utils::current_timestamp;
use std::collections::HashMap;
use std::sync::RwLock;

/// Vote data as produced by the ELO updater, before the ledger assigns an id
#[derive(Debug, Clone)]
pub struct NewVote {
    pub winner_id: CompanyId,
    pub loser_id: CompanyId,
    pub session_id: String,
    pub user_id: Option<String>,
    pub winner_elo_diff: i32,
    pub loser_elo_diff: i32,
}

/// Identity a vote is attributed to: the authenticated user when present,
/// otherwise the session label
pub fn voting_identity(user_id: Option<&str>, session_id: &str) -> String {
    match user_id {
        Some(user) if !user.is_empty() => user.to_string(),
        _ => session_id.to_string(),
    }
}

/// Trait for vote ledger operations
pub trait VoteLedger: Send + Sync {
    /// Append one immutable vote record
    fn append(&self, vote: NewVote) -> crate::error::Result<VoteRecord>;

    /// Total votes recorded
    fn count(&self) -> crate::error::Result<u64>;

    /// Votes cast per identity, in no particular order
    fn identity_tallies(&self) -> crate::error::Result<Vec<(String, u64)>>;
}

#[derive(Debug, Default)]
struct VoteLedgerInner {
    votes: Vec<VoteRecord>,
    tallies: HashMap<String, u64>,
    next_id: i64,
}

/// In-memory vote ledger implementation
#[derive(Debug, Default)]
pub struct InMemoryVoteLedger {
    inner: RwLock<VoteLedgerInner>,
}

impl InMemoryVoteLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }
}

impl VoteLedger for InMemoryVoteLedger {
    fn append(&self, vote: NewVote) -> crate::error::Result<VoteRecord> {
        let mut inner = self.inner.write().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire vote ledger write lock".to_string(),
        })?;

        inner.next_id += 1;
        let record = VoteRecord {
            id: inner.next_id,
            winner_id: vote.winner_id,
            loser_id: vote.loser_id,
            session_id: vote.session_id,
            user_id: vote.user_id,
            winner_elo_diff: vote.winner_elo_diff,
            loser_elo_diff: vote.loser_elo_diff,
            created_at: current_timestamp(),
        };

        let identity = voting_identity(record.user_id.as_deref(), &record.session_id);
        *inner.tallies.entry(identity).or_insert(0) += 1;
        inner.votes.push(record.clone());

        Ok(record)
    }

    fn count(&self) -> crate::error::Result<u64> {
        let inner = self.inner.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire vote ledger read lock".to_string(),
        })?;

        Ok(inner.votes.len() as u64)
    }

    fn identity_tallies(&self) -> crate::error::Result<Vec<(String, u64)>> {
        let inner = self.inner.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire vote ledger read lock".to_string(),
        })?;

        Ok(inner
            .tallies
            .iter()
            .map(|(identity, total)| (identity.clone(), *total))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vote(session: &str, user: Option<&str>) -> NewVote {
        NewVote {
            winner_id: 1,
            loser_id: 2,
            session_id: session.to_string(),
            user_id: user.map(str::to_string),
            winner_elo_diff: 16,
            loser_elo_diff: -16,
        }
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let ledger = InMemoryVoteLedger::new();

        let first = ledger.append(test_vote("s1", None)).unwrap();
        let second = ledger.append(test_vote("s1", None)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(ledger.count().unwrap(), 2);
    }

    #[test]
    fn test_identity_prefers_user_id() {
        assert_eq!(voting_identity(Some("user-7"), "sess-1"), "user-7");
        assert_eq!(voting_identity(None, "sess-1"), "sess-1");
        assert_eq!(voting_identity(Some(""), "sess-1"), "sess-1");
    }

    #[test]
    fn test_tallies_group_by_identity() {
        let ledger = InMemoryVoteLedger::new();

        ledger.append(test_vote("sess-1", None)).unwrap();
        ledger.append(test_vote("sess-1", None)).unwrap();
        ledger.append(test_vote("sess-2", Some("user-7"))).unwrap();
        ledger.append(test_vote("sess-3", Some("user-7"))).unwrap();

        let mut tallies = ledger.identity_tallies().unwrap();
        tallies.sort();

        assert_eq!(
            tallies,
            vec![("sess-1".to_string(), 2), ("user-7".to_string(), 2)]
        );
    }
}
