//! Comment store with a serialized upvote counter
//!
//! Comments are append-only; the only mutation ever applied is the upvote
//! increment, which runs under the store write lock so concurrent upvotes
//! cannot be lost.

use crate::error::RankingError;
use crate::types::{Comment, CommentId, CompanyId};
use crate::utils::current_timestamp;
use std::collections::HashMap;
use std::sync::RwLock;

/// Comment data as validated by the engine, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewComment {
    pub company_id: CompanyId,
    pub content: String,
    pub is_current_employee: bool,
    pub session_id: String,
}

/// Trait for comment storage operations
pub trait CommentStore: Send + Sync {
    /// Store a new comment
    fn insert(&self, comment: NewComment) -> crate::error::Result<Comment>;

    /// Increment a comment's upvote counter; `None` for unknown ids
    fn upvote(&self, comment_id: CommentId) -> crate::error::Result<Option<Comment>>;

    /// Comments for one company, most recent first, capped at `limit`
    fn for_company(
        &self,
        company_id: CompanyId,
        limit: usize,
    ) -> crate::error::Result<Vec<Comment>>;

    /// Total comments stored
    fn count(&self) -> crate::error::Result<u64>;
}

#[derive(Debug, Default)]
struct CommentStoreInner {
    comments: HashMap<CommentId, Comment>,
    next_id: i64,
}

/// In-memory comment store implementation
#[derive(Debug, Default)]
pub struct InMemoryCommentStore {
    inner: RwLock<CommentStoreInner>,
}

impl InMemoryCommentStore {
    /// Create a new empty comment store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentStore for InMemoryCommentStore {
    fn insert(&self, comment: NewComment) -> crate::error::Result<Comment> {
        let mut inner = self.inner.write().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire comments write lock".to_string(),
        })?;

        inner.next_id += 1;
        let record = Comment {
            id: inner.next_id,
            company_id: comment.company_id,
            content: comment.content,
            is_current_employee: comment.is_current_employee,
            session_id: comment.session_id,
            upvotes: 0,
            created_at: current_timestamp(),
        };

        inner.comments.insert(record.id, record.clone());
        Ok(record)
    }

    fn upvote(&self, comment_id: CommentId) -> crate::error::Result<Option<Comment>> {
        let mut inner = self.inner.write().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire comments write lock".to_string(),
        })?;

        match inner.comments.get_mut(&comment_id) {
            Some(comment) => {
                comment.upvotes += 1;
                Ok(Some(comment.clone()))
            }
            None => Ok(None),
        }
    }

    fn for_company(
        &self,
        company_id: CompanyId,
        limit: usize,
    ) -> crate::error::Result<Vec<Comment>> {
        let inner = self.inner.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire comments read lock".to_string(),
        })?;

        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect();

        // Most recent first; id breaks timestamp ties deterministically
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        comments.truncate(limit);

        Ok(comments)
    }

    fn count(&self) -> crate::error::Result<u64> {
        let inner = self.inner.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire comments read lock".to_string(),
        })?;

        Ok(inner.comments.len() as u64)
    }
}
