//! Company storage interface and implementations
//!
//! This module defines the interface for persisting companies and their
//! mutable rating state. Rating mutations go through `commit_pair`, a
//! version-checked compare-and-swap over both sides of a vote, so concurrent
//! votes can never lose an update.

use crate::error::RankingError;
use crate::types::{Company, CompanyId, NewCompany};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::RwLock;

/// Stored company row with its optimistic-concurrency version counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
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
    pub wins: u64,
    pub losses: u64,
    pub total_votes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every committed mutation; never exposed outside the store layer
    pub version: u64,
}

impl CompanyRecord {
    /// Create a fresh record from a catalog entry
    pub fn new(id: CompanyId, company: NewCompany, initial_rating: f64) -> Self {
        let now = current_timestamp();
        Self {
            id,
            name: company.name,
            slug: company.slug,
            category: company.category,
            tags: company.tags,
            logo_url: company.logo_url,
            description: company.description,
            website: company.website,
            founded_year: company.founded_year,
            hq_location: company.hq_location,
            employee_range: company.employee_range,
            funding_stage: company.funding_stage,
            elo_rating: initial_rating,
            wins: 0,
            losses: 0,
            total_votes: 0,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Public view of this record with the given 1-based rank (0 = unranked)
    pub fn to_company(&self, rank: u32) -> Company {
        Company {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            logo_url: self.logo_url.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            founded_year: self.founded_year,
            hq_location: self.hq_location.clone(),
            employee_range: self.employee_range.clone(),
            funding_stage: self.funding_stage.clone(),
            elo_rating: self.elo_rating,
            total_votes: self.total_votes,
            wins: self.wins,
            losses: self.losses,
            rank,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Apply a won vote: rating delta plus win/total counters
    pub fn apply_win(&mut self, elo_diff: i32) {
        self.elo_rating += f64::from(elo_diff);
        self.wins += 1;
        self.total_votes += 1;
        self.updated_at = current_timestamp();
    }

    /// Apply a lost vote: rating delta plus loss/total counters
    pub fn apply_loss(&mut self, elo_diff: i32) {
        self.elo_rating += f64::from(elo_diff);
        self.losses += 1;
        self.total_votes += 1;
        self.updated_at = current_timestamp();
    }
}

/// Trait for company storage operations
pub trait CompanyStore: Send + Sync {
    /// Insert a new company; fails when the slug is already taken
    fn insert(&self, company: NewCompany) -> crate::error::Result<CompanyRecord>;

    /// Get a company by id
    fn get(&self, id: CompanyId) -> crate::error::Result<Option<CompanyRecord>>;

    /// Get a company by slug
    fn get_by_slug(&self, slug: &str) -> crate::error::Result<Option<CompanyRecord>>;

    /// List companies, optionally restricted to one category
    fn list(&self, category: Option<&str>) -> crate::error::Result<Vec<CompanyRecord>>;

    /// Total number of companies
    fn count(&self) -> crate::error::Result<usize>;

    /// Atomically store both sides of a vote if neither changed since they
    /// were read. Returns `false` when either version is stale; the caller
    /// re-reads and retries.
    fn commit_pair(
        &self,
        first: CompanyRecord,
        second: CompanyRecord,
    ) -> crate::error::Result<bool>;
}

/// In-memory company storage implementation
#[derive(Debug)]
pub struct InMemoryCompanyStore {
    companies: RwLock<HashMap<CompanyId, CompanyRecord>>,
    next_id: AtomicI64,
    initial_rating: f64,
}

impl InMemoryCompanyStore {
    /// Create a new in-memory company store
    pub fn new(initial_rating: f64) -> Self {
        Self {
            companies: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            initial_rating,
        }
    }
}

impl Default for InMemoryCompanyStore {
    fn default() -> Self {
        Self::new(1500.0)
    }
}

impl CompanyStore for InMemoryCompanyStore {
    fn insert(&self, company: NewCompany) -> crate::error::Result<CompanyRecord> {
        let mut companies = self.companies.write().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire companies write lock".to_string(),
        })?;

        if companies.values().any(|c| c.slug == company.slug) {
            return Err(RankingError::InvalidArgument {
                reason: format!("slug '{}' already exists", company.slug),
            }
            .into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = CompanyRecord::new(id, company, self.initial_rating);
        companies.insert(id, record.clone());

        Ok(record)
    }

    fn get(&self, id: CompanyId) -> crate::error::Result<Option<CompanyRecord>> {
        let companies = self.companies.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire companies read lock".to_string(),
        })?;

        Ok(companies.get(&id).cloned())
    }

    fn get_by_slug(&self, slug: &str) -> crate::error::Result<Option<CompanyRecord>> {
        let companies = self.companies.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire companies read lock".to_string(),
        })?;

        Ok(companies.values().find(|c| c.slug == slug).cloned())
    }

    fn list(&self, category: Option<&str>) -> crate::error::Result<Vec<CompanyRecord>> {
        let companies = self.companies.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire companies read lock".to_string(),
        })?;

        let records = companies
            .values()
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .cloned()
            .collect();

        Ok(records)
    }

    fn count(&self) -> crate::error::Result<usize> {
        let companies = self.companies.read().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire companies read lock".to_string(),
        })?;

        Ok(companies.len())
    }

    fn commit_pair(
        &self,
        mut first: CompanyRecord,
        mut second: CompanyRecord,
    ) -> crate::error::Result<bool> {
        if first.id == second.id {
            return Err(RankingError::InvalidArgument {
                reason: "commit_pair requires two distinct companies".to_string(),
            }
            .into());
        }

        let mut companies = self.companies.write().map_err(|_| RankingError::Unavailable {
            message: "Failed to acquire companies write lock".to_string(),
        })?;

        let stale = |record: &CompanyRecord| match companies.get(&record.id) {
            Some(current) => current.version != record.version,
            None => true,
        };

        if stale(&first) || stale(&second) {
            return Ok(false);
        }

        first.version += 1;
        second.version += 1;
        companies.insert(first.id, first);
        companies.insert(second.id, second);

        Ok(true)
    }
}

/// Mock company store for testing; can be primed to reject commits so the
/// caller's retry path is exercised
#[derive(Debug, Default)]
pub struct MockCompanyStore {
    inner: InMemoryCompanyStore,
    fail_next_commits: AtomicU32,
    commit_attempts: AtomicU32,
}

impl MockCompanyStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCompanyStore::default(),
            fail_next_commits: AtomicU32::new(0),
            commit_attempts: AtomicU32::new(0),
        }
    }

    /// Force the next `n` commit attempts to report a version conflict
    pub fn fail_next_commits(&self, n: u32) {
        self.fail_next_commits.store(n, Ordering::SeqCst);
    }

    /// Number of commit attempts made (for testing)
    pub fn commit_attempts(&self) -> u32 {
        self.commit_attempts.load(Ordering::SeqCst)
    }
}

impl CompanyStore for MockCompanyStore {
    fn insert(&self, company: NewCompany) -> crate::error::Result<CompanyRecord> {
        self.inner.insert(company)
    }

    fn get(&self, id: CompanyId) -> crate::error::Result<Option<CompanyRecord>> {
        self.inner.get(id)
    }

    fn get_by_slug(&self, slug: &str) -> crate::error::Result<Option<CompanyRecord>> {
        self.inner.get_by_slug(slug)
    }

    fn list(&self, category: Option<&str>) -> crate::error::Result<Vec<CompanyRecord>> {
        self.inner.list(category)
    }

    fn count(&self) -> crate::error::Result<usize> {
        self.inner.count()
    }

    fn commit_pair(
        &self,
        first: CompanyRecord,
        second: CompanyRecord,
    ) -> crate::error::Result<bool> {
        self.commit_attempts.fetch_add(1, Ordering::SeqCst);

        let remaining = self.fail_next_commits.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next_commits.store(remaining - 1, Ordering::SeqCst);
            return Ok(false);
        }

        self.inner.commit_pair(first, second)
    }
}
