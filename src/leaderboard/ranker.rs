//! Ranking primitives for the leaderboards
//!
//! Companies are ordered by elo descending, then total votes descending,
//! then id ascending. The final key makes the order total, so pagination
//! never duplicates or skips a row across stable reads.

use crate::config::EngineSettings;
use crate::store::company::CompanyRecord;
use crate::types::{CategoryCount, CompanyId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Normalized 1-based pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub page_size: u32,
}

impl PageParams {
    /// Normalize caller-supplied values: page 0 becomes 1, a page size of 0
    /// or beyond the maximum falls back to the default.
    pub fn normalize(page: u32, page_size: u32, settings: &EngineSettings) -> Self {
        let page = page.max(1);
        let page_size = if page_size == 0 || page_size > settings.max_page_size {
            settings.default_page_size
        } else {
            page_size
        };

        Self { page, page_size }
    }

    /// Zero-based offset of the first row on this page
    pub fn offset(&self) -> usize {
        ((self.page - 1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// Deterministic total order over companies
pub fn company_order(a: &CompanyRecord, b: &CompanyRecord) -> Ordering {
    b.elo_rating
        .total_cmp(&a.elo_rating)
        .then_with(|| b.total_votes.cmp(&a.total_votes))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort companies into leaderboard order
pub fn sort_companies(records: &mut [CompanyRecord]) {
    records.sort_by(company_order);
}

/// Take one page out of a sorted slice; past-the-end pages come back empty
/// while the total stays accurate
pub fn paginate<T: Clone>(items: &[T], params: PageParams) -> (Vec<T>, u64) {
    let total_count = items.len() as u64;
    let page = items
        .iter()
        .skip(params.offset())
        .take(params.page_size as usize)
        .cloned()
        .collect();

    (page, total_count)
}

/// 1-based position of a company in the sorted slice
pub fn global_rank(sorted: &[CompanyRecord], id: CompanyId) -> Option<u32> {
    sorted
        .iter()
        .position(|record| record.id == id)
        .map(|index| index as u32 + 1)
}

/// Distinct categories with member counts, most populous first, ties by name
pub fn category_counts(records: &[CompanyRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *counts.entry(record.category.as_str()).or_insert(0) += 1;
    }

    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();

    categories.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });

    categories
}

/// Sorted distinct category names
pub fn distinct_categories(records: &[CompanyRecord]) -> Vec<String> {
    let mut categories: Vec<String> = records.iter().map(|r| r.category.clone()).collect();
    categories.sort();
    categories.dedup();

    categories
}

/// Order voting identities by votes cast descending, ties by identity
/// ascending
pub fn rank_identities(mut tallies: Vec<(String, u64)>) -> Vec<(String, u64)> {
    tallies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tallies
}
