//! Matchup selection algorithms
//!
//! The shipped policy draws two distinct companies uniformly at random from
//! the eligible pool, then randomizes presentation order with a coin flip so
//! neither slot carries positional bias.

use crate::store::company::CompanyRecord;
use rand::seq::SliceRandom;
use rand::Rng;

/// Trait for matchup selection policies
pub trait MatchupSelector: Send + Sync {
    /// Draw two distinct companies from the pool, or `None` when the pool
    /// has fewer than two members. Every pool member must have non-zero
    /// selection probability.
    fn select_pair(&self, pool: &[CompanyRecord]) -> Option<(CompanyRecord, CompanyRecord)>;
}

/// Uniform random selection without replacement
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMatchupSelector;

impl RandomMatchupSelector {
    /// Create a new random selector
    pub fn new() -> Self {
        Self
    }
}

impl MatchupSelector for RandomMatchupSelector {
    fn select_pair(&self, pool: &[CompanyRecord]) -> Option<(CompanyRecord, CompanyRecord)> {
        if pool.len() < 2 {
            return None;
        }

        let mut rng = rand::thread_rng();
        let picked: Vec<&CompanyRecord> = pool.choose_multiple(&mut rng, 2).collect();

        let (mut first, mut second) = (picked[0].clone(), picked[1].clone());
        if rng.gen_bool(0.5) {
            std::mem::swap(&mut first, &mut second);
        }

        Some((first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewCompany;

    fn test_record(id: i64, slug: &str) -> CompanyRecord {
        CompanyRecord::new(
            id,
            NewCompany {
                name: slug.to_uppercase(),
                slug: slug.to_string(),
                category: "infrastructure".to_string(),
                tags: vec![],
                logo_url: None,
                description: None,
                website: None,
                founded_year: None,
                hq_location: None,
                employee_range: None,
                funding_stage: None,
            },
            1500.0,
        )
    }

    #[test]
    fn test_empty_and_single_pools_yield_nothing() {
        let selector = RandomMatchupSelector::new();

        assert!(selector.select_pair(&[]).is_none());
        assert!(selector.select_pair(&[test_record(1, "acme")]).is_none());
    }

    #[test]
    fn test_pair_is_always_distinct() {
        let selector = RandomMatchupSelector::new();
        let pool = vec![
            test_record(1, "acme"),
            test_record(2, "globex"),
            test_record(3, "initech"),
        ];

        for _ in 0..100 {
            let (first, second) = selector.select_pair(&pool).unwrap();
            assert_ne!(first.id, second.id);
        }
    }

    #[test]
    fn test_two_member_pool_returns_both() {
        let selector = RandomMatchupSelector::new();
        let pool = vec![test_record(1, "acme"), test_record(2, "globex")];

        let (first, second) = selector.select_pair(&pool).unwrap();
        let mut ids = [first.id, second.id];
        ids.sort_unstable();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_every_member_is_reachable() {
        let selector = RandomMatchupSelector::new();
        let pool: Vec<CompanyRecord> = (1..=4)
            .map(|i| test_record(i, &format!("company-{i}")))
            .collect();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let (first, second) = selector.select_pair(&pool).unwrap();
            seen.insert(first.id);
            seen.insert(second.id);
        }

        // With 200 draws over 4 companies, missing one is vanishingly unlikely
        assert_eq!(seen.len(), 4);
    }
}
