//! Shared fixtures for integration tests

use podium::config::EngineSettings;
use podium::engine::RankingEngine;
use podium::types::{NewCompany, VoteRequest};

/// Build a catalog entry for tests
pub fn test_company(slug: &str, category: &str) -> NewCompany {
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

/// Build an in-memory engine seeded with the given (slug, category) pairs,
/// returning the engine and the assigned company ids in order
pub fn engine_with_companies(specs: &[(&str, &str)]) -> (RankingEngine, Vec<i64>) {
    let engine = RankingEngine::in_memory(EngineSettings::default()).unwrap();

    let ids = specs
        .iter()
        .map(|(slug, category)| {
            engine
                .add_company(test_company(slug, category))
                .unwrap()
                .id
        })
        .collect();

    (engine, ids)
}

/// Build a vote request attributed to the given session
pub fn vote(winner_id: i64, loser_id: i64, session_id: &str) -> VoteRequest {
    VoteRequest {
        winner_id,
        loser_id,
        session_id: session_id.to_string(),
        user_id: None,
    }
}
