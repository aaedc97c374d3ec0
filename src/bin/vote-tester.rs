//! Vote Tester CLI Tool
//!
//! In-process load simulator for the ranking engine: fires many concurrent
//! votes at a shared company pool, then checks that every counter was
//! conserved and prints the resulting leaderboard.
//!
//! Usage:
//!   cargo run --bin vote-tester -- --companies 8 --votes 500 --workers 8
//!   cargo run --bin vote-tester -- --seed-file seed/companies.json --votes 1000

use anyhow::{anyhow, Result};
use clap::Parser;
use podium::config::EngineSettings;
use podium::engine::RankingEngine;
use podium::store::{apply_seed, load_seed_file};
use podium::types::{NewCompany, VoteRequest};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "vote-tester")]
#[command(about = "Concurrent vote simulator for the podium ranking engine")]
struct Cli {
    /// Number of synthetic companies to create when no seed file is given
    #[arg(long, default_value = "8")]
    companies: usize,

    /// Total number of votes to submit
    #[arg(long, default_value = "500")]
    votes: usize,

    /// Number of concurrent voting workers
    #[arg(long, default_value = "8")]
    workers: usize,

    /// Optional JSON seed catalog instead of synthetic companies
    #[arg(long, value_name = "FILE")]
    seed_file: Option<PathBuf>,

    /// Restrict matchups to one category
    #[arg(long)]
    category: Option<String>,
}

fn synthetic_companies(count: usize) -> Vec<NewCompany> {
    let categories = ["infrastructure", "devtools", "fintech", "security"];

    (1..=count)
        .map(|i| NewCompany {
            name: format!("Company {i}"),
            slug: format!("company-{i}"),
            category: categories[i % categories.len()].to_string(),
            tags: vec![],
            logo_url: None,
            description: None,
            website: None,
            founded_year: None,
            hq_location: None,
            employee_range: None,
            funding_stage: None,
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let engine = Arc::new(RankingEngine::in_memory(EngineSettings::default())?);

    let catalog = match &cli.seed_file {
        Some(path) => load_seed_file(path)?,
        None => synthetic_companies(cli.companies),
    };
    let seeded = apply_seed(engine.company_store().as_ref(), catalog)?;
    println!("Seeded {seeded} companies");

    if seeded < 2 {
        return Err(anyhow!("need at least 2 companies to run the simulation"));
    }

    let votes_per_worker = cli.votes / cli.workers.max(1);
    println!(
        "Running {} workers x {} votes each...",
        cli.workers, votes_per_worker
    );

    let mut handles = Vec::new();
    for worker in 0..cli.workers {
        let engine = engine.clone();
        let category = cli.category.clone();
        let session_id = Uuid::new_v4().to_string();

        handles.push(tokio::spawn(async move {
            let mut submitted = 0usize;
            let mut failed = 0usize;

            for _ in 0..votes_per_worker {
                let matchup = match engine.get_matchup(category.as_deref()) {
                    Ok(m) => m,
                    Err(_) => {
                        failed += 1;
                        continue;
                    }
                };

                let (winner_id, loser_id) = if rand::random::<bool>() {
                    (matchup.company1.id, matchup.company2.id)
                } else {
                    (matchup.company2.id, matchup.company1.id)
                };

                match engine.submit_vote(VoteRequest {
                    winner_id,
                    loser_id,
                    session_id: session_id.clone(),
                    user_id: None,
                }) {
                    Ok(_) => submitted += 1,
                    Err(_) => failed += 1,
                }
            }

            (worker, submitted, failed)
        }));
    }

    let mut total_submitted = 0usize;
    let mut total_failed = 0usize;
    for handle in handles {
        let (worker, submitted, failed) = handle.await?;
        println!("  worker {worker}: {submitted} submitted, {failed} failed");
        total_submitted += submitted;
        total_failed += failed;
    }

    // Conservation checks: every committed vote must be visible in the
    // ledger and in exactly two companies' counters, and the rating pool
    // must still sum to the seeded total.
    let stats = engine.get_stats()?;
    if stats.total_votes != total_submitted as u64 {
        return Err(anyhow!(
            "vote ledger mismatch: {} committed but {} recorded",
            total_submitted,
            stats.total_votes
        ));
    }

    let companies = engine.list_companies(None, None)?;
    let mut participant_votes = 0u64;
    let mut rating_sum = 0.0f64;
    for company in &companies {
        if company.wins + company.losses != company.total_votes {
            return Err(anyhow!(
                "counter mismatch on '{}': {} wins + {} losses != {} total",
                company.slug,
                company.wins,
                company.losses,
                company.total_votes
            ));
        }
        participant_votes += company.total_votes;
        rating_sum += company.elo_rating;
    }

    if participant_votes != 2 * total_submitted as u64 {
        return Err(anyhow!(
            "participation mismatch: {} committed votes but {} participations",
            total_submitted,
            participant_votes
        ));
    }

    let expected_sum = 1500.0 * companies.len() as f64;
    if (rating_sum - expected_sum).abs() > 1e-6 {
        return Err(anyhow!(
            "rating pool drifted: sum {} expected {}",
            rating_sum,
            expected_sum
        ));
    }

    println!("\n✅ Conservation checks passed ({total_submitted} votes, {total_failed} failures)");

    println!("\nLeaderboard:");
    let board = engine.get_leaderboard(cli.category.as_deref(), 1, 10)?;
    for company in &board.companies {
        println!(
            "  #{:<3} {:<20} {:>7.1} elo  {:>4}W {:>4}L",
            company.rank, company.slug, company.elo_rating, company.wins, company.losses
        );
    }

    Ok(())
}
