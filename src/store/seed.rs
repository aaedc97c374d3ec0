//! Seed catalog loading
//!
//! Company creation and maintenance belong to an external catalog process;
//! this module only loads an initial catalog from a JSON file at startup so
//! a fresh in-memory store has something to rank.

use crate::store::company::CompanyStore;
use crate::types::NewCompany;
use anyhow::Context;
use std::path::Path;
use tracing::{info, warn};

/// Load a seed catalog from a JSON file (an array of catalog entries)
pub fn load_seed_file(path: &Path) -> crate::error::Result<Vec<NewCompany>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let companies: Vec<NewCompany> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    Ok(companies)
}

/// Insert seed entries into the store, skipping duplicates. Returns the
/// number of companies actually inserted.
pub fn apply_seed(
    store: &dyn CompanyStore,
    companies: Vec<NewCompany>,
) -> crate::error::Result<usize> {
    let mut inserted = 0;

    for company in companies {
        let slug = company.slug.clone();
        match store.insert(company) {
            Ok(record) => {
                inserted += 1;
                info!(
                    "Seeded company '{}' ({}) in category '{}'",
                    record.name, record.slug, record.category
                );
            }
            Err(e) => {
                warn!("Skipping seed entry '{}': {}", slug, e);
            }
        }
    }

    Ok(inserted)
}
