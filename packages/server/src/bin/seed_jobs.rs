use std::sync::Arc;

use anyhow::{Context, Result};
use board_core::domains::jobs::{JobDraft, JobStore};
use board_core::store::PgCollection;
use board_core::{Config, StoreBackend};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
struct SeedData {
    jobs: Vec<JobDraft>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    if config.store == StoreBackend::Memory {
        anyhow::bail!("STORE=memory has nothing to seed; point DATABASE_URL at postgres");
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Could not connect to Postgres")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Migration run failed")?;

    println!("✓ Connected, migrations applied");

    let store = JobStore::new(Arc::new(PgCollection::new(pool)));

    // A board that is already populated is left alone
    let existing = store.list_all().await?;
    if !existing.is_empty() {
        println!(
            "Board already has {} postings, nothing to do",
            existing.len()
        );
        return Ok(());
    }

    let json_data = std::fs::read_to_string("data/jobs_seed.json")
        .context("Could not read data/jobs_seed.json")?;
    let seed_data: SeedData =
        serde_json::from_str(&json_data).context("jobs_seed.json is not valid JSON")?;

    println!("✓ Loaded {} postings from JSON", seed_data.jobs.len());
    println!("\n🚀 Seeding the board...\n");

    let mut posted = 0;

    for (idx, draft) in seed_data.jobs.iter().enumerate() {
        println!(
            "[{}/{}] {} at {}",
            idx + 1,
            seed_data.jobs.len(),
            draft.job_title,
            draft.company_name
        );

        let created = store.create(draft).await?;
        println!("  ✓ id {}", created.id);
        posted += 1;
    }

    println!("\n✅ Done: {} postings on the board", posted);

    Ok(())
}
