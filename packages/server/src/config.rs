use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Which backing collection the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// JSONB documents in Postgres (the default).
    Postgres,
    /// Process-local collection, for development without a database.
    Memory,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub store: StoreBackend,
}

impl Config {
    /// Read `DATABASE_URL`, `PORT`, and `STORE` from the environment,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let store = match env::var("STORE").ok().as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("postgres") | None => StoreBackend::Postgres,
            Some(other) => bail!("STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        // Only the memory backend can run without a connection string.
        let database_url = match store {
            StoreBackend::Postgres => Some(
                env::var("DATABASE_URL")
                    .context("DATABASE_URL must be set (or run with STORE=memory)")?,
            ),
            StoreBackend::Memory => env::var("DATABASE_URL").ok(),
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a valid number")?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url,
            port,
            store,
        })
    }
}
