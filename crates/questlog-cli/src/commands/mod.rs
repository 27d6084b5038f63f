//! Subcommand implementations. Each `run` opens what it needs, performs
//! one action and prints JSON to stdout.

pub mod auth;
pub mod coach;
pub mod config;
pub mod habit;
pub mod stats;
pub mod task;

use chrono::{Local, NaiveDate};
use questlog_core::{Coach, Config, Database, GeminiClient, Store};

/// The local calendar day, which drives habit rollover.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Open the persisted store, rolled over to today.
pub fn open_store() -> Result<Store<Database>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    Ok(Store::load_with(db, today(), config.habits))
}

/// Build a coach from configuration. Without a usable client every
/// request answers with its fallback.
pub fn open_coach(config: &Config) -> Coach<GeminiClient> {
    match GeminiClient::from_config(&config.assistant) {
        Ok(client) => Coach::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "assistant unavailable, using fallbacks");
            Coach::disabled()
        }
    }
}

/// Run a future to completion on a single-threaded runtime.
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
