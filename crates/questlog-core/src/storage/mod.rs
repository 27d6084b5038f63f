mod config;
pub mod database;
pub mod kv;

pub use config::{AssistantConfig, Config, HabitsConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the directory holding `questlog.db` and `config.toml`.
///
/// `QUESTLOG_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/questlog[-dev]/`, with `QUESTLOG_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("QUESTLOG_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("QUESTLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("questlog-dev")
            } else {
                base_dir.join("questlog")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
