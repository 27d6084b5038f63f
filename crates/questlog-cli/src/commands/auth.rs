use clap::Subcommand;
use questlog_core::assistant::{keyring_store, resolve_api_key, API_KEY_ENTRY};
use questlog_core::Config;
use serde_json::json;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the assistant API key in the OS keyring
    SetKey {
        /// API key
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show whether an API key is available
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                return Err("API key is empty".into());
            }
            keyring_store::set(API_KEY_ENTRY, key)?;
            println!("API key stored");
        }
        AuthAction::Clear => {
            keyring_store::delete(API_KEY_ENTRY)?;
            println!("API key removed");
        }
        AuthAction::Status => {
            let config = Config::load_or_default();
            let env_var = &config.assistant.api_key_env;
            let out = json!({
                "enabled": config.assistant.enabled,
                "model": config.assistant.model,
                "env_var": env_var,
                "env_key_set": std::env::var(env_var).is_ok_and(|v| !v.trim().is_empty()),
                "key_available": resolve_api_key(env_var).is_ok(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
