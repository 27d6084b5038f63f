//! Text-generation service used for motivational copy, task breakdowns
//! and productivity tips.
//!
//! The service is an opaque request/response collaborator behind
//! [`TextGenerator`]. [`Coach`] builds the prompts and turns every
//! failure into a fixed fallback value, so callers never see an error.

pub mod coach;
pub mod gate;
pub mod gemini;

pub use coach::{
    Coach, MotivationInput, TipTopic, MOTIVATION_FALLBACK, TIP_FALLBACK,
};
pub use gate::{Latest, RequestGate, Ticket};
pub use gemini::GeminiClient;

use std::future::Future;

use crate::error::AssistantError;

/// A single prompt sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Ask the service for a JSON document instead of prose.
    pub json: bool,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json: false,
        }
    }

    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json: true,
        }
    }
}

/// Anything that can turn a prompt into text.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// Keyring entry holding the service API key.
pub const API_KEY_ENTRY: &str = "gemini_api_key";

/// Find the API key: the named environment variable first, then the OS
/// keyring.
pub fn resolve_api_key(env_var: &str) -> Result<String, AssistantError> {
    if let Ok(key) = std::env::var(env_var) {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }
    match keyring_store::get(API_KEY_ENTRY) {
        Ok(Some(key)) if !key.trim().is_empty() => Ok(key),
        Ok(_) => Err(AssistantError::MissingApiKey {
            env_var: env_var.to_string(),
        }),
        Err(e) => {
            tracing::debug!(error = %e, "keyring lookup failed");
            Err(AssistantError::MissingApiKey {
                env_var: env_var.to_string(),
            })
        }
    }
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    use crate::error::AssistantError;

    const SERVICE: &str = "questlog";

    pub fn get(key: &str) -> Result<Option<String>, AssistantError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), AssistantError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), AssistantError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
