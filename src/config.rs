//! Startup configuration: the single provider credential.

use crate::error::{NanoBananaError, Result};

/// Immutable configuration resolved once at startup.
///
/// The environment is read here and nowhere else; the client receives the
/// key explicitly instead of reaching for env vars mid-request.
#[derive(Debug, Clone)]
pub struct Config {
    api_key: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// A `.env` file in the working directory is applied first when present,
    /// as an alternative to exporting the variable. An unset or empty
    /// `GOOGLE_API_KEY` is a fatal error.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(NanoBananaError::MissingApiKey)?;

        Ok(Self { api_key })
    }

    /// Returns the provider API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
