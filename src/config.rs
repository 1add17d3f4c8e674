//! Process configuration, read once from the environment at startup and
//! passed by reference into the collaborators that need it.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::fetch::DEFAULT_READER_URL;

/// Model used for every generation call unless GEMINI_MODEL overrides it.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub serpapi_key: String,
    pub gemini_model: String,
    pub reader_url: String,
    pub reports_dir: PathBuf,
}

impl Config {
    /// Build from the environment. Every missing key is reported in one
    /// error.
    pub fn from_env(reports_dir: PathBuf) -> Result<Self> {
        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let serpapi_key = env::var("SERPAPI_KEY").unwrap_or_default();

        let mut missing = Vec::new();
        if gemini_api_key.is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        if serpapi_key.is_empty() {
            missing.push("SERPAPI_KEY");
        }
        if !missing.is_empty() {
            bail!(
                "missing API keys: {}. Set them in the environment or a .env file. \
                 Free keys: Gemini at https://aistudio.google.com/apikey, \
                 SerpAPI at https://serpapi.com",
                missing.join(", ")
            );
        }

        Ok(Self {
            gemini_api_key,
            serpapi_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            reader_url: env::var("READER_URL").unwrap_or_else(|_| DEFAULT_READER_URL.to_string()),
            reports_dir,
        })
    }
}
