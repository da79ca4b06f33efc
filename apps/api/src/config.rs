use anyhow::{Context, Result};

/// Base URL of the inference Space used when SPACE_URL is not set.
const DEFAULT_SPACE_URL: &str = "https://markobinario-chatbot.hf.space";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so the service starts with no configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub space_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let space_url = std::env::var("SPACE_URL")
            .unwrap_or_else(|_| DEFAULT_SPACE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            space_url,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
