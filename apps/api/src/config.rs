use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres document store. Unset means the non-persistent in-memory store.
    pub database_url: Option<String>,
    pub gemini_api_key: String,
    pub admin_email: String,
    pub admin_password: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout: Duration,
    /// Unset means the chat context is cached for the life of the process.
    pub context_cache_ttl: Option<Duration>,
    pub owner: OwnerProfile,
}

/// Static facts about the site owner, used in chat prompts and the fallback
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub github: String,
}

impl Default for OwnerProfile {
    fn default() -> Self {
        Self {
            name: "Sanjay Ram".to_string(),
            title: "Full Stack Developer".to_string(),
            location: "Salem, Tamil Nadu".to_string(),
            email: "j.sanjayramjs@gmail.com".to_string(),
            github: "https://github.com/JSanjayram".to_string(),
        }
    }
}

impl OwnerProfile {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env_or("OWNER_NAME", defaults.name),
            title: env_or("OWNER_TITLE", defaults.title),
            location: env_or("OWNER_LOCATION", defaults.location),
            email: env_or("OWNER_EMAIL", defaults.email),
            github: env_or("OWNER_GITHUB", defaults.github),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok(),
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            admin_email: require_env("ADMIN_EMAIL")?,
            admin_password: require_env("ADMIN_PASSWORD")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(
                std::env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            context_cache_ttl: std::env::var("CONTEXT_CACHE_TTL_SECS")
                .ok()
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("CONTEXT_CACHE_TTL_SECS must be a whole number of seconds")?,
            owner: OwnerProfile::from_env(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
