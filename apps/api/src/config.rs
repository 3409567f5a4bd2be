use std::time::Duration;

use anyhow::{Context, Result};

use crate::career_break::sandbox::DEFAULT_NESSIE_BASE_URL;

/// Application configuration loaded from environment variables.
///
/// Every external source is optional: when its variable is unset the matching
/// live path is disabled and the deterministic fallback answers alone.
#[derive(Debug, Clone)]
pub struct Config {
    pub warehouse_url: Option<String>,
    pub redis_url: Option<String>,
    pub nessie_api_key: Option<String>,
    pub nessie_base_url: String,
    pub anthropic_api_key: Option<String>,
    /// Per-call deadline for warehouse, knowledge store, sandbox and coach calls.
    pub external_timeout: Duration,
    pub sandbox_pacing: Duration,
    pub simulation_budget: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warehouse_url: None,
            redis_url: None,
            nessie_api_key: None,
            nessie_base_url: DEFAULT_NESSIE_BASE_URL.to_string(),
            anthropic_api_key: None,
            external_timeout: Duration::from_secs(15),
            sandbox_pacing: Duration::from_millis(1000),
            simulation_budget: Duration::from_secs(60),
            port: 8000,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            warehouse_url: optional_env("WAREHOUSE_URL"),
            redis_url: optional_env("REDIS_URL"),
            nessie_api_key: optional_env("NESSIE_API_KEY"),
            nessie_base_url: optional_env("NESSIE_BASE_URL").unwrap_or(defaults.nessie_base_url),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            external_timeout: parse_env("EXTERNAL_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.external_timeout),
            sandbox_pacing: parse_env("SANDBOX_PACING_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.sandbox_pacing),
            simulation_budget: parse_env("SIMULATION_BUDGET_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.simulation_budget),
            port: parse_env("PORT")?
                .map(u16::try_from)
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env(key: &str) -> Result<Option<u64>> {
    optional_env(key)
        .map(|v| {
            v.parse::<u64>()
                .with_context(|| format!("Environment variable '{key}' must be a whole number"))
        })
        .transpose()
}
