use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const USER_AGENT: &str = "Applify/1.0";

/// Search requests give up after this long.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);
/// Posting pages are best effort and get a shorter leash.
pub const POSTING_TIMEOUT: Duration = Duration::from_secs(12);

/// Secret files checked at startup, in order. Variables already present in
/// the environment always win.
const DOTENV_PATHS: [&str; 2] = ["/etc/secrets/.env", ".env"];

/// Settings for the job search API.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            timeout: SEARCH_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Settings for the optional resume scorer.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<SecretString>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            organization: None,
            project: None,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// Search credentials are not kept here. They are resolved per call by
/// a [`crate::credentials::CredentialSource`].
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let search = SearchConfig {
            base_url: env_or("ADZUNA_BASE_URL", DEFAULT_SEARCH_BASE_URL),
            timeout: match optional_env("APPLIFY_SEARCH_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.parse::<u64>()
                        .context("APPLIFY_SEARCH_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => SEARCH_TIMEOUT,
            },
            user_agent: USER_AGENT.to_string(),
        };

        let llm = LlmConfig {
            base_url: env_or("OPENAI_BASE_URL", DEFAULT_LLM_BASE_URL),
            model: env_or("OPENAI_MODEL", DEFAULT_LLM_MODEL),
            api_key: optional_env("OPENAI_API_KEY").map(SecretString::from),
            organization: optional_env("OPENAI_ORG_ID"),
            project: optional_env("OPENAI_PROJECT"),
            ..LlmConfig::default()
        };

        Ok(Self { search, llm })
    }
}

/// Load the optional secret files without overriding anything already set.
pub fn load_dotenv_files() {
    for path in DOTENV_PATHS {
        let path = Path::new(path);
        if !path.exists() {
            continue;
        }
        match dotenvy::from_path(path) {
            Ok(()) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("Skipping {}: {}", path.display(), e),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
