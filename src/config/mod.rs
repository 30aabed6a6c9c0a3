use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Origin used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Public portfolio used when `PORTFOLIO_URL` is not set.
pub const DEFAULT_PORTFOLIO_URL: &str = "http://localhost:5173";

pub const DEFAULT_LOG_FILE: &str = "portfolio-admin.log";

/// Raw environment variables, before defaults are applied
#[derive(Debug, Default, Deserialize)]
struct EnvConfig {
    api_url: Option<String>,
    portfolio_url: Option<String>,
    log_file: Option<PathBuf>,
    portfolio_name: Option<String>,
    portfolio_title: Option<String>,
    portfolio_bio: Option<String>,
    portfolio_email: Option<String>,
    portfolio_phone: Option<String>,
    portfolio_linkedin: Option<String>,
    portfolio_github: Option<String>,
}

/// Owner details shown on the settings page for reference. They are never
/// sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "ADOBOE Comlan Julien".to_string(),
            title: "Manager digital & Développeur".to_string(),
            bio: "Passionné par le développement web et le management de projets digitaux, \
                  je transforme les idées en solutions digitales innovantes."
                .to_string(),
            email: "julien.adoboe@example.com".to_string(),
            phone: "+228 XX XX XX XX".to_string(),
            linkedin: None,
            github: None,
        }
    }
}

impl Profile {
    fn from_env(env: &mut EnvConfig) -> Self {
        let defaults = Self::default();
        let set = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            name: set(env.portfolio_name.take()).unwrap_or(defaults.name),
            title: set(env.portfolio_title.take()).unwrap_or(defaults.title),
            bio: set(env.portfolio_bio.take()).unwrap_or(defaults.bio),
            email: set(env.portfolio_email.take()).unwrap_or(defaults.email),
            phone: set(env.portfolio_phone.take()).unwrap_or(defaults.phone),
            linkedin: set(env.portfolio_linkedin.take()),
            github: set(env.portfolio_github.take()),
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, normalized (no trailing slash, no `/api` suffix)
    pub api_url: String,
    /// Public portfolio site, shown on the settings page
    pub portfolio_url: String,
    /// Where the TUI writes its log
    pub log_file: PathBuf,
    /// Reference details for the settings page
    pub profile: Profile,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    /// 3. Apply defaults and normalize the API origin
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let env = envy::from_env::<EnvConfig>()?;

        Ok(Self::from_env(env))
    }

    fn from_env(mut env: EnvConfig) -> Self {
        let profile = Profile::from_env(&mut env);
        let api_url = env
            .api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url: normalize_base_url(&api_url),
            portfolio_url: env
                .portfolio_url
                .unwrap_or_else(|| DEFAULT_PORTFOLIO_URL.to_string()),
            log_file: env.log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            profile,
        }
    }

    /// Replace the API origin, e.g. from a command line flag
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }

    /// Link to the backend's Swagger documentation
    pub fn docs_url(&self) -> String {
        format!("{}/api/docs", self.api_url)
    }
}

/// Strip trailing slashes and an accidental `/api` suffix from an origin.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .to_string()
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
