use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_COMMIT_REPO_LIMIT: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub commit_repo_limit: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            commit_repo_limit: DEFAULT_COMMIT_REPO_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let commit_repo_limit = positive_setting(
            "COMMIT_REPO_LIMIT",
            env::var("COMMIT_REPO_LIMIT").ok().as_deref(),
            DEFAULT_COMMIT_REPO_LIMIT,
        )?;

        let request_timeout_secs = positive_setting(
            "REQUEST_TIMEOUT_SECS",
            env::var("REQUEST_TIMEOUT_SECS").ok().as_deref(),
            DEFAULT_REQUEST_TIMEOUT_SECS as usize,
        )? as u64;

        Ok(Self {
            api_url,
            commit_repo_limit,
            request_timeout_secs,
        })
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Unset falls back to `default`; anything set must be a positive integer.
fn positive_setting(name: &str, value: Option<&str>, default: usize) -> Result<usize> {
    match value {
        Some(v) => parse_positive(v).ok_or_else(|| {
            Error::Config(format!("{} must be a positive integer, got {:?}", name, v))
        }),
        None => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub commit_repo_limit: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            commit_repo_limit: DEFAULT_COMMIT_REPO_LIMIT,
            show_progress: false,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            commit_repo_limit: config.commit_repo_limit,
            show_progress: true,
        }
    }
}
