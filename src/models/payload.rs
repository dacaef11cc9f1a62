//! Raw records as returned by the GitHub REST API, plus the combined
//! payload handed from the data source to the aggregator.
//!
//! Counts are read leniently: `null`, missing, negative or non-numeric
//! values all become `0` so nothing downstream ever sums garbage.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubUser {
    #[serde(default)]
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub followers: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub following: u64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub forks_count: u64,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    Other,
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issues,
            _ => EventKind::Other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub created_at: String,
    /// Shape depends on `event_type`, so it stays untyped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self.event_type.as_str())
    }

    /// Number of commit descriptors carried by a push event, 0 otherwise.
    pub fn push_commit_count(&self) -> u64 {
        if self.kind() != EventKind::Push {
            return 0;
        }
        self.payload
            .as_ref()
            .and_then(|p| p.get("commits"))
            .and_then(Value::as_array)
            .map(|commits| commits.len() as u64)
            .unwrap_or(0)
    }
}

/// Everything the aggregator needs for one user, fully resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPayload {
    pub user: Option<GitHubUser>,
    #[serde(default)]
    pub repos: Vec<Repository>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(
        rename = "totalCommits",
        default,
        deserialize_with = "lenient_count"
    )]
    pub total_commits: u64,
}

impl RawPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a payload previously saved as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(count_from_value).unwrap_or(0))
}

/// Coerce an arbitrary JSON value into a non-negative count.
pub fn count_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map(|f| f.floor() as u64)
                .unwrap_or(0)
        }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| f.floor() as u64)
            .unwrap_or(0),
        _ => 0,
    }
}
