use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::list_fetcher::ListFetcher;
use crate::github::source::DataSource;
use crate::models::{Event, GitHubUser, Repository};

const PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&format!("gitwrapped/{}", env!("CARGO_PKG_VERSION")))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DataSource for GitHubClient {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch user {}: {} - {}",
                username, status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?sort=updated", self.base_url, username);
        tracing::info!("Fetching repositories for: {}", username);
        ListFetcher::new(&self.client)
            .fetch_first_page(&url, PAGE_SIZE, "repositories")
            .await
    }

    async fn fetch_public_events(&self, username: &str) -> Result<Vec<Event>> {
        let url = format!("{}/users/{}/events/public", self.base_url, username);
        tracing::info!("Fetching public events for: {}", username);
        ListFetcher::new(&self.client)
            .fetch_first_page(&url, PAGE_SIZE, "events")
            .await
    }

    async fn fetch_commit_count(&self, owner: &str, repo: &str) -> Result<u64> {
        let url = format!("{}/repos/{}/{}/commits", self.base_url, owner, repo);
        tracing::debug!("Counting commits for: {}/{}", owner, repo);
        ListFetcher::new(&self.client).count_items(&url).await
    }
}
