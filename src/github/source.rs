use async_trait::async_trait;
use futures::future::join_all;

use crate::error::Result;
use crate::models::{Event, GitHubUser, RawPayload, Repository};

/// Where raw profile data comes from. [`crate::GitHubClient`] talks to the
/// REST API; tests plug in canned data.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser>;

    /// Up to 100 repositories, most recently updated first.
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>>;

    /// Up to 100 of the most recent public events.
    async fn fetch_public_events(&self, username: &str) -> Result<Vec<Event>>;

    async fn fetch_commit_count(&self, owner: &str, repo: &str) -> Result<u64>;

    /// Sum of commit counts over the first `limit` repositories. Lookups that
    /// fail count as zero, so this never fails.
    async fn fetch_approximate_commit_count(
        &self,
        username: &str,
        repos: &[Repository],
        limit: usize,
    ) -> u64 {
        if repos.is_empty() || limit == 0 {
            return 0;
        }

        let lookups = repos.iter().take(limit).map(|repo| async move {
            match self.fetch_commit_count(username, &repo.name).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!("Failed to fetch commits for {}: {}", repo.name, e);
                    0
                }
            }
        });

        join_all(lookups).await.into_iter().sum()
    }

    /// User, repositories and events are fetched concurrently and the first
    /// failure among them aborts the whole fetch.
    async fn fetch_all_user_data(
        &self,
        username: &str,
        commit_repo_limit: usize,
    ) -> Result<RawPayload> {
        let (user, repos, events) = tokio::try_join!(
            self.fetch_user(username),
            self.fetch_repositories(username),
            self.fetch_public_events(username),
        )?;

        let total_commits = self
            .fetch_approximate_commit_count(username, &repos, commit_repo_limit)
            .await;

        Ok(RawPayload {
            user: Some(user),
            repos,
            events,
            total_commits,
        })
    }
}
