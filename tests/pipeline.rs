//! Fetch orchestration against an in-memory data source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gitwrapped::models::{Event, GitHubUser, Repository};
use gitwrapped::{DataSource, Error, PipelineConfig, Result, WrappedPipeline};
use serde_json::json;

#[derive(Default)]
struct FakeSource {
    user: Option<GitHubUser>,
    repos: Vec<Repository>,
    events: Vec<Event>,
    commit_counts: HashMap<String, u64>,
    fail_events: bool,
    commit_lookups: AtomicUsize,
}

#[async_trait]
impl DataSource for FakeSource {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        self.user
            .clone()
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }

    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    async fn fetch_public_events(&self, _username: &str) -> Result<Vec<Event>> {
        if self.fail_events {
            return Err(Error::GitHubApi("Failed to fetch events: 500".to_string()));
        }
        Ok(self.events.clone())
    }

    async fn fetch_commit_count(&self, _owner: &str, repo: &str) -> Result<u64> {
        self.commit_lookups.fetch_add(1, Ordering::SeqCst);
        self.commit_counts
            .get(repo)
            .copied()
            .ok_or_else(|| Error::GitHubApi(format!("409 Conflict for {}", repo)))
    }
}

fn octo() -> GitHubUser {
    GitHubUser {
        login: "octo".to_string(),
        name: Some("Octo Cat".to_string()),
        avatar_url: "https://avatars.example/octo.png".to_string(),
        created_at: Some("2015-06-01T00:00:00Z".to_string()),
        ..Default::default()
    }
}

fn repos(count: usize) -> Vec<Repository> {
    (0..count)
        .map(|i| Repository {
            name: format!("repo-{}", i),
            language: Some("Rust".to_string()),
            stargazers_count: i as u64,
            html_url: format!("https://github.com/octo/repo-{}", i),
            ..Default::default()
        })
        .collect()
}

fn quiet() -> PipelineConfig {
    PipelineConfig {
        commit_repo_limit: 10,
        show_progress: false,
    }
}

#[tokio::test]
async fn test_fetch_payload_counts_commits_in_recent_repos() {
    let source = FakeSource {
        user: Some(octo()),
        repos: repos(15),
        commit_counts: (0..15).map(|i| (format!("repo-{}", i), 10)).collect(),
        ..Default::default()
    };

    let commits = source
        .fetch_approximate_commit_count("octo", &source.repos, 10)
        .await;
    assert_eq!(commits, 100);
    assert_eq!(source.commit_lookups.load(Ordering::SeqCst), 10);

    let pipeline = WrappedPipeline::new(source, quiet());
    let payload = pipeline.fetch_payload(" octo ").await.unwrap();
    assert_eq!(payload.total_commits, 100);
    assert_eq!(payload.repos.len(), 15);
    assert_eq!(payload.user.unwrap().login, "octo");
}

#[tokio::test]
async fn test_failed_commit_lookups_count_as_zero() {
    let mut commit_counts = HashMap::new();
    commit_counts.insert("repo-1".to_string(), 42);

    let source = FakeSource {
        user: Some(octo()),
        repos: repos(3),
        commit_counts,
        ..Default::default()
    };

    let commits = source
        .fetch_approximate_commit_count("octo", &source.repos, 10)
        .await;
    assert_eq!(commits, 42);
    assert_eq!(
        source.fetch_approximate_commit_count("octo", &[], 10).await,
        0
    );
}

#[tokio::test]
async fn test_unknown_user_fails_whole_fetch() {
    let pipeline = WrappedPipeline::new(FakeSource::default(), quiet());
    let err = pipeline.wrap_user("ghost").await.unwrap_err();

    assert!(matches!(err, Error::UserNotFound(ref name) if name == "ghost"));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn test_event_failure_fails_whole_fetch() {
    let source = FakeSource {
        user: Some(octo()),
        fail_events: true,
        ..Default::default()
    };
    let pipeline = WrappedPipeline::new(source, quiet());

    let err = pipeline.wrap_user("octo").await.unwrap_err();
    assert!(matches!(err, Error::GitHubApi(_)));
    assert!(err.user_message().contains("check the username"));
}

#[tokio::test]
async fn test_wrap_user_end_to_end() {
    let events = vec![
        serde_json::from_value(json!({
            "type": "PushEvent",
            "created_at": "2024-05-01T12:00:00Z",
            "payload": {"commits": [{"sha": "1"}, {"sha": "2"}, {"sha": "3"}]}
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "type": "PullRequestEvent",
            "created_at": "2024-05-02T12:00:00Z",
            "payload": {"action": "opened"}
        }))
        .unwrap(),
    ];

    let source = FakeSource {
        user: Some(octo()),
        repos: repos(2),
        events,
        ..Default::default()
    };
    let pipeline = WrappedPipeline::new(source, quiet());

    let summary = pipeline.wrap_user("octo").await.unwrap();
    assert_eq!(summary.user.name, "Octo Cat");
    assert!(summary.user.account_age.ends_with("years"));
    assert_eq!(summary.stats.total_repos, 2);
    assert_eq!(summary.stats.total_stars, 1);
    assert_eq!(summary.stats.total_commits, 3);
    assert_eq!(summary.stats.pull_requests, 1);
    assert_eq!(summary.insights.most_starred_repo.unwrap().name, "repo-1");
    assert_eq!(summary.insights.top_languages[0].percentage, 100);
    assert_eq!(
        summary.personality,
        vec!["🦀 Memory Safety Guardian", "🌱 Growing Developer"]
    );
}
