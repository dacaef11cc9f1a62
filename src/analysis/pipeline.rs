use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::aggregator::aggregate;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::DataSource;
use crate::models::{RawPayload, WrappedSummary};

pub struct WrappedPipeline {
    source: Arc<dyn DataSource>,
    config: PipelineConfig,
}

impl WrappedPipeline {
    pub fn new(source: impl DataSource + 'static, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    pub async fn wrap_user(&self, username: &str) -> Result<WrappedSummary> {
        let payload = self.fetch_payload(username).await?;
        self.wrap_payload(&payload)
    }

    pub fn wrap_payload(&self, payload: &RawPayload) -> Result<WrappedSummary> {
        let summary = aggregate(payload)?;
        tracing::info!(
            "Wrapped {}: {} public repos, {} commits, {} active days",
            summary.user.login,
            summary.stats.total_repos,
            summary.stats.total_commits,
            summary.stats.active_days
        );
        Ok(summary)
    }

    pub async fn fetch_payload(&self, username: &str) -> Result<RawPayload> {
        let username = username.trim();
        let spinner = self.spinner();
        spinner.set_message(format!("Fetching GitHub data for {}...", username));

        tracing::info!("Fetching GitHub data for: {}", username);
        let result = self
            .source
            .fetch_all_user_data(username, self.config.commit_repo_limit)
            .await;
        spinner.finish_and_clear();

        let payload = result?;
        tracing::info!(
            "Fetched {} repositories and {} events ({} commits across the {} most recent repos)",
            payload.repos.len(),
            payload.events.len(),
            payload.total_commits,
            self.config.commit_repo_limit.min(payload.repos.len())
        );

        Ok(payload)
    }

    fn spinner(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
