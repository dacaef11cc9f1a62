//! Rule-based personality tags for the closing slide.
//!
//! Always one tag for commit volume, preceded by a language tag when any
//! language was found and followed by an engagement tag when pull requests
//! or issues dominate the recent activity.

use crate::models::LanguageShare;
use crate::taxonomy::language_persona;

/// Commit volume tiers, by reconciled commit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitTier {
    /// More than 100 commits
    Champion,
    /// More than 50 commits
    Active,
    Growing,
}

impl CommitTier {
    pub fn from_commits(total_commits: u64) -> Self {
        if total_commits > 100 {
            CommitTier::Champion
        } else if total_commits > 50 {
            CommitTier::Active
        } else {
            CommitTier::Growing
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            CommitTier::Champion => "📊 Commit Champion",
            CommitTier::Active => "💪 Active Contributor",
            CommitTier::Growing => "🌱 Growing Developer",
        }
    }
}

/// How the user mostly engages with other projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementStyle {
    PrMaestro,
    BugHunter,
}

impl EngagementStyle {
    const THRESHOLD: u64 = 10;

    pub fn classify(pull_requests: u64, issues: u64) -> Option<Self> {
        if pull_requests > issues && pull_requests > Self::THRESHOLD {
            Some(EngagementStyle::PrMaestro)
        } else if issues > Self::THRESHOLD {
            Some(EngagementStyle::BugHunter)
        } else {
            None
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            EngagementStyle::PrMaestro => "🔀 PR Maestro",
            EngagementStyle::BugHunter => "🐛 Bug Hunter",
        }
    }
}

pub fn personality_tags(
    top_languages: &[LanguageShare],
    total_commits: u64,
    pull_requests: u64,
    issues: u64,
) -> Vec<String> {
    let mut tags = Vec::with_capacity(3);

    if let Some(top) = top_languages.first() {
        tags.push(language_persona(&top.name).to_string());
    }

    tags.push(CommitTier::from_commits(total_commits).tag().to_string());

    if let Some(style) = EngagementStyle::classify(pull_requests, issues) {
        tags.push(style.tag().to_string());
    }

    tags
}
