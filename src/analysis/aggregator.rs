use chrono::{DateTime, Local, TimeZone, Utc};

use crate::analysis::activity::{analyze_events, parse_timestamp};
use crate::analysis::languages::rank_languages;
use crate::analysis::personality::personality_tags;
use crate::error::{Error, Result};
use crate::models::{
    day_name, GitHubUser, Insights, RawPayload, Repository, StarredRepo, Stats, UserSummary,
    WrappedSummary,
};

/// Turns a resolved payload into a [`WrappedSummary`].
///
/// Pure apart from the clock used for account age and the time zone used to
/// place events on calendar days; both are fixed at construction.
#[derive(Debug, Clone)]
pub struct Aggregator<Tz: TimeZone = Local> {
    tz: Tz,
    now: DateTime<Utc>,
}

impl Aggregator<Local> {
    pub fn new() -> Self {
        Self {
            tz: Local,
            now: Utc::now(),
        }
    }
}

impl Default for Aggregator<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> Aggregator<Tz> {
    pub fn with_clock(tz: Tz, now: DateTime<Utc>) -> Self {
        Self { tz, now }
    }

    pub fn aggregate(&self, payload: &RawPayload) -> Result<WrappedSummary> {
        let user = payload
            .user
            .as_ref()
            .ok_or_else(|| Error::InvalidPayload("missing user".to_string()))?;
        let created_at = validate_user(user)?;

        let activity = analyze_events(&payload.events, &self.tz);
        let top_languages = rank_languages(&payload.repos);
        let total_commits = payload.total_commits.max(activity.push_commits);
        let (busiest_day, busiest_count) = activity.day_activity.busiest();

        tracing::debug!(
            "Aggregated {} repos and {} events for {} (commits: {} reported, {} from events)",
            payload.repos.len(),
            payload.events.len(),
            user.login,
            payload.total_commits,
            activity.push_commits
        );

        let personality = personality_tags(
            &top_languages,
            total_commits,
            activity.pull_requests,
            activity.issues,
        );

        Ok(WrappedSummary {
            user: UserSummary {
                name: user
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| user.login.clone()),
                login: user.login.clone(),
                avatar: user.avatar_url.clone(),
                bio: user.bio.clone(),
                followers: user.followers,
                following: user.following,
                account_age: account_age(created_at, self.now),
            },
            stats: Stats {
                total_repos: payload.repos.iter().filter(|r| !r.private).count() as u64,
                total_stars: saturating_total(payload.repos.iter().map(|r| r.stargazers_count)),
                total_forks: saturating_total(payload.repos.iter().map(|r| r.forks_count)),
                total_commits,
                active_days: activity.active_days,
                pull_requests: activity.pull_requests,
                issues: activity.issues,
            },
            insights: Insights {
                top_languages,
                most_active_day: day_name(busiest_day).to_string(),
                most_active_day_count: busiest_count,
                most_starred_repo: most_starred(&payload.repos),
                day_activity: activity.day_activity,
            },
            personality,
        })
    }
}

/// Aggregate with the local time zone and the current time.
pub fn aggregate(payload: &RawPayload) -> Result<WrappedSummary> {
    Aggregator::new().aggregate(payload)
}

/// Corrupt counts are read as `u64::MAX`, so sums clamp instead of wrapping.
fn saturating_total(counts: impl Iterator<Item = u64>) -> u64 {
    counts.fold(0u64, |acc, n| acc.saturating_add(n))
}

fn validate_user(user: &GitHubUser) -> Result<DateTime<Utc>> {
    if user.login.trim().is_empty() {
        return Err(Error::InvalidPayload("user.login is required".to_string()));
    }

    let raw = user
        .created_at
        .as_deref()
        .ok_or_else(|| Error::InvalidPayload("user.created_at is required".to_string()))?;

    parse_timestamp(raw).ok_or_else(|| {
        Error::InvalidPayload(format!("user.created_at is not a valid timestamp: {}", raw))
    })
}

/// First repository with the strictly highest star count. Repositories
/// without stars never qualify.
fn most_starred(repos: &[Repository]) -> Option<StarredRepo> {
    repos
        .iter()
        .fold(None::<&Repository>, |best, repo| {
            let threshold = best.map(|b| b.stargazers_count).unwrap_or(0);
            if repo.stargazers_count > threshold {
                Some(repo)
            } else {
                best
            }
        })
        .map(|repo| StarredRepo {
            name: repo.name.clone(),
            stars: repo.stargazers_count,
            url: repo.html_url.clone(),
        })
}

pub fn account_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - created_at).num_days().max(0);
    let years = days / 365;

    match (years, days) {
        (1, _) => "1 year".to_string(),
        (y, _) if y > 1 => format!("{} years", y),
        (_, 1) => "1 day".to_string(),
        (_, d) => format!("{} days", d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 15, 12, 0, 0).unwrap()
    }

    fn repo(name: &str, stars: u64) -> Repository {
        Repository {
            name: name.to_string(),
            stargazers_count: stars,
            html_url: format!("https://github.com/octo/{}", name),
            ..Default::default()
        }
    }

    #[test]
    fn test_account_age() {
        assert_eq!(account_age(now() - Duration::days(400), now()), "1 year");
        assert_eq!(account_age(now() - Duration::days(365 * 3 + 20), now()), "3 years");
        assert_eq!(account_age(now() - Duration::days(365), now()), "1 year");
        assert_eq!(account_age(now() - Duration::days(364), now()), "364 days");
        assert_eq!(account_age(now() - Duration::days(10), now()), "10 days");
        assert_eq!(account_age(now() - Duration::hours(30), now()), "1 day");
        assert_eq!(account_age(now() + Duration::days(2), now()), "0 days");
    }

    #[test]
    fn test_huge_counts_saturate() {
        let payload = RawPayload::from_json(
            r#"{
                "user": {"login": "octo", "created_at": "2020-01-01T00:00:00Z"},
                "repos": [
                    {"name": "a", "stargazers_count": 1e30, "forks_count": 1e30},
                    {"name": "b", "stargazers_count": 5, "forks_count": 2}
                ]
            }"#,
        )
        .unwrap();

        let summary = Aggregator::with_clock(Utc, now()).aggregate(&payload).unwrap();
        assert_eq!(summary.stats.total_stars, u64::MAX);
        assert_eq!(summary.stats.total_forks, u64::MAX);
        assert_eq!(summary.insights.most_starred_repo.unwrap().name, "a");
    }

    #[test]
    fn test_most_starred_first_wins() {
        let repos = vec![repo("a", 3), repo("b", 9), repo("c", 9), repo("d", 1)];
        let best = most_starred(&repos).unwrap();
        assert_eq!(best.name, "b");
        assert_eq!(best.stars, 9);
        assert_eq!(best.url, "https://github.com/octo/b");
    }

    #[test]
    fn test_most_starred_absent() {
        assert!(most_starred(&[]).is_none());
        assert!(most_starred(&[repo("a", 0), repo("b", 0)]).is_none());
    }

    #[test]
    fn test_validate_user() {
        let mut user = GitHubUser {
            login: "octo".to_string(),
            created_at: Some("2020-05-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert!(validate_user(&user).is_ok());

        user.created_at = Some("last tuesday".to_string());
        assert!(matches!(validate_user(&user), Err(Error::InvalidPayload(_))));

        user.created_at = None;
        assert!(matches!(validate_user(&user), Err(Error::InvalidPayload(_))));

        user.created_at = Some("2020-05-01T00:00:00Z".to_string());
        user.login = String::new();
        assert!(matches!(validate_user(&user), Err(Error::InvalidPayload(_))));
    }

    #[test]
    fn test_missing_user_fails() {
        let aggregator = Aggregator::with_clock(Utc, now());
        let err = aggregator.aggregate(&RawPayload::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
    }
}
