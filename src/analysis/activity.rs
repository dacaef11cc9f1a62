use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::models::{DayActivity, Event, EventKind};

/// Counters derived from one pass over the public event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventActivity {
    pub day_activity: DayActivity,
    /// Distinct calendar dates with at least one event.
    pub active_days: u64,
    pub pull_requests: u64,
    pub issues: u64,
    /// Commit descriptors summed over all push events.
    pub push_commits: u64,
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Weekday and date are taken in `tz`, so the same event can land on a
/// different day for viewers in different zones.
pub fn analyze_events<Tz: TimeZone>(events: &[Event], tz: &Tz) -> EventActivity {
    let mut activity = EventActivity::default();
    let mut dates: HashSet<NaiveDate> = HashSet::new();

    for event in events {
        match event.kind() {
            EventKind::Push => {
                activity.push_commits = activity
                    .push_commits
                    .saturating_add(event.push_commit_count())
            }
            EventKind::PullRequest => activity.pull_requests += 1,
            EventKind::Issues => activity.issues += 1,
            EventKind::Other => {}
        }

        let Some(created_at) = parse_timestamp(&event.created_at) else {
            tracing::debug!(
                "Skipping {} with unparseable timestamp {:?}",
                event.event_type,
                event.created_at
            );
            continue;
        };

        let local = created_at.with_timezone(tz);
        activity.day_activity.record(local.weekday());
        dates.insert(local.date_naive());
    }

    activity.active_days = dates.len() as u64;
    activity
}
