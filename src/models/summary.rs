use chrono::Weekday;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Sunday-first weekday order used for every day breakdown and tie-break.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// The presentation-ready result of aggregating one user's payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedSummary {
    pub user: UserSummary,
    pub stats: Stats,
    pub insights: Insights,
    pub personality: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Display name, or the login when the profile has none.
    pub name: String,
    pub login: String,
    pub avatar: String,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub account_age: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Public repositories only.
    pub total_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_commits: u64,
    pub active_days: u64,
    pub pull_requests: u64,
    pub issues: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub top_languages: Vec<LanguageShare>,
    pub most_active_day: String,
    pub most_active_day_count: u64,
    pub most_starred_repo: Option<StarredRepo>,
    pub day_activity: DayActivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub count: u64,
    /// Share of all repositories, including those without a language.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarredRepo {
    pub name: String,
    pub stars: u64,
    pub url: String,
}

/// Event counts for each of the seven weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayActivity {
    counts: [u64; 7],
}

impl DayActivity {
    pub fn record(&mut self, day: Weekday) {
        self.counts[day.num_days_from_sunday() as usize] += 1;
    }

    pub fn get(&self, day: Weekday) -> u64 {
        self.counts[day.num_days_from_sunday() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u64)> + '_ {
        WEEKDAYS.iter().map(move |day| (*day, self.get(*day)))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Day with the most events; the earliest day in Sunday-first order
    /// wins a tie.
    pub fn busiest(&self) -> (Weekday, u64) {
        self.iter()
            .fold((Weekday::Sun, self.get(Weekday::Sun)), |best, (day, count)| {
                if count > best.1 {
                    (day, count)
                } else {
                    best
                }
            })
    }
}

impl Serialize for DayActivity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEKDAYS.len()))?;
        for (day, count) in self.iter() {
            map.serialize_entry(day_name(day), &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busiest_prefers_earliest_on_tie() {
        let mut activity = DayActivity::default();
        assert_eq!(activity.busiest(), (Weekday::Sun, 0));

        activity.record(Weekday::Fri);
        activity.record(Weekday::Tue);
        assert_eq!(activity.busiest(), (Weekday::Tue, 1));

        activity.record(Weekday::Fri);
        assert_eq!(activity.busiest(), (Weekday::Fri, 2));
        assert_eq!(activity.total(), 3);
    }

    #[test]
    fn test_day_activity_serializes_in_week_order() {
        let mut activity = DayActivity::default();
        activity.record(Weekday::Sat);
        activity.record(Weekday::Mon);

        let json = serde_json::to_string(&activity).unwrap();
        assert_eq!(
            json,
            r#"{"Sunday":0,"Monday":1,"Tuesday":0,"Wednesday":0,"Thursday":0,"Friday":0,"Saturday":1}"#
        );
    }
}
