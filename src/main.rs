use chrono::{Datelike, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitwrapped::models::{day_name, WrappedSummary};
use gitwrapped::{Config, GitHubClient, PipelineConfig, RawPayload, WrappedPipeline};

#[derive(Parser, Debug)]
#[command(name = "gitwrapped")]
#[command(version)]
#[command(about = "A year in review of a developer's public GitHub activity")]
struct Args {
    /// GitHub username to wrap
    #[arg(short, long, required_unless_present = "payload")]
    username: Option<String>,

    /// Output format (text, markdown, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Aggregate a saved raw payload instead of calling the API
    #[arg(long, conflicts_with = "username")]
    payload: Option<String>,

    /// Number of most recently updated repositories to count commits in
    #[arg(long)]
    commit_repos: Option<usize>,

    /// Hide the progress spinner
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitwrapped=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(limit) = args.commit_repos {
        config.commit_repo_limit = limit;
    }

    let mut pipeline_config = PipelineConfig::from(&config);
    pipeline_config.show_progress = !args.quiet;

    let github = GitHubClient::new(&config)?;
    let pipeline = WrappedPipeline::new(github, pipeline_config);

    let summary = if let Some(ref path) = args.payload {
        tracing::info!("Loading payload from: {}", path);
        pipeline.wrap_payload(&RawPayload::from_file(path)?)?
    } else {
        let username = args.username.as_deref().unwrap_or_default();
        match pipeline.wrap_user(username).await {
            Ok(summary) => summary,
            Err(e) if e.is_fetch_failure() => {
                tracing::error!("{}", e);
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    output_summary(&summary, &args)?;

    Ok(())
}

fn output_summary(summary: &WrappedSummary, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(summary)?,
        "markdown" => format_markdown(summary),
        _ => format_text(summary),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

const SLIDE_COUNT: usize = 5;

fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

fn plural(count: u64, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn stat_rows(summary: &WrappedSummary) -> [(&'static str, &'static str, u64); 6] {
    let stats = &summary.stats;
    [
        ("📦", "Repositories", stats.total_repos),
        ("⭐", "Total Stars", stats.total_stars),
        ("💻", "Commits", stats.total_commits),
        ("🔀", "Pull Requests", stats.pull_requests),
        ("📅", "Active Days", stats.active_days),
        ("🍴", "Forks", stats.total_forks),
    ]
}

fn format_text(summary: &WrappedSummary) -> String {
    let mut output = String::new();
    let user = &summary.user;
    let insights = &summary.insights;

    // Intro
    output.push_str(&format!(
        "\n=== 1/{} · {}'s GitHub Wrapped ===\n\n",
        SLIDE_COUNT, user.name
    ));
    output.push_str(&format!("@{}\n", user.login));
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("{}\n", bio));
    }
    output.push_str(&format!(
        "Your coding journey in {}\n",
        Local::now().year()
    ));
    output.push_str(&format!(
        "On GitHub for {} · {} · {} following\n",
        user.account_age,
        plural(user.followers, "follower", "followers"),
        user.following
    ));

    // Stats
    output.push_str(&format!("\n=== 2/{} · By The Numbers ===\n\n", SLIDE_COUNT));
    for (emoji, label, value) in stat_rows(summary) {
        output.push_str(&format!("  {} {:<14} {}\n", emoji, label, value));
    }

    // Languages
    output.push_str(&format!(
        "\n=== 3/{} · Your Top Languages ===\n\n",
        SLIDE_COUNT
    ));
    if insights.top_languages.is_empty() {
        output.push_str("  No languages detected\n");
    }
    for (i, lang) in insights.top_languages.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {:<12} {:<20} {:>3}% ({})\n",
            i + 1,
            lang.name,
            bar(lang.percentage as u64, 100, 20),
            lang.percentage,
            plural(lang.count, "repository", "repositories")
        ));
    }

    // Activity
    output.push_str(&format!(
        "\n=== 4/{} · Your Most Active Day ===\n\n",
        SLIDE_COUNT
    ));
    output.push_str(&format!(
        "{} ({} activities)\n\n",
        insights.most_active_day, insights.most_active_day_count
    ));
    for (day, count) in insights.day_activity.iter() {
        output.push_str(&format!(
            "  {:<10} {:<20} {}\n",
            day_name(day),
            bar(count, insights.most_active_day_count, 20),
            count
        ));
    }
    if let Some(ref repo) = insights.most_starred_repo {
        output.push_str(&format!(
            "\nMost starred: {} ⭐ {}\n  {}\n",
            repo.name, repo.stars, repo.url
        ));
    }

    // Personality
    output.push_str(&format!(
        "\n=== 5/{} · Your Developer Personality ===\n\n",
        SLIDE_COUNT
    ));
    for tag in &summary.personality {
        output.push_str(&format!("  {}\n", tag));
    }
    output.push_str(&format!("\nKeep coding, {}! 🚀\n", user.name));

    output
}

fn format_markdown(summary: &WrappedSummary) -> String {
    let mut output = String::new();
    let user = &summary.user;
    let insights = &summary.insights;

    output.push_str(&format!("# {}'s GitHub Wrapped\n\n", user.name));
    if !user.avatar.is_empty() {
        output.push_str(&format!("![{}]({})\n\n", user.login, user.avatar));
    }
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }
    output.push_str(&format!(
        "**@{}** · on GitHub for {} · {} · {} following\n\n",
        user.login,
        user.account_age,
        plural(user.followers, "follower", "followers"),
        user.following
    ));

    output.push_str("## By The Numbers\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    for (emoji, label, value) in stat_rows(summary) {
        output.push_str(&format!("| {} {} | {} |\n", emoji, label, value));
    }

    output.push_str("\n## Your Top Languages\n\n");
    if insights.top_languages.is_empty() {
        output.push_str("_No languages detected._\n");
    } else {
        output.push_str("| Language | Repositories | Share |\n");
        output.push_str("|----------|--------------|-------|\n");
        for lang in &insights.top_languages {
            output.push_str(&format!(
                "| {} | {} | {}% |\n",
                lang.name, lang.count, lang.percentage
            ));
        }
    }

    output.push_str("\n## Your Most Active Day\n\n");
    output.push_str(&format!(
        "**{}** with {} activities\n\n",
        insights.most_active_day, insights.most_active_day_count
    ));
    output.push_str("| Day | Events |\n|-----|--------|\n");
    for (day, count) in insights.day_activity.iter() {
        output.push_str(&format!("| {} | {} |\n", day_name(day), count));
    }
    if let Some(ref repo) = insights.most_starred_repo {
        output.push_str(&format!(
            "\nMost starred repository: [{}]({}) ⭐ {}\n",
            repo.name, repo.url, repo.stars
        ));
    }

    output.push_str("\n## Your Developer Personality\n\n");
    for tag in &summary.personality {
        output.push_str(&format!("- {}\n", tag));
    }

    output.push_str(&format!("\n---\n*Keep coding, {}! 🚀*\n", user.name));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gitwrapped::Aggregator;

    fn sample_summary() -> WrappedSummary {
        let payload = RawPayload::from_json(
            r#"{
                "user": {"login": "octo", "name": "Octo Cat", "avatar_url": "https://a/octo.png",
                         "bio": "Tentacles", "followers": 1, "following": 2,
                         "created_at": "2019-01-01T00:00:00Z"},
                "repos": [
                    {"name": "ink", "language": "Rust", "stargazers_count": 5, "forks_count": 1,
                     "private": false, "html_url": "https://github.com/octo/ink"}
                ],
                "events": [{"type": "PushEvent", "created_at": "2024-03-05T10:00:00Z",
                            "payload": {"commits": [{}, {}]}}],
                "totalCommits": 0
            }"#,
        )
        .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        Aggregator::with_clock(Utc, now).aggregate(&payload).unwrap()
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(5, 10, 10), "█████");
        assert_eq!(bar(10, 10, 4), "████");
        assert_eq!(bar(0, 0, 10), "");
    }

    #[test]
    fn test_format_text_has_all_slides() {
        let text = format_text(&sample_summary());
        assert!(text.contains("1/5 · Octo Cat's GitHub Wrapped"));
        assert!(text.contains("By The Numbers"));
        assert!(text.contains("1. Rust"));
        assert!(text.contains("100% (1 repository)"));
        assert!(text.contains("Tuesday (1 activities)"));
        assert!(text.contains("Most starred: ink ⭐ 5"));
        assert!(text.contains("🦀 Memory Safety Guardian"));
        assert!(text.contains("Keep coding, Octo Cat! 🚀"));
    }

    #[test]
    fn test_format_markdown() {
        let md = format_markdown(&sample_summary());
        assert!(md.starts_with("# Octo Cat's GitHub Wrapped"));
        assert!(md.contains("| 💻 Commits | 2 |"));
        assert!(md.contains("| Rust | 1 | 100% |"));
        assert!(md.contains("[ink](https://github.com/octo/ink)"));
        assert!(md.contains("- 🌱 Growing Developer"));
    }
}
