use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use devpulse::models::{AnalysisReport, GitHubUser, SummaryReport};
use devpulse::{AnalysisPipeline, Config, Error, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "devpulse")]
#[command(version = "0.1.0")]
#[command(about = "Summarize a GitHub contributor's commit habits")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format (json, text, markdown)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, global = true)]
    now: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full behavioral analysis of recent activity
    Analyze {
        /// GitHub username to analyze
        username: String,
    },
    /// Short report: commit and repository totals
    Report {
        /// GitHub username to report on
        username: String,
    },
    /// Public profile: name, repositories, followers
    Profile {
        /// GitHub username to look up
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("devpulse=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let now = resolve_now(args.now.as_deref())?;

    let github = GitHubClient::new(&config)?;

    let output = match &args.command {
        Command::Analyze { username } => {
            let report = AnalysisPipeline::new(github)
                .analyze_user(username, now)
                .await?;
            render_analysis(&report, &args.format)?
        }
        Command::Report { username } => {
            let report = AnalysisPipeline::new(github)
                .report_user(username, now)
                .await?;
            render_summary(&report, &args.format)?
        }
        Command::Profile { username } => {
            let user = github.get_user(username).await?;
            render_profile(&user, &args.format)?
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn resolve_now(raw: Option<&str>) -> devpulse::Result<DateTime<Utc>> {
    match raw {
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| Error::InvalidTimestamp(format!("{}: {}", value, e))),
        None => Ok(Utc::now()),
    }
}

fn render_analysis(report: &AnalysisReport, format: &str) -> anyhow::Result<String> {
    Ok(match format {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_analysis_markdown(report),
        _ => format_analysis_text(report),
    })
}

fn render_summary(report: &SummaryReport, format: &str) -> anyhow::Result<String> {
    Ok(match format {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_summary_markdown(report),
        _ => format_summary_text(report),
    })
}

fn render_profile(user: &GitHubUser, format: &str) -> anyhow::Result<String> {
    Ok(match format {
        "json" => serde_json::to_string_pretty(user)?,
        "markdown" => format_profile_markdown(user),
        _ => format_profile_text(user),
    })
}

fn format_analysis_text(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== Activity Analysis: {} ===\n\n", report.username));
    output.push_str(&format!(
        "Recommendation score: {}/100\n",
        report.recommendation_score
    ));
    output.push_str(&format!("Trend: {}\n", report.trend));
    output.push_str(&format!("Advice: {}\n\n", report.advice));

    output.push_str("Cadence:\n");
    output.push_str(&format!(
        "  Average commits/day: {:.2}\n",
        report.average_commits_per_day
    ));
    output.push_str(&format!(
        "  Pushes: {:.2}/day, {:.2}/week, {:.0}/month\n",
        report.commit_frequency.daily, report.commit_frequency.weekly, report.commit_frequency.monthly
    ));
    output.push_str(&format!("  Longest streak: {} days\n", report.consecutive_days));
    output.push_str(&format!("  Idle days: {}\n", report.idle_days));
    output.push_str(&format!("  Projects pushed to: {}\n", report.project_diversity));

    output.push_str("\nHabits:\n");
    output.push_str(&format!("  Late-night commits: {}\n", report.late_night_commits));
    output.push_str(&format!("  Weekend ratio: {:.1}%\n", report.weekend_commit_ratio));
    output.push_str(&format!("  Work-life balance: {:.1}\n", report.work_life_balance));
    output.push_str(&format!("  Productivity score: {:.1}\n", report.productivity_score));

    let p = &report.commit_patterns;
    output.push_str(&format!(
        "\nTime of day: morning {:.1}%, afternoon {:.1}%, evening {:.1}%, night {:.1}%\n",
        p.morning, p.afternoon, p.evening, p.night
    ));

    output.push_str("\nPushes by hour:\n");
    let peak = report.activity_hours.values().copied().max().unwrap_or(0).max(1);
    for (hour, count) in &report.activity_hours {
        let bar = "#".repeat((*count as usize * 30).div_ceil(peak as usize));
        output.push_str(&format!("  {} {:>3} {}\n", hour, count, bar));
    }

    output
}

fn format_analysis_markdown(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Activity Analysis: {}\n\n", report.username));
    output.push_str(&format!("> {}\n\n", report.advice));

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Recommendation Score | {}/100 |\n",
        report.recommendation_score
    ));
    output.push_str(&format!("| Trend | {} |\n", report.trend));
    output.push_str(&format!(
        "| Average Commits/Day | {:.2} |\n",
        report.average_commits_per_day
    ));
    output.push_str(&format!(
        "| Late-Night Commits | {} |\n",
        report.late_night_commits
    ));
    output.push_str(&format!(
        "| Weekend Ratio | {:.1}% |\n",
        report.weekend_commit_ratio
    ));
    output.push_str(&format!(
        "| Longest Streak | {} days |\n",
        report.consecutive_days
    ));
    output.push_str(&format!("| Idle Days | {} |\n", report.idle_days));
    output.push_str(&format!(
        "| Work-Life Balance | {:.1} |\n",
        report.work_life_balance
    ));
    output.push_str(&format!(
        "| Productivity Score | {:.1} |\n",
        report.productivity_score
    ));
    output.push_str(&format!(
        "| Project Diversity | {} |\n",
        report.project_diversity
    ));

    output.push_str("\n## Commit Frequency\n\n");
    output.push_str("| Daily | Weekly | Monthly |\n|-------|--------|---------|\n");
    output.push_str(&format!(
        "| {:.2} | {:.2} | {:.0} |\n",
        report.commit_frequency.daily, report.commit_frequency.weekly, report.commit_frequency.monthly
    ));

    let p = &report.commit_patterns;
    output.push_str("\n## Time of Day\n\n");
    output.push_str("| Morning | Afternoon | Evening | Night |\n");
    output.push_str("|---------|-----------|---------|-------|\n");
    output.push_str(&format!(
        "| {:.1}% | {:.1}% | {:.1}% | {:.1}% |\n",
        p.morning, p.afternoon, p.evening, p.night
    ));

    output.push_str("\n## Pushes by Hour\n\n");
    output.push_str("| Hour | Pushes |\n|------|--------|\n");
    for (hour, count) in &report.activity_hours {
        output.push_str(&format!("| {} | {} |\n", hour, count));
    }

    output
}

fn format_summary_text(report: &SummaryReport) -> String {
    format!(
        "\n=== Report: {} ===\n\nTotal commits: {}\nRepositories: {}\nCommits per repository: {:.2}\n\nAnalyzed on: {}\n",
        report.username,
        report.total_commits,
        report.total_repositories,
        report.average_commits_per_repo,
        report.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn format_summary_markdown(report: &SummaryReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Report: {}\n\n", report.username));
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Total Commits | {} |\n", report.total_commits));
    output.push_str(&format!(
        "| Repositories | {} |\n",
        report.total_repositories
    ));
    output.push_str(&format!(
        "| Commits per Repository | {:.2} |\n",
        report.average_commits_per_repo
    ));
    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        report.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_profile_text(user: &GitHubUser) -> String {
    format!(
        "\n=== Profile: {} ===\n\nName: {}\nPublic repositories: {}\nFollowers: {}\nMember since: {}\n",
        user.login,
        user.display_name(),
        user.public_repos,
        user.followers,
        user.created_at.format("%Y-%m-%d")
    )
}

fn format_profile_markdown(user: &GitHubUser) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Profile: {}\n\n", user.login));
    output.push_str("| Field | Value |\n|-------|-------|\n");
    output.push_str(&format!("| Name | {} |\n", user.display_name()));
    output.push_str(&format!("| Public Repositories | {} |\n", user.public_repos));
    output.push_str(&format!("| Followers | {} |\n", user.followers));
    output.push_str(&format!(
        "| Member Since | {} |\n",
        user.created_at.format("%Y-%m-%d")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octocat() -> GitHubUser {
        GitHubUser {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            public_repos: 8,
            followers: 17000,
            created_at: "2011-01-25T18:44:36Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_profile_text() {
        let output = render_profile(&octocat(), "text").unwrap();
        assert!(output.contains("=== Profile: octocat ==="));
        assert!(output.contains("Name: The Octocat"));
        assert!(output.contains("Public repositories: 8"));
        assert!(output.contains("Followers: 17000"));
        assert!(output.contains("Member since: 2011-01-25"));
    }

    #[test]
    fn test_profile_markdown() {
        let mut user = octocat();
        user.name = None;

        let output = render_profile(&user, "markdown").unwrap();
        assert!(output.starts_with("# Profile: octocat\n"));
        assert!(output.contains("| Name | octocat |"));
        assert!(output.contains("| Followers | 17000 |"));
    }

    #[test]
    fn test_profile_json() {
        let output = render_profile(&octocat(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["login"], "octocat");
        assert_eq!(value["public_repos"], 8);
        assert_eq!(value["created_at"], "2011-01-25T18:44:36Z");
    }

    #[test]
    fn test_resolve_now_rejects_garbage() {
        assert!(matches!(
            resolve_now(Some("soon")),
            Err(Error::InvalidTimestamp(_))
        ));
        let fixed = resolve_now(Some("2024-01-10T12:00:00Z")).unwrap();
        assert_eq!(fixed.to_rfc3339(), "2024-01-10T12:00:00+00:00");
    }
}
