//! mishnah-path: plans the references a study track needs next.
//!
//! The task runner reads a user position record, plans the upcoming study
//! days and prints the result as JSON for the cache-population step.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use mishnah_path_lib::boundary::Boundary;
use mishnah_path_lib::calendar::{format_date, parse_date, today_utc, CalendarGate};
use mishnah_path_lib::catalog::mishnah;
use mishnah_path_lib::config::{get_schedule_config, ScheduleConfig};
use mishnah_path_lib::logging::init_logging;
use mishnah_path_lib::planner::estimate::completion_estimate;
use mishnah_path_lib::planner::{cursor_on, PlanReport};
use mishnah_path_lib::resolver::{content_refs_for_range, resolve_raw};
use mishnah_path_lib::state::store::load_state;

#[derive(Parser)]
#[command(name = "mishnah-path")]
#[command(about = "Content addressing and pace scheduling for daily Mishnah study")]
struct Cli {
    /// Schedule config file (defaults to the platform config location)
    #[arg(short, long, env = "MISHNAH_PATH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one global position
    Resolve {
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },
    /// List references for an inclusive position range
    Refs { start: u32, end: u32 },
    /// Plan upcoming study days for a user record
    Plan {
        /// JSON user position record
        #[arg(short, long)]
        state: PathBuf,
        /// First calendar day to consider (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,
        /// Admitted study days to plan
        #[arg(long)]
        days: Option<u32>,
    },
    /// Study days and finish date for a user record
    Estimate {
        #[arg(short, long)]
        state: PathBuf,
        #[arg(long)]
        from: Option<String>,
    },
    /// Where a track started on `path_start` should be on `date`
    Expected {
        #[arg(short, long)]
        state: PathBuf,
        #[arg(long)]
        date: Option<String>,
    },
    /// Today's item and the reviews due for a user record
    Reviews {
        #[arg(short, long)]
        state: PathBuf,
        /// Day to report (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Calendar days of upcoming reviews to list (default: horizon_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Print the catalog fingerprint
    Fingerprint,
}

fn load_config(cli_path: Option<&PathBuf>) -> anyhow::Result<ScheduleConfig> {
    match cli_path {
        Some(path) => ScheduleConfig::from_path(path)
            .with_context(|| format!("loading schedule config {}", path.display())),
        None => Ok(get_schedule_config().clone()),
    }
}

fn date_or_today(value: Option<&str>) -> anyhow::Result<chrono::NaiveDate> {
    match value {
        Some(v) => Ok(parse_date(v)?),
        None => Ok(today_utc()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let catalog = mishnah();
    let gate = CalendarGate::from_config(&config);

    let output = match cli.command {
        Command::Resolve { position } => {
            let item = resolve_raw(catalog, position)?;
            json!({
                "item": item.summary(),
                "label": item.hebrew_label(),
                "boundary": Boundary::of(&item),
            })
        }
        Command::Refs { start, end } => json!(content_refs_for_range(catalog, start, end)),
        Command::Plan { state, from, days } => {
            let user = load_state(&state)
                .await?
                .with_context(|| format!("no user record at {}", state.display()))?;
            let policy = user.policy(catalog, &config)?;
            let cursor = user.start_cursor(catalog, &policy)?;
            let start_date = date_or_today(from.as_deref())?;
            let horizon = days.unwrap_or(config.horizon_days);

            tracing::info!(
                pace = user.pace.as_str(),
                cursor,
                start_date = %format_date(start_date),
                horizon,
                "Planning study days"
            );
            let report = PlanReport::build(catalog, cursor, start_date, horizon, &policy, &gate);
            serde_json::to_value(&report)?
        }
        Command::Estimate { state, from } => {
            let user = load_state(&state)
                .await?
                .with_context(|| format!("no user record at {}", state.display()))?;
            let policy = user.policy(catalog, &config)?;
            let cursor = user.start_cursor(catalog, &policy)?;
            let start_date = date_or_today(from.as_deref())?;
            serde_json::to_value(completion_estimate(catalog, &policy, &gate, cursor, start_date))?
        }
        Command::Expected { state, date } => {
            let user = load_state(&state)
                .await?
                .with_context(|| format!("no user record at {}", state.display()))?;
            let policy = user.policy(catalog, &config)?;
            let date = date_or_today(date.as_deref())?;
            let cursor = cursor_on(catalog, &policy, &gate, user.path_start_date, date);
            json!({
                "date": format_date(date),
                "cursor": cursor,
                "completed": policy.is_exhausted(catalog, cursor),
            })
        }
        Command::Reviews { state, date, days } => {
            let user = load_state(&state)
                .await?
                .with_context(|| format!("no user record at {}", state.display()))?;
            let policy = user.policy(catalog, &config)?;
            let learned = user.learned_count(catalog)?;
            let date = date_or_today(date.as_deref())?;
            let window = days.unwrap_or(config.horizon_days);
            let schedule = user.review_schedule(catalog, policy, &gate);
            json!({
                "date": format_date(date),
                "intensity": user.review_intensity,
                "today": schedule.todays_content(learned),
                "due": schedule.reviews_due(learned, date),
                "upcoming": schedule.reviews_by_date(learned, date, window),
            })
        }
        Command::Fingerprint => json!({
            "fingerprint": catalog.fingerprint(),
            "total_items": catalog.total_items(),
            "total_chapters": catalog.total_chapters(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_accepts_negative_position() {
        let cli = Cli::try_parse_from(["mishnah-path", "resolve", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Resolve { position: -3 }));
    }

    #[test]
    fn test_reviews_arguments() {
        let cli = Cli::try_parse_from([
            "mishnah-path",
            "reviews",
            "--state",
            "user.json",
            "--date",
            "2024-01-08",
        ])
        .unwrap();
        match cli.command {
            Command::Reviews { state, date, days } => {
                assert_eq!(state, PathBuf::from("user.json"));
                assert_eq!(date.as_deref(), Some("2024-01-08"));
                assert_eq!(days, None);
            }
            _ => panic!("expected reviews subcommand"),
        }
    }
}
