//! goalboard CLI - progress reports for a board of goals.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use goalboard_core::{Goal, GoalBoard, GoalId, UserId};
use goalboard_progress::{FixedClock, ProgressConfig, ProgressEngine, ProgressReport};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "goalboard")]
#[command(about = "Goal progress, status and streaks", long_about = None)]
struct Cli {
    /// Goal board JSON file
    #[arg(long, env = "GOALBOARD_FILE", default_value = "goals.json")]
    file: PathBuf,

    /// Evaluate at this instant (RFC 3339 or YYYY-MM-DD) instead of now
    #[arg(long)]
    now: Option<String>,

    /// Threshold configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One line per goal
    Report {
        /// Only goals owned by this user
        #[arg(long)]
        user: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Full report for one goal
    Show {
        /// Goal ID
        id: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Totals across the board
    Summary {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let board = load_board(&cli.file)?;
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProgressConfig::default(),
    };
    let now = match &cli.now {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };
    debug!("Evaluating {} goals at {}", board.len(), now);

    let engine = ProgressEngine::with_clock(FixedClock::new(now)).with_config(config);

    match cli.command {
        Commands::Report { user, json } => {
            let snapshot = match user {
                Some(user) => engine.snapshot(board.for_user(&UserId::from(user))),
                None => engine.snapshot(board.iter()),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.reports)?);
            } else {
                println!("Goals ({})", snapshot.reports.len());
                for report in &snapshot.reports {
                    println!("  {}", report_line(report));
                }
            }
        }
        Commands::Show { id, json } => {
            let goal = find_goal(&board, &id)?;
            let report = engine.report(goal);
            let blockers = engine.analyze_dependencies(goal);

            if json {
                let value = serde_json::json!({ "report": report, "dependencies": blockers });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("Goal: {}", goal.id);
            println!("  Title: {}", goal.title);
            println!("  Type: {}  Status: {}  Priority: {}", goal.kind, goal.status, goal.priority);
            println!("  Progress: {}", report.summary);
            println!("  Timeline: {} ({})", report.status, report.color);
            if let Some(weighted) = report.weighted_progress {
                println!("  Weighted: {}%", weighted);
            }
            if let Some(streak) = report.streak {
                println!("  Streak: {} days", streak);
            }
            match report.estimated_completion {
                Some(eta) => println!("  Estimated completion: {}", eta.date_naive()),
                None => println!("  Estimated completion: unknown"),
            }
            if goal.target_date.is_some() {
                println!("  Required per day: {:.1}%", report.required_daily_progress);
            }

            if !blockers.is_clear() {
                println!("  Dependencies:");
                for blocked in &blockers.blocked {
                    let ids: Vec<String> = blocked.blocked_by.iter().map(|id| id.to_string()).collect();
                    println!("    {} waits on {}", blocked.task, ids.join(", "));
                }
                for missing in &blockers.missing {
                    println!("    {} depends on unknown task {}", missing.task, missing.dependency);
                }
                for chain in &blockers.circular_chains {
                    let ids: Vec<String> = chain.iter().map(|id| id.to_string()).collect();
                    println!("    cycle: {}", ids.join(" -> "));
                }
            }
        }
        Commands::Summary { json } => {
            let snapshot = engine.snapshot(board.iter());
            let s = &snapshot.summary;
            if json {
                println!("{}", serde_json::to_string_pretty(s)?);
            } else {
                println!("Goals: {} ({} active, {} paused, {} completed)", s.total_goals, s.active, s.paused, s.completed);
                println!("  on-track: {}  at-risk: {}  off-track: {}", s.on_track, s.at_risk, s.off_track);
                if let Some(avg) = s.average_progress {
                    println!("  average progress: {:.0}%", avg);
                }
            }
        }
    }

    Ok(())
}

fn report_line(report: &ProgressReport) -> String {
    format!(
        "{} | {} | {} | {}",
        report.goal_id, report.status, report.summary, report.title
    )
}

fn find_goal<'a>(board: &'a GoalBoard, id: &str) -> Result<&'a Goal> {
    let goal_id = GoalId::from(id);
    match board.get(&goal_id) {
        Some(goal) => Ok(goal),
        None => bail!("goal not found: {goal_id}"),
    }
}

fn load_board(path: &Path) -> Result<GoalBoard> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read goal board {}", path.display()))?;
    let board = parse_board(&raw).with_context(|| format!("Invalid goal board {}", path.display()))?;
    info!("Loaded {} goals from {}", board.len(), path.display());
    Ok(board)
}

fn parse_board(raw: &str) -> Result<GoalBoard> {
    let board: GoalBoard = serde_json::from_str(raw)?;
    board.validate()?;
    Ok(board)
}

fn load_config(path: &Path) -> Result<ProgressConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    ProgressConfig::from_json(&raw).with_context(|| format!("Invalid config {}", path.display()))
}

/// Accepts RFC 3339 timestamps or plain dates (midnight UTC).
fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid --now value: {raw}"))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}
