//! Command-line front end over the CampusVoice core.
//!
//! # Responsibility
//! - Sign in with demo credentials and run dashboard queries against the
//!   seeded in-memory store.
//! - Print human-readable text by default, JSON with `--json`.
//!
//! The store lives for one invocation only; `submit` prints the stored
//! record but nothing persists across runs.

use anyhow::{bail, Context};
use campusvoice_core::{
    CoreConfig, CredentialVerifier, DashboardService, FeedbackDraft, FeedbackService,
    InMemoryFeedbackRepository, MockCredentialVerifier, UserIdentity,
};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "campusvoice: campus event feedback analytics",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Restrict dashboard commands to one event ID.
    #[arg(long, global = true)]
    event: Option<String>,

    /// Account email used to sign in.
    #[arg(long, global = true, env = "CAMPUSVOICE_EMAIL")]
    email: Option<String>,

    /// Account password used to sign in.
    #[arg(long, global = true, env = "CAMPUSVOICE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Directory for rolling log files; logging stays off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (`trace|debug|info|warn|error`).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check core linkage.
    Ping,

    /// List events grouped by category.
    Events,

    /// List feedback newest first (admin).
    List,

    /// Show sentiment summary cards (admin).
    Summary,

    /// Show the word cloud (admin).
    Words,

    /// Show the sentiment trend series (admin).
    Trend,

    /// Export the selection as CSV (admin).
    #[command(
        after_help = "EXAMPLES:\n    # Print CSV for one event\n    campusvoice export --event event1\n\n    # Write feedback-data-YYYY-MM-DD.csv into a directory\n    campusvoice export --out-dir ./exports"
    )]
    Export {
        /// Write the file here instead of printing it.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Submit feedback for `--event` as the signed-in user.
    Submit {
        /// Star rating, 1 to 5.
        #[arg(long)]
        rating: u8,

        #[arg(long, default_value = "")]
        comment: String,

        /// Hide the author from admins.
        #[arg(long)]
        anonymous: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env().context("invalid environment configuration")?;
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.start_logging().context("failed to start logging")?;

    let repo = InMemoryFeedbackRepository::seeded().context("failed to seed feedback store")?;
    let mut service = FeedbackService::new(repo).with_submit_latency(config.submit_latency);
    let event = cli.event.as_deref();

    match &cli.command {
        Commands::Ping => {
            println!("campusvoice_core ping={}", campusvoice_core::ping());
            println!("campusvoice_core version={}", campusvoice_core::core_version());
        }
        Commands::Events => {
            let groups = service.events_by_category()?;
            emit(cli.json, &groups, || {
                for group in &groups {
                    println!("{}", group.category);
                    for event in &group.events {
                        println!("  {:<8} {}  {}", event.id, event.date, event.name);
                    }
                }
            })?;
        }
        Commands::List => {
            let viewer = sign_in(&cli, &config)?;
            let dashboard = DashboardService::open(service.repository(), &viewer)?;
            let views = dashboard.feedback_views(event)?;
            emit(cli.json, &views, || {
                if views.is_empty() {
                    println!("No feedback found");
                }
                for view in &views {
                    println!(
                        "{}  {}  {}/5  {:+.2} {}  by {}",
                        view.created_at.format("%Y-%m-%d %H:%M"),
                        view.event_name,
                        view.rating,
                        view.sentiment_score,
                        view.sentiment_label.display(),
                        view.author_display
                    );
                    if !view.comment.is_empty() {
                        println!("    {}", view.comment);
                    }
                }
            })?;
        }
        Commands::Summary => {
            let viewer = sign_in(&cli, &config)?;
            let dashboard = DashboardService::open(service.repository(), &viewer)?;
            let summary = dashboard.summary(event)?;
            let selected = dashboard.selected_event(event)?;
            emit(cli.json, &summary, || {
                if let Some(selected) = &selected {
                    println!("Event:             {}", selected.name);
                }
                println!("Total feedback:    {}", summary.total);
                println!("Average rating:    {:.1}", summary.average_rating);
                println!(
                    "Average sentiment: {:.2} (gauge {}%)",
                    summary.average_sentiment,
                    summary.sentiment_gauge_percent()
                );
                println!("Trend:             {}", summary.trend.label());
                println!(
                    "Distribution:      {}% positive / {}% neutral / {}% negative",
                    summary.distribution.positive,
                    summary.distribution.neutral,
                    summary.distribution.negative
                );
            })?;
        }
        Commands::Words => {
            let viewer = sign_in(&cli, &config)?;
            let dashboard = DashboardService::open(service.repository(), &viewer)?;
            let words = dashboard.word_cloud(event)?;
            emit(cli.json, &words, || {
                if words.is_empty() {
                    println!("No feedback comments available for word cloud");
                }
                for word in &words {
                    let marker = if word.is_emphasized() { "*" } else { " " };
                    println!(
                        "{marker} {:<16} {:>3}  {:+.2} {}",
                        word.text,
                        word.count,
                        word.mean_sentiment,
                        word.tone().as_str()
                    );
                }
            })?;
        }
        Commands::Trend => {
            let viewer = sign_in(&cli, &config)?;
            let dashboard = DashboardService::open(service.repository(), &viewer)?;
            let series = dashboard.trend_series(event)?;
            emit(cli.json, &series, || {
                for point in &series.points {
                    println!(
                        "{:<14} sentiment={:+.2} rating={:.1}",
                        point.label, point.sentiment_score, point.normalized_rating
                    );
                }
            })?;
        }
        Commands::Export { out_dir } => {
            let viewer = sign_in(&cli, &config)?;
            let dashboard = DashboardService::open(service.repository(), &viewer)?;
            let today = chrono::Utc::now().date_naive();
            let export = dashboard.export_csv(event, today)?;
            match out_dir {
                Some(dir) => {
                    let path = campusvoice_core::write_export(dir, &export.content, today)
                        .with_context(|| format!("failed to write export into {}", dir.display()))?;
                    println!("Wrote {} row(s) to {}", export.rows, path.display());
                }
                None => println!("{}", export.content),
            }
        }
        Commands::Submit {
            rating,
            comment,
            anonymous,
        } => {
            let author = sign_in(&cli, &config)?;
            let draft = FeedbackDraft {
                event_id: event.unwrap_or_default().to_string(),
                rating: *rating,
                comment: comment.clone(),
                is_anonymous: *anonymous,
            };
            let created = service.submit_draft(draft, Some(&author))?;
            emit(cli.json, &created, || {
                println!(
                    "Feedback submitted successfully! id={} sentiment={}",
                    created.id, created.sentiment_score
                );
            })?;
        }
    }
    Ok(())
}

fn sign_in(cli: &Cli, config: &CoreConfig) -> anyhow::Result<UserIdentity> {
    let (Some(email), Some(password)) = (cli.email.as_deref(), cli.password.as_deref()) else {
        bail!("sign in with --email and --password (or CAMPUSVOICE_EMAIL / CAMPUSVOICE_PASSWORD)");
    };
    let verifier = MockCredentialVerifier::with_demo_accounts().with_latency(config.login_latency);
    let identity = verifier.verify(email, password)?;
    info!(
        "event=cli_sign_in module=cli status=ok user_id={} role={}",
        identity.id,
        identity.role.as_str()
    );
    Ok(identity)
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}
