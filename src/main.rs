//! fault-warden CLI: search the handbook, file incident reports, view
//! statistics, and administer handbook entries.
//!
//! Usage:
//!   fault-warden search "motor overheating"
//!   fault-warden report --worker A123 --query "motor" --action "Restarted motor"
//!   fault-warden stats
//!   fault-warden admin list

use anyhow::Result;
use clap::{Parser, Subcommand};
use fault_warden::config::Config;
use fault_warden::credentials::CredentialStore;
use fault_warden::engine::{score_steps, Recommendation};
use fault_warden::handbook::{Handbook, IssueRecord};
use fault_warden::logstore::LogStore;
use fault_warden::report::file_report;
use fault_warden::session::Session;
use fault_warden::stats::issue_stats;
use fault_warden::steps::normalize_steps;
use tracing::info;

#[derive(Parser)]
#[command(name = "fault-warden")]
#[command(about = "Troubleshooting handbook lookup and incident logging", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the handbook and show ranked remediation steps
    Search { query: String },
    /// File an incident report against the first issue matching the query
    Report {
        /// Worker ID to report as
        #[arg(long)]
        worker: String,
        /// Handbook search query; the first match is the reported issue
        #[arg(long)]
        query: String,
        /// Action taken, free text
        #[arg(long)]
        action: String,
        /// Also fold the action into the issue's solution steps
        #[arg(long)]
        append_solution: bool,
    },
    /// Per-issue incident counts from the log
    Stats,
    /// Handbook administration
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List all handbook entries
    List,
    /// Add a handbook entry
    Add {
        #[arg(long)]
        issue: String,
        #[arg(long, default_value = "")]
        keyword: String,
        #[arg(long, default_value = "")]
        solution: String,
    },
    /// Remove the entry with this exact issue title
    Remove { issue: String },
}

fn main() -> Result<()> {
    fault_warden::load_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fault_warden=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Search { query } => search(&config, &query),
        Commands::Report {
            worker,
            query,
            action,
            append_solution,
        } => report(&config, &worker, &query, &action, append_solution),
        Commands::Stats => stats(&config),
        Commands::Admin { command } => admin(&config, command),
    }
}

fn open_handbook(config: &Config) -> Handbook {
    Handbook::open(&config.stores.handbook_path, &config.stores.backup_dir)
}

fn search(config: &Config, query: &str) -> Result<()> {
    let handbook = open_handbook(config);
    let matches = handbook.find_all(query);
    let Some(entry) = matches.first().copied() else {
        println!("No handbook entry matches '{query}'.");
        return Ok(());
    };

    println!("Issue: {}", entry.issue);
    let steps = normalize_steps(&entry.solution);
    if steps.is_empty() {
        println!("  (no remediation steps recorded)");
        return Ok(());
    }

    let log_text = LogStore::new(&config.stores.log_path).read_or_empty();
    let scores = score_steps(&entry.issue, &steps, &log_text);
    for (i, (step, score)) in scores.iter().enumerate() {
        let band = Recommendation::from_probability(score.probability);
        println!(
            "  {}. {} — {:.1}% ({}, {} hits)",
            i + 1,
            step,
            score.probability,
            band.as_str(),
            score.match_count
        );
    }
    if matches.len() > 1 {
        println!("Other matching issues:");
        for other in &matches[1..] {
            println!("  - {}", other.issue);
        }
    }
    Ok(())
}

fn report(
    config: &Config,
    worker: &str,
    query: &str,
    action: &str,
    append_solution: bool,
) -> Result<()> {
    let credentials = CredentialStore::load(&config.stores.credentials_path);
    let Some(session) = Session::log_in(&credentials, worker) else {
        println!("Unknown worker ID '{worker}'.");
        return Ok(());
    };

    let mut handbook = open_handbook(config);
    let Some(issue_title) = handbook.find(query).map(|e| e.issue.clone()) else {
        println!("No handbook entry matches '{query}'.");
        return Ok(());
    };

    let log = LogStore::new(&config.stores.log_path);
    match file_report(
        &mut handbook,
        &log,
        &issue_title,
        action,
        &session,
        append_solution,
    ) {
        Ok(outcome) => {
            if let Some(err) = &outcome.handbook_error {
                println!("Warning: handbook update failed: {err}");
            }
            if let Some(err) = &outcome.log_error {
                println!("Warning: log append failed: {err}");
            }
            if outcome.is_clean() {
                info!("Report filed for '{}'", issue_title);
                println!(
                    "Report filed: {} / {} ({})",
                    outcome.record.issue, outcome.record.action, outcome.record.timestamp
                );
            }
        }
        Err(err) => println!("Report rejected: {err}"),
    }
    Ok(())
}

fn stats(config: &Config) -> Result<()> {
    let log_text = LogStore::new(&config.stores.log_path).read_or_empty();
    let stats = issue_stats(&log_text);
    if stats.is_empty() {
        println!("No incidents logged yet.");
        return Ok(());
    }
    for entry in stats {
        match entry.top_action {
            Some(action) => println!(
                "{:>4}  {}  (top action: {})",
                entry.incident_count, entry.issue, action
            ),
            None => println!("{:>4}  {}", entry.incident_count, entry.issue),
        }
    }
    Ok(())
}

fn admin(config: &Config, command: AdminCommands) -> Result<()> {
    let mut handbook = open_handbook(config);
    match command {
        AdminCommands::List => {
            for entry in handbook.entries() {
                println!("{} [keyword: {}]", entry.issue, entry.keyword);
                for (i, step) in normalize_steps(&entry.solution).iter().enumerate() {
                    println!("    {}. {}", i + 1, step);
                }
            }
        }
        AdminCommands::Add {
            issue,
            keyword,
            solution,
        } => {
            handbook.push(IssueRecord {
                issue: issue.clone(),
                keyword,
                solution,
            });
            if let Err(err) = handbook.save() {
                println!("Warning: handbook save failed: {err}");
            } else {
                println!("Added '{issue}'.");
            }
        }
        AdminCommands::Remove { issue } => {
            if !handbook.remove(&issue) {
                println!("No entry titled '{issue}'.");
            } else if let Err(err) = handbook.save() {
                println!("Warning: handbook save failed: {err}");
            } else {
                println!("Removed '{issue}'.");
            }
        }
    }
    Ok(())
}
