//! CLI driver for the domain acquisition pipeline.
//!
//! Provides the interactive hunt plus snapshot-based export and stats
//! commands.
//!
//! # Usage
//!
//! ```bash
//! # Run the full pipeline interactively
//! cargo run -- hunt
//!
//! # Non-interactive hunt
//! cargo run -- hunt --seed crypto --target 5000 --yes
//!
//! # Continue on top of the saved snapshot
//! cargo run -- hunt --append
//!
//! # Export the clean inventory from the saved snapshot
//! cargo run -- export
//!
//! # Show snapshot statistics
//! cargo run -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `HUNTER_OPERATOR` (required for `hunt`): current operator identity
//! - See [`domain_hunter::config`] for the full list
//!
//! # Features
//!
//! - **Live Progress**: pipeline events rendered as they arrive
//! - **Cooperative Cancel**: Ctrl-C stops scheduling, keeps collected data
//! - **Interactive Prompts**: seed, target, and threshold dialogs
//! - **Colored Output**: terminal-friendly formatting using `colored` crate

use std::path::PathBuf;
use std::sync::RwLockReadGuard;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use tracing_subscriber::EnvFilter;

use domain_hunter::application::services::{RunOptions, RunSummary};
use domain_hunter::config::Config;
use domain_hunter::domain::entities::{DomainCandidate, FilterProfile};
use domain_hunter::domain::inventory::Inventory;
use domain_hunter::domain::pipeline_event::PipelineEvent;
use domain_hunter::domain::providers::IdentityProvider;
use domain_hunter::infrastructure::export::CsvExporter;
use domain_hunter::infrastructure::persistence::Snapshot;
use domain_hunter::state::AppState;

/// CLI tool for hunting expired domains.
#[derive(Parser)]
#[command(name = "domain-hunter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the discovery, qualification, and vetting pipeline
    Hunt {
        /// Seed keyword for name generation (prompted when omitted)
        #[arg(short, long)]
        seed: Option<String>,

        /// Crawl target count (prompted when omitted)
        #[arg(short, long)]
        target: Option<usize>,

        /// Crawl on top of the saved snapshot instead of starting fresh
        #[arg(short, long)]
        append: bool,

        /// Skip prompts and use defaults
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Export the clean inventory from the saved snapshot
    Export {
        /// Output file (default: timestamped name in HUNTER_EXPORT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show statistics of the saved snapshot
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    let cli = Cli::parse();

    match cli.command {
        Commands::Hunt {
            seed,
            target,
            append,
            yes,
        } => run_hunt(config, seed, target, append, yes).await?,
        Commands::Export { output } => run_export(config, output).await?,
        Commands::Stats => run_stats(config).await?,
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Runs the full pipeline interactively.
///
/// # Flow
///
/// 1. Verify a session exists (identity provider)
/// 2. Optionally restore the saved snapshot (`--append`)
/// 3. Prompt for seed, target, and thresholds
/// 4. Drive the pipeline, rendering progress events live
/// 5. Offer the audit report and CSV export
/// 6. Save the snapshot
async fn run_hunt(
    config: Config,
    seed: Option<String>,
    target: Option<usize>,
    append: bool,
    yes: bool,
) -> Result<()> {
    println!("{}", "🌐 Domain Hunter".bright_blue().bold());
    println!();

    let (state, events) = AppState::new(config);

    let identity = state
        .identity
        .current_identity()
        .await
        .context("Identity check failed")?;

    let Some(identity) = identity else {
        println!(
            "{}",
            "❌ No active session. Set HUNTER_OPERATOR before hunting.".red()
        );
        bail!("not signed in");
    };
    println!("  Operator: {}", identity.operator.cyan());
    println!();

    let mut profile = FilterProfile::default();
    let mut snapshot_seed = None;

    if append {
        match state.snapshots.load().await {
            Ok(snapshot) => {
                let (restored, restored_profile, restored_seed) = snapshot.restore();
                println!(
                    "  Loaded snapshot with {} candidates",
                    restored.len().to_string().bright_white().bold()
                );
                profile = restored_profile;
                snapshot_seed = restored_seed;
                *write_inventory(&state) = restored;
            }
            Err(e) => {
                println!("{}", format!("⚠️  No usable snapshot ({e}); starting fresh").yellow());
            }
        }
    }

    let seed_keyword = match seed {
        Some(s) => s,
        None => Input::new()
            .with_prompt("Seed keyword")
            .with_initial_text(snapshot_seed.unwrap_or_else(|| "crypto".to_string()))
            .interact_text()?,
    };

    let target = match target {
        Some(t) => t,
        None => Input::new()
            .with_prompt("Scan target")
            .default(state.config.default_scan_target)
            .interact_text()?,
    };

    if !yes {
        profile = prompt_profile(profile)?;
    }

    println!();
    println!("{}", "Hunt parameters:".bright_white().bold());
    println!("  Seed:    {}", seed_keyword.cyan());
    println!("  Target:  {}", target.to_string().bright_yellow());
    println!(
        "  Filters: DR≥{} UR≥{} RD≥{} TF≥{} CF≥{} price≤{:.2}",
        profile.min_domain_rating,
        profile.min_url_rating,
        profile.min_referring_domains,
        profile.min_trust_flow,
        profile.min_citation_flow,
        profile.max_price
    );
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Start the hunt?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let run = state.pipeline.start(RunOptions {
        seed_keyword: seed_keyword.clone(),
        target,
        append,
        profile: profile.clone(),
    })?;

    let printer = tokio::spawn(render_events(events));

    let mut handle = run.handle;
    let summary: RunSummary = tokio::select! {
        joined = &mut handle => joined.context("pipeline task failed")??,
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "⚠️  Cancelling after the current chunk...".yellow());
            run.controller.cancel();
            (&mut handle).await.context("pipeline task failed")??
        }
    };

    // The printer exits on the terminal event; don't wait on it forever if
    // the run ended without one.
    tokio::time::timeout(std::time::Duration::from_secs(2), printer)
        .await
        .ok();

    println!();
    if summary.cancelled {
        println!("{}", "⚠️  Run cancelled".yellow().bold());
    } else {
        println!("{}", "✅ Run completed".green().bold());
    }

    print_summary(&read_inventory(&state));

    if !yes {
        let wants_report = Confirm::new()
            .with_prompt("Generate the audit report?")
            .default(false)
            .interact()?;

        if wants_report {
            let batch: Vec<DomainCandidate> = read_inventory(&state)
                .export_candidates()
                .into_iter()
                .cloned()
                .collect();
            let report = state.audit.report(&batch, &profile).await;
            println!();
            println!("{}", "🤖 Audit Report".bright_blue().bold());
            for line in report.lines() {
                println!("  {line}");
            }
            println!();
        }
    }

    let wants_export = yes
        || Confirm::new()
            .with_prompt("Export clean domains to CSV?")
            .default(true)
            .interact()?;

    if wants_export {
        export_inventory(&state, None).await?;
    }

    let snapshot = {
        let inventory = read_inventory(&state);
        Snapshot::capture(Some(seed_keyword), &profile, &inventory)
    };
    state.snapshots.save(&snapshot).await?;
    println!(
        "  Snapshot saved to {}",
        state.snapshots.path().display().to_string().bright_black()
    );

    Ok(())
}

/// Exports the clean inventory of the saved snapshot.
async fn run_export(config: Config, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "📤 Export".bright_blue().bold());
    println!();

    let (state, _events) = AppState::new(config);

    let snapshot = state
        .snapshots
        .load()
        .await
        .context("No snapshot to export; run a hunt first")?;
    let (restored, _, _) = snapshot.restore();
    *write_inventory(&state) = restored;

    export_inventory(&state, output).await
}

/// Prints statistics of the saved snapshot.
async fn run_stats(config: Config) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (state, _events) = AppState::new(config);

    let snapshot = state
        .snapshots
        .load()
        .await
        .context("No snapshot found; run a hunt first")?;
    let saved_at = snapshot.saved_at;
    let (inventory, _, seed) = snapshot.restore();
    let stats = inventory.stats();

    if let Some(seed) = seed {
        println!("  Seed:           {}", seed.cyan());
    }
    println!("  Saved:          {}", saved_at.format("%Y-%m-%d %H:%M"));
    println!(
        "  Total found:    {}",
        stats.total_found.to_string().bright_green().bold()
    );
    println!(
        "  Passed filters: {}",
        stats.passed_filters.to_string().bright_green().bold()
    );
    println!(
        "  Clean:          {}",
        stats.clean_domains.to_string().bright_green().bold()
    );
    println!("  Penalized:      {}", stats.penalized.to_string().red());
    println!("  Rejected:       {}", stats.rejected.to_string().red());
    println!(
        "  Ignored:        {}",
        stats.ignored.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Interactive threshold adjustment; returns the profile unchanged when the
/// operator declines.
fn prompt_profile(mut profile: FilterProfile) -> Result<FilterProfile> {
    let adjust = Confirm::new()
        .with_prompt("Adjust filter thresholds?")
        .default(false)
        .interact()?;

    if !adjust {
        return Ok(profile);
    }

    profile.min_domain_rating = Input::new()
        .with_prompt("Min DR")
        .default(profile.min_domain_rating)
        .interact_text()?;
    profile.min_url_rating = Input::new()
        .with_prompt("Min UR")
        .default(profile.min_url_rating)
        .interact_text()?;
    profile.min_referring_domains = Input::new()
        .with_prompt("Min RD")
        .default(profile.min_referring_domains)
        .interact_text()?;
    profile.min_trust_flow = Input::new()
        .with_prompt("Min TF")
        .default(profile.min_trust_flow)
        .interact_text()?;
    profile.min_citation_flow = Input::new()
        .with_prompt("Min CF")
        .default(profile.min_citation_flow)
        .interact_text()?;
    profile.max_price = Input::new()
        .with_prompt("Max price")
        .default(profile.max_price)
        .interact_text()?;
    profile.exclude_spam_anchors = Confirm::new()
        .with_prompt("Exclude spam anchor profiles?")
        .default(profile.exclude_spam_anchors)
        .interact()?;

    let tlds: String = Input::new()
        .with_prompt("Allowed TLDs, comma separated (empty = all)")
        .allow_empty(true)
        .interact_text()?;

    profile.allowed_tlds.clear();
    for raw in tlds.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        profile.allow_tld(raw)?;
    }

    Ok(profile)
}

/// Renders pipeline events until the run reports a terminal event.
async fn render_events(mut events: tokio::sync::mpsc::Receiver<PipelineEvent>) {
    while let Some(event) = events.recv().await {
        let terminal = matches!(
            event,
            PipelineEvent::RunCompleted { .. } | PipelineEvent::RunCancelled { .. }
        );
        match event {
            PipelineEvent::CrawlStarted {
                seed_keyword,
                target,
                append,
            } => {
                let mode = if append { "append" } else { "fresh" };
                println!(
                    "  {} crawl for {} ({mode}, target {target})",
                    "▶".bright_blue(),
                    seed_keyword.cyan()
                );
            }
            PipelineEvent::SuggestionsLoaded { count } => {
                println!("  {} {count} name fragments suggested", "·".bright_black());
            }
            PipelineEvent::SuggestionsUnavailable { .. } => {
                println!(
                    "  {} suggestion service unavailable, keyword-only naming",
                    "·".yellow()
                );
            }
            PipelineEvent::CrawlProgress { accepted, target } => {
                println!("  {} collected {accepted} / {target}", "·".bright_black());
            }
            PipelineEvent::CrawlCompleted {
                accepted,
                total_in_inventory,
            } => {
                println!(
                    "  {} crawl done: {accepted} accepted ({total_in_inventory} held)",
                    "✔".green()
                );
            }
            PipelineEvent::FilterStarted { pending } => {
                println!("  {} filtering {pending} candidates", "▶".bright_blue());
            }
            PipelineEvent::FilterCompleted { passed, rejected } => {
                println!(
                    "  {} filter done: {} passed, {} rejected",
                    "✔".green(),
                    passed.to_string().green(),
                    rejected.to_string().red()
                );
            }
            PipelineEvent::VerificationStarted { pending } => {
                println!(
                    "  {} penalty check over {pending} candidates",
                    "▶".bright_blue()
                );
            }
            PipelineEvent::VerificationProgress { checked, pending } => {
                println!("  {} verified {checked} / {pending}", "·".bright_black());
            }
            PipelineEvent::VerificationCompleted { clean, penalized } => {
                println!(
                    "  {} verification done: {} clean, {} penalized",
                    "✔".green(),
                    clean.to_string().green(),
                    penalized.to_string().red()
                );
            }
            PipelineEvent::RunCompleted { stats } => {
                println!(
                    "  {} run complete: {} clean of {} found",
                    "✔".green().bold(),
                    stats.clean_domains,
                    stats.total_found
                );
            }
            PipelineEvent::RunCancelled { phase, stats } => {
                println!(
                    "  {} cancelled during {} ({} candidates kept)",
                    "✖".yellow(),
                    phase.label(),
                    stats.total_found
                );
            }
        }

        if terminal {
            break;
        }
    }
}

/// Prints the clean-inventory table and the aggregate counters.
fn print_summary(inventory: &Inventory) {
    let stats = inventory.stats();

    println!();
    println!(
        "  {:<28} {:>4} {:>8} {:>4} {:>4} {:>5}  {}",
        "Domain".bright_white().bold(),
        "Age".bright_white().bold(),
        "Price".bright_white().bold(),
        "DR".bright_white().bold(),
        "TF".bright_white().bold(),
        "RD".bright_white().bold(),
        "Market".bright_white().bold()
    );
    println!("  {}", "─".repeat(68).bright_black());

    for candidate in inventory.clean().take(15) {
        println!(
            "  {:<28} {:>4} {:>8} {:>4} {:>4} {:>5}  {}",
            candidate.full_name().bright_white(),
            candidate.age,
            format!("{:.2}", candidate.price).bright_green(),
            candidate.metrics.domain_rating.to_string().yellow(),
            candidate.metrics.trust_flow.to_string().magenta(),
            candidate.metrics.referring_domains,
            candidate.marketplace.label().bright_black()
        );
    }

    if stats.clean_domains > 15 {
        println!(
            "  {} and {} more",
            "…".bright_black(),
            stats.clean_domains - 15
        );
    }
    if stats.clean_domains == 0 {
        println!("  {}", "No clean domains found".yellow());
    }

    println!();
    println!(
        "  Found {} | Passed {} | Clean {} | Penalized {} | Rejected {}",
        stats.total_found.to_string().bright_white().bold(),
        stats.passed_filters,
        stats.clean_domains.to_string().green().bold(),
        stats.penalized.to_string().red(),
        stats.rejected.to_string().red()
    );
    println!();
}

/// Writes the export set to `output` or a timestamped default path.
async fn export_inventory(state: &AppState, output: Option<PathBuf>) -> Result<()> {
    let inventory = read_inventory(state);
    let export_set = inventory.export_candidates();

    if export_set.is_empty() {
        println!("{}", "  Nothing to export".yellow());
        return Ok(());
    }

    let selected = inventory.selected_count() > 0;
    let path = output.unwrap_or_else(|| {
        state
            .config
            .export_dir
            .join(CsvExporter::default_file_name(selected))
    });

    state.exporter.write_to(&path, &export_set).await?;

    println!(
        "  {} {} domains exported to {}",
        "✔".green(),
        export_set.len(),
        path.display().to_string().bright_white()
    );

    Ok(())
}

fn read_inventory(state: &AppState) -> RwLockReadGuard<'_, Inventory> {
    state.inventory.read().expect("inventory lock poisoned")
}

fn write_inventory(state: &AppState) -> std::sync::RwLockWriteGuard<'_, Inventory> {
    state.inventory.write().expect("inventory lock poisoned")
}
