//! CLI binary for ProfessionCost: rank crafting professions by leveling cost.

mod discover;
mod progress;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use profcost_core::catalog::MarketSnapshot;
use profcost_core::config::{ProfCostConfig, Profession};
use profcost_core::model::Dialect;
use profcost_estimator::{CachedGuideFetcher, estimate_guides, load_guides, rank, resolve_step};
use progress::ProfessionProgress;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "profession-cost",
    version,
    about = "Estimate the auction-house cost of leveling each crafting profession"
)]
struct Cli {
    /// Project root directory holding data/, cache/ and .profcost/ (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank professions by leveling cost for each price snapshot
    Report {
        /// Snapshot files (defaults to every data/*.xml)
        snapshots: Vec<PathBuf>,

        /// Only estimate these professions (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// List reagents that had no market price
        #[arg(long)]
        show_missing: bool,

        /// Never download guides; use the cache only
        #[arg(long)]
        offline: bool,

        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List configured professions and their guide cache status
    Professions,

    /// Parse one guide line and show its reagent alternatives
    Parse {
        /// The guide step text
        line: String,

        /// Line dialect: generic, stack-count
        #[arg(short, long, default_value = "generic")]
        dialect: String,

        /// Price the line against this snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Download leveling guides into the cache
    Fetch {
        /// Re-download guides that are already cached
        #[arg(long)]
        force: bool,

        /// Only fetch these professions (repeatable)
        #[arg(long)]
        only: Vec<String>,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    match cli.command {
        Commands::Report {
            snapshots,
            only,
            show_missing,
            offline,
            format,
        } => cmd_report(&project_root, snapshots, &only, show_missing, offline, &format),
        Commands::Professions => cmd_professions(&project_root),
        Commands::Parse {
            line,
            dialect,
            snapshot,
        } => cmd_parse(&project_root, &line, &dialect, snapshot.as_deref()),
        Commands::Fetch { force, only } => cmd_fetch(&project_root, force, &only),
    }
}

/// Configured professions, narrowed to `only` when given.
fn select_professions(config: &ProfCostConfig, only: &[String]) -> Result<Vec<Profession>> {
    if only.is_empty() {
        return Ok(config.professions.clone());
    }
    only.iter()
        .map(|name| {
            config.profession(name).cloned().ok_or_else(|| {
                let known: Vec<&str> = config.professions.iter().map(|p| p.name.as_str()).collect();
                anyhow::anyhow!(
                    "unknown profession: {}. Configured: {}",
                    name,
                    known.join(", ")
                )
            })
        })
        .collect()
}

fn guide_fetcher(config: &ProfCostConfig, project_root: &Path) -> CachedGuideFetcher {
    CachedGuideFetcher::new(
        config.cache_dir(project_root),
        Duration::from_secs(config.guides.timeout_secs),
        config.guides.offline,
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Table,
    Json,
}

fn cmd_report(
    project_root: &Path,
    snapshots: Vec<PathBuf>,
    only: &[String],
    show_missing: bool,
    offline: bool,
    format: &str,
) -> Result<()> {
    let format = match format {
        "table" => ReportFormat::Table,
        "json" => ReportFormat::Json,
        _ => anyhow::bail!("Unknown report format: {}. Use 'table' or 'json'.", format),
    };

    let mut config = ProfCostConfig::load(project_root)?;
    if offline {
        config.guides.offline = true;
    }
    let professions = select_professions(&config, only)?;

    let snapshot_paths = if snapshots.is_empty() {
        let dir = config.data_dir(project_root);
        let found = discover::find_snapshots(&dir, &config.data.pattern)?;
        if found.is_empty() {
            anyhow::bail!(
                "No price snapshots found in {} matching '{}'.",
                dir.display(),
                config.data.pattern
            );
        }
        found
    } else {
        snapshots
    };

    let fetcher = guide_fetcher(&config, project_root);
    let progress = ProfessionProgress::new("Loading guides", professions.len());
    let guides = load_guides(&professions, &fetcher, |p| progress.done(&p.name));
    progress.finish();
    let guides = guides?;

    let policy = config.pricing.missing_price;
    let mut ranked_sets = Vec::new();

    for path in &snapshot_paths {
        let snapshot = MarketSnapshot::load(path)
            .with_context(|| format!("failed to load price snapshot {}", path.display()))?;
        tracing::info!(
            snapshot = %path.display(),
            items = snapshot.len(),
            "estimating professions"
        );
        let results = rank(estimate_guides(&guides, &snapshot, policy)?);
        let label = discover::snapshot_label(snapshot.realm(), path);

        match format {
            ReportFormat::Table => {
                println!("{}", report::render_table(&label, &results));
                if show_missing && let Some(missing) = report::render_missing(&results) {
                    println!("{}", missing);
                }
            }
            ReportFormat::Json => ranked_sets.push((label, path.clone(), results)),
        }
    }

    if let ReportFormat::Json = format {
        let json_reports: Vec<report::JsonReport<'_>> = ranked_sets
            .iter()
            .map(|(label, path, results)| report::JsonReport::new(label, path, results))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_reports)?);
    }

    Ok(())
}

fn cmd_professions(project_root: &Path) -> Result<()> {
    let config = ProfCostConfig::load(project_root)?;
    let fetcher = guide_fetcher(&config, project_root);

    let width = config
        .professions
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0);
    for profession in &config.professions {
        println!(
            "{:<width$}  {:<11}  {:<6}  {}",
            profession.name,
            profession.dialect.name(),
            if fetcher.is_cached(profession) {
                "cached"
            } else {
                "-"
            },
            profession.url,
            width = width
        );
    }
    eprintln!(
        "\n{} profession(s), cache: {}",
        config.professions.len(),
        fetcher.cache_dir().display()
    );
    Ok(())
}

fn cmd_parse(
    project_root: &Path,
    line: &str,
    dialect: &str,
    snapshot: Option<&Path>,
) -> Result<()> {
    let dialect: Dialect = dialect.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let set = profcost_parser::parse_line(dialect, line);

    println!("Dialect: {}", dialect);
    println!("Alternatives: {}", set.len());
    for (i, group) in set.groups().iter().enumerate() {
        println!("  {}. {}", i + 1, group);
    }

    if let Some(path) = snapshot {
        let config = ProfCostConfig::load(project_root)?;
        let catalog = MarketSnapshot::load(path)
            .with_context(|| format!("failed to load price snapshot {}", path.display()))?;
        let step = resolve_step(&set, &catalog, config.pricing.missing_price)?;
        println!(
            "\nLow: {}  High: {}  Median: {}",
            report::gold(step.stats.low),
            report::gold(step.stats.high),
            report::gold(step.stats.median)
        );
        if !step.not_found.is_empty() {
            println!("Not found: {}", step.not_found.join(", "));
        }
    }

    Ok(())
}

fn cmd_fetch(project_root: &Path, force: bool, only: &[String]) -> Result<()> {
    let config = ProfCostConfig::load(project_root)?;
    if config.guides.offline {
        anyhow::bail!("Guide downloads are disabled (guides.offline = true).");
    }
    let professions = select_professions(&config, only)?;
    let fetcher = guide_fetcher(&config, project_root);

    let progress = ProfessionProgress::new("Fetching guides", professions.len());
    let mut downloaded = 0usize;
    for profession in &professions {
        if force || !fetcher.is_cached(profession) {
            if let Err(e) = fetcher.download(profession) {
                progress.finish();
                return Err(e).with_context(|| format!("failed to fetch {}", profession.name));
            }
            downloaded += 1;
        } else {
            progress.println(&format!("  {} already cached", profession.name));
        }
        progress.done(&profession.name);
    }
    progress.finish();

    eprintln!(
        "Fetched {} guide(s) into {}",
        downloaded,
        fetcher.cache_dir().display()
    );
    Ok(())
}
