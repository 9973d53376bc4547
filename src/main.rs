use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use mobile_triage::cache::PathCache;
use mobile_triage::cli::{Args, Commands};
use mobile_triage::config::{load_or_create_config, TriageConfig};
use mobile_triage::discovery::discover;
use mobile_triage::scanner::Scanner;
use mobile_triage::store::ResultStore;
use mobile_triage::utils::summary::RunReport;

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(cmd) = &args.command {
        initialize_logging(args.verbose, None)?;
        return handle_subcommand(cmd);
    }

    let mut config = load_or_create_config(args.config.as_deref())?;
    apply_cli_overrides(&mut config, &args);
    initialize_logging(args.verbose, Some(&config.log_path))?;

    let started_at = Local::now();
    let root = args.root.clone().unwrap_or_else(|| config.default_root.clone());
    info!("Starting mobile triage of {}", root.display());

    let candidates = resolve_candidates(&config, &root, args.rescan)?;

    let store = ResultStore::new(&config.results_path);
    let workers = config.worker_count();
    let summary = Scanner::new(&store)
        .with_prior_extractions(candidates.prior_extractions)
        .run(candidates.paths, workers)?;

    if let Some(summary_path) = &config.summary_path {
        RunReport::new(
            &root,
            started_at,
            workers,
            candidates.from_cache,
            &config.results_path,
            summary,
        )
        .write_to(summary_path)?;
    }

    info!(
        "Triage completed: {} of {} archive(s) classified, {} left for manual triage",
        summary.classified, summary.total, summary.triage
    );
    Ok(())
}

/// Initialize terminal logging, mirrored to `log_file` when given
fn initialize_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        loggers.push(WriteLogger::new(log_level, Config::default(), file));
    }

    CombinedLogger::init(loggers).context("Failed to initialize logger")?;
    Ok(())
}

fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            info!("Creating default configuration file at {}", path.display());
            TriageConfig::default().save_to_yaml_file(path)?;
            info!("Configuration created successfully");
            Ok(())
        }
    }
}

fn apply_cli_overrides(config: &mut TriageConfig, args: &Args) {
    if let Some(output) = &args.output {
        config.results_path = output.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = Some(workers);
    }
}

struct Candidates {
    paths: Vec<String>,
    prior_extractions: usize,
    from_cache: bool,
}

/// Cached paths when available, otherwise a fresh walk stored back into the cache.
fn resolve_candidates(config: &TriageConfig, root: &Path, rescan: bool) -> Result<Candidates> {
    let mut cache = PathCache::open(&config.cache_path)?;

    if !rescan {
        let cached = cache.load()?;
        if !cached.is_empty() {
            info!("Taking {} zip path(s) from {}", cached.len(), config.cache_path.display());
            return Ok(Candidates {
                paths: cached,
                prior_extractions: 0,
                from_cache: true,
            });
        }
    }

    let discovery = discover(root, &config.discovery_rules());
    cache.store(&discovery.candidates)?;

    Ok(Candidates {
        paths: discovery.candidates,
        prior_extractions: discovery.prior_extractions,
        from_cache: false,
    })
}
