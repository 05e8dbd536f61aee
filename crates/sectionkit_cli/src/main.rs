//! `sectionkit` command-line entry point.
//!
//! # Responsibility
//! - Inspect section, sidebar card and workflow catalogs from a terminal.
//! - Print render descriptors exactly as a rendering host would receive them.
//! - Diff two captures of a page's sections.
//!
//! # Invariants
//! - Payloads go to stdout; logs and errors go to stderr.
//! - A lookup miss exits with status 1.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use sectionkit_core::{
    core_version, create_snapshot_envelope, diff_snapshot_sets, get_sidebar_card, get_workflow,
    init_logging, init_stderr_logging, lint_catalog, resolve_section_descriptor, Catalog,
    DiffOptions, PageSection, SnapshotEnvelope, SnapshotOptions,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sectionkit")]
#[command(version)]
#[command(about = "Inspect section schemas and their render descriptors", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Catalog directory with sections.json, sidebar_cards.json and workflows.json
    /// (defaults to the builtin catalog)
    #[arg(long, global = true, env = "SECTIONKIT_CATALOG_DIR")]
    catalog_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error or off
    #[arg(long, global = true, env = "SECTIONKIT_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Absolute directory for rotating log files (logs go to stderr when unset)
    #[arg(long, global = true, env = "SECTIONKIT_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List section keys with their field counts
    Sections,

    /// Print the render descriptor of one section
    Describe {
        /// Section key, e.g. `hero_title`
        key: String,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print one sidebar card schema
    Card {
        /// Card id, e.g. `publishing_overview`
        id: String,
    },

    /// Print one workflow schema
    Workflow {
        /// Workflow id, e.g. `default_content_flow`
        id: String,
    },

    /// Report schema authoring problems
    Lint {
        /// Exit with an error when any warning is found
        #[arg(long)]
        strict: bool,
    },

    /// Diff two JSON files holding arrays of page sections
    Diff {
        /// Sections before the change
        before: PathBuf,

        /// Sections after the change
        after: PathBuf,

        /// Page the sections belong to
        #[arg(long, default_value = "page")]
        page_id: String,

        /// Flag remote edits that did not start from the `before` content
        #[arg(long)]
        detect_conflicts: bool,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logging(&cli)?;
    let catalog_dir = cli.catalog_dir.as_ref();

    match cli.command {
        Commands::Sections => {
            let catalog = load_catalog(catalog_dir)?;
            for (key, schema) in catalog.sections.iter() {
                println!("{key}\t{} field(s)", schema.fields.len());
            }
        }
        Commands::Describe { key, compact } => {
            let catalog = load_catalog(catalog_dir)?;
            let descriptor = resolve_section_descriptor(&catalog.sections, &key)
                .with_context(|| format!("section not found: {key}"))?;
            print_json(&descriptor, compact)?;
        }
        Commands::Card { id } => {
            let catalog = load_catalog(catalog_dir)?;
            let card = get_sidebar_card(&catalog.sidebar_cards, &id)
                .with_context(|| format!("sidebar card not found: {id}"))?;
            print_json(card, false)?;
        }
        Commands::Workflow { id } => {
            let catalog = load_catalog(catalog_dir)?;
            let workflow = get_workflow(&catalog.workflows, &id)
                .with_context(|| format!("workflow not found: {id}"))?;
            print_json(workflow, false)?;
        }
        Commands::Lint { strict } => {
            let catalog = load_catalog(catalog_dir)?;
            let warnings = lint_catalog(&catalog);
            for warning in &warnings {
                println!("{warning}");
            }
            if warnings.is_empty() {
                println!("no warnings");
            } else if strict {
                bail!("{} schema warning(s) found", warnings.len());
            }
        }
        Commands::Diff {
            before,
            after,
            page_id,
            detect_conflicts,
        } => {
            let before = read_snapshots(&page_id, &before)?;
            let after = read_snapshots(&page_id, &after)?;
            let diffs = diff_snapshot_sets(&before, &after, DiffOptions { detect_conflicts });
            print_json(&diffs, false)?;
        }
        Commands::Version => {
            println!("sectionkit {}", env!("CARGO_PKG_VERSION"));
            println!("sectionkit_core {}", core_version());
        }
    }

    Ok(())
}

fn init_cli_logging(cli: &Cli) -> Result<()> {
    let result = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(&cli.log_level, dir),
        None => init_stderr_logging(&cli.log_level),
    };
    result.map_err(anyhow::Error::msg)
}

fn load_catalog(dir: Option<&PathBuf>) -> Result<Catalog> {
    match dir {
        Some(dir) => {
            debug!("event=catalog_load module=cli dir={}", dir.display());
            Catalog::load_dir(dir)
                .with_context(|| format!("failed to load catalog from `{}`", dir.display()))
        }
        None => Catalog::builtin().context("failed to load builtin catalog"),
    }
}

fn read_snapshots(page_id: &str, path: &Path) -> Result<Vec<SnapshotEnvelope>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read sections from `{}`", path.display()))?;
    let sections: Vec<PageSection> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to decode sections in `{}`", path.display()))?;
    Ok(sections
        .iter()
        .map(|section| create_snapshot_envelope(page_id, section, SnapshotOptions::default()))
        .collect())
}

fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("failed to encode JSON")?;
    println!("{rendered}");
    Ok(())
}
