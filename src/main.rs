use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fix_entities::{logging, Patcher, TargetList, WriteMode};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run with no arguments to fix the built-in file list.
#[derive(Parser)]
#[command(name = "fix-entities")]
#[command(about = "Un-escape HTML entities in a fixed set of source files", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory that relative target paths are resolved against
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// TOML file listing the files to fix (replaces the built-in list)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dry run - report what would change without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Write through a tempfile and rename instead of truncating in place
    #[arg(long)]
    atomic: bool,

    /// Exit with status 1 if any file could not be fixed
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    let targets = match &cli.config {
        Some(path) => TargetList::load(path)?,
        None => TargetList::builtin(),
    };

    if cli.dry_run {
        println!("{}", "[DRY RUN - no files will be written]".cyan());
    }
    let meta = &targets.config().meta;
    if !meta.name.is_empty() {
        println!("{}", format!("Target list: {}", meta.name).dimmed());
    }
    if let Some(description) = &meta.description {
        println!("{}", format!("  {description}").dimmed());
    }

    let paths = targets.paths(cli.root.as_deref());
    let write_mode = if cli.atomic {
        WriteMode::Atomic
    } else {
        WriteMode::Truncate
    };

    let report = Patcher::new()
        .write_mode(write_mode)
        .dry_run(cli.dry_run)
        .show_diff(cli.diff)
        .patch_all(&paths, &mut io::stdout().lock())
        .context("failed to write status output")?;

    if (cli.strict || targets.is_strict()) && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
