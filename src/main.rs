//! fix-headers — normalize the documentation header at the top of source files.
//!
//! For every file under the root it merges stacked or stray `/** ... */`
//! headers into one canonical block, deduplicates `'use client';` and
//! rewrites the file only when something changed. Running it twice gives
//! the same result as running it once.
//!
//! - **tree mode**: `fix-headers src`
//! - **stdin mode**: `fix-headers --stdin src/App.tsx < src/App.tsx`

mod config;
mod directive;
mod discover;
mod format;
mod model;
mod parser;
mod render;
mod rewrite;

use anyhow::{Context, Result};
use clap::Parser;
use config::{RenderSettings, ScanOptions, Settings};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "fix-headers",
    about = "Merge, deduplicate and regenerate documentation headers in source files"
)]
struct Cli {
    /// Root directory to process
    #[arg(default_value = "src")]
    root: PathBuf,

    /// File extensions to process (repeatable)
    #[arg(short = 'e', long = "ext", default_values_t = config::DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect::<Vec<_>>())]
    extensions: Vec<String>,

    /// Glob patterns, relative to the root, to skip (repeatable)
    #[arg(short = 'x', long = "exclude", default_values_t = config::DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect::<Vec<_>>())]
    excludes: Vec<String>,

    /// Directory that @file paths are relative to [default: current directory]
    #[arg(long)]
    base: Option<PathBuf>,

    /// Fixed value for @updated. Without it @updated is refreshed to today.
    #[arg(long)]
    updated: Option<String>,

    /// Override today's date, e.g. "Fri Sep 12 2025"
    #[arg(long)]
    today: Option<String>,

    /// Author line used when a file names no author
    #[arg(long, default_value = "@author Unknown")]
    default_author: String,

    /// License line used when a file has none
    #[arg(long, default_value = "@license MIT")]
    license: String,

    /// Tag line added to headers of client-only files
    #[arg(long, default_value = "@client")]
    client_tag: String,

    /// Directive statement emitted below the header of client-only files
    #[arg(long, default_value = "'use client';")]
    directive: String,

    /// Number of leading body lines searched for a stray second header
    #[arg(long = "scan-lines", default_value_t = 60)]
    scan_lines: usize,

    /// Merge stray blocks even without header tags (@file, @author, ...).
    /// This also folds ordinary JSDoc near the top into the header.
    #[arg(long)]
    any_secondary: bool,

    /// Report files that would change without writing them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Run the formatter over the root after rewriting
    #[arg(long)]
    format: bool,

    /// Formatter command line; the root directory is appended
    #[arg(long, default_value = "npx prettier --write")]
    formatter: String,

    /// Read one file from stdin and print the result; PATH is used for @file
    #[arg(long, value_name = "PATH")]
    stdin: Option<PathBuf>,

    /// Log every file, including unchanged ones
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.stdin.is_some() {
        return stdin_mode(&cli);
    }

    tree_mode(&cli)
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn render_settings(cli: &Cli) -> RenderSettings {
    RenderSettings {
        today: cli.today.clone().unwrap_or_else(config::today),
        updated: cli.updated.clone(),
        default_author: cli.default_author.trim().to_string(),
        license: cli.license.trim().to_string(),
        client_tag: cli.client_tag.trim().to_string(),
        directive: cli.directive.trim().to_string(),
    }
}

fn scan_options(cli: &Cli) -> ScanOptions {
    ScanOptions {
        scan_lines: cli.scan_lines,
        strict_secondary: !cli.any_secondary,
    }
}

fn settings(cli: &Cli) -> Result<Settings> {
    let base = match &cli.base {
        Some(b) => b.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    // Walked paths start with the root as given; @file paths need both absolute.
    let root = absolute(&cli.root)?;
    let base = absolute(&base)?;

    let settings = Settings {
        root,
        base,
        extensions: config::normalize_extensions(&cli.extensions),
        excludes: config::compile_excludes(&cli.excludes)?,
        scan: scan_options(cli),
        dry_run: cli.dry_run,
        render: render_settings(cli),
    };
    settings.validate()?;
    Ok(settings)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("failed to resolve {}", path.display()))
}

/// tree mode: rewrite every matching file under the root.
fn tree_mode(cli: &Cli) -> Result<()> {
    let settings = settings(cli)?;

    let formatter = if cli.format {
        Some(format::CommandFormatter::parse(&cli.formatter)?)
    } else {
        None
    };
    let post = formatter
        .as_ref()
        .map(|f| f as &dyn format::PostProcessor);

    let summary = rewrite::run(&settings, post)?;
    println!("{}", summary);

    if summary.failed > 0 {
        anyhow::bail!("{} file(s) could not be processed", summary.failed);
    }
    Ok(())
}

/// stdin mode: normalize one file from stdin and print it to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let render_cfg = render_settings(cli);
    render_cfg.validate()?;
    let scan = scan_options(cli);
    scan.validate()?;

    let path = cli.stdin.as_deref().unwrap_or(Path::new("-"));
    let file_id = render::file_id(path, Path::new("."), Path::new("."));
    print!("{}", rewrite::rewrite_content(&input, &file_id, scan, &render_cfg));
    Ok(())
}
