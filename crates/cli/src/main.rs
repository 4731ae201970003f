use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use manuscript_overlay::{OverlayConfig, OverlayEngine, OverlayStats, TextOptions};
use manuscript_protocol::{analysis_schema, AnalysisResult, IssueSource};
use manuscript_render::{render_html, Palette, Projector, RenderedSegment};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::flags::UnitFlag;

mod flags;

/// Palette file used when `--palette` is not given
const PALETTE_ENV: &str = "MANUSCRIPT_PALETTE";

#[derive(Parser)]
#[command(name = "manuscript")]
#[command(about = "Highlight overlays for multi-agent manuscript analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print overlay segments as JSON
    Segments(OverlayArgs),

    /// Print overlay segments as an HTML fragment
    Html(OverlayArgs),

    /// Print the JSON Schema of the accepted analysis payload
    Schema,
}

#[derive(Args)]
struct OverlayArgs {
    /// Manuscript text file (`-` reads stdin)
    #[arg(long)]
    text: PathBuf,

    /// Analysis result JSON file
    #[arg(long)]
    analysis: PathBuf,

    /// Unit the analysis offsets are counted in
    #[arg(long, value_enum, default_value_t = UnitFlag::Char)]
    unit: UnitFlag,

    /// Palette file, JSON or TOML (overrides MANUSCRIPT_PALETTE)
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Keep CRLF line endings instead of rewriting them to LF
    #[arg(long)]
    keep_crlf: bool,

    /// Index the text as given instead of composing it to Unicode NFC
    #[arg(long)]
    no_nfc: bool,
}

#[derive(Serialize)]
struct SegmentsOutput<'a> {
    source: IssueSource,
    stats: &'a OverlayStats,
    segments: Vec<RenderedSegment>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Segments(args) => run_overlay(&args, OutputFormat::Json)?,
        Commands::Html(args) => run_overlay(&args, OutputFormat::Html)?,
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&analysis_schema())?);
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Json,
    Html,
}

fn run_overlay(args: &OverlayArgs, format: OutputFormat) -> Result<()> {
    let text = read_text(&args.text)?;
    let raw = fs::read_to_string(&args.analysis)
        .with_context(|| format!("Failed to read analysis from {}", args.analysis.display()))?;
    let analysis = AnalysisResult::from_json(&raw)
        .with_context(|| format!("Invalid analysis JSON in {}", args.analysis.display()))?;

    let config = OverlayConfig {
        unit: args.unit.as_domain(),
        text: TextOptions {
            normalize_newlines: !args.keep_crlf,
            normalize_unicode: !args.no_nfc,
        },
        ..Default::default()
    };
    let engine = OverlayEngine::new(config).context("Invalid overlay configuration")?;
    let projector = Projector::new(load_palette(args.palette.as_deref())?);

    let source = analysis.source();
    let issues = analysis.issues();
    let overlay = engine.overlay(&text, &issues);
    let stats = overlay.stats();
    log::info!(
        "{} segments ({} highlighted) from {} of {} issues via {:?}",
        stats.segments,
        stats.highlighted_segments,
        stats.kept_issues,
        stats.input_issues,
        source
    );

    let segments = projector.project(&overlay);
    match format {
        OutputFormat::Json => {
            let output = SegmentsOutput {
                source,
                stats,
                segments,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Html => println!("{}", render_html(&segments)),
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    if path.as_os_str() != "-" {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read text from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

fn load_palette(flag: Option<&Path>) -> Result<Palette> {
    let path = match flag {
        Some(path) => Some(path.to_path_buf()),
        None => env::var_os(PALETTE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from),
    };
    match path {
        Some(path) => Palette::from_file(&path)
            .with_context(|| format!("Failed to load palette {}", path.display())),
        None => Ok(Palette::default()),
    }
}
