use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::document::LayoutDocument;
use crate::error::Result;
use crate::replay::{ReplayPlan, arrange, replay, write_grid_text, write_replay_text};

#[derive(Debug, Parser)]
#[command(
    name = "cellgrid-demo",
    about = "Load a cell-grid layout and replay drag-to-reorder gestures against it",
    version
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Long-press one child, drag it over another, and release.
    Replay(ReplayArgs),

    /// Measure and lay out a document, then print every child frame.
    Show(ShowArgs),

    /// Print the built-in layout document as JSON.
    #[command(name = "print-config")]
    PrintConfig,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Layout document (JSON). Defaults to the built-in eight-cell grid.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Index of the child to drag.
    #[arg(long)]
    pub drag: usize,

    /// Index of the child to release over.
    #[arg(long)]
    pub over: Option<usize>,

    /// Container width in pixels.
    #[arg(long, default_value_t = 400)]
    pub width: i32,

    /// End the gesture with a pointer cancel.
    #[arg(long)]
    pub cancel: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub layout: Option<PathBuf>,

    #[arg(long, default_value_t = 400)]
    pub width: i32,

    #[arg(long)]
    pub json: bool,
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `fallback`.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn load(path: Option<&PathBuf>) -> Result<LayoutDocument> {
    match path {
        Some(path) => LayoutDocument::load(path),
        None => Ok(LayoutDocument::builtin()),
    }
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => {
            let document = load(args.layout.as_ref())?;
            let plan = ReplayPlan {
                drag: args.drag,
                over: args.over,
                width: args.width,
                cancel: args.cancel,
            };
            let report = replay(&document, &plan)?;
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                write_replay_text(out, &report)?;
            }
        }
        Commands::Show(args) => {
            let document = load(args.layout.as_ref())?;
            let (_, report) = arrange(&document, args.width)?;
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                write_grid_text(out, &report)?;
            }
        }
        Commands::PrintConfig => {
            serde_json::to_writer_pretty(&mut *out, &LayoutDocument::builtin())?;
            writeln!(out)?;
        }
    }
    Ok(())
}
