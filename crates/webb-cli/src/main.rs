//! webb-gen
//!
//! Builds the webb panel layout and writes the LED lookup table the firmware
//! compiles in.
//!
//! Usage:
//!   webb-gen --output wled00/webb_leds.h
//!   webb-gen --format json --stdout
//!
//! Any layout inconsistency exits non-zero before a file is written.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webb_layout::{webb, write_atomically, LayoutConfig, LayoutTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// C header with #define constants and int16_t tables
    Header,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "webb-gen")]
#[command(about = "Generate the webb LED layout table", long_about = None)]
struct Args {
    /// Output file path
    #[arg(short, long, default_value = "webb_leds.h")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "header")]
    format: Format,

    /// Print output to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// JSON file overriding layout constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Neighbor search radius as a multiple of the LED spacing
    #[arg(long)]
    proximity_factor: Option<f64>,

    /// Fixed-point units for the largest coordinate and one full turn
    #[arg(long)]
    scale: Option<u16>,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LayoutConfig::default(),
        };
        if let Some(factor) = self.proximity_factor {
            config.proximity_factor = factor;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(quiet: bool) {
    let default_filter = if quiet {
        "warn"
    } else {
        "webb_gen=info,webb_layout=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet);

    let config = args.layout_config()?;
    info!(?config, "building webb layout");

    let layout = webb::build(config).context("Invalid layout description")?;
    let table = LayoutTable::build(&layout).context("Layout failed consistency checks")?;
    info!(
        leds = table.total,
        segments = table.segments.len(),
        radius_min = table.radius_min,
        radius_max = table.radius_max,
        "layout resolved"
    );

    if args.stdout {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_table(&table, args.format, &mut out)?;
        out.flush()?;
    } else {
        write_atomically(&args.output, |file| write_table(&table, args.format, file))
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }

    Ok(())
}

fn write_table<W: Write>(
    table: &LayoutTable,
    format: Format,
    out: &mut W,
) -> webb_layout::Result<()> {
    match format {
        Format::Header => table.write_header(out)?,
        Format::Json => table.write_json(out)?,
    }
    Ok(())
}
