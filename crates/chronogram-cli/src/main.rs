//! chronogram CLI - Delivery timeline slide generator
//!
//! Reads a delivery-tracking table, merges sub-task rows per
//! (product, solution) pair and writes one SVG deck per tribe.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chronogram_core::{DeckRenderer, Quarter, SquadPalette};
use chronogram_loader::{load_table, tribes, Config};
use chronogram_pipeline::Pipeline;
use chronogram_render::{QuarterAxis, SlideRenderer};

#[derive(Parser)]
#[command(name = "chronogram")]
#[command(author, version, about = "Delivery timeline slide generator", long_about = None)]
struct Cli {
    /// Delivery table (CSV with a header row)
    #[arg(value_name = "TABLE")]
    table: PathBuf,

    /// Configuration file (column mapping, squad colors, axis)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Output directory for the generated decks
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Process a single tribe instead of every tribe in the table
    #[arg(long)]
    tribe: Option<String>,

    /// Skip the statistics block on each deck
    #[arg(long)]
    no_stats: bool,

    /// Duplicate critical rows one year out before merging
    #[arg(long)]
    carry_critical: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = Config::from_path(&cli.config)
        .with_context(|| format!("failed to load configuration: {}", cli.config.display()))?;
    let records = load_table(&cli.table, &config)
        .with_context(|| format!("failed to load table: {}", cli.table.display()))?;

    let selected = match &cli.tribe {
        Some(tribe) => {
            if !records.iter().any(|r| &r.tribe == tribe) {
                bail!("no rows found for tribe: {tribe}");
            }
            vec![tribe.clone()]
        }
        None => tribes(&records),
    };
    if selected.is_empty() {
        bail!("no tribes found in table: {}", cli.table.display());
    }
    info!(tribes = selected.len(), rows = records.len(), "table loaded");

    let start = Quarter::parse(&config.axis.start)
        .with_context(|| format!("invalid axis start quarter: {:?}", config.axis.start))?;
    let axis = QuarterAxis::new(start, config.axis.quarters);

    let pipeline = Pipeline::new().carry_critical(cli.carry_critical || config.carry_critical);
    let renderer = SlideRenderer::new().axis(axis).show_stats(!cli.no_stats);
    let mut palette = SquadPalette::from_hex_table(
        config.squad_colors.iter().map(|(squad, hex)| (squad.as_str(), hex.as_str())),
    );

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("failed to create output directory: {}", cli.out.display()))?;

    let today = Local::now().date_naive();
    let date_prefix = today.format("%Y%m%d");

    for tribe in &selected {
        let chronogram = pipeline.run(tribe, &records, today);

        if chronogram.excluded_rows > 0 {
            info!(%tribe, excluded = chronogram.excluded_rows, "rows excluded as NA/NR");
        }
        for entry in chronogram.entries.iter().filter(|e| !e.is_placed()) {
            warn!(%tribe, entry = %entry.title(), label = %entry.quarter, "unknown placement");
        }

        let svg = renderer.render(&chronogram, &mut palette)?;
        let file_name = format!("{date_prefix}_chronogram_{}.svg", tribe.replace(' ', "_"));
        let path = cli.out.join(file_name);
        std::fs::write(&path, svg)
            .with_context(|| format!("failed to write deck: {}", path.display()))?;

        info!(
            %tribe,
            entries = chronogram.entries.len(),
            late = chronogram.stats.late,
            deck = %path.display(),
            "deck written"
        );
    }

    Ok(())
}
