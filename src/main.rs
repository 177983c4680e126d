#![warn(non_snake_case)]
//! # cavegen Entry Point
//!
//! Headless driver for the cave generator. Loads settings (from a JSON file,
//! the command line, or both), runs one automatic generation and prints an
//! ASCII preview of the occupancy map: `#` for walls and `.` for floor.
//!
//! Set `RUST_LOG=debug` to follow each generation step.

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use cavegen::editor::{CommandOutput, GeneratorCommand, GeneratorSession};
use cavegen::generator::{Generator, GeneratorSettings};

/// cavegen command-line arguments.
///
/// CLI values override settings loaded from `--config`.
#[derive(Parser, Debug)]
#[command(name = "cavegen", about = "Procedural cave map generator")]
struct CliArgs {
    /// Path to a JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible map.
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the square map.
    #[arg(long)]
    size: Option<usize>,

    /// Refinement passes before and after chamber removal.
    #[arg(long)]
    steps: Option<usize>,

    /// Open wall regions of at most this many cells.
    #[arg(long)]
    pillars: Option<usize>,
}

impl CliArgs {
    fn settings(&self) -> Result<GeneratorSettings, Box<dyn Error>> {
        let mut settings = match &self.config {
            Some(path) => GeneratorSettings::load(path)?,
            None => GeneratorSettings::default(),
        };

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(size) = self.size {
            settings.map_size = size;
        }
        if let Some(steps) = self.steps {
            settings.refinement_steps = steps;
        }
        if let Some(max) = self.pillars {
            settings.remove_pillars = true;
            settings.max_pillar_size = max;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn print_map(map: &[Vec<bool>]) -> io::Result<()> {
    let size = map.len();
    let mut out = BufWriter::new(io::stdout().lock());
    for y in 0..size {
        let row: String = map.iter().map(|column| if column[y] { '#' } else { '.' }).collect();
        writeln!(out, "{}", row)?;
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("cavegen starting...");

    let args = CliArgs::parse();
    let settings = args.settings()?;

    let mut session = GeneratorSession::new(Generator::new());
    if let CommandOutput::Generated(stats) = session.execute(GeneratorCommand::AutoGenerate(settings))? {
        info!(
            "Main chamber: {} cells, pillars removed: {} cells",
            stats.main_chamber_size, stats.pillar_cells_removed
        );
    }

    print_map(&session.map_buffer_copy())?;
    info!("cavegen exiting.");
    Ok(())
}
