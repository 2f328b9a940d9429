#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver for the torus-life simulation.
//!
//! The adapter owns everything the pure core excludes: argument parsing,
//! JSON property loading, board and figure text I/O, terminal rendering,
//! and the paced generation loop that stops once the stability system
//! reports convergence.

mod board_io;

use std::{fs, path::PathBuf, thread, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use torus_life_core::{BoardConfig, CellCoord, Command, Event};
use torus_life_system_classification::{Classifier, Pattern, TemplateLibrary};
use torus_life_system_extraction::Extraction;
use torus_life_system_stability::Stability;
use torus_life_world::{self as world, query, World};

/// Command-line arguments accepted by the torus-life driver.
#[derive(Debug, Parser)]
#[command(name = "torus-life", about = "Conway's Game of Life on a toroidal grid")]
struct Args {
    /// Path to a Property.json file with board dimensions and density.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board text file applied over the randomized board before the run.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Board text file written when the run finishes.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Figure name stamped at a random position before the run.
    #[arg(long)]
    figure: Option<String>,

    /// Directory holding the named figure definition files.
    #[arg(long, default_value = "figures")]
    figures_dir: PathBuf,

    /// Seed for board randomization and figure placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound on the number of generations to simulate.
    #[arg(long, default_value_t = 2_000)]
    max_generations: u64,

    /// Pause between generations, in milliseconds.
    #[arg(long, default_value_t = 1_000)]
    step_delay_ms: u64,

    /// Suppress per-generation rendering.
    #[arg(long)]
    quiet: bool,
}

/// Entry point for the torus-life command-line interface.
fn main() -> Result<()> {
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut world = World::new();
    let mut events: Vec<Event> = Vec::new();
    world::apply(&mut world, Command::ConfigureBoard { config, seed }, &mut events);

    if let Some(path) = args.load.as_deref() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {}", path.display()))?;
        let (columns, rows) = query::dimensions(&world);
        let updates = board_io::board_updates(&text, columns, rows);
        world::apply(&mut world, Command::PaintCells { updates }, &mut events);
    }

    if let Some(name) = args.figure.as_deref() {
        stamp_figure(&mut world, &mut events, &args.figures_dir, name, seed)?;
    }

    let classifier = Classifier::new(TemplateLibrary::load(&args.figures_dir));
    let mut extraction = Extraction::new();
    let mut stability = Stability::default();
    let _ = stability.handle(&events, 0);
    events.clear();

    if !args.quiet {
        println!("{}", query::welcome_banner(&world));
    }

    let mut converged = false;
    for _ in 0..args.max_generations {
        world::apply(&mut world, Command::Tick, &mut events);

        let view = query::cells_view(&world);
        let census = extraction.census(&view);
        let counts = classifier.classify_board(&mut extraction, &view);
        converged = stability.handle(&events, census.combinations);
        events.clear();

        if !args.quiet {
            print!("{}", board_io::render(&view));
            println!(
                "Generation {}: {} live cells, {} combinations",
                query::generation(&world),
                census.live_cells,
                census.combinations
            );
            let summary: Vec<String> = counts
                .iter()
                .map(|(name, count)| format!("{name}: {count}"))
                .collect();
            println!("{}", summary.join(", "));
        }

        if converged {
            break;
        }
        if args.step_delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.step_delay_ms));
        }
    }

    if !args.quiet {
        let outcome = if converged {
            "reached a stable population"
        } else {
            "stopped at the generation cap"
        };
        println!(
            "Simulation {} after {} generations.",
            outcome,
            query::generation(&world)
        );
    }

    if let Some(path) = args.save.as_deref() {
        let text = board_io::board_text(&query::cells_view(&world));
        fs::write(path, text)
            .with_context(|| format!("failed to write board file {}", path.display()))?;
    }

    Ok(())
}

/// Loads the board configuration, falling back to the built-in defaults
/// when no file was provided.
fn load_config(path: Option<&std::path::Path>) -> Result<BoardConfig> {
    let Some(path) = path else {
        return Ok(BoardConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read property file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse property file {}", path.display()))
}

/// Stamps the named figure at a seeded random position that keeps the whole
/// figure on the board.
fn stamp_figure(
    world: &mut World,
    events: &mut Vec<Event>,
    figures_dir: &std::path::Path,
    name: &str,
    seed: u64,
) -> Result<()> {
    let file = figures_dir.join(format!("{}.txt", name.to_lowercase()));
    let text = fs::read_to_string(&file)
        .with_context(|| format!("failed to read figure file {}", file.display()))?;
    let pattern = Pattern::parse(&text)
        .with_context(|| format!("figure file {} holds no pattern", file.display()))?;

    let (columns, rows) = query::dimensions(world);
    if pattern.width() > columns || pattern.height() > rows {
        bail!(
            "figure {name} ({}x{}) does not fit the {columns}x{rows} board",
            pattern.width(),
            pattern.height()
        );
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let origin = CellCoord::new(
        rng.gen_range(0..=columns - pattern.width()),
        rng.gen_range(0..=rows - pattern.height()),
    );
    let updates = board_io::figure_updates(&pattern, origin, columns, rows);
    world::apply(world, Command::PaintCells { updates }, events);
    Ok(())
}
