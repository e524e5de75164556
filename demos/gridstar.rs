//! Command-line A* demo: build an obstacle grid, search it and draw the
//! result in the terminal.
//!
//! Run: cargo run --bin gridstar -- --rows 20 --cols 40 --layout random -n 250 --seed 7

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Parser, ValueEnum};
use gridstar_core::{Cell, MarkedGrid, ObstacleGrid};
use gridstar_demos::{load_config, load_map, parse_cell, render, summary};
use gridstar_gen::{Layout, LayoutGen};
use gridstar_paths::{DEFAULT_SCALE, HeuristicKind, SearchConfig, SearchEngine, TieBreak};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Empty,
    ColumnSnake,
    RowSnake,
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Euclidean,
    Octile,
    Zero,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TieBreakArg {
    Fifo,
    LowerHeuristic,
}

#[derive(Parser, Debug)]
#[command(name = "gridstar")]
#[command(about = "A* shortest paths on a 2-D obstacle grid")]
struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Number of grid columns
    #[arg(long, default_value_t = 20)]
    cols: usize,

    /// Obstacle layout to generate
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Empty)]
    layout: LayoutArg,

    /// Obstacle count for the random layout
    #[arg(short = 'n', long, default_value_t = 0)]
    obstacles: usize,

    /// Seed for the random layout
    #[arg(long)]
    seed: Option<u64>,

    /// Block an extra cell (repeatable)
    #[arg(long = "block", value_name = "ROW,COL", value_parser = parse_cell)]
    blocks: Vec<Cell>,

    /// Read the grid from a text map (`.` free, `#` blocked) instead of
    /// using --rows/--cols; layouts are added on top
    #[arg(short, long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Start cell [default: 0,0]
    #[arg(short, long, value_name = "ROW,COL", value_parser = parse_cell)]
    start: Option<Cell>,

    /// Goal cell [default: bottom-right corner]
    #[arg(short, long, value_name = "ROW,COL", value_parser = parse_cell)]
    goal: Option<Cell>,

    /// JSON search configuration; the flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Heuristic family
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,

    /// Heuristic weight [default: 1.4 for euclidean, 1.0 for octile]
    #[arg(long)]
    scale: Option<f64>,

    /// Ordering among frontier entries with equal f
    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,

    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Do not mark expanded cells
    #[arg(long)]
    hide_expanded: bool,

    /// Write the numeric result matrix to this file
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Plain output without terminal colours
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut grid = match &args.map {
        Some(path) => load_map(path)?,
        None => ObstacleGrid::new(args.rows, args.cols)?,
    };
    let start = args.start.unwrap_or(Cell::ORIGIN);
    let goal = match args.goal {
        Some(goal) => goal,
        None => grid.dims().last().ok_or("grid has no cells")?,
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut generator =
        LayoutGen::new(StdRng::seed_from_u64(seed)).with_keep_clear([start, goal]);
    let layout = match args.layout {
        LayoutArg::Empty => Layout::Empty,
        LayoutArg::ColumnSnake => Layout::ColumnSnake,
        LayoutArg::RowSnake => Layout::RowSnake,
        LayoutArg::Random => {
            info!("random layout seed {seed}");
            Layout::Random {
                count: args.obstacles,
            }
        }
    };
    generator.apply(&mut grid, &layout)?;
    if !args.blocks.is_empty() {
        generator.apply(&mut grid, &Layout::Manual(args.blocks.clone()))?;
    }
    info!(
        "{} grid with {} obstacles, start {start}, goal {goal}",
        grid.dims(),
        grid.blocked_count()
    );

    let config = search_config(&args)?;
    let mut engine = SearchEngine::new(&grid, start, goal, config)?;
    let started = Instant::now();
    let result = engine.run()?;
    let elapsed = started.elapsed();

    let mut marked = MarkedGrid::new(&grid);
    if !args.hide_expanded {
        marked.mark_expanded(engine.closed_cells());
    }
    match result.path() {
        Some(path) => marked.mark_path(path),
        None => marked.mark_endpoints(start, goal),
    };

    let mut stdout = io::stdout().lock();
    render(&mut stdout, &marked, !args.no_color)?;
    writeln!(stdout, "{}", summary(&result, engine.stats(), elapsed))?;

    if let Some(path) = &args.export {
        marked.write_matrix(BufWriter::new(File::create(path)?))?;
        info!("wrote result matrix to {}", path.display());
    }
    Ok(())
}

/// Start from the JSON config (or defaults) and apply command-line overrides.
fn search_config(args: &Args) -> Result<SearchConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };

    if let Some(kind) = args.heuristic {
        config.heuristic = match kind {
            HeuristicArg::Euclidean => HeuristicKind::Euclidean {
                scale: args.scale.unwrap_or(DEFAULT_SCALE),
            },
            HeuristicArg::Octile => HeuristicKind::Octile {
                scale: args.scale.unwrap_or(1.0),
            },
            HeuristicArg::Zero => HeuristicKind::Zero,
        };
    } else if let Some(scale) = args.scale {
        match &mut config.heuristic {
            HeuristicKind::Euclidean { scale: s } | HeuristicKind::Octile { scale: s } => {
                *s = scale
            }
            HeuristicKind::Zero => warn!("--scale has no effect on the zero heuristic"),
        }
    }
    if let Some(tie) = args.tie_break {
        config.tie_break = match tie {
            TieBreakArg::Fifo => TieBreak::Fifo,
            TieBreakArg::LowerHeuristic => TieBreak::LowerHeuristic,
        };
    }
    if let Some(limit) = args.max_expansions {
        config.max_expansions = Some(limit);
    }
    Ok(config)
}
