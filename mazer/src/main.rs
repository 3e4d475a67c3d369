//! Carve a maze and solve it with BFS, Dijkstra and A*.

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use mazer_core::Pacer;
use mazer_crossterm::{render_text, run_interactive, summary};
use mazer_engine::{
    DEFAULT_SIZE, DEFAULT_STEP_DELAY_MS, Engine, EngineConfig, Heuristic, Strategy,
};

/// Which search strategies to run in headless mode.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Algorithm {
    Bfs,
    Dijkstra,
    Astar,
    All,
}

impl Algorithm {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            Algorithm::Bfs => vec![Strategy::Bfs],
            Algorithm::Dijkstra => vec![Strategy::Dijkstra],
            Algorithm::Astar => vec![Strategy::Astar],
            Algorithm::All => Strategy::ALL.to_vec(),
        }
    }
}

/// Maze carving and path search
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze height in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    rows: i32,

    /// Maze width in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    columns: i32,

    /// Random seed for carving
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between steps in milliseconds [default: 0, or 200 with --interactive]
    #[arg(long)]
    delay: Option<u64>,

    /// Search strategies to run in headless mode
    #[arg(long, value_enum, default_value_t = Algorithm::All)]
    algorithm: Algorithm,

    /// Use the signed-offset heuristic for A*
    #[arg(long)]
    signed_heuristic: bool,

    /// Open the terminal UI instead of printing results
    #[arg(long, short)]
    interactive: bool,
}

impl Args {
    fn config(&self) -> EngineConfig {
        let default_delay = if self.interactive {
            DEFAULT_STEP_DELAY_MS
        } else {
            0
        };
        let heuristic = if self.signed_heuristic {
            Heuristic::Signed
        } else {
            Heuristic::Manhattan
        };
        EngineConfig {
            rows: self.rows,
            columns: self.columns,
            step_delay_ms: self.delay.unwrap_or(default_delay),
            seed: self.seed,
            heuristic,
        }
    }
}

fn headless(engine: &mut Engine, strategies: &[Strategy]) -> anyhow::Result<()> {
    let mut pacer = Pacer;
    let carved = engine.generate(&mut pacer)?;
    let grid = engine.grid();
    println!(
        "carved {}x{} maze: {} passages in {} steps",
        grid.rows(),
        grid.columns(),
        carved.links,
        carved.steps
    );

    let mut path = Vec::new();
    for &s in strategies {
        let out = engine.search(s, &mut pacer)?;
        println!("{}", summary(&out));
        if out.is_found() {
            path = out.path;
        }
    }
    print!("{}", render_text(engine.grid(), &path));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    let mut engine = Engine::new(args.config()).context("cannot create maze")?;
    if args.interactive {
        run_interactive(&mut engine).context("terminal session failed")?;
        return Ok(());
    }
    headless(&mut engine, &args.algorithm.strategies())
}
