//! Perfect-maze generation with a randomized depth-first search
//! ("recursive backtracker").
//!
//! The carver keeps an explicit stack seeded with the start cell. Each step
//! looks at the top of the stack: a fresh cell is marked visited and the
//! wall towards the cell below it is opened; then an unvisited neighbour is
//! picked and pushed, or, at a dead end, the top is popped. Every cell is
//! pushed exactly once, so a `rows × columns` grid ends up with exactly
//! `rows * columns - 1` forward links forming a spanning tree rooted at the
//! start cell.

use mazer_core::{Context, Grid, MazeError, Pos, StepObserver, VisualTag};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks which unvisited neighbour the carver moves to next.
pub trait MoveChooser {
    /// Given the candidate moves (never empty, in up/left/down/right order),
    /// return the index of the chosen one.
    fn choose(&self, moves: &[Pos], rng: &mut impl Rng) -> usize;
}

/// Uniformly random choice among the candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformChooser;

impl MoveChooser for UniformChooser {
    fn choose(&self, moves: &[Pos], rng: &mut impl Rng) -> usize {
        rng.random_range(0..moves.len())
    }
}

/// Always takes the first candidate, giving a deterministic carve that
/// prefers up, then left, then down, then right.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl MoveChooser for FirstChooser {
    fn choose(&self, _moves: &[Pos], _rng: &mut impl Rng) -> usize {
        0
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenOutcome {
    /// Forward links recorded.
    pub links: usize,
    /// Steps taken (pushes plus pops).
    pub steps: usize,
    /// Whether the run stopped early on a cancelled [`Context`].
    pub cancelled: bool,
}

/// Maze generator operating on a [`Grid`].
pub struct MazeGen<R: Rng, C: MoveChooser = UniformChooser> {
    pub rng: R,
    chooser: C,
    stack: Vec<usize>,
    moves: Vec<Pos>,
}

impl MazeGen<StdRng> {
    /// A generator with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator choosing moves uniformly with `rng`.
    pub fn new(rng: R) -> Self {
        Self::with_chooser(rng, UniformChooser)
    }
}

impl<R: Rng, C: MoveChooser> MazeGen<R, C> {
    /// Create a generator with a custom move chooser.
    pub fn with_chooser(rng: R, chooser: C) -> Self {
        Self {
            rng,
            chooser,
            stack: Vec::new(),
            moves: Vec::with_capacity(4),
        }
    }

    /// Carve a perfect maze into `grid`.
    ///
    /// The grid's structure is reset first, so carving an already carved
    /// grid produces a fresh maze. After every step `obs` gets a pacing
    /// request of `delay_ms`, then `ctx` is checked; a cancelled run leaves a
    /// partial carve and reports `cancelled: true`.
    ///
    /// A newly reached cell gets its origin set to the cell it was carved
    /// from, unless it already has one.
    pub fn carve(
        &mut self,
        grid: &mut Grid,
        obs: &mut impl StepObserver,
        ctx: &Context,
        delay_ms: u64,
    ) -> Result<GenOutcome, MazeError> {
        grid.reset_structure();
        self.stack.clear();
        self.stack.push(grid.start());

        let mut outcome = GenOutcome {
            links: 0,
            steps: 0,
            cancelled: false,
        };
        log::debug!("carving {}x{} maze", grid.rows(), grid.columns());

        while let Some(&ci) = self.stack.last() {
            let cp = grid.pos(ci);

            if !grid.cell(ci).visited() {
                grid.set_visited(ci, true);
                let below = self.stack.len().checked_sub(2);
                if let Some(&pi) = below.and_then(|i| self.stack.get(i)) {
                    let pp = grid.pos(pi);
                    grid.open_border_between(pp, cp)?;
                    obs.on_border_state_changed(pp, grid.cell(pi).borders());
                    obs.on_border_state_changed(cp, grid.cell(ci).borders());
                    obs.on_cell_state_changed(pp, VisualTag::Visited);
                }
                obs.on_cell_state_changed(cp, VisualTag::FrontierActive);
            }

            self.moves.clear();
            self.moves.extend(
                grid.in_bounds_neighbors(cp)
                    .filter(|&n| grid.cell_at(n).is_some_and(|c| !c.visited())),
            );

            if self.moves.is_empty() {
                // Dead end: backtrack.
                obs.on_cell_state_changed(cp, VisualTag::Default);
                self.stack.pop();
                if let Some(&top) = self.stack.last() {
                    obs.on_cell_state_changed(grid.pos(top), VisualTag::FrontierActive);
                }
                log::trace!("backtrack from {cp}");
            } else {
                let k = self.chooser.choose(&self.moves, &mut self.rng);
                let np = self.moves[k.min(self.moves.len() - 1)];
                let ni = grid.idx(np).ok_or(MazeError::OutOfBounds(np))?;
                obs.on_cell_state_changed(cp, VisualTag::Visited);
                obs.on_cell_state_changed(np, VisualTag::FrontierActive);
                self.stack.push(ni);
                grid.add_forward_link(ci, ni);
                if grid.cell(ni).origin().is_none() {
                    grid.set_origin(ni, Some(ci));
                }
                outcome.links += 1;
                log::trace!("carve {cp} -> {np}");
            }

            outcome.steps += 1;
            obs.on_step_delay(delay_ms);
            if ctx.is_done() {
                outcome.cancelled = true;
                log::warn!("maze generation cancelled after {} steps", outcome.steps);
                break;
            }
        }

        self.stack.clear();
        log::debug!("carved {} links in {} steps", outcome.links, outcome.steps);
        Ok(outcome)
    }
}
