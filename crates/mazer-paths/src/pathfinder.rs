use std::collections::{BinaryHeap, VecDeque};

use mazer_core::{Context, Grid, StepObserver, VisualTag};

use crate::distance::Heuristic;
use crate::path::{SearchOutcome, SearchStatus};
use crate::strategy::Strategy;

// ---------------------------------------------------------------------------
// Internal priority-queue entry for Dijkstra / A*
// ---------------------------------------------------------------------------

/// Reference into the grid arena, ordered by `f` then insertion order for
/// use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the entry pushed first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Runs path searches from a grid's start cell to its goal cell.
///
/// All strategies walk forward links only, with unit edge cost, and record
/// their results in the grid's cells (`cost`, `origin`, `visited`). The
/// finder owns its queues and scratch buffers so repeated runs reuse the
/// same allocations.
pub struct PathFinder {
    pub(crate) heuristic: Heuristic,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) heap: BinaryHeap<NodeRef>,
    pub(crate) seq: u64,
    pub(crate) in_open: Vec<bool>,
    pub(crate) nbuf: Vec<usize>,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFinder {
    /// A finder using the absolute Manhattan heuristic for A*.
    pub fn new() -> Self {
        Self::with_heuristic(Heuristic::Manhattan)
    }

    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            queue: VecDeque::new(),
            heap: BinaryHeap::new(),
            seq: 0,
            in_open: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Run `strategy` on `grid`.
    pub fn run(
        &mut self,
        strategy: Strategy,
        grid: &mut Grid,
        obs: &mut impl StepObserver,
        ctx: &Context,
        delay_ms: u64,
    ) -> SearchOutcome {
        match strategy {
            Strategy::Bfs => self.bfs(grid, obs, ctx, delay_ms),
            Strategy::Dijkstra => self.dijkstra(grid, obs, ctx, delay_ms),
            Strategy::Astar => self.astar(grid, obs, ctx, delay_ms),
        }
    }

    // -----------------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------------

    /// Common setup: clear search state and marks, seed the start cell.
    pub(crate) fn begin(
        &mut self,
        strategy: Strategy,
        grid: &mut Grid,
        obs: &mut impl StepObserver,
    ) {
        log::debug!("{strategy} search on {}x{} grid", grid.rows(), grid.columns());
        grid.reset_search_state();
        for p in grid.positions() {
            obs.on_cell_state_changed(p, VisualTag::Default);
        }
        self.queue.clear();
        self.heap.clear();
        self.seq = 0;
        let start = grid.start();
        grid.set_cost(start, 0);
        obs.on_cell_state_changed(grid.pos(start), VisualTag::FrontierActive);
    }

    /// Push onto the priority queue, stamping insertion order.
    pub(crate) fn push(&mut self, idx: usize, f: i64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(NodeRef { idx, f, seq });
    }

    /// Copy the forward links of `idx` into the scratch buffer.
    pub(crate) fn load_links(&mut self, grid: &Grid, idx: usize) {
        self.nbuf.clear();
        self.nbuf.extend_from_slice(grid.cell(idx).links());
    }

    /// Finish a run: on success mark the path, otherwise report the terminal
    /// status with an empty path.
    pub(crate) fn finish(
        &self,
        strategy: Strategy,
        status: SearchStatus,
        grid: &Grid,
        obs: &mut impl StepObserver,
        expanded: usize,
    ) -> SearchOutcome {
        let path = match status {
            SearchStatus::Found => crate::path::mark_path(grid, obs),
            _ => Vec::new(),
        };
        let outcome = SearchOutcome {
            strategy,
            status,
            path,
            expanded,
        };
        match outcome.status {
            SearchStatus::Found => log::debug!(
                "{strategy}: path of {} steps, {expanded} cells expanded",
                outcome.path.len().saturating_sub(1)
            ),
            SearchStatus::NoPath => log::debug!("{strategy}: goal unreachable"),
            SearchStatus::Cancelled => log::warn!("{strategy} search cancelled"),
        }
        outcome
    }
}

/// Pacing point after a step. Returns `true` if the run should stop.
pub(crate) fn pause(obs: &mut impl StepObserver, ctx: &Context, delay_ms: u64) -> bool {
    obs.on_step_delay(delay_ms);
    ctx.is_done()
}
