use mazer_core::{Context, Grid, StepObserver, VisualTag};

use crate::PathFinder;
use crate::path::{SearchOutcome, SearchStatus};
use crate::pathfinder::pause;
use crate::strategy::Strategy;

impl PathFinder {
    /// Uniform-cost search from start over forward links.
    ///
    /// Repeatedly settles the unsettled cell of lowest cost and relaxes its
    /// links. There is no early exit: the run continues until every reachable
    /// cell is settled, then the path is reconstructed if the goal was
    /// reached.
    ///
    /// Cells of equal cost are settled in the order they were queued, not in
    /// row-major grid order. Costs do not depend on this; on a carved maze
    /// the path is unique, so only the order of observer notifications
    /// changes.
    pub fn dijkstra(
        &mut self,
        grid: &mut Grid,
        obs: &mut impl StepObserver,
        ctx: &Context,
        delay_ms: u64,
    ) -> SearchOutcome {
        self.begin(Strategy::Dijkstra, grid, obs);
        self.push(grid.start(), 0);
        let mut expanded = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut cancelled = false;

        while let Some(current) = self.heap.pop() {
            let ci = current.idx;
            // Skip stale entries.
            if grid.cell(ci).visited() || i64::from(grid.cell(ci).cost()) != current.f {
                continue;
            }
            expanded += 1;
            let current_cost = grid.cell(ci).cost();
            obs.on_cell_state_changed(grid.pos(ci), VisualTag::FrontierActive);

            nbuf.clear();
            nbuf.extend_from_slice(grid.cell(ci).links());
            for &ni in nbuf.iter() {
                if grid.cell(ni).visited() {
                    continue;
                }
                let tentative = current_cost + 1;
                if tentative < grid.cell(ni).cost() {
                    grid.set_cost(ni, tentative);
                    grid.set_origin(ni, Some(ci));
                    self.push(ni, i64::from(tentative));
                }
                obs.on_cell_state_changed(grid.pos(ni), VisualTag::FrontierCandidate);
            }

            grid.set_visited(ci, true);
            obs.on_cell_state_changed(grid.pos(ci), VisualTag::Visited);

            if pause(obs, ctx, delay_ms) {
                cancelled = true;
                break;
            }
        }

        self.nbuf = nbuf;
        self.heap.clear();

        let status = if cancelled {
            SearchStatus::Cancelled
        } else if grid.cell(grid.goal()).is_reached() {
            SearchStatus::Found
        } else {
            SearchStatus::NoPath
        };
        self.finish(Strategy::Dijkstra, status, grid, obs, expanded)
    }
}
