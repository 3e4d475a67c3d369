use mazer_core::{Context, Grid, StepObserver, VisualTag};

use crate::PathFinder;
use crate::path::{SearchOutcome, SearchStatus};
use crate::pathfinder::pause;
use crate::strategy::Strategy;

impl PathFinder {
    /// A* search from start to goal over forward links.
    ///
    /// The open member with the lowest `f = g + h` is expanded next (ties go
    /// to the cell queued first); `g` is the cell's recorded cost and `h`
    /// comes from the finder's [`Heuristic`](crate::Heuristic). The search
    /// stops as soon as the goal is selected.
    pub fn astar(
        &mut self,
        grid: &mut Grid,
        obs: &mut impl StepObserver,
        ctx: &Context,
        delay_ms: u64,
    ) -> SearchOutcome {
        self.begin(Strategy::Astar, grid, obs);
        let goal = grid.goal();
        let goal_pos = grid.goal_pos();
        let h = self.heuristic;
        let estimate = |grid: &Grid, i: usize| i64::from(h.estimate(grid.pos(i), goal_pos));

        self.in_open.clear();
        self.in_open.resize(grid.len(), false);
        let start = grid.start();
        self.in_open[start] = true;
        self.push(start, estimate(grid, start));

        let mut expanded = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let status = 'search: loop {
            let Some(current) = self.heap.pop() else {
                break 'search SearchStatus::NoPath;
            };
            let ci = current.idx;

            // Skip stale entries.
            if !self.in_open[ci]
                || i64::from(grid.cell(ci).cost()) + estimate(grid, ci) != current.f
            {
                continue;
            }
            expanded += 1;

            if ci == goal {
                break 'search SearchStatus::Found;
            }

            // Move to the closed set.
            self.in_open[ci] = false;
            grid.set_visited(ci, true);
            let current_g = grid.cell(ci).cost();
            obs.on_cell_state_changed(grid.pos(ci), VisualTag::Visited);

            nbuf.clear();
            nbuf.extend_from_slice(grid.cell(ci).links());
            for &ni in nbuf.iter() {
                if grid.cell(ni).visited() {
                    continue;
                }
                let tentative_g = current_g + 1;
                if self.in_open[ni] && tentative_g >= grid.cell(ni).cost() {
                    continue;
                }
                self.in_open[ni] = true;
                grid.set_cost(ni, tentative_g);
                grid.set_origin(ni, Some(ci));
                self.push(ni, i64::from(tentative_g) + estimate(grid, ni));
                obs.on_cell_state_changed(grid.pos(ni), VisualTag::FrontierCandidate);
            }

            if pause(obs, ctx, delay_ms) {
                break 'search SearchStatus::Cancelled;
            }
        };

        self.nbuf = nbuf;
        self.heap.clear();
        self.finish(Strategy::Astar, status, grid, obs, expanded)
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{carved, corridor, tree_distance, two_routes};
    use crate::{Heuristic, PathFinder, SearchStatus};
    use mazer_core::{Context, Grid, NullObserver, Pos};

    #[test]
    fn astar_single_cell() {
        let mut grid = Grid::new(1, 1).unwrap();
        let out = PathFinder::new().astar(&mut grid, &mut NullObserver, &Context::new(), 0);
        assert_eq!(out.path, vec![Pos::ZERO]);
        assert_eq!(out.path_len(), Some(0));
    }

    #[test]
    fn astar_corridor() {
        let mut grid = corridor(4);
        let out = PathFinder::new().astar(&mut grid, &mut NullObserver, &Context::new(), 0);
        assert_eq!(out.path_len(), Some(3));
        assert_eq!(out.expanded, 4);
    }

    #[test]
    fn astar_matches_tree_distance_with_both_heuristics() {
        for seed in 0..8 {
            for h in [Heuristic::Manhattan, Heuristic::Signed] {
                let mut grid = carved(9, 11, seed);
                let expected = tree_distance(&grid);
                let out = PathFinder::with_heuristic(h).astar(
                    &mut grid,
                    &mut NullObserver,
                    &Context::new(),
                    0,
                );
                assert_eq!(out.path_len(), Some(expected), "seed {seed} {h}");
            }
        }
    }

    #[test]
    fn astar_no_path() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.add_forward_link(0, 1);
        let out = PathFinder::new().astar(&mut grid, &mut NullObserver, &Context::new(), 0);
        assert_eq!(out.status, SearchStatus::NoPath);
        assert_eq!(out.path_len(), None);
        assert!(out.path.is_empty());
    }

    #[test]
    fn astar_cancelled() {
        let mut grid = carved(6, 6, 1);
        let ctx = Context::new();
        ctx.cancel();
        let out = PathFinder::new().astar(&mut grid, &mut NullObserver, &ctx, 0);
        assert_eq!(out.status, SearchStatus::Cancelled);
    }

    #[test]
    fn astar_improves_open_cell() {
        for h in [Heuristic::Manhattan, Heuristic::Signed] {
            let mut grid = two_routes();
            let out = PathFinder::with_heuristic(h).astar(
                &mut grid,
                &mut NullObserver,
                &Context::new(),
                0,
            );
            assert_eq!(
                out.path,
                vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(2, 2)],
                "{h}"
            );
            // (1, 1) was queued through (2, 1) first, then re-parented to the
            // cheaper (0, 1).
            let mid = grid.cell_at(Pos::new(1, 1)).unwrap();
            assert_eq!(mid.cost(), 2);
            assert_eq!(mid.origin(), Some(1));
            // The outdated heap entry for (1, 1) is dropped, not expanded.
            assert_eq!(out.expanded, 7, "{h}");
        }
    }
}
