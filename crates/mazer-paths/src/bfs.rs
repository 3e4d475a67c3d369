use mazer_core::{Context, Grid, INFINITE_COST, StepObserver, VisualTag};

use crate::PathFinder;
use crate::path::{SearchOutcome, SearchStatus};
use crate::pathfinder::pause;
use crate::strategy::Strategy;

impl PathFinder {
    /// Breadth-first search from start to goal over forward links.
    ///
    /// A cell is enqueued the first time it is seen (its cost is still
    /// infinite) and the search stops as soon as the goal is dequeued.
    pub fn bfs(
        &mut self,
        grid: &mut Grid,
        obs: &mut impl StepObserver,
        ctx: &Context,
        delay_ms: u64,
    ) -> SearchOutcome {
        self.begin(Strategy::Bfs, grid, obs);
        let goal = grid.goal();
        self.queue.push_back(grid.start());
        let mut expanded = 0;

        let status = loop {
            let Some(ci) = self.queue.pop_front() else {
                break SearchStatus::NoPath;
            };
            expanded += 1;
            if ci == goal {
                break SearchStatus::Found;
            }

            let next_cost = grid.cell(ci).cost() + 1;
            self.load_links(grid, ci);
            for &ni in &self.nbuf {
                if grid.cell(ni).cost() != INFINITE_COST {
                    continue;
                }
                grid.set_cost(ni, next_cost);
                grid.set_origin(ni, Some(ci));
                obs.on_cell_state_changed(grid.pos(ni), VisualTag::FrontierCandidate);
                self.queue.push_back(ni);
            }
            grid.set_visited(ci, true);
            obs.on_cell_state_changed(grid.pos(ci), VisualTag::Visited);

            if pause(obs, ctx, delay_ms) {
                break SearchStatus::Cancelled;
            }
        };

        self.queue.clear();
        self.finish(Strategy::Bfs, status, grid, obs, expanded)
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{carved, corridor};
    use crate::{PathFinder, SearchStatus};
    use mazer_core::{Context, Grid, NullObserver, Pos, Recorder, VisualTag};

    #[test]
    fn bfs_single_cell() {
        let mut grid = Grid::new(1, 1).unwrap();
        let out = PathFinder::new().bfs(&mut grid, &mut NullObserver, &Context::new(), 0);
        assert_eq!(out.status, SearchStatus::Found);
        assert_eq!(out.path, vec![Pos::ZERO]);
        assert_eq!(out.path_len(), Some(0));
    }

    #[test]
    fn bfs_corridor() {
        let mut grid = corridor(5);
        let out = PathFinder::new().bfs(&mut grid, &mut NullObserver, &Context::new(), 0);
        assert_eq!(out.path_len(), Some(4));
        assert_eq!(out.path.first(), Some(&Pos::new(0, 0)));
        assert_eq!(out.path.last(), Some(&Pos::new(0, 4)));
        assert_eq!(grid.cell(grid.goal()).cost(), 4);
    }

    #[test]
    fn bfs_ignores_open_walls_without_links() {
        // Walls open all the way but no forward links: unreachable.
        let mut grid = Grid::new(1, 3).unwrap();
        grid.open_border_between(Pos::new(0, 0), Pos::new(0, 1)).unwrap();
        grid.open_border_between(Pos::new(0, 1), Pos::new(0, 2)).unwrap();
        let out = PathFinder::new().bfs(&mut grid, &mut NullObserver, &Context::new(), 0);
        assert_eq!(out.status, SearchStatus::NoPath);
        assert!(out.path.is_empty());
        assert_eq!(out.expanded, 1);
    }

    #[test]
    fn bfs_stops_at_goal_and_marks_path() {
        let mut grid = carved(8, 8, 21);
        let mut rec = Recorder::new();
        let out = PathFinder::new().bfs(&mut grid, &mut rec, &Context::new(), 0);
        assert!(out.is_found());
        assert_eq!(rec.tagged(VisualTag::PathMarked), out.path);
        assert_eq!(rec.steps(), out.expanded - 1);
    }

    #[test]
    fn bfs_cancelled() {
        let mut grid = carved(8, 8, 2);
        let ctx = Context::new();
        ctx.cancel();
        let out = PathFinder::new().bfs(&mut grid, &mut NullObserver, &ctx, 0);
        assert_eq!(out.status, SearchStatus::Cancelled);
        assert_eq!(out.expanded, 1);
        assert!(out.path.is_empty());
    }
}
