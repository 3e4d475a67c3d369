use mazer_core::{Grid, Pos, StepObserver, VisualTag};

use crate::strategy::Strategy;

/// How a search run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// The goal was reached and a path reconstructed.
    Found,
    /// The frontier ran dry without reaching the goal.
    NoPath,
    /// The run was cancelled at a pacing point.
    Cancelled,
}

/// Result of one search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    pub status: SearchStatus,
    /// Cells from start to goal, both included. Empty unless `Found`.
    pub path: Vec<Pos>,
    /// Cells taken off the frontier.
    pub expanded: usize,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Number of edges on the path, `None` if no path was found.
    ///
    /// A single-cell maze yields `Some(0)`.
    pub fn path_len(&self) -> Option<usize> {
        if self.is_found() {
            Some(self.path.len().saturating_sub(1))
        } else {
            None
        }
    }
}

/// Follow origins back from the goal and return the path start → goal.
///
/// Returns an empty path if the goal was not reached by the last search.
pub fn path_to_goal(grid: &Grid) -> Vec<Pos> {
    let goal = grid.goal();
    if !grid.cell(goal).is_reached() {
        return Vec::new();
    }
    let mut path: Vec<Pos> = std::iter::successors(Some(goal), |&i| grid.cell(i).origin())
        .take(grid.len())
        .map(|i| grid.pos(i))
        .collect();
    path.reverse();
    path
}

/// [`path_to_goal`], clearing earlier marks and reporting every path cell
/// as [`VisualTag::PathMarked`].
pub(crate) fn mark_path(grid: &Grid, obs: &mut impl StepObserver) -> Vec<Pos> {
    for c in grid.iter().filter(|c| c.is_reached()) {
        obs.on_cell_state_changed(c.pos(), VisualTag::Default);
    }
    let path = path_to_goal(grid);
    for &p in &path {
        obs.on_cell_state_changed(p, VisualTag::PathMarked);
    }
    path
}
