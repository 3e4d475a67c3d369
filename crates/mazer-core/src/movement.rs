//! Free-form movement through a carved maze.
//!
//! Movement is governed by walls only. It does not look at forward links,
//! so an avatar may walk a corridor against the direction it was carved in.

use crate::geom::{Dir, Pos};
use crate::grid::Grid;
use crate::observer::{StepObserver, VisualTag};

/// Whether a single step from `from` to `to` is allowed.
///
/// Returns `false` if either position is outside the grid, or if the wall
/// of `from` facing the direction of travel is standing. Only `from`'s wall
/// is consulted. A zero-length move is allowed.
pub fn can_move(grid: &Grid, from: Pos, to: Pos) -> bool {
    let (Some(cell), true) = (grid.cell_at(from), grid.contains(to)) else {
        return false;
    };
    let borders = cell.borders();
    if to.row < from.row && borders.up {
        return false;
    }
    if to.row > from.row && borders.down {
        return false;
    }
    if to.col < from.col && borders.left {
        return false;
    }
    if to.col > from.col && borders.right {
        return false;
    }
    true
}

/// A user-controlled marker that walks the maze one cell at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pos: Pos,
}

impl Avatar {
    /// Place an avatar on `pos` and report the occupied cell.
    pub fn spawn(pos: Pos, obs: &mut impl StepObserver) -> Self {
        obs.on_cell_state_changed(pos, VisualTag::OccupiedByAvatar);
        Self { pos }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Try to move one step in `dir`. Returns whether the avatar moved.
    pub fn step(&mut self, grid: &Grid, dir: Dir, obs: &mut impl StepObserver) -> bool {
        let target = self.pos.step(dir);
        if !can_move(grid, self.pos, target) {
            log::trace!("avatar blocked moving {dir} from {}", self.pos);
            return false;
        }
        obs.on_cell_state_changed(self.pos, VisualTag::Default);
        self.pos = target;
        obs.on_cell_state_changed(self.pos, VisualTag::OccupiedByAvatar);
        true
    }

    /// Remove the avatar, restoring its cell.
    pub fn despawn(self, obs: &mut impl StepObserver) {
        obs.on_cell_state_changed(self.pos, VisualTag::Default);
    }
}
