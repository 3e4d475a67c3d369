//! The [`Grid`] type: a flat arena of [`Cell`]s addressed by [`Pos`] or by
//! linear index.
//!
//! The start cell is always `(0, 0)` and the goal cell is always
//! `(rows - 1, columns - 1)`. Walls are only ever removed through
//! [`Grid::open_border_between`], which updates both sides at once so the
//! two cells always agree about the wall they share.

use crate::cell::{Borders, Cell};
use crate::error::MazeError;
use crate::geom::{Dir, Pos, PosIter};

/// A `rows × columns` maze grid.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    columns: i32,
}

impl Grid {
    /// Create a fully walled grid with no links.
    ///
    /// Fails with [`MazeError::InvalidDimensions`] if either dimension is
    /// smaller than 1.
    pub fn new(rows: i32, columns: i32) -> Result<Self, MazeError> {
        if rows < 1 || columns < 1 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        let cells = PosIter::new(rows, columns).map(Cell::new).collect();
        Ok(Self {
            cells,
            rows,
            columns,
        })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.columns
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a position to a linear index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.columns as usize + p.col as usize)
    }

    /// Convert a linear index back to a position.
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let w = self.columns as usize;
        Pos::new((idx / w) as i32, (idx % w) as i32)
    }

    /// Index of the start cell `(0, 0)`.
    #[inline]
    pub fn start(&self) -> usize {
        0
    }

    /// Index of the goal cell `(rows - 1, columns - 1)`.
    #[inline]
    pub fn goal(&self) -> usize {
        self.cells.len() - 1
    }

    #[inline]
    pub fn start_pos(&self) -> Pos {
        Pos::ZERO
    }

    #[inline]
    pub fn goal_pos(&self) -> Pos {
        Pos::new(self.rows - 1, self.columns - 1)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The cell at linear index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// The cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn cell_at(&self, p: Pos) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Row-major iterator over all positions.
    pub fn positions(&self) -> PosIter {
        PosIter::new(self.rows, self.columns)
    }

    /// In-bounds orthogonal neighbours of `p`, in carving order
    /// (up, left, down, right).
    pub fn in_bounds_neighbors(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// Whether the wall between two adjacent cells is open.
    ///
    /// Returns `None` if either position is out of bounds or the cells are
    /// not adjacent. The answer is read from `a`'s side.
    pub fn is_open_between(&self, a: Pos, b: Pos) -> Option<bool> {
        let ca = self.cell_at(a)?;
        self.cell_at(b)?;
        let dir = a.dir_to(b)?;
        Some(!ca.borders.facing(dir))
    }

    /// Number of forward links across all cells.
    pub fn link_count(&self) -> usize {
        self.cells.iter().map(|c| c.links.len()).sum()
    }

    /// Whether every shared wall reads the same from both sides.
    pub fn is_border_symmetric(&self) -> bool {
        self.positions().all(|p| {
            [Dir::Down, Dir::Right].into_iter().all(|d| {
                let n = p.step(d);
                match (self.cell_at(p), self.cell_at(n)) {
                    (Some(a), Some(b)) => a.borders.facing(d) == b.borders.facing(d.opposite()),
                    _ => true,
                }
            })
        })
    }

    // -----------------------------------------------------------------------
    // Structural mutation
    // -----------------------------------------------------------------------

    /// Remove the wall shared by two orthogonally adjacent cells.
    ///
    /// Both cells are updated together. Fails with
    /// [`MazeError::OutOfBounds`] for unknown positions and with
    /// [`MazeError::InvalidAdjacency`] if the cells are not neighbours.
    pub fn open_border_between(&mut self, a: Pos, b: Pos) -> Result<(), MazeError> {
        let ai = self.idx(a).ok_or(MazeError::OutOfBounds(a))?;
        let bi = self.idx(b).ok_or(MazeError::OutOfBounds(b))?;
        let dir = a.dir_to(b).ok_or(MazeError::InvalidAdjacency { a, b })?;
        self.cells[ai].borders.set(dir, false);
        self.cells[bi].borders.set(dir.opposite(), false);
        Ok(())
    }

    /// Record a directed spanning-tree edge `from -> to`.
    pub fn add_forward_link(&mut self, from: usize, to: usize) {
        self.cells[from].links.push(to);
    }

    /// Overwrite the walls of a single cell.
    ///
    /// This bypasses the symmetry guarantee of
    /// [`open_border_between`](Self::open_border_between); it exists for
    /// building hand-made fixtures.
    pub fn set_borders(&mut self, idx: usize, borders: Borders) {
        self.cells[idx].borders = borders;
    }

    // -----------------------------------------------------------------------
    // Search-scoped state
    // -----------------------------------------------------------------------

    #[inline]
    pub fn set_visited(&mut self, idx: usize, visited: bool) {
        self.cells[idx].visited = visited;
    }

    #[inline]
    pub fn set_cost(&mut self, idx: usize, cost: i32) {
        self.cells[idx].cost = cost;
    }

    #[inline]
    pub fn set_origin(&mut self, idx: usize, origin: Option<usize>) {
        self.cells[idx].origin = origin;
    }

    /// Reset cost, origin and visited on every cell. Walls and links are
    /// left untouched.
    pub fn reset_search_state(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }

    /// Re-wall every cell and drop all links and search state.
    pub fn reset_structure(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_structure();
        }
    }
}
