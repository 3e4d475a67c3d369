//! Geometry primitives: [`Pos`], [`Dir`] and the row-major [`PosIter`].
//!
//! Positions are addressed as `(row, col)`. Rows grow downward, columns grow
//! to the right, so `(0, 0)` is the top-left cell of a maze.

use std::fmt;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell position in a maze grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Top-left corner (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position one step away in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Dir) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The four orthogonal neighbours in carving order: up, left, down, right.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        Dir::CARVE_ORDER.map(|d| self.step(d))
    }

    /// Direction of travel from `self` to an orthogonally adjacent `other`.
    ///
    /// Returns `None` if the two positions are not exactly one step apart,
    /// including when they are too far apart to subtract.
    pub fn dir_to(self, other: Pos) -> Option<Dir> {
        let dr = other.row.checked_sub(self.row)?;
        let dc = other.col.checked_sub(self.col)?;
        match (dr, dc) {
            (-1, 0) => Some(Dir::Up),
            (1, 0) => Some(Dir::Down),
            (0, -1) => Some(Dir::Left),
            (0, 1) => Some(Dir::Right),
            _ => None,
        }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// One of the four orthogonal directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Neighbour enumeration order used by the maze carver.
    pub const CARVE_ORDER: [Dir; 4] = [Dir::Up, Dir::Left, Dir::Down, Dir::Right];

    /// `(row, col)` delta of a single step.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dir::Up => "up",
            Dir::Down => "down",
            Dir::Left => "left",
            Dir::Right => "right",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// PosIter
// ---------------------------------------------------------------------------

/// Row-major iterator over every position of a `rows × columns` grid.
#[derive(Clone, Debug)]
pub struct PosIter {
    rows: i32,
    columns: i32,
    cur: Pos,
}

impl PosIter {
    pub(crate) fn new(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            cur: Pos::ZERO,
        }
    }
}

impl Iterator for PosIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.cur.row >= self.rows || self.columns <= 0 {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.columns {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.columns <= 0 || self.cur.row >= self.rows {
            return (0, Some(0));
        }
        let remaining_in_row = (self.columns - self.cur.col) as usize;
        let remaining_rows = (self.rows - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * self.columns as usize;
        (total, Some(total))
    }
}

impl ExactSizeIterator for PosIter {}
