//! The [`Cell`] type: one maze position with its walls and search metadata.

use crate::geom::{Dir, Pos};

/// Sentinel cost meaning "not reached by the current search".
pub const INFINITE_COST: i32 = i32::MAX;

/// The four wall flags of a cell. `true` means the wall is standing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Borders {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Borders {
    /// All four walls standing.
    pub const WALLED: Self = Self {
        up: true,
        down: true,
        left: true,
        right: true,
    };

    /// All four walls removed.
    pub const OPEN: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Whether the wall facing `dir` is standing.
    #[inline]
    pub const fn facing(self, dir: Dir) -> bool {
        match dir {
            Dir::Up => self.up,
            Dir::Down => self.down,
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    /// Set the wall facing `dir`.
    #[inline]
    pub fn set(&mut self, dir: Dir, closed: bool) {
        match dir {
            Dir::Up => self.up = closed,
            Dir::Down => self.down = closed,
            Dir::Left => self.left = closed,
            Dir::Right => self.right = closed,
        }
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::WALLED
    }
}

/// A single maze cell.
///
/// `origin` and `links` are arena indices into the owning
/// [`Grid`](crate::Grid), never references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    pub(crate) borders: Borders,
    pub(crate) visited: bool,
    pub(crate) cost: i32,
    pub(crate) origin: Option<usize>,
    pub(crate) links: Vec<usize>,
}

impl Cell {
    /// A fully walled, unvisited cell with no links.
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            borders: Borders::WALLED,
            visited: false,
            cost: INFINITE_COST,
            origin: None,
            links: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn borders(&self) -> Borders {
        self.borders
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Cost recorded by the last search, [`INFINITE_COST`] if unreached.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Whether the last search reached this cell.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.cost != INFINITE_COST
    }

    /// Index of the predecessor on the best known path, if any.
    #[inline]
    pub fn origin(&self) -> Option<usize> {
        self.origin
    }

    /// Forward links carved out of this cell, in discovery order.
    #[inline]
    pub fn links(&self) -> &[usize] {
        &self.links
    }

    pub(crate) fn reset_search(&mut self) {
        self.cost = INFINITE_COST;
        self.origin = None;
        self.visited = false;
    }

    pub(crate) fn reset_structure(&mut self) {
        self.borders = Borders::WALLED;
        self.links.clear();
        self.reset_search();
    }
}
