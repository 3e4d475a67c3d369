//! Plain-text rendering of a maze.
//!
//! Each cell takes a 4×2 block of characters: walls are drawn as `---` and
//! `|`, corners as `+`. The interior of a cell is three characters wide.

use mazer_core::{Grid, Pos};
use mazer_paths::{SearchOutcome, SearchStatus};

/// Characters per cell horizontally, not counting the shared right wall.
pub const CELL_WIDTH: u16 = 4;
/// Lines per cell vertically, not counting the shared bottom wall.
pub const CELL_HEIGHT: u16 = 2;

/// `n * per + 1`, the screen extent of `n` cells of size `per` plus the
/// closing wall.
fn screen_span(n: i32, per: u16) -> Option<u16> {
    u16::try_from(n).ok()?.checked_mul(per)?.checked_add(1)
}

/// Width and height in characters of a rendered `rows × columns` maze, or
/// `None` if either does not fit in screen coordinates.
pub fn maze_size(rows: i32, columns: i32) -> Option<(u16, u16)> {
    Some((screen_span(columns, CELL_WIDTH)?, screen_span(rows, CELL_HEIGHT)?))
}

/// Screen offset of the first interior character of `pos`, relative to the
/// maze's top-left corner, or `None` if it does not fit in screen
/// coordinates.
pub fn interior(pos: Pos) -> Option<(u16, u16)> {
    Some((screen_span(pos.col, CELL_WIDTH)?, screen_span(pos.row, CELL_HEIGHT)?))
}

/// Column and line of the first interior character of `pos` in a text
/// canvas.
fn canvas_interior(pos: Pos) -> (usize, usize) {
    (
        pos.col as usize * CELL_WIDTH as usize + 1,
        pos.row as usize * CELL_HEIGHT as usize + 1,
    )
}

/// Render `grid` as text. Cells on `path` are marked `*`, the start `S` and
/// the goal `G`.
///
/// Works for any grid size; the layout is not limited to screen
/// coordinates.
pub fn render_text(grid: &Grid, path: &[Pos]) -> String {
    let w = grid.columns() as usize * CELL_WIDTH as usize + 1;
    let h = grid.rows() as usize * CELL_HEIGHT as usize + 1;
    let mut canvas = vec![vec![' '; w]; h];
    for y in (0..h).step_by(CELL_HEIGHT as usize) {
        for x in (0..w).step_by(CELL_WIDTH as usize) {
            canvas[y][x] = '+';
        }
    }

    for c in grid.iter() {
        let (x, y) = canvas_interior(c.pos());
        let b = c.borders();
        for dx in 0..3 {
            if b.up {
                canvas[y - 1][x + dx] = '-';
            }
            if b.down {
                canvas[y + 1][x + dx] = '-';
            }
        }
        if b.left {
            canvas[y][x - 1] = '|';
        }
        if b.right {
            canvas[y][x + 3] = '|';
        }
    }

    let mut mark = |pos: Pos, ch: char| {
        if grid.contains(pos) {
            let (x, y) = canvas_interior(pos);
            canvas[y][x + 1] = ch;
        }
    };
    for &p in path {
        mark(p, '*');
    }
    mark(grid.goal_pos(), 'G');
    mark(grid.start_pos(), 'S');

    let mut out = String::with_capacity((w + 1) * h);
    for line in canvas {
        out.extend(line);
        out.push('\n');
    }
    out
}

/// One-line description of a search outcome.
pub fn summary(outcome: &SearchOutcome) -> String {
    let s = outcome.strategy;
    let n = outcome.expanded;
    match outcome.status {
        SearchStatus::Found => format!(
            "{s}: path of {} steps, {n} cells expanded",
            outcome.path.len().saturating_sub(1)
        ),
        SearchStatus::NoPath => format!("{s}: no path, {n} cells expanded"),
        SearchStatus::Cancelled => format!("{s}: cancelled after {n} cells"),
    }
}
