//! Fixtures shared by the search tests.

use mazer_core::{Context, Grid, NullObserver};
use mazer_gen::MazeGen;

/// A `1 × n` maze carved left to right.
pub(crate) fn corridor(n: i32) -> Grid {
    let mut grid = Grid::new(1, n).unwrap();
    for c in 1..n as usize {
        let (a, b) = (grid.pos(c - 1), grid.pos(c));
        grid.open_border_between(a, b).unwrap();
        grid.add_forward_link(c - 1, c);
    }
    grid
}

/// A randomly carved maze with a fixed seed.
pub(crate) fn carved(rows: i32, columns: i32, seed: u64) -> Grid {
    let mut grid = Grid::new(rows, columns).unwrap();
    MazeGen::seeded(seed)
        .carve(&mut grid, &mut NullObserver, &Context::new(), 0)
        .unwrap();
    grid
}

/// Depth of the goal in the forward-link tree, computed without the finder.
pub(crate) fn tree_distance(grid: &Grid) -> usize {
    let mut depth = vec![usize::MAX; grid.len()];
    let mut stack = vec![grid.start()];
    depth[grid.start()] = 0;
    while let Some(i) = stack.pop() {
        for &j in grid.cell(i).links() {
            depth[j] = depth[i] + 1;
            stack.push(j);
        }
    }
    depth[grid.goal()]
}

/// A 3×3 link graph with two routes to the goal, ignoring walls:
///
/// ```text
/// 0 -> 2 -> 7 -> 4
/// 0 -> 1 -> 4
/// 1 -> 3 -> 8
/// ```
///
/// Cell 4 is first reached at cost 3 through 7, then at cost 2 through 1.
/// Cells 5 and 6 are unreachable. The shortest route is 0, 1, 3, 8.
pub(crate) fn two_routes() -> Grid {
    let mut grid = Grid::new(3, 3).unwrap();
    for (from, to) in [(0, 2), (0, 1), (1, 4), (1, 3), (2, 7), (3, 8), (7, 4)] {
        grid.add_forward_link(from, to);
    }
    grid
}
