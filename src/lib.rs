//! # grid_astar
//!
//! Shortest paths on a 4-connected grid with barrier cells, using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//! Every cell carries a [Role] that records both the layout (start, end, barriers) and the
//! progress of the search (open, closed, path), so that a renderer can draw the grid between
//! the steps of a [Search].
//!
//! Ties between equal estimated costs are broken by insertion order, which makes both the
//! returned path and the order in which cells are expanded deterministic. Connected
//! components are maintained alongside the grid to answer reachability queries without
//! searching.
pub mod cell;
pub mod cell_grid;
pub mod distance;
pub mod error;
pub mod frontier;
pub mod path;
pub mod search;

pub use cell::{Cell, Role};
pub use cell_grid::CellGrid;
pub use distance::{heuristic, path_cost, step_cost};
pub use error::{GridError, SearchError};
pub use path::reconstruct;
pub use search::{Search, SearchStep};

use grid_util::point::Point;

/// Rows of a [CellGrid::default], matching a 640 pixel high window of 16 pixel cells.
pub const DEFAULT_ROWS: usize = 40;
/// Columns of a [CellGrid::default].
pub const DEFAULT_COLS: usize = 50;
/// A cell has at most 4 neighbours, so neighbour lists never spill to the heap.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Runs a search from `start` to `end` to completion. On success the returned path excludes
/// the start and includes the end; the cells along it are marked [Role::Path].
pub fn run_search(
    grid: &mut CellGrid,
    start: Point,
    end: Point,
) -> Result<Vec<Point>, SearchError> {
    Search::new(grid, start, end)?.finish()
}
