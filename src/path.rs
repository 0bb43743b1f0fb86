use crate::cell::Role;
use crate::cell_grid::CellGrid;
use grid_util::point::Point;

/// Walks the parent links back from `end`, marking every cell on the way as [Role::Path]
/// (endpoints keep their role). The returned points run from the cell after the start up to
/// and including `end`. Empty if `end` is outside the grid or was never reached.
pub fn reconstruct(grid: &mut CellGrid, end: Point) -> Vec<Point> {
    match grid.ix(end) {
        Some(ix) => reconstruct_from(grid, ix),
        None => Vec::new(),
    }
}

pub(crate) fn reconstruct_from(grid: &mut CellGrid, end: usize) -> Vec<Point> {
    let limit = grid.len();
    let mut path = Vec::new();
    let mut current = end;
    while let Some(parent) = grid.cell_mut(current).parent {
        let cell = grid.cell_mut(current);
        cell.mark(Role::Path);
        path.push(cell.point());
        current = parent;
        debug_assert!(path.len() <= limit, "parent links form a cycle");
    }
    path.reverse();
    path
}
