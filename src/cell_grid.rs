use crate::cell::{Cell, Role};
use crate::error::{GridError, SearchError};
use crate::search::Search;
use crate::{DEFAULT_COLS, DEFAULT_ROWS, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [CellGrid] owns a `rows × cols` block of [Cell]s stored row-major, so that a flat index
/// `row * cols + col` doubles as the handle the search uses for parent links. Points use `x`
/// for the column and `y` for the row.
///
/// In addition to the cells it tracks the placed start and end, and maintains information
/// about 4-connected components using a [UnionFind] structure to answer reachability queries
/// without searching.
#[derive(Clone, Debug)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    neighbours: Vec<SmallVec<[usize; N_SMALLVEC_SIZE]>>,
    start: Option<Point>,
    end: Option<Point>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for CellGrid {
    fn default() -> CellGrid {
        CellGrid::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl CellGrid {
    /// Allocates an empty grid in which every cell is [Role::Empty] and undiscovered.
    pub fn new(rows: usize, cols: usize) -> CellGrid {
        let mut grid = CellGrid {
            rows,
            cols,
            cells: iproduct!(0..rows, 0..cols)
                .map(|(row, col)| Cell::new(row, col))
                .collect(),
            neighbours: vec![SmallVec::new(); rows * cols],
            start: None,
            end: None,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    /// Flat index of a point, [None] if it lies outside the grid.
    pub fn ix(&self, point: Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| point.y as usize * self.cols + point.x as usize)
    }
    pub fn point_of(&self, ix: usize) -> Point {
        self.cells[ix].point()
    }
    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.ix(point).map(|ix| &self.cells[ix])
    }
    /// Looks up a cell by flat index, as stored in [Cell::parent].
    pub fn cell_at(&self, ix: usize) -> Option<&Cell> {
        self.cells.get(ix)
    }
    pub(crate) fn cell_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }
    pub fn role(&self, point: Point) -> Option<Role> {
        self.cell(point).map(Cell::role)
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    pub fn is_passable(&self, point: Point) -> bool {
        self.cell(point).is_some_and(|cell| !cell.is_barrier())
    }

    /// The in-bounds, non-barrier neighbours of a point in the order up, down, left, right.
    pub fn neighbors_of(&self, point: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let (x, y) = (point.x, point.y);
        [
            y.checked_sub(1).map(|y| Point::new(x, y)),
            y.checked_add(1).map(|y| Point::new(x, y)),
            x.checked_sub(1).map(|x| Point::new(x, y)),
            x.checked_add(1).map(|x| Point::new(x, y)),
        ]
        .into_iter()
        .flatten()
        .filter(|p| self.is_passable(*p))
        .collect()
    }
    /// Snapshots the neighbour indices of every cell for the current barrier layout.
    pub(crate) fn update_neighbours(&mut self) {
        let neighbours: Vec<SmallVec<[usize; N_SMALLVEC_SIZE]>> = (0..self.cells.len())
            .map(|ix| {
                self.neighbors_of(self.point_of(ix))
                    .into_iter()
                    .filter_map(|p| self.ix(p))
                    .collect()
            })
            .collect();
        self.neighbours = neighbours;
    }
    pub(crate) fn neighbour_indices(&self, ix: usize) -> &[usize] {
        &self.neighbours[ix]
    }

    /// Forgets scores, parents and frontier membership of every cell. Roles are untouched.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_state();
        }
    }
    /// Turns the open, closed and path marks of a previous run back into empty cells, along
    /// with any start or end tag that is not at the placed start or end.
    pub fn clear_search_marks(&mut self) {
        self.clear_stray_endpoints();
        for cell in &mut self.cells {
            if cell.role.is_search_mark() {
                cell.role = Role::Empty;
            }
        }
    }
    /// A search towards an unplaced goal tags it [Role::End] without placing it. Such tags are
    /// dropped here so that the board never shows more than one start and one end.
    fn clear_stray_endpoints(&mut self) {
        let (start, end) = (self.start, self.end);
        for cell in &mut self.cells {
            let p = Some(cell.point());
            if cell.role.is_endpoint() && p != start && p != end {
                debug!("Dropping stray {:?} tag at {}", cell.role, cell.point());
                cell.role = Role::Empty;
            }
        }
    }
    /// Empties the whole board, including the placed start and end.
    pub fn reset(&mut self) {
        info!("Resetting {}x{} grid", self.rows, self.cols);
        *self = CellGrid::new(self.rows, self.cols);
    }

    /// Assigns a placement role to a cell. Only [Role::Start], [Role::End], [Role::Barrier] and
    /// [Role::Empty] can be placed; the remaining roles belong to the search. A second start or
    /// end is rejected while the first one is still on the board. Overwriting the cell that
    /// holds an endpoint releases that endpoint.
    pub fn set_role(&mut self, point: Point, role: Role) -> Result<(), GridError> {
        let ix = self.ix(point).ok_or(GridError::OutOfBounds(point))?;
        if role.is_search_mark() {
            return Err(GridError::InvalidPlacement(role));
        }
        let held = match role {
            Role::Start => self.start,
            Role::End => self.end,
            _ => None,
        };
        if let Some(at) = held.filter(|at| *at != point) {
            return Err(GridError::EndpointTaken { role, at });
        }
        if role.is_endpoint() {
            self.clear_stray_endpoints();
        }
        let previous = self.cells[ix].role;
        if self.start == Some(point) && role != Role::Start {
            self.start = None;
        }
        if self.end == Some(point) && role != Role::End {
            self.end = None;
        }
        match role {
            Role::Empty => self.cells[ix].reset(),
            _ => self.cells[ix].role = role,
        }
        match role {
            Role::Start => self.start = Some(point),
            Role::End => self.end = Some(point),
            _ => {}
        }
        self.update_components(ix, previous.is_barrier(), role.is_barrier());
        debug!("{} changed from {:?} to {:?}", point, previous, role);
        Ok(())
    }
    /// Places the next item the way a pointer click would: the start if there is none, then the
    /// end, then barriers. Endpoints are never overwritten. Returns the role the cell holds
    /// afterwards.
    pub fn place(&mut self, point: Point) -> Result<Role, GridError> {
        let current = self
            .role(point)
            .ok_or(GridError::OutOfBounds(point))?;
        let role = if self.start.is_none() && current != Role::End {
            Role::Start
        } else if self.end.is_none() && current != Role::Start {
            Role::End
        } else if !current.is_endpoint() {
            Role::Barrier
        } else {
            return Ok(current);
        };
        self.set_role(point, role)?;
        Ok(role)
    }
    /// Clears a cell, releasing the start or end if it was held there.
    pub fn clear(&mut self, point: Point) -> Result<(), GridError> {
        self.set_role(point, Role::Empty)
    }
    /// Lays out barriers from a maze matrix that is `cols` wide and `rows` high, where [true]
    /// marks a barrier. The cells holding the start and end are left alone.
    pub fn apply_maze(&mut self, maze: &BoolGrid) -> Result<(), GridError> {
        if maze.width() != self.cols || maze.height() != self.rows {
            return Err(GridError::DimensionMismatch {
                width: maze.width(),
                height: maze.height(),
                cols: self.cols,
                rows: self.rows,
            });
        }
        let (start, end) = (self.start, self.end);
        for cell in self.cells.iter_mut() {
            let p = cell.point();
            if Some(p) == start || Some(p) == end {
                continue;
            }
            if maze.get(p.x as usize, p.y as usize) {
                cell.role = Role::Barrier;
            } else {
                cell.reset();
            }
        }
        info!("Applied {}x{} maze", self.cols, self.rows);
        self.generate_components();
        Ok(())
    }

    /// Starts a search between the placed start and end.
    pub fn search(&mut self) -> Result<Search<'_>, SearchError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Search::new(self, start, end),
            _ => Err(SearchError::InvalidEndpoints),
        }
    }
    /// Runs a search over the placed start and end to completion.
    pub fn run_placed(&mut self) -> Result<Vec<Point>, SearchError> {
        self.search()?.finish()
    }

    fn update_components(&mut self, ix: usize, was_blocked: bool, blocked: bool) {
        if blocked {
            // Blocking a cell can split a component, which union-find cannot undo
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let neighbours = self
                .neighbors_of(self.point_of(ix))
                .into_iter()
                .filter_map(|p| self.ix(p))
                .collect::<SmallVec<[usize; N_SMALLVEC_SIZE]>>();
            for n in neighbours {
                self.components.union(ix, n);
            }
        }
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.ix(*point).map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are on the same component. Only accurate while the components
    /// are not dirty, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix(*start), self.ix(*goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                self.is_passable(*start)
                    && self.is_passable(*goal)
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            let point = self.point_of(ix);
            if !self.is_passable(point) {
                continue;
            }
            // Linking forward is enough, the backward links were made from the other side
            for p in [Point::new(point.x, point.y + 1), Point::new(point.x + 1, point.y)] {
                if let Some(n) = self.ix(p).filter(|_| self.is_passable(p)) {
                    self.components.union(ix, n);
                }
            }
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = self.cells[row * self.cols..(row + 1) * self.cols]
                .iter()
                .map(|cell| cell.role().symbol())
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
