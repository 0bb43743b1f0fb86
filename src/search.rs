//! The A* loop, exposed as an iterator so that a caller can observe the grid between steps.
//! Every call to [Iterator::next] pops one cell from the frontier and relaxes its neighbours.
//! Dropping a [Search] part way through is fine: the grid stays consistent and the next search
//! resets it.
use crate::cell::Role;
use crate::cell_grid::CellGrid;
use crate::distance::{heuristic, step_cost};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::path::reconstruct_from;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{info, trace, warn};

pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// One unit of progress reported by a [Search].
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    /// The given cell was popped, its neighbours relaxed and the cell closed.
    Expanded(Point),
    /// The end was popped. Holds the path from the cell after the start up to the end.
    Found(Vec<Point>),
    /// The frontier ran dry without reaching the end.
    Exhausted,
}

pub struct Search<'a> {
    grid: &'a mut CellGrid,
    frontier: Frontier,
    start: usize,
    end: usize,
    end_point: Point,
    visited: FxIndexSet<Point>,
    outcome: Option<Result<Vec<Point>, SearchError>>,
}

impl<'a> Search<'a> {
    /// Prepares a search from `start` to `end`: wipes the marks and search state of any
    /// previous run, snapshots the neighbourhoods and queues the start.
    pub fn new(
        grid: &'a mut CellGrid,
        start: Point,
        end: Point,
    ) -> Result<Search<'a>, SearchError> {
        let (Some(start_ix), Some(end_ix)) = (grid.ix(start), grid.ix(end)) else {
            return Err(SearchError::InvalidEndpoints);
        };
        if start_ix == end_ix {
            return Err(SearchError::InvalidEndpoints);
        }
        grid.clear_search_marks();
        grid.reset_search_state();
        grid.update_neighbours();

        let mut frontier = Frontier::new();
        // A start on a barrier is never queued, just like a barrier end is never reached
        if grid.is_passable(start) {
            let h = heuristic(&start, &end);
            let cell = grid.cell_mut(start_ix);
            cell.g_score = 0.0;
            cell.f_score = h;
            cell.queued = true;
            frontier.push(start_ix, h);
        }
        info!("Searching for a path from {} to {}", start, end);
        Ok(Search {
            grid,
            frontier,
            start: start_ix,
            end: end_ix,
            end_point: end,
            visited: FxIndexSet::default(),
            outcome: None,
        })
    }
    /// Read access for renderers between steps.
    pub fn grid(&self) -> &CellGrid {
        &*self.grid
    }
    /// [true] until the search has found the end or run out of cells.
    pub fn is_running(&self) -> bool {
        self.outcome.is_none()
    }
    /// Cells in the order they were expanded.
    pub fn visit_order(&self) -> impl Iterator<Item = &Point> {
        self.visited.iter()
    }
    pub fn has_expanded(&self, point: &Point) -> bool {
        self.visited.contains(point)
    }
    pub fn expanded_count(&self) -> usize {
        self.visited.len()
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
    /// Runs the remaining steps and returns the outcome.
    pub fn finish(mut self) -> Result<Vec<Point>, SearchError> {
        self.by_ref().for_each(drop);
        self.outcome.unwrap_or(Err(SearchError::NoPathExists))
    }

    fn relax_neighbours(&mut self, current: usize) {
        let current_point = self.grid.point_of(current);
        let current_g = self.grid.cell_mut(current).g_score;
        let neighbours = self.grid.neighbour_indices(current).to_vec();
        for n in neighbours {
            let n_point = self.grid.point_of(n);
            let tentative_g = current_g + step_cost(&current_point, &n_point);
            let cell = self.grid.cell_mut(n);
            // Strict improvement only, which keeps the parent links a tree
            if tentative_g < cell.g_score {
                cell.parent = Some(current);
                cell.g_score = tentative_g;
                cell.f_score = tentative_g + heuristic(&n_point, &self.end_point);
                if !self.frontier.contains(n) {
                    self.frontier.push(n, cell.f_score);
                    cell.queued = true;
                }
                cell.mark(Role::Open);
            }
        }
    }
}

impl Iterator for Search<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        if self.outcome.is_some() {
            return None;
        }
        let Some(current) = self.frontier.pop() else {
            info!("No path exists, expanded {} cells", self.visited.len());
            let start_point = self.grid.point_of(self.start);
            if !self.grid.components_dirty && self.grid.reachable(&start_point, &self.end_point) {
                warn!("Reachable goal could not be pathed to, are the components up to date?");
            }
            self.outcome = Some(Err(SearchError::NoPathExists));
            return Some(SearchStep::Exhausted);
        };
        self.grid.cell_mut(current).queued = false;
        let current_point = self.grid.point_of(current);
        self.visited.insert(current_point);
        trace!("Expanding {}", current_point);

        if current == self.end {
            let path = reconstruct_from(self.grid, current);
            let cell = self.grid.cell_mut(current);
            if cell.role != Role::Start {
                cell.role = Role::End;
            }
            info!(
                "Found path of length {} after expanding {} cells",
                path.len(),
                self.visited.len()
            );
            self.outcome = Some(Ok(path.clone()));
            return Some(SearchStep::Found(path));
        }

        self.relax_neighbours(current);
        if current != self.start {
            self.grid.cell_mut(current).mark(Role::Closed);
        }
        Some(SearchStep::Expanded(current_point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn rejects_bad_endpoints() {
        let mut grid = CellGrid::new(3, 3);
        let p = Point::new(1, 1);
        assert!(matches!(
            Search::new(&mut grid, p, p),
            Err(SearchError::InvalidEndpoints)
        ));
        assert!(matches!(
            Search::new(&mut grid, p, Point::new(3, 0)),
            Err(SearchError::InvalidEndpoints)
        ));
        assert!(matches!(grid.search(), Err(SearchError::InvalidEndpoints)));
    }

    #[test]
    fn start_is_queued_first() {
        let mut grid = CellGrid::new(3, 3);
        let search = Search::new(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert!(search.is_running());
        assert_eq!(search.frontier_len(), 1);
        let start = search.grid().cell(Point::new(0, 0)).unwrap();
        assert_eq!(start.g_score(), 0.0);
        assert_eq!(start.f_score(), 4.0);
        assert!(start.is_queued());
    }

    /// The first step expands the start and opens its neighbours with the scores A* expects.
    #[test]
    fn first_step_opens_neighbours() {
        let mut grid = CellGrid::new(3, 3);
        grid.set_role(Point::new(0, 0), Role::Start).unwrap();
        grid.set_role(Point::new(2, 2), Role::End).unwrap();
        let mut search = grid.search().unwrap();
        assert_eq!(search.next(), Some(SearchStep::Expanded(Point::new(0, 0))));
        let grid = search.grid();
        assert_eq!(grid.role(Point::new(0, 0)), Some(Role::Start));
        for p in [Point::new(0, 1), Point::new(1, 0)] {
            let cell = grid.cell(p).unwrap();
            assert_eq!(cell.role(), Role::Open);
            assert_eq!(cell.g_score(), 1.0);
            assert_eq!(cell.f_score(), 4.0);
            assert_eq!(cell.parent(), grid.ix(Point::new(0, 0)));
            assert!(cell.is_queued());
        }
        assert_eq!(search.frontier_len(), 2);
    }

    /// Equal f-scores are expanded in the order the cells were discovered: down before right.
    #[test]
    fn ties_follow_discovery_order() {
        let mut grid = CellGrid::new(3, 3);
        let mut search = Search::new(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        search.next();
        assert_eq!(search.next(), Some(SearchStep::Expanded(Point::new(0, 1))));
    }

    #[test]
    fn steps_end_after_outcome() {
        // |S#E|
        let mut grid = CellGrid::new(1, 3);
        grid.set_role(Point::new(1, 0), Role::Barrier).unwrap();
        let mut search = Search::new(&mut grid, Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(search.next(), Some(SearchStep::Expanded(Point::new(0, 0))));
        assert_eq!(search.next(), Some(SearchStep::Exhausted));
        assert!(!search.is_running());
        assert_eq!(search.next(), None);
        assert_eq!(search.finish(), Err(SearchError::NoPathExists));
    }

    #[test]
    fn finish_after_found() {
        let mut grid = CellGrid::new(1, 2);
        let mut search = Search::new(&mut grid, Point::new(0, 0), Point::new(1, 0)).unwrap();
        assert_eq!(search.next(), Some(SearchStep::Expanded(Point::new(0, 0))));
        assert_eq!(
            search.next(),
            Some(SearchStep::Found(vec![Point::new(1, 0)]))
        );
        assert_eq!(search.finish(), Ok(vec![Point::new(1, 0)]));
    }

    /// A start on a barrier has no way out, mirroring an end on a barrier that has no way in.
    #[test]
    fn barrier_endpoints_find_nothing() {
        // |#..|
        let mut grid = CellGrid::new(1, 3);
        grid.set_role(Point::new(0, 0), Role::Barrier).unwrap();
        let mut search = Search::new(&mut grid, Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(search.frontier_len(), 0);
        assert_eq!(search.next(), Some(SearchStep::Exhausted));
        assert_eq!(search.finish(), Err(SearchError::NoPathExists));
        assert_eq!(grid.to_string(), "#..\n");

        let mut search = Search::new(&mut grid, Point::new(2, 0), Point::new(0, 0)).unwrap();
        assert_eq!(search.next(), Some(SearchStep::Expanded(Point::new(2, 0))));
        assert_eq!(search.next(), Some(SearchStep::Expanded(Point::new(1, 0))));
        assert_eq!(search.finish(), Err(SearchError::NoPathExists));
        assert_eq!(grid.role(Point::new(0, 0)), Some(Role::Barrier));
    }

    /// Searching from the placed end back to the placed start leaves both where they are.
    #[test]
    fn reverse_search_keeps_placed_roles() {
        let mut grid = CellGrid::new(3, 3);
        grid.set_role(Point::new(0, 0), Role::Start).unwrap();
        grid.set_role(Point::new(2, 2), Role::End).unwrap();
        let path = Search::new(&mut grid, Point::new(2, 2), Point::new(0, 0))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(path.last(), Some(&Point::new(0, 0)));
        assert_eq!(grid.role(Point::new(0, 0)), Some(Role::Start));
        assert_eq!(grid.role(Point::new(2, 2)), Some(Role::End));
        assert_eq!(grid.cells().filter(|c| c.role().is_endpoint()).count(), 2);
    }

    /// The end tag of a run towards unplaced points is gone once the placed endpoints are used.
    #[test]
    fn unplaced_goal_tag_does_not_linger() {
        let mut grid = CellGrid::new(3, 3);
        Search::new(&mut grid, Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(grid.role(Point::new(2, 2)), Some(Role::End));
        assert_eq!(grid.end(), None);

        grid.set_role(Point::new(1, 0), Role::End).unwrap();
        grid.set_role(Point::new(0, 1), Role::Start).unwrap();
        assert_eq!(grid.role(Point::new(2, 2)), Some(Role::Empty));
        grid.run_placed().unwrap();
        let ends = grid
            .cells()
            .filter(|c| c.role() == Role::End)
            .map(Cell::point)
            .collect::<Vec<_>>();
        assert_eq!(ends, vec![Point::new(1, 0)]);
    }

    /// Abandoning a run and starting again gives the same result as an uninterrupted run.
    #[test]
    fn abandoned_run_restarts_cleanly() {
        let mut grid = CellGrid::new(4, 4);
        grid.set_role(Point::new(1, 1), Role::Barrier).unwrap();
        grid.set_role(Point::new(2, 1), Role::Barrier).unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(3, 3);

        let mut fresh = grid.clone();
        let expected = Search::new(&mut fresh, start, end).unwrap().finish();

        let mut search = Search::new(&mut grid, start, end).unwrap();
        search.next();
        search.next();
        drop(search);
        let result = Search::new(&mut grid, start, end).unwrap().finish();
        assert_eq!(result, expected);
        assert_eq!(grid.to_string(), fresh.to_string());
    }
}
