use grid_util::point::Point;
use thiserror::Error;

use crate::cell::Role;

/// Outcomes of a search that did not produce a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end is unset or out of bounds, or both name the same cell.
    #[error("start and end must be two distinct cells on the grid")]
    InvalidEndpoints,
    /// The frontier ran dry before reaching the end.
    #[error("no path exists between start and end")]
    NoPathExists,
}

/// Rejected changes to the grid layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("{0:?} is assigned by the search and cannot be placed")]
    InvalidPlacement(Role),
    #[error("a {role:?} cell already exists at {at}")]
    EndpointTaken { role: Role, at: Point },
    #[error("maze is {width}x{height}, grid is {cols}x{rows}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        cols: usize,
        rows: usize,
    },
}
