use grid_util::point::Point;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two points.
/// Admissible and consistent on a 4-connected uniform-cost grid, which A* needs to stay optimal.
pub fn heuristic(a: &Point, b: &Point) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

/// Euclidean distance between two points. Evaluates to exactly 1.0 for every pair of
/// 4-connected neighbours.
pub fn step_cost(a: &Point, b: &Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Total cost of following a path point by point.
pub fn path_cost(path: &[Point]) -> f64 {
    path.windows(2).map(|w| step_cost(&w[0], &w[1])).sum()
}
