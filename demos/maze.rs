use grid_astar::{CellGrid, SearchError};
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use rand::prelude::*;

// Carves a random maze with a depth-first walk, lays it onto the grid and searches from the top
// left to the bottom right corner. Pass a number as first argument to pick another maze.

const ROWS: usize = 21;
const COLS: usize = 41;

fn carve_maze(rng: &mut StdRng) -> BoolGrid {
    let mut maze = BoolGrid::new(COLS, ROWS, true);
    let mut stack = vec![Point::new(1, 1)];
    maze.set(1, 1, false);
    while let Some(&current) = stack.last() {
        let mut options = [(0, -2), (0, 2), (-2, 0), (2, 0)]
            .into_iter()
            .map(|(dx, dy)| Point::new(current.x + dx, current.y + dy))
            .filter(|p| {
                p.x > 0
                    && p.y > 0
                    && p.x < COLS as i32 - 1
                    && p.y < ROWS as i32 - 1
                    && maze.get(p.x as usize, p.y as usize)
            })
            .collect::<Vec<Point>>();
        options.shuffle(rng);
        match options.first() {
            Some(next) => {
                maze.set(((current.x + next.x) / 2) as usize, ((current.y + next.y) / 2) as usize, false);
                maze.set(next.x as usize, next.y as usize, false);
                stack.push(*next);
            }
            None => {
                stack.pop();
            }
        }
    }
    maze
}

fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut grid = CellGrid::new(ROWS, COLS);
    grid.place(Point::new(1, 1)).unwrap();
    grid.place(Point::new(COLS as i32 - 2, ROWS as i32 - 2)).unwrap();
    grid.apply_maze(&carve_maze(&mut rng)).unwrap();

    let mut search = grid.search().unwrap();
    search.by_ref().for_each(drop);
    let expanded = search.expanded_count();
    let result = search.finish();
    println!("{}", grid);
    match result {
        Ok(path) => println!("Path of {} steps, {} cells expanded", path.len(), expanded),
        Err(SearchError::NoPathExists) => println!("No path, {} cells expanded", expanded),
        Err(e) => println!("{}", e),
    }
}
