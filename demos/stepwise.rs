use grid_astar::{CellGrid, SearchStep};
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;

// Drives the search one step at a time and prints the grid every few steps, the way a renderer
// would redraw between frames. Cells are drawn as
// - S/E for the start and end, # for barriers
// - o for open cells waiting in the frontier, x for closed cells
// - * for the final path

const FRAME_EVERY: usize = 10;

fn main() {
    env_logger::init();
    let mut walls = BoolGrid::new(12, 8, false);
    for y in 0..6 {
        walls.set(4, y, true);
    }
    for y in 2..8 {
        walls.set(8, y, true);
    }

    let mut grid = CellGrid::new(8, 12);
    grid.place(Point::new(1, 6)).unwrap();
    grid.place(Point::new(10, 1)).unwrap();
    grid.apply_maze(&walls).unwrap();

    let mut search = grid.search().unwrap();
    let mut frame = 0;
    while let Some(step) = search.next() {
        match step {
            SearchStep::Expanded(_) => {
                frame += 1;
                if frame % FRAME_EVERY == 0 {
                    println!(
                        "Step {} ({} queued):\n{}",
                        frame,
                        search.frontier_len(),
                        search.grid()
                    );
                }
            }
            SearchStep::Found(path) => {
                println!("Found a path of {} steps:\n{}", path.len(), search.grid());
            }
            SearchStep::Exhausted => {
                println!("No path:\n{}", search.grid());
            }
        }
    }
}
