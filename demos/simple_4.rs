use grid_astar::{CellGrid, Role};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    env_logger::init();
    let mut grid = CellGrid::new(3, 3);
    grid.set_role(Point::new(0, 0), Role::Start).unwrap();
    grid.set_role(Point::new(2, 2), Role::End).unwrap();
    grid.set_role(Point::new(1, 1), Role::Barrier).unwrap();
    println!("{}", grid);
    let path = grid.run_placed().unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
    println!("\n{}", grid);
}
