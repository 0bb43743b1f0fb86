use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{run_search, CellGrid, Role};
use grid_util::point::Point;
use rand::prelude::*;
use std::hint::black_box;

fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> CellGrid {
    let mut grid = CellGrid::new(n, n);
    for y in 0..n as i32 {
        for x in 0..n as i32 {
            if rng.gen_bool(density) {
                grid.set_role(Point::new(x, y), Role::Barrier).unwrap();
            }
        }
    }
    grid.clear(Point::new(0, 0)).unwrap();
    grid.clear(Point::new(n as i32 - 1, n as i32 - 1)).unwrap();
    grid.update();
    grid
}

fn random_grid_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for (n, density) in [(64, 0.0), (64, 0.25), (128, 0.25)] {
        let mut grid = random_grid(n, density, &mut rng);
        let start = Point::new(0, 0);
        let end = Point::new(n as i32 - 1, n as i32 - 1);
        c.bench_function(format!("{n}x{n}, {density} barriers").as_str(), |b| {
            b.iter(|| black_box(run_search(&mut grid, start, end)))
        });
    }
}

criterion_group!(benches, random_grid_bench);
criterion_main!(benches);
