use crate::error::{Result, SearchError};
use crate::grid::{CellState, Coord, Grid};
use pathfinding::prelude::bfs;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::debug;

/// A reproducible grid layout: endpoints plus obstacle cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub rows: usize,
    pub cols: usize,
    pub start: Coord,
    pub end: Coord,
    pub obstacles: FxHashSet<Coord>,
}

impl Scenario {
    /// Random layout with the start in the top-left quadrant and the end in
    /// the bottom-right one. The same seed always yields the same layout.
    ///
    /// Both dimensions must be at least 2 so the quadrants are distinct.
    pub fn generate(
        rows: usize,
        cols: usize,
        num_obstacles: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(SearchError::GridTooSmall { rows, cols });
        }

        // Use seed for reproducible results
        let mut rng = match seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let start = Coord::new(rng.gen_range(0..rows / 2), rng.gen_range(0..cols / 2));
        let end = Coord::new(rng.gen_range(rows / 2..rows), rng.gen_range(cols / 2..cols));

        let mut obstacles = FxHashSet::default();
        let capacity = rows * cols - 2;
        let mut attempts = 0;
        while obstacles.len() < num_obstacles.min(capacity) && attempts < num_obstacles * 3 {
            let pos = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            if pos != start && pos != end {
                obstacles.insert(pos);
            }
            attempts += 1;
        }

        debug!(
            rows,
            cols,
            %start,
            %end,
            obstacles = obstacles.len(),
            "generated scenario"
        );

        Ok(Scenario {
            rows,
            cols,
            start,
            end,
            obstacles,
        })
    }

    /// Capture the endpoints and obstacles of an existing grid.
    pub fn from_grid(grid: &Grid) -> Option<Self> {
        let (start, end) = grid.find_start_and_end()?;
        let obstacles = (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| Coord::new(row, col)))
            .filter(|&pos| grid.state(pos) == CellState::Obstacle)
            .collect();
        Some(Scenario {
            rows: grid.rows(),
            cols: grid.cols(),
            start,
            end,
            obstacles,
        })
    }

    pub fn create_grid(&self) -> Grid {
        let grid = Grid::new(self.rows, self.cols);
        for &pos in &self.obstacles {
            grid.store(pos, CellState::Obstacle);
        }
        grid.store(self.start, CellState::Start);
        grid.store(self.end, CellState::End);
        grid
    }
}

/// Length in moves of a shortest route between the grid's endpoints,
/// computed independently of the visual searches.
pub fn shortest_hops(grid: &Grid) -> Option<usize> {
    let (start, end) = grid.find_start_and_end()?;
    let path = bfs(
        &start,
        |&pos| {
            grid.neighbors(pos)
                .filter(|&next| grid.is_passable(next))
                .collect::<Vec<_>>()
        },
        |&pos| pos == end,
    )?;
    Some(path.len() - 1)
}
