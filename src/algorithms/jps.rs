//! Jump Point Search on a 4-connected, uniform-cost grid.
//!
//! Instead of pushing every neighbor, each expansion jumps in the four
//! cardinal directions over runs of open cells and only queues the cells
//! where something interesting happens: the end, a forced neighbor, or (for
//! vertical jumps) a row from which a horizontal jump finds one of those.
//! The queue is ordered by `g + h` like A*, with `g` counting every cell
//! jumped over, so routes have the same length as A*'s.

use crate::algorithms::common::{MinQueue, Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::{Coord, Grid, DIRECTIONS};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;

#[derive(Default)]
pub struct JumpPoint;

impl JumpPoint {
    pub fn new() -> Self {
        JumpPoint
    }
}

impl SearchAlgorithm for JumpPoint {
    fn name(&self) -> &'static str {
        "Jump Point Search"
    }

    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted> {
        let mut open = MinQueue::new();
        let mut g_costs: FxHashMap<Coord, usize> = FxHashMap::default();
        let mut visited = FxHashSet::default();
        let mut parents = Parents::default();

        open.push(Reverse((ctx.heuristic(ctx.start), ctx.start)));
        g_costs.insert(ctx.start, 0);

        while let Some(Reverse((_, current))) = open.pop() {
            ctx.check()?;
            if !visited.insert(current) {
                continue;
            }
            ctx.visit(current)?;

            if current == ctx.end {
                let jump_points = ctx.trace_path(&parents);
                return Ok(Some(interpolate(&jump_points)));
            }

            let g = g_costs[&current];
            for (jump_point, length) in successors(ctx.grid, current, ctx.end) {
                if visited.contains(&jump_point) {
                    continue;
                }
                let tentative = g + length;
                let improves = g_costs
                    .get(&jump_point)
                    .map_or(true, |&known| tentative < known);
                if improves {
                    g_costs.insert(jump_point, tentative);
                    parents.insert(jump_point, current);
                    open.push(Reverse((tentative + ctx.heuristic(jump_point), jump_point)));
                }
            }
        }
        Ok(None)
    }
}

/// Jump points reachable from `from` in each cardinal direction, with the
/// number of steps taken to get there.
fn successors(grid: &Grid, from: Coord, end: Coord) -> Vec<(Coord, usize)> {
    DIRECTIONS
        .iter()
        .filter_map(|&dir| jump(grid, from, dir, end))
        .collect()
}

fn passable(grid: &Grid, pos: Option<Coord>) -> bool {
    pos.is_some_and(|p| grid.is_passable(p))
}

/// Step from `from` along `(dr, dc)` until a jump point is found or the way
/// is blocked.
fn jump(grid: &Grid, from: Coord, (dr, dc): (isize, isize), end: Coord) -> Option<(Coord, usize)> {
    let mut prev = from;
    let mut length = 0;
    loop {
        let next = grid
            .offset(prev, dr, dc)
            .filter(|&pos| grid.is_passable(pos))?;
        length += 1;

        if next == end || has_forced_neighbor(grid, prev, next, (dr, dc)) {
            return Some((next, length));
        }
        // A vertical run stops on any row where a horizontal jump succeeds.
        if dr != 0 && [(0, -1), (0, 1)].into_iter().any(|dir| jump(grid, next, dir, end).is_some()) {
            return Some((next, length));
        }
        prev = next;
    }
}

/// A perpendicular neighbor of `at` is open while the matching neighbor of
/// the cell we came from is blocked, so the detour only becomes possible
/// here.
fn has_forced_neighbor(grid: &Grid, prev: Coord, at: Coord, (dr, _): (isize, isize)) -> bool {
    let sides = if dr != 0 {
        [(0, -1), (0, 1)]
    } else {
        [(-1, 0), (1, 0)]
    };
    sides.into_iter().any(|(sr, sc)| {
        passable(grid, grid.offset(at, sr, sc)) && !passable(grid, grid.offset(prev, sr, sc))
    })
}

/// Fill in the straight runs between consecutive jump points.
fn interpolate(jump_points: &[Coord]) -> Vec<Coord> {
    let Some(&first) = jump_points.first() else {
        return Vec::new();
    };
    let mut path = vec![first];
    for pair in jump_points.windows(2) {
        let (mut at, to) = (pair[0], pair[1]);
        while at != to {
            at = Coord::new(step_toward(at.row, to.row), step_toward(at.col, to.col));
            path.push(at);
        }
    }
    path
}

fn step_toward(from: usize, to: usize) -> usize {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => from + 1,
        std::cmp::Ordering::Greater => from - 1,
        std::cmp::Ordering::Equal => from,
    }
}
