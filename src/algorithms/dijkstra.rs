use crate::algorithms::common::{MinQueue, Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::Coord;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;

/// Dijkstra's algorithm with unit edge cost. Explores in the same rings as
/// breadth-first search, but through a priority queue keyed by distance.
#[derive(Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl SearchAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra's Algorithm"
    }

    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted> {
        let mut queue = MinQueue::new();
        let mut distances: FxHashMap<Coord, usize> = FxHashMap::default();
        let mut visited = FxHashSet::default();
        let mut parents = Parents::default();

        queue.push(Reverse((0, ctx.start)));
        distances.insert(ctx.start, 0);

        while let Some(Reverse((distance, current))) = queue.pop() {
            ctx.check()?;
            if !visited.insert(current) {
                continue;
            }
            ctx.visit(current)?;

            if current == ctx.end {
                return Ok(Some(ctx.trace_path(&parents)));
            }

            for next in ctx.open_neighbors(current) {
                let candidate = distance + 1;
                let improves = distances.get(&next).map_or(true, |&known| candidate < known);
                if improves {
                    distances.insert(next, candidate);
                    parents.insert(next, current);
                    queue.push(Reverse((candidate, next)));
                }
            }
        }
        Ok(None)
    }
}
