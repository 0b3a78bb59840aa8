use crate::algorithms::common::{MinQueue, Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::Coord;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;

/// A* search ordered by `g + h`, with `h` the Manhattan distance to the end.
/// The heuristic is admissible on a 4-connected unit-cost grid, so the
/// returned route is a shortest one.
#[derive(Default)]
pub struct AStar;

impl AStar {
    /// Creates a new instance of the A* strategy.
    pub fn new() -> Self {
        AStar
    }
}

impl SearchAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "A* Search"
    }

    /// # Returns
    ///
    /// The route from start to end, or `None` once every reachable cell has
    /// been expanded.
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
                return Ok(Some(ctx.trace_path(&parents)));
            }

            let g = g_costs[&current];
            for next in ctx.open_neighbors(current) {
                let tentative = g + 1; // uniform cost
                let improves = g_costs.get(&next).map_or(true, |&known| tentative < known);
                if improves {
                    g_costs.insert(next, tentative);
                    parents.insert(next, current);
                    open.push(Reverse((tentative + ctx.heuristic(next), next)));
                }
            }
        }
        Ok(None)
    }
}
