use crate::algorithms::common::{MinQueue, Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::Coord;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;

/// Greedy best-first search: always expands whichever frontier cell looks
/// closest to the end, ignoring the cost already paid.
///
/// Not optimal. A cell may sit in the queue several times (once per
/// expanded neighbor that saw it) and its parent is whichever of those came
/// last; the duplicates are skipped on pop.
#[derive(Default)]
pub struct GreedyBestFirst;

impl GreedyBestFirst {
    pub fn new() -> Self {
        GreedyBestFirst
    }
}

impl SearchAlgorithm for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "Greedy Best-First Search"
    }

    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted> {
        let mut open = MinQueue::new();
        let mut visited = FxHashSet::default();
        let mut parents = Parents::default();

        open.push(Reverse((0, ctx.start)));

        while let Some(Reverse((_, current))) = open.pop() {
            ctx.check()?;
            if !visited.insert(current) {
                continue;
            }
            ctx.visit(current)?;

            if current == ctx.end {
                return Ok(Some(ctx.trace_path(&parents)));
            }

            for next in ctx.open_neighbors(current) {
                if !visited.contains(&next) {
                    parents.insert(next, current);
                    open.push(Reverse((ctx.heuristic(next), next)));
                }
            }
        }
        Ok(None)
    }
}
