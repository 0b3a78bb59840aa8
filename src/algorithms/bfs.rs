use crate::algorithms::common::{Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::Coord;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Breadth-first search over a FIFO queue. The first time the end is reached
/// it is reached by a shortest route in hop count.
#[derive(Default)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl SearchAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "Breadth-First Search"
    }

    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted> {
        let mut queue = VecDeque::from([ctx.start]);
        let mut visited = FxHashSet::default();
        let mut parents = Parents::default();

        while let Some(current) = queue.pop_front() {
            ctx.check()?;
            if !visited.insert(current) {
                continue;
            }
            ctx.visit(current)?;

            if current == ctx.end {
                return Ok(Some(ctx.trace_path(&parents)));
            }

            for next in ctx.open_neighbors(current) {
                // Keep the first parent only; later discoverers are never closer.
                if !visited.contains(&next) && !parents.contains_key(&next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        Ok(None)
    }
}
