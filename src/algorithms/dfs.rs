use crate::algorithms::common::{Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::Coord;
use rustc_hash::FxHashSet;

/// Depth-first search over a LIFO stack. Finds some route, usually a long one.
#[derive(Default)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst
    }
}

impl SearchAlgorithm for DepthFirst {
    fn name(&self) -> &'static str {
        "Depth-First Search"
    }

    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted> {
        let mut stack = vec![ctx.start];
        let mut visited = FxHashSet::default();
        let mut parents = Parents::default();

        while let Some(current) = stack.pop() {
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
                    // The last push wins, matching the entry that pops first.
                    parents.insert(next, current);
                    stack.push(next);
                }
            }
        }
        Ok(None)
    }
}
