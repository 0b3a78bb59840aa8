use crate::algorithms::common::{walk_back, Parents, SearchAlgorithm, SearchContext};
use crate::events::Interrupted;
use crate::grid::Coord;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Two breadth-first frontiers, one grown from the start and one from the
/// end, advanced one expansion each in turn. The search stops the moment one
/// side discovers a cell the other side has already seen, and the route is
/// spliced at that meeting cell.
///
/// Terminates whenever a route exists, but the meeting cell is simply the
/// first one found, so the route is not guaranteed to be a shortest one.
#[derive(Default)]
pub struct Bidirectional;

impl Bidirectional {
    pub fn new() -> Self {
        Bidirectional
    }
}

struct Frontier {
    queue: VecDeque<Coord>,
    seen: FxHashSet<Coord>,
    parents: Parents,
}

impl Frontier {
    fn rooted_at(root: Coord) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(root);
        Frontier {
            queue: VecDeque::from([root]),
            seen,
            parents: Parents::default(),
        }
    }

    /// Expand one cell. Returns the meeting cell if a newly discovered
    /// neighbor was already seen by `other`.
    fn step(
        &mut self,
        other: &Frontier,
        ctx: &SearchContext<'_>,
    ) -> Result<Option<Coord>, Interrupted> {
        let Some(current) = self.queue.pop_front() else {
            return Ok(None);
        };
        // Cells the other side marked `Checked` are still walkable here.
        for next in ctx.grid.neighbors(current) {
            if self.seen.contains(&next) || !ctx.grid.is_passable(next) {
                continue;
            }
            self.parents.insert(next, current);
            self.seen.insert(next);
            self.queue.push_back(next);
            if other.seen.contains(&next) {
                return Ok(Some(next));
            }
            ctx.visit(next)?;
        }
        Ok(None)
    }
}

impl SearchAlgorithm for Bidirectional {
    fn name(&self) -> &'static str {
        "Bidirectional Search"
    }

    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted> {
        let mut forward = Frontier::rooted_at(ctx.start);
        let mut backward = Frontier::rooted_at(ctx.end);

        while !forward.queue.is_empty() && !backward.queue.is_empty() {
            ctx.check()?;
            let meeting = match forward.step(&backward, ctx)? {
                Some(cell) => Some(cell),
                None => backward.step(&forward, ctx)?,
            };
            if let Some(meeting) = meeting {
                return Ok(Some(splice(&forward, &backward, meeting, ctx)));
            }
        }
        Ok(None)
    }
}

/// start..=meeting from the forward links, then meeting..=end from the
/// backward links without repeating the meeting cell.
fn splice(
    forward: &Frontier,
    backward: &Frontier,
    meeting: Coord,
    ctx: &SearchContext<'_>,
) -> Vec<Coord> {
    let mut path = walk_back(&forward.parents, meeting, ctx.start);
    let mut tail = walk_back(&backward.parents, meeting, ctx.end);
    tail.reverse();
    path.extend(tail.into_iter().skip(1));
    path
}
