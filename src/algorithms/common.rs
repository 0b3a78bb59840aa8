use crate::events::{Emitter, Interrupted};
use crate::grid::{Coord, Grid};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// How a single run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// The end was reached. Holds every cell from start to end inclusive.
    PathFound(Vec<Coord>),
    /// The frontier ran dry without reaching the end.
    NoPath,
    /// Stopped before finishing; nothing further was emitted.
    Cancelled,
}

impl SearchResult {
    /// Number of moves on the found path, if any.
    pub fn hops(&self) -> Option<usize> {
        match self {
            SearchResult::PathFound(path) => Some(path.len().saturating_sub(1)),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchResult::PathFound(_) => "path found",
            SearchResult::NoPath => "no path",
            SearchResult::Cancelled => "cancelled",
        }
    }
}

/// Everything one run needs: read access to the grid, the endpoints and the
/// emitter that paces and publishes progress.
pub struct SearchContext<'a> {
    pub grid: &'a Grid,
    pub start: Coord,
    pub end: Coord,
    pub emitter: &'a Emitter<'a>,
}

/// Parent links recorded while exploring, `child -> predecessor`.
/// The start cell has no entry.
pub type Parents = FxHashMap<Coord, Coord>;

/// Min-heap keyed by priority, ties broken by `(row, col)`.
pub type MinQueue = BinaryHeap<Reverse<(usize, Coord)>>;

impl SearchContext<'_> {
    /// Cancellation check done once per frontier pop.
    pub fn check(&self) -> Result<(), Interrupted> {
        self.emitter.check()
    }

    pub fn is_endpoint(&self, pos: Coord) -> bool {
        pos == self.start || pos == self.end
    }

    /// First visit of a cell: endpoints stay untouched, anything else is
    /// marked `Checked`.
    pub fn visit(&self, pos: Coord) -> Result<(), Interrupted> {
        if self.is_endpoint(pos) {
            Ok(())
        } else {
            self.emitter.checked(pos)
        }
    }

    /// Neighbors a search may step onto: `Empty` or `End`.
    pub fn open_neighbors(&self, pos: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.grid.neighbors(pos).filter(|&n| self.grid.is_open(n))
    }

    /// Manhattan distance to the end.
    pub fn heuristic(&self, pos: Coord) -> usize {
        pos.manhattan(self.end)
    }

    /// Walk the parent links back from the end and return the route in
    /// start-to-end order.
    pub fn trace_path(&self, parents: &Parents) -> Vec<Coord> {
        walk_back(parents, self.end, self.start)
    }

    /// Mark every intermediate cell of `path` as `Path`, start to end.
    pub fn emit_path(&self, path: &[Coord]) -> Result<(), Interrupted> {
        for &pos in path {
            if !self.is_endpoint(pos) {
                self.emitter.path(pos)?;
            }
        }
        Ok(())
    }
}

/// Follow `parents` from `from` until `to`, returning `to..=from`.
pub(crate) fn walk_back(parents: &Parents, from: Coord, to: Coord) -> Vec<Coord> {
    let mut path = vec![from];
    let mut current = from;
    while current != to {
        match parents.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Shared contract of every search strategy.
///
/// Implementors only describe how to explore; the provided [`run`] turns the
/// route they return into `Path` emissions and maps interruption to
/// [`SearchResult::Cancelled`]. All frontier, visited and parent state lives
/// inside a single `explore` call.
///
/// [`run`]: SearchAlgorithm::run
pub trait SearchAlgorithm: Send {
    fn name(&self) -> &'static str;

    /// Explore until the end is reached. Returns the full route from start
    /// to end, `None` when the frontier empties first.
    fn explore(&mut self, ctx: &SearchContext<'_>) -> Result<Option<Vec<Coord>>, Interrupted>;

    fn run(&mut self, ctx: &SearchContext<'_>) -> SearchResult {
        let outcome = self.explore(ctx).and_then(|found| match found {
            Some(path) => ctx.emit_path(&path).map(|()| SearchResult::PathFound(path)),
            None => Ok(SearchResult::NoPath),
        });
        outcome.unwrap_or(SearchResult::Cancelled)
    }
}
