//! The progress event stream between a search worker and the presentation
//! layer.

use crate::grid::{CellState, Coord, Grid};
use crate::pacing::{CancelToken, Pacing};
use std::cell::Cell;
use std::sync::mpsc::Sender;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell changed to `Checked` or `Path`.
    CellUpdated { coord: Coord, state: CellState },
    /// The search exhausted its frontier without reaching the end.
    NoPathFound,
}

/// Returned by emission when the run has to stop: the cancel token was set or
/// nobody is listening anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Writes a cell's new state into the grid, forwards the update on the event
/// channel and paces the run. One emitter per worker; never shared.
pub struct Emitter<'a> {
    grid: &'a Grid,
    events: &'a Sender<SearchEvent>,
    cancel: &'a CancelToken,
    pacing: &'a Pacing,
    checked: Cell<usize>,
}

impl<'a> Emitter<'a> {
    pub fn new(
        grid: &'a Grid,
        events: &'a Sender<SearchEvent>,
        cancel: &'a CancelToken,
        pacing: &'a Pacing,
    ) -> Self {
        Emitter {
            grid,
            events,
            cancel,
            pacing,
            checked: Cell::new(0),
        }
    }

    /// Fails once cancellation has been requested.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.cancel.is_cancelled() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }

    pub fn checked(&self, coord: Coord) -> Result<(), Interrupted> {
        self.update(coord, CellState::Checked)?;
        self.checked.set(self.checked.get() + 1);
        Ok(())
    }

    pub fn path(&self, coord: Coord) -> Result<(), Interrupted> {
        self.update(coord, CellState::Path)
    }

    fn update(&self, coord: Coord, state: CellState) -> Result<(), Interrupted> {
        self.check()?;
        self.grid.store(coord, state);
        trace!(row = coord.row, col = coord.col, ?state, "cell updated");
        if self.events.send(SearchEvent::CellUpdated { coord, state }).is_err() {
            warn!("event receiver dropped, stopping search");
            return Err(Interrupted);
        }
        self.pacing.pause();
        Ok(())
    }

    pub fn no_path(&self) {
        if self.events.send(SearchEvent::NoPathFound).is_err() {
            warn!("event receiver dropped before no-path signal");
        }
    }

    /// How many cells this run has marked `Checked`.
    pub fn checked_count(&self) -> usize {
        self.checked.get()
    }
}
