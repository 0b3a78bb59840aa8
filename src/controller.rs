//! Runs one search at a time on a background thread.

use crate::algorithms::{Algorithm, SearchContext, SearchResult};
use crate::error::{Result, SearchError};
use crate::events::{Emitter, SearchEvent};
use crate::grid::{Grid, ResetScope};
use crate::pacing::{CancelToken, Pacing};
use crate::statistics::SearchReport;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ControllerState {
    Idle = 0,
    Running = 1,
    Completed = 2,
    Cancelled = 3,
}

impl ControllerState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ControllerState::Running,
            2 => ControllerState::Completed,
            3 => ControllerState::Cancelled,
            _ => ControllerState::Idle,
        }
    }
}

struct Worker {
    algorithm: Algorithm,
    handle: JoinHandle<SearchReport>,
}

/// Owns the shared grid, the event sender and at most one live search worker.
///
/// `start_search` refuses to launch while a worker is alive and
/// `stop_search` joins the worker before returning, so two searches never
/// touch the grid at once and nothing is emitted after a stop.
pub struct SearchController {
    grid: Arc<Grid>,
    events: Sender<SearchEvent>,
    cancel: CancelToken,
    pacing: Arc<Pacing>,
    phase: Arc<AtomicU8>,
    worker: Option<Worker>,
    last_report: Option<SearchReport>,
}

impl SearchController {
    pub fn new(grid: Arc<Grid>, events: Sender<SearchEvent>) -> Self {
        SearchController {
            grid,
            events,
            cancel: CancelToken::new(),
            pacing: Arc::new(Pacing::default()),
            phase: Arc::new(AtomicU8::new(ControllerState::Idle as u8)),
            worker: None,
            last_report: None,
        }
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// Launch `algorithm` on a background thread.
    ///
    /// Clears the `Checked`/`Path` cells left by a previous run first.
    /// Fails without side effects if a search is alive or the grid lacks a
    /// start or end cell.
    pub fn start_search(&mut self, algorithm: Algorithm) -> Result<()> {
        if self.is_running() {
            return Err(SearchError::AlreadyRunning);
        }
        self.reap();

        let (start, end) = self
            .grid
            .find_start_and_end()
            .ok_or(SearchError::MissingEndpoints)?;

        self.grid.reset(ResetScope::CheckedAndPath);
        self.cancel.clear();
        self.phase.store(ControllerState::Running as u8, Ordering::SeqCst);
        debug!(%algorithm, %start, %end, delay = ?self.pacing.delay(), "starting search");

        let grid = Arc::clone(&self.grid);
        let events = self.events.clone();
        let cancel = self.cancel.clone();
        let pacing = Arc::clone(&self.pacing);
        let phase = Arc::clone(&self.phase);

        let handle = thread::spawn(move || {
            let started = Instant::now();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let emitter = Emitter::new(&grid, &events, &cancel, &pacing);
                let ctx = SearchContext {
                    grid: &grid,
                    start,
                    end,
                    emitter: &emitter,
                };
                let result = match algorithm.instantiate().run(&ctx) {
                    // A stop that lands after the frontier ran dry still wins.
                    SearchResult::NoPath if emitter.check().is_err() => SearchResult::Cancelled,
                    SearchResult::NoPath => {
                        emitter.no_path();
                        SearchResult::NoPath
                    }
                    other => other,
                };
                (result, emitter.checked_count())
            }));

            let (result, checked) = outcome.unwrap_or_else(|_| {
                error!(%algorithm, "search worker panicked; treating the run as cancelled");
                (SearchResult::Cancelled, 0)
            });
            let terminal = if result == SearchResult::Cancelled {
                ControllerState::Cancelled
            } else {
                ControllerState::Completed
            };
            phase.store(terminal as u8, Ordering::SeqCst);

            let report = SearchReport {
                algorithm,
                result,
                checked,
                elapsed: started.elapsed(),
            };
            info!(
                %algorithm,
                outcome = report.result.label(),
                checked = report.checked,
                hops = ?report.hops(),
                "search finished"
            );
            report
        });

        self.worker = Some(Worker { algorithm, handle });
        Ok(())
    }

    /// Request cancellation and block until the worker has exited.
    ///
    /// A no-op returning `None` when nothing was started. Otherwise returns
    /// the worker's report, which may be a completed run if it finished
    /// before noticing the request.
    pub fn stop_search(&mut self) -> Option<SearchReport> {
        let worker = self.worker.take()?;
        self.cancel.cancel();
        debug!(algorithm = %worker.algorithm, "stop requested");
        Some(self.join(worker))
    }

    /// Block until the current search finishes on its own.
    pub fn wait(&mut self) -> Option<SearchReport> {
        let worker = self.worker.take()?;
        Some(self.join(worker))
    }

    fn join(&mut self, worker: Worker) -> SearchReport {
        let report = worker.handle.join().unwrap_or_else(|_| {
            error!(algorithm = %worker.algorithm, "search worker could not be joined");
            self.phase
                .store(ControllerState::Cancelled as u8, Ordering::SeqCst);
            SearchReport {
                algorithm: worker.algorithm,
                result: SearchResult::Cancelled,
                checked: 0,
                elapsed: Duration::ZERO,
            }
        });
        self.last_report = Some(report.clone());
        report
    }

    /// Join a worker that already exited so a new one can start.
    fn reap(&mut self) {
        if self.worker.is_some() {
            let _ = self.wait();
        }
        self.phase.store(ControllerState::Idle as u8, Ordering::SeqCst);
    }

    /// Takes effect on the next emission; a pause already under way is not
    /// shortened.
    pub fn set_speed(&self, speed: f64) -> Result<()> {
        self.pacing.set_speed(speed)
    }

    pub fn set_delay(&self, delay: Duration) {
        self.pacing.set_delay(delay);
    }

    pub fn delay(&self) -> Duration {
        self.pacing.delay()
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    pub fn state(&self) -> ControllerState {
        if self.is_running() {
            ControllerState::Running
        } else {
            ControllerState::from_u8(self.phase.load(Ordering::SeqCst))
        }
    }

    /// Report of the most recently joined search.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.stop_search();
    }
}
