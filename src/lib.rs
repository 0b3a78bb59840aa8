//! Step-by-step grid pathfinding searches that can be watched while they run.
//!
//! A [`SearchController`] runs one [`Algorithm`] at a time on a worker thread.
//! The worker marks cells on a shared [`Grid`] and reports every change as a
//! [`SearchEvent`] over an `mpsc` channel, pausing between steps so a
//! presentation layer can animate the exploration.

pub mod algorithms;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod grid;
pub mod pacing;
pub mod scenario;
pub mod simulation;
pub mod statistics;

pub use algorithms::{Algorithm, SearchAlgorithm, SearchResult};
pub use controller::{ControllerState, SearchController};
pub use error::{Result, SearchError};
pub use events::SearchEvent;
pub use grid::{CellState, Coord, Grid, Paint, ResetScope};
pub use scenario::{shortest_hops, Scenario};
pub use statistics::SearchReport;
