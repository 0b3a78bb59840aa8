use crate::algorithms::Algorithm;
use crate::config::Config;
use crate::controller::SearchController;
use crate::error::{Result, SearchError};
use crate::events::SearchEvent;
use crate::grid::{CellState, Grid, ResetScope};
use crate::scenario::{shortest_hops, Scenario};
use crate::statistics::SearchReport;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// How long the event loop waits for an event before checking whether the
/// worker is still alive.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Terminal presentation layer: owns a grid layout, drives the controller
/// and redraws the grid as events arrive.
pub struct Simulation {
    config: Config,
    grid: Arc<Grid>,
    optimal_hops: Option<usize>,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self> {
        let grid = match &config.layout {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| SearchError::LayoutFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Grid::from_ascii(&text)?
            }
            None => {
                Scenario::generate(config.rows, config.cols, config.num_obstacles, config.seed)?
                    .create_grid()
            }
        };
        if grid.find_start_and_end().is_none() {
            return Err(SearchError::MissingEndpoints);
        }
        let optimal_hops = shortest_hops(&grid);

        Ok(Simulation {
            config,
            grid: Arc::new(grid),
            optimal_hops,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shortest route length on this layout, `None` when the end is
    /// unreachable.
    pub fn optimal_hops(&self) -> Option<usize> {
        self.optimal_hops
    }

    /// Run the configured algorithm, animating it unless visualization is
    /// disabled.
    pub fn run(&mut self) -> Result<SearchReport> {
        let algorithm: Algorithm = self.config.algorithm.parse()?;
        let (tx, rx) = mpsc::channel();
        let mut controller = SearchController::new(Arc::clone(&self.grid), tx);
        if self.config.no_visualization {
            controller.set_delay(Duration::ZERO);
        } else {
            controller.set_speed(self.config.speed)?;
        }

        if !self.config.no_visualization {
            self.draw(algorithm, 0, "starting");
        }
        controller.start_search(algorithm)?;

        let mut steps = 0;
        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => {
                    steps += 1;
                    self.on_event(algorithm, steps, event);
                }
                Err(RecvTimeoutError::Timeout) if controller.is_running() => {}
                Err(_) => break,
            }
        }
        for event in rx.try_iter() {
            steps += 1;
            self.on_event(algorithm, steps, event);
        }

        controller.wait().ok_or(SearchError::MissingEndpoints)
    }

    /// Run every algorithm on the same layout, without pacing, and return
    /// their reports in [`Algorithm::ALL`] order.
    pub fn run_all_algorithms(&mut self) -> Result<Vec<SearchReport>> {
        let mut reports = Vec::with_capacity(Algorithm::ALL.len());
        for (i, algorithm) in Algorithm::ALL.into_iter().enumerate() {
            if !self.config.quiet {
                println!(
                    "Running algorithm {} of {}: {}",
                    i + 1,
                    Algorithm::ALL.len(),
                    algorithm
                );
            }
            let (tx, rx) = mpsc::channel();
            let mut controller = SearchController::new(Arc::clone(&self.grid), tx);
            controller.set_delay(Duration::ZERO);
            controller.start_search(algorithm)?;
            let report = controller.wait().ok_or(SearchError::MissingEndpoints)?;
            drain(rx);
            if !self.config.quiet {
                println!(
                    "Completed: {} - {}, checked {} cells",
                    algorithm,
                    report.result.label(),
                    report.checked
                );
            }
            reports.push(report);
        }
        self.grid.reset(ResetScope::CheckedAndPath);
        Ok(reports)
    }

    fn on_event(&self, algorithm: Algorithm, steps: usize, event: SearchEvent) {
        match event {
            SearchEvent::CellUpdated { state, .. } => {
                if !self.config.no_visualization {
                    let phase = match state {
                        CellState::Path => "tracing path",
                        _ => "exploring",
                    };
                    self.draw(algorithm, steps, phase);
                }
            }
            SearchEvent::NoPathFound => {
                println!("No path found: there is no possible path from start to end.");
            }
        }
    }

    fn draw(&self, algorithm: Algorithm, steps: usize, phase: &str) {
        clear_screen();
        println!("=== PATHFINDING VISUALIZER ===");
        println!(
            "Algorithm: {} | Step: {} | Checked: {} | {}",
            algorithm,
            steps,
            self.grid.count(CellState::Checked),
            phase
        );
        match self.optimal_hops {
            Some(hops) => println!("Shortest possible path: {}", hops),
            None => println!("Shortest possible path: unreachable"),
        }
        self.grid.print_grid();
    }
}

fn drain(rx: Receiver<SearchEvent>) {
    for _ in rx.try_iter() {}
}

/// Clear the terminal screen (only used when visualization is enabled)
fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::SearchResult;
    use clap::Parser;

    fn quiet_config(extra: &[&str]) -> Config {
        let mut args = vec!["pathfinding_visualizer", "--no-visualization", "--quiet"];
        args.extend_from_slice(extra);
        Config::parse_from(args)
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let config = quiet_config(&["--rows", "1"]);
        assert_eq!(
            Simulation::new(config).err(),
            Some(SearchError::GridTooSmall { rows: 1, cols: 30 })
        );
    }

    #[test]
    fn unknown_algorithm_is_reported_before_running() {
        let config = quiet_config(&["--algorithm", "teleport", "--seed", "1"]);
        let mut simulation = Simulation::new(config).unwrap();
        assert_eq!(
            simulation.run().err(),
            Some(SearchError::UnknownAlgorithm("teleport".into()))
        );
    }

    #[test]
    fn single_run_matches_reference_length() {
        let config = quiet_config(&["--seed", "11", "--num-obstacles", "40", "--algorithm", "bfs"]);
        let mut simulation = Simulation::new(config).unwrap();
        let report = simulation.run().unwrap();
        assert_eq!(report.hops(), simulation.optimal_hops());
        if report.result == SearchResult::NoPath {
            assert!(simulation.optimal_hops().is_none());
        }
    }

    #[test]
    fn comparison_runs_every_algorithm_and_leaves_layout_clean() {
        let config = quiet_config(&["--seed", "5", "--rows", "8", "--cols", "12", "--num-obstacles", "20"]);
        let mut simulation = Simulation::new(config).unwrap();
        let reports = simulation.run_all_algorithms().unwrap();
        assert_eq!(reports.len(), Algorithm::ALL.len());
        for report in &reports {
            assert_ne!(report.result, SearchResult::Cancelled);
            if report.algorithm.is_optimal() {
                assert_eq!(report.hops(), simulation.optimal_hops());
            }
        }
        assert_eq!(simulation.grid().count(CellState::Checked), 0);
        assert_eq!(simulation.grid().count(CellState::Path), 0);
    }
}
