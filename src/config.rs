use clap::Parser;
use std::path::PathBuf;

/// Terminal visualizer for grid pathfinding algorithms.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 15)]
    pub rows: usize,

    #[arg(long, default_value_t = 30)]
    pub cols: usize,

    #[arg(long, default_value_t = 90)]
    pub num_obstacles: usize,

    /// bfs, dfs, dijkstra, a_star, greedy, jps, bidirectional, or all
    #[arg(long, default_value = "a_star")]
    pub algorithm: String,

    /// Steps per second; each checked or path cell waits 1/speed seconds
    #[arg(long, default_value_t = 20.0)]
    pub speed: f64,

    /// Seed for the random layout, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Read the layout from a text file (`.` empty, `#` obstacle, `S`, `E`)
    /// instead of generating one
    #[arg(long)]
    pub layout: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn runs_all(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("all")
    }
}
