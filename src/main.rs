use clap::Parser;

use pathfinding_visualizer::config::Config;
use pathfinding_visualizer::simulation::Simulation;
use pathfinding_visualizer::statistics::Comparison;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    println!("Starting pathfinding visualizer...");
    match &config.layout {
        Some(path) => println!("Layout: {}", path.display()),
        None => println!(
            "Grid size: {}x{}, Obstacles: {}",
            config.rows, config.cols, config.num_obstacles
        ),
    }
    println!("Algorithm: {}", config.algorithm);

    if config.no_visualization || config.runs_all() {
        println!("Visualization disabled - running in fast mode");
    } else {
        println!("Visualization enabled at {} steps per second", config.speed);
        println!("Press Ctrl+C to stop the search");
    }
    println!();

    let mut simulation = match Simulation::new(config.clone()) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Failed to set up the grid: {}", e);
            std::process::exit(1);
        }
    };

    if config.runs_all() {
        match simulation.run_all_algorithms() {
            Ok(reports) => {
                let table = Comparison {
                    reports: &reports,
                    optimal_hops: simulation.optimal_hops(),
                };
                println!("\n{}", table);
            }
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match simulation.run() {
            Ok(report) => {
                println!("\n=== FINAL RESULTS ===");
                print!("{}", report);
                if let Some(efficiency) = simulation
                    .optimal_hops()
                    .and_then(|optimal| report.route_efficiency(optimal))
                {
                    println!("Route efficiency: {:.3}", efficiency);
                }
            }
            Err(e) => {
                eprintln!("Search failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
