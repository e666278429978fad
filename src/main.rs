use clap::Parser;

use grid_search::config::{AlgorithmKind, Config};
use grid_search::simulation::Simulation;
use grid_search::{Grid, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_grid(config: &Config) -> Result<Grid> {
    if let Some(path) = &config.grid_file {
        return std::fs::read_to_string(path)?.parse();
    }
    Ok(match config.grid_size {
        Some(size) => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Grid::random(size, size, config.num_walls, &[config.start, config.goal], &mut rng)
        }
        None => Grid::demo(),
    })
}

fn run(config: Config) -> Result<()> {
    let grid = build_grid(&config)?;

    println!("Starting grid search...");
    println!(
        "Grid: {}x{}, Blocked cells: {}",
        grid.height(),
        grid.width(),
        grid.blocked_count()
    );
    println!("Start: {}, Goal: {}", config.start, config.goal);
    println!("Algorithm: {}", config.algorithm);
    println!();

    let simulation = Simulation::new(grid, config.start, config.goal);
    let results = simulation.run_algorithms(&config)?;

    if config.algorithm == AlgorithmKind::All {
        Simulation::print_comparison_results(&results);
        return Ok(());
    }

    for result in &results {
        println!("=== FINAL RESULTS ===");
        match &result.path {
            Some(path) => {
                println!("Path from start to end: {:?}", path);
                if !config.quiet {
                    println!();
                    print!("{}", simulation.grid().render(path));
                }
            }
            None => println!("No path found by {}", result.name),
        }
        println!();
        println!("{}", result.stats);
        println!("Time of execution: {:.2?}", result.elapsed);
        if let Some(optimal) = result.optimal_path_length {
            println!("Optimal step count: {}", optimal);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("grid_search=info")),
        )
        .init();

    let config = Config::parse();
    if let Err(e) = run(config) {
        eprintln!("Grid search failed: {}", e);
        std::process::exit(1);
    }
}
