use crate::algorithms::{AStar, Dfo, Heuristic, PathfindingAlgorithm};
use crate::config::{AlgorithmKind, Config};
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use pathfinding::prelude::bfs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub name: String,
    pub success: bool,
    pub path: Option<Vec<Position>>,
    pub stats: SearchStats,
    pub elapsed: Duration,
    /// Minimum 8-connected step count, if the goal is reachable at all.
    pub optimal_path_length: Option<usize>,
}

impl AlgorithmResult {
    /// Steps on the returned route.
    pub fn path_length(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// One grid with fixed endpoints that engines are run against.
pub struct Simulation {
    grid: Grid,
    start: Position,
    goal: Position,
    optimal_path_length: Option<usize>,
}

impl Simulation {
    pub fn new(grid: Grid, start: Position, goal: Position) -> Self {
        let optimal_path_length = Self::calculate_optimal_path_with_bfs(&grid, start, goal);
        Simulation {
            grid,
            start,
            goal,
            optimal_path_length,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn optimal_path_length(&self) -> Option<usize> {
        self.optimal_path_length
    }

    /// Runs one engine and times its `find_path` call.
    pub fn run(&self, algorithm: &mut dyn PathfindingAlgorithm) -> AlgorithmResult {
        let started = Instant::now();
        let path = algorithm.find_path(&self.grid, self.start, self.goal);
        let elapsed = started.elapsed();

        info!(
            "{} finished in {:.2?}: {}",
            algorithm.name(),
            elapsed,
            if path.is_some() { "route found" } else { "no route" }
        );

        AlgorithmResult {
            name: algorithm.name().to_string(),
            success: path.is_some(),
            path,
            stats: algorithm.stats(),
            elapsed,
            optimal_path_length: self.optimal_path_length,
        }
    }

    /// Builds the engines selected by `config` and runs each on this grid.
    pub fn run_algorithms(&self, config: &Config) -> Result<Vec<AlgorithmResult>> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut algorithms: Vec<Box<dyn PathfindingAlgorithm>> = Vec::new();

        if matches!(config.algorithm, AlgorithmKind::AStar | AlgorithmKind::All) {
            algorithms.push(Box::new(AStar::with_heuristic(Heuristic::from(
                config.heuristic,
            ))));
        }
        if matches!(config.algorithm, AlgorithmKind::Dfo | AlgorithmKind::All) {
            info!("Swarm seed: {} (for reproducibility)", seed);
            algorithms.push(Box::new(Dfo::new(
                config.dfo_config(),
                StdRng::seed_from_u64(seed),
            )?));
        }

        Ok(algorithms
            .iter_mut()
            .map(|algorithm| self.run(algorithm.as_mut()))
            .collect())
    }

    /// Print comparison results in a table
    pub fn print_comparison_results(results: &[AlgorithmResult]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===");
        println!();
        println!(
            "{:<10} {:<8} {:<8} {:<8} {:<14}",
            "Algorithm", "Success", "Steps", "Optimal", "Time"
        );
        println!("{}", "-".repeat(52));

        for result in results {
            let success_str = if result.success { "✓" } else { "✗" };
            let steps_str = result
                .path_length()
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            let optimal_str = result
                .optimal_path_length
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            println!(
                "{:<10} {:<8} {:<8} {:<8} {:<14}",
                result.name,
                success_str,
                steps_str,
                optimal_str,
                format!("{:.2?}", result.elapsed)
            );
        }
        println!();
    }

    /// Reference step count from a plain breadth-first search over the same move model.
    fn calculate_optimal_path_with_bfs(
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Option<usize> {
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            return None;
        }
        bfs(&start, |p| grid.neighbors(*p).collect::<Vec<_>>(), |p| *p == goal)
            .map(|path| path.len() - 1)
    }
}
