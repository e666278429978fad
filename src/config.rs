use crate::algorithms::{DfoConfig, Heuristic};
use crate::grid::Position;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    AStar,
    Dfo,
    /// Run every engine on the same grid and compare.
    All,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmKind::AStar => "a_star",
            AlgorithmKind::Dfo => "dfo",
            AlgorithmKind::All => "all",
        };
        f.write_str(name)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicArg {
    SquaredEuclidean,
    Chebyshev,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::SquaredEuclidean => Heuristic::SquaredEuclidean,
            HeuristicArg::Chebyshev => Heuristic::Chebyshev,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, value_enum, default_value_t = AlgorithmKind::AStar)]
    pub algorithm: AlgorithmKind,

    #[arg(long, value_enum, default_value_t = HeuristicArg::SquaredEuclidean)]
    pub heuristic: HeuristicArg,

    /// Text grid, one row per line: `.` free, `#` blocked.
    #[arg(long, conflicts_with = "grid_size")]
    pub grid_file: Option<PathBuf>,

    /// Generate a random square grid of this size instead of the demo map.
    #[arg(long)]
    pub grid_size: Option<usize>,

    #[arg(long, default_value_t = 20)]
    pub num_walls: usize,

    #[arg(long, default_value = "0,0")]
    pub start: Position,

    #[arg(long, default_value = "7,6")]
    pub goal: Position,

    /// Seed for random grids and the swarm. Drawn from entropy if omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 5)]
    pub population_size: usize,

    #[arg(long, default_value_t = 0.001)]
    pub disturbance_threshold: f64,

    #[arg(long, default_value_t = 100)]
    pub max_iterations: usize,

    #[arg(long, default_value_t = 10)]
    pub retry_limit: usize,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn dfo_config(&self) -> DfoConfig {
        DfoConfig {
            population_size: self.population_size,
            disturbance_threshold: self.disturbance_threshold,
            max_iterations: self.max_iterations,
            retry_limit: self.retry_limit,
            ..DfoConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = Config::parse_from(["grid_search"]);
        assert_eq!(config.algorithm, AlgorithmKind::AStar);
        assert_eq!(config.start, Position::new(0, 0));
        assert_eq!(config.goal, Position::new(7, 6));
        assert_eq!(config.dfo_config(), DfoConfig::default());
    }

    #[test]
    fn test_parses_engine_options() {
        let config = Config::parse_from([
            "grid_search",
            "--algorithm",
            "dfo",
            "--heuristic",
            "chebyshev",
            "--goal",
            "3,4",
            "--population-size",
            "8",
            "--seed",
            "42",
        ]);
        assert_eq!(config.algorithm, AlgorithmKind::Dfo);
        assert_eq!(Heuristic::from(config.heuristic), Heuristic::Chebyshev);
        assert_eq!(config.goal, Position::new(3, 4));
        assert_eq!(config.dfo_config().population_size, 8);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_grid_file_conflicts_with_grid_size() {
        let result = Config::try_parse_from([
            "grid_search",
            "--grid-file",
            "map.txt",
            "--grid-size",
            "10",
        ]);
        assert!(result.is_err());
    }
}
