//! Dispersive flies optimisation over an occupancy grid.
//!
//! A fixed population of flies is scattered over the grid. Every iteration
//! each fly except the current best moves toward the best fly, anchored at
//! the fitter of its two ring neighbours, with a small per-coordinate chance
//! of being re-scattered instead. The first fly to land on the goal ends the
//! search. There is no optimality or completeness guarantee: a fly's history
//! is the trajectory it took, not an 8-connected route.

use crate::algorithms::common::PathfindingAlgorithm;
use crate::error::{GridSearchError, Result};
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

/// Swarm parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DfoConfig {
    pub population_size: usize,
    /// Search-space dimensionality. Only 2 (row, column) is supported.
    pub dimensions: usize,
    /// Probability that a coordinate is re-scattered instead of attracted.
    pub disturbance_threshold: f64,
    pub max_iterations: usize,
    /// Full-position redraws allowed when a fly lands on a blocked cell.
    pub retry_limit: usize,
}

impl Default for DfoConfig {
    fn default() -> Self {
        DfoConfig {
            population_size: 5,
            dimensions: 2,
            disturbance_threshold: 0.001,
            max_iterations: 100,
            retry_limit: 10,
        }
    }
}

impl DfoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GridSearchError::InvalidConfig(
                "population size must be at least 1".to_string(),
            ));
        }
        if self.dimensions != 2 {
            return Err(GridSearchError::InvalidConfig(format!(
                "only 2 dimensions are supported, got {}",
                self.dimensions
            )));
        }
        if !(0.0..=1.0).contains(&self.disturbance_threshold) {
            return Err(GridSearchError::InvalidConfig(format!(
                "disturbance threshold must be within [0, 1], got {}",
                self.disturbance_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fly {
    pub position: Position,
    /// Squared distance to the goal as of the last evaluation. Lower is fitter.
    pub fitness: i64,
    /// Every position the fly has occupied, oldest first. The last entry is `position`.
    pub history: Vec<Position>,
}

impl Fly {
    fn new(position: Position) -> Self {
        Fly {
            position,
            fitness: 0,
            history: vec![position],
        }
    }

    fn move_to(&mut self, position: Position) {
        self.history.push(position);
        self.position = position;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A fly landed on the goal; its `position` equals the goal.
    Found(Fly),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn fly(&self) -> Option<&Fly> {
        match self {
            SearchOutcome::Found(fly) => Some(fly),
            SearchOutcome::NotFound => None,
        }
    }

    /// The winning fly's trajectory.
    pub fn into_history(self) -> Option<Vec<Position>> {
        match self {
            SearchOutcome::Found(fly) => Some(fly.history),
            SearchOutcome::NotFound => None,
        }
    }
}

/// DFO engine owning its random source.
pub struct Dfo<R = StdRng> {
    config: DfoConfig,
    rng: R,
    stats: SearchStats,
}

impl<R: Rng> Dfo<R> {
    pub fn new(config: DfoConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Dfo {
            config,
            rng,
            stats: SearchStats::NotRun,
        })
    }

    pub fn search(&mut self, grid: &Grid, goal: Position) -> SearchOutcome {
        let (outcome, stats) = run_swarm(grid, goal, &self.config, &mut self.rng);
        self.stats = stats;
        outcome
    }
}

impl Dfo<StdRng> {
    /// Engine with a `StdRng` seeded from `seed`, for reproducible runs.
    pub fn seeded(config: DfoConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PathfindingAlgorithm for Dfo<R> {
    fn name(&self) -> &'static str {
        "dfo"
    }

    /// Flies spawn at random, so `start` is not used. The returned route is
    /// the winning fly's history.
    fn find_path(
        &mut self,
        grid: &Grid,
        _start: Position,
        goal: Position,
    ) -> Option<Vec<Position>> {
        self.search(grid, goal).into_history()
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Runs one swarm search with a caller-supplied random source.
pub fn search<R: Rng + ?Sized>(
    grid: &Grid,
    goal: Position,
    config: &DfoConfig,
    rng: &mut R,
) -> Result<SearchOutcome> {
    config.validate()?;
    Ok(run_swarm(grid, goal, config, rng).0)
}

fn run_swarm<R: Rng + ?Sized>(
    grid: &Grid,
    goal: Position,
    config: &DfoConfig,
    rng: &mut R,
) -> (SearchOutcome, SearchStats) {
    let mut iterations = 0;
    let mut redraws = 0;

    if grid.is_empty() {
        warn!("DFO cannot search an empty grid");
        return (SearchOutcome::NotFound, dfo_stats(0, 0, false));
    }
    if !grid.is_walkable(goal) {
        warn!("DFO goal position {} is not walkable", goal);
        return (SearchOutcome::NotFound, dfo_stats(0, 0, false));
    }

    let n = config.population_size;
    let mut flies: Vec<Fly> = (0..n)
        .map(|_| Fly::new(random_position(grid, rng)))
        .collect();

    for iteration in 0..config.max_iterations {
        iterations = iteration + 1;

        for fly in flies.iter_mut() {
            fly.fitness = fly.position.squared_distance(&goal);
        }
        let best_index = flies
            .iter()
            .enumerate()
            .min_by_key(|(_, fly)| fly.fitness)
            .map_or(0, |(i, _)| i);
        let best = flies[best_index].position;

        if iteration % 10 == 0 {
            debug!(
                "Iteration {}: best fly {} at {} with fitness {}",
                iteration, best_index, best, flies[best_index].fitness
            );
        }

        if flies[best_index].fitness == 0 {
            debug!("DFO fly {} already at goal on iteration {}", best_index, iteration);
            let fly = flies.swap_remove(best_index);
            return (SearchOutcome::Found(fly), dfo_stats(iterations, redraws, true));
        }

        for i in 0..n {
            if i == best_index {
                continue;
            }

            let (left, right) = ring_neighbors(i, n);
            // Neighbour fitness is from this iteration's evaluation; positions
            // already updated this iteration are used as they are.
            let neighbor = if flies[right].fitness < flies[left].fitness {
                flies[right].position
            } else {
                flies[left].position
            };
            let current = flies[i].position;

            let height = grid.height();
            let width = grid.width();
            let row = update_coordinate(current.row, neighbor.row, best.row, height, config, rng);
            let col = update_coordinate(current.col, neighbor.col, best.col, width, config, rng);

            let (next, attempts) =
                avoid_obstacles(grid, Position::new(row, col), config.retry_limit, rng);
            redraws += attempts;
            trace!("fly {} moves {} -> {}", i, current, next);

            flies[i].move_to(next);
            if next == goal {
                debug!("DFO fly {} reached {} on iteration {}", i, goal, iteration);
                let mut fly = flies.swap_remove(i);
                fly.fitness = 0;
                return (SearchOutcome::Found(fly), dfo_stats(iterations, redraws, true));
            }
        }
    }

    debug!(
        "DFO exhausted {} iterations without reaching {}",
        config.max_iterations, goal
    );
    (SearchOutcome::NotFound, dfo_stats(iterations, redraws, false))
}

fn dfo_stats(iterations: usize, redraws: usize, found: bool) -> SearchStats {
    SearchStats::Dfo {
        iterations,
        redraws,
        found,
    }
}

/// Left and right neighbours of fly `i` in a ring of `n` flies.
fn ring_neighbors(i: usize, n: usize) -> (usize, usize) {
    ((i + n - 1) % n, (i + 1) % n)
}

/// `ceil(neighbor + u * (best - current))`, the DFO attraction step.
fn attract(current: i32, neighbor: i32, best: i32, u: f64) -> f64 {
    (f64::from(neighbor) + u * (f64::from(best) - f64::from(current))).ceil()
}

/// One coordinate update along an axis of length `bound`: disturbance,
/// attraction, then a random redraw if the result left the grid.
fn update_coordinate<R: Rng + ?Sized>(
    current: i32,
    neighbor: i32,
    best: i32,
    bound: usize,
    config: &DfoConfig,
    rng: &mut R,
) -> i32 {
    let u: f64 = rng.gen();
    if u < config.disturbance_threshold {
        return random_coordinate(bound, rng);
    }

    let value = attract(current, neighbor, best, u);
    if value < 0.0 || value >= bound as f64 {
        random_coordinate(bound, rng)
    } else {
        value as i32
    }
}

/// Redraws `pos` uniformly while it is not walkable, at most `retry_limit`
/// times. Returns the accepted position, which may still be blocked, and the
/// number of redraws made.
fn avoid_obstacles<R: Rng + ?Sized>(
    grid: &Grid,
    mut pos: Position,
    retry_limit: usize,
    rng: &mut R,
) -> (Position, usize) {
    let mut attempts = 0;
    while !grid.is_walkable(pos) && attempts < retry_limit {
        pos = random_position(grid, rng);
        attempts += 1;
    }
    (pos, attempts)
}

fn random_coordinate<R: Rng + ?Sized>(bound: usize, rng: &mut R) -> i32 {
    rng.gen_range(0..bound) as i32
}

fn random_position<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
    let row = random_coordinate(grid.height(), rng);
    let col = random_coordinate(grid.width(), rng);
    Position::new(row, col)
}
