use crate::algorithms::common::PathfindingAlgorithm;
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

/// Estimate of the remaining cost used to order the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// `Δrow² + Δcol²`. Cheap and integer-exact, but it overestimates, so on
    /// cluttered grids the search behaves close to greedy best-first.
    #[default]
    SquaredEuclidean,
    /// `max(|Δrow|, |Δcol|)`. Consistent for unit-cost 8-connected moves, so
    /// the returned path has the minimum number of steps.
    Chebyshev,
}

impl Heuristic {
    pub fn estimate(self, from: Position, goal: Position) -> u64 {
        let h = match self {
            Heuristic::SquaredEuclidean => from.squared_distance(&goal),
            Heuristic::Chebyshev => from.chebyshev_distance(&goal),
        };
        h.unsigned_abs()
    }
}

/// A candidate position discovered by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub position: Position,
    /// Index of the generating node in the closed arena. `None` only for the start.
    pub parent: Option<usize>,
    pub g: u64,
    pub h: u64,
    pub f: u64,
}

impl SearchNode {
    fn new(position: Position, parent: Option<usize>, g: u64, h: u64) -> Self {
        SearchNode {
            position,
            parent,
            g,
            h,
            f: g + h,
        }
    }
}

/// Open/closed-list A* over the 8-connected grid with unit step cost.
#[derive(Debug, Default)]
pub struct AStar {
    heuristic: Heuristic,
    stats: SearchStats,
}

impl AStar {
    /// Creates an A* engine using the squared Euclidean heuristic.
    pub fn new() -> Self {
        AStar::default()
    }

    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        AStar {
            heuristic,
            stats: SearchStats::NotRun,
        }
    }

    /// Finds a path from `start` to `goal`.
    ///
    /// # Returns
    ///
    /// The positions from `start` to `goal` inclusive, or `None` if either
    /// endpoint is not walkable or the goal cannot be reached.
    pub fn search(
        &mut self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>> {
        self.stats = SearchStats::AStar {
            expanded: 0,
            generated: 0,
            path_len: None,
        };

        if !grid.is_walkable(start) {
            warn!("A* start position {} is not walkable", start);
            return None;
        }
        if !grid.is_walkable(goal) {
            warn!("A* goal position {} is not walkable", goal);
            return None;
        }

        let mut open = vec![SearchNode::new(start, None, 0, 0)];
        // Append-only arena; parent links index into it.
        let mut closed: Vec<SearchNode> = Vec::new();
        let mut closed_lookup: FxHashMap<Position, usize> = FxHashMap::default();
        let mut generated = 0;

        // `min_by_key` yields the first minimum, so ties go to the earliest inserted node.
        while let Some(current_index) = open
            .iter()
            .enumerate()
            .min_by_key(|(_, node)| node.f)
            .map(|(i, _)| i)
        {
            let current = open.remove(current_index);
            let arena_index = closed.len();
            closed.push(current);
            closed_lookup.insert(current.position, arena_index);
            trace!(
                "expanding {} g={} h={} f={}",
                current.position,
                current.g,
                current.h,
                current.f
            );

            if current.position == goal {
                let path = reconstruct_path(&closed, arena_index);
                debug!(
                    "A* reached {} after expanding {} nodes, path has {} steps",
                    goal,
                    closed.len(),
                    path.len() - 1
                );
                self.stats = SearchStats::AStar {
                    expanded: closed.len(),
                    generated,
                    path_len: Some(path.len() - 1),
                };
                return Some(path);
            }

            for next in grid.neighbors(current.position) {
                if closed_lookup.contains_key(&next) {
                    continue;
                }

                let g = current.g + 1;
                if let Some(existing) = open.iter_mut().find(|node| node.position == next) {
                    if existing.g <= g {
                        continue;
                    }
                    // Strictly cheaper route: keep the insertion slot, take the new parent.
                    *existing = SearchNode::new(next, Some(arena_index), g, existing.h);
                } else {
                    let h = self.heuristic.estimate(next, goal);
                    open.push(SearchNode::new(next, Some(arena_index), g, h));
                }
                generated += 1;
            }
        }

        debug!(
            "A* exhausted the open set after expanding {} nodes without reaching {}",
            closed.len(),
            goal
        );
        self.stats = SearchStats::AStar {
            expanded: closed.len(),
            generated,
            path_len: None,
        };
        None
    }
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(&mut self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
        self.search(grid, start, goal)
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Follows parent links from `goal_index` back to the start and returns the
/// chain in start-to-goal order.
fn reconstruct_path(closed: &[SearchNode], goal_index: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        let node = &closed[index];
        path.push(node.position);
        cursor = node.parent;
    }
    path.reverse();
    path
}

/// Runs A* with the default heuristic.
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    AStar::new().search(grid, start, goal)
}
