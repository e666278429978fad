use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;

pub trait PathfindingAlgorithm {
    /// Short identifier used in reports.
    fn name(&self) -> &'static str;

    /// Searches `grid` for a route from `start` to `goal`. `None` means the
    /// engine found nothing within its budget.
    fn find_path(&mut self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>>;

    /// Counters from the most recent `find_path` call.
    fn stats(&self) -> SearchStats {
        SearchStats::NotRun
    }
}
