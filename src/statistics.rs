use std::fmt;

/// Counters recorded by an engine during its most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStats {
    #[default]
    NotRun,
    AStar {
        /// Nodes moved from the open set to the closed set.
        expanded: usize,
        /// Neighbor candidates inserted into, or improved in, the open set.
        generated: usize,
        /// Steps on the returned path, if any.
        path_len: Option<usize>,
    },
    Dfo {
        iterations: usize,
        /// Full-position redraws made while avoiding blocked cells.
        redraws: usize,
        found: bool,
    },
}

impl SearchStats {
    pub fn succeeded(&self) -> bool {
        match self {
            SearchStats::NotRun => false,
            SearchStats::AStar { path_len, .. } => path_len.is_some(),
            SearchStats::Dfo { found, .. } => *found,
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStats::NotRun => {
                writeln!(f, "No search has been run")?;
            }
            SearchStats::AStar {
                expanded,
                generated,
                path_len,
            } => {
                writeln!(f, "A* Algorithm Statistics:")?;
                writeln!(f, "Nodes expanded: {}", expanded)?;
                writeln!(f, "Nodes generated: {}", generated)?;
                match path_len {
                    Some(steps) => writeln!(f, "Path length: {} steps", steps)?,
                    None => writeln!(f, "No path found")?,
                }
            }
            SearchStats::Dfo {
                iterations,
                redraws,
                found,
            } => {
                writeln!(f, "DFO Algorithm Statistics:")?;
                writeln!(f, "Iterations run: {}", iterations)?;
                writeln!(f, "Obstacle redraws: {}", redraws)?;
                if *found {
                    writeln!(f, "✓ A fly reached the goal")?;
                } else {
                    writeln!(f, "✗ Iteration budget exhausted before any fly reached the goal")?;
                }
            }
        }
        Ok(())
    }
}
