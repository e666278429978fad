use crate::error::{GridSearchError, Result};
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;

/// The 8 compass and diagonal offsets, in the order neighbors are generated.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Position {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Squared Euclidean distance. Integer-exact, used as both the A* heuristic
    /// and the DFO fitness.
    pub fn squared_distance(&self, other: &Position) -> i64 {
        let dr = i64::from(self.row) - i64::from(other.row);
        let dc = i64::from(self.col) - i64::from(other.col);
        dr * dr + dc * dc
    }

    /// Number of 8-connected unit steps between two positions on an open grid.
    pub fn chebyshev_distance(&self, other: &Position) -> i64 {
        let dr = (i64::from(self.row) - i64::from(other.row)).abs();
        let dc = (i64::from(self.col) - i64::from(other.col)).abs();
        dr.max(dc)
    }

    /// True if `other` is one of the 8 neighbor offsets away.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.chebyshev_distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = String;

    /// Parses `row,col`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row {row:?}: {e}"))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column {col:?}: {e}"))?;
        Ok(Position { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Free,
    Blocked,
}

/// A rectangular occupancy map. Dimensions are fixed once built and the
/// search engines only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from rows of cells. Every row must have the length of the first.
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self> {
        let width = cells.first().map_or(0, Vec::len);
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridSearchError::InvalidGrid {
                row,
                expected: width,
                found,
            });
        }

        Ok(Grid {
            height: cells.len(),
            width,
            cells,
        })
    }

    /// Builds a grid from an integer occupancy map: `0` is free, anything else blocked.
    pub fn from_occupancy<R, C>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let cells = rows
            .into_iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&v| if v == 0 { Cell::Free } else { Cell::Blocked })
                    .collect()
            })
            .collect();
        Self::new(cells)
    }

    /// An all-free grid.
    pub fn open(height: usize, width: usize) -> Self {
        Grid {
            height,
            width,
            cells: vec![vec![Cell::Free; width]; height],
        }
    }

    /// An open grid with up to `num_walls` randomly blocked cells. Reserved
    /// positions are never blocked.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        num_walls: usize,
        reserved: &[Position],
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::open(height, width);
        if grid.is_empty() {
            return grid;
        }

        let reserved: FxHashSet<Position> = reserved
            .iter()
            .copied()
            .filter(|&p| grid.in_bounds(p))
            .collect();
        let target = num_walls.min(height * width - reserved.len());
        let max_attempts = num_walls.saturating_mul(3);

        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < target && attempts < max_attempts {
            let r = rng.gen_range(0..height);
            let c = rng.gen_range(0..width);
            // Grid dimensions beyond i32::MAX are not addressable by Position.
            let pos = Position::new(r as i32, c as i32);

            if !reserved.contains(&pos) && grid.cells[r][c] == Cell::Free {
                grid.cells[r][c] = Cell::Blocked;
                walls_placed += 1;
            }
            attempts += 1;
        }
        grid
    }

    /// The 10x10 demonstration map: column 4 is a wall with gaps at rows 5 and 9.
    pub fn demo() -> Self {
        let mut grid = Self::open(10, 10);
        for (r, row) in grid.cells.iter_mut().enumerate() {
            if r != 5 && r != 9 {
                row[4] = Cell::Blocked;
            }
        }
        grid
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|(r, c)| self.cells[r][c])
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Free)
    }

    /// Walkable 8-connected neighbors of `pos`, in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dr, dc)| pos.offset(dr, dc))
            .filter(move |&next| self.is_walkable(next))
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Blocked)
            .count()
    }

    /// Text picture of the grid with `path` overlaid. The first and last path
    /// positions are drawn as `S` and `G`.
    pub fn render(&self, path: &[Position]) -> String {
        let on_path: FxHashSet<Position> = path.iter().copied().collect();
        let start = path.first();
        let goal = path.last();

        let mut out = String::with_capacity(self.height * (self.width + 1));
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let pos = Position::new(r as i32, c as i32);
                let ch = if Some(&pos) == start {
                    'S'
                } else if Some(&pos) == goal {
                    'G'
                } else if on_path.contains(&pos) {
                    '*'
                } else {
                    match cell {
                        Cell::Blocked => '#',
                        Cell::Free => '.',
                    }
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, pos: Position) -> Option<(usize, usize)> {
        let r = usize::try_from(pos.row).ok()?;
        let c = usize::try_from(pos.col).ok()?;
        (r < self.height && c < self.width).then_some((r, c))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

impl FromStr for Grid {
    type Err = GridSearchError;

    /// One line per row: `.` is free, `#` is blocked.
    fn from_str(s: &str) -> Result<Self> {
        let mut lines: Vec<&str> = s.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let first = lines
            .iter()
            .position(|l| !l.trim().is_empty())
            .unwrap_or(lines.len());

        let cells = lines[first..]
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.trim_end()
                    .chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        '.' => Ok(Cell::Free),
                        '#' => Ok(Cell::Blocked),
                        found => Err(GridSearchError::InvalidCell { row, col, found }),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(cells)
    }
}
