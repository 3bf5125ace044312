use super::cell::{Card, Cell};

/// Number of rows on the board.
pub(crate) const ROWS: usize = 4;
/// Number of columns on the board.
pub(crate) const COLUMNS: usize = 4;
/// The tile value that wins the game.
pub(crate) const WINNING_TILE: Card = 2048;

const CELL_COUNT: usize = ROWS * COLUMNS;
const LINE_CAPACITY: usize = if ROWS > COLUMNS { ROWS } else { COLUMNS };

pub(crate) type Score = u32;

/// Direction represents the direction indicated by the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// How the lines of the board are walked for this direction. Every line is addressed by its
    /// first cell (the one on the edge being moved towards) and a signed stride.
    fn traversal(&self) -> Traversal {
        let (rows, columns) = (ROWS as isize, COLUMNS as isize);
        match self {
            Direction::Up => Traversal {
                lines: COLUMNS,
                len: ROWS,
                origin: 0,
                line_step: 1,
                stride: columns,
            },
            Direction::Down => Traversal {
                lines: COLUMNS,
                len: ROWS,
                origin: (rows - 1) * columns,
                line_step: 1,
                stride: -columns,
            },
            Direction::Left => Traversal {
                lines: ROWS,
                len: COLUMNS,
                origin: 0,
                line_step: columns,
                stride: 1,
            },
            Direction::Right => Traversal {
                lines: ROWS,
                len: COLUMNS,
                origin: columns - 1,
                line_step: columns,
                stride: -1,
            },
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

struct Traversal {
    lines: usize,
    len: usize,
    origin: isize,
    line_step: isize,
    stride: isize,
}

impl Traversal {
    fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.lines).map(move |n| Line {
            start: self.origin + self.line_step * n as isize,
            stride: self.stride,
            len: self.len,
        })
    }
}

/// One row or column of the board, front first.
struct Line {
    start: isize,
    stride: isize,
    len: usize,
}

impl Line {
    fn indices(&self) -> Indices {
        Indices {
            next: self.start,
            stride: self.stride,
            remaining: self.len,
        }
    }
}

// Indices is an iterator over the flat board offsets of a single line.
struct Indices {
    next: isize,
    stride: isize,
    remaining: usize,
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next;
        self.next += self.stride;
        self.remaining -= 1;
        Some(idx as usize)
    }
}

/// What a single line, or a whole board move, did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MoveOutcome {
    /// At least one pair of tiles merged.
    pub(crate) merged: bool,
    /// At least one tile slid to a new position during compaction.
    pub(crate) moved: bool,
    /// Sum of the values of all tiles produced by merges.
    pub(crate) points: Score,
}

impl MoveOutcome {
    pub(crate) fn changed(&self) -> bool {
        self.merged || self.moved
    }

    fn absorb(&mut self, other: MoveOutcome) {
        self.merged |= other.merged;
        self.moved |= other.moved;
        self.points += other.points;
    }
}

/// Compacts then merges a single line in place. The front of the slice is the edge the tiles are
/// moving towards.
pub(crate) fn collapse_line(line: &mut [Cell]) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    let len = line.len();

    // stable partition of the tiles towards the front
    let mut write = 0;
    for read in 0..len {
        if line[read].is_empty() {
            continue;
        }
        if read != write {
            line[write] = line[read];
            outcome.moved = true;
        }
        write += 1;
    }
    for cell in line.iter_mut().skip(write) {
        *cell = Cell::EMPTY;
    }

    // the scan never rewinds, so a freshly merged tile is not compared against its new neighbour
    for i in 0..len.saturating_sub(1) {
        if !line[i].can_merge(&line[i + 1]) {
            continue;
        }
        line[i] = line[i].merged();
        outcome.merged = true;
        outcome.points += line[i].value();
        for j in i + 1..len - 1 {
            line[j] = line[j + 1];
        }
        line[len - 1] = Cell::EMPTY;
    }

    outcome
}

/// Board is the fixed 4x4 grid of cells, stored row-major, along with the running score.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Board {
    cells: [Cell; CELL_COUNT],
    score: Score,
}

// public methods
impl Board {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (COLUMNS, ROWS)
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    /// Empties every cell and zeroes the score.
    pub(crate) fn reset(&mut self) {
        self.cells = [Cell::EMPTY; CELL_COUNT];
        self.score = 0;
    }

    pub(crate) fn get(&self, row: usize, column: usize) -> Card {
        self.cells[Self::offset(row, column)].value()
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, value: Card) {
        self.cells[Self::offset(row, column)] = Cell::new(value);
    }

    pub(crate) fn is_win(&self) -> bool {
        self.cells.iter().any(|c| c.value() >= WINNING_TILE)
    }

    pub(crate) fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(Cell::is_empty)
    }

    pub(crate) fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub(crate) fn max_tile(&self) -> Card {
        self.cells.iter().map(Cell::value).max().unwrap_or(0)
    }

    /// Whether shifting in any direction would change the board. Probing happens on scratch
    /// copies; `self` is never touched.
    pub(crate) fn can_move(&self) -> bool {
        if self.has_empty_cell() {
            return true;
        }
        // with no empty cell nothing can slide, so only a merge changes the board
        Direction::ALL.iter().any(|direction| {
            let mut scratch = self.clone();
            scratch.apply_move(*direction)
        })
    }

    /// Applies a move and reports only whether any tiles merged.
    pub(crate) fn apply_move(&mut self, direction: Direction) -> bool {
        self.shift(direction).merged
    }

    /// Shifts every line of the board towards the given edge, merging equal neighbours at most
    /// once per tile.
    pub(crate) fn shift(&mut self, direction: Direction) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        for line in direction.traversal().lines() {
            let mut buf = [Cell::EMPTY; LINE_CAPACITY];
            let cells = &mut buf[..line.len];
            for (slot, idx) in cells.iter_mut().zip(line.indices()) {
                *slot = self.cells[idx];
            }
            outcome.absorb(collapse_line(cells));
            for (cell, idx) in cells.iter().zip(line.indices()) {
                self.cells[idx] = *cell;
            }
        }
        for cell in self.cells.iter_mut() {
            cell.settle();
        }
        self.score += outcome.points;
        log::trace!("shifted {}: {:?}", direction, outcome);
        outcome
    }

    /// Places a 2 (even `random_value`) or a 4 (odd `random_value`) in one of the empty cells,
    /// chosen by the remaining bits of `random_value`. Returns false when the board is full.
    pub(crate) fn fill_random_cell(&mut self, random_value: u32) -> bool {
        let empty = self.empty_cells();
        if empty == 0 {
            return false;
        }
        let value = if random_value & 1 == 1 { 4 } else { 2 };
        let target = (random_value >> 1) as usize % empty;
        let idx = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(idx, _)| idx)
            .nth(target)
            .expect("target is always below the number of empty cells");
        self.cells[idx] = Cell::new(value);
        log::debug!(
            "spawned {} at ({}, {})",
            value,
            idx / COLUMNS,
            idx % COLUMNS
        );
        true
    }

    /// Row-major snapshot of the tile values.
    #[cfg(test)]
    pub(crate) fn rows(&self) -> [[Card; COLUMNS]; ROWS] {
        let mut rows = [[0; COLUMNS]; ROWS];
        for (idx, cell) in self.cells.iter().enumerate() {
            rows[idx / COLUMNS][idx % COLUMNS] = cell.value();
        }
        rows
    }
}

// private methods
impl Board {
    fn offset(row: usize, column: usize) -> usize {
        assert!(row < ROWS, "invalid row {}", row);
        assert!(column < COLUMNS, "invalid column {}", column);
        row * COLUMNS + column
    }
}

impl From<[[Card; COLUMNS]; ROWS]> for Board {
    fn from(rows: [[Card; COLUMNS]; ROWS]) -> Self {
        let mut b = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                b.set(r, c, *value);
            }
        }
        b
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(COLUMNS) {
            write!(f, "|")?;
            for cell in row {
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
