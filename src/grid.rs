use crate::error::{Result, SearchError};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Zero-based `(row, col)` cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// `|Δrow| + |Δcol|`
    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

/// North, south, west, east, as `(Δrow, Δcol)`.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    Obstacle = 1,
    Start = 2,
    End = 3,
    Checked = 4,
    Path = 5,
}

impl CellState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => CellState::Obstacle,
            2 => CellState::Start,
            3 => CellState::End,
            4 => CellState::Checked,
            5 => CellState::Path,
            _ => CellState::Empty,
        }
    }

    /// Glyph used by [`Grid::render`] and [`Grid::from_ascii`].
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Obstacle => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Checked => '*',
            CellState::Path => 'o',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Obstacle),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            '*' => Some(CellState::Checked),
            'o' => Some(CellState::Path),
            _ => None,
        }
    }
}

/// Which cells [`Grid::reset`] clears back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    All,
    CheckedAndPath,
    Obstacles,
}

/// Obstacle painting mode for a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Obstacle,
    Erase,
}

impl Paint {
    /// A drag that starts on an empty cell paints obstacles, one that starts on
    /// an obstacle erases them. Anything else paints nothing.
    pub fn for_state(state: CellState) -> Option<Paint> {
        match state {
            CellState::Empty => Some(Paint::Obstacle),
            CellState::Obstacle => Some(Paint::Erase),
            _ => None,
        }
    }
}

/// Fixed-size rectangular grid of cell states.
///
/// Each cell is a single atomic byte so the presentation layer can read
/// states while the one active search worker writes them, without a lock.
/// Exclusivity of writers is the controller's job.
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<AtomicU8>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows * cols)
            .map(|_| AtomicU8::new(CellState::Empty as u8))
            .collect();
        Grid { rows, cols, cells }
    }

    /// Parse a layout such as `"S.#\n..E"`. Blank lines and surrounding
    /// whitespace are ignored; every row must have the same width and the
    /// layout may hold at most one `S` and one `E`.
    pub fn from_ascii(layout: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = layout
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let cols = lines.first().map_or(0, |(_, line)| line.chars().count());
        let grid = Grid::new(lines.len(), cols);
        let (mut starts, mut ends) = (0, 0);

        for (row, (line_no, line)) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(SearchError::InvalidLayout {
                    line: *line_no,
                    reason: format!("expected {} cells, found {}", cols, line.chars().count()),
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let state = CellState::from_glyph(glyph).ok_or_else(|| SearchError::InvalidLayout {
                    line: *line_no,
                    reason: format!("unknown cell glyph '{}'", glyph),
                })?;
                match state {
                    CellState::Start => starts += 1,
                    CellState::End => ends += 1,
                    _ => {}
                }
                if starts > 1 || ends > 1 {
                    return Err(SearchError::InvalidLayout {
                        line: *line_no,
                        reason: "more than one start or end cell".into(),
                    });
                }
                grid.store(Coord::new(row, col), state);
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if self.contains(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(SearchError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get_state(&self, row: usize, col: usize) -> Result<CellState> {
        let idx = self.index(row, col)?;
        Ok(CellState::from_u8(self.cells[idx].load(Ordering::Acquire)))
    }

    pub fn set_state(&self, row: usize, col: usize, state: CellState) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx].store(state as u8, Ordering::Release);
        Ok(())
    }

    /// State of a coordinate produced by bounds-checked neighbor generation.
    ///
    /// Panics on an out-of-range coordinate; the search worker turns such a
    /// panic into a cancelled run.
    pub fn state(&self, at: Coord) -> CellState {
        match self.get_state(at.row, at.col) {
            Ok(state) => state,
            Err(err) => panic!("grid invariant violated: {}", err),
        }
    }

    pub(crate) fn store(&self, at: Coord, state: CellState) {
        if let Err(err) = self.set_state(at.row, at.col, state) {
            panic!("grid invariant violated: {}", err);
        }
    }

    /// Row-major scan for the start and end cells.
    pub fn find_start_and_end(&self) -> Option<(Coord, Coord)> {
        let mut start = None;
        let mut end = None;
        for row in 0..self.rows {
            for col in 0..self.cols {
                match self.state(Coord::new(row, col)) {
                    CellState::Start => start = Some(Coord::new(row, col)),
                    CellState::End => end = Some(Coord::new(row, col)),
                    _ => {}
                }
            }
        }
        Some((start?, end?))
    }

    /// Step from `from` by `(dr, dc)`, or `None` when that leaves the grid.
    pub fn offset(&self, from: Coord, dr: isize, dc: isize) -> Option<Coord> {
        let row = from.row.checked_add_signed(dr)?;
        let col = from.col.checked_add_signed(dc)?;
        self.contains(row, col).then_some(Coord::new(row, col))
    }

    /// In-bounds orthogonal neighbors in N, S, W, E order, whatever their state.
    pub fn neighbors(&self, pos: Coord) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(pos, dr, dc))
    }

    /// `Empty` or `End`: cells a search may still step onto.
    pub fn is_open(&self, pos: Coord) -> bool {
        matches!(self.state(pos), CellState::Empty | CellState::End)
    }

    /// Anything but an obstacle.
    pub fn is_passable(&self, pos: Coord) -> bool {
        self.state(pos) != CellState::Obstacle
    }

    /// Left-click rule for endpoints: an empty cell becomes the start if
    /// there is none, otherwise the end if there is none; clicking an
    /// existing start or end clears it. Returns the cell's new state.
    pub fn place_endpoint(&self, row: usize, col: usize) -> Result<CellState> {
        let current = self.get_state(row, col)?;
        let next = match current {
            CellState::Empty => {
                let (has_start, has_end) = self.endpoint_presence();
                if !has_start {
                    CellState::Start
                } else if !has_end {
                    CellState::End
                } else {
                    CellState::Empty
                }
            }
            CellState::Start | CellState::End => CellState::Empty,
            other => other,
        };
        self.set_state(row, col, next)?;
        Ok(next)
    }

    fn endpoint_presence(&self) -> (bool, bool) {
        let mut has_start = false;
        let mut has_end = false;
        for cell in &self.cells {
            match CellState::from_u8(cell.load(Ordering::Acquire)) {
                CellState::Start => has_start = true,
                CellState::End => has_end = true,
                _ => {}
            }
        }
        (has_start, has_end)
    }

    /// Right-drag rule: painting only turns `Empty` into `Obstacle` and
    /// erasing only turns `Obstacle` into `Empty`. Returns whether the cell
    /// changed.
    pub fn paint_obstacle(&self, row: usize, col: usize, paint: Paint) -> Result<bool> {
        let changed = match (paint, self.get_state(row, col)?) {
            (Paint::Obstacle, CellState::Empty) => Some(CellState::Obstacle),
            (Paint::Erase, CellState::Obstacle) => Some(CellState::Empty),
            _ => None,
        };
        if let Some(state) = changed {
            self.set_state(row, col, state)?;
        }
        Ok(changed.is_some())
    }

    pub fn reset(&self, scope: ResetScope) {
        for cell in &self.cells {
            let state = CellState::from_u8(cell.load(Ordering::Acquire));
            let clear = match scope {
                ResetScope::All => true,
                ResetScope::CheckedAndPath => {
                    matches!(state, CellState::Checked | CellState::Path)
                }
                ResetScope::Obstacles => state == CellState::Obstacle,
            };
            if clear {
                cell.store(CellState::Empty as u8, Ordering::Release);
            }
        }
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells
            .iter()
            .filter(|cell| CellState::from_u8(cell.load(Ordering::Acquire)) == state)
            .count()
    }

    /// One line per row using the glyphs of [`CellState::glyph`].
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(self.state(Coord::new(row, col)).glyph());
            }
            out.push('\n');
        }
        out
    }

    /// Print the grid with row/column rulers for the terminal demo.
    pub fn print_grid(&self) {
        println!("Legend: S=Start, E=End, #=Obstacle, *=Checked, o=Path, .=Empty");

        print!("   ");
        for col in 0..self.cols {
            print!("{:2}", col % 10);
        }
        println!();

        for row in 0..self.rows {
            print!("{:2} ", row);
            for col in 0..self.cols {
                print!("{} ", self.state(Coord::new(row, col)).glyph());
            }
            println!();
        }
        println!();
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|cell| AtomicU8::new(cell.load(Ordering::Acquire)))
            .collect();
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_are_bounds_checked() {
        let grid = Grid::new(2, 3);
        grid.set_state(1, 2, CellState::Obstacle).unwrap();
        assert_eq!(grid.get_state(1, 2).unwrap(), CellState::Obstacle);
        assert_eq!(
            grid.get_state(2, 0),
            Err(SearchError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(grid.set_state(0, 3, CellState::Empty).is_err());
    }

    #[test]
    fn find_start_and_end_requires_both() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.find_start_and_end(), None);
        grid.set_state(2, 1, CellState::End).unwrap();
        assert_eq!(grid.find_start_and_end(), None);
        grid.set_state(0, 2, CellState::Start).unwrap();
        assert_eq!(
            grid.find_start_and_end(),
            Some((Coord::new(0, 2), Coord::new(2, 1)))
        );
    }

    #[test]
    fn neighbors_follow_north_south_west_east_and_clip_edges() {
        let grid = Grid::new(3, 3);
        let centre: Vec<_> = grid.neighbors(Coord::new(1, 1)).collect();
        assert_eq!(
            centre,
            vec![
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(1, 2)
            ]
        );
        let corner: Vec<_> = grid.neighbors(Coord::new(0, 0)).collect();
        assert_eq!(corner, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn ascii_round_trips_through_render() {
        let layout = "S.#\n.*o\n#.E\n";
        let grid = Grid::from_ascii(layout).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.render(), layout);
    }

    #[test]
    fn ascii_rejects_ragged_rows_and_duplicate_endpoints() {
        assert!(matches!(
            Grid::from_ascii("S..\n.E"),
            Err(SearchError::InvalidLayout { line: 2, .. })
        ));
        assert!(matches!(
            Grid::from_ascii("S.S\n..E"),
            Err(SearchError::InvalidLayout { line: 1, .. })
        ));
        assert!(matches!(
            Grid::from_ascii("S?E"),
            Err(SearchError::InvalidLayout { line: 1, .. })
        ));
    }

    #[test]
    fn place_endpoint_cycles_start_then_end_then_clears() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.place_endpoint(0, 0).unwrap(), CellState::Start);
        assert_eq!(grid.place_endpoint(1, 1).unwrap(), CellState::End);
        assert_eq!(grid.place_endpoint(0, 1).unwrap(), CellState::Empty);
        assert_eq!(grid.place_endpoint(0, 0).unwrap(), CellState::Empty);
        // With the start gone, the next click places a new start.
        assert_eq!(grid.place_endpoint(1, 0).unwrap(), CellState::Start);
    }

    #[test]
    fn paint_only_touches_matching_cells() {
        let grid = Grid::from_ascii("S.#E").unwrap();
        assert!(grid.paint_obstacle(0, 1, Paint::Obstacle).unwrap());
        assert!(!grid.paint_obstacle(0, 0, Paint::Obstacle).unwrap());
        assert!(grid.paint_obstacle(0, 2, Paint::Erase).unwrap());
        assert!(!grid.paint_obstacle(0, 3, Paint::Erase).unwrap());
        assert_eq!(grid.render(), "S#.E\n");
        assert_eq!(Paint::for_state(CellState::Start), None);
    }

    #[test]
    fn reset_scopes() {
        let layout = "S*#\no#E\n";
        let grid = Grid::from_ascii(layout).unwrap();
        grid.reset(ResetScope::CheckedAndPath);
        assert_eq!(grid.render(), "S.#\n.#E\n");

        let grid = Grid::from_ascii(layout).unwrap();
        grid.reset(ResetScope::Obstacles);
        assert_eq!(grid.render(), "S*.\no.E\n");

        let grid = Grid::from_ascii(layout).unwrap();
        grid.reset(ResetScope::All);
        assert_eq!(grid.count(CellState::Empty), 6);
        assert_eq!(grid.find_start_and_end(), None);
    }

    #[test]
    #[should_panic(expected = "grid invariant violated")]
    fn unchecked_access_panics_out_of_range() {
        Grid::new(1, 1).state(Coord::new(0, 1));
    }
}
