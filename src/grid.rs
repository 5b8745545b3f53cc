//! Karnaugh map layout of a truth table.
//!
//! Each assignment index is placed on a 2D grid where rows and columns follow a reflected Gray code:
//! adjacent cells (including wraparound at the edges) differ by exactly one variable.
//! Up to 4 variables fit on a single grid, the first half of the variables selecting the row and
//! the other half selecting the column. With 5 or 6 variables, the first one or two variables select one
//! of several tiles, ordered by Gray code as well, and the remaining variables use the 4-variable layout.

use crate::tools::gray;
use crate::*;

use bit_set::BitSet;
use std::collections::BTreeSet;
use std::fmt;

/// Number of variables laid out inside a tile
const TILE_VARIABLES: usize = 4;

/// Coordinates of a cell in a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub tile: usize,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(tile: usize, row: usize, col: usize) -> Self {
        Self { tile, row, col }
    }
}

/// The Karnaugh map layout for a given number of variables.
///
/// ```
/// use qmkit::{Cell, Grid};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let grid = Grid::new(4)?;
/// assert_eq!(grid.dimensions(), (4, 4));
/// assert_eq!(grid.tile_count(), 1);
///
/// // The third row and column correspond to the code 11
/// assert_eq!(grid.index_at(Cell::new(0, 2, 2)), Some(0b1111));
/// assert!(grid.are_adjacent(0b0000, 0b1000));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    tile_bits: usize,
    row_bits: usize,
    col_bits: usize,
    /// Assignment index of each cell, tile by tile and row by row
    cells: Vec<usize>,
    /// Cell of each assignment index
    positions: Vec<Cell>,
    /// Value of each assignment index, when the grid was built for a truth table
    outputs: Option<Vec<Output>>,
}

impl Grid {
    /// Create the layout for the given number of variables
    pub fn new(width: usize) -> Result<Self, QmkitError> {
        if !(MIN_VARIABLES..=MAX_VARIABLES).contains(&width) {
            return Err(QmkitError::VariableCount(width));
        }
        let tile_bits = width.saturating_sub(TILE_VARIABLES);
        let inner = width - tile_bits;
        let row_bits = (inner + 1) / 2;
        let col_bits = inner - row_bits;

        let mut grid = Self {
            width,
            tile_bits,
            row_bits,
            col_bits,
            cells: Vec::with_capacity(1 << width),
            positions: vec![Cell::new(0, 0, 0); 1 << width],
            outputs: None,
        };
        for tile in 0..grid.tile_count() {
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let index = (gray(tile) << inner) | (gray(row) << col_bits) | gray(col);
                    grid.cells.push(index);
                    grid.positions[index] = Cell::new(tile, row, col);
                }
            }
        }
        Ok(grid)
    }

    /// Create the layout of a truth table, recording the output of each cell
    pub fn from_table(table: &TruthTable) -> Result<Self, QmkitError> {
        let mut grid = Self::new(table.width())?;
        grid.outputs = Some((0..table.size()).map(|i| table.output(i)).collect());
        Ok(grid)
    }

    /// Number of variables
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        1 << self.row_bits
    }

    pub fn cols(&self) -> usize {
        1 << self.col_bits
    }

    /// Number of rows and columns of each tile
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn tile_count(&self) -> usize {
        1 << self.tile_bits
    }

    /// Value of the tile-selection variables for a tile
    pub fn tile_code(&self, tile: usize) -> usize {
        gray(tile)
    }

    /// Value of the row-selection variables for a row
    pub fn row_code(&self, row: usize) -> usize {
        gray(row)
    }

    /// Value of the column-selection variables for a column
    pub fn col_code(&self, col: usize) -> usize {
        gray(col)
    }

    /// The assignment index placed in a cell
    pub fn index_at(&self, cell: Cell) -> Option<usize> {
        if cell.tile >= self.tile_count() || cell.row >= self.rows() || cell.col >= self.cols() {
            return None;
        }
        self.cells
            .get((cell.tile * self.rows() + cell.row) * self.cols() + cell.col)
            .copied()
    }

    /// The cell of an assignment index
    pub fn position_of(&self, index: usize) -> Option<Cell> {
        self.positions.get(index).copied()
    }

    /// The recorded output of a cell, if the grid was built for a truth table
    pub fn output_at(&self, cell: Cell) -> Option<Output> {
        let index = self.index_at(cell)?;
        self.outputs.as_ref().map(|o| o[index])
    }

    /// Iterate over all cells with their assignment index, tile by tile and row by row
    pub fn iter(&self) -> impl Iterator<Item = (Cell, usize)> + '_ {
        self.cells.iter().map(move |i| (self.positions[*i], *i))
    }

    /// The cells adjacent to a given cell.
    ///
    /// Cells are adjacent when they are consecutive in a row or column of the same tile, including
    /// wraparound, or at the same place in consecutive tiles. Each cell has exactly one neighbor per variable.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let step = |v: usize, len: usize| [(v + 1) % len, (v + len - 1) % len];
        let mut result = BTreeSet::new();
        for row in step(cell.row, self.rows()) {
            result.insert(Cell { row, ..cell });
        }
        for col in step(cell.col, self.cols()) {
            result.insert(Cell { col, ..cell });
        }
        for tile in step(cell.tile, self.tile_count()) {
            result.insert(Cell { tile, ..cell });
        }
        result.remove(&cell);
        result.into_iter().collect()
    }

    /// Test if two assignment indices are placed in adjacent cells
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        match (self.position_of(a), self.position_of(b)) {
            (Some(ca), Some(cb)) => self.neighbors(ca).contains(&cb),
            _ => false,
        }
    }

    /// The cells covered by a cube
    pub fn cells_of(&self, cube: &Cube) -> Vec<Cell> {
        cube.expand().filter_map(|i| self.position_of(i)).collect()
    }

    /// Test if a cube is drawn as a valid group on the map
    pub fn is_group(&self, cube: &Cube) -> bool {
        cube.width() == self.width && self.is_valid_group(&cube.expand().collect())
    }

    /// Test if a set of assignment indices forms a valid group on the map.
    ///
    /// A valid group is a rectangle, possibly wrapping around the edges, with power-of-two sides,
    /// repeated on a run of consecutive tiles whose length is a power of two.
    pub fn is_valid_group(&self, indices: &BitSet) -> bool {
        let mut cells = Vec::new();
        for i in indices {
            match self.position_of(i) {
                None => return false,
                Some(c) => cells.push(c),
            }
        }
        if cells.is_empty() {
            return false;
        }

        let tiles: BTreeSet<usize> = cells.iter().map(|c| c.tile).collect();
        let rows: BTreeSet<usize> = cells.iter().map(|c| c.row).collect();
        let cols: BTreeSet<usize> = cells.iter().map(|c| c.col).collect();
        cells.len() == tiles.len() * rows.len() * cols.len()
            && cyclic_block(&tiles, self.tile_count())
            && cyclic_block(&rows, self.rows())
            && cyclic_block(&cols, self.cols())
    }
}

/// Test if a set of positions on a cycle is a contiguous run of power-of-two length
fn cyclic_block(positions: &BTreeSet<usize>, len: usize) -> bool {
    let k = positions.len();
    if !k.is_power_of_two() || k > len {
        return false;
    }
    positions
        .iter()
        .any(|start| (0..k).all(|t| positions.contains(&((start + t) % len))))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = match self.outputs {
            Some(_) => self.col_bits.max(1),
            None => self.col_bits.max(2),
        };
        for tile in 0..self.tile_count() {
            if self.tile_count() > 1 {
                writeln!(f, "[{:0w$b}]", self.tile_code(tile), w = self.tile_bits)?;
            }
            write!(f, "{:w$} |", "", w = self.row_bits)?;
            for col in 0..self.cols() {
                write!(f, " {:>w$}", format!("{:0b$b}", self.col_code(col), b = self.col_bits), w = cell_width)?;
            }
            writeln!(f)?;
            for row in 0..self.rows() {
                write!(f, "{:0w$b} |", self.row_code(row), w = self.row_bits)?;
                for col in 0..self.cols() {
                    let cell = Cell::new(tile, row, col);
                    match (self.output_at(cell), self.index_at(cell)) {
                        (Some(o), _) => write!(f, " {:>w$}", o.to_string(), w = cell_width)?,
                        (None, Some(i)) => write!(f, " {:>w$}", i, w = cell_width)?,
                        (None, None) => (),
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use bit_set::BitSet;

    #[test]
    fn layouts() -> Result<(), QmkitError> {
        let expected = [(2, (2, 2), 1), (3, (4, 2), 1), (4, (4, 4), 1), (5, (4, 4), 2), (6, (4, 4), 4)];
        for (width, dims, tiles) in expected {
            let grid = Grid::new(width)?;
            assert_eq!(grid.dimensions(), dims);
            assert_eq!(grid.tile_count(), tiles);

            // every index is placed exactly once
            let mut seen: Vec<usize> = grid.iter().map(|(_, i)| i).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..1 << width).collect::<Vec<_>>());
            for (cell, i) in grid.iter() {
                assert_eq!(grid.position_of(i), Some(cell));
            }
        }
        assert!(Grid::new(1).is_err());
        assert!(Grid::new(7).is_err());
        Ok(())
    }

    #[test]
    fn single_bit_neighbors() -> Result<(), QmkitError> {
        for width in 2..=6 {
            let grid = Grid::new(width)?;
            for index in 0..1usize << width {
                for bit in 0..width {
                    assert!(grid.are_adjacent(index, index ^ (1 << bit)));
                }
                let cell = grid.position_of(index).unwrap();
                let neighbors = grid.neighbors(cell);
                assert_eq!(neighbors.len(), width);
                for n in neighbors {
                    let other = grid.index_at(n).unwrap();
                    assert_eq!((index ^ other).count_ones(), 1);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn tiles() -> Result<(), QmkitError> {
        let grid = Grid::new(6)?;
        // The two first variables select the tile, in Gray order
        assert_eq!(grid.position_of(0b000000).unwrap().tile, 0);
        assert_eq!(grid.position_of(0b010000).unwrap().tile, 1);
        assert_eq!(grid.position_of(0b110000).unwrap().tile, 2);
        assert_eq!(grid.position_of(0b100000).unwrap().tile, 3);
        // first and last tiles are adjacent
        assert!(grid.are_adjacent(0b000101, 0b100101));
        assert!(!grid.are_adjacent(0b000101, 0b110101));
        Ok(())
    }

    #[test]
    fn groups() -> Result<(), QmkitError> {
        let grid = Grid::new(4)?;
        // corners of the map
        assert!(grid.is_group(&"-0-0".parse()?));
        assert!(grid.cells_of(&"-0-0".parse()?).len() == 4);

        let diagonal: BitSet = [0, 5].into_iter().collect();
        assert!(!grid.is_valid_group(&diagonal));
        let three: BitSet = [0, 1, 3].into_iter().collect();
        assert!(!grid.is_valid_group(&three));

        for width in 2..=6 {
            let grid = Grid::new(width)?;
            let table = TruthTable::new(
                VarSpace::alphabetic(width)?,
                (0..1 << width).filter(|i| i % 3 != 0 && i % 7 != 1),
                [],
            )?;
            for p in &Primes::from_table(&table)? {
                assert!(grid.is_group(p.cube()));
            }
        }
        Ok(())
    }

    #[test]
    fn display() -> Result<(), QmkitError> {
        let table = TruthTable::from_output_str(VarSpace::alphabetic(3)?, "0111 X001")?;
        let grid = Grid::from_table(&table)?;
        assert_eq!(grid.output_at(Cell::new(0, 0, 0)), Some(Output::Zero));
        assert_eq!(grid.output_at(Cell::new(0, 3, 0)), Some(Output::DontCare));
        assert_eq!(
            format!("{}", grid),
            "   | 0 1\n00 | 0 1\n01 | 1 1\n11 | 0 1\n10 | X 0\n"
        );
        Ok(())
    }
}
