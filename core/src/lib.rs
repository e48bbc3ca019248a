#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Field dimensions and hazard density used to generate a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub size: Coord2,
    pub hazard_percent: u8,
}

impl FieldConfig {
    pub const fn new_unchecked(size: Coord2, hazard_percent: u8) -> Self {
        Self {
            size,
            hazard_percent,
        }
    }

    pub fn new(size: Coord2, hazard_percent: u8) -> Result<Self> {
        let config = Self::new_unchecked(size, hazard_percent);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, columns) = self.size;
        if rows == 0 || columns == 0 || self.total_cells() < 2 {
            return Err(GameError::FieldTooSmall);
        }
        if self.hazard_percent > 100 {
            return Err(GameError::InvalidHazardPercent(self.hazard_percent));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Hazards to place, as a percentage of the cells left after start and target,
    /// rounded half up.
    pub const fn hazard_count(&self) -> CellCount {
        let free = self.total_cells().saturating_sub(2) as u32;
        let scaled = self.hazard_percent as u32 * free;
        ((scaled * 2 + 100) / 200) as CellCount
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 20), 30)
    }
}

/// The playing area: a rectangular grid of cells indexed by `(row, column)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    cells: Array2<Cell>,
}

impl Field {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), Cell::Empty),
        }
    }

    /// Builds a field from rows of glyphs, e.g. `["*░", "O^"]`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let row_count = rows.len();
        let column_count = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .unwrap_or(0);

        if row_count == 0
            || column_count == 0
            || row_count > Coord::MAX.into()
            || column_count > Coord::MAX.into()
        {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Vec::with_capacity(row_count * column_count);
        for row in rows {
            let before = cells.len();
            for glyph in row.as_ref().chars() {
                cells.push(Cell::from_glyph(glyph)?);
            }
            if cells.len() - before != column_count {
                return Err(GameError::InvalidBoardShape);
            }
        }

        let cells = Array2::from_shape_vec((row_count, column_count), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        // construction never exceeds `Coord::MAX` on either axis
        (rows as Coord, columns as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn count(&self, cell: Cell) -> CellCount {
        self.cells
            .iter()
            .filter(|&&other| other == cell)
            .count() as CellCount
    }

    /// Coordinates of every cell equal to `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(move |&(_, &other)| other == cell)
            .map(|((row, column), _)| (row as Coord, column as Coord))
    }

    /// One string per row, each cell drawn with its glyph.
    pub fn render(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }
}

impl Index<Coord2> for Field {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Field {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.rows().into_iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row.iter() {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}
