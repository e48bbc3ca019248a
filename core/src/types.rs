use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::ParseTokenError;

/// Single coordinate axis used for field rows, columns, and positions.
pub type Coord = u8;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Maps a row-major linear index back to coordinates on a field `columns` wide.
pub(crate) const fn index_to_coords(index: CellCount, columns: Coord) -> Coord2 {
    let columns = columns as CellCount;
    ((index / columns) as Coord, (index % columns) as Coord)
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, column) = coords;
    let (d_row, d_column) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_column = column.checked_add_signed(d_column)?;
    if next_column >= columns {
        return None;
    }

    Some((next_row, next_column))
}

fn token_matches(token: &str, names: &[&str]) -> bool {
    names.iter().any(|name| name.eq_ignore_ascii_case(token))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step as `(row, column)` offsets.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token_matches(token, &["u", "up"]) {
            Ok(Self::Up)
        } else if token_matches(token, &["d", "down"]) {
            Ok(Self::Down)
        } else if token_matches(token, &["l", "left"]) {
            Ok(Self::Left)
        } else if token_matches(token, &["r", "right"]) {
            Ok(Self::Right)
        } else {
            Err(ParseTokenError)
        }
    }
}

/// Whether hazards keep appearing while the game is played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub const fn injects_hazards(self) -> bool {
        matches!(self, Self::Hard)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl FromStr for Difficulty {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token_matches(token, &["e", "easy"]) {
            Ok(Self::Easy)
        } else if token_matches(token, &["h", "hard"]) {
            Ok(Self::Hard)
        } else {
            Err(ParseTokenError)
        }
    }
}
