use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Content of a single field cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Target,
    Hazard,
    Visited,
}

impl Cell {
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '░',
            Self::Target => '^',
            Self::Hazard => 'O',
            Self::Visited => '*',
        }
    }

    pub const fn from_glyph(glyph: char) -> Result<Self> {
        match glyph {
            '░' => Ok(Self::Empty),
            '^' => Ok(Self::Target),
            'O' => Ok(Self::Hazard),
            '*' => Ok(Self::Visited),
            other => Err(GameError::UnknownGlyph(other)),
        }
    }

    /// Whether the player can stand on this cell without ending the game.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Empty | Self::Visited)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
