use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Field needs at least two cells to hold a start and a target")]
    FieldTooSmall,
    #[error("Hazard percentage {0} is out of range (0-100)")]
    InvalidHazardPercent(u8),
    #[error("No empty cell left to place a hazard")]
    TooManyHazards,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown field glyph {0:?}")]
    UnknownGlyph(char),
    #[error("Start position must be on an empty or visited cell")]
    StartNotWalkable,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

/// Token that did not name any known command.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Invalid input")]
pub struct ParseTokenError;

pub type Result<T> = core::result::Result<T, GameError>;
