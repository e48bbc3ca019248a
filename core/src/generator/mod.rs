use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Random draws tried before falling back to scanning for empty cells.
const SAMPLE_ATTEMPTS: u32 = 64;

pub trait FieldGenerator {
    fn generate(self, config: FieldConfig) -> Result<GeneratedField>;
}

/// A freshly generated field together with the player's starting cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedField {
    pub field: Field,
    pub start: Coord2,
}

/// Draws a uniformly random cell, at most `attempts` times, until one is empty.
pub(crate) fn sample_empty_cell<R: Rng + ?Sized>(
    field: &Field,
    rng: &mut R,
    attempts: u32,
) -> Option<Coord2> {
    let (rows, columns) = field.size();
    (0..attempts)
        .map(|_| (rng.random_range(0..rows), rng.random_range(0..columns)))
        .find(|&coords| field[coords] == Cell::Empty)
}

/// Picks a uniformly random empty cell. Never loops forever: after a bounded number
/// of blind draws it counts the empty cells and picks one of them directly.
pub(crate) fn pick_empty_cell<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> Option<Coord2> {
    if let Some(coords) = sample_empty_cell(field, rng, SAMPLE_ATTEMPTS) {
        return Some(coords);
    }

    let free = field.count(Cell::Empty);
    if free == 0 {
        return None;
    }
    log::warn!(
        "Sampling found no empty cell after {} draws, scanning {} free cells",
        SAMPLE_ATTEMPTS,
        free
    );
    let nth = rng.random_range(0..free);
    field.positions_of(Cell::Empty).nth(nth.into())
}
