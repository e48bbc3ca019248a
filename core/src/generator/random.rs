use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;
use crate::types::index_to_coords;

/// Generation strategy that places the start, the target and every hazard on
/// uniformly random empty cells, driven by a seeded generator.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomFieldGenerator {
    seed: u64,
}

impl RandomFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: FieldConfig) -> Result<GeneratedField> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_field(config, &mut rng)
    }
}

/// Generates a field using the caller's random source.
pub fn generate_field<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Result<GeneratedField> {
    config.validate()?;

    let mut field = Field::new(config.size);
    let total_cells = config.total_cells();

    let start = index_to_coords(rng.random_range(0..total_cells), config.size.1);
    field[start] = Cell::Visited;

    // the start is no longer empty, so the target always lands elsewhere
    let target = pick_empty_cell(&field, rng).ok_or(GameError::FieldTooSmall)?;
    field[target] = Cell::Target;

    let hazard_count = config.hazard_count();
    for _ in 0..hazard_count {
        let coords = pick_empty_cell(&field, rng).ok_or(GameError::TooManyHazards)?;
        field[coords] = Cell::Hazard;
    }

    log::debug!(
        "Generated {}x{} field, start {:?}, target {:?}, {} hazards",
        config.size.0,
        config.size.1,
        start,
        target,
        hazard_count
    );

    Ok(GeneratedField { field, start })
}
