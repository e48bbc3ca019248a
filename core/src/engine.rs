use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::sample_empty_cell;
use crate::types::apply_delta;
use crate::*;

/// Accepted moves between two hazard injections in hard mode.
pub const HAZARD_INTERVAL: u8 = 3;

/// Random draws a hard-mode injection may spend looking for an empty cell.
pub const HAZARD_INJECTION_ATTEMPTS: u32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    LostHazard,
    LostBounds,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::LostHazard | Self::LostBounds)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of a single move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Won,
    FellInHazard,
    OutOfBounds,
}

impl MoveOutcome {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Moved)
    }

    pub const fn state(self) -> GameState {
        match self {
            Self::Moved => GameState::InProgress,
            Self::Won => GameState::Won,
            Self::FellInHazard => GameState::LostHazard,
            Self::OutOfBounds => GameState::LostBounds,
        }
    }
}

/// One game from generation until the player wins or loses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    field: Field,
    position: Coord2,
    difficulty: Difficulty,
    move_counter: u8,
    state: GameState,
    last_injected_hazard: Option<Coord2>,
}

impl GameSession {
    /// Starts a session on `field` with the player standing on `start`, which is
    /// marked visited.
    pub fn new(field: Field, start: Coord2, difficulty: Difficulty) -> Result<Self> {
        let mut field = field;
        let start = field.validate_coords(start)?;
        if !field[start].is_walkable() {
            return Err(GameError::StartNotWalkable);
        }
        field[start] = Cell::Visited;

        Ok(Self {
            field,
            position: start,
            difficulty,
            move_counter: 0,
            state: GameState::InProgress,
            last_injected_hazard: None,
        })
    }

    pub fn from_generated(generated: GeneratedField, difficulty: Difficulty) -> Result<Self> {
        Self::new(generated.field, generated.start, difficulty)
    }

    /// Generates a fresh field and starts a session on it.
    pub fn generate<R: Rng + ?Sized>(
        config: FieldConfig,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Self> {
        Self::from_generated(generate_field(config, rng)?, difficulty)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Accepted moves since the session started, or since the last hazard
    /// injection in hard mode.
    pub fn move_counter(&self) -> u8 {
        self.move_counter
    }

    /// Hazard added by the most recent move, if that move triggered one.
    pub fn last_injected_hazard(&self) -> Option<Coord2> {
        self.last_injected_hazard
    }

    pub fn render(&self) -> Vec<String> {
        self.field.render()
    }

    pub fn step<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Result<MoveOutcome> {
        self.check_not_finished()?;
        self.last_injected_hazard = None;

        let Some(next) = apply_delta(self.position, direction.delta(), self.field.size()) else {
            log::debug!("Move {:?} from {:?} leaves the field", direction, self.position);
            return Ok(self.finish(MoveOutcome::OutOfBounds));
        };

        let outcome = match self.field[next] {
            Cell::Hazard => MoveOutcome::FellInHazard,
            Cell::Target => MoveOutcome::Won,
            Cell::Empty | Cell::Visited => {
                self.field[next] = Cell::Visited;
                self.position = next;
                self.move_counter = self.move_counter.saturating_add(1);

                if self.difficulty.injects_hazards() && self.move_counter >= HAZARD_INTERVAL {
                    self.last_injected_hazard = inject_hazard(&mut self.field, rng);
                    self.move_counter = 0;
                }
                return Ok(MoveOutcome::Moved);
            }
        };

        self.position = next;
        Ok(self.finish(outcome))
    }

    fn finish(&mut self, outcome: MoveOutcome) -> MoveOutcome {
        self.state = outcome.state();
        log::info!("Game finished: {:?} at {:?}", self.state, self.position);
        outcome
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Turns one random empty cell into a hazard. Gives up quietly once the draw budget
/// is spent, so a crowded field simply gets no new hazard.
fn inject_hazard<R: Rng + ?Sized>(field: &mut Field, rng: &mut R) -> Option<Coord2> {
    match sample_empty_cell(field, rng, HAZARD_INJECTION_ATTEMPTS) {
        Some(coords) => {
            field[coords] = Cell::Hazard;
            log::debug!("Injected hazard at {:?}", coords);
            Some(coords)
        }
        None => {
            log::debug!(
                "No empty cell found in {} draws, skipping hazard",
                HAZARD_INJECTION_ATTEMPTS
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::Direction::*;

    fn session(rows: &[&str], start: Coord2, difficulty: Difficulty) -> GameSession {
        GameSession::new(Field::from_rows(rows).unwrap(), start, difficulty).unwrap()
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xfeed)
    }

    #[test]
    fn two_cell_field_right_wins() {
        let mut game = session(&["░^"], (0, 0), Difficulty::Easy);

        assert_eq!(game.step(Right, &mut rng()).unwrap(), MoveOutcome::Won);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.position(), (0, 1));
    }

    #[test]
    fn two_cell_field_other_directions_leave_bounds() {
        for direction in [Left, Up, Down] {
            let mut game = session(&["░^"], (0, 0), Difficulty::Easy);

            assert_eq!(game.step(direction, &mut rng()).unwrap(), MoveOutcome::OutOfBounds);
            assert_eq!(game.state(), GameState::LostBounds);
            assert_eq!(game.position(), (0, 0));
        }
    }

    #[test]
    fn path_around_hazard_reaches_target() {
        let mut game = session(&["*░░", "░O░", "░░^"], (0, 0), Difficulty::Easy);
        let mut rng = rng();

        assert_eq!(game.step(Right, &mut rng).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.step(Right, &mut rng).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.step(Down, &mut rng).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.step(Down, &mut rng).unwrap(), MoveOutcome::Won);
        assert_eq!(game.field().render(), ["***", "░O*", "░░^"]);
    }

    #[test]
    fn path_through_hazard_loses() {
        let mut game = session(&["*░░", "░O░", "░░^"], (0, 0), Difficulty::Easy);
        let mut rng = rng();

        assert_eq!(game.step(Down, &mut rng).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.step(Right, &mut rng).unwrap(), MoveOutcome::FellInHazard);
        assert_eq!(game.state(), GameState::LostHazard);
        assert!(game.state().is_lost());
        assert_eq!(game.position(), (1, 1));
    }

    #[test]
    fn accepted_move_marks_path_and_counts() {
        let mut game = session(&["░░░", "░░^"], (0, 0), Difficulty::Easy);
        let mut rng = rng();

        game.step(Right, &mut rng).unwrap();
        game.step(Left, &mut rng).unwrap();

        assert_eq!(game.position(), (0, 0));
        assert_eq!(game.field()[(0, 1)], Cell::Visited);
        assert_eq!(game.move_counter(), 2);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn finished_session_rejects_moves() {
        let mut game = session(&["░^"], (0, 0), Difficulty::Easy);
        let mut rng = rng();
        game.step(Up, &mut rng).unwrap();
        let before = game.clone();

        assert_eq!(game.step(Right, &mut rng), Err(GameError::AlreadyEnded));
        assert_eq!(game, before);
    }

    #[test]
    fn start_must_be_walkable_and_inside() {
        let field = Field::from_rows(&["O^"]).unwrap();

        assert_eq!(
            GameSession::new(field.clone(), (0, 0), Difficulty::Easy),
            Err(GameError::StartNotWalkable)
        );
        assert_eq!(
            GameSession::new(field, (3, 0), Difficulty::Easy),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn render_is_idempotent() {
        let game = GameSession::generate(FieldConfig::default(), Difficulty::Easy, &mut rng()).unwrap();

        assert_eq!(game.render(), game.render());
        assert_eq!(game.render().len(), 10);
        assert!(game.render().iter().all(|row| row.chars().count() == 20));
    }

    #[test]
    fn hard_mode_injects_after_three_moves() {
        let mut game = session(&["░░░░░░", "░░░░░░", "░░░░░^"], (0, 0), Difficulty::Hard);
        let mut rng = rng();

        for expected in [1, 2] {
            game.step(Right, &mut rng).unwrap();
            assert_eq!(game.move_counter(), expected);
            assert_eq!(game.last_injected_hazard(), None);
            assert_eq!(game.field().count(Cell::Hazard), 0);
        }

        assert_eq!(game.step(Right, &mut rng).unwrap(), MoveOutcome::Moved);
        assert_eq!(game.move_counter(), 0);
        let injected = game.last_injected_hazard().expect("six empty cells stay free");
        assert_eq!(game.field()[injected], Cell::Hazard);
        assert_eq!(game.field().count(Cell::Hazard), 1);
        assert_eq!(game.field().count(Cell::Target), 1);
        assert_eq!(game.field().count(Cell::Visited), 4);
    }

    #[test]
    fn easy_mode_never_injects() {
        let mut game = session(&["░░░░░░", "░░░░░^"], (0, 0), Difficulty::Easy);
        let mut rng = rng();

        for _ in 0..5 {
            game.step(Right, &mut rng).unwrap();
        }

        assert_eq!(game.move_counter(), 5);
        assert_eq!(game.field().count(Cell::Hazard), 0);
    }

    #[test]
    fn injection_never_overwrites_occupied_cells() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut game = session(&["░░░░", "░OO░", "░O^░"], (0, 0), Difficulty::Hard);
            let mut hazards = game.field().count(Cell::Hazard);

            for direction in [Right, Right, Right, Down, Down, Left] {
                if game.step(direction, &mut rng).unwrap().is_finished() {
                    break;
                }
                if let Some(coords) = game.last_injected_hazard() {
                    hazards += 1;
                    assert_ne!(coords, game.position());
                }
                assert_eq!(game.field().count(Cell::Hazard), hazards);
                assert_eq!(game.field().count(Cell::Target), 1);
            }
        }
    }

    #[test]
    fn injection_gives_up_on_crowded_field() {
        let mut field = Field::from_rows(&["*░O", "OOO", "OO^"]).unwrap();
        let mut rng = rng();

        // the lone empty cell may or may not be hit within the draw budget
        let injected = inject_hazard(&mut field, &mut rng);
        assert!(injected.is_none() || injected == Some((0, 1)));

        let mut full = Field::from_rows(&["*O", "O^"]).unwrap();
        assert_eq!(inject_hazard(&mut full, &mut rng), None);
        assert_eq!(full.count(Cell::Hazard), 2);
    }
}
