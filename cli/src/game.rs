use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Result, bail};
use hatfield_core::*;
use rand::Rng;

const DIFFICULTY_PROMPT: &str = "Which difficulty would you like to play? ";
const MOVE_PROMPT: &str = "In which direction would you like to move? ";
const REPLAY_PROMPT: &str = "Play again? ";

#[derive(Copy, Clone, Debug, PartialEq)]
enum Replay {
    Yes,
    No,
}

impl FromStr for Replay {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Self::Yes),
            "n" | "no" => Ok(Self::No),
            _ => Err(ParseTokenError),
        }
    }
}

/// Console front end: prompts on `output`, reads answers line by line from `input`.
pub struct Game<I, O, R> {
    input: I,
    output: O,
    config: FieldConfig,
    difficulty: Option<Difficulty>,
    rng: R,
}

impl<I: BufRead, O: Write, R: Rng> Game<I, O, R> {
    pub fn new(input: I, output: O, config: FieldConfig, difficulty: Option<Difficulty>, rng: R) -> Self {
        Self {
            input,
            output,
            config,
            difficulty,
            rng,
        }
    }

    /// Plays games until the player declines a replay.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let state = self.play_round()?;
            log::info!("Round ended: {:?}", state);
            writeln!(self.output, "\nGame over\n")?;

            if self.prompt_parse::<Replay>(REPLAY_PROMPT)? == Replay::No {
                return Ok(());
            }
        }
    }

    fn play_round(&mut self) -> Result<GameState> {
        let difficulty = match self.difficulty {
            Some(difficulty) => difficulty,
            None => self.prompt_parse(DIFFICULTY_PROMPT)?,
        };

        let mut session = GameSession::generate(self.config, difficulty, &mut self.rng)?;
        log::info!(
            "New {:?} game on a {}x{} field, start {:?}",
            difficulty,
            self.config.size.0,
            self.config.size.1,
            session.position()
        );

        writeln!(self.output, "Current field:")?;
        self.print_board(&session)?;

        loop {
            let direction = self.prompt_parse(MOVE_PROMPT)?;
            match session.step(direction, &mut self.rng)? {
                MoveOutcome::Moved => self.print_board(&session)?,
                MoveOutcome::Won => {
                    writeln!(self.output, "\nYou found your hat!\nYou win the game!")?;
                    return Ok(session.state());
                }
                MoveOutcome::FellInHazard => {
                    writeln!(self.output, "\nYou fell in a hole!\nYou lose")?;
                    return Ok(session.state());
                }
                MoveOutcome::OutOfBounds => {
                    writeln!(self.output, "\nYou moved out of bounds!\nYou lose")?;
                    return Ok(session.state());
                }
            }
        }
    }

    fn print_board(&mut self, session: &GameSession) -> Result<()> {
        for row in session.render() {
            writeln!(self.output, "{row}")?;
        }
        Ok(())
    }

    /// Asks until the answer parses; bad answers print `Invalid input` and cost nothing.
    fn prompt_parse<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            let line = self.prompt(prompt)?;
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    log::debug!("Rejected input {:?}", line.trim());
                    writeln!(self.output, "Invalid input")?;
                }
            }
        }
    }

    fn prompt(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line)
    }
}
