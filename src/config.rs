use std::time::Duration;

use thiserror::Error;

use crate::geometry::Board;
use crate::snake::MAX_SNAKE_LENGTH;
use crate::TermInt;

pub const MIN_BOARD_SIZE: TermInt = 10;
pub const MAX_BOARD_SIZE: TermInt = 50;

pub const DEFAULT_WIDTH: TermInt = 50;
pub const DEFAULT_HEIGHT: TermInt = 15;
pub const DEFAULT_SNAKE_LENGTH: usize = 3;
pub const DEFAULT_TICK_MS: u64 = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board width must be between {min} and {max}, got {0}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    BoardWidth(TermInt),

    #[error("board height must be between {min} and {max}, got {0}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    BoardHeight(TermInt),

    #[error("initial snake length must be between 1 and {max}, got {length}")]
    SnakeLength { length: usize, max: usize },

    #[error("tick delay must be at least 1ms")]
    TickDelay,
}

/// Everything needed to start a session. Checked once, before the terminal is touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: TermInt,
    pub height: TermInt,
    pub initial_length: usize,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_length: DEFAULT_SNAKE_LENGTH,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Longest snake that can start centred on this board: it extends leftward
    /// from the middle column and has to stay on the board.
    pub fn max_initial_length(&self) -> usize {
        MAX_SNAKE_LENGTH.min(self.width as usize / 2 + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_range = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !size_range.contains(&self.width) {
            return Err(ConfigError::BoardWidth(self.width));
        }
        if !size_range.contains(&self.height) {
            return Err(ConfigError::BoardHeight(self.height));
        }

        let max = self.max_initial_length();
        if self.initial_length == 0 || self.initial_length > max {
            return Err(ConfigError::SnakeLength { length: self.initial_length, max });
        }

        if self.tick.is_zero() {
            return Err(ConfigError::TickDelay);
        }

        Ok(())
    }
}
