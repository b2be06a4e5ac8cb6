//! Snake in the terminal: the board model and update step, a render buffer,
//! and a crossterm front end that drives them.

pub mod config;
pub mod food;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod snake;
pub mod state;
pub mod term;

pub type TermInt = u16;

pub use config::{ConfigError, GameConfig};
pub use geometry::{Board, Direction, Point};
pub use grid::{Cell, Grid};
pub use snake::Snake;
pub use state::{EndReason, GameState, GameSummary, Status, TickOutcome};
