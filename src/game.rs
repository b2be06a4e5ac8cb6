use std::{thread::sleep, time::{Duration, Instant}};

use crate::config::GameConfig;
use crate::geometry::Direction::{self, *};
use crate::grid::Grid;
use crate::state::{GameState, GameSummary, TickOutcome};
use crate::term::TermManager;

use anyhow::{ensure, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

const INPUT_POLL_MS: u64 = 5;

/// Rows drawn below the board: the score line.
const STATUS_ROWS: u16 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Esc => Some(Command::TogglePause),
        _ => None,
    }
}

/// How a single round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    Finished(GameSummary),
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    paused: bool,
    rounds: u64,
    term: TermManager,
    grid: Grid,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let term = TermManager::new()?;
        let (term_w, term_h) = term.get_terminal_size();
        let (need_w, need_h) = (config.width + 2, config.height + 2 + STATUS_ROWS);
        ensure!(
            term_w >= need_w && term_h >= need_h,
            "terminal is {}x{}, a {}x{} board needs at least {}x{}",
            term_w, term_h, config.width, config.height, need_w, need_h
        );

        let grid = Grid::new(config.board());
        Ok(SnakeGame { config, paused: false, rounds: 0, term, grid })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Plays rounds until the player quits. Returns the summary of the last
    /// finished round, if any.
    pub fn run(&mut self) -> Result<Option<GameSummary>> {
        if !self.show_intro()? {
            return Ok(None);
        }

        let mut last = None;
        loop {
            match self.play()? {
                RoundEnd::Quit => return Ok(last),
                RoundEnd::Finished(summary) => {
                    last = Some(summary);
                    // Quit if the user CTRL+C's after the game
                    if is_ctrl_c(&self.term.read_key_blocking()?) {
                        return Ok(last);
                    }
                }
            }
        }
    }

    /// Returns false if the player quit instead of starting.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(false);
        }

        self.term.hide_message()?;
        Ok(true)
    }

    pub fn play(&mut self) -> Result<RoundEnd> {
        self.term.clear()?;
        self.paused = false;

        let mut config = self.config.clone();
        config.seed = config.seed.map(|seed| seed.wrapping_add(self.rounds));
        self.rounds += 1;

        let mut state = GameState::from_config(&config)?;
        let mut dir_change: Option<Direction> = None;
        let mut last_step = Instant::now();

        self.render(&state)?;

        loop {
            sleep(Duration::from_millis(INPUT_POLL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(RoundEnd::Quit),
                    Some(Command::TogglePause) => self.toggle_pause()?,
                    Some(Command::Turn(dir)) => dir_change = Some(dir),
                    None => {}
                }
            }

            if self.paused {
                last_step = Instant::now();
                continue;
            }

            if last_step.elapsed() < self.config.tick {
                continue;
            }
            last_step = Instant::now();

            let outcome = state.tick(dir_change.take());
            self.render(&state)?;

            if let TickOutcome::Ended(_) = outcome {
                if let Some(summary) = state.summary() {
                    self.game_over(&summary)?;
                    return Ok(RoundEnd::Finished(summary));
                }
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn render(&mut self, state: &GameState) -> Result<()> {
        self.grid.redraw(state);
        self.term.draw_frame(&self.grid, state.score())
    }

    fn game_over(&mut self, summary: &GameSummary) -> Result<()> {
        info!("{}", summary);
        let s = if summary.reason.is_win() {"You won!"} else {"Game over!"};

        self.term.show_message(&[
            s,
            summary.reason.message(),
            &*format!("Score: {}", summary.score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or CTRL+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev.code, KeyCode::Char('c')) && ev.modifiers.contains(KeyModifiers::CONTROL)
}
