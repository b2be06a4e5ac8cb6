use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::{ConfigError, GameConfig};
use crate::food::generate_food;
use crate::geometry::{Board, Direction, Point};
use crate::snake::Snake;

/// Score awarded for each piece of food eaten.
pub const FOOD_SCORE: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    BoardFilled,
}

impl EndReason {
    pub fn is_win(self) -> bool {
        self == EndReason::BoardFilled
    }

    pub fn message(self) -> &'static str {
        match self {
            EndReason::WallCollision => "You hit the wall.",
            EndReason::SelfCollision => "You ran into yourself.",
            EndReason::BoardFilled => "You filled the board.",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(EndReason),
}

/// What a single tick did, for the caller to react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { score: u32 },
    Ended(EndReason),
}

/// Final result of a finished session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub reason: EndReason,
    pub score: u32,
    pub length: usize,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = if self.reason.is_win() { "You won!" } else { "Game over!" };
        write!(f, "{} {} Final score: {}", headline, self.reason, self.score)
    }
}

/// One game session: the board, the snake, the food and the score.
///
/// `tick` is the only thing that changes it. Once the session is over it stays
/// over and further ticks are no-ops.
pub struct GameState<R = StdRng> {
    board: Board,
    snake: Snake,
    food: Option<Point>,
    score: u32,
    status: Status,
    ticks: u64,
    rng: R,
}

impl GameState<StdRng> {
    /// Starts a session seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameState::new(config, rng)
    }
}

impl<R: Rng> GameState<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let board = config.board();
        let snake = Snake::new(board.center(), config.initial_length, board.area())?;
        let food = generate_food(board, &snake, &mut rng);
        let status = match food {
            Some(_) => Status::Running,
            None => Status::Over(EndReason::BoardFilled),
        };

        info!(
            "New {}x{} session, snake of length {} at {}",
            board.width, board.height, snake.len(), snake.head()
        );

        Ok(GameState { board, snake, food, score: 0, status, ticks: 0, rng })
    }

    pub fn tick(&mut self, input: Option<Direction>) -> TickOutcome {
        if let Status::Over(reason) = self.status {
            return TickOutcome::Ended(reason);
        }
        self.ticks += 1;

        if let Some(direction) = input {
            if !self.snake.set_direction(direction) {
                trace!("Ignoring reversal to {:?}", direction);
            }
        }

        let new_head = self.snake.head().step(self.snake.direction());
        if !self.board.contains(new_head) {
            return self.end(EndReason::WallCollision);
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);
        debug!("Tick {}: head at {}", self.ticks, new_head);

        if self.snake.hit_itself() {
            return self.end(EndReason::SelfCollision);
        }

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += FOOD_SCORE;
        info!("Ate food at {}. Score: {}, length: {}", new_head, self.score, self.snake.len());

        self.food = generate_food(self.board, &self.snake, &mut self.rng);
        if self.food.is_none() {
            return self.end(EndReason::BoardFilled);
        }
        TickOutcome::Ate { score: self.score }
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        info!("Session over after {} ticks: {:?}, score {}", self.ticks, reason, self.score);
        self.status = Status::Over(reason);
        TickOutcome::Ended(reason)
    }
}

impl<R> GameState<R> {
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn summary(&self) -> Option<GameSummary> {
        match self.status {
            Status::Running => None,
            Status::Over(reason) => Some(GameSummary { reason, score: self.score, length: self.snake.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;

    fn config(width: u16, height: u16, initial_length: usize) -> GameConfig {
        GameConfig { width, height, initial_length, ..GameConfig::default() }
    }

    fn state(width: u16, height: u16, initial_length: usize) -> GameState {
        GameState::new(&config(width, height, initial_length), StdRng::seed_from_u64(3)).unwrap()
    }

    fn body(state: &GameState) -> Vec<Point> {
        state.snake.segments().collect()
    }

    #[test]
    fn one_tick_moves_right_and_body_follows() {
        let mut state = state(50, 15, 3);
        state.food = Some(Point::new(0, 0));
        assert_eq!(body(&state), vec![Point::new(25, 7), Point::new(24, 7), Point::new(23, 7)]);

        assert_eq!(state.tick(None), TickOutcome::Moved);
        assert_eq!(body(&state), vec![Point::new(26, 7), Point::new(25, 7), Point::new(24, 7)]);
        assert!(state.is_running());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn leaving_the_board_ends_with_wall_collision() {
        let mut state = state(20, 10, 3);
        state.food = Some(Point::new(19, 9));
        state.snake = Snake::new(Point::new(2, 4), 3, 200).unwrap();
        state.tick(Some(Up));
        state.tick(Some(Left));
        state.tick(None);
        assert_eq!(state.snake.head(), Point::new(0, 3));

        assert_eq!(state.tick(None), TickOutcome::Ended(EndReason::WallCollision));
        assert_eq!(state.status(), Status::Over(EndReason::WallCollision));
        assert_eq!(state.snake.head(), Point::new(0, 3));
        assert!(state.snake.segments().all(|p| state.board.contains(p)));
    }

    #[test]
    fn reversal_keeps_heading_and_avoids_self_collision() {
        let mut state = state(20, 10, 5);
        state.food = Some(Point::new(0, 0));

        assert_eq!(state.tick(Some(Left)), TickOutcome::Moved);
        assert_eq!(state.snake.direction(), Right);
        assert_eq!(state.snake.head(), Point::new(11, 5));
        assert!(state.is_running());
    }

    #[test]
    fn eating_grows_by_one_and_scores_ten() {
        let mut state = state(20, 10, 3);
        let next = state.snake.head().step(Right);
        state.food = Some(next);

        assert_eq!(state.tick(None), TickOutcome::Ate { score: FOOD_SCORE });
        assert_eq!(state.score(), 10);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), next);

        let food = state.food().unwrap();
        assert!(!state.snake.occupies(food));
        assert!(state.board.contains(food));
    }

    #[test]
    fn length_never_decreases() {
        let mut state = state(30, 30, 4);
        let mut last = state.snake.len();
        let turns = [Down, Down, Left, Left, Up, Right];
        for (i, turn) in turns.iter().cycle().take(200).enumerate() {
            let input = if i % 3 == 0 { Some(*turn) } else { None };
            state.tick(input);
            assert!(state.snake.len() >= last);
            last = state.snake.len();
            if let Some(food) = state.food() {
                assert!(!state.snake.occupies(food));
            }
        }
    }

    #[test]
    fn running_into_the_body_ends_with_self_collision() {
        let mut state = state(20, 10, 5);
        state.food = Some(Point::new(0, 0));

        state.tick(Some(Up));
        state.tick(Some(Left));
        assert_eq!(state.tick(Some(Down)), TickOutcome::Ended(EndReason::SelfCollision));
        assert!(state.snake.hit_itself());
        assert_eq!(state.summary().unwrap().reason, EndReason::SelfCollision);
    }

    #[test]
    fn chasing_the_tail_is_allowed() {
        let mut state = state(20, 10, 4);
        state.food = Some(Point::new(0, 0));

        // A length-4 snake turning in a tight square re-enters the cell its tail just left.
        for turn in [Up, Left, Down, Right, Up, Left, Down] {
            assert_eq!(state.tick(Some(turn)), TickOutcome::Moved);
        }
        assert!(state.is_running());
    }

    #[test]
    fn finished_session_ignores_further_ticks() {
        let mut state = state(10, 10, 3);
        state.food = Some(Point::new(0, 0));
        while state.is_running() {
            state.tick(None);
        }
        let snapshot = body(&state);
        let ticks = state.ticks();

        assert_eq!(state.tick(Some(Up)), TickOutcome::Ended(EndReason::WallCollision));
        assert_eq!(body(&state), snapshot);
        assert_eq!(state.ticks(), ticks);
    }

    #[test]
    fn eating_the_last_free_cell_wins() {
        let mut state = state(10, 10, 1);
        let board = state.board;
        let (w, h) = (board.width as i32, board.height as i32);
        let path: Vec<Point> = (0..h)
            .flat_map(|y| (0..w).map(move |x| if y % 2 == 0 { Point::new(x, y) } else { Point::new(w - 1 - x, y) }))
            .collect();

        // Cover all but the last two cells, heading onto the second to last one.
        let mut snake = Snake::new(path[0], 1, board.area()).unwrap();
        for p in &path[1..path.len() - 2] {
            snake.advance(*p, true);
        }
        // New snakes head right; turn through Down to face left along the last row.
        snake.set_direction(Down);
        snake.set_direction(Left);
        state.snake = snake;
        state.food = Some(path[path.len() - 2]);

        assert_eq!(state.tick(None), TickOutcome::Ate { score: 10 });
        state.food = Some(path[path.len() - 1]);
        assert_eq!(state.tick(None), TickOutcome::Ended(EndReason::BoardFilled));
        assert_eq!(state.food(), None);
        assert!(state.summary().unwrap().reason.is_win());
    }

    #[test]
    fn summary_distinguishes_wall_and_self() {
        let wall = GameSummary { reason: EndReason::WallCollision, score: 30, length: 6 };
        assert_eq!(wall.to_string(), "Game over! You hit the wall. Final score: 30");
        let own = GameSummary { reason: EndReason::SelfCollision, score: 0, length: 3 };
        assert_eq!(own.to_string(), "Game over! You ran into yourself. Final score: 0");
    }

    #[test]
    fn invalid_config_never_starts() {
        let result = GameState::new(&config(5, 15, 3), StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(ConfigError::BoardWidth(5))));
    }
}
