use crate::geometry::{Board, Direction, Point};
use crate::state::{GameState, Status};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const WRECK_CHAR: char = 'X';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    SnakeHead(Direction),
    SnakeBody,
    /// A segment of a snake that has crashed.
    Wreck,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Food => FOOD_CHAR,
            Cell::SnakeHead(Direction::Up) => '^',
            Cell::SnakeHead(Direction::Down) => 'v',
            Cell::SnakeHead(Direction::Left) => '<',
            Cell::SnakeHead(Direction::Right) => '>',
            Cell::SnakeBody => SNAKE_BODY_CHAR,
            Cell::Wreck => WRECK_CHAR,
        }
    }
}

/// The render buffer: one cell per board square, rebuilt from the game state
/// every tick and handed to the terminal for drawing.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(board: Board) -> Self {
        let (width, height) = (board.width as usize, board.height as usize);
        Grid { width, height, cells: vec![Cell::Empty; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.in_bounds(self.width as i32, self.height as i32) {
            Some(self.width * p.y as usize + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Writes a cell. Points off the grid are ignored.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    pub fn redraw<R>(&mut self, state: &GameState<R>) {
        self.clear();

        if let Some(food) = state.food() {
            self.set(food, Cell::Food);
        }

        let snake = state.snake();
        let crashed = matches!(state.status(), Status::Over(reason) if !reason.is_win());
        let body_cell = if crashed { Cell::Wreck } else { Cell::SnakeBody };

        for p in snake.segments().skip(1) {
            self.set(p, body_cell);
        }
        let head_cell = if crashed { Cell::Wreck } else { Cell::SnakeHead(snake.direction()) };
        self.set(snake.head(), head_cell);
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
    }

    /// The grid inside a `+---+` / `|...|` border.
    pub fn framed_lines(&self) -> Vec<String> {
        let edge = format!("+{}+", "-".repeat(self.width));

        let mut lines = Vec::with_capacity(self.height + 2);
        lines.push(edge.clone());
        lines.extend(self.rows().map(|row| format!("|{}|", row)));
        lines.push(edge);
        lines
    }
}
