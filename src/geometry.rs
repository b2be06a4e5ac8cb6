use std::fmt;

use crate::TermInt;
use Direction::*;

/// A cell on the board.
///
/// Coordinates are signed so that a step off the top or left edge is still a
/// representable point, which the bounds check then rejects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }

    /// The neighbouring point one cell away in `direction`. No clamping is done.
    pub fn step(self, direction: Direction) -> Point {
        let (dx, dy) = direction.offset();
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }
}

/// Playing field dimensions, in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: TermInt,
    pub height: TermInt,
}

impl Board {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Board { width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.in_bounds(self.width as i32, self.height as i32)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Every cell of the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
    }
}
