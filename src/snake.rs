use std::collections::VecDeque;

use crate::config::ConfigError;
use crate::geometry::{Direction::{self, *}, Point};

/// Upper bound on the length a snake may be created with.
pub const MAX_SNAKE_LENGTH: usize = 1000;

/// The snake's segments, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    capacity: usize,
}

impl Snake {
    /// Builds a horizontal snake heading right, with its head at `head` and the
    /// rest of the body extending to the left.
    pub fn new(head: Point, length: usize, capacity: usize) -> Result<Self, ConfigError> {
        let max = MAX_SNAKE_LENGTH.min(capacity);
        if length == 0 || length > max {
            return Err(ConfigError::SnakeLength { length, max });
        }

        let body = (0..length as i32)
            .map(|i| Point::new(head.x - i, head.y))
            .collect();
        Ok(Snake { body, direction: Right, capacity })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes the heading unless it would turn the snake back onto itself.
    /// Returns whether the heading was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    pub fn hit_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|p| *p == head)
    }

    /// Moves the head to `new_head`. The tail is dropped and returned unless the
    /// snake grows this step; growth stops at capacity.
    pub fn advance(&mut self, new_head: Point, grow: bool) -> Option<Point> {
        self.body.push_front(new_head);

        if grow && self.body.len() <= self.capacity {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snake_extends_left_of_the_head() {
        let snake = Snake::new(Point::new(25, 7), 3, 750).unwrap();
        let body: Vec<Point> = snake.segments().collect();
        assert_eq!(body, vec![Point::new(25, 7), Point::new(24, 7), Point::new(23, 7)]);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.tail(), Point::new(23, 7));
    }

    #[test]
    fn invalid_lengths_are_refused() {
        assert!(Snake::new(Point::new(5, 5), 0, 100).is_err());
        assert_eq!(
            Snake::new(Point::new(5, 5), MAX_SNAKE_LENGTH + 1, 5000).unwrap_err(),
            ConfigError::SnakeLength { length: MAX_SNAKE_LENGTH + 1, max: MAX_SNAKE_LENGTH }
        );
        assert!(Snake::new(Point::new(5, 5), 11, 10).is_err());
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new(Point::new(5, 5), 5, 100).unwrap();
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.direction(), Right);
        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Down));
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn advance_shifts_the_body() {
        let mut snake = Snake::new(Point::new(5, 5), 3, 100).unwrap();
        let dropped = snake.advance(Point::new(6, 5), false);
        assert_eq!(dropped, Some(Point::new(3, 5)));
        let body: Vec<Point> = snake.segments().collect();
        assert_eq!(body, vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]);
    }

    #[test]
    fn growth_adds_exactly_one_segment_up_to_capacity() {
        let mut snake = Snake::new(Point::new(5, 5), 3, 4).unwrap();
        assert_eq!(snake.advance(Point::new(6, 5), true), None);
        assert_eq!(snake.len(), 4);

        assert_eq!(snake.advance(Point::new(7, 5), true), Some(Point::new(3, 5)));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn self_hit_is_stable_across_calls() {
        let mut snake = Snake::new(Point::new(5, 5), 5, 100).unwrap();
        assert!(!snake.hit_itself());
        assert!(!snake.hit_itself());

        // Turn up, left, then down onto the (4, 5) segment.
        snake.advance(Point::new(5, 4), false);
        snake.advance(Point::new(4, 4), false);
        snake.advance(Point::new(4, 5), false);
        assert!(snake.hit_itself());
        assert!(snake.hit_itself());
    }
}
