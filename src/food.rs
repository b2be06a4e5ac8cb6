use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::geometry::{Board, Point};
use crate::snake::Snake;

/// Random draws tried before falling back to picking among the free cells.
pub const MAX_FOOD_SAMPLES: usize = 64;

/// Picks a uniformly random free cell for the next piece of food.
///
/// Sampling the whole board is cheap while the snake is short, but stalls as it
/// fills up, so after [`MAX_FOOD_SAMPLES`] misses the free cells are listed and
/// one is chosen directly. Returns `None` when the snake covers the board.
pub fn generate_food<R: Rng + ?Sized>(board: Board, snake: &Snake, rng: &mut R) -> Option<Point> {
    if snake.len() >= board.area() {
        return None;
    }

    for _ in 0..MAX_FOOD_SAMPLES {
        let candidate = Point::new(
            rng.gen_range(0..board.width as i32),
            rng.gen_range(0..board.height as i32),
        );
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Point> = board.cells().filter(|p| !snake.occupies(*p)).collect();
    debug!("Food sampling missed {} times, choosing among {} free cells", MAX_FOOD_SAMPLES, free.len());
    free.choose(rng).copied()
}
