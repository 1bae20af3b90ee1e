use rand::Rng;
use rand::seq::SliceRandom;

use super::{
    rail::RailMap,
    state::{Position, Snake},
};

/// Picks a rail cell not covered by the snake, uniformly at random.
///
/// Returns `None` when the snake covers every rail cell.
pub fn spawn_food<R: Rng + ?Sized>(
    rail_map: &RailMap,
    snake: &Snake,
    rng: &mut R,
) -> Option<Position> {
    let free: Vec<Position> = rail_map
        .rail_cells()
        .filter(|pos| !snake.occupies(*pos))
        .collect();

    free.choose(rng).copied()
}
