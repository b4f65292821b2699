//! Collision-free entity placement
//!
//! Random sampling first, then a deterministic row-major scan once the
//! sampling budget runs out.

use std::collections::HashSet;

use rand::Rng;

use super::state::{BoardSize, Entities, Position};
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::error::SimError;

/// Return a cell holding neither the player nor any entity.
///
/// Fails with [`SimError::BoardFull`] when no such cell exists.
pub fn place_random<R: Rng>(
    rng: &mut R,
    board: BoardSize,
    player: Position,
    entities: &Entities,
) -> Result<Position, SimError> {
    let occupied: HashSet<Position> = std::iter::once(player).chain(entities.iter()).collect();

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = Position::new(
            rng.random_range(0..board.width),
            rng.random_range(0..board.height),
        );
        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }

    log::warn!(
        "Placement budget exhausted ({} occupied of {}), scanning",
        occupied.len(),
        board.cell_count()
    );
    (0..board.height)
        .flat_map(|y| (0..board.width).map(move |x| Position::new(x, y)))
        .find(|pos| !occupied.contains(pos))
        .ok_or(SimError::BoardFull {
            width: board.width,
            height: board.height,
        })
}
