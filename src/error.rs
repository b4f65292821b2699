//! Engine faults
//!
//! Everything recoverable (out-of-bounds moves, stray input) is a silent
//! no-op inside the simulation. What is left here cannot be recovered from.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Every cell holds the player or an entity, so nothing more can spawn.
    #[error("no empty cell left on the {width}x{height} board")]
    BoardFull { width: i32, height: i32 },
}
