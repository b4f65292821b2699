//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time comes in through tick events only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity set)
//! - No rendering or terminal dependencies

pub mod clock;
pub mod collision;
pub mod countdown;
pub mod enemy;
pub mod grid;
pub mod level;
pub mod placement;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use collision::resolve_player_move;
pub use countdown::Countdown;
pub use grid::Grid;
pub use placement::place_random;
pub use state::{
    BoardSize, Direction, Entities, EntityKind, GameEvent, GamePhase, GameState, Player, Position,
    Snapshot, Tile,
};
pub use tick::{Action, Event, Flow, handle_event, resize, tick};
