//! Dungeon Dash - a tick-driven grid dungeon crawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, collisions, levels, game state)
//! - `settings`: Tunables loaded from a JSON file
//! - `error`: Engine faults

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Health at the start of a run
    pub const INITIAL_HP: u32 = 5;
    /// Potions never heal above this
    pub const MAX_HP: u32 = 10;

    /// Smallest board the engine accepts
    pub const MIN_BOARD_WIDTH: i32 = 20;
    pub const MIN_BOARD_HEIGHT: i32 = 10;
    /// Board size before the first viewport event
    pub const DEFAULT_BOARD_WIDTH: i32 = 40;
    pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

    /// Random samples tried before the row-major fallback scan
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

    /// Player step cadence
    pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_millis(100);
    /// Front-end wake-up period
    pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

    /// Enemy cadence on level 1
    pub const INITIAL_ENEMY_DELAY_MS: u64 = 500;
    /// Enemy cadence shrinks by this much per level...
    pub const ENEMY_DELAY_STEP_MS: u64 = 30;
    /// ...but never below this
    pub const MIN_ENEMY_DELAY_MS: u64 = 100;

    /// Time each countdown number stays on screen
    pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
    /// First number shown by the countdown
    pub const COUNTDOWN_START: u8 = 3;
}
