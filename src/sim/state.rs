//! Game state and core simulation types
//!
//! One `GameState` owns everything the simulation mutates. It is handed by
//! exclusive reference to the dispatch function for every event.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::countdown::Countdown;
use super::grid::Grid;
use super::placement;
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// A board cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir` (may be off the board)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Orthogonal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Board cell classification (derived from state, never stored as truth)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Player,
    Treasure,
    Trap,
    Enemy,
    Potion,
}

/// Board dimensions, never smaller than the minimum board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: i32,
    pub height: i32,
}

impl BoardSize {
    /// Clamp to the minimum board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(MIN_BOARD_WIDTH),
            height: height.max(MIN_BOARD_HEIGHT),
        }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Nearest in-bounds cell
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(pos.x.clamp(0, self.width - 1), pos.y.clamp(0, self.height - 1))
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    /// Health, kept within [0, MAX_HP]
    pub hp: u32,
}

impl Player {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            hp: INITIAL_HP,
        }
    }

    /// Heal one point, capped at MAX_HP
    pub fn heal(&mut self) {
        self.hp = (self.hp + 1).min(MAX_HP);
    }

    /// Lose one point. Returns true if this blow was fatal.
    pub fn hurt(&mut self) -> bool {
        if self.hp == 0 {
            return false;
        }
        self.hp -= 1;
        self.hp == 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// Entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Treasure,
    Trap,
    Enemy,
    Potion,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Treasure,
        EntityKind::Trap,
        EntityKind::Enemy,
        EntityKind::Potion,
    ];
}

/// All non-player entities, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    pub treasures: Vec<Position>,
    pub traps: Vec<Position>,
    pub enemies: Vec<Position>,
    pub potions: Vec<Position>,
}

impl Entities {
    pub fn of(&self, kind: EntityKind) -> &Vec<Position> {
        match kind {
            EntityKind::Treasure => &self.treasures,
            EntityKind::Trap => &self.traps,
            EntityKind::Enemy => &self.enemies,
            EntityKind::Potion => &self.potions,
        }
    }

    pub fn of_mut(&mut self, kind: EntityKind) -> &mut Vec<Position> {
        match kind {
            EntityKind::Treasure => &mut self.treasures,
            EntityKind::Trap => &mut self.traps,
            EntityKind::Enemy => &mut self.enemies,
            EntityKind::Potion => &mut self.potions,
        }
    }

    pub fn clear(&mut self) {
        self.treasures.clear();
        self.traps.clear();
        self.enemies.clear();
        self.potions.clear();
    }

    /// Every entity position, set by set
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.treasures
            .iter()
            .chain(&self.traps)
            .chain(&self.enemies)
            .chain(&self.potions)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.treasures.len() + self.traps.len() + self.enemies.len() + self.potions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Level in progress (countdown may still be running)
    Playing,
    /// Frozen until resumed
    Paused,
    /// Health ran out
    GameOver,
}

/// Things that happened during a dispatch, drained by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    TreasureCollected { pos: Position, score: u32 },
    PotionConsumed { pos: Position, hp: u32 },
    TrapTriggered { pos: Position, hp: u32 },
    EnemyHit { pos: Position, hp: u32 },
    LevelCleared { level: u32 },
    GameOver { score: u32, level: u32 },
    Paused,
    Resumed,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub phase: GamePhase,
    /// Countdown number currently shown, if a countdown runs
    pub countdown: Option<u8>,
    pub score: u32,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub treasures_left: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Placement RNG (one stream for the whole process, kept across restarts)
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub board: BoardSize,
    pub player: Player,
    pub entities: Entities,
    pub score: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Treasures still needed to clear the level
    pub treasures_to_collect: u32,
    /// Player cadence
    pub move_delay: Duration,
    /// Enemy cadence
    pub enemy_delay: Duration,
    /// Latched movement direction
    pub pending_direction: Option<Direction>,
    pub countdown: Countdown,
    pub clock: SimClock,
    /// Latest time seen on a tick
    pub now: Duration,
    /// Projection of player + entities
    pub grid: Grid,
    /// Event log since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game in the menu
    pub fn new(seed: u64, move_delay: Duration, board: BoardSize) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            board,
            player: Player::new(board.center()),
            entities: Entities::default(),
            score: 0,
            level: 1,
            treasures_to_collect: 0,
            move_delay,
            enemy_delay: Duration::from_millis(INITIAL_ENEMY_DELAY_MS),
            pending_direction: None,
            countdown: Countdown::Inactive,
            clock: SimClock::default(),
            now: Duration::ZERO,
            grid: Grid::new(board),
            events: Vec::new(),
        };
        state.refresh_grid();
        state
    }

    /// Create a game from loaded settings, using a random seed if none is set
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::new(
            seed,
            settings.move_delay(),
            BoardSize::new(settings.board_width, settings.board_height),
        )
    }

    /// Back to the menu with every gameplay value reset.
    ///
    /// Board size, move delay and the RNG stream survive, so the next run gets
    /// a different layout on the same viewport.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let now = self.now;
        *self = Self::new(self.seed, self.move_delay, self.board);
        self.rng = rng;
        self.now = now;
    }

    /// Pick an empty cell for a new entity
    pub fn place_random(&mut self) -> Result<Position, SimError> {
        placement::place_random(&mut self.rng, self.board, self.player.pos, &self.entities)
    }

    /// Recompute the tile grid from player + entities
    pub fn refresh_grid(&mut self) {
        self.grid.project(self.board, self.player.pos, &self.entities);
    }

    /// Countdown still blocking gameplay?
    pub fn countdown_active(&self) -> bool {
        self.countdown.is_active()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            phase: self.phase,
            countdown: self.countdown.value(),
            score: self.score,
            level: self.level,
            hp: self.player.hp,
            max_hp: MAX_HP,
            treasures_left: self.treasures_to_collect,
        }
    }
}
