//! Level director
//!
//! Spawn counts and enemy cadence per level, and the level start sequence.

use std::time::Duration;

use super::countdown::Countdown;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::error::SimError;

/// Treasures to collect on `level`
pub fn treasure_count(level: u32) -> u32 {
    5 + level.saturating_sub(1) * 2
}

pub fn trap_count(level: u32) -> u32 {
    3 + level
}

pub fn enemy_count(level: u32) -> u32 {
    2 + level / 2
}

/// One potion on every third level
pub fn potion_count(level: u32) -> u32 {
    if level % 3 == 0 { 1 } else { 0 }
}

/// Enemy cadence after advancing to `level`
pub fn enemy_delay(level: u32) -> Duration {
    let shrink = u64::from(level) * ENEMY_DELAY_STEP_MS;
    let ms = INITIAL_ENEMY_DELAY_MS
        .saturating_sub(shrink)
        .max(MIN_ENEMY_DELAY_MS);
    Duration::from_millis(ms)
}

/// Repopulate the board for the current level.
///
/// Recentres the player, drops any latched move, then spawns treasures,
/// traps, enemies and potions (in that order) on empty cells.
pub fn start_level(state: &mut GameState) -> Result<(), SimError> {
    let level = state.level;
    state.entities.clear();
    // Recentre first so nothing spawns under the player
    state.player.pos = state.board.center();
    state.pending_direction = None;

    let treasures = treasure_count(level);
    state.treasures_to_collect = treasures;
    for _ in 0..treasures {
        let pos = state.place_random()?;
        state.entities.treasures.push(pos);
    }
    for _ in 0..trap_count(level) {
        let pos = state.place_random()?;
        state.entities.traps.push(pos);
    }
    for _ in 0..enemy_count(level) {
        let pos = state.place_random()?;
        state.entities.enemies.push(pos);
    }
    for _ in 0..potion_count(level) {
        let pos = state.place_random()?;
        state.entities.potions.push(pos);
    }

    state.refresh_grid();

    log::info!(
        "Level {level}: {} treasures, {} traps, {} enemies, {} potions, enemy delay {:?}",
        state.entities.treasures.len(),
        state.entities.traps.len(),
        state.entities.enemies.len(),
        state.entities.potions.len(),
        state.enemy_delay
    );
    state.events.push(GameEvent::LevelStarted { level });
    Ok(())
}

/// Start the countdown, then load the level underneath it
pub fn begin_level(state: &mut GameState, now: Duration) -> Result<(), SimError> {
    state.countdown = Countdown::start();
    state.clock.mark_countdown(now);
    start_level(state)
}

/// Level cleared: bump the level, speed enemies up, begin the next one
pub fn advance_level(state: &mut GameState, now: Duration) -> Result<(), SimError> {
    state.events.push(GameEvent::LevelCleared { level: state.level });
    state.treasures_to_collect = 0;
    state.level += 1;
    state.enemy_delay = enemy_delay(state.level);
    begin_level(state, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BoardSize, Position};
    use std::collections::HashSet;

    fn fresh() -> GameState {
        GameState::new(2024, DEFAULT_MOVE_DELAY, BoardSize::new(40, 20))
    }

    #[test]
    fn test_spawn_formulas() {
        assert_eq!(
            (treasure_count(1), trap_count(1), enemy_count(1), potion_count(1)),
            (5, 4, 2, 0)
        );
        assert_eq!(
            (treasure_count(3), trap_count(3), enemy_count(3), potion_count(3)),
            (9, 6, 3, 1)
        );
        assert_eq!(
            (treasure_count(6), trap_count(6), enemy_count(6), potion_count(6)),
            (15, 9, 5, 1)
        );
    }

    #[test]
    fn test_enemy_delay_floor() {
        assert_eq!(enemy_delay(2), Duration::from_millis(440));
        assert_eq!(enemy_delay(13), Duration::from_millis(110));
        assert_eq!(enemy_delay(14), Duration::from_millis(100));
        assert_eq!(enemy_delay(99), Duration::from_millis(100));
    }

    #[test]
    fn test_level_one_layout() {
        let mut state = fresh();
        start_level(&mut state).unwrap();

        assert_eq!(state.entities.treasures.len(), 5);
        assert_eq!(state.entities.traps.len(), 4);
        assert_eq!(state.entities.enemies.len(), 2);
        assert!(state.entities.potions.is_empty());
        assert_eq!(state.treasures_to_collect, 5);
        assert_eq!(state.player.pos, Position::new(20, 10));
        assert_eq!(state.player.hp, 5);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_layout_has_no_overlaps() {
        let mut state = fresh();
        state.level = 9;
        start_level(&mut state).unwrap();

        let cells: HashSet<_> = state.entities.iter().collect();
        assert_eq!(cells.len(), state.entities.len());
        assert!(!cells.contains(&state.player.pos));
        assert!(state.entities.iter().all(|p| state.board.contains(p)));
    }

    #[test]
    fn test_start_level_clears_latched_direction() {
        let mut state = fresh();
        state.pending_direction = Some(crate::sim::state::Direction::Left);
        state.player.pos = Position::new(0, 0);
        start_level(&mut state).unwrap();
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.player.pos, state.board.center());
    }

    #[test]
    fn test_advance_level_restarts_countdown() {
        let mut state = fresh();
        begin_level(&mut state, Duration::ZERO).unwrap();
        state.countdown = Countdown::Inactive;
        state.entities.treasures.clear();

        advance_level(&mut state, Duration::from_secs(30)).unwrap();
        assert_eq!(state.level, 2);
        assert_eq!(state.countdown.value(), Some(3));
        assert_eq!(state.clock.last_countdown, Duration::from_secs(30));
        assert_eq!(state.enemy_delay, Duration::from_millis(440));
        assert_eq!(state.entities.treasures.len(), 7);
        assert_eq!(state.treasures_to_collect, 7);
    }

    #[test]
    fn test_overcrowded_level_is_fatal() {
        let mut state = GameState::new(5, DEFAULT_MOVE_DELAY, BoardSize::new(20, 10));
        state.level = 100;
        assert!(matches!(
            start_level(&mut state),
            Err(SimError::BoardFull { .. })
        ));
    }
}
