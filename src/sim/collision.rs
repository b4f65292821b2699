//! Collision resolution after a player move
//!
//! Categories are checked in a fixed order (treasure, potion, trap, enemy)
//! and each one stops at its first match. A level clear is checked last.

use std::time::Duration;

use super::level;
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::SimError;

/// Apply every interaction for the player's current cell
pub fn resolve_player_move(state: &mut GameState, now: Duration) -> Result<(), SimError> {
    let pos = state.player.pos;
    let remaining_before = state.treasures_to_collect;

    if let Some(i) = state.entities.treasures.iter().position(|&t| t == pos) {
        state.entities.treasures.remove(i);
        state.score += 1;
        state.treasures_to_collect = state.treasures_to_collect.saturating_sub(1);
        log::debug!("Treasure at {pos:?}, score {}", state.score);
        state.events.push(GameEvent::TreasureCollected {
            pos,
            score: state.score,
        });
    }

    if let Some(i) = state.entities.potions.iter().position(|&p| p == pos) {
        state.entities.potions.remove(i);
        state.player.heal();
        log::debug!("Potion at {pos:?}, hp {}", state.player.hp);
        state.events.push(GameEvent::PotionConsumed {
            pos,
            hp: state.player.hp,
        });
    }

    if let Some(i) = state.entities.traps.iter().position(|&t| t == pos) {
        state.entities.traps.remove(i);
        let fatal = state.player.hurt();
        let respawn = state.place_random()?;
        state.entities.traps.push(respawn);
        log::debug!("Trap at {pos:?}, hp {}, respawned at {respawn:?}", state.player.hp);
        state.events.push(GameEvent::TrapTriggered {
            pos,
            hp: state.player.hp,
        });
        if fatal {
            game_over(state);
            return Ok(());
        }
    }

    if let Some(i) = state.entities.enemies.iter().position(|&e| e == pos) {
        let fatal = state.player.hurt();
        state.entities.enemies[i] = state.place_random()?;
        log::debug!("Enemy at {pos:?}, hp {}", state.player.hp);
        state.events.push(GameEvent::EnemyHit {
            pos,
            hp: state.player.hp,
        });
        if fatal {
            game_over(state);
            return Ok(());
        }
    }

    if state.entities.treasures.is_empty() && remaining_before > 0 {
        log::info!("Level {} cleared, score {}", state.level, state.score);
        level::advance_level(state, now)?;
    }

    state.refresh_grid();
    Ok(())
}

/// Enter game over (only once)
fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.pending_direction = None;
    state.refresh_grid();
    log::info!("Game over on level {} with score {}", state.level, state.score);
    state.events.push(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
}
