//! Enemy AI step
//!
//! Greedy orthogonal chase: close the x gap first, then the y gap.

use std::time::Duration;

use super::state::{GameState, Position};

/// Where an enemy at `from` wants to go to approach `target`
pub fn chase_step(from: Position, target: Position) -> Position {
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();
    if dx != 0 {
        Position::new(from.x + dx, from.y)
    } else {
        Position::new(from.x, from.y + dy)
    }
}

/// Step every enemy once if the enemy cadence allows it.
///
/// Enemies move in index order and see the moves already made this step, so
/// an earlier enemy can block a later one. A step onto the player is refused:
/// contact only ever comes from the player walking into an enemy.
pub fn step_enemies(state: &mut GameState, now: Duration) {
    if !state.clock.enemies_ready(now, state.enemy_delay) {
        return;
    }

    let player = state.player.pos;
    for i in 0..state.entities.enemies.len() {
        let from = state.entities.enemies[i];
        let to = chase_step(from, player);
        if to == from || to == player {
            continue;
        }

        let entities = &state.entities;
        let blocked = entities.treasures.contains(&to)
            || entities.traps.contains(&to)
            || entities.potions.contains(&to)
            || entities
                .enemies
                .iter()
                .enumerate()
                .any(|(j, &other)| j != i && other == to);
        if !blocked {
            state.entities.enemies[i] = to;
        }
    }

    state.clock.mark_enemy_move(now);
    state.refresh_grid();
}
