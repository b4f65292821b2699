//! Event dispatch
//!
//! Top-level state machine. Every timer wake-up, key action and viewport change
//! goes through `handle_event`, one at a time, in arrival order.

use std::time::Duration;

use super::collision::resolve_player_move;
use super::countdown::process_countdown;
use super::enemy::step_enemies;
use super::level::begin_level;
use super::state::{BoardSize, Direction, EntityKind, GameEvent, GamePhase, GameState};
use crate::error::SimError;

/// Semantic input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    /// Pause while playing, resume while paused
    TogglePause,
    /// Start from the menu
    Confirm,
    /// New game after game over
    Restart,
    Quit,
}

/// Everything the front-end can feed the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Periodic wake-up; time since the front-end started
    Tick(Duration),
    Input(Action),
    /// Viewport changed; board size in cells
    Resize { width: i32, height: i32 },
}

/// Whether the front-end should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one event to the game
pub fn handle_event(state: &mut GameState, event: Event) -> Result<Flow, SimError> {
    match event {
        Event::Tick(now) => tick(state, now)?,
        Event::Input(Action::Quit) => {
            log::info!("Quit requested in {:?}", state.phase);
            return Ok(Flow::Quit);
        }
        Event::Input(action) => apply_action(state, action)?,
        Event::Resize { width, height } => resize(state, width, height)?,
    }
    Ok(Flow::Continue)
}

/// Advance simulation time.
///
/// While playing, a running countdown swallows the tick; otherwise enemies
/// step and then the latched player move is applied.
pub fn tick(state: &mut GameState, now: Duration) -> Result<(), SimError> {
    state.now = state.now.max(now);
    let now = state.now;

    if state.phase != GamePhase::Playing {
        return Ok(());
    }

    if state.countdown_active() {
        process_countdown(state, now);
        return Ok(());
    }

    step_enemies(state, now);
    move_player(state, now)
}

/// Apply the latched direction if the move cadence allows it
fn move_player(state: &mut GameState, now: Duration) -> Result<(), SimError> {
    let Some(dir) = state.pending_direction else {
        return Ok(());
    };
    if !state.clock.player_ready(now, state.move_delay) {
        return Ok(());
    }

    let target = state.player.pos.step(dir);
    if !state.board.contains(target) {
        return Ok(());
    }

    state.player.pos = target;
    state.clock.mark_player_move(now);
    resolve_player_move(state, now)
}

fn apply_action(state: &mut GameState, action: Action) -> Result<(), SimError> {
    let now = state.now;
    match (state.phase, action) {
        (GamePhase::Menu, Action::Confirm) => {
            log::info!("Starting run (seed {})", state.seed);
            state.phase = GamePhase::Playing;
            begin_level(state, now)?;
        }
        (GamePhase::Playing, Action::TogglePause) => {
            state.phase = GamePhase::Paused;
            state.clock.pause(now);
            state.events.push(GameEvent::Paused);
        }
        (GamePhase::Playing, Action::Move(dir)) => {
            // Dropped during the countdown so nothing moves the instant it ends
            if !state.countdown_active() {
                state.pending_direction = Some(dir);
            }
        }
        (GamePhase::Paused, Action::TogglePause) => {
            state.phase = GamePhase::Playing;
            state.clock.resume(now);
            state.events.push(GameEvent::Resumed);
        }
        (GamePhase::GameOver, Action::Restart) => {
            log::info!("Restarting after score {} on level {}", state.score, state.level);
            state.reset();
        }
        _ => {}
    }
    Ok(())
}

/// Resize the board without resetting the level.
///
/// The player is clamped into bounds. Entities left off the board, or under
/// the clamped player, are moved to empty cells so counts stay the same.
pub fn resize(state: &mut GameState, width: i32, height: i32) -> Result<(), SimError> {
    let board = BoardSize::new(width, height);
    if board != state.board {
        log::debug!("Board resized to {}x{}", board.width, board.height);
    }
    state.board = board;
    state.player.pos = board.clamp(state.player.pos);

    let player = state.player.pos;
    for kind in EntityKind::ALL {
        for i in 0..state.entities.of(kind).len() {
            let pos = state.entities.of(kind)[i];
            if board.contains(pos) && pos != player {
                continue;
            }
            let new_pos = state.place_random()?;
            state.entities.of_mut(kind)[i] = new_pos;
        }
    }

    state.refresh_grid();
    Ok(())
}
