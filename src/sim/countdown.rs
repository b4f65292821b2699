//! Pre-level countdown: 3, 2, 1, 0 ("go"), then gameplay unblocks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::COUNTDOWN_START;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Countdown {
    #[default]
    Inactive,
    /// Number on screen; 0 is shown as "go"
    Counting(u8),
}

impl Countdown {
    pub fn start() -> Self {
        Countdown::Counting(COUNTDOWN_START)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Countdown::Counting(_))
    }

    pub fn value(&self) -> Option<u8> {
        match self {
            Countdown::Counting(n) => Some(*n),
            Countdown::Inactive => None,
        }
    }

    /// One step down; stepping past 0 deactivates
    pub fn advance(&mut self) {
        *self = match *self {
            Countdown::Counting(0) | Countdown::Inactive => Countdown::Inactive,
            Countdown::Counting(n) => Countdown::Counting(n - 1),
        };
    }
}

/// Tick the countdown if a full interval has passed since the last step
pub fn process_countdown(state: &mut GameState, now: Duration) {
    if !state.countdown.is_active() || !state.clock.countdown_due(now) {
        return;
    }
    state.countdown.advance();
    state.clock.mark_countdown(now);
    if !state.countdown.is_active() {
        log::info!("Level {} go", state.level);
    }
}
