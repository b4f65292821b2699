//! Simulation clock
//!
//! Remembers when the player, the enemies and the countdown last acted and
//! answers whether a minimum interval has passed. Times are offsets from the
//! front-end's start instant, so tests can drive the clock by hand.

use std::time::Duration;

use crate::consts::COUNTDOWN_INTERVAL;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimClock {
    /// None until the player has moved once
    pub last_move: Option<Duration>,
    /// None until the enemies have stepped once
    pub last_enemy_move: Option<Duration>,
    pub last_countdown: Duration,
    /// Set while the game is paused
    paused_at: Option<Duration>,
}

/// `interval` has passed since `last` (or there never was a `last`)
#[inline]
fn gate_open(last: Option<Duration>, now: Duration, interval: Duration) -> bool {
    last.is_none_or(|last| now.saturating_sub(last) >= interval)
}

impl SimClock {
    pub fn player_ready(&self, now: Duration, move_delay: Duration) -> bool {
        gate_open(self.last_move, now, move_delay)
    }

    pub fn mark_player_move(&mut self, now: Duration) {
        self.last_move = Some(now);
    }

    pub fn enemies_ready(&self, now: Duration, enemy_delay: Duration) -> bool {
        gate_open(self.last_enemy_move, now, enemy_delay)
    }

    pub fn mark_enemy_move(&mut self, now: Duration) {
        self.last_enemy_move = Some(now);
    }

    pub fn countdown_due(&self, now: Duration) -> bool {
        gate_open(Some(self.last_countdown), now, COUNTDOWN_INTERVAL)
    }

    pub fn mark_countdown(&mut self, now: Duration) {
        self.last_countdown = now;
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze the clock
    pub fn pause(&mut self, now: Duration) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreeze, shifting every reference forward by the paused span so no
    /// gate opens just because time passed while paused
    pub fn resume(&mut self, now: Duration) {
        let Some(paused_at) = self.paused_at.take() else {
            return;
        };
        let span = now.saturating_sub(paused_at);
        self.last_move = self.last_move.map(|t| t + span);
        self.last_enemy_move = self.last_enemy_move.map(|t| t + span);
        self.last_countdown += span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_action_is_immediate() {
        let clock = SimClock::default();
        assert!(clock.player_ready(ms(0), ms(100)));
        assert!(clock.enemies_ready(ms(0), ms(500)));
    }

    #[test]
    fn test_gate_respects_interval() {
        let mut clock = SimClock::default();
        clock.mark_player_move(ms(1000));
        assert!(!clock.player_ready(ms(1050), ms(100)));
        assert!(!clock.player_ready(ms(1099), ms(100)));
        assert!(clock.player_ready(ms(1100), ms(100)));
    }

    #[test]
    fn test_countdown_interval_is_one_second() {
        let mut clock = SimClock::default();
        clock.mark_countdown(ms(200));
        assert!(!clock.countdown_due(ms(1150)));
        assert!(clock.countdown_due(ms(1200)));
    }

    #[test]
    fn test_resume_shifts_references() {
        let mut clock = SimClock::default();
        clock.mark_enemy_move(ms(1000));
        clock.mark_countdown(ms(1000));
        clock.pause(ms(1200));
        assert!(clock.is_paused());
        clock.resume(ms(5200));
        assert!(!clock.is_paused());

        // 200 ms of play before the pause, 100 ms after it
        assert!(!clock.enemies_ready(ms(5300), ms(500)));
        assert!(clock.enemies_ready(ms(5500), ms(500)));
        assert!(!clock.countdown_due(ms(5900)));
        assert!(clock.countdown_due(ms(6000)));
        assert_eq!(clock.last_move, None);
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let mut clock = SimClock::default();
        clock.mark_player_move(ms(10));
        clock.resume(ms(9000));
        assert_eq!(clock.last_move, Some(ms(10)));
    }
}
