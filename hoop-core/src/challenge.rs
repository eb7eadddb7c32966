//! Timed challenge mode: make as many shots as possible before the clock
//! runs out.
//!
//! The challenge only keeps time and tallies; the session feeds it attempts
//! and makes and refuses new shots once it is over.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChallengeError {
    #[error("challenge duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("a challenge is already running")]
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeState {
    Idle,
    Running,
    Finished,
}

/// Tally of one challenge window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeSummary {
    pub duration: f64,
    pub attempts: u32,
    pub makes: u32,
    pub points: u32,
}

#[derive(Debug, Clone)]
pub struct TimedChallenge {
    state: ChallengeState,
    remaining: f64,
    summary: ChallengeSummary,
}

impl Default for TimedChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl TimedChallenge {
    pub fn new() -> Self {
        Self {
            state: ChallengeState::Idle,
            remaining: 0.0,
            summary: ChallengeSummary::default(),
        }
    }

    /// Begin a countdown of `duration` seconds with a fresh tally.
    ///
    /// A finished challenge may be restarted directly.
    pub fn start(&mut self, duration: f64) -> Result<(), ChallengeError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ChallengeError::InvalidDuration(duration));
        }
        if self.state == ChallengeState::Running {
            return Err(ChallengeError::AlreadyRunning);
        }

        self.state = ChallengeState::Running;
        self.remaining = duration;
        self.summary = ChallengeSummary {
            duration,
            ..ChallengeSummary::default()
        };
        Ok(())
    }

    /// Count down by `dt`. Returns the final tally on the tick the clock
    /// reaches zero, `None` otherwise.
    pub fn advance(&mut self, dt: f64) -> Option<ChallengeSummary> {
        if self.state != ChallengeState::Running {
            return None;
        }

        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining > 0.0 {
            return None;
        }

        self.state = ChallengeState::Finished;
        Some(self.summary)
    }

    pub fn record_attempt(&mut self) {
        if self.state == ChallengeState::Running {
            self.summary.attempts += 1;
        }
    }

    /// Makes only count while the clock is running; a ball still in the air
    /// at the buzzer does not.
    pub fn record_make(&mut self, points: u32) {
        if self.state == ChallengeState::Running {
            self.summary.makes += 1;
            self.summary.points += points;
        }
    }

    /// Back to idle, discarding any tally.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ChallengeState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == ChallengeState::Finished
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn summary(&self) -> ChallengeSummary {
        self.summary
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_finishes_once() {
        let mut challenge = TimedChallenge::new();
        challenge.start(1.0).unwrap();

        let mut finished = Vec::new();
        for _ in 0..30 {
            if let Some(summary) = challenge.advance(0.05) {
                finished.push(summary);
            }
        }

        assert_eq!(finished.len(), 1);
        assert!(challenge.is_finished());
        assert_eq!(challenge.remaining(), 0.0);
        assert_eq!(finished[0].duration, 1.0);
    }

    #[test]
    fn test_tally_only_while_running() {
        let mut challenge = TimedChallenge::new();
        challenge.record_attempt();
        challenge.record_make(2);
        assert_eq!(challenge.summary(), ChallengeSummary::default());

        challenge.start(10.0).unwrap();
        challenge.record_attempt();
        challenge.record_attempt();
        challenge.record_make(2);
        assert!(challenge.advance(10.0).is_some());
        challenge.record_make(2);

        let summary = challenge.summary();
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.makes, 1);
        assert_eq!(summary.points, 2);
    }

    #[test]
    fn test_invalid_durations_rejected() {
        let mut challenge = TimedChallenge::new();
        assert_eq!(
            challenge.start(0.0),
            Err(ChallengeError::InvalidDuration(0.0))
        );
        assert!(challenge.start(-5.0).is_err());
        assert!(challenge.start(f64::NAN).is_err());
        assert_eq!(challenge.state(), ChallengeState::Idle);
    }

    #[test]
    fn test_cannot_start_twice() {
        let mut challenge = TimedChallenge::new();
        challenge.start(30.0).unwrap();
        assert_eq!(challenge.start(30.0), Err(ChallengeError::AlreadyRunning));

        challenge.advance(30.0);
        assert!(challenge.start(15.0).is_ok(), "Finished challenge can restart");
        assert_eq!(challenge.remaining(), 15.0);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut challenge = TimedChallenge::new();
        challenge.start(5.0).unwrap();
        challenge.record_attempt();
        challenge.reset();

        assert_eq!(challenge.state(), ChallengeState::Idle);
        assert_eq!(challenge.summary().attempts, 0);
        assert!(challenge.advance(1.0).is_none());
    }
}
