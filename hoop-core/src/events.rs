//! Events emitted by the session for UI and audio collaborators.
//!
//! The session buffers events as they happen; hosts drain them once per
//! frame with [`crate::session::Session::drain_events`].

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeSummary;
use crate::types::Side;

/// Why the ball went back to center court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    Manual,
    AfterScore,
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ShotAttempted { power: f64, target: Side },
    Bounce { speed: f64 },
    BackboardHit { side: Side },
    Scored { team: Side, points: u32 },
    ShotMissed,
    OutOfBounds,
    BallReset { reason: ResetReason },
    ChallengeStarted { duration: f64 },
    ChallengeFinished { summary: ChallengeSummary },
}

impl GameEvent {
    /// Stable snake_case name, handy for hosts that dispatch on strings.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::ShotAttempted { .. } => "shot_attempted",
            GameEvent::Bounce { .. } => "bounce",
            GameEvent::BackboardHit { .. } => "backboard_hit",
            GameEvent::Scored { .. } => "scored",
            GameEvent::ShotMissed => "shot_missed",
            GameEvent::OutOfBounds => "out_of_bounds",
            GameEvent::BallReset { .. } => "ball_reset",
            GameEvent::ChallengeStarted { .. } => "challenge_started",
            GameEvent::ChallengeFinished { .. } => "challenge_finished",
        }
    }
}
