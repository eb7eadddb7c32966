//! The game session: owns the ball, the court and the scoreboard, and
//! advances everything one frame at a time.
//!
//! ## Tick order
//!
//! ```text
//! 1. clamp dt, advance the session clock
//! 2. fire due deferred effects (generation-checked)
//! 3. count down the timed challenge
//! 4. ball in flight? integrate → ground → backboards
//! 5. integrated and out of bounds? take the ball out of play, skip scoring
//! 6. score detection
//! ```
//!
//! Commands (`shoot`, `move_ball`, `adjust_power`, `reset`) are applied
//! between ticks. Everything observable by a UI or audio layer is reported
//! through [`GameEvent`]s collected until [`Session::drain_events`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::challenge::{ChallengeError, TimedChallenge};
use crate::collision::{CollisionDetector, CollisionResolver, ContactResponse, ContactTarget};
use crate::config::{ConfigError, SimulationConfig};
use crate::events::{GameEvent, ResetReason};
use crate::forces::Gravity;
use crate::integrator::{clamp_dt, SemiImplicitEuler};
use crate::schedule::{DeferredEffect, Scheduler};
use crate::scoring::ScoreDetector;
use crate::shot::{LaunchSolution, ShotError, ShotSolver};
use crate::types::{constants, Backboard, BallState, Court, Hoop, SessionStats};

/// Direction of an idle-ball movement command.
///
/// Left/right run along the court length (x), forward/backward across it
/// (forward is toward negative z).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move direction '{0}' (expected left, right, forward or backward)")]
pub struct ParseDirectionError(pub String);

impl FromStr for MoveDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MoveDirection::Left),
            "right" => Ok(MoveDirection::Right),
            "forward" => Ok(MoveDirection::Forward),
            "backward" => Ok(MoveDirection::Backward),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
            MoveDirection::Forward => "forward",
            MoveDirection::Backward => "backward",
        };
        f.write_str(name)
    }
}

/// One basketball on one court.
#[derive(Debug, Clone)]
pub struct Session {
    config: SimulationConfig,
    court: Court,
    hoops: [Hoop; 2],
    backboards: [Backboard; 2],
    gravity: Gravity,
    solver: ShotSolver,
    detector: CollisionDetector,
    ball: BallState,
    score_detector: ScoreDetector,
    stats: SessionStats,
    shot_power: f64,
    generation: u64,
    /// Ball is out of play (scored or out of bounds) until its reset fires
    awaiting_reset: bool,
    clock: f64,
    scheduler: Scheduler,
    challenge: TimedChallenge,
    events: Vec<GameEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session on a regulation court with the built-in defaults.
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Session from a custom configuration, validated first.
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let court = Court::from_config(&config.court);
        let gravity = Gravity::vertical(config.physics.gravity);
        let start = court.center_spot(config.ball.radius);

        Self {
            court,
            hoops: Hoop::pair(&config.hoops),
            backboards: Backboard::pair(&config.backboard),
            solver: ShotSolver::from_config(&config.shot, gravity.vertical_component()),
            gravity,
            detector: CollisionDetector::new(config.ball.radius),
            ball: BallState::at_rest(start),
            score_detector: ScoreDetector::new(start, config.hoops.detection_band),
            stats: SessionStats::default(),
            shot_power: config.shot.default_power,
            generation: 0,
            awaiting_reset: false,
            clock: 0.0,
            scheduler: Scheduler::new(),
            challenge: TimedChallenge::new(),
            events: Vec::new(),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Launch the ball toward the nearest hoop at the current shot power.
    ///
    /// An accepted shot counts as an attempt, starts a new shot generation
    /// and schedules the miss check. A rejected shot changes nothing.
    pub fn shoot(&mut self) -> Result<LaunchSolution, ShotError> {
        if self.ball.in_flight {
            return Err(ShotError::InFlight);
        }
        if self.awaiting_reset {
            return Err(ShotError::OutOfPlay);
        }
        if self.challenge.is_finished() {
            return Err(ShotError::ChallengeOver);
        }

        let hoop = ShotSolver::nearest_hoop(&self.ball.pos, &self.hoops)
            .copied()
            .ok_or(ShotError::Unreachable {
                distance: f64::INFINITY,
                rise: 0.0,
            })?;

        let solution = match self.solver.solve(self.ball.pos, &hoop, self.shot_power) {
            Ok(solution) => solution,
            Err(err) => {
                warn!(target_side = %hoop.side, error = %err, "shot rejected");
                return Err(err);
            }
        };

        self.ball.vel = solution.velocity;
        self.ball.in_flight = true;
        self.score_detector.reseed(self.ball.pos);
        self.generation += 1;

        self.stats.record_attempt();
        self.challenge.record_attempt();
        self.scheduler.schedule(
            self.clock,
            self.config.shot.miss_check_delay,
            self.generation,
            DeferredEffect::MissCheck,
        );
        self.events.push(GameEvent::ShotAttempted {
            power: solution.power,
            target: solution.target,
        });

        debug!(
            power = solution.power,
            target_side = %solution.target,
            speed = solution.speed,
            distance = solution.distance,
            steepened = solution.steepened,
            generation = self.generation,
            "shot launched"
        );
        Ok(solution)
    }

    /// Nudge the idle ball one frame's worth in `direction`.
    ///
    /// Returns `false` (and does nothing) while the ball is in flight or out
    /// of play waiting to be reset.
    pub fn move_ball(&mut self, direction: MoveDirection) -> bool {
        if self.ball.in_flight || self.awaiting_reset {
            return false;
        }

        let controls = &self.config.controls;
        let step = controls.move_speed * controls.assumed_frame_dt;
        let spin = step * controls.move_rotation_gain;

        let mut pos = self.ball.pos;
        match direction {
            MoveDirection::Left => {
                pos.x -= step;
                self.ball.rotation.z += spin;
            }
            MoveDirection::Right => {
                pos.x += step;
                self.ball.rotation.z -= spin;
            }
            MoveDirection::Forward => {
                pos.z -= step;
                self.ball.rotation.x += spin;
            }
            MoveDirection::Backward => {
                pos.z += step;
                self.ball.rotation.x -= spin;
            }
        }

        self.ball.pos = self.court.clamp_to_movement_area(pos);
        self.score_detector.reseed(self.ball.pos);
        true
    }

    /// Step shot power up or down. Returns `false` while the ball is in flight.
    pub fn adjust_power(&mut self, increase: bool) -> bool {
        if self.ball.in_flight {
            return false;
        }

        let step = self.config.shot.power_step;
        let delta = if increase { step } else { -step };
        self.shot_power =
            (self.shot_power + delta).clamp(constants::MIN_POWER, constants::MAX_POWER);
        true
    }

    /// Put the ball back at center court.
    ///
    /// Any pending miss check or delayed reset becomes stale. The scoreboard
    /// is kept; see [`Session::reset_stats`].
    pub fn reset(&mut self) {
        self.generation += 1;
        self.return_ball(ResetReason::Manual);
    }

    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    /// Begin a timed challenge with a fresh scoreboard.
    pub fn start_challenge(&mut self, duration: f64) -> Result<(), ChallengeError> {
        self.challenge.start(duration)?;
        self.reset_stats();
        self.events.push(GameEvent::ChallengeStarted { duration });
        debug!(duration, "challenge started");
        Ok(())
    }

    /// Leave challenge mode, re-enabling shots after a finished challenge.
    pub fn reset_challenge(&mut self) {
        self.challenge.reset();
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let dt = clamp_dt(dt, self.config.physics.max_frame_dt);
        self.clock += dt;

        for effect in self.scheduler.take_due(self.clock, self.generation) {
            self.apply_effect(effect);
        }

        if let Some(summary) = self.challenge.advance(dt) {
            debug!(
                attempts = summary.attempts,
                makes = summary.makes,
                points = summary.points,
                "challenge finished"
            );
            self.events.push(GameEvent::ChallengeFinished { summary });
        }

        if !self.ball.in_flight || dt <= 0.0 {
            return;
        }

        self.ball = SemiImplicitEuler::step(
            &self.ball,
            &self.gravity,
            self.config.ball.rotation_gain,
            dt,
        )
        .state;

        self.resolve_contacts(dt);

        // Also covers a ball that came to rest on the step that took it out
        if self.court.is_out_of_bounds(&self.ball.pos) {
            self.take_out_of_bounds();
            return;
        }

        if let Some(detection) = self.score_detector.check(&self.ball, &self.hoops) {
            let points = self.config.hoops.points_per_make;
            self.stats.record_make(detection.side, points);
            self.challenge.record_make(points);
            self.ball.settle();
            self.awaiting_reset = true;
            self.scheduler.schedule(
                self.clock,
                self.config.timing.score_reset_delay,
                self.generation,
                DeferredEffect::ResetBall(ResetReason::AfterScore),
            );
            self.events.push(GameEvent::Scored {
                team: detection.side,
                points,
            });
            debug!(
                team = %detection.side,
                points,
                home = self.stats.home_score,
                away = self.stats.away_score,
                "basket scored"
            );
        }
    }

    /// Hand over every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn shot_power(&self) -> f64 {
        self.shot_power
    }

    pub fn is_in_flight(&self) -> bool {
        self.ball.in_flight
    }

    /// The ball scored or left the court and is waiting for its reset.
    pub fn is_awaiting_reset(&self) -> bool {
        self.awaiting_reset
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seconds of simulated time, the sum of clamped tick deltas.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn challenge(&self) -> &TimedChallenge {
        &self.challenge
    }

    pub fn court(&self) -> &Court {
        &self.court
    }

    pub fn hoops(&self) -> &[Hoop; 2] {
        &self.hoops
    }

    pub fn backboards(&self) -> &[Backboard; 2] {
        &self.backboards
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn resolve_contacts(&mut self, dt: f64) {
        if let Some(contact) = self.detector.detect_ground(&self.ball, &self.court) {
            let resolution = CollisionResolver::resolve(
                &self.ball,
                &contact,
                &self.config.ground,
                &self.config.backboard,
            );
            self.ball = resolution.state;
            match resolution.response {
                ContactResponse::Bounced => {
                    let speed = self.ball.speed();
                    trace!(speed, "ball bounced");
                    self.events.push(GameEvent::Bounce { speed });
                }
                ContactResponse::Rested => trace!("ball came to rest"),
                ContactResponse::Deflected => {}
            }
        }

        if !self.ball.in_flight {
            return;
        }

        if let Some(contact) = self
            .detector
            .detect_backboards(&self.ball, &self.backboards, dt)
        {
            self.ball = CollisionResolver::resolve(
                &self.ball,
                &contact,
                &self.config.ground,
                &self.config.backboard,
            )
            .state;
            if let ContactTarget::Backboard(side) = contact.target {
                trace!(%side, vx = self.ball.vel.x, "backboard hit");
                self.events.push(GameEvent::BackboardHit { side });
            }
        }
    }

    fn take_out_of_bounds(&mut self) {
        debug!(x = self.ball.pos.x, z = self.ball.pos.z, "ball out of bounds");
        self.ball.settle();
        self.awaiting_reset = true;
        self.scheduler.schedule(
            self.clock,
            self.config.timing.out_of_bounds_grace,
            self.generation,
            DeferredEffect::ResetBall(ResetReason::OutOfBounds),
        );
        self.events.push(GameEvent::OutOfBounds);
    }

    fn apply_effect(&mut self, effect: DeferredEffect) {
        match effect {
            DeferredEffect::MissCheck => {
                if self.ball.in_flight && self.ball.pos.y < self.config.shot.miss_height {
                    debug!(y = self.ball.pos.y, "shot missed");
                    self.events.push(GameEvent::ShotMissed);
                }
            }
            DeferredEffect::ResetBall(reason) => self.return_ball(reason),
        }
    }

    fn return_ball(&mut self, reason: ResetReason) {
        let start = self.court.center_spot(self.config.ball.radius);
        self.ball = BallState::at_rest(start);
        self.awaiting_reset = false;
        self.score_detector.reseed(start);
        self.shot_power = self.config.shot.default_power;
        self.events.push(GameEvent::BallReset { reason });
        debug!(?reason, generation = self.generation, "ball reset to center");
    }
}

// =============================================================================
// Tests
// =============================================================================
