//! Python bindings for the hoop-core basketball engine.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from hoop_physics import Session
//!
//! session = Session()
//! session.adjust_power(True)
//! session.shoot()
//!
//! for _ in range(240):
//!     session.tick(1.0 / 60.0)
//!     for event in session.drain_events():
//!         print(event["type"], event)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use hoop_core::challenge::ChallengeState;
use hoop_core::shot::LaunchSolution;
use hoop_core::{
    GameEvent, MoveDirection, PresetLoader, ResetReason, Session as CoreSession,
    SimulationConfig, Vec3 as CoreVec3,
};

/// 3D vector for positions, velocities and rotations.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

fn reset_reason_name(reason: ResetReason) -> &'static str {
    match reason {
        ResetReason::Manual => "manual",
        ResetReason::AfterScore => "after_score",
        ResetReason::OutOfBounds => "out_of_bounds",
    }
}

fn event_to_dict(py: Python<'_>, event: &GameEvent) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    dict.set_item("type", event.name())?;
    match event {
        GameEvent::ShotAttempted { power, target } => {
            dict.set_item("power", *power)?;
            dict.set_item("target", target.label())?;
        }
        GameEvent::Bounce { speed } => dict.set_item("speed", *speed)?,
        GameEvent::BackboardHit { side } => dict.set_item("side", side.label())?,
        GameEvent::Scored { team, points } => {
            dict.set_item("team", team.label())?;
            dict.set_item("points", *points)?;
        }
        GameEvent::BallReset { reason } => dict.set_item("reason", reset_reason_name(*reason))?,
        GameEvent::ChallengeStarted { duration } => dict.set_item("duration", *duration)?,
        GameEvent::ChallengeFinished { summary } => {
            dict.set_item("duration", summary.duration)?;
            dict.set_item("attempts", summary.attempts)?;
            dict.set_item("makes", summary.makes)?;
            dict.set_item("points", summary.points)?;
        }
        GameEvent::ShotMissed | GameEvent::OutOfBounds => {}
    }
    Ok(dict.into_any().unbind())
}

fn launch_to_dict(py: Python<'_>, shot: &LaunchSolution) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    dict.set_item("vx", shot.velocity.x)?;
    dict.set_item("vy", shot.velocity.y)?;
    dict.set_item("vz", shot.velocity.z)?;
    dict.set_item("speed", shot.speed)?;
    dict.set_item("angle_deg", shot.angle.to_degrees())?;
    dict.set_item("target", shot.target.label())?;
    dict.set_item("distance", shot.distance)?;
    dict.set_item("power", shot.power)?;
    dict.set_item("steepened", shot.steepened)?;
    Ok(dict.into_any().unbind())
}

/// A basketball session.
///
/// Commands that are not allowed right now (shooting or moving while the
/// ball is in flight or waiting for its reset) are silent no-ops, as in the
/// engine.
#[pyclass]
pub struct Session {
    inner: CoreSession,
}

impl Session {
    fn from_config(config: SimulationConfig) -> PyResult<Self> {
        CoreSession::with_config(config)
            .map(|inner| Self { inner })
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

#[pymethods]
impl Session {
    /// Create a session with the regulation defaults.
    #[new]
    fn new() -> Self {
        Self {
            inner: CoreSession::new(),
        }
    }

    /// Create a session from a YAML document.
    #[staticmethod]
    fn from_yaml(source: &str) -> PyResult<Self> {
        let config = SimulationConfig::from_yaml_str(source)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Self::from_config(config)
    }

    /// Create a session from a named preset in `directory`.
    #[staticmethod]
    fn from_preset(directory: &str, name: &str) -> PyResult<Self> {
        let config = PresetLoader::new(directory)
            .load(name)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Self::from_config(config)
    }

    /// Launch toward the nearest hoop. Returns the launch as a dict, or
    /// None if the shot was rejected.
    fn shoot(&mut self, py: Python<'_>) -> PyResult<Option<PyObject>> {
        match self.inner.shoot() {
            Ok(shot) => launch_to_dict(py, &shot).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Move the idle ball: "left", "right", "forward" or "backward".
    fn move_ball(&mut self, direction: &str) -> PyResult<bool> {
        let direction = direction
            .parse::<MoveDirection>()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(self.inner.move_ball(direction))
    }

    fn adjust_power(&mut self, increase: bool) -> bool {
        self.inner.adjust_power(increase)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn reset_stats(&mut self) {
        self.inner.reset_stats();
    }

    /// Advance the simulation by dt seconds.
    fn tick(&mut self, dt: f64) {
        self.inner.tick(dt);
    }

    /// Run multiple ticks at once.
    fn tick_n(&mut self, dt: f64, ticks: usize) {
        for _ in 0..ticks {
            self.inner.tick(dt);
        }
    }

    fn start_challenge(&mut self, duration: f64) -> PyResult<()> {
        self.inner
            .start_challenge(duration)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn reset_challenge(&mut self) {
        self.inner.reset_challenge();
    }

    #[getter]
    fn shot_power(&self) -> f64 {
        self.inner.shot_power()
    }

    #[getter]
    fn in_flight(&self) -> bool {
        self.inner.is_in_flight()
    }

    /// Simulated time in seconds.
    #[getter]
    fn clock(&self) -> f64 {
        self.inner.clock()
    }

    fn ball_position(&self) -> Vec3 {
        self.inner.ball().pos.into()
    }

    fn ball_velocity(&self) -> Vec3 {
        self.inner.ball().vel.into()
    }

    fn ball_rotation(&self) -> Vec3 {
        self.inner.ball().rotation.into()
    }

    /// Scoreboard as a dict.
    fn stats(&self, py: Python<'_>) -> PyResult<PyObject> {
        let stats = self.inner.stats();
        let dict = PyDict::new_bound(py);
        dict.set_item("home_score", stats.home_score)?;
        dict.set_item("away_score", stats.away_score)?;
        dict.set_item("shot_attempts", stats.shot_attempts)?;
        dict.set_item("shots_made", stats.shots_made)?;
        dict.set_item("accuracy", stats.accuracy)?;
        Ok(dict.into_any().unbind())
    }

    /// Get current state as dict for easy inspection.
    fn state_dict(&self, py: Python<'_>) -> PyResult<PyObject> {
        let ball = self.inner.ball();
        let challenge = self.inner.challenge();
        let dict = PyDict::new_bound(py);
        dict.set_item("clock", self.inner.clock())?;
        dict.set_item("ball_x", ball.pos.x)?;
        dict.set_item("ball_y", ball.pos.y)?;
        dict.set_item("ball_z", ball.pos.z)?;
        dict.set_item("ball_vx", ball.vel.x)?;
        dict.set_item("ball_vy", ball.vel.y)?;
        dict.set_item("ball_vz", ball.vel.z)?;
        dict.set_item("ball_speed", ball.speed())?;
        dict.set_item("in_flight", ball.in_flight)?;
        dict.set_item("awaiting_reset", self.inner.is_awaiting_reset())?;
        dict.set_item("shot_power", self.inner.shot_power())?;
        dict.set_item("generation", self.inner.generation())?;
        let state = match challenge.state() {
            ChallengeState::Idle => "idle",
            ChallengeState::Running => "running",
            ChallengeState::Finished => "finished",
        };
        dict.set_item("challenge", state)?;
        dict.set_item("challenge_remaining", challenge.remaining())?;
        Ok(dict.into_any().unbind())
    }

    /// Events since the last call, as a list of dicts with a "type" key.
    fn drain_events(&mut self, py: Python<'_>) -> PyResult<PyObject> {
        let list = PyList::empty_bound(py);
        for event in self.inner.drain_events() {
            list.append(event_to_dict(py, &event)?)?;
        }
        Ok(list.into_any().unbind())
    }
}

/// Python module definition.
#[pymodule]
fn hoop_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<Session>()?;
    Ok(())
}
