//! Simulation parameters.
//!
//! Every tunable constant of the engine lives here, grouped by concern. All
//! sections deserialize with `#[serde(default)]`, so a YAML preset only has
//! to list the values it changes. See [`crate::presets`] for loading presets
//! from disk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::constants;

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Preset not found: {0}")]
    NotFound(String),
    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete parameter set for one simulation session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub name: String,
    pub physics: PhysicsConfig,
    pub ball: BallConfig,
    pub ground: GroundConfig,
    pub backboard: BackboardConfig,
    pub court: CourtConfig,
    pub hoops: HoopConfig,
    pub shot: ShotConfig,
    pub controls: ControlsConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration (m/s², negative is down)
    pub gravity: f64,
    /// Upper bound on a single tick, guards against tunneling on frame hitches
    pub max_frame_dt: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -constants::STANDARD_GRAVITY,
            max_frame_dt: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f64,
    /// Visual spin per unit of distance travelled in flight
    pub rotation_gain: f64,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.24,
            rotation_gain: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Fraction of vertical speed kept on a bounce
    pub bounce_coefficient: f64,
    /// Fraction of horizontal speed kept on a bounce
    pub friction: f64,
    /// Below this vertical speed (and `rest_speed`) the ball comes to rest
    pub rest_vertical_speed: f64,
    pub rest_speed: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            bounce_coefficient: 0.6,
            friction: 0.8,
            rest_vertical_speed: 0.5,
            rest_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackboardConfig {
    /// |x| of the board's center plane
    pub distance_from_center: f64,
    pub half_thickness: f64,
    pub bottom: f64,
    pub top: f64,
    pub half_width: f64,
    /// Fraction of the normal (x) speed kept on impact
    pub reflection_loss: f64,
    /// Fraction of the in-plane (y, z) speed kept on impact
    pub tangential_damping: f64,
}

impl Default for BackboardConfig {
    fn default() -> Self {
        Self {
            distance_from_center: 15.0,
            half_thickness: 0.025,
            bottom: 2.525,
            top: 3.575,
            half_width: 0.9,
            reflection_loss: 0.8,
            tangential_damping: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    pub half_length: f64,
    pub half_width: f64,
    /// Height of the playing surface above y = 0
    pub surface_offset: f64,
    pub move_limit_x: f64,
    pub move_limit_z: f64,
    pub out_of_bounds_x: f64,
    pub out_of_bounds_z: f64,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            half_length: 15.0,
            half_width: 7.5,
            surface_offset: 0.2,
            move_limit_x: 14.0,
            move_limit_z: 7.0,
            out_of_bounds_x: 16.5,
            out_of_bounds_z: 9.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoopConfig {
    /// |x| of the rim centers
    pub distance_from_center: f64,
    pub z: f64,
    pub rim_radius: f64,
    pub rim_height: f64,
    /// Depth below the rim plane in which a descending ball counts as through
    pub detection_band: f64,
    pub points_per_make: u32,
}

impl Default for HoopConfig {
    fn default() -> Self {
        Self {
            distance_from_center: 14.6,
            z: 0.0,
            rim_radius: 0.23,
            rim_height: 3.05,
            detection_band: 0.4,
            points_per_make: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub launch_angle_deg: f64,
    /// Steepen the arc when the fixed angle cannot reach the rim
    pub adaptive_arc: bool,
    /// Fallback arc tangent as a multiple of the elevation tangent (> 2 arrives descending)
    pub fallback_arc_ratio: f64,
    pub default_power: f64,
    pub power_step: f64,
    pub miss_check_delay: f64,
    /// A ball still in flight below this height at the miss check is a miss
    pub miss_height: f64,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            launch_angle_deg: 45.0,
            adaptive_arc: true,
            fallback_arc_ratio: 2.5,
            default_power: 50.0,
            power_step: 2.0,
            miss_check_delay: 2.0,
            miss_height: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub move_speed: f64,
    /// Frame duration assumed by movement commands (they carry no dt)
    pub assumed_frame_dt: f64,
    pub move_rotation_gain: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            assumed_frame_dt: 0.016,
            move_rotation_gain: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub score_reset_delay: f64,
    pub out_of_bounds_grace: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            score_reset_delay: 1.5,
            out_of_bounds_grace: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values that would break the engine's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.physics.gravity.is_finite() && self.physics.gravity < 0.0) {
            return Err(invalid("physics.gravity", "must be finite and negative"));
        }
        positive("physics.max_frame_dt", self.physics.max_frame_dt)?;
        positive("ball.radius", self.ball.radius)?;
        non_negative("ball.rotation_gain", self.ball.rotation_gain)?;

        unit_interval("ground.bounce_coefficient", self.ground.bounce_coefficient)?;
        unit_interval("ground.friction", self.ground.friction)?;
        positive("ground.rest_vertical_speed", self.ground.rest_vertical_speed)?;
        positive("ground.rest_speed", self.ground.rest_speed)?;

        let board = &self.backboard;
        positive("backboard.half_thickness", board.half_thickness)?;
        positive("backboard.half_width", board.half_width)?;
        unit_interval("backboard.reflection_loss", board.reflection_loss)?;
        unit_interval("backboard.tangential_damping", board.tangential_damping)?;
        if board.bottom >= board.top {
            return Err(invalid("backboard.bottom", "must lie below backboard.top"));
        }

        let court = &self.court;
        positive("court.half_length", court.half_length)?;
        positive("court.half_width", court.half_width)?;
        non_negative("court.surface_offset", court.surface_offset)?;
        if court.out_of_bounds_x < court.move_limit_x || court.out_of_bounds_z < court.move_limit_z
        {
            return Err(invalid(
                "court.out_of_bounds_x",
                "out-of-bounds limits must enclose the movement area",
            ));
        }

        let hoops = &self.hoops;
        positive("hoops.rim_radius", hoops.rim_radius)?;
        positive("hoops.detection_band", hoops.detection_band)?;
        if hoops.distance_from_center >= board.distance_from_center {
            return Err(invalid(
                "hoops.distance_from_center",
                "rims must hang in front of their backboards",
            ));
        }
        if hoops.rim_height <= self.ball.radius + court.surface_offset {
            return Err(invalid("hoops.rim_height", "must be above the resting ball"));
        }

        let shot = &self.shot;
        if !(shot.launch_angle_deg > 0.0 && shot.launch_angle_deg < 90.0) {
            return Err(invalid("shot.launch_angle_deg", "must lie in (0, 90)"));
        }
        if !(shot.fallback_arc_ratio > 2.0) {
            return Err(invalid(
                "shot.fallback_arc_ratio",
                "must be greater than 2 for steep shots to arrive descending",
            ));
        }
        if !(constants::MIN_POWER..=constants::MAX_POWER).contains(&shot.default_power) {
            return Err(invalid("shot.default_power", "must lie in [0, 100]"));
        }
        positive("shot.power_step", shot.power_step)?;
        non_negative("shot.miss_check_delay", shot.miss_check_delay)?;

        positive("controls.move_speed", self.controls.move_speed)?;
        positive("controls.assumed_frame_dt", self.controls.assumed_frame_dt)?;
        non_negative("timing.score_reset_delay", self.timing.score_reset_delay)?;
        non_negative("timing.out_of_bounds_grace", self.timing.out_of_bounds_grace)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be non-negative, got {}", value)))
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must lie in (0, 1], got {}", value)))
    }
}

// =============================================================================
// Tests
// =============================================================================
