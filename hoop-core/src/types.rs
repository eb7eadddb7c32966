//! Core types for the basketball simulation.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Rotation: radians (visual only, never fed back into the trajectory)

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

use crate::config::{BackboardConfig, CourtConfig, HoopConfig};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities and rotation angles.
///
/// Coordinate system:
/// - X: along the court length (positive toward the home hoop)
/// - Y: vertical (positive upward)
/// - Z: across the court width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Projection onto the court plane (y dropped).
    pub fn horizontal(&self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Distance to `other` measured in the XZ plane only.
    pub fn horizontal_distance(&self, other: &Self) -> f64 {
        (self.horizontal() - other.horizontal()).magnitude()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// Complete state of the basketball at a given instant.
///
/// `rotation` accumulates visual spin angles only. While `in_flight` is false
/// the velocity is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub rotation: Vec3,
    pub in_flight: bool,
}

impl BallState {
    /// Ball lying idle at a given position
    pub fn at_rest(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            rotation: Vec3::ZERO,
            in_flight: false,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.magnitude()
    }

    /// Take the ball out of play where it is: zero velocity, not in flight.
    pub fn settle(&mut self) {
        self.in_flight = false;
        self.vel = Vec3::ZERO;
    }
}

impl Default for BallState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO)
    }
}

// =============================================================================
// Court Geometry
// =============================================================================

/// Which team a hoop (and its backboard) scores for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }

    /// +1 for the home end of the court (positive X), -1 for the away end.
    pub fn sign(&self) -> f64 {
        match self {
            Side::Home => 1.0,
            Side::Away => -1.0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A hoop: horizontal rim circle at `rim_height`, centered at (x, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub x: f64,
    pub z: f64,
    pub side: Side,
    pub rim_radius: f64,
    pub rim_height: f64,
}

impl Hoop {
    /// Home hoop at +X, away hoop at -X, mirrored through center court.
    pub fn pair(config: &HoopConfig) -> [Hoop; 2] {
        [Side::Home, Side::Away].map(|side| Hoop {
            x: side.sign() * config.distance_from_center,
            z: config.z,
            side,
            rim_radius: config.rim_radius,
            rim_height: config.rim_height,
        })
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x, self.rim_height, self.z)
    }

    /// Horizontal distance from the rim center to `pos`.
    pub fn horizontal_distance(&self, pos: &Vec3) -> f64 {
        self.center().horizontal_distance(pos)
    }
}

/// A backboard: thin vertical slab at fixed `x`, bounded in `y` and `z`.
///
/// `facing_sign` points from the board toward the court, so the home board
/// (positive X) faces -X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backboard {
    pub x: f64,
    pub half_thickness: f64,
    pub y_range: (f64, f64),
    pub z_range: (f64, f64),
    pub facing_sign: f64,
    pub side: Side,
}

impl Backboard {
    pub fn pair(config: &BackboardConfig) -> [Backboard; 2] {
        [Side::Home, Side::Away].map(|side| Backboard {
            x: side.sign() * config.distance_from_center,
            half_thickness: config.half_thickness,
            y_range: (config.bottom, config.top),
            z_range: (-config.half_width, config.half_width),
            facing_sign: -side.sign(),
            side,
        })
    }

    /// X coordinate of the face that looks at the court.
    pub fn near_face_x(&self) -> f64 {
        self.x + self.facing_sign * self.half_thickness
    }

    /// Whether (y, z) falls within the board's extent.
    pub fn spans(&self, y: f64, z: f64) -> bool {
        (self.y_range.0..=self.y_range.1).contains(&y)
            && (self.z_range.0..=self.z_range.1).contains(&z)
    }
}

/// Court extents and the limits derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub half_length: f64,
    pub half_width: f64,
    pub surface_offset: f64,
    pub move_limit_x: f64,
    pub move_limit_z: f64,
    pub out_of_bounds_x: f64,
    pub out_of_bounds_z: f64,
}

impl Court {
    pub fn from_config(config: &CourtConfig) -> Self {
        Self {
            half_length: config.half_length,
            half_width: config.half_width,
            surface_offset: config.surface_offset,
            move_limit_x: config.move_limit_x,
            move_limit_z: config.move_limit_z,
            out_of_bounds_x: config.out_of_bounds_x,
            out_of_bounds_z: config.out_of_bounds_z,
        }
    }

    /// Height of the ball center when it lies on the court surface.
    pub fn rest_height(&self, ball_radius: f64) -> f64 {
        ball_radius + self.surface_offset
    }

    /// Center-court resting spot for a ball of the given radius.
    pub fn center_spot(&self, ball_radius: f64) -> Vec3 {
        Vec3::new(0.0, self.rest_height(ball_radius), 0.0)
    }

    /// Beyond the extended boundary (past the lines plus overshoot margin).
    pub fn is_out_of_bounds(&self, pos: &Vec3) -> bool {
        pos.x.abs() > self.out_of_bounds_x || pos.z.abs() > self.out_of_bounds_z
    }

    /// Clamp a position into the area the idle ball may be moved within.
    pub fn clamp_to_movement_area(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            pos.x.clamp(-self.move_limit_x, self.move_limit_x),
            pos.y,
            pos.z.clamp(-self.move_limit_z, self.move_limit_z),
        )
    }
}

// =============================================================================
// Session Statistics
// =============================================================================

/// Cumulative scoreboard for a session.
///
/// `accuracy` is a rounded percentage kept in sync with the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub home_score: u32,
    pub away_score: u32,
    pub shot_attempts: u32,
    pub shots_made: u32,
    pub accuracy: u32,
}

impl SessionStats {
    pub fn record_attempt(&mut self) {
        self.shot_attempts += 1;
        self.refresh_accuracy();
    }

    pub fn record_make(&mut self, side: Side, points: u32) {
        self.shots_made += 1;
        match side {
            Side::Home => self.home_score += points,
            Side::Away => self.away_score += points,
        }
        self.refresh_accuracy();
    }

    pub fn score_for(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    fn refresh_accuracy(&mut self) {
        self.accuracy = if self.shot_attempts == 0 {
            0
        } else {
            (100.0 * self.shots_made as f64 / self.shot_attempts as f64).round() as u32
        };
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Constants used across the simulation.
pub mod constants {
    /// Standard gravitational acceleration magnitude (m/s²)
    pub const STANDARD_GRAVITY: f64 = 9.8;

    /// Shot power bounds (percent)
    pub const MIN_POWER: f64 = 0.0;
    pub const MAX_POWER: f64 = 100.0;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, -3.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_vec3_normalized() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        let n = v.normalized();
        assert!((n.magnitude() - 1.0).abs() < 1e-10);
        assert!((n.x - 0.6).abs() < 1e-10);
        assert!((n.y - 0.8).abs() < 1e-10);
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -2.0, 4.0);
        assert!((a.horizontal_distance(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_hoops_are_mirrored() {
        let config = SimulationConfig::default();
        let [home, away] = Hoop::pair(&config.hoops);

        assert_eq!(home.side, Side::Home);
        assert_eq!(away.side, Side::Away);
        assert!((home.x - 14.6).abs() < 1e-10);
        assert!((away.x + 14.6).abs() < 1e-10);
        assert_eq!(home.rim_height, away.rim_height);
    }

    #[test]
    fn test_backboards_face_the_court() {
        let config = SimulationConfig::default();
        let [home, away] = Backboard::pair(&config.backboard);

        assert_eq!(home.facing_sign, -1.0);
        assert_eq!(away.facing_sign, 1.0);
        assert!(home.near_face_x() < home.x);
        assert!(away.near_face_x() > away.x);
        assert!(home.spans(3.05, 0.0));
        assert!(!home.spans(1.0, 0.0));
    }

    #[test]
    fn test_court_bounds() {
        let court = Court::from_config(&SimulationConfig::default().court);

        assert!((court.rest_height(0.24) - 0.44).abs() < 1e-10);
        assert!(!court.is_out_of_bounds(&Vec3::new(15.0, 0.0, 0.0)));
        assert!(court.is_out_of_bounds(&Vec3::new(17.0, 0.0, 0.0)));
        assert!(court.is_out_of_bounds(&Vec3::new(0.0, 0.0, -9.5)));

        let clamped = court.clamp_to_movement_area(Vec3::new(20.0, 0.44, -20.0));
        assert_eq!(clamped, Vec3::new(14.0, 0.44, -7.0));
    }

    #[test]
    fn test_accuracy_tracks_counters() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.accuracy, 0);

        stats.record_attempt();
        stats.record_attempt();
        stats.record_attempt();
        assert_eq!(stats.accuracy, 0);

        stats.record_make(Side::Away, 2);
        assert_eq!(stats.accuracy, 33);
        assert_eq!(stats.score_for(Side::Away), 2);

        stats.record_make(Side::Home, 2);
        assert_eq!(stats.accuracy, 67);
        assert_eq!(stats.score_for(Side::Home), 2);
    }

    #[test]
    fn test_settle_zeroes_velocity() {
        let mut ball = BallState::at_rest(Vec3::new(1.0, 2.0, 3.0));
        ball.vel = Vec3::new(4.0, -1.0, 0.5);
        ball.in_flight = true;

        ball.settle();

        assert!(!ball.in_flight);
        assert_eq!(ball.vel, Vec3::ZERO);
        assert_eq!(ball.pos, Vec3::new(1.0, 2.0, 3.0));
    }
}
