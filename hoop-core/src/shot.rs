//! Shot solving: launch velocity toward the nearest hoop.
//!
//! The launch angle is fixed (45° by default). For launch height `y0`,
//! target height `y1`, horizontal distance `d` and angle `θ`, the speed that
//! puts the ball through the rim center is
//!
//! ```text
//! v = sqrt( g·d² / (2·cos²θ·(d·tanθ − (y1 − y0))) )
//! ```
//!
//! Shot power scales that speed linearly, so only a full-power shot is on
//! target. When `d·tanθ ≤ y1 − y0` the fixed angle cannot reach the rim at
//! all. The solver then either steepens the arc (tanθ = ratio · rise / d,
//! which with ratio > 2 also arrives descending) or reports
//! [`ShotError::Unreachable`].

use thiserror::Error;

use crate::config::ShotConfig;
use crate::types::{constants, Hoop, Side, Vec3};

/// Why a shot was not taken.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShotError {
    #[error("a shot is already in flight")]
    InFlight,
    #[error("the ball is out of play until it is reset")]
    OutOfPlay,
    #[error("the timed challenge is over")]
    ChallengeOver,
    #[error("hoop unreachable at the configured arc (distance {distance:.2} m, rise {rise:.2} m)")]
    Unreachable { distance: f64, rise: f64 },
}

/// Solved launch for one shot attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchSolution {
    pub velocity: Vec3,
    /// Launch speed after power scaling
    pub speed: f64,
    /// Speed a full-power shot would need
    pub full_speed: f64,
    /// Launch angle in radians
    pub angle: f64,
    pub target: Side,
    pub distance: f64,
    pub power: f64,
    /// The fixed angle was infeasible and a steeper arc was used
    pub steepened: bool,
}

/// Fixed-angle projectile solver.
#[derive(Debug, Clone, Copy)]
pub struct ShotSolver {
    /// Signed vertical gravity (negative)
    pub gravity: f64,
    pub launch_angle: f64,
    pub adaptive_arc: bool,
    pub fallback_arc_ratio: f64,
}

impl ShotSolver {
    pub fn from_config(config: &ShotConfig, gravity: f64) -> Self {
        Self {
            gravity,
            launch_angle: config.launch_angle_deg.to_radians(),
            adaptive_arc: config.adaptive_arc,
            fallback_arc_ratio: config.fallback_arc_ratio,
        }
    }

    /// Nearest hoop by planar distance. Ties go to the earlier hoop.
    pub fn nearest_hoop<'h>(from: &Vec3, hoops: &'h [Hoop]) -> Option<&'h Hoop> {
        hoops.iter().fold(None, |best: Option<&Hoop>, hoop| match best {
            Some(current) if current.horizontal_distance(from) <= hoop.horizontal_distance(from) => {
                Some(current)
            }
            _ => Some(hoop),
        })
    }

    /// Speed needed to pass through a point `distance` away and `rise` above
    /// the launch point at `angle`. `None` when the angle cannot get there.
    pub fn required_speed(&self, distance: f64, rise: f64, angle: f64) -> Option<f64> {
        let cos = angle.cos();
        let denominator = 2.0 * cos * cos * (distance * angle.tan() - rise);
        if denominator <= constants::EPSILON {
            return None;
        }
        let speed_squared = self.gravity.abs() * distance * distance / denominator;
        speed_squared.is_finite().then(|| speed_squared.sqrt())
    }

    /// Solve the launch velocity from `from` toward `hoop` at `power` percent.
    pub fn solve(&self, from: Vec3, hoop: &Hoop, power: f64) -> Result<LaunchSolution, ShotError> {
        let distance = hoop.horizontal_distance(&from);
        let rise = hoop.rim_height - from.y;
        let unreachable = ShotError::Unreachable { distance, rise };

        if distance < 1e-6 {
            return Err(unreachable);
        }

        let (angle, full_speed, steepened) =
            match self.required_speed(distance, rise, self.launch_angle) {
                Some(speed) => (self.launch_angle, speed, false),
                None if self.adaptive_arc => {
                    let angle = (self.fallback_arc_ratio * rise / distance).atan();
                    let speed = self.required_speed(distance, rise, angle).ok_or(unreachable)?;
                    (angle, speed, true)
                }
                None => return Err(unreachable),
            };

        let power = power.clamp(constants::MIN_POWER, constants::MAX_POWER);
        let speed = full_speed * power / constants::MAX_POWER;
        let direction = (hoop.center() - from).horizontal().normalized();
        let horizontal_speed = speed * angle.cos();

        Ok(LaunchSolution {
            velocity: Vec3::new(
                direction.x * horizontal_speed,
                speed * angle.sin(),
                direction.z * horizontal_speed,
            ),
            speed,
            full_speed,
            angle,
            target: hoop.side,
            distance,
            power,
            steepened,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
