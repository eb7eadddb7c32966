//! Forces acting on the ball in flight.
//!
//! The flight model is deliberately simple: a constant downward
//! acceleration, no drag and no Magnus lift. Spin is tracked for display
//! only and never feeds back into the trajectory.

use crate::integrator::ForceModel;
use crate::types::{BallState, Vec3};

/// Constant gravitational field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub acceleration: Vec3,
}

impl Gravity {
    /// Vertical field of the given signed strength (negative pulls down).
    pub fn vertical(g: f64) -> Self {
        Self {
            acceleration: Vec3::new(0.0, g, 0.0),
        }
    }

    /// Signed vertical component, as used by the shot solver.
    pub fn vertical_component(&self) -> f64 {
        self.acceleration.y
    }
}

impl ForceModel for Gravity {
    fn linear_acceleration(&self, _state: &BallState) -> Vec3 {
        self.acceleration
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_ignores_state() {
        let gravity = Gravity::vertical(-9.8);
        let mut ball = BallState::at_rest(Vec3::new(0.0, 5.0, 0.0));
        let at_rest = gravity.linear_acceleration(&ball);

        ball.vel = Vec3::new(12.0, 3.0, -4.0);
        ball.in_flight = true;
        let moving = gravity.linear_acceleration(&ball);

        assert_eq!(at_rest, moving);
        assert_eq!(moving, Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(gravity.vertical_component(), -9.8);
    }
}
