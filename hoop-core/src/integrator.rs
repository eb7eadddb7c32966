//! Time stepping for the ball in flight.
//!
//! The integrator is semi-implicit Euler: velocity is updated from the
//! acceleration first, then position from the new velocity.
//!
//! ```text
//! 1. v_new = v + a*dt
//! 2. x_new = x + v_new*dt
//! 3. rotation.x += |v_new|*dt*gain, rotation.z += v_new.x*dt*gain
//! ```
//!
//! Termination (bounces, resting, scoring) is not decided here; see
//! [`crate::collision`] and [`crate::scoring`].

use crate::types::{BallState, Vec3};

/// Result of an integration step, containing the new state and metadata.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationResult {
    pub state: BallState,
    pub acceleration: Vec3,
}

/// Trait for computing the accelerations acting on the ball.
pub trait ForceModel {
    /// Compute linear acceleration given current state.
    fn linear_acceleration(&self, state: &BallState) -> Vec3;
}

/// Clamp a frame delta to `[0, max_dt]`.
///
/// Frame hitches would otherwise let the ball tunnel through the floor or a
/// backboard. Non-finite and negative deltas count as no time passing.
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

/// Semi-implicit Euler integrator for the basketball.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance the ball state by one time step.
    ///
    /// # Arguments
    /// * `state` - Current ball state
    /// * `forces` - Force model providing accelerations
    /// * `rotation_gain` - Visual spin per unit of travel
    /// * `dt` - Time step in seconds
    ///
    /// A ball that is not in flight is returned unchanged.
    pub fn step<F: ForceModel>(
        state: &BallState,
        forces: &F,
        rotation_gain: f64,
        dt: f64,
    ) -> IntegrationResult {
        if !state.in_flight {
            return IntegrationResult {
                state: *state,
                acceleration: Vec3::ZERO,
            };
        }

        let acceleration = forces.linear_acceleration(state);
        let vel = state.vel + acceleration * dt;
        let pos = state.pos + vel * dt;

        let mut rotation = state.rotation;
        rotation.x += vel.magnitude() * dt * rotation_gain;
        rotation.z += vel.x * dt * rotation_gain;

        IntegrationResult {
            state: BallState {
                pos,
                vel,
                rotation,
                in_flight: true,
            },
            acceleration,
        }
    }

    /// Advance the ball state by multiple substeps of `dt` each.
    pub fn step_n<F: ForceModel>(
        state: &BallState,
        forces: &F,
        rotation_gain: f64,
        dt: f64,
        substeps: usize,
    ) -> IntegrationResult {
        let mut current = IntegrationResult {
            state: *state,
            acceleration: Vec3::ZERO,
        };

        for _ in 0..substeps {
            current = Self::step(&current.state, forces, rotation_gain, dt);
        }

        current
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::Gravity;

    fn launched(pos: Vec3, vel: Vec3) -> BallState {
        BallState {
            pos,
            vel,
            rotation: Vec3::ZERO,
            in_flight: true,
        }
    }

    #[test]
    fn test_idle_ball_is_untouched() {
        let gravity = Gravity::vertical(-9.8);
        let ball = BallState::at_rest(Vec3::new(1.0, 0.44, -2.0));

        let result = SemiImplicitEuler::step_n(&ball, &gravity, 5.0, 0.016, 100);

        assert_eq!(result.state, ball);
        assert_eq!(result.state.vel, Vec3::ZERO);
    }

    #[test]
    fn test_vertical_velocity_drops_by_g_dt() {
        let gravity = Gravity::vertical(-9.8);
        let dt = 0.02;
        let mut state = launched(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, 8.0, 1.0));

        for _ in 0..20 {
            let before = state.vel.y;
            state = SemiImplicitEuler::step(&state, &gravity, 5.0, dt).state;
            assert!(
                (before - state.vel.y - 9.8 * dt).abs() < 1e-9,
                "vy should fall by |g|*dt, went {} -> {}",
                before,
                state.vel.y
            );
        }
        // Horizontal velocity is untouched without collisions
        assert_eq!(state.vel.x, 3.0);
        assert_eq!(state.vel.z, 1.0);
    }

    #[test]
    fn test_position_uses_updated_velocity() {
        let gravity = Gravity::vertical(-10.0);
        let ball = launched(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let result = SemiImplicitEuler::step(&ball, &gravity, 0.0, 0.1);

        assert!((result.state.vel.y + 1.0).abs() < 1e-12);
        assert!((result.state.pos.y + 0.1).abs() < 1e-12);
        assert!((result.state.pos.x - 0.1).abs() < 1e-12);
        assert_eq!(result.acceleration, Vec3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn test_rotation_follows_speed() {
        let gravity = Gravity::vertical(-9.8);
        let ball = launched(Vec3::new(0.0, 3.0, 0.0), Vec3::new(-4.0, 0.0, 3.0));
        let dt = 0.01;

        let result = SemiImplicitEuler::step(&ball, &gravity, 5.0, dt);
        let vel = result.state.vel;

        assert!((result.state.rotation.x - vel.magnitude() * dt * 5.0).abs() < 1e-12);
        assert!((result.state.rotation.z - vel.x * dt * 5.0).abs() < 1e-12);
        assert!(result.state.rotation.z < 0.0);
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        // Semi-implicit Euler drops an extra g*dt*t/2 compared to the exact parabola
        let gravity = Gravity::vertical(-9.8);
        let ball = launched(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let dt = 0.001;
        let steps = 1000;

        let result = SemiImplicitEuler::step_n(&ball, &gravity, 0.0, dt, steps);
        let t = dt * steps as f64;
        let exact = 10.0 - 0.5 * 9.8 * t * t;

        assert!(
            (result.state.pos.y - exact).abs() < 9.8 * dt * t,
            "Expected y near {}, got {}",
            exact,
            result.state.pos.y
        );
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016, 0.05), 0.016);
        assert_eq!(clamp_dt(0.5, 0.05), 0.05);
        assert_eq!(clamp_dt(-1.0, 0.05), 0.0);
        assert_eq!(clamp_dt(f64::NAN, 0.05), 0.0);
        assert_eq!(clamp_dt(f64::INFINITY, 0.05), 0.0);
    }
}
