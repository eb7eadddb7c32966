//! Contact detection between the ball and the static court geometry.

use crate::types::{Backboard, BallState, Court, Side, Vec3};

/// What the ball touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTarget {
    Ground,
    Backboard(Side),
}

/// Detailed contact information.
///
/// `surface` is the coordinate the ball center is clamped back to along the
/// contact normal (y for the ground, x for a backboard).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub target: ContactTarget,
    pub normal: Vec3,
    pub surface: f64,
    pub penetration: f64,
}

/// Collision detector for a ball of fixed radius.
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector {
    pub ball_radius: f64,
}

impl CollisionDetector {
    pub fn new(ball_radius: f64) -> Self {
        Self { ball_radius }
    }

    /// Detect contact with the court surface.
    ///
    /// The floor is the horizontal plane the idle ball rests on; contact
    /// occurs whenever the center is at or below the rest height.
    pub fn detect_ground(&self, ball: &BallState, court: &Court) -> Option<Contact> {
        let rest_height = court.rest_height(self.ball_radius);
        if ball.pos.y > rest_height {
            return None;
        }

        Some(Contact {
            target: ContactTarget::Ground,
            normal: Vec3::new(0.0, 1.0, 0.0),
            surface: rest_height,
            penetration: rest_height - ball.pos.y,
        })
    }

    /// Detect contact with one backboard after a step of `dt`.
    ///
    /// Triggers only for a ball moving toward the board from the court side
    /// whose leading edge has crossed the near face. The center one step
    /// back must be on the court side of the board's center plane, so a ball
    /// that dropped in behind the board is ignored.
    pub fn detect_backboard(
        &self,
        ball: &BallState,
        board: &Backboard,
        dt: f64,
    ) -> Option<Contact> {
        let facing = board.facing_sign;

        // Moving away from the board (or parallel to it)
        if ball.vel.x * facing >= 0.0 {
            return None;
        }

        if !board.spans(ball.pos.y, ball.pos.z) {
            return None;
        }

        // Signed distance of the center in front of the board's center plane
        let reach = board.half_thickness + self.ball_radius;
        let offset = (ball.pos.x - board.x) * facing;
        if offset > reach {
            return None;
        }

        let previous_x = ball.pos.x - ball.vel.x * dt;
        let previous_offset = (previous_x - board.x) * facing;
        if previous_offset <= 0.0 {
            return None;
        }

        Some(Contact {
            target: ContactTarget::Backboard(board.side),
            normal: Vec3::new(facing, 0.0, 0.0),
            surface: board.x + facing * reach,
            penetration: reach - offset,
        })
    }

    /// First backboard the ball is touching this step, if any.
    pub fn detect_backboards(
        &self,
        ball: &BallState,
        boards: &[Backboard],
        dt: f64,
    ) -> Option<Contact> {
        boards
            .iter()
            .find_map(|board| self.detect_backboard(ball, board, dt))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn setup() -> (CollisionDetector, Court, [Backboard; 2]) {
        let config = SimulationConfig::default();
        (
            CollisionDetector::new(config.ball.radius),
            Court::from_config(&config.court),
            Backboard::pair(&config.backboard),
        )
    }

    fn flying(pos: Vec3, vel: Vec3) -> BallState {
        BallState {
            pos,
            vel,
            rotation: Vec3::ZERO,
            in_flight: true,
        }
    }

    #[test]
    fn test_ground_contact_below_rest_height() {
        let (detector, court, _) = setup();
        let ball = flying(Vec3::new(2.0, 0.40, 1.0), Vec3::new(0.0, -3.0, 0.0));

        let contact = detector.detect_ground(&ball, &court);

        assert!(contact.is_some(), "Should detect ground contact");
        let info = contact.unwrap();
        assert_eq!(info.target, ContactTarget::Ground);
        assert!((info.surface - 0.44).abs() < 1e-10);
        assert!((info.penetration - 0.04).abs() < 1e-10);
    }

    #[test]
    fn test_no_ground_contact_in_air() {
        let (detector, court, _) = setup();
        let ball = flying(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, -3.0, 0.0));
        assert!(detector.detect_ground(&ball, &court).is_none());
    }

    #[test]
    fn test_home_backboard_contact() {
        let (detector, _, boards) = setup();
        // Leading edge at 14.76 + 0.24 = 15.0, past the near face at 14.975
        let ball = flying(Vec3::new(14.76, 3.2, 0.1), Vec3::new(6.0, -1.0, 0.0));

        let contact = detector.detect_backboard(&ball, &boards[0], 1.0 / 60.0);

        assert!(contact.is_some(), "Should hit the home board");
        let info = contact.unwrap();
        assert_eq!(info.target, ContactTarget::Backboard(Side::Home));
        assert_eq!(info.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!((info.surface - (15.0 - 0.025 - 0.24)).abs() < 1e-10);
        assert!(info.penetration > 0.0);
    }

    #[test]
    fn test_away_backboard_is_mirrored() {
        let (detector, _, boards) = setup();
        let ball = flying(Vec3::new(-14.76, 3.2, 0.0), Vec3::new(-6.0, 0.0, 0.0));

        let contact = detector.detect_backboards(&ball, &boards, 1.0 / 60.0);

        let info = contact.expect("Should hit the away board");
        assert_eq!(info.target, ContactTarget::Backboard(Side::Away));
        assert!((info.surface + (15.0 - 0.025 - 0.24)).abs() < 1e-10);
    }

    #[test]
    fn test_no_backboard_contact_moving_away() {
        let (detector, _, boards) = setup();
        let ball = flying(Vec3::new(14.76, 3.2, 0.0), Vec3::new(-6.0, 0.0, 0.0));
        assert!(detector.detect_backboard(&ball, &boards[0], 1.0 / 60.0).is_none());
    }

    #[test]
    fn test_no_backboard_contact_below_board() {
        let (detector, _, boards) = setup();
        let ball = flying(Vec3::new(14.8, 1.5, 0.0), Vec3::new(6.0, 0.0, 0.0));
        assert!(detector.detect_backboard(&ball, &boards[0], 1.0 / 60.0).is_none());
    }

    #[test]
    fn test_fast_ball_does_not_tunnel() {
        let (detector, _, boards) = setup();
        // Center already behind the board plane after a large step
        let dt = 0.05;
        let ball = flying(Vec3::new(15.1, 3.0, 0.0), Vec3::new(12.0, 0.0, 0.0));

        let contact = detector.detect_backboard(&ball, &boards[0], dt);
        assert!(contact.is_some(), "Swept check should catch the crossing");
    }

    #[test]
    fn test_ball_just_behind_board_plane_is_ignored() {
        let (detector, _, boards) = setup();
        // Within reach of the center plane, but on the far side of it
        let ball = flying(Vec3::new(15.1, 3.5, 0.0), Vec3::new(0.5, -3.0, 0.0));
        assert!(
            detector.detect_backboard(&ball, &boards[0], 1.0 / 60.0).is_none(),
            "Ball behind the board must not be pulled through to the front face"
        );
    }

    #[test]
    fn test_ball_behind_board_is_ignored() {
        let (detector, _, boards) = setup();
        // Dropped in behind the board, still drifting outward
        let ball = flying(Vec3::new(15.6, 3.0, 0.0), Vec3::new(1.0, -2.0, 0.0));
        assert!(detector.detect_backboard(&ball, &boards[0], 1.0 / 60.0).is_none());
    }
}
