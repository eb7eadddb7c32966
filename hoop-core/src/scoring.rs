//! Crossing-based score detection.
//!
//! A make needs evidence of downward passage through the rim plane across
//! two consecutive frames. A ball that simply sits inside the rim radius
//! below the rim (teleported, or moved there while idle) never scores.
//!
//! ```text
//!   previous frame   ●          y > rim_height
//!   ─────────────── ═╪═ ─────── rim plane, |xz − rim| ≤ rim_radius
//!   current frame    ●          rim_height − band < y < rim_height, vy < 0
//! ```

use crate::types::{BallState, Hoop, Side, Vec3};

/// A registered make.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDetection {
    pub side: Side,
    /// Horizontal distance from the rim center at detection
    pub distance: f64,
}

/// Tracks the previous ball position and checks both hoops each tick.
#[derive(Debug, Clone)]
pub struct ScoreDetector {
    previous_pos: Vec3,
    detection_band: f64,
}

impl ScoreDetector {
    pub fn new(start: Vec3, detection_band: f64) -> Self {
        Self {
            previous_pos: start,
            detection_band,
        }
    }

    pub fn previous_position(&self) -> Vec3 {
        self.previous_pos
    }

    /// Forget the trajectory so far, e.g. after the ball was repositioned.
    pub fn reseed(&mut self, pos: Vec3) {
        self.previous_pos = pos;
    }

    /// Evaluate every hoop against the current ball state.
    ///
    /// Returns at most one make; if more than one hoop qualifies, the one
    /// closest to the ball center wins. The previous position is updated
    /// regardless of the outcome.
    pub fn check(&mut self, ball: &BallState, hoops: &[Hoop]) -> Option<ScoreDetection> {
        let detection = if ball.in_flight {
            hoops
                .iter()
                .filter_map(|hoop| {
                    self.crossing_distance(ball, hoop)
                        .map(|distance| ScoreDetection {
                            side: hoop.side,
                            distance,
                        })
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
        } else {
            None
        };

        self.previous_pos = ball.pos;
        detection
    }

    /// Horizontal distance to the rim center if the ball just dropped
    /// through `hoop`.
    fn crossing_distance(&self, ball: &BallState, hoop: &Hoop) -> Option<f64> {
        let distance = hoop.horizontal_distance(&ball.pos);
        let within_rim = distance <= hoop.rim_radius;
        let was_above = self.previous_pos.y > hoop.rim_height;
        let in_band = ball.pos.y < hoop.rim_height
            && ball.pos.y > hoop.rim_height - self.detection_band;
        let descending = ball.vel.y < 0.0;

        (within_rim && was_above && in_band && descending).then_some(distance)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn hoops() -> [Hoop; 2] {
        Hoop::pair(&SimulationConfig::default().hoops)
    }

    fn flying(pos: Vec3, vy: f64) -> BallState {
        BallState {
            pos,
            vel: Vec3::new(0.5, vy, 0.0),
            rotation: Vec3::ZERO,
            in_flight: true,
        }
    }

    #[test]
    fn test_downward_crossing_scores_once() {
        let hoops = hoops();
        let home = hoops[0];
        let mut detector = ScoreDetector::new(Vec3::ZERO, 0.4);

        let above = flying(Vec3::new(home.x, home.rim_height + 0.1, home.z), -3.0);
        assert!(detector.check(&above, &hoops).is_none());

        let below = flying(Vec3::new(home.x, home.rim_height - 0.1, home.z), -3.2);
        let detection = detector.check(&below, &hoops).expect("crossing should score");
        assert_eq!(detection.side, Side::Home);
        assert!(detection.distance < 1e-12);

        // Still in the band on the next frame, but no longer crossing
        let lower = flying(Vec3::new(home.x, home.rim_height - 0.2, home.z), -3.4);
        assert!(detector.check(&lower, &hoops).is_none());
    }

    #[test]
    fn test_away_hoop_attribution() {
        let hoops = hoops();
        let away = hoops[1];
        let mut detector = ScoreDetector::new(Vec3::new(away.x, away.rim_height + 0.05, 0.1), 0.4);

        let below = flying(Vec3::new(away.x + 0.1, away.rim_height - 0.05, 0.1), -2.0);
        let detection = detector.check(&below, &hoops);

        assert_eq!(detection.map(|d| d.side), Some(Side::Away));
    }

    #[test]
    fn test_teleport_into_band_does_not_score() {
        let hoops = hoops();
        let home = hoops[0];
        let mut detector = ScoreDetector::new(Vec3::new(0.0, 0.44, 0.0), 0.4);

        let inside = flying(Vec3::new(home.x, home.rim_height - 0.1, home.z), -1.0);
        assert!(detector.check(&inside, &hoops).is_none());
        assert_eq!(detector.previous_position(), inside.pos);
    }

    #[test]
    fn test_rising_ball_does_not_score() {
        let hoops = hoops();
        let home = hoops[0];
        let mut detector =
            ScoreDetector::new(Vec3::new(home.x, home.rim_height + 0.1, home.z), 0.4);

        let ball = flying(Vec3::new(home.x, home.rim_height - 0.1, home.z), 2.0);
        assert!(detector.check(&ball, &hoops).is_none());
    }

    #[test]
    fn test_crossing_outside_rim_does_not_score() {
        let hoops = hoops();
        let home = hoops[0];
        let mut detector =
            ScoreDetector::new(Vec3::new(home.x - 0.3, home.rim_height + 0.1, 0.0), 0.4);

        let ball = flying(Vec3::new(home.x - 0.3, home.rim_height - 0.1, 0.0), -3.0);
        assert!(detector.check(&ball, &hoops).is_none());
    }

    #[test]
    fn test_idle_ball_never_scores() {
        let hoops = hoops();
        let home = hoops[0];
        let mut detector =
            ScoreDetector::new(Vec3::new(home.x, home.rim_height + 0.1, home.z), 0.4);

        let mut ball = flying(Vec3::new(home.x, home.rim_height - 0.1, home.z), -3.0);
        ball.in_flight = false;
        assert!(detector.check(&ball, &hoops).is_none());
    }

    #[test]
    fn test_overlapping_hoops_pick_the_closer_rim() {
        let mut hoops = hoops();
        // Pull the away rim next to the home rim so both qualify
        hoops[1].x = hoops[0].x - 0.15;
        let home = hoops[0];
        let mut detector =
            ScoreDetector::new(Vec3::new(home.x - 0.1, home.rim_height + 0.1, 0.0), 0.4);

        let ball = flying(Vec3::new(home.x - 0.1, home.rim_height - 0.1, 0.0), -3.0);
        let detection = detector.check(&ball, &hoops).expect("one rim should score");

        assert_eq!(detection.side, Side::Away);
        assert!((detection.distance - 0.05).abs() < 1e-9);
    }
}
