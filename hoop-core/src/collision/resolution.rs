//! Collision response for the basketball.
//!
//! ## Model Assumptions
//!
//! - **Floor**: vertical speed is reflected and scaled by the bounce
//!   coefficient, horizontal speed is scaled by an isotropic friction factor.
//!   A bounce that leaves too little energy puts the ball to rest. Both rest
//!   thresholds are compared against the velocity after the bounce has been
//!   applied, so a ball rests only once the bounce itself has drained it.
//!   This is an energy-floor heuristic, not resting-contact physics.
//! - **Backboard**: normal (x) speed is reflected with a loss factor, the
//!   in-plane components get a smaller damping to stand in for an impact
//!   that is neither elastic nor perfectly flat.
//! - **Static geometry**: floor and boards never move.

use crate::collision::detection::{Contact, ContactTarget};
use crate::config::{BackboardConfig, GroundConfig};
use crate::types::BallState;

/// How the ball responded to a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Floor contact, ball keeps moving
    Bounced,
    /// Floor contact drained the ball, it is no longer in flight
    Rested,
    /// Backboard contact
    Deflected,
}

/// Ball state after a contact has been resolved.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub state: BallState,
    pub response: ContactResponse,
}

/// Collision resolver for the court geometry.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Resolve a contact and return the new ball state.
    pub fn resolve(
        ball: &BallState,
        contact: &Contact,
        ground: &GroundConfig,
        backboard: &BackboardConfig,
    ) -> Resolution {
        match contact.target {
            ContactTarget::Ground => Self::resolve_ground(ball, contact, ground),
            ContactTarget::Backboard(_) => Self::resolve_backboard(ball, contact, backboard),
        }
    }

    /// Resolve contact with the court surface.
    fn resolve_ground(ball: &BallState, contact: &Contact, ground: &GroundConfig) -> Resolution {
        let mut state = *ball;
        state.pos.y = contact.surface;
        state.vel.y = -state.vel.y * ground.bounce_coefficient;
        state.vel.x *= ground.friction;
        state.vel.z *= ground.friction;

        if state.vel.y.abs() < ground.rest_vertical_speed && state.speed() < ground.rest_speed {
            state.settle();
            return Resolution {
                state,
                response: ContactResponse::Rested,
            };
        }

        Resolution {
            state,
            response: ContactResponse::Bounced,
        }
    }

    /// Resolve contact with a backboard.
    fn resolve_backboard(
        ball: &BallState,
        contact: &Contact,
        board: &BackboardConfig,
    ) -> Resolution {
        let mut state = *ball;
        state.pos.x = contact.surface;
        state.vel.x = -state.vel.x * board.reflection_loss;
        state.vel.y *= board.tangential_damping;
        state.vel.z *= board.tangential_damping;

        Resolution {
            state,
            response: ContactResponse::Deflected,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
