//! Collision detection and resolution for the basketball.
//!
//! This module handles:
//! - **Detection**: whether the ball touches the floor or a backboard this tick
//! - **Resolution**: post-contact position clamp and velocity response
//!
//! ## Backboard Contact
//!
//! A board only reacts to a ball coming from the court side. The ball's
//! leading edge has to reach the near face while the previous position was
//! still in front of the board, which also catches fast balls that would
//! otherwise skip the thin slab in one frame.
//!
//! ```text
//!   court side          board
//!                        ┃┃
//!        ●──────────→    ┃┃   facing_sign = -1 (home board)
//!           ←──────● ◀── ┃┃   vx reflected, scaled by reflection_loss
//!                        ┃┃
//! ```
//!
//! Out-of-bounds is a property of [`crate::types::Court`] and is handled by
//! the session, strictly before scoring.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
