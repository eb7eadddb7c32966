//! # Hoop Core
//!
//! Flight and scoring engine for a single basketball on a two-hoop court.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, ball state, court, hoops, stats)
//! - `config`: Tunable constants as a serde-deserializable `SimulationConfig`
//! - `presets`: YAML preset loader
//! - `integrator`: Numerical integration (semi-implicit Euler)
//! - `forces`: Forces acting on the ball in flight (constant gravity)
//! - `collision`: Ground and backboard detection and resolution
//! - `shot`: Fixed-angle launch solver
//! - `scoring`: Rim-crossing detector with side attribution
//! - `schedule`: Generation-stamped deferred effects
//! - `challenge`: Timed challenge mode
//! - `events`: Events reported to UI and audio layers
//! - `session`: Main orchestrator
//!
//! ```
//! use hoop_core::Session;
//!
//! let mut session = Session::new();
//! session.shoot().unwrap();
//! for _ in 0..240 {
//!     session.tick(1.0 / 60.0);
//! }
//! for event in session.drain_events() {
//!     println!("{}", event.name());
//! }
//! ```

pub mod challenge;
pub mod collision;
pub mod config;
pub mod events;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod shot;
pub mod types;

pub use challenge::{ChallengeError, ChallengeState, ChallengeSummary, TimedChallenge};
pub use config::{ConfigError, SimulationConfig};
pub use events::{GameEvent, ResetReason};
pub use presets::PresetLoader;
pub use session::{MoveDirection, Session};
pub use shot::{LaunchSolution, ShotError};
pub use types::{BallState, SessionStats, Side, Vec3};
