//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Seeded RNG only
//! - Single owner (`GameState`) for every mutable entity

pub mod collision;
pub mod entity;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Direction, check_aabb, check_circle_aabb};
pub use entity::{Ball, Body, PowerUp, PowerUpKind};
pub use level::{Level, LevelLoadError};
pub use particles::{Particle, ParticleGenerator};
pub use state::{GamePhase, GameState, PostEffects};
pub use tick::{do_collisions, process_input, tick, update};
