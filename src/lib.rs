//! Breakout - brick-breaking arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, power-ups, levels, game state)
//! - `renderer`: Render collaborator contract and a recording backend
//! - `input`: Key state and per-frame input commands
//! - `resources`: Owned texture registry
//! - `settings`: JSON game configuration

pub mod error;
pub mod input;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use resources::{ResourceRegistry, TextureHandle};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (units per second)
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    pub const BALL_RADIUS: f32 = 12.5;
    /// Horizontal deflection factor applied on paddle hits
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Power-up pickups all share size and fall speed
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// 1-in-N odds for the helpful power-ups
    pub const POSITIVE_SPAWN_CHANCE: u32 = 75;
    /// 1-in-N odds for the disruptive power-ups
    pub const NEGATIVE_SPAWN_CHANCE: u32 = 15;
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Screen shake after hitting a solid brick (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Ball trail
    pub const PARTICLE_COUNT: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;

    /// Tints
    pub const DEFAULT_COLOR: Vec3 = Vec3::ONE;
    pub const STICKY_PADDLE_COLOR: Vec3 = Vec3::new(1.0, 0.5, 1.0);
    pub const PASS_THROUGH_BALL_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.5);
}
