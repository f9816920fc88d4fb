//! Game entities: rectangular bodies, the ball and power-up pickups
//!
//! Everything is a `Body` underneath; the ball and power-ups embed one by value.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::resources::{TextureHandle, names};

/// Rectangular game body (bricks, paddle, and the base of balls/pickups)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Multiplicative tint
    pub color: Vec3,
    /// Degrees
    pub rotation: f32,
    pub solid: bool,
    pub destroyed: bool,
    pub sprite: TextureHandle,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ONE,
            velocity: Vec2::ZERO,
            color: Vec3::ONE,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            sprite: TextureHandle::MISSING,
        }
    }
}

impl Body {
    pub fn new(position: Vec2, size: Vec2, sprite: TextureHandle) -> Self {
        Self {
            position,
            size,
            sprite,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// The ball: a circle layered over a square body of side `2 * radius`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    /// Glued to the paddle; ignores integration
    pub stuck: bool,
    /// Re-glues on paddle contact
    pub sticky: bool,
    /// Breaks destructible bricks without bouncing off them
    pub pass_through: bool,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2, sprite: TextureHandle) -> Self {
        Self {
            body: Body::new(position, Vec2::splat(radius * 2.0), sprite).with_velocity(velocity),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Circle center. Relies on `size.x == size.y`.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.position + Vec2::splat(self.radius)
    }

    /// Integrate position, bouncing off the left, right and top edges.
    /// The bottom edge is open. Returns the new position.
    pub fn step(&mut self, dt: f32, window_width: f32) -> Vec2 {
        if self.stuck {
            return self.body.position;
        }

        let body = &mut self.body;
        body.position += body.velocity * dt;

        if body.position.x <= 0.0 {
            body.velocity.x = -body.velocity.x;
            body.position.x = 0.0;
        } else if body.position.x + body.size.x >= window_width {
            body.velocity.x = -body.velocity.x;
            body.position.x = window_width - body.size.x;
        }
        if body.position.y <= 0.0 {
            body.velocity.y = -body.velocity.y;
            body.position.y = 0.0;
        }

        body.position
    }

    /// Re-glue with a fresh position and velocity, clearing power-up flags
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.body.position = position;
        self.body.velocity = velocity;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn rolls happen in this order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub fn color(&self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Seconds the effect lasts once collected (0 = instantaneous)
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    /// Disruptive power-ups spawn more often
    pub fn is_negative(&self) -> bool {
        matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    /// 1-in-N spawn odds per destroyed brick
    pub fn spawn_chance(&self) -> u32 {
        if self.is_negative() {
            NEGATIVE_SPAWN_CHANCE
        } else {
            POSITIVE_SPAWN_CHANCE
        }
    }

    pub fn texture_name(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => names::POWERUP_SPEED,
            PowerUpKind::Sticky => names::POWERUP_STICKY,
            PowerUpKind::PassThrough => names::POWERUP_PASSTHROUGH,
            PowerUpKind::PadSizeIncrease => names::POWERUP_INCREASE,
            PowerUpKind::Confuse => names::POWERUP_CONFUSE,
            PowerUpKind::Chaos => names::POWERUP_CHAOS,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Seconds remaining once activated
    pub duration: f32,
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2, sprite: TextureHandle) -> Self {
        Self {
            body: Body::new(position, POWERUP_SIZE, sprite)
                .with_color(kind.color())
                .with_velocity(POWERUP_VELOCITY),
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }
}
