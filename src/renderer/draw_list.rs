//! Recording backend
//!
//! Captures draw calls instead of issuing them. Used by the headless runner
//! and by tests.

use glam::{Vec2, Vec3, Vec4};

use super::{PostProcessor, SpriteRenderer};
use crate::resources::TextureHandle;
use crate::sim::state::PostEffects;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteCommand {
    pub texture: TextureHandle,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleCommand {
    pub texture: TextureHandle,
    pub position: Vec2,
    pub color: Vec4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Sprite(SpriteCommand),
    Particle(ParticleCommand),
}

/// Recorded draw calls, in submission order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprites(&self) -> impl Iterator<Item = &SpriteCommand> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Sprite(sprite) => Some(sprite),
            DrawCommand::Particle(_) => None,
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = &ParticleCommand> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Particle(particle) => Some(particle),
            DrawCommand::Sprite(_) => None,
        })
    }
}

impl SpriteRenderer for DrawList {
    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
    ) {
        self.commands.push(DrawCommand::Sprite(SpriteCommand {
            texture,
            position,
            size,
            rotation,
            color,
        }));
    }

    fn draw_particle(&mut self, texture: TextureHandle, position: Vec2, color: Vec4) {
        self.commands.push(DrawCommand::Particle(ParticleCommand {
            texture,
            position,
            color,
        }));
    }
}

/// Post-processor that only remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct PostRecorder {
    /// Completed begin/end/render cycles
    pub frames: u32,
    pub last_effects: Option<PostEffects>,
    pub last_time: f32,
    in_frame: bool,
}

impl PostProcessor for PostRecorder {
    fn begin_render(&mut self) {
        if self.in_frame {
            log::warn!("begin_render called twice without end_render");
        }
        self.in_frame = true;
    }

    fn end_render(&mut self) {
        if !self.in_frame {
            log::warn!("end_render called without begin_render");
        }
        self.in_frame = false;
    }

    fn render(&mut self, effects: PostEffects, time: f32) {
        self.frames += 1;
        self.last_effects = Some(effects);
        self.last_time = time;
    }
}
