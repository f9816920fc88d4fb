//! Render collaborator contract
//!
//! The simulation never touches the GPU. A backend implements
//! `SpriteRenderer` and `PostProcessor`; `render` walks the game state and
//! issues draw calls in back-to-front order.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList, PostRecorder};

use glam::{Vec2, Vec3, Vec4};

use crate::resources::{TextureHandle, names};
use crate::sim::GameState;
use crate::sim::state::PostEffects;

/// Draws textured quads
pub trait SpriteRenderer {
    /// `position` is the top-left corner, `rotation` in degrees
    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
    );

    /// Additively blended particle quad
    fn draw_particle(&mut self, texture: TextureHandle, position: Vec2, color: Vec4);
}

/// Full-screen effect pass wrapped around the scene
pub trait PostProcessor {
    fn begin_render(&mut self);
    fn end_render(&mut self);
    fn render(&mut self, effects: PostEffects, time: f32);
}

/// Draw one frame of `state`
pub fn render<S, P>(state: &GameState, sprites: &mut S, post: &mut P)
where
    S: SpriteRenderer,
    P: PostProcessor,
{
    let resources = state.resources();

    post.begin_render();

    sprites.draw_sprite(
        resources.texture(names::BACKGROUND),
        Vec2::ZERO,
        Vec2::new(state.width, state.height),
        0.0,
        Vec3::ONE,
    );

    for brick in state.current_level().bricks.iter().filter(|b| !b.destroyed) {
        sprites.draw_sprite(brick.sprite, brick.position, brick.size, brick.rotation, brick.color);
    }

    let player = &state.player;
    sprites.draw_sprite(player.sprite, player.position, player.size, player.rotation, player.color);

    for power_up in state.power_ups.iter().filter(|p| !p.body.destroyed) {
        let body = &power_up.body;
        sprites.draw_sprite(body.sprite, body.position, body.size, body.rotation, body.color);
    }

    if !state.ball.stuck {
        let particle = resources.texture(names::PARTICLE);
        for p in state.particles.alive() {
            sprites.draw_particle(particle, p.position, p.color);
        }
    }

    let ball = &state.ball.body;
    sprites.draw_sprite(ball.sprite, ball.position, ball.size, ball.rotation, ball.color);

    post.end_render();
    post.render(state.effects, state.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TickInput;
    use crate::resources::ResourceRegistry;
    use crate::settings::GameConfig;
    use crate::sim::level::Level;
    use crate::sim::tick;

    fn game() -> GameState {
        let config = GameConfig::default();
        let resources = ResourceRegistry::with_defaults();
        let level = Level::parse("1 2 3\n0 0 0", 800.0, 300.0, &resources).expect("level");
        GameState::new(&config, resources, vec![level]).expect("game")
    }

    #[test]
    fn test_draw_order_and_count() {
        let mut state = game();
        state.levels[0].bricks[2].destroyed = true;

        let mut list = DrawList::default();
        let mut post = PostRecorder::default();
        render(&state, &mut list, &mut post);

        // background, 2 bricks, paddle, ball
        assert_eq!(list.sprites().count(), 5);
        assert_eq!(list.particles().count(), 0);
        let first = list.sprites().next().expect("background");
        assert_eq!(first.texture, state.resources().texture(names::BACKGROUND));
        let last = list.sprites().last().expect("ball");
        assert_eq!(last.position, state.ball.body.position);
        assert_eq!(post.frames, 1);
    }

    #[test]
    fn test_particles_drawn_once_ball_is_free() {
        let mut state = game();
        let release = TickInput {
            release: true,
            ..Default::default()
        };
        tick::tick(&mut state, &release, 1.0 / 60.0);

        let mut list = DrawList::default();
        let mut post = PostRecorder::default();
        render(&state, &mut list, &mut post);
        assert_eq!(list.particles().count(), 2);
    }

    #[test]
    fn test_effects_forwarded() {
        let mut state = game();
        state.effects.chaos = true;
        state.elapsed = 2.5;

        let mut list = DrawList::default();
        let mut post = PostRecorder::default();
        render(&state, &mut list, &mut post);
        assert_eq!(post.last_effects, Some(state.effects));
        assert_eq!(post.last_time, 2.5);
    }
}
