//! Game state and lifecycle
//!
//! `GameState` exclusively owns every mutable entity: the paddle, the ball,
//! live power-ups, the loaded levels and the post-processing toggles.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Body, PowerUp};
use super::level::Level;
use super::particles::ParticleGenerator;
use crate::consts::*;
use crate::error::GameError;
use crate::resources::{ResourceRegistry, names};
use crate::settings::GameConfig;

/// Current phase of the game. Only `Active` simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Menu,
    Win,
}

/// Toggles consumed by the post-processing stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub levels: Vec<Level>,
    /// Index into `levels`
    pub level: usize,
    pub player: Body,
    pub ball: Ball,
    pub power_ups: Vec<PowerUp>,
    pub effects: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
    pub particles: ParticleGenerator,
    /// Accumulated simulation time, handed to the post-processor
    pub elapsed: f32,
    pub(crate) screen_shake_enabled: bool,
    pub(crate) resources: ResourceRegistry,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Build a game from already-loaded levels
    pub fn new(
        config: &GameConfig,
        resources: ResourceRegistry,
        levels: Vec<Level>,
    ) -> Result<Self, GameError> {
        if levels.is_empty() {
            return Err(GameError::NoLevels);
        }

        let width = config.screen_width;
        let height = config.screen_height;

        let player_pos = Vec2::new(width / 2.0 - PLAYER_SIZE.x / 2.0, height - PLAYER_SIZE.y);
        let player = Body::new(player_pos, PLAYER_SIZE, resources.texture(names::PADDLE));
        let ball_pos =
            player_pos + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0);
        let ball = Ball::new(
            ball_pos,
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
            resources.texture(names::BALL),
        );

        Ok(Self {
            phase: GamePhase::Active,
            width,
            height,
            levels,
            level: 0,
            player,
            ball,
            power_ups: Vec::new(),
            effects: PostEffects::default(),
            shake_time: 0.0,
            particles: ParticleGenerator::new(config.particles),
            elapsed: 0.0,
            screen_shake_enabled: config.screen_shake,
            resources,
            rng: Pcg32::seed_from_u64(config.seed),
        })
    }

    /// Load every configured level file and build the game
    pub fn init(config: &GameConfig, resources: ResourceRegistry) -> Result<Self, GameError> {
        let (level_width, level_height) = config.level_area();
        let levels = config
            .levels
            .iter()
            .map(|path| Level::load(path, level_width, level_height, &resources))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} levels", levels.len());
        Self::new(config, resources, levels)
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Restore the current level's bricks
    pub fn reset_level(&mut self) {
        self.levels[self.level].reset();
    }

    /// Move to the next level (wrapping after the last) and restore its bricks
    pub fn advance_level(&mut self) {
        self.level = (self.level + 1) % self.levels.len();
        self.reset_level();
        log::info!("Advanced to level {}", self.level + 1);
    }

    /// Paddle centered, ball glued above it, trail and power-up effects cleared
    pub fn reset_player(&mut self) {
        self.player.size = PLAYER_SIZE;
        self.player.position = Vec2::new(
            self.width / 2.0 - PLAYER_SIZE.x / 2.0,
            self.height - PLAYER_SIZE.y,
        );
        let ball_offset =
            Vec2::new(PLAYER_SIZE.x / 2.0 - self.ball.radius, -self.ball.radius * 2.0);
        self.ball.reset(self.player.position + ball_offset, INITIAL_BALL_VELOCITY);
        self.particles.clear();
        self.effects.confuse = false;
        self.effects.chaos = false;
        self.player.color = Vec3::ONE;
        self.ball.body.color = Vec3::ONE;
        self.power_ups.clear();
    }

    /// Start a screen shake, unless disabled in the configuration
    pub(crate) fn shake(&mut self) {
        if self.screen_shake_enabled {
            self.shake_time = SHAKE_DURATION;
            self.effects.shake = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TextureHandle;
    use crate::sim::entity::PowerUpKind;

    fn test_game(layout: &str) -> GameState {
        let config = GameConfig::default();
        let resources = ResourceRegistry::with_defaults();
        let (w, h) = config.level_area();
        let level = Level::parse(layout, w, h, &resources).expect("level");
        GameState::new(&config, resources, vec![level]).expect("game")
    }

    #[test]
    fn test_new_requires_levels() {
        let result = GameState::new(&GameConfig::default(), ResourceRegistry::new(), Vec::new());
        assert!(matches!(result, Err(GameError::NoLevels)));
    }

    #[test]
    fn test_initial_layout() {
        let game = test_game("2 2");
        assert_eq!(game.phase, GamePhase::Active);
        assert_eq!(game.player.position, Vec2::new(350.0, 580.0));
        assert_eq!(game.ball.body.position, Vec2::new(387.5, 555.0));
        assert!(game.ball.stuck);
        assert_eq!(game.ball.body.velocity, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_reset_player_restores_defaults() {
        let mut game = test_game("2 2");
        game.player.size.x += PAD_SIZE_INCREASE;
        game.player.position.x = 10.0;
        game.player.color = STICKY_PADDLE_COLOR;
        game.ball.stuck = false;
        game.ball.sticky = true;
        game.ball.pass_through = true;
        game.ball.body.color = PASS_THROUGH_BALL_COLOR;
        game.effects.confuse = true;
        game.power_ups
            .push(PowerUp::new(PowerUpKind::Chaos, Vec2::ZERO, TextureHandle::MISSING));
        game.particles.update(0.0, &game.ball.body, 4, Vec2::ZERO, &mut game.rng);
        assert!(game.particles.alive().count() > 0);

        game.reset_player();

        assert_eq!(game.player.size, PLAYER_SIZE);
        assert_eq!(game.player.position, Vec2::new(350.0, 580.0));
        assert_eq!(game.player.color, Vec3::ONE);
        assert!(game.ball.stuck);
        assert!(!game.ball.sticky);
        assert!(!game.ball.pass_through);
        assert_eq!(game.ball.body.color, Vec3::ONE);
        assert!(!game.effects.confuse);
        assert!(game.power_ups.is_empty());
        assert_eq!(game.particles.alive().count(), 0);
    }

    #[test]
    fn test_advance_level_wraps() {
        let config = GameConfig::default();
        let resources = ResourceRegistry::with_defaults();
        let levels = vec![
            Level::parse("2", 800.0, 300.0, &resources).expect("level"),
            Level::parse("3", 800.0, 300.0, &resources).expect("level"),
        ];
        let mut game = GameState::new(&config, resources, levels).expect("game");
        game.levels[1].bricks[0].destroyed = true;

        game.advance_level();
        assert_eq!(game.level, 1);
        assert_eq!(game.current_level().remaining(), 1);

        game.advance_level();
        assert_eq!(game.level, 0);
    }

    #[test]
    fn test_shake_respects_config() {
        let mut game = test_game("2");
        game.shake();
        assert!(game.effects.shake);
        assert_eq!(game.shake_time, SHAKE_DURATION);

        let mut game = test_game("2");
        game.screen_shake_enabled = false;
        game.shake();
        assert!(!game.effects.shake);
    }
}
