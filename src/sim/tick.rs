//! Per-frame simulation
//!
//! Variable timestep: every integration and timer scales with the frame's `dt`.
//! Order per frame: input, ball integration, collisions, particles,
//! power-ups, shake decay, ball-lost check, level-completion check.

use glam::Vec2;

use super::collision::{CollisionResult, Direction, check_aabb, check_circle_aabb};
use super::powerup::{activate, spawn_power_ups, update_power_ups};
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::input::TickInput;

/// Input then update for one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}

/// Paddle movement (clamped to the screen) and ball release
pub fn process_input(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }

    let velocity = PLAYER_VELOCITY * dt;
    let max_x = (state.width - state.player.size.x).max(0.0);

    let mut delta = 0.0;
    if input.left {
        delta -= velocity;
    }
    if input.right {
        delta += velocity;
    }

    // Clamp even when idle: a grown paddle may have been pushed past the edge
    let old_x = state.player.position.x;
    let new_x = (old_x + delta).clamp(0.0, max_x);
    if new_x != old_x {
        state.player.position.x = new_x;
        if state.ball.stuck {
            state.ball.body.position.x += new_x - old_x;
        }
    }

    if input.release {
        state.ball.stuck = false;
    }
}

/// Advance the simulation by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }
    state.elapsed += dt;

    state.ball.step(dt, state.width);

    do_collisions(state);

    let offset = Vec2::splat(state.ball.radius / 2.0);
    state
        .particles
        .update(dt, &state.ball.body, PARTICLES_PER_FRAME, offset, &mut state.rng);

    update_power_ups(
        &mut state.power_ups,
        dt,
        &mut state.ball,
        &mut state.player,
        &mut state.effects,
    );

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }

    if state.ball.body.position.y >= state.height {
        log::debug!("Ball lost on level {}", state.level + 1);
        state.reset_level();
        state.reset_player();
    }

    if state.current_level().is_completed() {
        log::info!("Level {} completed", state.level + 1);
        state.advance_level();
        state.reset_player();
    }
}

/// Resolve ball vs bricks, power-ups vs paddle, and ball vs paddle
pub fn do_collisions(state: &mut GameState) {
    let mut solid_hit = false;

    for brick in state.levels[state.level].bricks.iter_mut() {
        if brick.destroyed {
            continue;
        }
        let CollisionResult::Hit {
            direction,
            penetration,
        } = check_circle_aabb(&state.ball, brick)
        else {
            continue;
        };

        if brick.solid {
            solid_hit = true;
        } else {
            brick.destroyed = true;
            spawn_power_ups(
                &mut state.rng,
                &mut state.power_ups,
                brick.position,
                &state.resources,
            );
        }

        if state.ball.pass_through && !brick.solid {
            continue;
        }
        resolve_brick_hit(&mut state.ball, direction, penetration);
    }

    if solid_hit {
        state.shake();
    }

    for power_up in state.power_ups.iter_mut() {
        if power_up.body.destroyed {
            continue;
        }
        if power_up.body.position.y >= state.height {
            power_up.body.destroyed = true;
        }
        if check_aabb(&state.player, &power_up.body) {
            activate(
                power_up.kind,
                &mut state.ball,
                &mut state.player,
                &mut state.effects,
            );
            power_up.body.destroyed = true;
            power_up.activated = true;
        }
    }

    if !state.ball.stuck && check_circle_aabb(&state.ball, &state.player).is_hit() {
        bounce_off_paddle(state);
    }
}

/// Reflect along the contact axis and push the ball out of the brick
fn resolve_brick_hit(ball: &mut super::entity::Ball, direction: Direction, penetration: Vec2) {
    let body = &mut ball.body;
    if direction.is_horizontal() {
        body.velocity.x = -body.velocity.x;
        let depth = ball.radius - penetration.x.abs();
        if direction == Direction::Left {
            body.position.x += depth;
        } else {
            body.position.x -= depth;
        }
    } else {
        body.velocity.y = -body.velocity.y;
        let depth = ball.radius - penetration.y.abs();
        if direction == Direction::Up {
            body.position.y -= depth;
        } else {
            body.position.y += depth;
        }
    }
}

/// Deflect by impact offset from the paddle center, always upward, keeping speed
fn bounce_off_paddle(state: &mut GameState) {
    let half_width = state.player.size.x / 2.0;
    let paddle_center = state.player.position.x + half_width;
    let offset = (state.ball.center().x - paddle_center) / half_width;

    let body = &mut state.ball.body;
    let speed = body.velocity.length();
    body.velocity.x = INITIAL_BALL_VELOCITY.x * offset * PADDLE_BOUNCE_STRENGTH;
    body.velocity.y = -body.velocity.y.abs();
    body.velocity = body.velocity.normalize_or_zero() * speed;

    state.ball.stuck = state.ball.sticky;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{ResourceRegistry, TextureHandle};
    use crate::settings::GameConfig;
    use crate::sim::entity::{PowerUp, PowerUpKind};
    use crate::sim::level::Level;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn game_with(layout: &str, config: &GameConfig) -> GameState {
        let resources = ResourceRegistry::with_defaults();
        let (w, h) = config.level_area();
        let level = Level::parse(layout, w, h, &resources).expect("level");
        GameState::new(config, resources, vec![level]).expect("game")
    }

    fn game(layout: &str) -> GameState {
        game_with(layout, &GameConfig::default())
    }

    /// Single brick the ball is sure to reach
    fn with_brick(solid: bool) -> GameState {
        // Two rows over 300 units: bricks are 400x150
        let layout = if solid { "1 0\n0 2" } else { "2 0\n0 3" };
        game(layout)
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let mut state = game("2");
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        process_input(&mut state, &left, 0.1);
        assert_eq!(state.player.position.x, 300.0);

        process_input(&mut state, &left, 10.0);
        assert_eq!(state.player.position.x, 0.0);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        process_input(&mut state, &right, 10.0);
        assert_eq!(state.player.position.x, 700.0);
    }

    #[test]
    fn test_grown_paddle_pulled_back_inside() {
        let mut state = game("2");
        state.player.position.x = 700.0;
        state.player.size.x += PAD_SIZE_INCREASE;
        process_input(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.position.x, 650.0);
    }

    #[test]
    fn test_stuck_ball_follows_paddle() {
        let mut state = game("2");
        let ball_x = state.ball.body.position.x;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        // Paddle can only travel 350 before the wall
        process_input(&mut state, &left, 1.0);
        assert_eq!(state.player.position.x, 0.0);
        assert_eq!(state.ball.body.position.x, ball_x - 350.0);
    }

    #[test]
    fn test_release_frees_ball() {
        let mut state = game("2");
        let release = TickInput {
            release: true,
            ..Default::default()
        };
        let pos = state.ball.body.position;
        process_input(&mut state, &release, DT);
        assert!(!state.ball.stuck);
        update(&mut state, DT);
        assert_ne!(state.ball.body.position, pos);
    }

    #[test]
    fn test_inactive_phase_is_frozen() {
        let mut state = game("2");
        state.phase = GamePhase::Menu;
        state.ball.stuck = false;
        let before = state.ball.body.position;
        tick(
            &mut state,
            &TickInput {
                left: true,
                release: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.ball.body.position, before);
        assert_eq!(state.player.position.x, 350.0);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_destructible_brick_destroyed_and_bounces() {
        let mut state = with_brick(false);
        // Ball center (200, 160) just under the first brick's bottom edge at 150
        state.ball.stuck = false;
        state.ball.body.position = Vec2::new(187.5, 147.5);
        state.ball.body.velocity = Vec2::new(0.0, -300.0);

        do_collisions(&mut state);

        assert!(state.levels[0].bricks[0].destroyed);
        assert_eq!(state.ball.body.velocity, Vec2::new(0.0, 300.0));
        // Pushed down so the ball just touches the edge
        assert!((state.ball.body.position.y - 150.0).abs() < 1e-4);
        assert!(!state.effects.shake);
    }

    #[test]
    fn test_solid_brick_shakes_and_survives() {
        let mut state = with_brick(true);
        state.ball.stuck = false;
        state.ball.body.position = Vec2::new(187.5, 147.5);
        state.ball.body.velocity = Vec2::new(0.0, -300.0);

        do_collisions(&mut state);

        assert!(!state.levels[0].bricks[0].destroyed);
        assert!(state.effects.shake);
        assert_eq!(state.shake_time, SHAKE_DURATION);
        assert_eq!(state.ball.body.velocity.y, 300.0);
    }

    #[test]
    fn test_shake_disabled_by_config() {
        let config = GameConfig {
            screen_shake: false,
            ..Default::default()
        };
        let mut state = game_with("1 0\n0 2", &config);
        state.ball.stuck = false;
        state.ball.body.position = Vec2::new(187.5, 147.5);
        do_collisions(&mut state);
        assert!(!state.effects.shake);
    }

    #[test]
    fn test_shake_decays() {
        let mut state = game("2 2\n0 0");
        state.shake();
        update(&mut state, 0.03);
        assert!(state.effects.shake);
        update(&mut state, 0.03);
        assert!(!state.effects.shake);
    }

    #[test]
    fn test_side_hit_reflects_horizontally() {
        let mut state = with_brick(false);
        // Second brick spans x 400..800, y 150..300; ball center (395, 225)
        state.ball.stuck = false;
        state.ball.body.position = Vec2::new(382.5, 212.5);
        state.ball.body.velocity = Vec2::new(200.0, 0.0);

        do_collisions(&mut state);

        assert!(state.levels[0].bricks[1].destroyed);
        assert_eq!(state.ball.body.velocity.x, -200.0);
        assert!((state.ball.center().x - 387.5).abs() < 1e-4);
    }

    #[test]
    fn test_ball_inside_brick_leaves_through_nearest_face() {
        let mut state = with_brick(false);
        // Center (200, 145) is inside the first brick, 5 above its bottom edge
        state.ball.stuck = false;
        state.ball.body.position = Vec2::new(187.5, 132.5);
        state.ball.body.velocity = Vec2::new(0.0, -300.0);

        do_collisions(&mut state);

        assert!(state.levels[0].bricks[0].destroyed);
        assert_eq!(state.ball.body.velocity, Vec2::new(0.0, 300.0));
        assert!(state.ball.center().y > 150.0);
    }

    #[test]
    fn test_pass_through_keeps_course() {
        let mut state = with_brick(false);
        state.ball.stuck = false;
        state.ball.pass_through = true;
        state.ball.body.position = Vec2::new(187.5, 147.5);
        state.ball.body.velocity = Vec2::new(0.0, -300.0);

        do_collisions(&mut state);

        assert!(state.levels[0].bricks[0].destroyed);
        assert_eq!(state.ball.body.velocity, Vec2::new(0.0, -300.0));
        assert_eq!(state.ball.body.position, Vec2::new(187.5, 147.5));
    }

    #[test]
    fn test_pass_through_still_bounces_off_solid() {
        let mut state = with_brick(true);
        state.ball.stuck = false;
        state.ball.pass_through = true;
        state.ball.body.position = Vec2::new(187.5, 147.5);
        state.ball.body.velocity = Vec2::new(0.0, -300.0);

        do_collisions(&mut state);
        assert_eq!(state.ball.body.velocity.y, 300.0);
    }

    #[test]
    fn test_paddle_center_bounce() {
        let mut state = game("2");
        state.ball.stuck = false;
        // Center over the paddle's center, overlapping its top edge
        let paddle_center_x = state.player.position.x + state.player.size.x / 2.0;
        state.ball.body.position = Vec2::new(
            paddle_center_x - state.ball.radius,
            570.0 - state.ball.radius,
        );
        state.ball.body.velocity = Vec2::new(120.0, 350.0);
        let speed = state.ball.body.velocity.length();

        do_collisions(&mut state);

        let v = state.ball.body.velocity;
        assert!(v.x.abs() < 1e-3);
        assert!(v.y < 0.0);
        assert!((v.length() - speed).abs() < 1e-3);
        assert!(!state.ball.stuck);
    }

    #[test]
    fn test_paddle_edge_bounce_deflects() {
        let mut state = game("2");
        state.ball.stuck = false;
        // Center at the paddle's right edge
        let right_edge = state.player.position.x + state.player.size.x;
        state.ball.body.position = Vec2::new(
            right_edge - state.ball.radius,
            570.0 - state.ball.radius,
        );
        state.ball.body.velocity = Vec2::new(0.0, 350.0);

        do_collisions(&mut state);

        let v = state.ball.body.velocity;
        assert!(v.x > 0.0);
        assert!(v.y < 0.0);
        assert!((v.length() - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_sticky_regrabs_ball() {
        let mut state = game("2");
        state.ball.stuck = false;
        state.ball.sticky = true;
        let paddle_center_x = state.player.position.x + state.player.size.x / 2.0;
        state.ball.body.position = Vec2::new(
            paddle_center_x - state.ball.radius,
            570.0 - state.ball.radius,
        );
        state.ball.body.velocity = Vec2::new(0.0, 350.0);

        do_collisions(&mut state);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_stuck_ball_ignores_paddle() {
        let mut state = game("2");
        let before = state.ball.body.velocity;
        state.ball.body.position.y = 570.0;
        do_collisions(&mut state);
        assert_eq!(state.ball.body.velocity, before);
    }

    #[test]
    fn test_power_up_collected_by_paddle() {
        let mut state = game("2");
        let mut power_up = PowerUp::new(
            PowerUpKind::PassThrough,
            state.player.position + Vec2::new(10.0, -5.0),
            TextureHandle::MISSING,
        );
        power_up.body.velocity = Vec2::ZERO;
        state.power_ups.push(power_up);

        do_collisions(&mut state);

        let p = &state.power_ups[0];
        assert!(p.activated);
        assert!(p.body.destroyed);
        assert!(state.ball.pass_through);
        assert_eq!(state.ball.body.color, PASS_THROUGH_BALL_COLOR);
    }

    #[test]
    fn test_power_up_missed_below_screen() {
        let mut state = game("2");
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Sticky, Vec2::new(0.0, 600.0), TextureHandle::MISSING));

        do_collisions(&mut state);
        assert!(state.power_ups[0].body.destroyed);
        assert!(!state.power_ups[0].activated);

        update(&mut state, DT);
        assert!(state.power_ups.is_empty());
        assert!(!state.ball.sticky);
    }

    #[test]
    fn test_instant_power_up_gone_after_frame() {
        let mut state = game("2 2\n0 0");
        state.power_ups.push(PowerUp::new(
            PowerUpKind::PadSizeIncrease,
            state.player.position,
            TextureHandle::MISSING,
        ));

        update(&mut state, DT);

        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.size.x, PLAYER_SIZE.x + PAD_SIZE_INCREASE);
    }

    #[test]
    fn test_ball_lost_resets() {
        let mut state = game("2 2\n0 0");
        state.levels[0].bricks[0].destroyed = true;
        state.ball.stuck = false;
        state.ball.sticky = true;
        state.player.color = Vec3::new(1.0, 0.5, 1.0);
        state.player.position.x = 0.0;
        state.ball.body.position = Vec2::new(0.0, 599.0);
        state.ball.body.velocity = Vec2::new(0.0, 300.0);

        update(&mut state, 0.1);

        assert!(!state.levels[0].bricks[0].destroyed);
        assert!(state.ball.stuck);
        assert!(!state.ball.sticky);
        assert_eq!(state.player.position.x, 350.0);
        assert_eq!(state.player.color, Vec3::ONE);
        assert_eq!(state.ball.body.velocity, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_level_completion_advances() {
        let config = GameConfig::default();
        let resources = ResourceRegistry::with_defaults();
        let (w, h) = config.level_area();
        let levels = vec![
            Level::parse("1 2", w, h, &resources).expect("level"),
            Level::parse("3 3", w, h, &resources).expect("level"),
        ];
        let mut state = GameState::new(&config, resources, levels).expect("game");
        state.levels[1].bricks[0].destroyed = true;
        state.levels[0].bricks[1].destroyed = true;
        state.ball.stuck = false;

        update(&mut state, DT);

        assert_eq!(state.level, 1);
        assert_eq!(state.current_level().remaining(), 2);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_destroyed_bricks_are_skipped() {
        let mut state = with_brick(false);
        state.levels[0].bricks[0].destroyed = true;
        state.ball.stuck = false;
        state.ball.body.position = Vec2::new(187.5, 147.5);
        state.ball.body.velocity = Vec2::new(0.0, -300.0);

        do_collisions(&mut state);
        assert_eq!(state.ball.body.velocity, Vec2::new(0.0, -300.0));
    }
}
