//! Power-up spawning, activation and expiry

use glam::Vec2;
use rand::Rng;

use super::entity::{Ball, Body, PowerUp, PowerUpKind};
use super::state::PostEffects;
use crate::consts::*;
use crate::resources::ResourceRegistry;

/// One 1-in-`chance` roll
pub fn should_spawn<R: Rng>(rng: &mut R, chance: u32) -> bool {
    rng.random_range(0..chance.max(1)) == 0
}

/// Roll every power-up type independently for a destroyed brick at
/// `position`, appending each success to `power_ups`. Returns how many spawned.
pub fn spawn_power_ups<R: Rng>(
    rng: &mut R,
    power_ups: &mut Vec<PowerUp>,
    position: Vec2,
    resources: &ResourceRegistry,
) -> usize {
    let before = power_ups.len();
    for kind in PowerUpKind::ALL {
        if should_spawn(rng, kind.spawn_chance()) {
            log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, position.x, position.y);
            power_ups.push(PowerUp::new(kind, position, resources.texture(kind.texture_name())));
        }
    }
    power_ups.len() - before
}

/// Apply a collected power-up
pub fn activate(kind: PowerUpKind, ball: &mut Ball, player: &mut Body, effects: &mut PostEffects) {
    log::debug!("Activated {:?}", kind);
    match kind {
        PowerUpKind::Speed => ball.body.velocity *= SPEED_MULTIPLIER,
        PowerUpKind::Sticky => {
            ball.sticky = true;
            player.color = STICKY_PADDLE_COLOR;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = true;
            ball.body.color = PASS_THROUGH_BALL_COLOR;
        }
        PowerUpKind::PadSizeIncrease => player.size.x += PAD_SIZE_INCREASE,
        PowerUpKind::Confuse => {
            if !effects.chaos {
                effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !effects.confuse {
                effects.chaos = true;
            }
        }
    }
}

/// Undo a timed effect. Speed and paddle growth are permanent.
pub fn revert(kind: PowerUpKind, ball: &mut Ball, player: &mut Body, effects: &mut PostEffects) {
    log::debug!("Expired {:?}", kind);
    match kind {
        PowerUpKind::Sticky => {
            ball.sticky = false;
            player.color = DEFAULT_COLOR;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = false;
            ball.body.color = DEFAULT_COLOR;
        }
        PowerUpKind::Confuse => effects.confuse = false,
        PowerUpKind::Chaos => effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

/// Another activated power-up of `kind` is still running
pub fn is_other_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Fall, count down activated durations, expire, then drop power-ups that
/// are destroyed and no longer running.
pub fn update_power_ups(
    power_ups: &mut Vec<PowerUp>,
    dt: f32,
    ball: &mut Ball,
    player: &mut Body,
    effects: &mut PostEffects,
) {
    for i in 0..power_ups.len() {
        let power_up = &mut power_ups[i];
        power_up.body.position += power_up.body.velocity * dt;

        if !power_up.activated {
            continue;
        }
        power_up.duration -= dt;
        if power_up.duration <= 0.0 {
            power_up.activated = false;
            let kind = power_up.kind;
            if !is_other_active(power_ups, kind) {
                revert(kind, ball, player, effects);
            }
        }
    }

    power_ups.retain(|p| !(p.body.destroyed && !p.activated));
}
