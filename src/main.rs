//! Breakout entry point
//!
//! Headless runner: loads the configuration and levels, then plays a fixed
//! number of frames with a simple autopilot, drawing into a recording backend.
//!
//! Usage: `breakout [config.json] [frames]`

use std::path::PathBuf;
use std::process::ExitCode;

use breakout::input::TickInput;
use breakout::renderer::{DrawList, PostRecorder, render};
use breakout::sim::{GameState, tick};
use breakout::{GameConfig, GameError, ResourceRegistry};
use clap::Parser;

/// Fixed frame time for the headless loop
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "breakout")]
#[command(about = "Play Breakout headless with an autopilot paddle")]
struct Args {
    /// JSON game configuration; defaults apply when omitted
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(default_value_t = DEFAULT_FRAMES)]
    frames: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let frames = args.frames;

    let resources = ResourceRegistry::with_defaults();
    for (name, entry) in resources.iter() {
        log::debug!("Texture '{}' -> {} ({:?})", name, entry.path.display(), entry.handle);
    }

    let mut state = GameState::init(&config, resources)?;
    let mut draw_list = DrawList::default();
    let mut post = PostRecorder::default();

    let mut levels_cleared = 0u32;
    let mut balls_lost = 0u32;

    for frame in 0..frames {
        let input = autopilot(&state);
        let level = state.level;
        let was_free = !state.ball.stuck;

        tick(&mut state, &input, FRAME_DT);

        if state.level != level {
            levels_cleared += 1;
        } else if was_free && state.ball.stuck && !state.ball.sticky {
            balls_lost += 1;
        }

        draw_list.clear();
        render(&state, &mut draw_list, &mut post);

        if frame % 600 == 0 {
            log::info!(
                "frame {frame}: level {} bricks left {} power-ups {} draw calls {}",
                state.level + 1,
                state.current_level().remaining(),
                state.power_ups.len(),
                draw_list.commands.len()
            );
        }
    }

    println!(
        "Played {frames} frames: level {}, {} bricks left, {} levels cleared, {} balls lost",
        state.level + 1,
        state.current_level().remaining(),
        levels_cleared,
        balls_lost
    );
    Ok(())
}

/// Track the ball with the paddle center; launch whenever the ball is stuck
fn autopilot(state: &GameState) -> TickInput {
    let paddle_center = state.player.position.x + state.player.size.x / 2.0;
    let target = state.ball.center().x;
    // Dead zone so the paddle does not jitter around the target
    let dead_zone = state.player.size.x / 4.0;

    TickInput {
        left: !state.ball.stuck && target < paddle_center - dead_zone,
        right: !state.ball.stuck && target > paddle_center + dead_zone,
        release: state.ball.stuck,
    }
}
