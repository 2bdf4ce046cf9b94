//! One frame of the simulation
//!
//! The step order is fixed: backgrounds, input, gravity, collision, then
//! either the game-over banner or the character draws and the enemy's patrol.
//! Jump input lands before gravity so a jump shows up on the frame it's
//! pressed.

use log::info;

use super::state::{GamePhase, World};
use crate::platform::Canvas;

/// Input sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Jump key went down this frame
    pub jump: bool,
}

/// Whether the loop should keep going after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

/// Advance the world by `dt` seconds, drawing as it goes
pub fn tick<C: Canvas>(
    world: &mut World<C::Texture>,
    input: &FrameInput,
    dt: f32,
    canvas: &mut C,
) -> FrameOutcome {
    world.frame += 1;

    for layer in &mut world.layers {
        layer.update(dt, canvas);
    }

    if world.phase == GamePhase::Playing {
        if input.jump {
            world.player.jump(dt);
        }
        world.player.apply_gravity(dt);

        if world.player_caught() {
            world.phase = GamePhase::GameOver;
            info!(
                "{} caught on frame {} after {} respawns",
                world.player.name, world.frame, world.respawns
            );
        }
    }

    match world.phase {
        GamePhase::Playing => {
            world.player.draw(dt, canvas);
            if let Some(enemy) = world.enemy.as_mut() {
                enemy.draw(dt, canvas);
                if enemy.patrol(dt, &mut world.rng) {
                    world.respawns += 1;
                }
            }
            FrameOutcome::Continue
        }
        GamePhase::GameOver => {
            let pos = world.banner_position();
            let banner = &world.banner;
            canvas.draw_text(&banner.text, pos.x, pos.y, banner.size, banner.color);
            if input.jump {
                info!("Leaving game over screen on frame {}", world.frame);
                FrameOutcome::Exit
            } else {
                FrameOutcome::Continue
            }
        }
    }
}
