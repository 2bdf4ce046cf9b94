//! Session driver
//!
//! Owns the platform and the world for one play session: opens the window,
//! loads the world, runs frames until the player leaves or the window is
//! closed, then releases every texture and closes the window.

use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::platform::{Platform, PlatformError};
use crate::sim::{FrameInput, FrameOutcome, GamePhase, World, tick};

/// Reasons a session fails to start
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub seed: u64,
    pub frames: u64,
    pub phase: GamePhase,
    pub respawns: u32,
    pub textures_released: usize,
}

/// One play session on a platform
pub struct Session<P: Platform> {
    config: GameConfig,
    platform: P,
    world: World<P::Texture>,
}

impl<P: Platform> Session<P> {
    /// Open the window and load the world
    ///
    /// On a load failure the window is closed again before returning.
    pub fn start(config: GameConfig, seed: u64, mut platform: P) -> Result<Self, SessionError> {
        config.validate()?;

        platform.create_window(config.window_width, config.window_height, &config.title);
        platform.set_target_fps(config.target_fps);

        let world = match World::load(&config, seed, &mut platform) {
            Ok(world) => world,
            Err(err) => {
                error!("Session failed to start: {}", err);
                platform.close_window();
                return Err(err.into());
            }
        };

        info!(
            "Session started: {}x{} @ {} FPS, seed {}",
            config.window_width, config.window_height, config.target_fps, seed
        );
        Ok(Self {
            config,
            platform,
            world,
        })
    }

    pub fn world(&self) -> &World<P::Texture> {
        &self.world
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run a single frame
    ///
    /// Returns `Exit` without drawing when the window was asked to close.
    /// Waiting for the next frame boundary is left to the platform.
    pub fn run_frame(&mut self) -> FrameOutcome {
        if self.platform.should_close() {
            info!("Window close requested");
            return FrameOutcome::Exit;
        }

        let dt = self.platform.frame_time();
        let input = FrameInput {
            jump: self.platform.is_key_pressed(self.config.jump_key),
        };

        self.platform.begin_frame();
        self.platform.clear_background(self.config.clear_color);
        let outcome = tick(&mut self.world, &input, dt, &mut self.platform);
        self.platform.end_frame();
        outcome
    }

    /// Run frames until the session ends, then shut down
    ///
    /// For platforms whose `end_frame` blocks until the next frame.
    pub fn run(mut self) -> SessionReport {
        while self.run_frame() == FrameOutcome::Continue {}
        self.finish()
    }

    /// Release every texture and close the window
    pub fn finish(self) -> SessionReport {
        let Self {
            mut platform,
            world,
            ..
        } = self;

        let seed = world.seed;
        let frames = world.frame;
        let phase = world.phase;
        let respawns = world.respawns;

        let textures_released = world.release(&mut platform);
        platform.close_window();

        info!(
            "Session over after {} frames ({:?}, {} knight passes)",
            frames, phase, respawns
        );
        SessionReport {
            seed,
            frames,
            phase,
            respawns,
            textures_released,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CharacterSpec, LayerSpec};
    use crate::platform::Key;
    use crate::platform::headless::HeadlessPlatform;

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::new()
            .with_texture("assets/gnome.png", 384, 420)
            .with_texture("assets/knight.png", 300, 100)
    }

    /// Knight parked on top of the gnome
    fn collision_config() -> GameConfig {
        GameConfig {
            enemy: Some(CharacterSpec {
                start_frac: 70.0 / 600.0,
                ..CharacterSpec::knight()
            }),
            layers: vec![LayerSpec::new("assets/sky.png", 6.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_start_opens_window_then_loads() {
        let session = Session::start(GameConfig::default(), 3, platform()).unwrap();
        let events = session.platform().events();
        assert_eq!(events[0], "create_window 600x480 'Gnome Runner'");
        assert_eq!(events[1], "target_fps 120");
        assert_eq!(events[2], "load tex1 assets/gnome.png");
        assert_eq!(session.world().layers.len(), 4);
    }

    #[test]
    fn test_invalid_config_rejected_before_window() {
        let config = GameConfig {
            target_fps: 0,
            ..Default::default()
        };
        let result = Session::start(config, 3, platform());
        assert!(matches!(
            result,
            Err(SessionError::Config(ConfigError::TargetFps))
        ));
    }

    #[test]
    fn test_missing_asset_is_fatal() {
        let platform = platform().with_missing("assets/castle.png");
        match Session::start(GameConfig::default(), 3, platform) {
            Err(SessionError::Platform(PlatformError::TextureLoad { path, .. })) => {
                assert_eq!(path, "assets/castle.png");
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("session started without its assets"),
        }
    }

    #[test]
    fn test_frame_is_bracketed_and_cleared() {
        let mut session = Session::start(GameConfig::default(), 3, platform()).unwrap();
        assert_eq!(session.run_frame(), FrameOutcome::Continue);

        let events = session.platform().events();
        let tail: Vec<_> = events.iter().rev().take(3).rev().cloned().collect();
        assert_eq!(tail, vec!["begin_frame", "clear 0,0,0,255", "end_frame"]);
        // 4 layers x 2 copies, then gnome and knight
        assert_eq!(session.platform().frame_draws(0).len(), 12);
    }

    #[test]
    fn test_close_request_ends_session() {
        let platform = platform().close_after(30);
        let report = Session::start(GameConfig::default(), 3, platform)
            .unwrap()
            .run();
        assert_eq!(report.frames, 30);
        assert_eq!(report.phase, GamePhase::Playing);
        assert_eq!(report.textures_released, 6);
    }

    #[test]
    fn test_every_texture_released_once() {
        let mut session =
            Session::start(GameConfig::default(), 3, platform().close_after(5)).unwrap();
        while session.run_frame() == FrameOutcome::Continue {}
        assert_eq!(session.platform().live_textures(), 6);

        let report = session.finish();
        assert_eq!(report.textures_released, 6);
    }

    #[test]
    fn test_game_over_until_jump() {
        // Caught on frame 0, then idle until the jump on frame 40
        let platform = platform().press_on(40, Key::Space).close_after(1000);
        let mut session = Session::start(collision_config(), 3, platform).unwrap();

        let mut frames = 0;
        while session.run_frame() == FrameOutcome::Continue {
            frames += 1;
            assert_eq!(session.world().phase, GamePhase::GameOver);
        }
        assert_eq!(frames, 40);

        let platform = session.platform();
        for frame in 0..=40 {
            let draws = platform.frame_draws(frame);
            assert!(
                !draws
                    .iter()
                    .any(|d| d.starts_with("rect") || d.starts_with("region")),
                "character drawn on frame {frame}"
            );
            assert_eq!(draws.last().unwrap(), "text 'Game Over' at 120,240 size 60");
        }
        assert_eq!(platform.frames_ended(), 41);

        let report = session.finish();
        assert_eq!(report.phase, GamePhase::GameOver);
        assert_eq!(report.frames, 41);
    }

    #[test]
    fn test_configured_jump_key() {
        let config = GameConfig {
            jump_key: Key::Up,
            ..collision_config()
        };
        // Space is ignored, Up leaves the game over screen
        let platform = platform()
            .press_on(2, Key::Space)
            .press_on(5, Key::Up)
            .close_after(100);
        let report = Session::start(config, 3, platform).unwrap().run();
        assert_eq!(report.frames, 6);
        assert_eq!(report.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_same_seed_same_session() {
        let play = |seed| {
            let platform = platform()
                .press_on(100, Key::Space)
                .press_on(400, Key::Space)
                .press_on(700, Key::Space)
                .close_after(2500);
            Session::start(GameConfig::default(), seed, platform)
                .unwrap()
                .run()
        };
        let a = play(2024);
        let b = play(2024);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
