//! Session configuration
//!
//! Everything that shapes a play session is gathered into one immutable
//! [`GameConfig`]. `Default` reproduces the shipped game; tests build their
//! own variants (smaller windows, different gravity) without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::{Color, Key};
use crate::sim::{Capabilities, OverlapThresholds, Role};

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("window size must be positive, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },
    #[error("target FPS must be positive")]
    TargetFps,
    #[error("animation frame time must be positive, got {0}")]
    FrameTime(f32),
    #[error("character '{name}' must have a positive size, got {width}x{height}")]
    CharacterSize { name: String, width: f32, height: f32 },
    #[error("character '{0}' needs at least one sprite row")]
    SpriteRows(String),
    #[error("background layer '{path}' must have a positive scale, got {scale}")]
    LayerScale { path: String, scale: f32 },
}

/// How a character is built at session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpec {
    /// Name used in logs
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Left edge at spawn as a fraction of the window width; the character
    /// always spawns standing on the ground
    pub start_frac: f32,
    /// Horizontal patrol velocity (pixels/s, negative moves left)
    pub velocity_x: f32,
    pub texture_path: String,
    /// Rows in the sprite sheet; frames are always three columns wide
    pub sprite_rows: u32,
    pub caps: Capabilities,
}

impl CharacterSpec {
    /// The gnome the player controls
    pub fn gnome() -> Self {
        Self {
            name: "gnome".into(),
            width: 120.0,
            height: 140.0,
            start_frac: 0.1,
            velocity_x: 0.0,
            texture_path: "assets/gnome.png".into(),
            sprite_rows: 3,
            caps: Role::Player.capabilities(),
        }
    }

    /// The knight that patrols in from the right
    pub fn knight() -> Self {
        Self {
            name: "knight".into(),
            width: 150.0,
            height: 150.0,
            start_frac: 1.1,
            velocity_x: -400.0,
            texture_path: "assets/knight.png".into(),
            sprite_rows: 1,
            caps: Role::PatrollingEnemy.capabilities(),
        }
    }
}

/// One parallax background layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub texture_path: String,
    /// Uniform draw scale
    pub scale: f32,
    /// Scroll speed (pixels/s); the sign picks the direction
    pub speed: f32,
}

impl LayerSpec {
    /// A layer scrolling right at the default speed
    pub fn new(texture_path: impl Into<String>, scale: f32) -> Self {
        Self {
            texture_path: texture_path.into(),
            scale,
            speed: DEFAULT_SCROLL_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Text shown once the gnome is caught
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// Position as a fraction of the window size
    pub x_frac: f32,
    pub y_frac: f32,
    pub size: f32,
    pub color: Color,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            text: GAME_OVER_TEXT.into(),
            x_frac: 0.2,
            y_frac: 0.5,
            size: GAME_OVER_FONT_SIZE,
            color: Color::RED,
        }
    }
}

/// The numbers the character physics works from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub window_width: f32,
    pub window_height: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity on take-off (pixels/s, negative is up)
    pub jump_impulse: f32,
    /// Seconds per sprite frame
    pub frame_time: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH as f32,
            window_height: WINDOW_HEIGHT as f32,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            frame_time: ANIMATION_FRAME_TIME,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub animation_frame_time: f32,
    pub thresholds: OverlapThresholds,
    pub jump_key: Key,
    pub clear_color: Color,
    pub game_over: Banner,
    pub player: CharacterSpec,
    /// The session may run without an enemy
    pub enemy: Option<CharacterSpec>,
    /// Back to front
    pub layers: Vec<LayerSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.into(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            target_fps: TARGET_FPS,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            animation_frame_time: ANIMATION_FRAME_TIME,
            thresholds: OverlapThresholds::default(),
            jump_key: Key::Space,
            clear_color: Color::BLACK,
            game_over: Banner::default(),
            player: CharacterSpec::gnome(),
            enemy: Some(CharacterSpec::knight()),
            layers: vec![
                LayerSpec::new("assets/trees-layer-1.png", 6.0).with_speed(-60.0),
                LayerSpec::new("assets/trees-layer-2.png", 6.0).with_speed(50.0),
                LayerSpec::new("assets/trees-layer-3.png", 6.0).with_speed(40.0),
                LayerSpec::new("assets/castle.png", 2.0).with_speed(-80.0),
            ],
        }
    }
}

impl GameConfig {
    /// Physics parameters handed to every character
    pub fn physics(&self) -> Physics {
        Physics {
            window_width: self.window_width as f32,
            window_height: self.window_height as f32,
            gravity: self.gravity,
            jump_impulse: self.jump_impulse,
            frame_time: self.animation_frame_time,
        }
    }

    /// Check the invariants the simulation relies on
    ///
    /// Characters need a positive size or the overlap ratios divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::TargetFps);
        }
        if !(self.animation_frame_time > 0.0) {
            return Err(ConfigError::FrameTime(self.animation_frame_time));
        }

        for spec in std::iter::once(&self.player).chain(self.enemy.iter()) {
            if !(spec.width > 0.0 && spec.height > 0.0) {
                return Err(ConfigError::CharacterSize {
                    name: spec.name.clone(),
                    width: spec.width,
                    height: spec.height,
                });
            }
            if spec.sprite_rows == 0 {
                return Err(ConfigError::SpriteRows(spec.name.clone()));
            }
        }

        if let Some(layer) = self.layers.iter().find(|l| !(l.scale > 0.0)) {
            return Err(ConfigError::LayerScale {
                path: layer.texture_path.clone(),
                scale: layer.scale,
            });
        }

        Ok(())
    }
}
