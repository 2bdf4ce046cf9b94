//! Platform abstraction layer
//!
//! The simulation never talks to a windowing or graphics library directly.
//! Everything it needs from the outside world goes through two traits:
//! - [`Canvas`]: drawing primitives (what a frame step needs)
//! - [`Platform`]: window lifetime, frame timing, input edges, texture loading
//!
//! `desktop` implements both on top of macroquad.

pub mod desktop;
#[cfg(test)]
pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Rect;

/// Errors surfaced by a platform backend
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent (debug boxes draw with this)
    pub const BLANK: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const RED: Color = Color::rgba(230, 41, 55, 255);
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Up,
}

/// A loaded texture
pub trait Texture {
    /// Width in pixels
    fn width(&self) -> u32;
    /// Height in pixels
    fn height(&self) -> u32;
}

/// Drawing primitives used by the frame step
pub trait Canvas {
    type Texture: Texture;

    fn clear_background(&mut self, color: Color);

    fn draw_rectangle(&mut self, rect: Rect, color: Color);

    /// Blit `source` (in texture pixels) onto `dest` (in screen pixels)
    ///
    /// A negative `source.width` mirrors the region horizontally. `origin`
    /// is relative to `dest` and is both the anchor and the rotation pivot.
    fn draw_texture_region(
        &mut self,
        texture: &Self::Texture,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    );

    /// Draw the whole texture with its top-left at `position`, uniformly scaled
    fn draw_texture(&mut self, texture: &Self::Texture, position: Vec2, scale: f32, tint: Color);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// Window, timing, input and texture services
pub trait Platform: Canvas {
    fn create_window(&mut self, width: u32, height: u32, title: &str);

    fn close_window(&mut self);

    fn set_target_fps(&mut self, fps: u32);

    /// Whether the user asked to close the window
    fn should_close(&mut self) -> bool;

    /// Seconds elapsed during the last frame
    fn frame_time(&mut self) -> f32;

    /// True only on the frame the key went down
    fn is_key_pressed(&mut self, key: Key) -> bool;

    fn load_texture(&mut self, path: &str) -> Result<Self::Texture, PlatformError>;

    /// Release a texture; the texture is consumed so it can't be released twice
    fn unload_texture(&mut self, texture: Self::Texture);

    fn begin_frame(&mut self);

    fn end_frame(&mut self);
}
