//! Endlessly scrolling background layers
//!
//! Each layer draws one texture twice, side by side. Both copies move at the
//! layer's speed; when a copy slides fully out of view it is moved back to
//! the far side, so the pair always covers the window.

use glam::Vec2;
use log::debug;

use crate::config::LayerSpec;
use crate::consts::{SEAM_OVERLAP, WRAP_OVERLAP};
use crate::platform::{Canvas, Color, Platform, PlatformError, Texture};

/// A horizontally wrapping parallax layer
#[derive(Debug)]
pub struct ScrollingBackground<T> {
    texture: T,
    /// Leading copy
    pub pos1: Vec2,
    /// Trailing copy
    pub pos2: Vec2,
    pub scale: f32,
    /// Pixels per second; positive scrolls right
    pub speed: f32,
    window_width: f32,
}

impl<T: Texture> ScrollingBackground<T> {
    /// Place both copies so the trailing one sits on the side the layer scrolls from
    ///
    /// The copies overlap by a couple of pixels to hide the rounding seam.
    pub fn new(spec: &LayerSpec, window_width: f32, texture: T) -> Self {
        let scaled_width = texture.width() as f32 * spec.scale;
        let pos1 = Vec2::ZERO;
        let pos2_x = if spec.speed > 0.0 {
            pos1.x - scaled_width + SEAM_OVERLAP
        } else {
            pos1.x + scaled_width - SEAM_OVERLAP
        };

        Self {
            texture,
            pos1,
            pos2: Vec2::new(pos2_x, 0.0),
            scale: spec.scale,
            speed: spec.speed,
            window_width,
        }
    }

    /// Width of one copy on screen
    #[inline]
    pub fn scaled_width(&self) -> f32 {
        self.texture.width() as f32 * self.scale
    }

    /// Move both copies and wrap any that left the window
    ///
    /// Returns how many copies wrapped this frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let step = self.speed * dt;
        self.pos1.x += step;
        self.pos2.x += step;

        let width = self.scaled_width();
        let window_width = self.window_width;
        let mut wrapped = 0;
        if self.speed > 0.0 {
            // Off the right edge: restart left of the window
            for pos in [&mut self.pos1, &mut self.pos2] {
                if pos.x >= window_width {
                    pos.x = -width;
                    wrapped += 1;
                }
            }
        } else {
            // Off the left edge: chain in behind the other copy
            if self.pos1.x <= -width {
                self.pos1.x = self.pos2.x + width - WRAP_OVERLAP;
                wrapped += 1;
            }
            if self.pos2.x <= -width {
                self.pos2.x = self.pos1.x + width - WRAP_OVERLAP;
                wrapped += 1;
            }
        }

        if wrapped > 0 {
            debug!(
                "Background layer wrapped (speed {}): copies at {:.1}, {:.1}",
                self.speed, self.pos1.x, self.pos2.x
            );
        }
        wrapped
    }

    /// Draw both copies at their current positions
    pub fn draw<C>(&self, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        canvas.draw_texture(&self.texture, self.pos1, self.scale, Color::WHITE);
        canvas.draw_texture(&self.texture, self.pos2, self.scale, Color::WHITE);
    }

    /// One frame of the layer: scroll, then draw
    pub fn update<C>(&mut self, dt: f32, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        self.advance(dt);
        self.draw(canvas);
    }
}

impl<T> ScrollingBackground<T> {
    /// Load the layer texture from the platform
    pub fn load<P>(
        spec: &LayerSpec,
        window_width: f32,
        platform: &mut P,
    ) -> Result<Self, PlatformError>
    where
        P: Platform<Texture = T>,
        T: Texture,
    {
        let texture = platform.load_texture(&spec.texture_path)?;
        debug!(
            "Loaded background layer {} (scale {}, speed {})",
            spec.texture_path, spec.scale, spec.speed
        );
        Ok(Self::new(spec, window_width, texture))
    }

    /// Give the texture back so the platform can unload it
    pub fn into_texture(self) -> T {
        self.texture
    }
}
