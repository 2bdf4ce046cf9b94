//! Game characters: the gnome and the knight
//!
//! One type covers both. What differs between them is a small set of
//! capability flags: whether the sprite animates, whether the character
//! patrols across the screen, and whether its sprite sheet is drawn mirrored.

use glam::Vec2;
use log::debug;
use rand::Rng;
use rand::distr::Open01;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::{CharacterSpec, Physics};
use crate::consts::SPRITE_COLUMNS;
use crate::platform::{Canvas, Color, Platform, PlatformError, Texture};

/// Behaviors a character opts into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Cycle through the sprite sheet columns while on the ground
    pub animated: bool,
    /// Walk at the horizontal velocity and respawn off-screen right
    pub patrols: bool,
    /// Draw the sprite sheet flipped horizontally
    pub mirrored: bool,
}

/// Who a character is in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    PatrollingEnemy,
}

impl Role {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Player => Capabilities {
                animated: true,
                patrols: false,
                mirrored: true,
            },
            Role::PatrollingEnemy => Capabilities {
                animated: true,
                patrols: true,
                mirrored: false,
            },
        }
    }
}

/// Sprite sheet state
#[derive(Debug)]
struct Sprite<T> {
    texture: T,
    /// Region of the sheet for the current frame (negative width when mirrored)
    source: Rect,
    position: Vec2,
    frame: u32,
    elapsed: f32,
}

/// A character with a bounding box, velocity and an animated sprite
#[derive(Debug)]
pub struct Character<T> {
    pub name: String,
    /// Collision box, also the sprite's destination rectangle
    pub bounds: Rect,
    /// Pixels per second
    pub velocity: Vec2,
    pub caps: Capabilities,
    /// Transparent unless debugging hitboxes
    pub debug_color: Color,
    physics: Physics,
    sprite: Sprite<T>,
}

impl<T: Texture> Character<T> {
    /// Build a character standing on the ground at its spawn fraction of the window
    pub fn new(spec: &CharacterSpec, physics: Physics, texture: T) -> Self {
        let bounds = Rect::new(
            spec.start_frac * physics.window_width,
            physics.window_height - spec.height,
            spec.width,
            spec.height,
        );

        let flip = if spec.caps.mirrored { -1.0 } else { 1.0 };
        // Frame size in whole texels
        let frame_width = (texture.width() / SPRITE_COLUMNS) as f32;
        let frame_height = (texture.height() / spec.sprite_rows.max(1)) as f32;
        let source = Rect::new(0.0, 0.0, flip * frame_width, frame_height);

        Self {
            name: spec.name.clone(),
            bounds,
            velocity: Vec2::new(spec.velocity_x, 0.0),
            caps: spec.caps,
            debug_color: Color::BLANK,
            physics,
            sprite: Sprite {
                texture,
                source,
                position: bounds.position(),
                frame: 0,
                elapsed: 0.0,
            },
        }
    }
}

impl<T> Character<T> {
    /// Load the sprite sheet from the platform and build the character
    pub fn load<P>(
        spec: &CharacterSpec,
        physics: Physics,
        platform: &mut P,
    ) -> Result<Self, PlatformError>
    where
        P: Platform<Texture = T>,
        T: Texture,
    {
        let texture = platform.load_texture(&spec.texture_path)?;
        debug!(
            "Loaded {} sprite sheet {} ({}x{})",
            spec.name,
            spec.texture_path,
            texture.width(),
            texture.height()
        );
        Ok(Self::new(spec, physics, texture))
    }

    /// Y coordinate of the box's top edge when standing on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.physics.window_height - self.bounds.height
    }

    /// Box bottom at or below the ground line
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.bounds.y >= self.ground_y()
    }

    /// Current animation frame (0..3)
    pub fn frame(&self) -> u32 {
        self.sprite.frame
    }

    /// Sheet region drawn this frame
    pub fn source_rect(&self) -> Rect {
        self.sprite.source
    }

    pub fn sprite_position(&self) -> Vec2 {
        self.sprite.position
    }

    /// Give the texture back so the platform can unload it
    pub fn into_texture(self) -> T {
        self.sprite.texture
    }

    fn sync_sprite(&mut self) {
        self.sprite.position = self.bounds.position();
    }

    /// Integrate gravity for one frame
    ///
    /// A grounded character has its vertical velocity reset (and is put back
    /// on the ground line) before anything moves, so it takes off from rest.
    pub fn apply_gravity(&mut self, dt: f32) {
        if self.is_grounded() {
            self.velocity.y = 0.0;
            self.bounds.y = self.ground_y();
        } else {
            self.velocity.y += self.physics.gravity * dt;
        }
        self.bounds.y += self.velocity.y * dt;
        self.sync_sprite();
    }

    /// Leave the ground; returns false (and changes nothing) while airborne
    ///
    /// The impulse moves the box this same frame so the jump shows up
    /// without a one-frame delay.
    pub fn jump(&mut self, dt: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.velocity.y = self.physics.jump_impulse;
        self.bounds.y += self.velocity.y * dt;
        self.sync_sprite();
        true
    }

    /// Advance the frame cursor; airborne characters hold their frame
    pub fn advance_animation(&mut self, dt: f32) {
        if !self.caps.animated {
            return;
        }
        self.sprite.elapsed += dt;
        if self.sprite.elapsed >= self.physics.frame_time && self.is_grounded() {
            self.sprite.frame = (self.sprite.frame + 1) % SPRITE_COLUMNS;
            self.sprite.elapsed = 0.0;
        }
        self.sprite.source.x = self.sprite.frame as f32 * self.sprite.source.width;
    }

    /// Animate, then draw the hitbox and the sprite stretched over it
    pub fn draw<C>(&mut self, dt: f32, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        self.advance_animation(dt);
        canvas.draw_rectangle(self.bounds, self.debug_color);
        canvas.draw_texture_region(
            &self.sprite.texture,
            self.sprite.source,
            self.bounds,
            Vec2::ZERO,
            0.0,
            Color::WHITE,
        );
    }

    /// Walk at the patrol velocity; returns true if the character respawned
    ///
    /// Once fully past the left edge the character reappears somewhere in
    /// `(window_width, 3 * window_width)`, so the gaps between passes vary.
    pub fn patrol<R: Rng>(&mut self, dt: f32, rng: &mut R) -> bool {
        if !self.caps.patrols {
            return false;
        }
        self.bounds.x += self.velocity.x * dt;
        self.sync_sprite();

        if self.bounds.x < -self.bounds.width {
            let roll: f32 = rng.sample(Open01);
            self.bounds.x = respawn_x(self.physics.window_width, roll);
            self.sync_sprite();
            debug!("{} respawned at x={:.1}", self.name, self.bounds.x);
            return true;
        }
        false
    }
}

/// Map a roll in (0, 1) onto `(window_width, 3 * window_width)`
///
/// Computed in f64 and pulled back inside the open interval, since the f32
/// result can round onto either end.
fn respawn_x(window_width: f32, roll: f32) -> f32 {
    let w = f64::from(window_width);
    let x = (w + f64::from(roll) * 2.0 * w) as f32;
    let low = window_width;
    let high = 3.0 * window_width;
    if x <= low {
        f32::from_bits(low.to_bits() + 1)
    } else if x >= high {
        f32::from_bits(high.to_bits() - 1)
    } else {
        x
    }
}
