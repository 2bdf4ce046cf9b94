//! macroquad backend
//!
//! macroquad owns the window and the frame loop, so `create_window` and
//! `close_window` only adjust what macroquad already opened; the binary hands
//! control back to macroquad between frames with `next_frame().await`.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{debug, info};
use macroquad::input::KeyCode;
use macroquad::math::{Rect as MqRect, vec2};
use macroquad::texture::{DrawTextureParams, FilterMode, Image, Texture2D};

use super::{Canvas, Color, Key, Platform, PlatformError, Texture};
use crate::sim::Rect;

impl Texture for Texture2D {
    fn width(&self) -> u32 {
        Texture2D::width(self) as u32
    }

    fn height(&self) -> u32 {
        Texture2D::height(self) as u32
    }
}

fn mq_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn key_code(key: Key) -> KeyCode {
    match key {
        Key::Space => KeyCode::Space,
        Key::Up => KeyCode::Up,
    }
}

/// Platform backed by the macroquad window
#[derive(Debug, Default)]
pub struct DesktopPlatform {
    closed: bool,
    #[cfg(not(target_arch = "wasm32"))]
    frame_budget: Option<Duration>,
    #[cfg(not(target_arch = "wasm32"))]
    frame_start: Option<Instant>,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for DesktopPlatform {
    type Texture = Texture2D;

    fn clear_background(&mut self, color: Color) {
        macroquad::window::clear_background(mq_color(color));
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        macroquad::shapes::draw_rectangle(rect.x, rect.y, rect.width, rect.height, mq_color(color));
    }

    /// `rotation` is in degrees, clockwise, around `dest.position()`
    fn draw_texture_region(
        &mut self,
        texture: &Texture2D,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    ) {
        // Sheet coordinates wrap around the texture, so a mirrored frame's
        // negative x still lands on the right column.
        let tex_width = Texture2D::width(texture);
        let x = if tex_width > 0.0 {
            source.x.rem_euclid(tex_width)
        } else {
            source.x
        };
        let params = DrawTextureParams {
            dest_size: Some(vec2(dest.width, dest.height)),
            source: Some(MqRect::new(x, source.y, source.width.abs(), source.height)),
            rotation: rotation.to_radians(),
            flip_x: source.width < 0.0,
            pivot: Some(vec2(dest.x, dest.y)),
            ..Default::default()
        };
        macroquad::texture::draw_texture_ex(
            texture,
            dest.x - origin.x,
            dest.y - origin.y,
            mq_color(tint),
            params,
        );
    }

    fn draw_texture(&mut self, texture: &Texture2D, position: Vec2, scale: f32, tint: Color) {
        let params = DrawTextureParams {
            dest_size: Some(vec2(
                Texture2D::width(texture) * scale,
                Texture2D::height(texture) * scale,
            )),
            ..Default::default()
        };
        macroquad::texture::draw_texture_ex(texture, position.x, position.y, mq_color(tint), params);
    }

    /// `y` is the top of the text; macroquad draws from the baseline
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        macroquad::text::draw_text(text, x, y + size, size, mq_color(color));
    }
}

impl Platform for DesktopPlatform {
    fn create_window(&mut self, width: u32, height: u32, title: &str) {
        // Quit requests are routed through `should_close` instead
        macroquad::input::prevent_quit();
        macroquad::window::request_new_screen_size(width as f32, height as f32);
        info!("Window '{}' at {}x{}", title, width, height);
    }

    fn close_window(&mut self) {
        self.closed = true;
        info!("Window closed");
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set_target_fps(&mut self, fps: u32) {
        self.frame_budget = (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));
    }

    /// The browser paces frames on wasm
    #[cfg(target_arch = "wasm32")]
    fn set_target_fps(&mut self, _fps: u32) {}

    fn should_close(&mut self) -> bool {
        self.closed
            || macroquad::input::is_quit_requested()
            || macroquad::input::is_key_pressed(KeyCode::Escape)
    }

    fn frame_time(&mut self) -> f32 {
        macroquad::time::get_frame_time()
    }

    fn is_key_pressed(&mut self, key: Key) -> bool {
        macroquad::input::is_key_pressed(key_code(key))
    }

    fn load_texture(&mut self, path: &str) -> Result<Texture2D, PlatformError> {
        let load_error = |reason: String| PlatformError::TextureLoad {
            path: path.to_string(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let image =
            Image::from_file_with_format(&bytes, None).map_err(|e| load_error(e.to_string()))?;
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);

        debug!(
            "Loaded {} ({}x{})",
            path,
            Texture::width(&texture),
            Texture::height(&texture)
        );
        Ok(texture)
    }

    fn unload_texture(&mut self, texture: Texture2D) {
        // The GPU texture goes away with its last handle
        drop(texture);
    }

    fn begin_frame(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.frame_start = Some(Instant::now());
        }
    }

    fn end_frame(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let (Some(budget), Some(start)) = (self.frame_budget, self.frame_start) {
                let spent = start.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }
    }
}
