//! Scripted platform for tests
//!
//! Records every call as a short string and plays back a fixed input script,
//! so a whole session can run without a window.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::{Canvas, Color, Key, Platform, PlatformError, Texture};
use crate::sim::Rect;

/// A fake texture: an id plus dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl HeadlessTexture {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

impl Texture for HeadlessTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Platform double driven by a script
#[derive(Debug)]
pub struct HeadlessPlatform {
    /// Seconds reported for every frame
    pub dt: f32,
    sizes: HashMap<String, (u32, u32)>,
    missing: HashSet<String>,
    presses: Vec<(u64, Key)>,
    close_after: Option<u64>,
    frames_ended: u64,
    next_texture: u32,
    live_textures: HashSet<u32>,
    /// Draw calls, one list per frame (index 0 collects draws outside a frame)
    frames: Vec<Vec<String>>,
    events: Vec<String>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            dt: 1.0 / 120.0,
            sizes: HashMap::new(),
            missing: HashSet::new(),
            presses: Vec::new(),
            close_after: None,
            frames_ended: 0,
            next_texture: 1,
            live_textures: HashSet::new(),
            frames: vec![Vec::new()],
            events: Vec::new(),
        }
    }

    /// Give a texture path specific dimensions (default 64x64)
    pub fn with_texture(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(path.to_string(), (width, height));
        self
    }

    /// Make loading this path fail
    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    /// Report `key` as pressed during frame `frame` (0-based)
    pub fn press_on(mut self, frame: u64, key: Key) -> Self {
        self.presses.push((frame, key));
        self
    }

    /// Request a window close once `frames` frames have finished
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Every draw call, in order
    pub fn draws(&self) -> Vec<String> {
        self.frames.iter().flatten().cloned().collect()
    }

    /// Draw calls made during frame `frame` (0-based)
    pub fn frame_draws(&self, frame: usize) -> &[String] {
        self.frames.get(frame + 1).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Window, frame and texture lifecycle calls
    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn frames_ended(&self) -> u64 {
        self.frames_ended
    }

    /// Textures loaded but not yet unloaded
    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    fn record(&mut self, draw: String) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(draw);
        }
    }
}

impl Canvas for HeadlessPlatform {
    type Texture = HeadlessTexture;

    fn clear_background(&mut self, color: Color) {
        self.events
            .push(format!("clear {},{},{},{}", color.r, color.g, color.b, color.a));
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.record(format!(
            "rect {},{} {}x{} a={}",
            rect.x, rect.y, rect.width, rect.height, color.a
        ));
    }

    fn draw_texture_region(
        &mut self,
        texture: &HeadlessTexture,
        source: Rect,
        dest: Rect,
        _origin: Vec2,
        _rotation: f32,
        _tint: Color,
    ) {
        self.record(format!(
            "region tex{} src={},{} {}x{} dst={},{} {}x{}",
            texture.id,
            source.x,
            source.y,
            source.width,
            source.height,
            dest.x,
            dest.y,
            dest.width,
            dest.height
        ));
    }

    fn draw_texture(&mut self, texture: &HeadlessTexture, position: Vec2, scale: f32, _tint: Color) {
        self.record(format!(
            "texture tex{} at {},{} x{}",
            texture.id, position.x, position.y, scale
        ));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, _color: Color) {
        self.record(format!("text '{}' at {},{} size {}", text, x, y, size));
    }
}

impl Platform for HeadlessPlatform {
    fn create_window(&mut self, width: u32, height: u32, title: &str) {
        self.events
            .push(format!("create_window {}x{} '{}'", width, height, title));
    }

    fn close_window(&mut self) {
        self.events.push("close_window".into());
    }

    fn set_target_fps(&mut self, fps: u32) {
        self.events.push(format!("target_fps {}", fps));
    }

    fn should_close(&mut self) -> bool {
        self.close_after.is_some_and(|n| self.frames_ended >= n)
    }

    fn frame_time(&mut self) -> f32 {
        self.dt
    }

    fn is_key_pressed(&mut self, key: Key) -> bool {
        let frame = self.frames_ended;
        self.presses.iter().any(|&(f, k)| f == frame && k == key)
    }

    fn load_texture(&mut self, path: &str) -> Result<HeadlessTexture, PlatformError> {
        if self.missing.contains(path) {
            self.events.push(format!("load_failed {}", path));
            return Err(PlatformError::TextureLoad {
                path: path.to_string(),
                reason: "file not found".into(),
            });
        }
        let (width, height) = self.sizes.get(path).copied().unwrap_or((64, 64));
        let id = self.next_texture;
        self.next_texture += 1;
        self.live_textures.insert(id);
        self.events.push(format!("load tex{} {}", id, path));
        Ok(HeadlessTexture::new(id, width, height))
    }

    fn unload_texture(&mut self, texture: HeadlessTexture) {
        assert!(
            self.live_textures.remove(&texture.id),
            "texture {} unloaded twice",
            texture.id
        );
        self.events.push(format!("unload tex{}", texture.id));
    }

    fn begin_frame(&mut self) {
        self.frames.push(Vec::new());
        self.events.push("begin_frame".into());
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
        self.events.push("end_frame".into());
    }
}
