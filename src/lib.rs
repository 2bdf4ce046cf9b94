//! Gnome Runner - a side-scrolling runner with a parallax forest
//!
//! Core modules:
//! - `sim`: Frame simulation (gravity, jumping, sprite animation, patrol, scroll-wrap, overlap)
//! - `platform`: Window/input/texture/drawing seam, with the macroquad desktop backend
//! - `config`: Immutable session configuration (window, physics, entity layout)
//! - `session`: The frame loop driving one play session

pub mod config;
pub mod platform;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig, Physics};
pub use session::{Session, SessionError, SessionReport};
pub use sim::{FrameInput, FrameOutcome, GamePhase};

/// Game configuration constants
pub mod consts {
    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: u32 = 600;
    pub const WINDOW_HEIGHT: u32 = 480;
    pub const WINDOW_TITLE: &str = "Gnome Runner";
    /// Frame pacing target
    pub const TARGET_FPS: u32 = 120;

    /// Acceleration due to gravity (pixels/s²)
    pub const GRAVITY: f32 = 4_900.0;
    /// Vertical velocity applied on jump (pixels/s, negative is up)
    pub const JUMP_IMPULSE: f32 = -1_600.0;

    /// Seconds each sprite frame stays on screen
    pub const ANIMATION_FRAME_TIME: f32 = 0.2;
    /// Sprite sheets are laid out three frames wide
    pub const SPRITE_COLUMNS: u32 = 3;

    /// Overlap needed on each axis before the knight catches the gnome
    pub const OVERLAP_X_THRESHOLD: f32 = 0.65;
    pub const OVERLAP_Y_THRESHOLD: f32 = 0.2;

    /// Scroll speed for layers that don't specify one (pixels/s)
    pub const DEFAULT_SCROLL_SPEED: f32 = 80.0;
    /// Overlap between the two copies of a layer when first placed
    pub const SEAM_OVERLAP: f32 = 2.0;
    /// Overlap used when a left-scrolling copy re-chains behind its twin
    pub const WRAP_OVERLAP: f32 = 1.0;

    /// Game over banner
    pub const GAME_OVER_TEXT: &str = "Game Over";
    pub const GAME_OVER_FONT_SIZE: f32 = 60.0;
}
