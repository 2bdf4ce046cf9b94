//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep (the platform reports each frame's duration)
//! - One seeded RNG per session
//! - Fixed update order within a frame
//! - Drawing only through the `Canvas` trait

pub mod background;
pub mod character;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use background::ScrollingBackground;
pub use character::{Capabilities, Character, Role};
pub use collision::{OverlapThresholds, check_overlap, overlap_ratios};
pub use rect::Rect;
pub use state::{CharacterSnapshot, GamePhase, World, WorldSnapshot};
pub use tick::{FrameInput, FrameOutcome, tick};
