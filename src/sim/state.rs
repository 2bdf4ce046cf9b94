//! World state for one play session
//!
//! The world owns every entity and the session's single RNG. Nothing in here
//! touches the platform except loading and releasing textures.

use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::ScrollingBackground;
use super::character::Character;
use super::collision::OverlapThresholds;
use super::rect::Rect;
use crate::config::{Banner, GameConfig, Physics};
use crate::platform::{Platform, PlatformError, Texture};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Gnome running, knight patrolling
    Playing,
    /// Gnome caught; only the backgrounds keep moving
    GameOver,
}

/// Everything alive during a session
#[derive(Debug)]
pub struct World<T> {
    /// Seed the RNG started from
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Character<T>,
    pub enemy: Option<Character<T>>,
    /// Back to front
    pub layers: Vec<ScrollingBackground<T>>,
    pub physics: Physics,
    pub thresholds: OverlapThresholds,
    pub banner: Banner,
    /// Frames simulated so far
    pub frame: u64,
    /// Times the enemy walked off-screen and came back
    pub respawns: u32,
    /// Seeded once per session; all randomness flows through here
    pub(super) rng: Pcg32,
}

impl<T> World<T> {
    /// Assemble a world from already-built entities
    pub fn new(
        config: &GameConfig,
        seed: u64,
        player: Character<T>,
        enemy: Option<Character<T>>,
        layers: Vec<ScrollingBackground<T>>,
    ) -> Self {
        Self {
            seed,
            phase: GamePhase::Playing,
            player,
            enemy,
            layers,
            physics: config.physics(),
            thresholds: config.thresholds,
            banner: config.game_over.clone(),
            frame: 0,
            respawns: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Load every texture the config names and build the world
    ///
    /// Textures are loaded player first, then the enemy, then the layers back
    /// to front. If any load fails, the ones already loaded are released
    /// before the error is returned.
    pub fn load<P>(
        config: &GameConfig,
        seed: u64,
        platform: &mut P,
    ) -> Result<Self, PlatformError>
    where
        P: Platform<Texture = T>,
        T: Texture,
    {
        let physics = config.physics();

        let player = Character::load(&config.player, physics, platform)?;

        let enemy = match &config.enemy {
            Some(spec) => match Character::load(spec, physics, platform) {
                Ok(enemy) => Some(enemy),
                Err(err) => {
                    platform.unload_texture(player.into_texture());
                    return Err(err);
                }
            },
            None => None,
        };

        let mut layers = Vec::with_capacity(config.layers.len());
        for spec in &config.layers {
            match ScrollingBackground::load(spec, physics.window_width, platform) {
                Ok(layer) => layers.push(layer),
                Err(err) => {
                    let partial = Self::new(config, seed, player, enemy, layers);
                    partial.release(platform);
                    return Err(err);
                }
            }
        }

        info!(
            "World loaded: {} background layers, enemy: {}, seed {}",
            layers.len(),
            enemy.as_ref().map_or("none", |e| e.name.as_str()),
            seed
        );
        Ok(Self::new(config, seed, player, enemy, layers))
    }

    /// Hand every texture back to the platform; returns how many were released
    pub fn release<P>(self, platform: &mut P) -> usize
    where
        P: Platform<Texture = T>,
    {
        let mut released = 0;
        platform.unload_texture(self.player.into_texture());
        released += 1;
        if let Some(enemy) = self.enemy {
            platform.unload_texture(enemy.into_texture());
            released += 1;
        }
        for layer in self.layers {
            platform.unload_texture(layer.into_texture());
            released += 1;
        }
        released
    }

    /// The enemy overlaps the player past the thresholds
    pub fn player_caught(&self) -> bool {
        self.enemy
            .as_ref()
            .is_some_and(|enemy| self.thresholds.hit(&self.player.bounds, &enemy.bounds))
    }

    /// Where the game-over banner is drawn
    pub fn banner_position(&self) -> Vec2 {
        Vec2::new(
            self.banner.x_frac * self.physics.window_width,
            self.banner.y_frac * self.physics.window_height,
        )
    }

    /// Serializable view of the simulation state
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame: self.frame,
            phase: self.phase,
            player: CharacterSnapshot::of(&self.player),
            enemy: self.enemy.as_ref().map(CharacterSnapshot::of),
            layers: self.layers.iter().map(|l| [l.pos1, l.pos2]).collect(),
            respawns: self.respawns,
        }
    }
}

/// Physical state of one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub bounds: Rect,
    pub velocity: Vec2,
    pub frame: u32,
}

impl CharacterSnapshot {
    fn of<T>(character: &Character<T>) -> Self {
        Self {
            bounds: character.bounds,
            velocity: character.velocity,
            frame: character.frame(),
        }
    }
}

/// Point-in-time copy of the world without textures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub player: CharacterSnapshot,
    pub enemy: Option<CharacterSnapshot>,
    /// Both copy positions per layer
    pub layers: Vec<[Vec2; 2]>,
    pub respawns: u32,
}
