//! Galaxy Shooter - wave-based arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, AI, combat, progression, upgrades)
//! - `input`: Named-key tracking mapped onto per-tick simulation input
//! - `audio`: Sound cue descriptions and cue sinks
//! - `ui`: Read-only HUD, overlay and upgrade menu views
//! - `settings`: JSON-backed runtime configuration

pub mod audio;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{PurchaseError, SettingsError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the tick-counted timers are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_SPEED_PER_UPGRADE: f32 = 1.25;
    /// Distance of the spawn point from the bottom edge
    pub const PLAYER_SPAWN_OFFSET_Y: f32 = 100.0;
    pub const BASE_MAX_HEALTH: u32 = 3;

    /// Player shooting
    pub const SHOOT_COOLDOWN_MS: f64 = 150.0;
    pub const RAPID_FIRE_REDUCTION: f64 = 0.25;
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    pub const MULTI_SHOT_SPACING: f32 = 15.0;

    /// Asteroids
    pub const ASTEROID_SPAWN_CHANCE: f64 = 0.02;
    pub const ASTEROID_MIN_SIZE: f32 = 20.0;
    pub const ASTEROID_SIZE_RANGE: f32 = 30.0;
    pub const ASTEROID_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_SPEED_RANGE: f32 = 3.0;
    pub const ASTEROID_SCORE: u32 = 50;
    /// Flat bonus for an asteroid that leaves the bottom of the screen
    pub const ASTEROID_DODGE_BONUS: u64 = 10;

    /// Regular enemies
    pub const ENEMY_BASE_SPAWN_CHANCE: f64 = 0.008;
    pub const ENEMY_SPAWN_CHANCE_PER_LEVEL: f64 = 0.002;
    pub const ENEMY_SIZE: f32 = 25.0;
    pub const ENEMY_BASE_HEALTH: i32 = 2;
    pub const ENEMY_SCORE: u32 = 100;
    pub const ENEMY_FIRE_RANGE: f32 = 300.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 3.0;
    /// Cooldown before the first shot at level 0 (ms)
    pub const ENEMY_FIRST_SHOT_MS: f64 = 1500.0;
    /// Cooldown band after each enemy shot at level 0 (ms)
    pub const ENEMY_REFIRE_MIN_MS: f64 = 1000.0;
    pub const ENEMY_REFIRE_RANGE_MS: f64 = 2000.0;
    /// Every level shaves this much off enemy cooldowns, down to the floor
    pub const ENEMY_COOLDOWN_PER_LEVEL_MS: f64 = 50.0;
    pub const ENEMY_COOLDOWN_FLOOR_MS: f64 = 500.0;
    pub const ZIGZAG_PHASE_STEP: f32 = 0.1;
    pub const ZIGZAG_AMPLITUDE: f32 = 2.0;

    /// Bosses
    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 80.0;
    pub const BOSS_SPEED: f32 = 1.0;
    pub const BOSS_BASE_HEALTH: i32 = 15;
    pub const BOSS_HEALTH_PER_LEVEL: i32 = 5;
    pub const BOSS_SHOOT_COOLDOWN_MS: f64 = 800.0;
    pub const BOSS_TARGET_Y: f32 = 100.0;
    pub const BOSS_BASE_SCORE: u32 = 500;
    pub const BOSS_SCORE_PER_LEVEL: u32 = 100;
    pub const BOSS_BULLET_WIDTH: f32 = 6.0;
    pub const BOSS_BULLET_HEIGHT: f32 = 12.0;

    /// Progression
    pub const BOSS_LEVEL_INTERVAL: u32 = 3;
    pub const BASE_ENEMIES_PER_LEVEL: u32 = 5;
    pub const BOSS_TRANSITION_TICKS: u32 = 180;
    pub const LEVEL_TRANSITION_TICKS: u32 = 120;
    /// Delay between a boss kill and the level advance (1 s)
    pub const BOSS_DEFEAT_ADVANCE_TICKS: u32 = TICKS_PER_SECOND;

    /// Shield and repair
    pub const SHIELD_DURATION_TICKS: u32 = 180;
    pub const SHIELD_COOLDOWN_TICKS: u32 = 1800;
    pub const AUTO_HEAL_INTERVAL_MS: f64 = 3000.0;

    /// Cosmetics
    pub const STAR_COUNT: usize = 100;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_SPEED: f32 = 10.0;
    pub const BURST_SMALL: usize = 5;
    pub const BURST_DEFAULT: usize = 10;
    pub const BURST_LARGE: usize = 20;
    pub const MAX_PARTICLES: usize = 512;

    /// Margin past the screen edge before an entity is culled
    pub const CULL_MARGIN: f32 = 50.0;
    pub const BULLET_CULL_MARGIN: f32 = 10.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle in radians from `from` toward `to`
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
