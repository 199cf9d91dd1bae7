//! Game state and core simulation types
//!
//! Everything the simulation owns lives in [`GameState`]. Entity pools use
//! mark-and-compact: collision code flips `alive` to false and the pools are
//! compacted once per tick, so a destroyed entity can never be processed
//! twice in the same tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{BossKind, BossPhase};
use super::collision::{Bounds, Rect};
use super::events::{GameEvent, SoundCue};
use super::upgrades::UpgradeLevels;
use crate::consts::*;
use crate::settings::Settings;

/// Coarse session phase, derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing played since launch or the last full reset
    NotStarted,
    /// Active gameplay
    Running,
    /// Timed pause before a boss or the next level
    Transition,
    /// Player died; restart resumes from the checkpoint
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Derived speed (base + upgrade bonus)
    pub speed: f32,
    pub color: u32,
}

impl Player {
    pub fn new(arena: Vec2) -> Self {
        Self {
            pos: Self::spawn_point(arena),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_BASE_SPEED,
            color: 0x00ff88,
        }
    }

    pub fn spawn_point(arena: Vec2) -> Vec2 {
        Vec2::new(arena.x / 2.0, arena.y - PLAYER_SPAWN_OFFSET_Y)
    }

    /// Move by `dir * speed`, clamped to the arena
    pub fn translate(&mut self, dir: Vec2, arena: Vec2) {
        let max = (arena - self.size).max(Vec2::ZERO);
        self.pos = (self.pos + dir * self.speed).clamp(Vec2::ZERO, max);
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// Background star (decoration only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

/// A falling asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub alive: bool,
}

impl Bounds for Asteroid {
    fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// A projectile. The same shape serves player, enemy and boss bullets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Damage dealt on hit (only meaningful for player bullets)
    pub damage: i32,
    pub color: u32,
    pub alive: bool,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// Enemy movement variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePattern {
    Straight,
    Zigzag,
}

/// A regular enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub pattern: MovePattern,
    pub zigzag_phase: f32,
    /// Wall-clock time of the last shot (ms); `None` if it never fired
    pub last_shot_ms: Option<f64>,
    pub shoot_cooldown_ms: f64,
    pub color: u32,
    pub alive: bool,
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// A boss ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub kind: BossKind,
    pub phase: BossPhase,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    /// Ticks since spawn, drives the archetype movement cycles
    pub action_timer: u32,
    pub target: Vec2,
    pub last_shot_ms: Option<f64>,
    pub shoot_cooldown_ms: f64,
    pub color: u32,
    pub alive: bool,
}

impl Boss {
    pub fn is_active(&self) -> bool {
        self.phase == BossPhase::Active
    }
}

impl Bounds for Boss {
    fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    /// Hue in degrees (0-60, red through yellow)
    pub hue: f32,
}

impl Particle {
    /// Opacity for fading (1.0 fresh, 0.0 expired)
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Snapshot of progress taken at the start of each level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub level: u32,
    pub score: u64,
    pub upgrades: UpgradeLevels,
}

/// What happens when a transition countdown expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Spawn the boss for this level
    BossIncoming,
    /// Advance to the next level
    LevelClear,
}

/// A pending timed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub ticks_remaining: u32,
}

/// Shield timers (tick counted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shield {
    pub active: bool,
    pub timer: u32,
    pub cooldown: u32,
}

/// Upgrade menu state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeMenu {
    pub open: bool,
    pub selected: usize,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Arena dimensions
    pub arena: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,

    // Session flags
    pub running: bool,
    pub has_started: bool,
    pub sound_enabled: bool,

    // Progress
    pub score: u64,
    pub health: u32,
    pub max_health: u32,
    pub level: u32,
    pub enemies_killed: u32,
    pub enemies_per_level: u32,
    pub is_boss_level: bool,
    pub boss_active: bool,
    /// Boss countdown already started for this level
    pub boss_triggered: bool,
    pub transition: Option<Transition>,
    /// Ticks until the post-boss level advance
    pub pending_advance: Option<u32>,
    pub checkpoint: Option<Checkpoint>,
    pub upgrades: UpgradeLevels,

    // Player
    pub player: Player,
    pub shield: Shield,
    pub menu: UpgradeMenu,
    pub last_shot_ms: Option<f64>,
    pub last_heal_ms: Option<f64>,

    // Entity pools
    pub stars: Vec<Star>,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<Bullet>,
    pub bosses: Vec<Boss>,
    pub boss_bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub particles_enabled: bool,
    pub max_particles: usize,

    events: Vec<GameEvent>,
    hud_dirty: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(&Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or(0);
        let arena = Vec2::new(settings.arena_width, settings.arena_height);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            time_ticks: 0,
            running: false,
            has_started: false,
            sound_enabled: settings.sound_enabled,
            score: 0,
            health: BASE_MAX_HEALTH,
            max_health: BASE_MAX_HEALTH,
            level: 1,
            enemies_killed: 0,
            enemies_per_level: BASE_ENEMIES_PER_LEVEL,
            is_boss_level: false,
            boss_active: false,
            boss_triggered: false,
            transition: None,
            pending_advance: None,
            checkpoint: None,
            upgrades: UpgradeLevels::default(),
            player: Player::new(arena),
            shield: Shield::default(),
            menu: UpgradeMenu::default(),
            last_shot_ms: None,
            last_heal_ms: None,
            stars: Vec::with_capacity(STAR_COUNT),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            bosses: Vec::new(),
            boss_bullets: Vec::new(),
            particles: Vec::new(),
            particles_enabled: settings.particles,
            max_particles: settings.max_particles(),
            events: Vec::new(),
            hud_dirty: false,
            next_id: 1,
        };
        state.create_stars();
        state
    }

    fn create_stars(&mut self) {
        for _ in 0..STAR_COUNT {
            let star = Star {
                pos: Vec2::new(self.random() * self.arena.x, self.random() * self.arena.y),
                size: self.random() * 2.0 + 1.0,
                speed: self.random() * 2.0 + 0.5,
            };
            self.stars.push(star);
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform sample in [0, 1)
    pub fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform sample in [0, 1) at double precision (probabilities, cooldowns)
    pub fn random_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Bernoulli trial
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    pub fn phase(&self) -> GamePhase {
        if self.running {
            if self.transition.is_some() {
                GamePhase::Transition
            } else {
                GamePhase::Running
            }
        } else if self.has_started {
            GamePhase::GameOver
        } else {
            GamePhase::NotStarted
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn player_center(&self) -> Vec2 {
        self.player.center()
    }

    /// Current boss, if one is in the arena
    pub fn boss(&self) -> Option<&Boss> {
        self.bosses.iter().find(|b| b.alive)
    }

    /// Queue an event for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a sound cue (dropped when sound is off)
    pub fn play(&mut self, cue: SoundCue) {
        if self.sound_enabled {
            self.events.push(GameEvent::Sound(cue));
        }
    }

    /// Request a HUD refresh at the end of the tick
    pub fn mark_hud_dirty(&mut self) {
        self.hud_dirty = true;
    }

    /// Turn a pending HUD refresh into a single event
    pub fn flush_hud(&mut self) {
        if self.hud_dirty {
            self.hud_dirty = false;
            self.events.push(GameEvent::HudChanged);
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at queued events without draining
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Spawn an explosion burst of `count` particles at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2, count: usize) {
        if !self.particles_enabled {
            return;
        }
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let vel = Vec2::new(self.random() - 0.5, self.random() - 0.5) * PARTICLE_SPEED;
            let hue = self.random() * 60.0;
            self.particles.push(Particle {
                pos,
                vel,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                hue,
            });
        }
    }

    /// Record the current level, score and upgrades as the restart point
    pub fn save_checkpoint(&mut self) {
        self.checkpoint = Some(Checkpoint {
            level: self.level,
            score: self.score,
            upgrades: self.upgrades,
        });
    }

    /// Clear every transient pool (stars excepted)
    pub fn clear_pools(&mut self) {
        self.asteroids.clear();
        self.particles.clear();
        self.bullets.clear();
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.bosses.clear();
        self.boss_bullets.clear();
    }

    /// Drop entities flagged dead during this tick
    pub fn compact_pools(&mut self) {
        self.asteroids.retain(|a| a.alive);
        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
        self.enemy_bullets.retain(|b| b.alive);
        self.bosses.retain(|b| b.alive);
        self.boss_bullets.retain(|b| b.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(42);
        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.level, 1);
        assert_eq!(state.health, 3);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.checkpoint.is_none());
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_player_translate_clamps() {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut player = Player::new(arena);
        player.pos = Vec2::new(2.0, 2.0);
        player.translate(Vec2::new(-1.0, -1.0), arena);
        assert_eq!(player.pos, Vec2::ZERO);
        player.pos = Vec2::new(ARENA_WIDTH - PLAYER_SIZE - 1.0, 0.0);
        player.translate(Vec2::new(1.0, 0.0), arena);
        assert_eq!(player.pos.x, ARENA_WIDTH - PLAYER_SIZE);
    }

    #[test]
    fn test_checkpoint_is_a_copy() {
        let mut state = GameState::new(1);
        state.level = 3;
        state.score = 900;
        state.save_checkpoint();
        state.upgrades.set(crate::sim::UpgradeKey::Damage, 2);
        let cp = state.checkpoint.unwrap();
        assert_eq!(cp.level, 3);
        assert_eq!(cp.score, 900);
        assert_eq!(cp.upgrades.get(crate::sim::UpgradeKey::Damage), 0);
    }

    #[test]
    fn test_explosion_respects_cap_and_toggle() {
        let mut state = GameState::new(1);
        state.max_particles = 12;
        state.spawn_explosion(Vec2::ZERO, BURST_DEFAULT);
        state.spawn_explosion(Vec2::ZERO, BURST_DEFAULT);
        assert_eq!(state.particles.len(), 12);

        state.particles.clear();
        state.particles_enabled = false;
        state.spawn_explosion(Vec2::ZERO, BURST_LARGE);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_sound_toggle_filters_cues() {
        let mut state = GameState::new(1);
        state.play(SoundCue::Shoot);
        state.sound_enabled = false;
        state.play(SoundCue::Explosion);
        assert_eq!(state.drain_events(), vec![GameEvent::Sound(SoundCue::Shoot)]);
    }

    #[test]
    fn test_hud_flush_deduplicates() {
        let mut state = GameState::new(1);
        state.mark_hud_dirty();
        state.mark_hud_dirty();
        state.flush_hud();
        state.flush_hud();
        assert_eq!(state.drain_events(), vec![GameEvent::HudChanged]);
    }
}
