//! Entity spawners
//!
//! Asteroids and enemies appear through independent per-tick Bernoulli
//! trials. The boss is a single deterministic spawn triggered by the
//! transition countdown.

use glam::Vec2;

use super::ai::{BossKind, BossPhase};
use super::events::{GameEvent, SoundCue};
use super::state::{Asteroid, Boss, Enemy, GameState, MovePattern};
use crate::consts::*;

/// Per-tick enemy spawn probability for a level
pub fn enemy_spawn_chance(level: u32) -> f64 {
    ENEMY_BASE_SPAWN_CHANCE + level as f64 * ENEMY_SPAWN_CHANCE_PER_LEVEL
}

/// Enemy hit points for a level
pub fn enemy_health(level: u32) -> i32 {
    ENEMY_BASE_HEALTH + (level / 3) as i32
}

/// Cooldown before an enemy's first shot (ms)
pub fn enemy_initial_cooldown_ms(level: u32) -> f64 {
    level_scaled_cooldown(ENEMY_FIRST_SHOT_MS, level)
}

/// Cooldown after an enemy shot (ms), `roll` uniform in [0, 1)
pub fn enemy_refire_cooldown_ms(level: u32, roll: f64) -> f64 {
    level_scaled_cooldown(ENEMY_REFIRE_MIN_MS + roll * ENEMY_REFIRE_RANGE_MS, level)
}

fn level_scaled_cooldown(base_ms: f64, level: u32) -> f64 {
    (base_ms - level as f64 * ENEMY_COOLDOWN_PER_LEVEL_MS).max(ENEMY_COOLDOWN_FLOOR_MS)
}

/// Boss hit points for a level
pub fn boss_health(level: u32) -> i32 {
    BOSS_BASE_HEALTH + level as i32 * BOSS_HEALTH_PER_LEVEL
}

/// Roll for a new asteroid at the top of the screen
pub fn spawn_asteroid(state: &mut GameState) {
    if !state.chance(ASTEROID_SPAWN_CHANCE) {
        return;
    }
    let x = state.random() * (state.arena.x - 40.0);
    let size = Vec2::new(
        ASTEROID_MIN_SIZE + state.random() * ASTEROID_SIZE_RANGE,
        ASTEROID_MIN_SIZE + state.random() * ASTEROID_SIZE_RANGE,
    );
    let speed = ASTEROID_MIN_SPEED + state.random() * ASTEROID_SPEED_RANGE;
    let rotation_speed = (state.random() - 0.5) * 0.1;
    let id = state.next_entity_id();
    state.asteroids.push(Asteroid {
        id,
        pos: Vec2::new(x, -40.0),
        size,
        speed,
        rotation: 0.0,
        rotation_speed,
        alive: true,
    });
}

/// Roll for a new enemy; never during boss levels, transitions or a boss fight
pub fn spawn_enemy(state: &mut GameState) {
    if state.is_boss_level || state.is_transitioning() || state.boss_active {
        return;
    }
    if !state.chance(enemy_spawn_chance(state.level)) {
        return;
    }

    let level = state.level;
    let x = state.random() * (state.arena.x - 40.0);
    let speed = 1.0 + state.random() * 2.0 + level as f32 * 0.3;
    let pattern = if state.random() < 0.5 {
        MovePattern::Straight
    } else {
        MovePattern::Zigzag
    };
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, -40.0),
        size: Vec2::splat(ENEMY_SIZE),
        speed,
        health: enemy_health(level),
        pattern,
        zigzag_phase: 0.0,
        last_shot_ms: None,
        shoot_cooldown_ms: enemy_initial_cooldown_ms(level),
        color: 0xff4444,
        alive: true,
    });
}

/// Spawn this level's boss. A no-op while a boss is already active.
pub fn spawn_boss(state: &mut GameState) -> bool {
    if state.boss_active {
        log::debug!("Boss spawn ignored: boss already active");
        return false;
    }

    let kind = BossKind::for_level(state.level);
    let health = boss_health(state.level);
    let x = state.arena.x / 2.0 - BOSS_WIDTH / 2.0;
    let id = state.next_entity_id();
    state.bosses.push(Boss {
        id,
        kind,
        phase: BossPhase::Entrance,
        pos: Vec2::new(x, -100.0),
        size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
        speed: BOSS_SPEED,
        health,
        max_health: health,
        action_timer: 0,
        target: Vec2::new(x, BOSS_TARGET_Y),
        last_shot_ms: None,
        shoot_cooldown_ms: BOSS_SHOOT_COOLDOWN_MS,
        color: 0xff0088,
        alive: true,
    });

    state.boss_active = true;
    state.transition = None;
    log::info!("Level {}: {} boss spawned ({} hp)", state.level, kind.label(), health);
    state.emit(GameEvent::BossSpawned { kind, health });
    state.play(SoundCue::BossArrival);
    state.mark_hud_dirty();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Transition, TransitionKind};

    #[test]
    fn test_level_scaling_is_monotonic() {
        for level in 1..40 {
            assert!(enemy_spawn_chance(level + 1) > enemy_spawn_chance(level));
            assert!(enemy_health(level + 1) >= enemy_health(level));
            assert!(enemy_initial_cooldown_ms(level + 1) <= enemy_initial_cooldown_ms(level));
            assert!(boss_health(level + 1) > boss_health(level));
        }
        assert_eq!(enemy_initial_cooldown_ms(100), 500.0);
    }

    #[test]
    fn test_refire_band_shrinks_with_level() {
        assert_eq!(enemy_refire_cooldown_ms(0, 0.0), 1000.0);
        assert_eq!(enemy_refire_cooldown_ms(0, 0.5), 2000.0);
        assert_eq!(enemy_refire_cooldown_ms(1, 0.5), 1950.0);
        assert_eq!(enemy_refire_cooldown_ms(20, 0.5), 1000.0);
        assert_eq!(enemy_refire_cooldown_ms(20, 0.0), 500.0);
        for level in 1..40 {
            for roll in [0.0, 0.25, 0.75, 0.999] {
                assert!(enemy_refire_cooldown_ms(level + 1, roll) <= enemy_refire_cooldown_ms(level, roll));
                assert!(enemy_refire_cooldown_ms(level, roll) >= ENEMY_COOLDOWN_FLOOR_MS);
            }
        }
    }

    #[test]
    fn test_boss_health_at_level_three() {
        assert_eq!(boss_health(3), 30);
    }

    #[test]
    fn test_spawn_boss_is_idempotent() {
        let mut state = GameState::new(5);
        state.level = 3;
        state.transition = Some(Transition {
            kind: TransitionKind::BossIncoming,
            ticks_remaining: 0,
        });
        assert!(spawn_boss(&mut state));
        assert!(!spawn_boss(&mut state));
        assert_eq!(state.bosses.len(), 1);
        assert!(state.boss_active);
        assert!(state.transition.is_none());

        let boss = &state.bosses[0];
        assert_eq!(boss.kind, BossKind::Basic);
        assert_eq!(boss.health, 30);
        assert_eq!(boss.max_health, 30);
    }

    #[test]
    fn test_enemies_suppressed_on_boss_levels() {
        let mut state = GameState::new(5);
        state.is_boss_level = true;
        for _ in 0..5_000 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.is_empty());

        state.is_boss_level = false;
        state.boss_active = true;
        for _ in 0..5_000 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawned_entities_in_range() {
        let mut state = GameState::new(11);
        state.level = 4;
        for _ in 0..5_000 {
            spawn_asteroid(&mut state);
            spawn_enemy(&mut state);
        }
        assert!(!state.asteroids.is_empty());
        assert!(!state.enemies.is_empty());
        for a in &state.asteroids {
            assert!(a.size.x >= 20.0 && a.size.x < 50.0);
            assert!(a.size.y >= 20.0 && a.size.y < 50.0);
            assert!(a.speed >= 2.0 && a.speed < 5.0);
            assert!(a.rotation_speed.abs() <= 0.05);
        }
        for e in &state.enemies {
            assert_eq!(e.health, 3);
            assert!(e.speed >= 2.2 && e.speed < 4.2);
            assert_eq!(e.shoot_cooldown_ms, 1300.0);
        }
    }
}
