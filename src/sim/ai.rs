//! Enemy and boss behaviour
//!
//! Enemies descend straight or in a zigzag and take aimed shots at the
//! player. Bosses enter from the top, then follow one of three archetype
//! scripts selected once at spawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::collision::{Bounds, clamp_x};
use super::events::SoundCue;
use super::spawn::enemy_refire_cooldown_ms;
use super::state::{Boss, Bullet, Enemy, GameState, MovePattern};
use crate::consts::*;
use crate::{aim_angle, direction};

/// Boss archetypes, chosen by level bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    /// Levels 1-5: drifts between random points, single aimed shot
    Basic,
    /// Levels 6-10: figure-eight sway, three-way spread
    Advanced,
    /// Levels 11+: tracks and charges, eight-way ring
    Ultimate,
}

/// Boss lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending to its station; cannot fire or ram yet
    Entrance,
    Active,
}

impl BossKind {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=5 => BossKind::Basic,
            6..=10 => BossKind::Advanced,
            _ => BossKind::Ultimate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BossKind::Basic => "BASIC",
            BossKind::Advanced => "ADVANCED",
            BossKind::Ultimate => "ULTIMATE",
        }
    }

    /// Advance the archetype movement by one tick
    fn steer(self, boss: &mut Boss, player_center: Vec2, state: &mut GameState) {
        let t = boss.action_timer as f32;
        match self {
            BossKind::Basic => {
                if boss.action_timer % 120 == 0 {
                    boss.target.x = state.random() * (state.arena.x - boss.size.x);
                }
                if (boss.pos.x - boss.target.x).abs() > 5.0 {
                    boss.pos.x += (boss.target.x - boss.pos.x) * 0.02;
                }
            }
            BossKind::Advanced => {
                boss.pos.x = boss.target.x + (t * 0.03).sin() * 100.0;
                boss.pos.y = boss.target.y + (t * 0.015).sin() * 30.0;
            }
            BossKind::Ultimate => {
                if boss.action_timer % 300 < 240 {
                    let dx = player_center.x - boss.center().x;
                    boss.pos.x += dx * 0.01;
                } else {
                    boss.pos.y += 3.0;
                    if boss.pos.y > boss.target.y + 50.0 {
                        boss.pos.y = boss.target.y;
                    }
                }
            }
        }
    }

    /// Bullet velocities for one volley fired from `origin`
    pub fn volley(self, origin: Vec2, player_center: Vec2) -> Vec<Vec2> {
        match self {
            BossKind::Basic => {
                vec![(player_center - origin).normalize_or(Vec2::Y) * 4.0]
            }
            BossKind::Advanced => {
                let aim = aim_angle(origin, player_center);
                (-1..=1).map(|i| direction(aim + i as f32 * 0.3) * 4.0).collect()
            }
            BossKind::Ultimate => (0..8)
                .map(|i| direction(i as f32 / 8.0 * TAU) * 3.0)
                .collect(),
        }
    }
}

/// True when a wall-clock cooldown has elapsed (or never started)
#[inline]
pub fn cooldown_elapsed(last_ms: Option<f64>, cooldown_ms: f64, now_ms: f64) -> bool {
    last_ms.is_none_or(|last| now_ms - last > cooldown_ms)
}

/// Move enemies, cull those that left the screen and let the rest shoot
///
/// An enemy's first update starts its clock, so the spawn cooldown delays
/// its opening shot.
pub fn update_enemies(state: &mut GameState, now_ms: f64) {
    let mut enemies = std::mem::take(&mut state.enemies);
    let player_center = state.player_center();

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        if enemy.pattern == MovePattern::Zigzag {
            enemy.zigzag_phase += ZIGZAG_PHASE_STEP;
            enemy.pos.x += enemy.zigzag_phase.sin() * ZIGZAG_AMPLITUDE;
        }
        enemy.pos.y += enemy.speed;
        enemy.pos.x = clamp_x(enemy.pos.x, enemy.size.x, state.arena.x);

        if enemy.pos.y > state.arena.y + CULL_MARGIN {
            enemy.alive = false;
            continue;
        }

        let last_ms = *enemy.last_shot_ms.get_or_insert(now_ms);
        if cooldown_elapsed(Some(last_ms), enemy.shoot_cooldown_ms, now_ms) {
            try_enemy_shot(state, enemy, player_center, now_ms);
        }
    }

    state.enemies = enemies;
}

fn try_enemy_shot(state: &mut GameState, enemy: &mut Enemy, player_center: Vec2, now_ms: f64) {
    let d = player_center - enemy.center();
    let distance = d.length();
    // Only shoot at a player below and within range
    if d.y <= 0.0 || distance >= ENEMY_FIRE_RANGE {
        return;
    }

    let id = state.next_entity_id();
    state.enemy_bullets.push(Bullet {
        id,
        pos: Vec2::new(enemy.center().x - ENEMY_BULLET_WIDTH / 2.0, enemy.pos.y + enemy.size.y),
        size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
        vel: d / distance * ENEMY_BULLET_SPEED,
        damage: 1,
        color: 0xff6666,
        alive: true,
    });
    enemy.last_shot_ms = Some(now_ms);
    let roll = state.random_f64();
    enemy.shoot_cooldown_ms = enemy_refire_cooldown_ms(state.level, roll);
    state.play(SoundCue::EnemyShoot);
}

/// Run entrance and archetype behaviour for every boss
pub fn update_bosses(state: &mut GameState, now_ms: f64) {
    let mut bosses = std::mem::take(&mut state.bosses);
    let player_center = state.player_center();

    for boss in bosses.iter_mut().filter(|b| b.alive) {
        boss.action_timer += 1;

        if boss.phase == BossPhase::Entrance {
            if boss.pos.y < boss.target.y {
                boss.pos.y += boss.speed;
            } else {
                boss.phase = BossPhase::Active;
                log::debug!("{} boss reached station", boss.kind.label());
            }
            continue;
        }

        boss.kind.steer(boss, player_center, state);
        boss.pos.x = clamp_x(boss.pos.x, boss.size.x, state.arena.x);

        if cooldown_elapsed(boss.last_shot_ms, boss.shoot_cooldown_ms, now_ms) {
            boss_shoot(state, boss, player_center);
            boss.last_shot_ms = Some(now_ms);
        }
    }

    state.bosses = bosses;
}

fn boss_shoot(state: &mut GameState, boss: &Boss, player_center: Vec2) {
    let origin = Vec2::new(boss.center().x, boss.pos.y + boss.size.y);
    for vel in boss.kind.volley(origin, player_center) {
        let id = state.next_entity_id();
        state.boss_bullets.push(Bullet {
            id,
            pos: Vec2::new(origin.x - BOSS_BULLET_WIDTH / 2.0, origin.y),
            size: Vec2::new(BOSS_BULLET_WIDTH, BOSS_BULLET_HEIGHT),
            vel,
            damage: 2,
            color: boss.color,
            alive: true,
        });
    }
    state.play(SoundCue::EnemyShoot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_boss;

    fn enemy_at(state: &mut GameState, pos: Vec2, pattern: MovePattern) -> Enemy {
        Enemy {
            id: state.next_entity_id(),
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            speed: 1.0,
            health: 2,
            pattern,
            zigzag_phase: 0.0,
            last_shot_ms: Some(0.0),
            shoot_cooldown_ms: 1000.0,
            color: 0xff4444,
            alive: true,
        }
    }

    #[test]
    fn test_boss_kind_brackets() {
        assert_eq!(BossKind::for_level(3), BossKind::Basic);
        assert_eq!(BossKind::for_level(5), BossKind::Basic);
        assert_eq!(BossKind::for_level(6), BossKind::Advanced);
        assert_eq!(BossKind::for_level(10), BossKind::Advanced);
        assert_eq!(BossKind::for_level(11), BossKind::Ultimate);
        assert_eq!(BossKind::for_level(99), BossKind::Ultimate);
    }

    #[test]
    fn test_volley_sizes() {
        let origin = Vec2::new(400.0, 180.0);
        let player = Vec2::new(415.0, 515.0);
        assert_eq!(BossKind::Basic.volley(origin, player).len(), 1);
        assert_eq!(BossKind::Advanced.volley(origin, player).len(), 3);
        assert_eq!(BossKind::Ultimate.volley(origin, player).len(), 8);
    }

    #[test]
    fn test_basic_volley_is_aimed() {
        let origin = Vec2::new(0.0, 0.0);
        let player = Vec2::new(0.0, 100.0);
        let v = BossKind::Basic.volley(origin, player)[0];
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_advanced_spread_is_centered_on_aim() {
        let origin = Vec2::ZERO;
        let player = Vec2::new(0.0, 100.0);
        let shots = BossKind::Advanced.volley(origin, player);
        let aim = aim_angle(origin, player);
        let middle = shots[1].y.atan2(shots[1].x);
        assert!((middle - aim).abs() < 1e-5);
        let left = shots[0].y.atan2(shots[0].x);
        assert!((aim - left - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_cooldown_elapsed() {
        assert!(cooldown_elapsed(None, 800.0, 0.0));
        assert!(!cooldown_elapsed(Some(1000.0), 800.0, 1800.0));
        assert!(cooldown_elapsed(Some(1000.0), 800.0, 1800.5));
    }

    #[test]
    fn test_enemy_fires_only_when_player_below_and_near() {
        let mut state = GameState::new(3);
        state.player.pos = Vec2::new(400.0, 300.0);

        let below = enemy_at(&mut state, Vec2::new(400.0, 150.0), MovePattern::Straight);
        let far = enemy_at(&mut state, Vec2::new(0.0, -30.0), MovePattern::Straight);
        let behind = enemy_at(&mut state, Vec2::new(400.0, 400.0), MovePattern::Straight);
        state.enemies = vec![below, far, behind];

        update_enemies(&mut state, 10_000.0);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert!(state.enemy_bullets[0].vel.y > 0.0);
        assert!((state.enemy_bullets[0].vel.length() - ENEMY_BULLET_SPEED).abs() < 1e-4);

        let shooter = &state.enemies[0];
        assert_eq!(shooter.last_shot_ms, Some(10_000.0));
        assert!(shooter.shoot_cooldown_ms >= enemy_refire_cooldown_ms(state.level, 0.0));
        assert!(shooter.shoot_cooldown_ms < enemy_refire_cooldown_ms(state.level, 1.0));
    }

    #[test]
    fn test_first_shot_waits_for_spawn_cooldown() {
        let mut state = GameState::new(3);
        state.player.pos = Vec2::new(400.0, 300.0);
        let mut e = enemy_at(&mut state, Vec2::new(400.0, 150.0), MovePattern::Straight);
        e.last_shot_ms = None;
        e.shoot_cooldown_ms = 1300.0;
        state.enemies = vec![e];

        update_enemies(&mut state, 500.0);
        assert_eq!(state.enemies[0].last_shot_ms, Some(500.0));
        assert!(state.enemy_bullets.is_empty());

        update_enemies(&mut state, 1800.0);
        assert!(state.enemy_bullets.is_empty());
        update_enemies(&mut state, 1801.0);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    /// Enemy bullets fired by one stationary enemy over `ticks` frames
    fn shots_fired(level: u32, ticks: u32) -> usize {
        let mut state = GameState::new(77);
        state.level = level;
        state.player.pos = Vec2::new(400.0, 300.0);
        let mut e = enemy_at(&mut state, Vec2::new(400.0, 150.0), MovePattern::Straight);
        e.speed = 0.0;
        e.last_shot_ms = None;
        e.shoot_cooldown_ms = crate::sim::spawn::enemy_initial_cooldown_ms(level);
        state.enemies = vec![e];
        for t in 0..ticks {
            update_enemies(&mut state, t as f64 * 1000.0 / TICKS_PER_SECOND as f64);
        }
        state.enemy_bullets.len()
    }

    #[test]
    fn test_higher_level_enemies_fire_faster() {
        let slow = shots_fired(1, 3_600);
        let fast = shots_fired(20, 3_600);
        assert!(slow >= 20, "level 1 fired {slow} shots");
        assert!(fast > slow, "level 20 fired {fast}, level 1 fired {slow}");
    }

    #[test]
    fn test_zigzag_moves_sideways_and_clamps() {
        let mut state = GameState::new(3);
        state.player.pos = Vec2::new(0.0, 0.0);
        let e = enemy_at(&mut state, Vec2::new(0.0, 10.0), MovePattern::Zigzag);
        state.enemies = vec![e];
        for _ in 0..40 {
            update_enemies(&mut state, 0.0);
        }
        let e = &state.enemies[0];
        assert!(e.pos.x >= 0.0);
        assert!(e.pos.x <= state.arena.x - e.size.x);
        assert!((e.zigzag_phase - 4.0).abs() < 1e-3);
        assert!((e.pos.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_culled_below_screen() {
        let mut state = GameState::new(3);
        let y = state.arena.y + CULL_MARGIN;
        let e = enemy_at(&mut state, Vec2::new(100.0, y), MovePattern::Straight);
        state.enemies = vec![e];
        update_enemies(&mut state, 0.0);
        assert!(!state.enemies[0].alive);
    }

    #[test]
    fn test_boss_entrance_then_active() {
        let mut state = GameState::new(3);
        state.level = 3;
        spawn_boss(&mut state);
        let start_y = state.bosses[0].pos.y;
        assert_eq!(start_y, -100.0);

        // Descends one pixel per tick without firing
        for _ in 0..200 {
            update_bosses(&mut state, 0.0);
        }
        assert_eq!(state.bosses[0].phase, BossPhase::Entrance);
        assert!(state.boss_bullets.is_empty());

        update_bosses(&mut state, 0.0);
        assert_eq!(state.bosses[0].phase, BossPhase::Active);

        update_bosses(&mut state, 0.0);
        assert_eq!(state.boss_bullets.len(), 1);
    }

    #[test]
    fn test_boss_fire_cooldown_is_fixed() {
        let mut state = GameState::new(3);
        state.level = 12;
        spawn_boss(&mut state);
        state.bosses[0].phase = BossPhase::Active;
        state.bosses[0].pos.y = BOSS_TARGET_Y;

        update_bosses(&mut state, 1000.0);
        assert_eq!(state.boss_bullets.len(), 8);
        update_bosses(&mut state, 1500.0);
        assert_eq!(state.boss_bullets.len(), 8);
        update_bosses(&mut state, 1801.0);
        assert_eq!(state.boss_bullets.len(), 16);
    }

    /// Spawn the level's boss already on station
    fn active_boss(state: &mut GameState, level: u32) {
        state.level = level;
        spawn_boss(state);
        let boss = &mut state.bosses[0];
        boss.phase = BossPhase::Active;
        boss.pos.y = boss.target.y;
        boss.action_timer = 0;
    }

    #[test]
    fn test_basic_boss_eases_toward_target() {
        let mut state = GameState::new(3);
        active_boss(&mut state, 3);
        state.bosses[0].pos.x = 350.0;
        state.bosses[0].target.x = 100.0;

        update_bosses(&mut state, 0.0);
        assert!((state.bosses[0].pos.x - 345.0).abs() < 1e-3);

        // Holds still once within 5 px
        state.bosses[0].pos.x = 104.0;
        update_bosses(&mut state, 0.0);
        assert_eq!(state.bosses[0].pos.x, 104.0);
    }

    #[test]
    fn test_basic_boss_retargets_every_120_ticks() {
        let mut state = GameState::new(3);
        active_boss(&mut state, 3);
        state.bosses[0].target.x = 123.0;

        for _ in 1..120 {
            update_bosses(&mut state, 0.0);
        }
        assert_eq!(state.bosses[0].action_timer, 119);
        assert_eq!(state.bosses[0].target.x, 123.0);

        update_bosses(&mut state, 0.0);
        let boss = &state.bosses[0];
        assert_ne!(boss.target.x, 123.0);
        assert!(boss.target.x >= 0.0 && boss.target.x < state.arena.x - boss.size.x);
    }

    #[test]
    fn test_advanced_boss_follows_figure_eight() {
        let mut state = GameState::new(3);
        active_boss(&mut state, 6);
        let target = state.bosses[0].target;

        for n in 1..=300u32 {
            update_bosses(&mut state, 0.0);
            let t = n as f32;
            let boss = &state.bosses[0];
            let want_x = target.x + (t * 0.03).sin() * 100.0;
            let want_y = target.y + (t * 0.015).sin() * 30.0;
            assert!((boss.pos.x - want_x).abs() < 1e-3, "tick {n}: x {} vs {want_x}", boss.pos.x);
            assert!((boss.pos.y - want_y).abs() < 1e-3, "tick {n}: y {} vs {want_y}", boss.pos.y);
        }
    }

    #[test]
    fn test_ultimate_boss_tracks_then_charges() {
        let mut state = GameState::new(3);
        active_boss(&mut state, 11);
        state.bosses[0].pos.x = 100.0;
        // Player center at x = 600, boss center at x = 150
        state.player.pos.x = 600.0 - state.player.size.x / 2.0;

        update_bosses(&mut state, 0.0);
        assert!((state.bosses[0].pos.x - 104.5).abs() < 1e-3);
        assert_eq!(state.bosses[0].pos.y, BOSS_TARGET_Y);

        // Ticks 240..300 of each cycle are a charge
        state.bosses[0].action_timer = 239;
        let x = state.bosses[0].pos.x;
        update_bosses(&mut state, 0.0);
        assert_eq!(state.bosses[0].pos.x, x);
        assert_eq!(state.bosses[0].pos.y, BOSS_TARGET_Y + 3.0);

        // Snaps back once past 50 px below station
        state.bosses[0].pos.y = BOSS_TARGET_Y + 49.0;
        update_bosses(&mut state, 0.0);
        assert_eq!(state.bosses[0].pos.y, BOSS_TARGET_Y);

        state.bosses[0].action_timer = 299;
        update_bosses(&mut state, 0.0);
        assert!(state.bosses[0].pos.x > x);
        assert_eq!(state.bosses[0].pos.y, BOSS_TARGET_Y);
    }

    #[test]
    fn test_boss_stays_on_screen() {
        let mut state = GameState::new(3);
        state.level = 11;
        spawn_boss(&mut state);
        state.bosses[0].phase = BossPhase::Active;
        state.player.pos.x = 5_000.0;
        for i in 0..600 {
            update_bosses(&mut state, i as f64);
            let b = &state.bosses[0];
            assert!(b.pos.x >= 0.0 && b.pos.x <= state.arena.x - b.size.x);
            assert!(b.pos.y <= b.target.y + 53.0);
        }
    }
}
