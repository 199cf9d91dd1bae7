//! Combat resolution
//!
//! Runs after everything has moved. Player bullets are checked against
//! asteroids, enemies and bosses in that order; then each hazard pool is
//! checked against the player. Hits only flip `alive` flags, so anything
//! destroyed earlier in the pass is skipped by later checks.

use super::collision::{Bounds, check_collision};
use super::events::{GameEvent, SoundCue};
use super::progression::game_over;
use super::state::GameState;
use crate::consts::*;

/// Damage dealt to the player by each hazard
pub mod damage {
    pub const ASTEROID: u32 = 1;
    pub const ENEMY_BULLET: u32 = 1;
    pub const ENEMY_CONTACT: u32 = 2;
    pub const BOSS_BULLET: u32 = 2;
    pub const BOSS_CONTACT: u32 = 3;
}

/// Resolve every collision for this tick
pub fn resolve_collisions(state: &mut GameState) {
    resolve_player_bullets(state);
    resolve_hazards(state);
}

fn resolve_player_bullets(state: &mut GameState) {
    let mut bullets = std::mem::take(&mut state.bullets);
    let mut asteroids = std::mem::take(&mut state.asteroids);
    let mut enemies = std::mem::take(&mut state.enemies);
    let mut bosses = std::mem::take(&mut state.bosses);

    for bullet in bullets.iter_mut().filter(|b| b.alive) {
        if let Some(asteroid) = asteroids
            .iter_mut()
            .find(|a| a.alive && check_collision(&*bullet, &**a))
        {
            bullet.alive = false;
            asteroid.alive = false;
            state.spawn_explosion(asteroid.center(), BURST_DEFAULT);
            state.play(SoundCue::Explosion);
            award(state, ASTEROID_SCORE);
            continue;
        }

        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && check_collision(&*bullet, &**e))
        {
            bullet.alive = false;
            enemy.health -= bullet.damage;
            if enemy.health <= 0 {
                enemy.alive = false;
                state.spawn_explosion(enemy.center(), BURST_DEFAULT);
                state.play(SoundCue::Explosion);
                state.enemies_killed += 1;
                award(state, ENEMY_SCORE);
            }
            continue;
        }

        if let Some(boss) = bosses
            .iter_mut()
            .find(|b| b.alive && check_collision(&*bullet, &**b))
        {
            bullet.alive = false;
            boss.health -= bullet.damage;
            state.spawn_explosion(bullet.pos, BURST_SMALL);
            state.mark_hud_dirty();
            if boss.health <= 0 {
                boss.alive = false;
                state.spawn_explosion(boss.center(), BURST_LARGE);
                state.play(SoundCue::Explosion);
                let base = BOSS_BASE_SCORE + state.level * BOSS_SCORE_PER_LEVEL;
                let score = award(state, base);
                state.boss_active = false;
                state.pending_advance = Some(BOSS_DEFEAT_ADVANCE_TICKS);
                log::info!("Level {}: {} boss defeated (+{})", state.level, boss.kind.label(), score);
                state.emit(GameEvent::BossDefeated {
                    kind: boss.kind,
                    score,
                });
            }
        }
    }

    state.bullets = bullets;
    state.asteroids = asteroids;
    state.enemies = enemies;
    state.bosses = bosses;
}

/// Add a multiplier-scaled award to the score, returning the amount
fn award(state: &mut GameState, base: u32) -> u64 {
    let points = state.upgrades.scaled_score(base);
    state.score += points;
    state.mark_hud_dirty();
    points
}

fn resolve_hazards(state: &mut GameState) {
    // Nothing reaches the player while shielded; hazards pass through intact
    if state.shield.active {
        return;
    }
    let player = state.player.bounds();

    for i in 0..state.enemies.len() {
        if !state.running {
            return;
        }
        let enemy = &mut state.enemies[i];
        if enemy.alive && check_collision(&player, &*enemy) {
            enemy.alive = false;
            let at = enemy.center();
            state.spawn_explosion(at, BURST_DEFAULT);
            damage_player(state, damage::ENEMY_CONTACT);
        }
    }

    for i in 0..state.bosses.len() {
        if !state.running {
            return;
        }
        let boss = &state.bosses[i];
        if boss.alive && boss.is_active() && check_collision(&player, boss) {
            state.spawn_explosion(player.center(), BURST_DEFAULT);
            damage_player(state, damage::BOSS_CONTACT);
        }
    }

    for i in 0..state.boss_bullets.len() {
        if !state.running {
            return;
        }
        let bullet = &mut state.boss_bullets[i];
        if bullet.alive && check_collision(&player, &*bullet) {
            bullet.alive = false;
            state.spawn_explosion(player.center(), BURST_DEFAULT);
            damage_player(state, damage::BOSS_BULLET);
        }
    }

    for i in 0..state.enemy_bullets.len() {
        if !state.running {
            return;
        }
        let bullet = &mut state.enemy_bullets[i];
        if bullet.alive && check_collision(&player, &*bullet) {
            bullet.alive = false;
            state.spawn_explosion(player.center(), BURST_DEFAULT);
            damage_player(state, damage::ENEMY_BULLET);
        }
    }

    for i in 0..state.asteroids.len() {
        if !state.running {
            return;
        }
        let asteroid = &mut state.asteroids[i];
        if asteroid.alive && check_collision(&player, &*asteroid) {
            asteroid.alive = false;
            let at = asteroid.pos;
            state.spawn_explosion(at, BURST_DEFAULT);
            damage_player(state, damage::ASTEROID);
        }
    }
}

/// Apply hazard damage. Health saturates at zero, which ends the run.
pub fn damage_player(state: &mut GameState, amount: u32) {
    if !state.running {
        return;
    }
    state.health = state.health.saturating_sub(amount);
    state.play(SoundCue::Damage);
    state.mark_hud_dirty();
    log::debug!("Player hit for {} ({} left)", amount, state.health);
    if state.health == 0 {
        game_over(state);
    }
}
