//! Per-tick movement and off-screen culling for the passive pools
//!
//! Enemies and bosses move in `ai`; everything here just follows its
//! velocity.

use super::collision::outside_arena;
use super::state::GameState;
use crate::consts::*;

/// Scroll the background, wrapping stars back to the top
pub fn update_stars(state: &mut GameState) {
    let mut stars = std::mem::take(&mut state.stars);
    for star in &mut stars {
        star.pos.y += star.speed;
        if star.pos.y > state.arena.y {
            star.pos.y = -5.0;
            star.pos.x = state.random() * state.arena.x;
        }
    }
    state.stars = stars;
}

/// Age particles and drop the expired ones
pub fn update_particles(state: &mut GameState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

/// Move asteroids down. One that falls off the bottom awards the dodge bonus.
pub fn update_asteroids(state: &mut GameState) {
    let limit = state.arena.y + CULL_MARGIN;
    let mut dodged = 0;
    for asteroid in state.asteroids.iter_mut().filter(|a| a.alive) {
        asteroid.pos.y += asteroid.speed;
        asteroid.rotation += asteroid.rotation_speed;
        if asteroid.pos.y > limit {
            asteroid.alive = false;
            dodged += 1;
        }
    }
    if dodged > 0 {
        state.score += dodged * ASTEROID_DODGE_BONUS;
        state.mark_hud_dirty();
    }
}

/// Advance all three bullet pools and cull what left the arena
pub fn update_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_mut().filter(|b| b.alive) {
        bullet.advance();
        if bullet.pos.y < -BULLET_CULL_MARGIN {
            bullet.alive = false;
        }
    }

    let arena = state.arena;
    for bullet in state
        .enemy_bullets
        .iter_mut()
        .chain(state.boss_bullets.iter_mut())
        .filter(|b| b.alive)
    {
        bullet.advance();
        if outside_arena(bullet.pos, arena, BULLET_CULL_MARGIN) {
            bullet.alive = false;
        }
    }
}
