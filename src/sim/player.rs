//! Player ship: movement, shooting, shield and auto-repair

use glam::Vec2;

use super::ai::cooldown_elapsed;
use super::events::{GameEvent, SoundCue};
use super::state::{Bullet, GameState};
use super::upgrades::UpgradeKey;
use crate::consts::*;

/// Shield timers, auto-repair and movement. Skipped when not running.
pub fn update_player(state: &mut GameState, dir: Vec2, now_ms: f64) {
    if !state.running {
        return;
    }

    if state.shield.active {
        state.shield.timer = state.shield.timer.saturating_sub(1);
        if state.shield.timer == 0 {
            state.shield.active = false;
            log::debug!("Shield expired");
        }
    }
    state.shield.cooldown = state.shield.cooldown.saturating_sub(1);

    auto_heal(state, now_ms);

    let arena = state.arena;
    state.player.translate(dir, arena);
}

fn auto_heal(state: &mut GameState, now_ms: f64) {
    if state.upgrades.get(UpgradeKey::AutoHeal) == 0 || state.health >= state.max_health {
        return;
    }
    if cooldown_elapsed(state.last_heal_ms, AUTO_HEAL_INTERVAL_MS, now_ms) {
        state.health += 1;
        state.last_heal_ms = Some(now_ms);
        state.mark_hud_dirty();
    }
}

/// Fire a volley if the shoot cooldown allows. Returns whether it fired.
pub fn try_shoot(state: &mut GameState, now_ms: f64) -> bool {
    if !state.running || !cooldown_elapsed(state.last_shot_ms, state.upgrades.shoot_cooldown_ms(), now_ms) {
        return false;
    }

    let count = state.upgrades.bullet_count();
    let damage = state.upgrades.bullet_damage();
    let muzzle_x = state.player.pos.x + state.player.size.x / 2.0 - PLAYER_BULLET_WIDTH / 2.0;
    let y = state.player.pos.y;
    for i in 0..count {
        let offset = if count > 1 {
            (i as f32 - (count / 2) as f32) * MULTI_SHOT_SPACING
        } else {
            0.0
        };
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(muzzle_x + offset, y),
            size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            damage,
            color: 0xffff00,
            alive: true,
        });
    }

    state.last_shot_ms = Some(now_ms);
    state.play(SoundCue::Shoot);
    true
}

/// Raise the shield if owned, off cooldown and not already up
pub fn activate_shield(state: &mut GameState) -> bool {
    if !state.running
        || state.upgrades.get(UpgradeKey::Shield) == 0
        || state.shield.active
        || state.shield.cooldown > 0
    {
        return false;
    }

    state.shield.active = true;
    state.shield.timer = SHIELD_DURATION_TICKS;
    state.shield.cooldown = SHIELD_COOLDOWN_TICKS;
    log::debug!("Shield activated");
    state.emit(GameEvent::ShieldActivated);
    state.play(SoundCue::Shoot);
    true
}
