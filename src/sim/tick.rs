//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one frame. Wall-clock time is
//! supplied by the caller so runs are reproducible from (seed, inputs,
//! timestamps).

use glam::Vec2;

use super::ai::{update_bosses, update_enemies};
use super::collision::Bounds;
use super::combat::resolve_collisions;
use super::motion::{update_asteroids, update_bullets, update_particles, update_stars};
use super::player::{activate_shield, try_shoot, update_player};
use super::progression::{
    advance_pending, advance_transition, check_level_progression, reset_game, start_game,
};
use super::spawn::{spawn_asteroid, spawn_enemy};
use super::state::GameState;
use super::upgrades::{CATALOG, UpgradeKey, purchase};

/// Input commands for a single tick (deterministic)
///
/// Movement and `fire` are held states; everything else is a one-shot
/// command that should be set for exactly one tick per key press.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire while held (cooldown gated)
    pub fire: bool,
    /// Start a new run or restart from the checkpoint
    pub start: bool,
    /// Raise the shield
    pub shield: bool,
    pub toggle_menu: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_confirm: bool,
    pub menu_cancel: bool,
    pub toggle_sound: bool,
    /// Forget all progress (only when not running)
    pub reset: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Movement direction from the held keys (components in -1..=1)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    handle_commands(state, &input);

    update_stars(state);
    update_player(state, input.direction(), now_ms);
    // A fresh shield covers this tick plus the next 179
    if input.shield {
        activate_shield(state);
    }
    update_particles(state);

    if state.running {
        if state.is_transitioning() {
            advance_transition(state);
        } else {
            run_gameplay(state, &input, now_ms);
        }
    }

    state.flush_hud();
    state.time_ticks += 1;
}

fn handle_commands(state: &mut GameState, input: &TickInput) {
    if input.toggle_sound {
        state.sound_enabled = !state.sound_enabled;
        log::info!("Sound {}", if state.sound_enabled { "enabled" } else { "disabled" });
    }

    if input.start && !state.running {
        start_game(state);
    }

    if input.toggle_menu && state.running && !state.is_transitioning() {
        state.menu.open = !state.menu.open;
    }

    if input.reset {
        reset_game(state);
    }

    if state.menu.open {
        navigate_menu(state, input);
    }
}

fn navigate_menu(state: &mut GameState, input: &TickInput) {
    if input.menu_up {
        state.menu.selected = state.menu.selected.saturating_sub(1);
    }
    if input.menu_down {
        state.menu.selected = (state.menu.selected + 1).min(CATALOG.len() - 1);
    }
    if input.menu_confirm {
        let selected = state.menu.selected;
        if let Err(e) = purchase(state, selected) {
            log::debug!("Purchase rejected: {e}");
        }
    }
    if input.menu_cancel {
        state.menu.open = false;
    }
}

fn run_gameplay(state: &mut GameState, input: &TickInput, now_ms: f64) {
    advance_pending(state);

    if input.fire {
        try_shoot(state, now_ms);
    }

    spawn_asteroid(state);
    spawn_enemy(state);

    update_asteroids(state);
    update_enemies(state, now_ms);
    update_bosses(state, now_ms);
    update_bullets(state);

    resolve_collisions(state);
    state.compact_pools();

    if state.running {
        check_level_progression(state);
    }
}

/// Purchase order used by the autopilot
const AUTOPILOT_UPGRADES: [UpgradeKey; 6] = [
    UpgradeKey::RapidFire,
    UpgradeKey::MultiShot,
    UpgradeKey::Damage,
    UpgradeKey::Health,
    UpgradeKey::Shield,
    UpgradeKey::AutoHeal,
];

/// Fill in input for idle mode: restart on death, dodge, chase and shoot
fn autopilot(state: &mut GameState, input: &mut TickInput) {
    if !state.running {
        input.start = true;
        return;
    }
    input.fire = true;

    for key in AUTOPILOT_UPGRADES {
        if let Some(index) = CATALOG.iter().position(|s| s.key == key) {
            if purchase(state, index).is_ok() {
                break;
            }
        }
    }

    let me = state.player.bounds();
    let danger_zone = 120.0;
    let threat = state
        .asteroids
        .iter()
        .map(|a| a.bounds())
        .chain(state.enemy_bullets.iter().map(|b| b.bounds()))
        .chain(state.boss_bullets.iter().map(|b| b.bounds()))
        .chain(state.enemies.iter().map(|e| e.bounds()))
        .filter(|r| {
            r.bottom() > me.pos.y - danger_zone
                && r.pos.y < me.bottom()
                && r.right() > me.pos.x - 10.0
                && r.pos.x < me.right() + 10.0
        })
        .min_by(|a, b| {
            (me.pos.y - a.bottom())
                .abs()
                .partial_cmp(&(me.pos.y - b.bottom()).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(threat) = threat {
        input.shield = true;
        // Step away from the threat's center, preferring the open side
        let go_left = threat.center().x > me.center().x && me.pos.x > me.size.x;
        input.left = go_left;
        input.right = !go_left;
        return;
    }

    let target_x = state
        .boss()
        .map(|b| b.center().x)
        .or_else(|| {
            state
                .enemies
                .iter()
                .filter(|e| e.pos.y < me.pos.y)
                .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
                .map(|e| e.center().x)
        })
        .unwrap_or(state.arena.x / 2.0);

    let dx = target_x - me.center().x;
    input.left = dx < -state.player.speed;
    input.right = dx > state.player.speed;
}
