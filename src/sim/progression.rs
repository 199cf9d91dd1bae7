//! Level progression and the checkpoint/restart model
//!
//! `NotStarted -> Running -> Transition -> Running -> ... -> GameOver ->
//! Running (restart from checkpoint)`. Only [`reset_game`] leads back to
//! level 1.

use super::events::{GameEvent, SoundCue};
use super::state::{GameState, Player, Shield, Transition, TransitionKind, UpgradeMenu};
use super::upgrades::UpgradeLevels;
use crate::consts::*;

/// True for every third level
#[inline]
pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_LEVEL_INTERVAL == 0
}

/// Kill quota for a level
#[inline]
pub fn enemies_for_level(level: u32) -> u32 {
    BASE_ENEMIES_PER_LEVEL + level
}

/// Begin a run. A fresh start when nothing has been played since launch or
/// the last reset, otherwise a restart from the saved checkpoint.
///
/// Returns `true` for a restart.
pub fn start_game(state: &mut GameState) -> bool {
    let checkpoint = state.checkpoint.filter(|_| state.has_started);
    let restart = checkpoint.is_some();

    match checkpoint {
        Some(cp) => {
            state.score = cp.score;
            state.level = cp.level;
            state.upgrades = cp.upgrades;
        }
        None => {
            state.score = 0;
            state.level = 1;
            state.upgrades = UpgradeLevels::default();
            state.has_started = true;
        }
    }
    state.max_health = state.upgrades.max_health();
    state.player.speed = state.upgrades.player_speed();

    state.running = true;
    state.health = state.max_health;
    state.enemies_killed = 0;
    state.enemies_per_level = enemies_for_level(state.level);
    state.is_boss_level = is_boss_level(state.level);
    state.boss_active = false;
    state.boss_triggered = false;
    state.transition = None;
    state.pending_advance = None;
    state.menu = UpgradeMenu::default();

    state.player.pos = Player::spawn_point(state.arena);
    state.clear_pools();
    state.last_shot_ms = None;
    state.shield = Shield::default();
    state.last_heal_ms = None;

    if !restart {
        state.save_checkpoint();
    }

    if restart {
        log::info!("Restarting at level {} with score {}", state.level, state.score);
    } else {
        log::info!("New game started");
    }
    state.emit(GameEvent::RunStarted {
        level: state.level,
        restart,
    });
    state.mark_hud_dirty();
    restart
}

/// Decide whether a transition should begin. Runs once per gameplay tick.
pub fn check_level_progression(state: &mut GameState) {
    if state.is_transitioning() {
        return;
    }

    if state.is_boss_level && !state.boss_triggered && !state.boss_active {
        state.boss_triggered = true;
        begin_transition(state, TransitionKind::BossIncoming, BOSS_TRANSITION_TICKS);
        state.save_checkpoint();
    } else if !state.is_boss_level && state.enemies_killed >= state.enemies_per_level {
        begin_transition(state, TransitionKind::LevelClear, LEVEL_TRANSITION_TICKS);
    }
}

fn begin_transition(state: &mut GameState, kind: TransitionKind, ticks: u32) {
    state.transition = Some(Transition {
        kind,
        ticks_remaining: ticks,
    });
    state.menu.open = false;
    log::debug!("Level {}: {:?} transition ({} ticks)", state.level, kind, ticks);
    state.emit(GameEvent::TransitionStarted {
        boss: kind == TransitionKind::BossIncoming,
        ticks,
    });
}

/// Count down an active transition, resolving it on expiry
pub fn advance_transition(state: &mut GameState) {
    let Some(transition) = state.transition.as_mut() else {
        return;
    };
    transition.ticks_remaining = transition.ticks_remaining.saturating_sub(1);
    if transition.ticks_remaining > 0 {
        return;
    }

    let kind = transition.kind;
    match kind {
        TransitionKind::BossIncoming => {
            // A rejected spawn still ends the countdown
            if !super::spawn::spawn_boss(state) {
                state.transition = None;
            }
        }
        TransitionKind::LevelClear => next_level(state),
    }
}

/// Count down the post-boss delay, advancing the level when it runs out
pub fn advance_pending(state: &mut GameState) {
    let Some(remaining) = state.pending_advance else {
        return;
    };
    if remaining <= 1 {
        state.pending_advance = None;
        next_level(state);
    } else {
        state.pending_advance = Some(remaining - 1);
    }
}

/// Move to the next level and checkpoint it
pub fn next_level(state: &mut GameState) {
    state.level += 1;
    state.enemies_killed = 0;
    state.enemies_per_level = enemies_for_level(state.level);
    state.is_boss_level = is_boss_level(state.level);
    state.boss_active = false;
    state.boss_triggered = false;
    state.transition = None;
    state.pending_advance = None;

    state.save_checkpoint();

    // Asteroids and player bullets carry over
    state.enemies.clear();
    state.enemy_bullets.clear();
    state.bosses.clear();
    state.boss_bullets.clear();

    log::info!("Level {} started (score {})", state.level, state.score);
    state.emit(GameEvent::LevelStarted { level: state.level });
    state.mark_hud_dirty();
}

/// End the run. The checkpoint and upgrades are kept for a restart.
pub fn game_over(state: &mut GameState) {
    if !state.running {
        return;
    }
    state.running = false;
    state.pending_advance = None;
    state.menu.open = false;

    log::info!("Game over at level {} with score {}", state.level, state.score);
    state.play(SoundCue::GameOver);
    state.emit(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    state.mark_hud_dirty();
}

/// Forget all progress so the next start begins at level 1.
/// Ignored while a run is in progress.
pub fn reset_game(state: &mut GameState) -> bool {
    if state.running {
        return false;
    }
    state.has_started = false;
    state.checkpoint = None;
    state.menu = UpgradeMenu::default();

    log::info!("Progress reset to level 1");
    state.emit(GameEvent::Reset);
    true
}
