//! Read-only views for presentation
//!
//! Nothing here mutates the game. Hosts build these views from `&GameState`
//! whenever a `HudChanged` event arrives or once per frame for overlays.

use crate::sim::{CATALOG, GamePhase, GameState, TransitionKind};

/// Something that draws a frame from the current state
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub health: u32,
    pub level: u32,
    /// `"killed/quota"`, or `"BOSS"` on boss levels
    pub enemies: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let enemies = if state.is_boss_level {
            "BOSS".to_string()
        } else {
            format!("{}/{}", state.enemies_killed, state.enemies_per_level)
        };
        Self {
            score: state.score,
            health: state.health,
            level: state.level,
            enemies,
        }
    }
}

impl std::fmt::Display for Hud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Score: {} | Health: {} | Level: {} | Enemies: {}",
            self.score, self.health, self.level, self.enemies
        )
    }
}

/// Full-screen overlay text, top line first
pub fn overlay_lines(state: &GameState) -> Vec<String> {
    match state.phase() {
        GamePhase::NotStarted => vec!["GALAXY GAME".into(), "Press SPACE to start!".into()],
        GamePhase::GameOver => {
            let restart_level = state.checkpoint.map_or(1, |cp| cp.level);
            vec![
                "GALAXY GAME".into(),
                "GAME OVER".into(),
                format!("Final Score: {}", state.score),
                format!("Died on Level: {}", state.level),
                format!("Press SPACE to restart Level {restart_level}"),
                "Press R for complete reset to Level 1".into(),
            ]
        }
        GamePhase::Transition => match state.transition.map(|t| t.kind) {
            Some(TransitionKind::BossIncoming) => vec![
                format!("BOSS LEVEL {}", state.level),
                "Prepare for battle!".into(),
            ],
            _ => vec![
                format!("LEVEL {}", state.level),
                format!("Enemies: {}", state.enemies_per_level),
            ],
        },
        GamePhase::Running => Vec::new(),
    }
}

/// Label above the boss health bar, e.g. `"BASIC BOSS - 30/30"`
pub fn boss_label(state: &GameState) -> Option<String> {
    if !state.boss_active {
        return None;
    }
    state
        .boss()
        .map(|b| format!("{} BOSS - {}/{}", b.kind.label(), b.health, b.max_health))
}

/// Boss health as a fraction in [0, 1]
pub fn boss_health_fraction(state: &GameState) -> Option<f32> {
    state
        .boss()
        .filter(|b| b.max_health > 0)
        .map(|b| (b.health.max(0) as f32 / b.max_health as f32).min(1.0))
}

/// One row of the upgrade shop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    /// `"Rapid Fire [1/3]"`
    pub title: String,
    /// Next level description, or `"MAX LEVEL"`
    pub description: &'static str,
    /// `"500 pts"`, or `"MAXED"`
    pub price: String,
    pub maxed: bool,
    pub affordable: bool,
    pub selected: bool,
}

/// Rows for the upgrade shop in catalog order
pub fn menu_rows(state: &GameState) -> Vec<MenuRow> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let level = state.upgrades.get(spec.key);
            let cost = spec.next_cost(level);
            MenuRow {
                title: format!("{} [{}/{}]", spec.name, level, spec.max_level),
                description: spec.next_description(level).unwrap_or("MAX LEVEL"),
                price: cost.map_or_else(|| "MAXED".to_string(), |c| format!("{c} pts")),
                maxed: cost.is_none(),
                affordable: cost.is_some_and(|c| state.score >= c),
                selected: i == state.menu.selected,
            }
        })
        .collect()
}

/// Renders a one-line text summary through the `log` facade
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<Hud>,
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState) {
        let hud = Hud::from_state(state);
        if self.last.as_ref() == Some(&hud) {
            return;
        }
        log::debug!("{hud}");
        if let Some(label) = boss_label(state) {
            log::debug!("{label}");
        }
        self.last = Some(hud);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{UpgradeKey, game_over, spawn_boss, start_game};

    #[test]
    fn test_hud_enemy_progress() {
        let mut state = GameState::new(1);
        start_game(&mut state);
        state.enemies_killed = 2;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.enemies, "2/6");
        assert_eq!(hud.to_string(), "Score: 0 | Health: 3 | Level: 1 | Enemies: 2/6");

        state.is_boss_level = true;
        assert_eq!(Hud::from_state(&state).enemies, "BOSS");
    }

    #[test]
    fn test_overlays() {
        let mut state = GameState::new(1);
        assert_eq!(overlay_lines(&state)[1], "Press SPACE to start!");

        start_game(&mut state);
        assert!(overlay_lines(&state).is_empty());

        state.level = 4;
        game_over(&mut state);
        let lines = overlay_lines(&state);
        assert!(lines.contains(&"Died on Level: 4".to_string()));
        assert!(lines.contains(&"Press SPACE to restart Level 1".to_string()));
    }

    #[test]
    fn test_boss_label() {
        let mut state = GameState::new(1);
        start_game(&mut state);
        assert_eq!(boss_label(&state), None);
        state.level = 3;
        spawn_boss(&mut state);
        assert_eq!(boss_label(&state).as_deref(), Some("BASIC BOSS - 30/30"));
        state.bosses[0].health = 15;
        assert_eq!(boss_health_fraction(&state), Some(0.5));
    }

    #[test]
    fn test_menu_rows() {
        let mut state = GameState::new(1);
        state.score = 250;
        state.upgrades.set(UpgradeKey::Shield, 1);
        state.menu.selected = 2;
        let rows = menu_rows(&state);
        assert_eq!(rows.len(), CATALOG.len());

        assert_eq!(rows[0].title, "Rapid Fire [0/3]");
        assert_eq!(rows[0].price, "200 pts");
        assert!(rows[0].affordable);
        assert!(!rows[1].affordable);
        assert!(rows[2].selected);

        let shield = &rows[5];
        assert!(shield.maxed);
        assert_eq!(shield.description, "MAX LEVEL");
        assert_eq!(shield.price, "MAXED");
    }
}
