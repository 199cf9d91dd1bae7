//! Upgrade catalog and purchase rules
//!
//! The catalog is static. Only `Health` and `Speed` mutate stored player
//! stats on purchase; every other upgrade is read as a modifier where it
//! applies (shooting, scoring, shield, repair).

use serde::{Deserialize, Serialize};

use super::events::{GameEvent, SoundCue};
use super::state::GameState;
use crate::consts::*;
use crate::error::PurchaseError;

/// Purchasable upgrade kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKey {
    RapidFire,
    MultiShot,
    Damage,
    Health,
    Speed,
    Shield,
    AutoHeal,
    ScoreMultiplier,
}

impl UpgradeKey {
    pub const COUNT: usize = 8;

    pub const ALL: [UpgradeKey; Self::COUNT] = [
        UpgradeKey::RapidFire,
        UpgradeKey::MultiShot,
        UpgradeKey::Damage,
        UpgradeKey::Health,
        UpgradeKey::Speed,
        UpgradeKey::Shield,
        UpgradeKey::AutoHeal,
        UpgradeKey::ScoreMultiplier,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKey::RapidFire => "rapidFire",
            UpgradeKey::MultiShot => "multiShot",
            UpgradeKey::Damage => "damage",
            UpgradeKey::Health => "health",
            UpgradeKey::Speed => "speed",
            UpgradeKey::Shield => "shield",
            UpgradeKey::AutoHeal => "autoHeal",
            UpgradeKey::ScoreMultiplier => "scoreMultiplier",
        }
    }

    /// Catalog entry for this key
    pub fn spec(self) -> &'static UpgradeSpec {
        &CATALOG[self.index()]
    }
}

/// One catalog entry
#[derive(Debug)]
pub struct UpgradeSpec {
    pub name: &'static str,
    pub key: UpgradeKey,
    pub max_level: u8,
    /// `costs[i]` buys level `i + 1`
    pub costs: &'static [u64],
    /// `descriptions[i]` describes level `i + 1`
    pub descriptions: &'static [&'static str],
}

impl UpgradeSpec {
    /// Cost of the next level, or `None` when maxed
    pub fn next_cost(&self, current: u8) -> Option<u64> {
        if current >= self.max_level {
            return None;
        }
        self.costs.get(current as usize).copied()
    }

    pub fn next_description(&self, current: u8) -> Option<&'static str> {
        if current >= self.max_level {
            return None;
        }
        self.descriptions.get(current as usize).copied()
    }
}

/// Static upgrade catalog (menu order)
pub static CATALOG: [UpgradeSpec; UpgradeKey::COUNT] = [
    UpgradeSpec {
        name: "Rapid Fire",
        key: UpgradeKey::RapidFire,
        max_level: 3,
        costs: &[200, 500, 1000],
        descriptions: &[
            "Faster shooting (25% faster)",
            "Much faster shooting (50% faster)",
            "Ultra rapid fire (75% faster)",
        ],
    },
    UpgradeSpec {
        name: "Multi Shot",
        key: UpgradeKey::MultiShot,
        max_level: 2,
        costs: &[300, 800],
        descriptions: &["Shoot 3 bullets at once", "Shoot 5 bullets at once"],
    },
    UpgradeSpec {
        name: "Increased Damage",
        key: UpgradeKey::Damage,
        max_level: 3,
        costs: &[250, 600, 1200],
        descriptions: &[
            "Bullets do 2x damage",
            "Bullets do 3x damage",
            "Bullets do 4x damage",
        ],
    },
    UpgradeSpec {
        name: "Extra Health",
        key: UpgradeKey::Health,
        max_level: 2,
        costs: &[400, 1000],
        descriptions: &["Increase max health to 4", "Increase max health to 5"],
    },
    UpgradeSpec {
        name: "Speed Boost",
        key: UpgradeKey::Speed,
        max_level: 3,
        costs: &[150, 400, 800],
        descriptions: &["Move 25% faster", "Move 50% faster", "Move 75% faster"],
    },
    UpgradeSpec {
        name: "Shield Generator",
        key: UpgradeKey::Shield,
        max_level: 1,
        costs: &[800],
        descriptions: &["Press S for 3-second invincibility (30s cooldown)"],
    },
    UpgradeSpec {
        name: "Auto Repair",
        key: UpgradeKey::AutoHeal,
        max_level: 1,
        costs: &[600],
        descriptions: &["Slowly regenerate health over time"],
    },
    UpgradeSpec {
        name: "Score Multiplier",
        key: UpgradeKey::ScoreMultiplier,
        max_level: 2,
        costs: &[500, 1500],
        descriptions: &["Earn 50% more points", "Earn 100% more points"],
    },
];

/// Current level of every upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    levels: [u8; UpgradeKey::COUNT],
}

impl UpgradeLevels {
    #[inline]
    pub fn get(&self, key: UpgradeKey) -> u8 {
        self.levels[key.index()]
    }

    /// Set a level, clamped to the catalog maximum
    pub fn set(&mut self, key: UpgradeKey, level: u8) {
        self.levels[key.index()] = level.min(key.spec().max_level);
    }

    pub fn is_maxed(&self, key: UpgradeKey) -> bool {
        self.get(key) >= key.spec().max_level
    }

    pub fn iter(&self) -> impl Iterator<Item = (UpgradeKey, u8)> + '_ {
        UpgradeKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    /// Player shoot cooldown in milliseconds
    pub fn shoot_cooldown_ms(&self) -> f64 {
        SHOOT_COOLDOWN_MS * (1.0 - self.get(UpgradeKey::RapidFire) as f64 * RAPID_FIRE_REDUCTION)
    }

    /// Bullets fired per shot
    pub fn bullet_count(&self) -> usize {
        match self.get(UpgradeKey::MultiShot) {
            0 => 1,
            1 => 3,
            _ => 5,
        }
    }

    pub fn bullet_damage(&self) -> i32 {
        1 + self.get(UpgradeKey::Damage) as i32
    }

    pub fn max_health(&self) -> u32 {
        BASE_MAX_HEALTH + self.get(UpgradeKey::Health) as u32
    }

    pub fn player_speed(&self) -> f32 {
        PLAYER_BASE_SPEED + self.get(UpgradeKey::Speed) as f32 * PLAYER_SPEED_PER_UPGRADE
    }

    pub fn score_multiplier(&self) -> f64 {
        1.0 + self.get(UpgradeKey::ScoreMultiplier) as f64 * 0.5
    }

    /// Apply the score multiplier to a base award
    pub fn scaled_score(&self, base: u32) -> u64 {
        (base as f64 * self.score_multiplier()).floor() as u64
    }
}

/// Buy the next level of the catalog entry at `index`
///
/// On rejection the state is left untouched.
pub fn purchase(state: &mut GameState, index: usize) -> Result<u8, PurchaseError> {
    let spec = CATALOG.get(index).ok_or(PurchaseError::UnknownIndex { index })?;
    let current = state.upgrades.get(spec.key);
    let cost = spec.next_cost(current).ok_or(PurchaseError::MaxLevel {
        key: spec.key,
        max_level: spec.max_level,
    })?;
    if state.score < cost {
        return Err(PurchaseError::InsufficientScore {
            key: spec.key,
            cost,
            score: state.score,
        });
    }

    state.score -= cost;
    let level = current + 1;
    state.upgrades.set(spec.key, level);
    apply_upgrade_effects(state, spec.key);

    log::debug!("Purchased {} level {} for {}", spec.name, level, cost);
    state.emit(GameEvent::UpgradePurchased { key: spec.key, level });
    state.play(SoundCue::Shoot);
    state.mark_hud_dirty();
    Ok(level)
}

/// Apply stat changes for upgrades that mutate stored player stats
pub fn apply_upgrade_effects(state: &mut GameState, key: UpgradeKey) {
    match key {
        UpgradeKey::Health => {
            state.max_health = state.upgrades.max_health();
            state.health = (state.health + 1).min(state.max_health);
        }
        UpgradeKey::Speed => {
            state.player.speed = state.upgrades.player_speed();
        }
        _ => {}
    }
}
