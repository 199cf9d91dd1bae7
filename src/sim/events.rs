//! Events emitted by the simulation for outside collaborators
//!
//! The simulation never talks to audio or UI directly. It queues events on
//! the game state; the host drains them after each tick.

use serde::{Deserialize, Serialize};

use super::ai::BossKind;
use super::upgrades::UpgradeKey;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundCue {
    /// Player fires (also reused for purchases and shield activation)
    Shoot,
    /// Something was destroyed
    Explosion,
    /// Player took damage
    Damage,
    /// Run ended
    GameOver,
    /// Enemy or boss fires
    EnemyShoot,
    /// A boss entered the arena
    BossArrival,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Explosion => "explosion",
            SoundCue::Damage => "damage",
            SoundCue::GameOver => "gameOver",
            SoundCue::EnemyShoot => "enemyShoot",
            SoundCue::BossArrival => "bossArrival",
        }
    }
}

/// Something the host may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play a sound
    Sound(SoundCue),
    /// Score, health, level or enemy progress changed
    HudChanged,
    /// A run (fresh or restarted) began at the given level
    RunStarted { level: u32, restart: bool },
    /// A new level began
    LevelStarted { level: u32 },
    /// A level transition countdown started
    TransitionStarted { boss: bool, ticks: u32 },
    BossSpawned { kind: BossKind, health: i32 },
    BossDefeated { kind: BossKind, score: u64 },
    UpgradePurchased { key: UpgradeKey, level: u8 },
    ShieldActivated,
    /// Player health reached zero
    GameOver { score: u64, level: u32 },
    /// Full reset back to level 1
    Reset,
}
