//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, tick-counted timers
//! - Wall-clock time only as an explicit `now_ms` argument
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod combat;
pub mod events;
pub mod motion;
pub mod player;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use ai::{BossKind, BossPhase};
pub use collision::{Bounds, Rect, check_collision};
pub use events::{GameEvent, SoundCue};
pub use progression::{game_over, next_level, reset_game, start_game};
pub use spawn::spawn_boss;
pub use state::{
    Asteroid, Boss, Bullet, Checkpoint, Enemy, GamePhase, GameState, MovePattern, Particle,
    Player, Star, Transition, TransitionKind,
};
pub use tick::{TickInput, tick};
pub use upgrades::{CATALOG, UpgradeKey, UpgradeLevels, UpgradeSpec, purchase};
