//! Error types
//!
//! Nothing in the simulation is fatal. These describe requests the game
//! rejected (so callers can log them) and configuration that failed to load.

use std::fmt;

use crate::sim::UpgradeKey;

/// Why an upgrade purchase was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// No catalog entry at this index
    UnknownIndex { index: usize },
    /// Upgrade already at its maximum level
    MaxLevel { key: UpgradeKey, max_level: u8 },
    /// Not enough score for the next level
    InsufficientScore { key: UpgradeKey, cost: u64, score: u64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIndex { index } => write!(f, "no upgrade at index {index}"),
            Self::MaxLevel { key, max_level } => {
                write!(f, "{} already at max level {max_level}", key.as_str())
            }
            Self::InsufficientScore { key, cost, score } => write!(
                f,
                "{} costs {cost} but score is {score}",
                key.as_str()
            ),
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed fine but a value is unusable
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
