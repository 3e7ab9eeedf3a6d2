//! poke_calc - Pokemon battle calculation engine
//!
//! Stats, type matchups, speed and damage for a single interaction. All
//! multipliers are exact fractions; values are floored once, at the end.
//! Species and move data come from a caller-provided [`dex::Dex`].

/// Error types
pub mod error;

/// Type definitions and type chart
pub mod types;

/// Nature definitions and stat modifiers
pub mod natures;

/// Stat formulas
pub mod stats;

/// Held items with calculation effects
pub mod items;

/// Move data and flags
pub mod moves;

/// Speed-affecting abilities
pub mod abilities;

/// Weather, terrain, screens and format
pub mod field;

/// Resolved sets and their attacker/defender views
pub mod combatant;

/// Effective speed
pub mod speed;

/// Damage calculation
pub mod damage;

/// Multi-hit resolution
pub mod multihit;

/// Data access and set resolution
pub mod dex;

/// Many-versus-many queries
pub mod batch;

/// Settings file
pub mod config;

// Re-export commonly used types
pub use combatant::{Attacker, Combatant, Defender};
pub use damage::{calculate_damage, DamageOptions, DamageResult, KoLabel, KoVerdict, Modifier};
pub use dex::{resolve_set, Dex, MemoryDex, SetDescription};
pub use error::{CalcError, ConfigError};
pub use field::{BattleFormat, FieldContext, Screens, Terrain, Weather};
pub use items::Item;
pub use moves::{MoveCategory, MoveData, MoveFlags};
pub use multihit::{resolve_hits, HitCount, HitSelector};
pub use natures::{BattleStat, NatureId};
pub use speed::{effective_speed, SpeedConditions, SpeedHolder};
pub use stats::{compute_stats, StatBlock, StatKey, StatsInput};
pub use types::{Type, TypeEffectiveness, TypeSet};

/// Normalise a display name to a lookup id: ASCII alphanumerics, lowercased.
///
/// `"Choice Band"`, `"choice-band"` and `"CHOICEBAND"` all become `"choiceband"`.
pub fn to_id(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
