use serde::{Deserialize, Serialize};

use poke_calc::batch::{DamageTable, SpeedTier};
use poke_calc::field::{BattleFormat, FieldContext, Screens, Terrain, Weather};
use poke_calc::multihit::HitSelector;
use poke_calc::speed::SpeedConditions;
use poke_calc::stats::FinalStats;
use poke_calc::{DamageOptions, SetDescription};

// ============================================================================
// Inputs
// ============================================================================

/// A set plus its in-battle state.
#[derive(Deserialize, Debug, Clone)]
pub struct SideQuery {
    #[serde(flatten)]
    pub set: SetDescription,
    #[serde(default)]
    pub terastallized: bool,
    #[serde(default)]
    pub burned: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FieldQuery {
    pub weather: Weather,
    pub terrain: Terrain,
    pub reflect: bool,
    pub light_screen: bool,
    pub aurora_veil: bool,
    /// Falls back to the settings' format.
    pub format: Option<BattleFormat>,
}

impl FieldQuery {
    pub fn to_field(&self, default_format: BattleFormat) -> FieldContext {
        let mut screens = Screens::empty();
        screens.set(Screens::REFLECT, self.reflect);
        screens.set(Screens::LIGHT_SCREEN, self.light_screen);
        screens.set(Screens::AURORA_VEIL, self.aurora_veil);
        FieldContext {
            weather: self.weather,
            terrain: self.terrain,
            screens,
            format: self.format.unwrap_or(default_format),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DamageQuery {
    pub attacker: SideQuery,
    pub defenders: Vec<SideQuery>,
    /// Moves to run; the attacker's own moves when empty.
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub field: FieldQuery,
    #[serde(default)]
    pub is_crit: bool,
    #[serde(default)]
    pub stab_override: Option<bool>,
    #[serde(default)]
    pub spread: Option<bool>,
    /// Falls back to the settings' hit selector.
    #[serde(default)]
    pub hits: Option<HitSelector>,
}

impl DamageQuery {
    pub fn options(&self, default_hits: HitSelector) -> DamageOptions {
        DamageOptions {
            is_crit: self.is_crit,
            stab_override: self.stab_override,
            spread: self.spread,
            hits: self.hits.unwrap_or(default_hits),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpeedQuery {
    pub entries: Vec<SetDescription>,
    #[serde(default)]
    pub conditions: SpeedConditions,
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
}

// ============================================================================
// Outputs
// ============================================================================

#[derive(Serialize, Debug)]
pub struct StatsReport {
    pub species: String,
    pub level: u8,
    pub nature: Option<String>,
    pub stats: FinalStats,
}

#[derive(Serialize, Debug)]
pub struct MoveReport {
    #[serde(rename = "move")]
    pub move_name: String,
    #[serde(flatten)]
    pub table: DamageTable,
}

#[derive(Serialize, Debug)]
pub struct DamageReport {
    pub attacker: String,
    pub results: Vec<MoveReport>,
}

#[derive(Serialize, Debug)]
pub struct SpeedReport {
    pub tiers: Vec<SpeedTier>,
}
