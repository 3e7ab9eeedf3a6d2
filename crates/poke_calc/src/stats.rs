//! Stat calculator.
//!
//! Turns base stats, EVs, IVs, level and nature into final battle stats.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::natures::{BattleStat, NatureId};

/// Default IVs (perfect)
pub const DEFAULT_IV: u16 = 31;

/// Default EVs (none)
pub const DEFAULT_EV: u16 = 0;

/// Default level for competitive sets
pub const DEFAULT_LEVEL: u8 = 50;

/// One of the six stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKey {
    Hp,
    Atk,
    Def,
    SpA,
    SpD,
    Spe,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Atk,
        StatKey::Def,
        StatKey::SpA,
        StatKey::SpD,
        StatKey::Spe,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Atk => "atk",
            StatKey::Def => "def",
            StatKey::SpA => "spa",
            StatKey::SpD => "spd",
            StatKey::Spe => "spe",
        }
    }

    /// Parse a stat key. Accepts the short keys and common long spellings.
    pub fn from_str(s: &str) -> Option<Self> {
        match crate::to_id(s).as_str() {
            "hp" => Some(StatKey::Hp),
            "atk" | "attack" => Some(StatKey::Atk),
            "def" | "defense" => Some(StatKey::Def),
            "spa" | "specialattack" | "spatk" => Some(StatKey::SpA),
            "spd" | "specialdefense" | "spdef" => Some(StatKey::SpD),
            "spe" | "speed" => Some(StatKey::Spe),
            _ => None,
        }
    }

    /// The nature-affected stat, `None` for HP.
    pub const fn battle_stat(self) -> Option<BattleStat> {
        match self {
            StatKey::Hp => None,
            StatKey::Atk => Some(BattleStat::Atk),
            StatKey::Def => Some(BattleStat::Def),
            StatKey::SpA => Some(BattleStat::SpA),
            StatKey::SpD => Some(BattleStat::SpD),
            StatKey::Spe => Some(BattleStat::Spe),
        }
    }
}

/// Six per-stat values, used for base stats, EVs, IVs and final stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatBlock {
    pub const fn splat(value: u16) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    /// Build from an `[hp, atk, def, spa, spd, spe]` array.
    pub const fn from_array(v: [u16; 6]) -> Self {
        Self {
            hp: v[0],
            atk: v[1],
            def: v[2],
            spa: v[3],
            spd: v[4],
            spe: v[5],
        }
    }

    pub const fn get(&self, key: StatKey) -> u16 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Atk => self.atk,
            StatKey::Def => self.def,
            StatKey::SpA => self.spa,
            StatKey::SpD => self.spd,
            StatKey::Spe => self.spe,
        }
    }

    pub fn set(&mut self, key: StatKey, value: u16) {
        match key {
            StatKey::Hp => self.hp = value,
            StatKey::Atk => self.atk = value,
            StatKey::Def => self.def = value,
            StatKey::SpA => self.spa = value,
            StatKey::SpD => self.spd = value,
            StatKey::Spe => self.spe = value,
        }
    }

    /// Fill from a string-keyed map, using `default` for missing keys.
    /// Unrecognised keys are ignored.
    fn from_map_or<K: AsRef<str>>(map: &HashMap<K, u16>, default: u16) -> Self {
        let mut block = Self::splat(default);
        for (key, &value) in map {
            if let Some(stat) = StatKey::from_str(key.as_ref()) {
                block.set(stat, value);
            }
        }
        block
    }
}

/// Species base stats.
pub type BaseStats = StatBlock;

/// EV or IV spread.
pub type StatSpread = StatBlock;

/// Final battle stats.
pub type FinalStats = StatBlock;

impl StatBlock {
    /// Base stats from a string-keyed map. Every one of the six keys is required.
    pub fn base_from_map<K: AsRef<str>>(map: &HashMap<K, u16>) -> Result<BaseStats, CalcError> {
        let mut seen = [false; 6];
        let mut block = StatBlock::default();
        for (key, &value) in map {
            if let Some(stat) = StatKey::from_str(key.as_ref()) {
                block.set(stat, value);
                seen[stat as usize] = true;
            }
        }
        if let Some(missing) = StatKey::ALL.iter().find(|&&s| !seen[s as usize]) {
            return Err(CalcError::invalid(format!(
                "base stats missing key '{}'",
                missing.key()
            )));
        }
        Ok(block)
    }

    /// EVs from a map; missing keys are 0.
    pub fn evs_from_map<K: AsRef<str>>(map: &HashMap<K, u16>) -> StatSpread {
        Self::from_map_or(map, DEFAULT_EV)
    }

    /// IVs from a map; missing keys are 31.
    pub fn ivs_from_map<K: AsRef<str>>(map: &HashMap<K, u16>) -> StatSpread {
        Self::from_map_or(map, DEFAULT_IV)
    }
}

/// Everything the stat formula needs, passed by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsInput {
    pub base: BaseStats,
    pub evs: StatSpread,
    pub ivs: StatSpread,
    pub level: u8,
    pub nature: Option<NatureId>,
}

impl StatsInput {
    /// Input with no EVs, perfect IVs, the default level and no nature.
    pub const fn new(base: BaseStats) -> Self {
        Self {
            base,
            evs: StatBlock::splat(DEFAULT_EV),
            ivs: StatBlock::splat(DEFAULT_IV),
            level: DEFAULT_LEVEL,
            nature: None,
        }
    }
}

/// Compute the six final stats.
///
/// HP: `floor((2 * Base + IV + floor(EV/4)) * Level / 100) + Level + 10`
/// Other stats: `floor((floor((2 * Base + IV + floor(EV/4)) * Level / 100) + 5) * Nature)`
pub fn compute_stats(input: StatsInput) -> Result<FinalStats, CalcError> {
    if input.level < 1 {
        return Err(CalcError::invalid("level must be at least 1"));
    }

    let mut stats = FinalStats::default();
    for key in StatKey::ALL {
        let value = match key.battle_stat() {
            None => calculate_hp(&input),
            Some(stat) => calculate_stat(&input, key, stat),
        };
        stats.set(key, value);
    }
    Ok(stats)
}

fn scaled_base(input: &StatsInput, key: StatKey) -> u32 {
    let base = input.base.get(key) as u32;
    let iv = input.ivs.get(key) as u32;
    let ev = input.evs.get(key) as u32;
    (2 * base + iv + ev / 4) * input.level as u32 / 100
}

fn calculate_hp(input: &StatsInput) -> u16 {
    let hp = scaled_base(input, StatKey::Hp) + input.level as u32 + 10;
    hp.min(u16::MAX as u32) as u16
}

fn calculate_stat(input: &StatsInput, key: StatKey, stat: BattleStat) -> u16 {
    let raw = scaled_base(input, key) + 5;

    // 9 = -10%, 10 = neutral, 11 = +10%
    let modifier = input
        .nature
        .map(|n| n.stat_modifier(stat) as u32)
        .unwrap_or(10);
    let value = raw * modifier / 10;
    value.min(u16::MAX as u32) as u16
}
