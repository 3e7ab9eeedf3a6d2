//! Nature definitions and stat modifiers.
//!
//! Natures are laid out on a 5x5 grid: `id = plus_stat * 5 + minus_stat`.
//! Diagonal entries (plus == minus) are the five neutral natures.

use phf::phf_map;
use serde::Serialize;

use crate::damage::Modifier;
use crate::to_id;

/// Pokemon nature (affects stat growth)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum NatureId {
    #[default]
    Bashful = 0,
    Lonely = 1,
    Adamant = 2,
    Naughty = 3,
    Brave = 4,
    Bold = 5,
    Docile = 6,
    Impish = 7,
    Lax = 8,
    Relaxed = 9,
    Modest = 10,
    Mild = 11,
    Hardy = 12,
    Rash = 13,
    Quiet = 14,
    Calm = 15,
    Gentle = 16,
    Careful = 17,
    Quirky = 18,
    Sassy = 19,
    Timid = 20,
    Hasty = 21,
    Jolly = 22,
    Naive = 23,
    Serious = 24,
}

/// Stat index for nature-affected stats (HP excluded)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BattleStat {
    Atk = 0,
    Def = 1,
    SpA = 2,
    SpD = 3,
    Spe = 4,
}

impl BattleStat {
    pub const ALL: [BattleStat; 5] = [
        BattleStat::Atk,
        BattleStat::Def,
        BattleStat::SpA,
        BattleStat::SpD,
        BattleStat::Spe,
    ];
}

static NATURE_NAMES: phf::Map<&'static str, NatureId> = phf_map! {
    "bashful" => NatureId::Bashful,
    "lonely" => NatureId::Lonely,
    "adamant" => NatureId::Adamant,
    "naughty" => NatureId::Naughty,
    "brave" => NatureId::Brave,
    "bold" => NatureId::Bold,
    "docile" => NatureId::Docile,
    "impish" => NatureId::Impish,
    "lax" => NatureId::Lax,
    "relaxed" => NatureId::Relaxed,
    "modest" => NatureId::Modest,
    "mild" => NatureId::Mild,
    "hardy" => NatureId::Hardy,
    "rash" => NatureId::Rash,
    "quiet" => NatureId::Quiet,
    "calm" => NatureId::Calm,
    "gentle" => NatureId::Gentle,
    "careful" => NatureId::Careful,
    "quirky" => NatureId::Quirky,
    "sassy" => NatureId::Sassy,
    "timid" => NatureId::Timid,
    "hasty" => NatureId::Hasty,
    "jolly" => NatureId::Jolly,
    "naive" => NatureId::Naive,
    "serious" => NatureId::Serious,
};

impl NatureId {
    pub const ALL: [NatureId; 25] = [
        NatureId::Bashful,
        NatureId::Lonely,
        NatureId::Adamant,
        NatureId::Naughty,
        NatureId::Brave,
        NatureId::Bold,
        NatureId::Docile,
        NatureId::Impish,
        NatureId::Lax,
        NatureId::Relaxed,
        NatureId::Modest,
        NatureId::Mild,
        NatureId::Hardy,
        NatureId::Rash,
        NatureId::Quiet,
        NatureId::Calm,
        NatureId::Gentle,
        NatureId::Careful,
        NatureId::Quirky,
        NatureId::Sassy,
        NatureId::Timid,
        NatureId::Hasty,
        NatureId::Jolly,
        NatureId::Naive,
        NatureId::Serious,
    ];

    /// Parse nature from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        NATURE_NAMES.get(to_id(s).as_str()).copied()
    }

    /// Get stat modifier for a given stat
    /// Returns: 9 (-10%), 10 (neutral), 11 (+10%)
    #[inline]
    pub const fn stat_modifier(self, stat: BattleStat) -> u8 {
        let id = self as u8;
        let plus = id / 5;
        let minus = id % 5;
        let stat_idx = stat as u8;

        if plus == minus {
            10
        } else if stat_idx == plus {
            11
        } else if stat_idx == minus {
            9
        } else {
            10
        }
    }

    /// The modifier as an exact fraction.
    pub const fn multiplier(self, stat: BattleStat) -> Modifier {
        match self.stat_modifier(stat) {
            11 => Modifier::ONE_POINT_ONE,
            9 => Modifier::NINE_TENTHS,
            _ => Modifier::ONE,
        }
    }

    /// Check if this is a neutral nature (no stat changes)
    #[inline]
    pub const fn is_neutral(self) -> bool {
        let id = self as u8;
        (id / 5) == (id % 5)
    }
}

/// Per-stat nature multipliers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NatureMultipliers {
    pub atk: f64,
    pub def: f64,
    pub spa: f64,
    pub spd: f64,
    pub spe: f64,
}

impl NatureMultipliers {
    pub const NEUTRAL: Self = Self {
        atk: 1.0,
        def: 1.0,
        spa: 1.0,
        spd: 1.0,
        spe: 1.0,
    };

    pub fn get(&self, stat: BattleStat) -> f64 {
        match stat {
            BattleStat::Atk => self.atk,
            BattleStat::Def => self.def,
            BattleStat::SpA => self.spa,
            BattleStat::SpD => self.spd,
            BattleStat::Spe => self.spe,
        }
    }
}

impl From<Option<NatureId>> for NatureMultipliers {
    fn from(nature: Option<NatureId>) -> Self {
        let Some(nature) = nature else {
            return Self::NEUTRAL;
        };
        let m = |stat| nature.multiplier(stat).value();
        Self {
            atk: m(BattleStat::Atk),
            def: m(BattleStat::Def),
            spa: m(BattleStat::SpA),
            spd: m(BattleStat::SpD),
            spe: m(BattleStat::Spe),
        }
    }
}

/// Multipliers for a nature name. Unknown names and `None` are neutral.
pub fn nature_multipliers(name: Option<&str>) -> NatureMultipliers {
    let nature = name.and_then(|n| {
        let parsed = NatureId::from_str(n);
        if parsed.is_none() {
            tracing::debug!(nature = n, "unknown nature, treating as neutral");
        }
        parsed
    });
    NatureMultipliers::from(nature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_modifiers() {
        assert_eq!(NatureId::Adamant.stat_modifier(BattleStat::Atk), 11);
        assert_eq!(NatureId::Adamant.stat_modifier(BattleStat::SpA), 9);
        assert_eq!(NatureId::Adamant.stat_modifier(BattleStat::Spe), 10);

        assert_eq!(NatureId::Timid.stat_modifier(BattleStat::Spe), 11);
        assert_eq!(NatureId::Timid.stat_modifier(BattleStat::Atk), 9);

        assert_eq!(NatureId::Hardy.stat_modifier(BattleStat::Atk), 10);
        assert!(NatureId::Serious.is_neutral());
    }

    #[test]
    fn test_grid_matches_names() {
        let jolly = nature_multipliers(Some("jolly"));
        assert_eq!(jolly.spe, 1.1);
        assert_eq!(jolly.spa, 0.9);

        let relaxed = nature_multipliers(Some("Relaxed"));
        assert_eq!(relaxed.def, 1.1);
        assert_eq!(relaxed.spe, 0.9);

        let sassy = nature_multipliers(Some("SASSY"));
        assert_eq!(sassy.spd, 1.1);
        assert_eq!(sassy.spe, 0.9);
    }

    #[test]
    fn test_every_non_neutral_nature_changes_two_stats() {
        for nature in NatureId::ALL {
            let m = NatureMultipliers::from(Some(nature));
            let values: Vec<f64> = BattleStat::ALL.iter().map(|&s| m.get(s)).collect();
            let ups = values.iter().filter(|&&v| v == 1.1).count();
            let downs = values.iter().filter(|&&v| v == 0.9).count();
            if nature.is_neutral() {
                assert_eq!((ups, downs), (0, 0), "{nature:?}");
            } else {
                assert_eq!((ups, downs), (1, 1), "{nature:?}");
            }
        }
    }

    #[test]
    fn test_unknown_and_missing_are_neutral() {
        assert_eq!(nature_multipliers(None), NatureMultipliers::NEUTRAL);
        assert_eq!(nature_multipliers(Some("Grumpy")), NatureMultipliers::NEUTRAL);
        assert_eq!(nature_multipliers(Some("docile")), NatureMultipliers::NEUTRAL);
    }
}
