//! Multi-hit resolution.
//!
//! Decides how many times a move strikes, the expected count, and the weight
//! of each count for KO probability.

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::items::Item;
use crate::to_id;

/// Hit pattern of a known multi-hit move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HitPattern {
    Fixed(u8),
    TwoToFive,
    TwoToTen,
}

static MULTI_HIT_MOVES: phf::Map<&'static str, HitPattern> = phf_map! {
    "doublehit" => HitPattern::Fixed(2),
    "doublekick" => HitPattern::Fixed(2),
    "dualchop" => HitPattern::Fixed(2),
    "bonemerang" => HitPattern::Fixed(2),
    "twineedle" => HitPattern::Fixed(2),
    "dragondarts" => HitPattern::Fixed(2),
    "dualwingbeat" => HitPattern::Fixed(2),
    "geargrind" => HitPattern::Fixed(2),
    "doubleironbash" => HitPattern::Fixed(2),
    "twinbeam" => HitPattern::Fixed(2),
    "tachyoncutter" => HitPattern::Fixed(2),
    "surgingstrikes" => HitPattern::Fixed(3),
    "triplekick" => HitPattern::Fixed(3),
    "tripleaxel" => HitPattern::Fixed(3),
    "tripledive" => HitPattern::Fixed(3),
    "bulletseed" => HitPattern::TwoToFive,
    "iciclespear" => HitPattern::TwoToFive,
    "rockblast" => HitPattern::TwoToFive,
    "armthrust" => HitPattern::TwoToFive,
    "furyswipes" => HitPattern::TwoToFive,
    "pinmissile" => HitPattern::TwoToFive,
    "scaleshot" => HitPattern::TwoToFive,
    "watershuriken" => HitPattern::TwoToFive,
    "tailslap" => HitPattern::TwoToFive,
    "bonerush" => HitPattern::TwoToFive,
    "doubleslap" => HitPattern::TwoToFive,
    "cometpunch" => HitPattern::TwoToFive,
    "spikecannon" => HitPattern::TwoToFive,
    "barrage" => HitPattern::TwoToFive,
    "furyattack" => HitPattern::TwoToFive,
    "populationbomb" => HitPattern::TwoToTen,
};

/// Caller's choice of hit count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HitSelector {
    /// Use the move's own pattern.
    #[default]
    Auto,
    /// Exactly this many hits.
    Fixed(u8),
    /// 2 to 5 hits.
    TwoToFive,
    /// 4 to 5 hits.
    FourToFive,
}

impl HitSelector {
    pub fn parse(s: &str) -> Result<Self, CalcError> {
        let trimmed = s.trim();
        let normalized = trimmed.replace(['–', '—'], "-");
        match normalized.to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(HitSelector::Auto),
            "2-5" => Ok(HitSelector::TwoToFive),
            "4-5" => Ok(HitSelector::FourToFive),
            other => match other.parse::<u8>() {
                Ok(n) if (1..=MAX_HITS).contains(&n) => Ok(HitSelector::Fixed(n)),
                _ => Err(CalcError::invalid(format!("unrecognised hit selector '{trimmed}'"))),
            },
        }
    }
}

impl fmt::Display for HitSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitSelector::Auto => f.write_str("Auto"),
            HitSelector::Fixed(n) => write!(f, "{n}"),
            HitSelector::TwoToFive => f.write_str("2-5"),
            HitSelector::FourToFive => f.write_str("4-5"),
        }
    }
}

impl TryFrom<String> for HitSelector {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HitSelector::parse(&value)
    }
}

impl From<HitSelector> for String {
    fn from(value: HitSelector) -> Self {
        value.to_string()
    }
}

/// Where a hit count came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HitMode {
    /// The caller asked for an exact count.
    Fixed,
    /// The caller asked for a range.
    Range,
    /// Taken from the move's own pattern.
    Auto,
}

/// Resolved hit count.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HitCount {
    pub min_hits: u8,
    pub max_hits: u8,
    pub expected_hits: f64,
    pub mode: HitMode,
    /// Probability of each hit count; sums to 1.
    pub weights: Vec<(u8, f64)>,
}

impl HitCount {
    /// One hit, for ordinary moves.
    pub fn single() -> Self {
        Self::fixed(1, HitMode::Auto)
    }

    fn fixed(n: u8, mode: HitMode) -> Self {
        Self {
            min_hits: n,
            max_hits: n,
            expected_hits: n as f64,
            mode,
            weights: vec![(n, 1.0)],
        }
    }

    fn four_to_five(mode: HitMode) -> Self {
        Self {
            min_hits: 4,
            max_hits: 5,
            expected_hits: 4.5,
            mode,
            weights: vec![(4, 0.5), (5, 0.5)],
        }
    }

    fn two_to_five(mode: HitMode, weights: [f64; 4]) -> Self {
        Self {
            min_hits: 2,
            max_hits: 5,
            expected_hits: 3.0,
            mode,
            weights: (2..=5).zip(weights).collect(),
        }
    }

    fn two_to_ten() -> Self {
        Self {
            min_hits: 2,
            max_hits: 10,
            expected_hits: 6.0,
            mode: HitMode::Auto,
            weights: (2..=10).map(|n| (n, 1.0 / 9.0)).collect(),
        }
    }
}

/// Weights used when the caller explicitly asks for 2-5 hits.
const EXPLICIT_TWO_TO_FIVE: [f64; 4] = [0.375, 0.375, 0.125, 0.125];

/// Weights used for a 2-5 hit move left on auto.
const AUTO_TWO_TO_FIVE: [f64; 4] = [0.35, 0.35, 0.15, 0.15];

/// Most hits any move or selector can produce.
pub const MAX_HITS: u8 = 10;

/// Resolve how many times `move_name` hits.
///
/// An explicit selector overrides the move's pattern. Loaded Dice turns any
/// 2-5 result into 4-5. A fixed count outside `1..=MAX_HITS` is rejected.
pub fn resolve_hits(move_name: &str, selector: HitSelector, item: Option<Item>) -> Result<HitCount, CalcError> {
    let loaded_dice = item == Some(Item::LoadedDice);

    let hits = match selector {
        HitSelector::Fixed(n) if !(1..=MAX_HITS).contains(&n) => {
            return Err(CalcError::invalid(format!("hit count {n} is outside 1..={MAX_HITS}")));
        }
        HitSelector::Fixed(n) => HitCount::fixed(n, HitMode::Fixed),
        HitSelector::FourToFive => HitCount::four_to_five(HitMode::Range),
        HitSelector::TwoToFive if loaded_dice => HitCount::four_to_five(HitMode::Range),
        HitSelector::TwoToFive => HitCount::two_to_five(HitMode::Range, EXPLICIT_TWO_TO_FIVE),
        HitSelector::Auto => match MULTI_HIT_MOVES.get(to_id(move_name).as_str()) {
            Some(&HitPattern::Fixed(n)) => HitCount::fixed(n, HitMode::Auto),
            Some(HitPattern::TwoToFive) if loaded_dice => HitCount::four_to_five(HitMode::Auto),
            Some(HitPattern::TwoToFive) => HitCount::two_to_five(HitMode::Auto, AUTO_TWO_TO_FIVE),
            Some(HitPattern::TwoToTen) => HitCount::two_to_ten(),
            None => HitCount::single(),
        },
    };
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(hits: &HitCount) -> f64 {
        hits.weights.iter().map(|(_, w)| w).sum()
    }

    #[test]
    fn test_table_lookup() {
        let hits = resolve_hits("Surging Strikes", HitSelector::Auto, None).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (3, 3));
        assert_eq!(hits.expected_hits, 3.0);
        assert_eq!(hits.mode, HitMode::Auto);

        let hits = resolve_hits("dragon-darts", HitSelector::Auto, None).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (2, 2));

        let hits = resolve_hits("Bullet Seed", HitSelector::Auto, None).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (2, 5));
        assert_eq!(hits.expected_hits, 3.0);
        assert_eq!(hits.weights, vec![(2, 0.35), (3, 0.35), (4, 0.15), (5, 0.15)]);
    }

    #[test]
    fn test_unknown_move_hits_once() {
        let hits = resolve_hits("Flamethrower", HitSelector::Auto, None).unwrap();
        assert_eq!(hits, HitCount::single());
    }

    #[test]
    fn test_population_bomb() {
        let hits = resolve_hits("Population Bomb", HitSelector::Auto, None).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (2, 10));
        assert_eq!(hits.expected_hits, 6.0);
        assert_eq!(hits.weights.len(), 9);
        assert!((weight_sum(&hits) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_loaded_dice() {
        let hits = resolve_hits("Rock Blast", HitSelector::Auto, Some(Item::LoadedDice)).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (4, 5));
        assert_eq!(hits.expected_hits, 4.5);

        let hits = resolve_hits("Rock Blast", HitSelector::TwoToFive, Some(Item::LoadedDice)).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (4, 5));
        assert_eq!(hits.mode, HitMode::Range);

        // Fixed-count moves are untouched
        let hits = resolve_hits("Triple Axel", HitSelector::Auto, Some(Item::LoadedDice)).unwrap();
        assert_eq!((hits.min_hits, hits.max_hits), (3, 3));
    }

    #[test]
    fn test_explicit_selectors_override() {
        let hits = resolve_hits("Bullet Seed", HitSelector::Fixed(5), None).unwrap();
        assert_eq!(hits.weights, vec![(5, 1.0)]);
        assert_eq!(hits.mode, HitMode::Fixed);

        let hits = resolve_hits("Tackle", HitSelector::TwoToFive, None).unwrap();
        assert_eq!(hits.weights, vec![(2, 0.375), (3, 0.375), (4, 0.125), (5, 0.125)]);
        assert_eq!(weight_sum(&hits), 1.0);

        let hits = resolve_hits("Tackle", HitSelector::FourToFive, None).unwrap();
        assert_eq!(hits.weights, vec![(4, 0.5), (5, 0.5)]);
    }

    #[test]
    fn test_two_to_five_family() {
        for name in [
            "Bullet Seed",
            "Icicle Spear",
            "Rock Blast",
            "Arm Thrust",
            "Fury Swipes",
            "Pin Missile",
            "Scale Shot",
            "Water Shuriken",
            "Tail Slap",
            "Bone Rush",
        ] {
            let hits = resolve_hits(name, HitSelector::Auto, None).unwrap();
            assert_eq!((hits.min_hits, hits.max_hits), (2, 5), "{name}");
            assert_eq!(hits.mode, HitMode::Auto, "{name}");

            let dice = resolve_hits(name, HitSelector::Auto, Some(Item::LoadedDice)).unwrap();
            assert_eq!((dice.min_hits, dice.max_hits), (4, 5), "{name}");
            assert_eq!(dice.weights, vec![(4, 0.5), (5, 0.5)], "{name}");
        }
    }

    #[test]
    fn test_fixed_families() {
        for name in ["Double Hit", "Double Kick", "Dual Chop", "Bonemerang", "Twineedle", "Dragon Darts", "Dual Wingbeat"] {
            let hits = resolve_hits(name, HitSelector::Auto, None).unwrap();
            assert_eq!(hits.weights, vec![(2, 1.0)], "{name}");
        }
        for name in ["Surging Strikes", "Triple Kick", "Triple Axel", "Triple Dive"] {
            let hits = resolve_hits(name, HitSelector::Auto, Some(Item::LoadedDice)).unwrap();
            assert_eq!(hits.weights, vec![(3, 1.0)], "{name}");
        }
    }

    #[test]
    fn test_fixed_count_out_of_range() {
        assert!(resolve_hits("Tackle", HitSelector::Fixed(0), None).is_err());
        assert!(resolve_hits("Tackle", HitSelector::Fixed(11), None).is_err());
        assert!(resolve_hits("Tackle", HitSelector::Fixed(255), None).is_err());
        let ten = resolve_hits("Tackle", HitSelector::Fixed(10), None).unwrap();
        assert_eq!((ten.min_hits, ten.max_hits), (10, 10));
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(HitSelector::parse("Auto").unwrap(), HitSelector::Auto);
        assert_eq!(HitSelector::parse("2–5").unwrap(), HitSelector::TwoToFive);
        assert_eq!(HitSelector::parse(" 4-5 ").unwrap(), HitSelector::FourToFive);
        assert_eq!(HitSelector::parse("10").unwrap(), HitSelector::Fixed(10));
        assert!(HitSelector::parse("0").is_err());
        assert!(HitSelector::parse("lots").is_err());
    }
}
