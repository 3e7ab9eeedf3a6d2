//! Effective speed calculation.
//!
//! Every factor is an exact fraction; the product is floored once.

use serde::{Deserialize, Serialize};

use crate::abilities::SpeedAbility;
use crate::combatant::Combatant;
use crate::damage::Modifier;
use crate::error::CalcError;
use crate::items::Item;

/// Boost multiplier table.
///
/// Index 0 = -6, Index 6 = 0, Index 12 = +6
/// Each entry is (numerator, denominator).
const BOOST_TABLE: [(u64, u64); 13] = [
    (2, 8), // -6: 0.25x
    (2, 7),
    (2, 6),
    (2, 5),
    (2, 4),
    (2, 3),
    (2, 2), //  0: 1.0x
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (7, 2),
    (8, 2), // +6: 4.0x
];

/// Multiplier for a stat stage, clamped to [-6, +6].
pub fn stage_multiplier(stage: i8) -> Modifier {
    let stage = stage.clamp(-6, 6);
    let (num, den) = BOOST_TABLE[(stage + 6) as usize];
    Modifier::new(num, den)
}

/// Situational inputs to a speed query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConditions {
    pub stage: i8,
    pub tailwind: bool,
    pub paralyzed: bool,
    /// The environmental condition currently active, named by the ability it
    /// enables (Rain is `SwiftSwim`, item loss is `Unburden`, ...).
    pub ability_toggle: Option<SpeedAbility>,
}

/// The Pokemon whose speed is being computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedHolder {
    pub final_spe: u16,
    pub item: Option<Item>,
    pub ability: Option<SpeedAbility>,
    pub is_ditto: bool,
}

impl SpeedHolder {
    pub fn new(final_spe: u16) -> Self {
        Self {
            final_spe,
            item: None,
            ability: None,
            is_ditto: false,
        }
    }

    pub fn from_combatant(combatant: &Combatant) -> Result<Self, CalcError> {
        Ok(Self {
            final_spe: combatant.final_stats()?.spe,
            item: combatant.item,
            ability: combatant.ability,
            is_ditto: combatant.is_ditto(),
        })
    }
}

/// Effective speed plus the factors behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpeedBreakdown {
    pub base_speed: u16,
    /// Speed with only item and ability applied.
    pub item_speed: u32,
    pub final_speed: u32,
    pub stage: Modifier,
    pub item: Modifier,
    pub ability: Modifier,
    pub multiplier: Modifier,
}

/// Compute effective speed.
pub fn effective_speed(holder: &SpeedHolder, conditions: &SpeedConditions) -> SpeedBreakdown {
    let stage = stage_multiplier(conditions.stage);
    let tailwind = if conditions.tailwind { Modifier::DOUBLE } else { Modifier::ONE };
    let paralysis = if conditions.paralyzed { Modifier::HALF } else { Modifier::ONE };
    let item = holder
        .item
        .map(|i| i.speed_modifier(holder.is_ditto))
        .unwrap_or(Modifier::ONE);
    let ability = match (conditions.ability_toggle, holder.ability) {
        (Some(toggle), Some(own)) if toggle == own => Modifier::DOUBLE,
        _ => Modifier::ONE,
    };

    let multiplier = stage * tailwind * paralysis * item * ability;
    let base = holder.final_spe as u64;
    let breakdown = SpeedBreakdown {
        base_speed: holder.final_spe,
        item_speed: saturate((item * ability).apply_floor(base)),
        final_speed: saturate(multiplier.apply_floor(base)),
        stage,
        item,
        ability,
        multiplier,
    };

    tracing::trace!(
        base = holder.final_spe,
        final_speed = breakdown.final_speed,
        %multiplier,
        "effective speed"
    );
    breakdown
}

fn saturate(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}
