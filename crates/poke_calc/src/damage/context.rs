//! Damage calculation context.
//!
//! The `DamageContext` struct resolves everything a single damage query needs
//! up front: the effective move type and category, the defender's matchup
//! types, and type effectiveness before and after resist berries.

use serde::{Deserialize, Serialize};

use crate::combatant::{Attacker, Defender};
use crate::field::FieldContext;
use crate::moves::{weight_based_power, MoveCategory, MoveData, MoveFlags};
use crate::multihit::HitSelector;
use crate::types::{effectiveness_modifier, Type, TypeSet};
use super::Modifier;

/// Per-query switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageOptions {
    pub is_crit: bool,
    /// Force STAB on (`Some(true)`) or off (`Some(false)`).
    pub stab_override: Option<bool>,
    /// Force spread on or off; otherwise taken from the move.
    pub spread: Option<bool>,
    pub hits: HitSelector,
}

/// Context for a single damage calculation.
pub struct DamageContext<'a> {
    // ========================================================================
    // Participants
    // ========================================================================

    pub attacker: &'a Attacker,

    pub defender: &'a Defender,

    pub field: &'a FieldContext,

    // ========================================================================
    // Move Information
    // ========================================================================

    pub move_data: &'a MoveData,

    /// Base power after weight-based adjustment
    pub base_power: u16,

    /// Effective category (Tera Blast picks the better attacking stat)
    pub category: MoveCategory,

    /// Effective type (Tera Blast takes the Tera type)
    pub move_type: Option<Type>,

    // ========================================================================
    // Calculation Flags
    // ========================================================================

    pub is_crit: bool,

    /// Whether the move counts as spread (penalised only in Doubles)
    pub is_spread: bool,

    pub stab_override: Option<bool>,

    // ========================================================================
    // Matchup
    // ========================================================================

    /// Defender types after Terastallization
    pub defender_types: TypeSet,

    /// Effectiveness before resist berries
    pub raw_effectiveness: Modifier,

    /// Effectiveness after resist berries
    pub effectiveness: Modifier,

    /// Whether the defender's resist berry triggers
    pub berry_triggered: bool,
}

impl<'a> DamageContext<'a> {
    pub fn new(
        attacker: &'a Attacker,
        defender: &'a Defender,
        move_data: &'a MoveData,
        field: &'a FieldContext,
        options: &DamageOptions,
    ) -> Self {
        let mut move_type = move_data.move_type;
        let mut category = move_data.category;

        if move_data.flags.contains(MoveFlags::TERA_BLAST) {
            if let Some(tera) = attacker.active_tera() {
                move_type = Some(tera);
            }
            category = if attacker.stats.atk >= attacker.stats.spa {
                MoveCategory::Physical
            } else {
                MoveCategory::Special
            };
        }

        // Unknown weight counts as the lightest tier
        let base_power = if move_data.flags.contains(MoveFlags::WEIGHT_BASED) {
            weight_based_power(defender.weight_kg.unwrap_or(0.0))
        } else {
            move_data.power
        };

        let defender_types = defender.effective_types();
        let raw_effectiveness = move_type
            .map(|t| effectiveness_modifier(t, &defender_types))
            .unwrap_or(Modifier::ONE);

        let berry_triggered = raw_effectiveness.is_boost()
            && matches!((defender.item, move_type), (Some(item), Some(t)) if item.resists(t));
        let effectiveness = if berry_triggered {
            raw_effectiveness * Modifier::HALF
        } else {
            raw_effectiveness
        };

        Self {
            attacker,
            defender,
            field,
            move_data,
            base_power,
            category,
            move_type,
            is_crit: options.is_crit,
            is_spread: options
                .spread
                .unwrap_or_else(|| move_data.flags.contains(MoveFlags::SPREAD)),
            stab_override: options.stab_override,
            defender_types,
            raw_effectiveness,
            effectiveness,
            berry_triggered,
        }
    }

    pub fn is_physical(&self) -> bool {
        self.category == MoveCategory::Physical
    }

    pub fn is_special(&self) -> bool {
        self.category == MoveCategory::Special
    }

    /// Whether the move type is `t`.
    pub fn move_is(&self, t: Type) -> bool {
        self.move_type == Some(t)
    }
}
