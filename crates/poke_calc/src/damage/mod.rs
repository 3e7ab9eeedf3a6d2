//! Damage calculation pipeline.
//!
//! The calculation follows the standard damage formula:
//! 1. **Base Damage**: `((2 * Level / 5 + 2) * Power * Atk / Def) / 50 + 2`, kept exact
//! 2. **Modifier**: product of STAB, crit, effectiveness, item, weather,
//!    terrain, screens and spread, kept exact
//! 3. **Rolls**: `floor(base * modifier * r / 100)` for `r` in 85..=100
//!
//! # Usage
//!
//! ```ignore
//! use poke_calc::damage::{calculate_damage, DamageOptions};
//!
//! let result = calculate_damage(&attacker, &defender, &move_data, &field, &DamageOptions::default())?;
//!
//! // result.rolls contains all 16 damage values (85-100% rolls)
//! ```

mod context;
mod formula;
pub mod ko;
mod modifier;
mod modifiers;

pub use context::{DamageContext, DamageOptions};
pub use formula::{percent_of_hp, BaseDamage, ROLL_COUNT, ROLL_MIN};
pub use ko::{ohko_probability, KoEstimator, KoLabel, KoVerdict, RollDistribution};
pub use modifier::Modifier;
pub use modifiers::{compute_effective_stats, compute_modifiers, EffectiveStats, ModifierBreakdown};

use serde::Serialize;

use crate::combatant::{Attacker, Defender};
use crate::error::CalcError;
use crate::field::FieldContext;
use crate::moves::MoveData;
use crate::multihit::{resolve_hits, HitCount};

/// Result of a damage calculation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DamageResult {
    /// All 16 possible single-hit damage values (random roll 85-100)
    pub rolls: [u32; ROLL_COUNT],

    /// Single-hit damage at the 85% roll
    pub min_damage: u32,

    /// Single-hit damage at the 100% roll
    pub max_damage: u32,

    /// `min_damage * min_hits`
    pub min_total: u32,

    /// `max_damage * max_hits`
    pub max_total: u32,

    /// Percent of defender HP, one decimal
    pub min_pct: f64,
    pub max_pct: f64,

    pub ko_label: KoLabel,
    pub ko_verdict: KoVerdict,

    /// Chance to KO from full HP, in [0, 1]
    pub ohko_probability: f64,

    pub hits: HitCount,

    /// Factors behind the modifier. `None` for moves that deal no damage.
    pub modifiers: Option<ModifierBreakdown>,
}

impl DamageResult {
    /// Create a zero-damage result (for status moves and zero-power moves)
    pub fn zero(defender_hp: u32, hits: HitCount) -> Self {
        Self {
            rolls: [0; ROLL_COUNT],
            min_damage: 0,
            max_damage: 0,
            min_total: 0,
            max_total: 0,
            min_pct: 0.0,
            max_pct: 0.0,
            ko_label: KoLabel::from_totals(defender_hp, 0, 0),
            ko_verdict: KoVerdict::No,
            ohko_probability: 0.0,
            hits,
            modifiers: None,
        }
    }
}

/// Damage from a precomputed base and modifier.
///
/// Fails with `InvalidArgument` when `defender_hp` is zero.
pub fn compute_damage(
    base: BaseDamage,
    modifier: Modifier,
    defender_hp: u32,
    hits: HitCount,
) -> Result<DamageResult, CalcError> {
    if defender_hp == 0 {
        return Err(CalcError::invalid("defender HP must be positive"));
    }

    let rolls = base.rolls(modifier);
    let min_damage = rolls[0];
    let max_damage = rolls[ROLL_COUNT - 1];
    let min_total = min_damage.saturating_mul(hits.min_hits as u32);
    let max_total = max_damage.saturating_mul(hits.max_hits as u32);

    let ohko_probability = KoEstimator::new(&rolls).probability(defender_hp, &hits.weights);

    Ok(DamageResult {
        rolls,
        min_damage,
        max_damage,
        min_total,
        max_total,
        min_pct: percent_of_hp(min_total, defender_hp),
        max_pct: percent_of_hp(max_total, defender_hp),
        ko_label: KoLabel::from_totals(defender_hp, min_total, max_total),
        ko_verdict: KoVerdict::from_totals(defender_hp, min_total, max_total),
        ohko_probability,
        hits,
        modifiers: None,
    })
}

/// Full damage calculation for one attacker, defender and move.
pub fn calculate_damage(
    attacker: &Attacker,
    defender: &Defender,
    move_data: &MoveData,
    field: &FieldContext,
    options: &DamageOptions,
) -> Result<DamageResult, CalcError> {
    if attacker.level < 1 {
        return Err(CalcError::invalid("attacker level must be at least 1"));
    }
    let hp = defender.stats.hp as u32;
    if hp == 0 {
        return Err(CalcError::invalid("defender HP must be positive"));
    }

    let hits = resolve_hits(&move_data.name, options.hits, attacker.item)?;
    let ctx = DamageContext::new(attacker, defender, move_data, field, options);
    if !ctx.category.is_damaging() || ctx.base_power == 0 {
        return Ok(DamageResult::zero(hp, hits));
    }

    let stats = compute_effective_stats(&ctx);
    let breakdown = compute_modifiers(&ctx);
    let base = BaseDamage::new(
        attacker.level as u32,
        ctx.base_power as u32,
        stats.attack,
        stats.defense,
    );

    let mut result = compute_damage(base, breakdown.total, hp, hits)?;
    result.modifiers = Some(breakdown);

    tracing::debug!(
        move_name = %move_data.name,
        attack = stats.attack,
        defense = stats.defense,
        base = base.value(),
        modifier = %breakdown.total,
        min = result.min_damage,
        max = result.max_damage,
        ko = %result.ko_label,
        "damage calculated"
    );

    Ok(result)
}
