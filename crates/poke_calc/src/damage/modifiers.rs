//! Damage modifier pipeline.
//!
//! Each function computes one factor from the context. `compute_modifiers`
//! multiplies them into the final modifier; `compute_effective_stats` handles
//! the factors that act on the attacking and defending stats instead.

use serde::Serialize;

use super::context::DamageContext;
use super::Modifier;
use crate::field::{Screens, Terrain, Weather};
use crate::moves::{MoveCategory, MoveFlags};
use crate::types::Type;

/// Every factor of the final modifier, and their product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ModifierBreakdown {
    pub stab: Modifier,
    pub crit: Modifier,
    /// Post-berry effectiveness.
    pub effectiveness: Modifier,
    pub item: Modifier,
    pub weather: Modifier,
    pub terrain: Modifier,
    pub screens: Modifier,
    pub spread: Modifier,
    pub total: Modifier,
}

/// Attack and defense after stat-level effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EffectiveStats {
    pub attack: u32,
    pub defense: u32,
    /// Product of the defend-stat multipliers.
    pub defense_modifier: Modifier,
}

// ============================================================================
// Stat stage
// ============================================================================

/// Attacking and defending stats for this move.
///
/// Burn halves physical attack. Assault Vest and the Sand/Snow defence boosts
/// multiply the defending stat, floored once.
pub fn compute_effective_stats(ctx: &DamageContext<'_>) -> EffectiveStats {
    let atk_stats = &ctx.attacker.stats;
    let def_stats = &ctx.defender.stats;

    let (attack, defense) = match ctx.category {
        MoveCategory::Special => (atk_stats.spa as u32, def_stats.spd as u32),
        MoveCategory::Physical | MoveCategory::Status => (atk_stats.atk as u32, def_stats.def as u32),
    };

    let attack = if ctx.attacker.burned && ctx.is_physical() {
        attack / 2
    } else {
        attack
    };

    let defense_modifier = defense_stat_modifier(ctx);
    let defense = defense_modifier
        .apply_floor(defense as u64)
        .min(u32::MAX as u64) as u32;

    EffectiveStats {
        attack,
        defense,
        defense_modifier,
    }
}

fn defense_stat_modifier(ctx: &DamageContext<'_>) -> Modifier {
    let item = ctx
        .defender
        .item
        .map(|i| i.defense_modifier(ctx.category))
        .unwrap_or(Modifier::ONE);
    item * weather_defense_modifier(ctx)
}

/// Sand boosts Rock-type SpD; Snow boosts Ice-type Def.
fn weather_defense_modifier(ctx: &DamageContext<'_>) -> Modifier {
    let types = &ctx.defender_types;
    match ctx.field.weather {
        Weather::Sand if ctx.is_special() && types.contains(Type::Rock) => Modifier::ONE_POINT_FIVE,
        Weather::Snow if ctx.is_physical() && types.contains(Type::Ice) => Modifier::ONE_POINT_FIVE,
        _ => Modifier::ONE,
    }
}

// ============================================================================
// Final modifier
// ============================================================================

/// Same-type attack bonus, including Terastallization.
pub fn stab_modifier(ctx: &DamageContext<'_>) -> Modifier {
    if let Some(forced) = ctx.stab_override {
        return if forced { Modifier::ONE_POINT_FIVE } else { Modifier::ONE };
    }
    let Some(move_type) = ctx.move_type else {
        return Modifier::ONE;
    };

    let original = ctx.attacker.types.contains(move_type);
    match ctx.attacker.active_tera() {
        Some(tera) => match (tera == move_type, original) {
            (true, true) => Modifier::DOUBLE,
            (true, false) | (false, true) => Modifier::ONE_POINT_FIVE,
            (false, false) => Modifier::ONE,
        },
        None if original => Modifier::ONE_POINT_FIVE,
        None => Modifier::ONE,
    }
}

pub fn crit_modifier(ctx: &DamageContext<'_>) -> Modifier {
    if ctx.is_crit {
        Modifier::ONE_POINT_FIVE
    } else {
        Modifier::ONE
    }
}

/// Attacker's held item. Expert Belt checks pre-berry effectiveness.
pub fn item_modifier(ctx: &DamageContext<'_>) -> Modifier {
    ctx.attacker
        .item
        .map(|item| item.attack_modifier(ctx.category, ctx.move_type, ctx.raw_effectiveness))
        .unwrap_or(Modifier::ONE)
}

/// Rain and Sun on Water and Fire moves.
pub fn weather_modifier(ctx: &DamageContext<'_>) -> Modifier {
    match (ctx.field.weather, ctx.move_type) {
        (Weather::Rain, Some(Type::Water)) | (Weather::Sun, Some(Type::Fire)) => Modifier::ONE_POINT_FIVE,
        (Weather::Rain, Some(Type::Fire)) | (Weather::Sun, Some(Type::Water)) => Modifier::HALF,
        _ => Modifier::ONE,
    }
}

/// Terrain boosts and reductions. Both Pokemon are assumed grounded.
pub fn terrain_modifier(ctx: &DamageContext<'_>) -> Modifier {
    let mut modifier = Modifier::ONE;
    match ctx.field.terrain {
        Terrain::Electric if ctx.move_is(Type::Electric) => modifier = Modifier::ONE_POINT_THREE,
        Terrain::Psychic if ctx.move_is(Type::Psychic) => modifier = Modifier::ONE_POINT_THREE,
        Terrain::Grassy => {
            if ctx.move_is(Type::Grass) {
                modifier *= Modifier::ONE_POINT_THREE;
            }
            if ctx.move_data.flags.contains(MoveFlags::GROUND_SHAKING) {
                modifier *= Modifier::HALF;
            }
        }
        Terrain::Misty if ctx.move_is(Type::Dragon) => modifier = Modifier::HALF,
        _ => {}
    }
    modifier
}

/// Reflect, Light Screen and Aurora Veil. Never stacks.
pub fn screen_modifier(ctx: &DamageContext<'_>) -> Modifier {
    let screens = ctx.field.screens;
    let active = screens.contains(Screens::AURORA_VEIL)
        || (ctx.is_physical() && screens.contains(Screens::REFLECT))
        || (ctx.is_special() && screens.contains(Screens::LIGHT_SCREEN));

    match (active, ctx.field.format.is_doubles()) {
        (false, _) => Modifier::ONE,
        (true, false) => Modifier::HALF,
        (true, true) => Modifier::SCREENS_DOUBLES,
    }
}

/// Spread moves deal 0.75x in Doubles.
pub fn spread_modifier(ctx: &DamageContext<'_>) -> Modifier {
    if ctx.is_spread && ctx.field.format.is_doubles() {
        Modifier::SPREAD
    } else {
        Modifier::ONE
    }
}

/// Collect every factor and their product.
pub fn compute_modifiers(ctx: &DamageContext<'_>) -> ModifierBreakdown {
    let stab = stab_modifier(ctx);
    let crit = crit_modifier(ctx);
    let effectiveness = ctx.effectiveness;
    let item = item_modifier(ctx);
    let weather = weather_modifier(ctx);
    let terrain = terrain_modifier(ctx);
    let screens = screen_modifier(ctx);
    let spread = spread_modifier(ctx);

    let total = stab * crit * effectiveness * item * weather * terrain * screens * spread;

    ModifierBreakdown {
        stab,
        crit,
        effectiveness,
        item,
        weather,
        terrain,
        screens,
        spread,
        total,
    }
}
