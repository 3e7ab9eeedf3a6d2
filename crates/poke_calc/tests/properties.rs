//! Property tests for the stat, matchup, speed and damage engines.

use poke_calc::damage::{compute_damage, BaseDamage, KoEstimator, KoLabel, Modifier};
use poke_calc::multihit::HitCount;
use poke_calc::natures::{BattleStat, NatureId};
use poke_calc::speed::{effective_speed, stage_multiplier, SpeedConditions, SpeedHolder};
use poke_calc::stats::{compute_stats, StatBlock, StatKey, StatsInput};
use poke_calc::types::{effectiveness, Type, TypeSet};
use proptest::prelude::*;

fn stat_block(max: u16) -> impl Strategy<Value = StatBlock> {
    prop::array::uniform6(0..=max).prop_map(StatBlock::from_array)
}

fn nature() -> impl Strategy<Value = Option<NatureId>> {
    prop::option::of((0..25usize).prop_map(|i| NatureId::ALL[i]))
}

fn any_type() -> impl Strategy<Value = Type> {
    (0..Type::ALL.len()).prop_map(|i| Type::ALL[i])
}

fn modifier() -> impl Strategy<Value = Modifier> {
    prop::sample::select(vec![
        Modifier::ZERO,
        Modifier::QUARTER,
        Modifier::HALF,
        Modifier::ONE,
        Modifier::ONE_POINT_TWO,
        Modifier::ONE_POINT_FIVE,
        Modifier::DOUBLE,
        Modifier::new(9, 2),
    ])
}

proptest! {
    #[test]
    fn prop_stats_are_deterministic(
        base in stat_block(255),
        evs in stat_block(252),
        ivs in stat_block(31),
        level in 1u8..=100,
        nature in nature(),
    ) {
        let input = StatsInput { base, evs, ivs, level, nature };
        prop_assert_eq!(compute_stats(input).unwrap(), compute_stats(input).unwrap());
    }

    #[test]
    fn prop_natures_change_exactly_two_stats(
        base in prop::array::uniform6(50u16..=255).prop_map(StatBlock::from_array),
        level in 50u8..=100,
    ) {
        let neutral = compute_stats(StatsInput { level, ..StatsInput::new(base) }).unwrap();
        for nature in NatureId::ALL {
            let stats = compute_stats(StatsInput { level, nature: Some(nature), ..StatsInput::new(base) }).unwrap();
            let changed = StatKey::ALL
                .iter()
                .filter(|&&key| stats.get(key) != neutral.get(key))
                .count();
            let expected = if nature.is_neutral() { 0 } else { 2 };
            prop_assert_eq!(changed, expected, "{:?}", nature);
            prop_assert_eq!(stats.hp, neutral.hp);
        }
    }

    #[test]
    fn prop_hp_monotonic_in_ev(
        base_hp in 1u16..=255,
        level in 1u8..=100,
        ev_a in 0u16..=252,
        ev_b in 0u16..=252,
    ) {
        let (low, high) = (ev_a.min(ev_b), ev_a.max(ev_b));
        let mut input = StatsInput { level, ..StatsInput::new(StatBlock::splat(base_hp)) };
        input.evs.hp = low;
        let hp_low = compute_stats(input).unwrap().hp;
        input.evs.hp = high;
        let hp_high = compute_stats(input).unwrap().hp;
        prop_assert!(hp_low <= hp_high);
    }

    #[test]
    fn prop_effectiveness_in_known_set(
        move_type in any_type(),
        first in any_type(),
        second in prop::option::of(any_type()),
    ) {
        let defender = match second {
            Some(second) if second != first => TypeSet::dual(first, second),
            _ => TypeSet::single(first),
        };
        let value = effectiveness(move_type, &defender);
        prop_assert!([0.0, 0.25, 0.5, 1.0, 2.0, 4.0].contains(&value), "{}", value);
    }

    #[test]
    fn prop_stage_multiplier_bounded_and_monotonic(stage in -10i8..10) {
        let m = stage_multiplier(stage);
        prop_assert!(m >= Modifier::QUARTER);
        prop_assert!(m <= Modifier::QUADRUPLE);
        prop_assert!(stage_multiplier(stage.saturating_add(1)) >= m);
    }

    #[test]
    fn prop_speed_is_floored_once(
        spe in 1u16..=999,
        stage in -6i8..=6,
        tailwind in any::<bool>(),
        paralyzed in any::<bool>(),
    ) {
        let conditions = SpeedConditions { stage, tailwind, paralyzed, ability_toggle: None };
        let speed = effective_speed(&SpeedHolder::new(spe), &conditions);
        let m = speed.multiplier;
        prop_assert_eq!(speed.final_speed as u64, spe as u64 * m.num() / m.den());
    }

    #[test]
    fn prop_ohko_label_when_min_total_reaches_hp(
        level in 1u32..=100,
        power in 1u32..=250,
        attack in 1u32..=700,
        defense in 1u32..=700,
        hp in 1u32..=700,
        modifier in modifier(),
    ) {
        let base = BaseDamage::new(level, power, attack, defense);
        let result = compute_damage(base, modifier, hp, HitCount::single()).unwrap();
        if result.min_total >= hp {
            prop_assert_eq!(result.ko_label, KoLabel::Ohko);
            prop_assert_eq!(result.ohko_probability, 1.0);
        }
        prop_assert!(result.rolls.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!((0.0..=1.0).contains(&result.ohko_probability));
    }

    #[test]
    fn prop_more_hits_never_lower_ko_chance(
        per_hit in prop::array::uniform16(1u32..=120),
        hp in 1u32..=400,
    ) {
        let mut rolls = per_hit;
        rolls.sort_unstable();
        let mut estimator = KoEstimator::new(&rolls);
        let two = estimator.probability(hp, &[(2, 1.0)]);
        let three = estimator.probability(hp, &[(3, 1.0)]);
        prop_assert!(three >= two);
    }
}

#[test]
fn stage_multiplier_fixed_points() {
    assert_eq!(stage_multiplier(0), Modifier::ONE);
    assert_eq!(stage_multiplier(6), Modifier::QUADRUPLE);
    assert_eq!(stage_multiplier(-6), Modifier::QUARTER);
    assert_eq!(stage_multiplier(1).value(), 1.5);
    assert_eq!(stage_multiplier(-1).value(), 2.0 / 3.0);
}

#[test]
fn neutral_nature_leaves_every_stat() {
    for nature in NatureId::ALL.iter().filter(|n| n.is_neutral()) {
        for stat in BattleStat::ALL {
            assert_eq!(nature.stat_modifier(stat), 10);
        }
    }
}
