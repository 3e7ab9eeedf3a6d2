//! Many-versus-many queries.
//!
//! Every row is an independent calculation, so rows are evaluated in parallel
//! with rayon. Output order always follows input order unless stated.

use rayon::prelude::*;
use serde::Serialize;

use crate::combatant::{Attacker, Defender};
use crate::damage::{calculate_damage, DamageOptions, DamageResult, KoVerdict};
use crate::error::CalcError;
use crate::field::FieldContext;
use crate::moves::MoveData;
use crate::speed::{effective_speed, SpeedBreakdown, SpeedConditions, SpeedHolder};

// ============================================================================
// One attacker, many defenders
// ============================================================================

/// A named defender.
#[derive(Clone, Debug)]
pub struct Target {
    pub name: String,
    pub defender: Defender,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DamageRow {
    pub target: String,
    pub result: DamageResult,
}

/// Counts of KO verdicts across a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KoSummary {
    pub guaranteed: usize,
    pub possible: usize,
    pub none: usize,
    pub total: usize,
}

impl KoSummary {
    fn record(&mut self, verdict: KoVerdict) {
        match verdict {
            KoVerdict::Guaranteed => self.guaranteed += 1,
            KoVerdict::Possible => self.possible += 1,
            KoVerdict::No => self.none += 1,
        }
        self.total += 1;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DamageTable {
    pub rows: Vec<DamageRow>,
    pub summary: KoSummary,
}

/// Run one move against every target.
///
/// Fails on the first invalid target.
pub fn damage_against_all(
    attacker: &Attacker,
    move_data: &MoveData,
    field: &FieldContext,
    options: &DamageOptions,
    targets: &[Target],
) -> Result<DamageTable, CalcError> {
    let rows = targets
        .par_iter()
        .map(|target| {
            let result = calculate_damage(attacker, &target.defender, move_data, field, options)?;
            tracing::trace!(target = %target.name, ko = %result.ko_label, "row");
            Ok(DamageRow {
                target: target.name.clone(),
                result,
            })
        })
        .collect::<Result<Vec<_>, CalcError>>()?;

    let mut summary = KoSummary::default();
    for row in &rows {
        summary.record(row.result.ko_verdict);
    }

    tracing::debug!(
        move_name = %move_data.name,
        targets = summary.total,
        guaranteed = summary.guaranteed,
        possible = summary.possible,
        "damage table"
    );
    Ok(DamageTable { rows, summary })
}

// ============================================================================
// Many attackers, one defender
// ============================================================================

/// A named attacker and its moveset.
#[derive(Clone, Debug)]
pub struct Threat {
    pub name: String,
    pub attacker: Attacker,
    pub moves: Vec<MoveData>,
}

/// An attacker's strongest move against the defender.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThreatRow {
    pub attacker: String,
    /// `None` when the attacker has no damaging move.
    pub best_move: Option<String>,
    pub result: Option<DamageResult>,
}

fn best_move(
    threat: &Threat,
    defender: &Defender,
    field: &FieldContext,
    options: &DamageOptions,
) -> Result<ThreatRow, CalcError> {
    let mut best: Option<(&MoveData, DamageResult)> = None;
    for move_data in threat.moves.iter().filter(|m| m.is_damaging()) {
        let result = calculate_damage(&threat.attacker, defender, move_data, field, options)?;
        let better = match &best {
            Some((_, current)) => result.max_pct > current.max_pct,
            None => true,
        };
        if better {
            best = Some((move_data, result));
        }
    }

    let (best_move, result) = match best {
        Some((move_data, result)) => (Some(move_data.name.clone()), Some(result)),
        None => (None, None),
    };
    Ok(ThreatRow {
        attacker: threat.name.clone(),
        best_move,
        result,
    })
}

/// For every threat, pick the move with the highest `max_pct`. Ties keep the
/// earlier move.
pub fn threat_report(
    defender: &Defender,
    field: &FieldContext,
    options: &DamageOptions,
    threats: &[Threat],
) -> Result<Vec<ThreatRow>, CalcError> {
    threats
        .par_iter()
        .map(|threat| best_move(threat, defender, field, options))
        .collect()
}

// ============================================================================
// Speed tiers
// ============================================================================

#[derive(Clone, Debug)]
pub struct SpeedEntry {
    pub name: String,
    pub holder: SpeedHolder,
}

/// Inclusive bounds on final speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeedBounds {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl SpeedBounds {
    pub fn contains(&self, speed: u32) -> bool {
        self.min.map_or(true, |min| speed >= min) && self.max.map_or(true, |max| speed <= max)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpeedTier {
    pub name: String,
    pub speed: SpeedBreakdown,
}

/// Effective speeds under shared conditions, fastest first. Equal speeds
/// keep input order.
pub fn speed_tiers(
    conditions: &SpeedConditions,
    entries: &[SpeedEntry],
    bounds: SpeedBounds,
) -> Vec<SpeedTier> {
    let mut tiers: Vec<SpeedTier> = entries
        .par_iter()
        .filter_map(|entry| {
            let speed = effective_speed(&entry.holder, conditions);
            bounds.contains(speed.final_speed).then(|| SpeedTier {
                name: entry.name.clone(),
                speed,
            })
        })
        .collect();
    tiers.sort_by(|a, b| b.speed.final_speed.cmp(&a.speed.final_speed));
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Combatant;
    use crate::items::Item;
    use crate::moves::MoveCategory;
    use crate::natures::NatureId;
    use crate::stats::StatBlock;
    use crate::types::{Type, TypeSet};

    fn garchomp() -> Combatant {
        Combatant::new(
            "Garchomp",
            StatBlock::from_array([108, 130, 95, 80, 85, 102]),
            TypeSet::dual(Type::Dragon, Type::Ground),
        )
        .level(100)
        .nature(NatureId::Jolly)
        .evs([0, 252, 0, 0, 4, 252])
    }

    fn target(name: &str, types: TypeSet) -> Target {
        let defender = Combatant::new(name, StatBlock::splat(80), types)
            .level(100)
            .defender()
            .unwrap();
        Target {
            name: name.to_string(),
            defender,
        }
    }

    fn earthquake() -> MoveData {
        MoveData::new("Earthquake", Type::Ground, MoveCategory::Physical, 100, Some(100))
    }

    #[test]
    fn test_damage_against_all_keeps_order_and_counts() {
        let attacker = garchomp().attacker().unwrap();
        let targets = vec![
            target("Flyer", TypeSet::single(Type::Flying)),
            target("Rock", TypeSet::single(Type::Rock)),
            target("Normal", TypeSet::single(Type::Normal)),
        ];
        let table = damage_against_all(
            &attacker,
            &earthquake(),
            &FieldContext::singles(),
            &DamageOptions::default(),
            &targets,
        )
        .unwrap();

        let names: Vec<_> = table.rows.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(names, ["Flyer", "Rock", "Normal"]);
        assert_eq!(table.rows[0].result.max_damage, 0);
        assert!(table.rows[1].result.max_damage > table.rows[2].result.max_damage);
        assert_eq!(table.summary.total, 3);
        assert_eq!(
            table.summary.guaranteed + table.summary.possible + table.summary.none,
            3
        );
        assert!(table.summary.none >= 1);
    }

    #[test]
    fn test_threat_report_picks_strongest_move() {
        let defender = target("Steel", TypeSet::single(Type::Steel)).defender;
        let threat = Threat {
            name: "Garchomp".into(),
            attacker: garchomp().attacker().unwrap(),
            moves: vec![
                MoveData::new("Dragon Claw", Type::Dragon, MoveCategory::Physical, 80, Some(100)),
                MoveData::new("Swords Dance", Type::Normal, MoveCategory::Status, 0, None),
                earthquake(),
            ],
        };
        let empty = Threat {
            name: "Pacifist".into(),
            attacker: garchomp().attacker().unwrap(),
            moves: vec![MoveData::new("Protect", Type::Normal, MoveCategory::Status, 0, None)],
        };

        let report = threat_report(
            &defender,
            &FieldContext::singles(),
            &DamageOptions::default(),
            &[threat, empty],
        )
        .unwrap();
        assert_eq!(report[0].best_move.as_deref(), Some("Earthquake"));
        assert!(report[0].result.is_some());
        assert_eq!(report[1].best_move, None);
        assert_eq!(report[1].result, None);
    }

    #[test]
    fn test_threat_report_ties_keep_first() {
        let defender = target("Normal", TypeSet::single(Type::Normal)).defender;
        let threat = Threat {
            name: "Garchomp".into(),
            attacker: garchomp().attacker().unwrap(),
            moves: vec![
                MoveData::new("Dragon Claw", Type::Dragon, MoveCategory::Physical, 80, Some(100)),
                MoveData::new("Dragon Claw Copy", Type::Dragon, MoveCategory::Physical, 80, Some(100)),
            ],
        };
        let report = threat_report(
            &defender,
            &FieldContext::singles(),
            &DamageOptions::default(),
            &[threat],
        )
        .unwrap();
        assert_eq!(report[0].best_move.as_deref(), Some("Dragon Claw"));
    }

    #[test]
    fn test_weight_based_moves_are_considered() {
        let heavy = Combatant::new("Heavy", StatBlock::splat(80), TypeSet::single(Type::Normal))
            .level(100)
            .weight(250.0)
            .defender()
            .unwrap();
        let low_kick = MoveData::new("Low Kick", Type::Fighting, MoveCategory::Physical, 0, Some(100));
        let threat = Threat {
            name: "Garchomp".into(),
            attacker: garchomp().attacker().unwrap(),
            moves: vec![
                MoveData::new("Dragon Claw", Type::Dragon, MoveCategory::Physical, 80, Some(100)),
                low_kick.clone(),
            ],
        };
        let report = threat_report(
            &heavy,
            &FieldContext::singles(),
            &DamageOptions::default(),
            &[threat],
        )
        .unwrap();
        assert_eq!(report[0].best_move.as_deref(), Some("Low Kick"));

        let light = Target {
            name: "Light".into(),
            defender: Combatant::new("Light", StatBlock::splat(80), TypeSet::single(Type::Normal))
                .level(100)
                .weight(5.0)
                .defender()
                .unwrap(),
        };
        let table = damage_against_all(
            &garchomp().attacker().unwrap(),
            &low_kick,
            &FieldContext::singles(),
            &DamageOptions::default(),
            &[light, Target { name: "Heavy".into(), defender: heavy }],
        )
        .unwrap();
        assert!(table.rows[0].result.max_damage > 0);
        assert!(table.rows[1].result.max_damage > table.rows[0].result.max_damage);
    }

    #[test]
    fn test_speed_tiers_sorted_and_filtered() {
        let mut scarf = SpeedHolder::new(200);
        scarf.item = Some(Item::ChoiceScarf);
        let entries = vec![
            SpeedEntry { name: "Slow".into(), holder: SpeedHolder::new(50) },
            SpeedEntry { name: "Scarf".into(), holder: scarf },
            SpeedEntry { name: "Mid".into(), holder: SpeedHolder::new(250) },
            SpeedEntry { name: "Mid Twin".into(), holder: SpeedHolder::new(250) },
        ];

        let tiers = speed_tiers(&SpeedConditions::default(), &entries, SpeedBounds::default());
        let order: Vec<_> = tiers.iter().map(|t| (t.name.as_str(), t.speed.final_speed)).collect();
        assert_eq!(
            order,
            [("Scarf", 300), ("Mid", 250), ("Mid Twin", 250), ("Slow", 50)]
        );

        let bounded = speed_tiers(
            &SpeedConditions::default(),
            &entries,
            SpeedBounds { min: Some(100), max: Some(260) },
        );
        let names: Vec<_> = bounded.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Mid", "Mid Twin"]);
    }

    #[test]
    fn test_invalid_target_fails_table() {
        let attacker = garchomp().attacker().unwrap();
        let mut broken = target("Broken", TypeSet::single(Type::Normal));
        broken.defender.stats.hp = 0;
        let result = damage_against_all(
            &attacker,
            &earthquake(),
            &FieldContext::singles(),
            &DamageOptions::default(),
            &[broken],
        );
        assert!(matches!(result, Err(CalcError::InvalidArgument(_))));
    }
}
