//! Species and move data access.
//!
//! The engine never loads data itself. Callers provide a `Dex`; `resolve_set`
//! is the single place where names from a set become typed values.

use std::collections::HashMap;

use serde::Deserialize;

use crate::abilities::SpeedAbility;
use crate::combatant::Combatant;
use crate::error::{CalcError, LookupKind};
use crate::items::Item;
use crate::moves::{MoveCategory, MoveData, MoveFlags};
use crate::natures::NatureId;
use crate::stats::{BaseStats, StatBlock, DEFAULT_LEVEL};
use crate::to_id;
use crate::types::{Type, TypeSet};

/// Read-only lookups for identity data.
pub trait Dex: Send + Sync {
    fn base_stats(&self, species: &str) -> Result<BaseStats, CalcError>;

    /// One or two type names.
    fn types(&self, species: &str) -> Result<Vec<String>, CalcError>;

    fn move_data(&self, name: &str) -> Result<MoveData, CalcError>;

    /// Weight in kilograms, when known.
    fn weight(&self, _species: &str) -> Option<f32> {
        None
    }
}

// ============================================================================
// In-memory dex
// ============================================================================

#[derive(Deserialize, Debug, Clone)]
struct SpeciesEntry {
    base_stats: HashMap<String, u16>,
    types: Vec<String>,
    #[serde(default)]
    weight_kg: Option<f32>,
}

#[derive(Deserialize, Debug, Clone)]
struct MoveEntry {
    #[serde(rename = "type")]
    move_type: String,
    category: String,
    #[serde(default)]
    power: u16,
    #[serde(default)]
    accuracy: Option<u8>,
    /// Overrides the flags derived from the name.
    #[serde(default)]
    spread: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
struct DexDocument {
    #[serde(default)]
    species: HashMap<String, SpeciesEntry>,
    #[serde(default)]
    moves: HashMap<String, MoveEntry>,
}

/// A dex backed by a JSON document.
///
/// ```json
/// {
///   "species": { "Garchomp": { "base_stats": { "hp": 108, ... }, "types": ["Dragon", "Ground"] } },
///   "moves": { "Earthquake": { "type": "Ground", "category": "Physical", "power": 100, "accuracy": 100 } }
/// }
/// ```
#[derive(Debug, Default)]
pub struct MemoryDex {
    species: HashMap<String, SpeciesEntry>,
    moves: HashMap<String, (String, MoveEntry)>,
}

impl MemoryDex {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let doc: DexDocument = serde_json::from_str(json)?;
        let dex = MemoryDex {
            species: doc
                .species
                .into_iter()
                .map(|(name, entry)| (to_id(&name), entry))
                .collect(),
            moves: doc
                .moves
                .into_iter()
                .map(|(name, entry)| (to_id(&name), (name, entry)))
                .collect(),
        };
        tracing::debug!(
            species = dex.species.len(),
            moves = dex.moves.len(),
            "loaded dex"
        );
        Ok(dex)
    }

    fn species_entry(&self, species: &str, kind: LookupKind) -> Result<&SpeciesEntry, CalcError> {
        self.species
            .get(&to_id(species))
            .ok_or_else(|| CalcError::not_found(kind, species))
    }
}

impl Dex for MemoryDex {
    fn base_stats(&self, species: &str) -> Result<BaseStats, CalcError> {
        let entry = self.species_entry(species, LookupKind::BaseStats)?;
        StatBlock::base_from_map(&entry.base_stats)
    }

    fn types(&self, species: &str) -> Result<Vec<String>, CalcError> {
        Ok(self.species_entry(species, LookupKind::Types)?.types.clone())
    }

    fn move_data(&self, name: &str) -> Result<MoveData, CalcError> {
        let (display_name, entry) = self
            .moves
            .get(&to_id(name))
            .ok_or_else(|| CalcError::not_found(LookupKind::Move, name))?;

        let move_type = Type::from_str(&entry.move_type);
        if move_type.is_none() {
            tracing::debug!(move_name = %display_name, move_type = %entry.move_type, "unknown move type");
        }

        let mut flags = MoveFlags::for_move(display_name);
        if let Some(spread) = entry.spread {
            flags.set(MoveFlags::SPREAD, spread);
        }

        Ok(MoveData {
            name: display_name.clone(),
            move_type,
            category: MoveCategory::from_str(&entry.category),
            power: entry.power,
            accuracy: entry.accuracy,
            flags,
        })
    }

    fn weight(&self, species: &str) -> Option<f32> {
        self.species.get(&to_id(species)).and_then(|e| e.weight_kg)
    }
}

// ============================================================================
// Set resolution
// ============================================================================

/// A set as a player writes it: names and numbers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SetDescription {
    pub species: String,
    /// Defaults to level 50.
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub evs: HashMap<String, u16>,
    /// Missing map means all 31; missing keys are 31.
    #[serde(default)]
    pub ivs: Option<HashMap<String, u16>>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub tera_type: Option<String>,
    #[serde(default)]
    pub moves: Vec<String>,
}

impl SetDescription {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            level: None,
            nature: None,
            evs: HashMap::new(),
            ivs: None,
            item: None,
            ability: None,
            tera_type: None,
            moves: Vec::new(),
        }
    }
}

/// Parse an optional name, logging names that don't resolve.
fn parse_optional<T>(kind: &str, name: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let name = name.map(str::trim).filter(|n| !n.is_empty())?;
    let parsed = parse(name);
    if parsed.is_none() {
        tracing::debug!(kind, name, "no calculation effect, ignoring");
    }
    parsed
}

/// Turn a set into a `Combatant`.
///
/// Species lookups fail hard. Unknown nature, item, ability and Tera names
/// resolve to `None`.
pub fn resolve_set(set: &SetDescription, dex: &dyn Dex) -> Result<Combatant, CalcError> {
    let base_stats = dex.base_stats(&set.species)?;
    let types = TypeSet::from_names(&dex.types(&set.species)?);

    let mut combatant = Combatant::new(set.species.clone(), base_stats, types)
        .level(set.level.unwrap_or(DEFAULT_LEVEL));
    combatant.nature = parse_optional("nature", set.nature.as_deref(), NatureId::from_str);
    combatant.item = parse_optional("item", set.item.as_deref(), Item::from_str);
    combatant.ability = parse_optional("ability", set.ability.as_deref(), SpeedAbility::from_str);
    combatant.tera_type = parse_optional("tera type", set.tera_type.as_deref(), Type::from_str);
    combatant.evs = StatBlock::evs_from_map(&set.evs);
    if let Some(ivs) = &set.ivs {
        combatant.ivs = StatBlock::ivs_from_map(ivs);
    }
    combatant.weight_kg = dex.weight(&set.species);

    Ok(combatant)
}

/// Look up every move named in the set.
pub fn resolve_moves(set: &SetDescription, dex: &dyn Dex) -> Result<Vec<MoveData>, CalcError> {
    set.moves.iter().map(|name| dex.move_data(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEX_JSON: &str = r#"{
        "species": {
            "Garchomp": {
                "base_stats": { "hp": 108, "atk": 130, "def": 95, "spa": 80, "spd": 85, "spe": 102 },
                "types": ["Dragon", "Ground"],
                "weight_kg": 95.0
            },
            "Broken": {
                "base_stats": { "hp": 1, "atk": 1 },
                "types": ["Normal"]
            }
        },
        "moves": {
            "Earthquake": { "type": "Ground", "category": "Physical", "power": 100, "accuracy": 100 },
            "Swift": { "type": "Normal", "category": "Special", "power": 60 },
            "Strange Beam": { "type": "Cosmic", "category": "Special", "power": 50, "spread": true }
        }
    }"#;

    fn dex() -> MemoryDex {
        MemoryDex::from_json(DEX_JSON).unwrap()
    }

    #[test]
    fn test_lookups() {
        let dex = dex();
        assert_eq!(dex.base_stats("garchomp").unwrap().spe, 102);
        assert_eq!(dex.types("GARCHOMP").unwrap(), vec!["Dragon", "Ground"]);
        assert_eq!(dex.weight("Garchomp"), Some(95.0));

        let eq = dex.move_data("earthquake").unwrap();
        assert_eq!(eq.name, "Earthquake");
        assert_eq!(eq.move_type, Some(Type::Ground));
        assert!(eq.flags.contains(MoveFlags::SPREAD | MoveFlags::GROUND_SHAKING));

        let swift = dex.move_data("Swift").unwrap();
        assert_eq!(swift.accuracy, None);
    }

    #[test]
    fn test_misses() {
        let dex = dex();
        assert_eq!(
            dex.base_stats("Mew").unwrap_err(),
            CalcError::NotFound {
                kind: LookupKind::BaseStats,
                key: "Mew".into()
            }
        );
        assert!(matches!(
            dex.move_data("Splash"),
            Err(CalcError::NotFound { kind: LookupKind::Move, .. })
        ));
        assert!(matches!(dex.base_stats("Broken"), Err(CalcError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_move_type_is_typeless() {
        let beam = dex().move_data("Strange Beam").unwrap();
        assert_eq!(beam.move_type, None);
        assert!(beam.flags.contains(MoveFlags::SPREAD));
    }

    #[test]
    fn test_resolve_set() {
        let dex = dex();
        let mut set = SetDescription::new("Garchomp");
        set.level = Some(100);
        set.nature = Some("Jolly".into());
        set.evs.insert("spe".into(), 252);
        set.item = Some("Choice Scarf".into());
        set.ability = Some("Rough Skin".into());
        set.tera_type = Some("Steel".into());
        set.moves = vec!["Earthquake".into()];

        let mon = resolve_set(&set, &dex).unwrap();
        assert_eq!(mon.types, TypeSet::dual(Type::Dragon, Type::Ground));
        assert_eq!(mon.nature, Some(NatureId::Jolly));
        assert_eq!(mon.item, Some(Item::ChoiceScarf));
        assert_eq!(mon.ability, None);
        assert_eq!(mon.tera_type, Some(Type::Steel));
        assert_eq!(mon.ivs, StatBlock::splat(31));
        assert_eq!(mon.final_stats().unwrap().spe, 333);

        let moves = resolve_moves(&set, &dex).unwrap();
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn test_resolve_unknown_species_fails() {
        let set = SetDescription::new("Missingno");
        assert!(matches!(
            resolve_set(&set, &dex()),
            Err(CalcError::NotFound { .. })
        ));
    }

    #[test]
    fn test_set_from_json_defaults() {
        let set: SetDescription = serde_json::from_str(r#"{ "species": "Garchomp" }"#).unwrap();
        assert_eq!(set.level, None);
        assert!(set.evs.is_empty());
        assert!(set.ivs.is_none());
    }
}
