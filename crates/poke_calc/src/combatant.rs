//! Combatant blueprints.
//!
//! A `Combatant` is a fully resolved set: identity data from the dex plus the
//! player's choices. Use the builder methods to customise it, then derive an
//! `Attacker` or `Defender` view for a damage query.

use serde::Serialize;

use crate::abilities::SpeedAbility;
use crate::error::CalcError;
use crate::items::Item;
use crate::natures::NatureId;
use crate::stats::{compute_stats, BaseStats, FinalStats, StatBlock, StatSpread, StatsInput};
use crate::stats::{DEFAULT_EV, DEFAULT_IV, DEFAULT_LEVEL};
use crate::to_id;
use crate::types::{Type, TypeSet};

/// A resolved competitive set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Combatant {
    pub species: String,
    pub base_stats: BaseStats,
    pub types: TypeSet,
    pub level: u8,
    pub nature: Option<NatureId>,
    pub evs: StatSpread,
    pub ivs: StatSpread,
    pub item: Option<Item>,
    pub ability: Option<SpeedAbility>,
    pub tera_type: Option<Type>,
    /// Only needed for weight-based moves.
    pub weight_kg: Option<f32>,
}

impl Combatant {
    pub fn new(species: impl Into<String>, base_stats: BaseStats, types: TypeSet) -> Self {
        Self {
            species: species.into(),
            base_stats,
            types,
            level: DEFAULT_LEVEL,
            nature: None,
            evs: StatBlock::splat(DEFAULT_EV),
            ivs: StatBlock::splat(DEFAULT_IV),
            item: None,
            ability: None,
            tera_type: None,
            weight_kg: None,
        }
    }

    /// Set level
    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Set nature
    pub fn nature(mut self, nature: NatureId) -> Self {
        self.nature = Some(nature);
        self
    }

    /// Set EVs
    pub fn evs(mut self, evs: [u16; 6]) -> Self {
        self.evs = StatBlock::from_array(evs);
        self
    }

    /// Set IVs
    pub fn ivs(mut self, ivs: [u16; 6]) -> Self {
        self.ivs = StatBlock::from_array(ivs);
        self
    }

    /// Set held item
    pub fn item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    /// Set speed ability
    pub fn ability(mut self, ability: SpeedAbility) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Set Tera type
    pub fn tera_type(mut self, tera: Type) -> Self {
        self.tera_type = Some(tera);
        self
    }

    /// Set weight in kilograms
    pub fn weight(mut self, kg: f32) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    pub fn stats_input(&self) -> StatsInput {
        StatsInput {
            base: self.base_stats,
            evs: self.evs,
            ivs: self.ivs,
            level: self.level,
            nature: self.nature,
        }
    }

    pub fn final_stats(&self) -> Result<FinalStats, CalcError> {
        compute_stats(self.stats_input())
    }

    pub fn is_ditto(&self) -> bool {
        to_id(&self.species) == "ditto"
    }

    /// Attacking view: not Terastallized, not burned.
    pub fn attacker(&self) -> Result<Attacker, CalcError> {
        Ok(Attacker {
            level: self.level,
            stats: self.final_stats()?,
            types: self.types,
            tera_type: self.tera_type,
            terastallized: false,
            item: self.item,
            burned: false,
        })
    }

    /// Defending view: not Terastallized.
    pub fn defender(&self) -> Result<Defender, CalcError> {
        Ok(Defender {
            stats: self.final_stats()?,
            types: self.types,
            tera_type: self.tera_type,
            terastallized: false,
            item: self.item,
            weight_kg: self.weight_kg,
        })
    }
}

/// The attacking side of a damage query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Attacker {
    pub level: u8,
    pub stats: FinalStats,
    pub types: TypeSet,
    pub tera_type: Option<Type>,
    pub terastallized: bool,
    pub item: Option<Item>,
    pub burned: bool,
}

impl Attacker {
    pub fn terastallize(mut self, active: bool) -> Self {
        self.terastallized = active;
        self
    }

    pub fn burned(mut self, burned: bool) -> Self {
        self.burned = burned;
        self
    }

    pub fn with_item(mut self, item: Option<Item>) -> Self {
        self.item = item;
        self
    }

    /// The Tera type, only while Terastallized.
    pub fn active_tera(&self) -> Option<Type> {
        self.tera_type.filter(|_| self.terastallized)
    }
}

/// The defending side of a damage query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Defender {
    pub stats: FinalStats,
    pub types: TypeSet,
    pub tera_type: Option<Type>,
    pub terastallized: bool,
    pub item: Option<Item>,
    pub weight_kg: Option<f32>,
}

impl Defender {
    pub fn terastallize(mut self, active: bool) -> Self {
        self.terastallized = active;
        self
    }

    pub fn with_item(mut self, item: Option<Item>) -> Self {
        self.item = item;
        self
    }

    /// Types used for matchups: the Tera type alone once Terastallized.
    pub fn effective_types(&self) -> TypeSet {
        match self.tera_type {
            Some(tera) if self.terastallized => TypeSet::single(tera),
            _ => self.types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragonite() -> Combatant {
        Combatant::new(
            "Dragonite",
            StatBlock::from_array([91, 134, 95, 100, 100, 80]),
            TypeSet::dual(Type::Dragon, Type::Flying),
        )
        .tera_type(Type::Normal)
    }

    #[test]
    fn test_builder_defaults() {
        let mon = dragonite();
        assert_eq!(mon.level, DEFAULT_LEVEL);
        assert_eq!(mon.ivs, StatBlock::splat(31));
        assert_eq!(mon.evs, StatBlock::default());
        assert!(!mon.is_ditto());
    }

    #[test]
    fn test_tera_only_when_active() {
        let attacker = dragonite().attacker().unwrap();
        assert_eq!(attacker.active_tera(), None);
        assert_eq!(attacker.terastallize(true).active_tera(), Some(Type::Normal));

        let defender = dragonite().defender().unwrap();
        assert_eq!(defender.effective_types(), TypeSet::dual(Type::Dragon, Type::Flying));
        assert_eq!(
            defender.terastallize(true).effective_types(),
            TypeSet::single(Type::Normal)
        );
    }

    #[test]
    fn test_invalid_level_surfaces() {
        assert!(dragonite().level(0).attacker().is_err());
    }

    #[test]
    fn test_ditto_detection() {
        let ditto = Combatant::new("DITTO", StatBlock::splat(48), TypeSet::single(Type::Normal));
        assert!(ditto.is_ditto());
    }
}
