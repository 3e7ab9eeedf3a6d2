//! Shared test utilities.
//!
//! Loads the dex and fixture files from the workspace `tests/fixtures`
//! directory and turns fixture sets into engine values.

#![allow(dead_code)]

use std::fs;

use poke_calc::dex::resolve_set;
use poke_calc::field::{BattleFormat, FieldContext, Screens, Terrain, Weather};
use poke_calc::{Attacker, Combatant, Defender, MemoryDex, SetDescription};
use serde::Deserialize;

pub const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures");

pub fn fixture_path(name: &str) -> String {
    format!("{FIXTURE_DIR}/{name}")
}

pub fn load_dex() -> MemoryDex {
    let path = fixture_path("dex.json");
    let json = fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));
    MemoryDex::from_json(&json).expect("Failed to parse dex.json")
}

/// A set plus its in-battle state.
#[derive(Deserialize, Debug, Clone)]
pub struct SideData {
    #[serde(flatten)]
    pub set: SetDescription,
    #[serde(default)]
    pub terastallized: bool,
    #[serde(default)]
    pub burned: bool,
}

impl SideData {
    pub fn combatant(&self, dex: &MemoryDex) -> Result<Combatant, String> {
        resolve_set(&self.set, dex).map_err(|e| format!("{}: {e}", self.set.species))
    }

    pub fn attacker(&self, dex: &MemoryDex) -> Result<Attacker, String> {
        let attacker = self.combatant(dex)?.attacker().map_err(|e| e.to_string())?;
        Ok(attacker.terastallize(self.terastallized).burned(self.burned))
    }

    pub fn defender(&self, dex: &MemoryDex) -> Result<Defender, String> {
        let defender = self.combatant(dex)?.defender().map_err(|e| e.to_string())?;
        Ok(defender.terastallize(self.terastallized))
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct FieldData {
    pub weather: Option<String>,
    pub terrain: Option<String>,
    pub reflect: bool,
    pub light_screen: bool,
    pub aurora_veil: bool,
    pub format: Option<String>,
}

impl FieldData {
    pub fn to_field(&self) -> FieldContext {
        let mut screens = Screens::empty();
        screens.set(Screens::REFLECT, self.reflect);
        screens.set(Screens::LIGHT_SCREEN, self.light_screen);
        screens.set(Screens::AURORA_VEIL, self.aurora_veil);
        FieldContext {
            weather: self.weather.as_deref().map(Weather::from_str).unwrap_or_default(),
            terrain: self.terrain.as_deref().map(Terrain::from_str).unwrap_or_default(),
            screens,
            format: match self.format.as_deref() {
                Some("Doubles") => BattleFormat::Doubles,
                _ => BattleFormat::Singles,
            },
        }
    }
}
