//! Field state: weather, terrain, screens and battle format.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::to_id;

/// Weather conditions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    None,
    Rain,
    Sun,
    Sand,
    Snow,
}

impl Weather {
    /// Parse a weather name. Unknown names are `None`.
    pub fn from_str(s: &str) -> Self {
        match to_id(s).as_str() {
            "rain" => Weather::Rain,
            "sun" | "sunlight" | "harshsunlight" => Weather::Sun,
            "sand" | "sandstorm" => Weather::Sand,
            "snow" | "hail" => Weather::Snow,
            _ => Weather::None,
        }
    }
}

/// Terrain types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    None,
    Electric,
    Grassy,
    Psychic,
    Misty,
}

impl Terrain {
    /// Parse a terrain name, with or without the "Terrain" suffix.
    pub fn from_str(s: &str) -> Self {
        let id = to_id(s);
        match id.strip_suffix("terrain").unwrap_or(id.as_str()) {
            "electric" => Terrain::Electric,
            "grassy" => Terrain::Grassy,
            "psychic" => Terrain::Psychic,
            "misty" => Terrain::Misty,
            _ => Terrain::None,
        }
    }
}

bitflags! {
    /// Screens up on the defender's side.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Screens: u8 {
        const REFLECT = 1 << 0;
        const LIGHT_SCREEN = 1 << 1;
        const AURORA_VEIL = 1 << 2;
    }
}

/// Singles or Doubles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleFormat {
    #[default]
    Singles,
    Doubles,
}

impl BattleFormat {
    pub const fn is_doubles(self) -> bool {
        matches!(self, BattleFormat::Doubles)
    }
}

/// Environmental inputs to a damage calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldContext {
    pub weather: Weather,
    pub terrain: Terrain,
    pub screens: Screens,
    pub format: BattleFormat,
}

impl FieldContext {
    pub fn singles() -> Self {
        Self::default()
    }

    pub fn doubles() -> Self {
        Self {
            format: BattleFormat::Doubles,
            ..Self::default()
        }
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_screens(mut self, screens: Screens) -> Self {
        self.screens = screens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Weather::from_str("Sandstorm"), Weather::Sand);
        assert_eq!(Weather::from_str("rain"), Weather::Rain);
        assert_eq!(Weather::from_str("Fog"), Weather::None);
        assert_eq!(Terrain::from_str("Grassy Terrain"), Terrain::Grassy);
        assert_eq!(Terrain::from_str("misty"), Terrain::Misty);
        assert_eq!(Terrain::from_str(""), Terrain::None);
    }

    #[test]
    fn test_builders() {
        let field = FieldContext::doubles()
            .with_weather(Weather::Sun)
            .with_screens(Screens::REFLECT | Screens::LIGHT_SCREEN);
        assert!(field.format.is_doubles());
        assert!(field.screens.contains(Screens::REFLECT));
        assert_eq!(field.terrain, Terrain::None);
    }
}
