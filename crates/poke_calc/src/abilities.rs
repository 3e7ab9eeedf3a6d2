//! Speed-modifying abilities.
//!
//! Each doubles Speed under one environmental condition. The condition is
//! supplied by the caller as a toggle; the ability only fires when the toggle
//! names the holder's own ability.

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::to_id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedAbility {
    /// 2x Speed in Rain
    SwiftSwim,
    /// 2x Speed in Sun
    Chlorophyll,
    /// 2x Speed in Sandstorm
    SandRush,
    /// 2x Speed in Snow
    SlushRush,
    /// 2x Speed after losing the held item
    Unburden,
}

static SPEED_ABILITIES: phf::Map<&'static str, SpeedAbility> = phf_map! {
    "swiftswim" => SpeedAbility::SwiftSwim,
    "chlorophyll" => SpeedAbility::Chlorophyll,
    "sandrush" => SpeedAbility::SandRush,
    "slushrush" => SpeedAbility::SlushRush,
    "unburden" => SpeedAbility::Unburden,
};

impl SpeedAbility {
    pub const ALL: [SpeedAbility; 5] = [
        SpeedAbility::SwiftSwim,
        SpeedAbility::Chlorophyll,
        SpeedAbility::SandRush,
        SpeedAbility::SlushRush,
        SpeedAbility::Unburden,
    ];

    /// Parse an ability name. Abilities without a speed effect are `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        SPEED_ABILITIES.get(to_id(s).as_str()).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            SpeedAbility::SwiftSwim => "Swift Swim",
            SpeedAbility::Chlorophyll => "Chlorophyll",
            SpeedAbility::SandRush => "Sand Rush",
            SpeedAbility::SlushRush => "Slush Rush",
            SpeedAbility::Unburden => "Unburden",
        }
    }
}

impl std::fmt::Display for SpeedAbility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
