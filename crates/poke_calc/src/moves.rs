//! Move data as the calculator sees it.

use bitflags::bitflags;
use phf::phf_set;
use serde::{Deserialize, Serialize};

use crate::to_id;
use crate::types::Type;

/// Move category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    #[default]
    Status,
}

impl MoveCategory {
    /// Parse a category name (case-insensitive). Unknown names are `Status`.
    pub fn from_str(s: &str) -> Self {
        match to_id(s).as_str() {
            "physical" => MoveCategory::Physical,
            "special" => MoveCategory::Special,
            _ => MoveCategory::Status,
        }
    }

    pub const fn is_damaging(self) -> bool {
        !matches!(self, MoveCategory::Status)
    }
}

bitflags! {
    /// Calculation-relevant properties, resolved once from the move name.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MoveFlags: u8 {
        /// Hits every opposing target in Doubles.
        const SPREAD = 1 << 0;
        /// Earthquake, Bulldoze, Magnitude: weakened by Grassy Terrain.
        const GROUND_SHAKING = 1 << 1;
        /// Takes the user's Tera type and better attacking stat.
        const TERA_BLAST = 1 << 2;
        /// Power depends on the target's weight.
        const WEIGHT_BASED = 1 << 3;
    }
}

static SPREAD_MOVES: phf::Set<&'static str> = phf_set! {
    "rockslide",
    "earthquake",
    "bulldoze",
    "heatwave",
    "dazzlinggleam",
    "blizzard",
    "muddywater",
    "discharge",
    "snarl",
    "hypervoice",
    "surf",
    "icywind",
    "eruption",
    "lavaplume",
    "sludgewave",
    "paraboliccharge",
    "petalblizzard",
};

static GROUND_SHAKING_MOVES: phf::Set<&'static str> = phf_set! {
    "earthquake",
    "bulldoze",
    "magnitude",
};

static WEIGHT_BASED_MOVES: phf::Set<&'static str> = phf_set! {
    "lowkick",
    "grassknot",
};

impl MoveFlags {
    /// Flags implied by a move name.
    pub fn for_move(name: &str) -> Self {
        let id = to_id(name);
        let mut flags = MoveFlags::empty();
        flags.set(MoveFlags::SPREAD, SPREAD_MOVES.contains(id.as_str()));
        flags.set(MoveFlags::GROUND_SHAKING, GROUND_SHAKING_MOVES.contains(id.as_str()));
        flags.set(MoveFlags::TERA_BLAST, id == "terablast");
        flags.set(MoveFlags::WEIGHT_BASED, WEIGHT_BASED_MOVES.contains(id.as_str()));
        flags
    }
}

/// Static move data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveData {
    pub name: String,
    /// `None` when the data named a type the chart doesn't know.
    pub move_type: Option<Type>,
    pub category: MoveCategory,
    pub power: u16,
    /// `None` for moves that never miss.
    pub accuracy: Option<u8>,
    pub flags: MoveFlags,
}

impl MoveData {
    /// Build move data, deriving flags from the name.
    pub fn new(
        name: impl Into<String>,
        move_type: Type,
        category: MoveCategory,
        power: u16,
        accuracy: Option<u8>,
    ) -> Self {
        let name = name.into();
        let flags = MoveFlags::for_move(&name);
        Self {
            name,
            move_type: Some(move_type),
            category,
            power,
            accuracy,
            flags,
        }
    }

    /// Override the derived flags.
    pub fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Weight-based moves list no power of their own but still deal damage.
    pub fn is_damaging(&self) -> bool {
        self.category.is_damaging() && (self.power > 0 || self.flags.contains(MoveFlags::WEIGHT_BASED))
    }

    pub fn id(&self) -> String {
        to_id(&self.name)
    }
}

/// Low Kick / Grass Knot power from the target's weight in kilograms.
pub fn weight_based_power(weight_kg: f32) -> u16 {
    match weight_kg {
        w if w < 10.0 => 20,
        w if w < 25.0 => 40,
        w if w < 50.0 => 60,
        w if w < 100.0 => 80,
        w if w < 200.0 => 100,
        _ => 120,
    }
}
