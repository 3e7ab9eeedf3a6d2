//! Held items recognised by the calculator.
//!
//! Item names are resolved once, at the ingestion boundary. Anything not in
//! this table has no effect on damage or speed and is dropped there.

use phf::phf_map;
use serde::{Serialize, Serializer};

use crate::damage::Modifier;
use crate::moves::MoveCategory;
use crate::to_id;
use crate::types::Type;

/// A held item with a calculation effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    // Damage boosts
    ChoiceBand,
    ChoiceSpecs,
    LifeOrb,
    ExpertBelt,
    MuscleBand,
    WiseGlasses,
    /// Classic 1.2x type items and Plates.
    TypeBoost(Type),

    // Defensive
    AssaultVest,
    /// Halves a super-effective hit of its type.
    ResistBerry(Type),

    // Speed
    ChoiceScarf,
    IronBall,
    MachoBrace,
    PowerAnklet,
    PowerBand,
    PowerBelt,
    PowerBracer,
    PowerLens,
    PowerWeight,
    QuickPowder,

    // Multi-hit
    LoadedDice,
}

static ITEMS: phf::Map<&'static str, Item> = phf_map! {
    "choiceband" => Item::ChoiceBand,
    "choicespecs" => Item::ChoiceSpecs,
    "choicescarf" => Item::ChoiceScarf,
    "lifeorb" => Item::LifeOrb,
    "expertbelt" => Item::ExpertBelt,
    "muscleband" => Item::MuscleBand,
    "wiseglasses" => Item::WiseGlasses,
    "loadeddice" => Item::LoadedDice,
    "assaultvest" => Item::AssaultVest,
    "ironball" => Item::IronBall,
    "machobrace" => Item::MachoBrace,
    "poweranklet" => Item::PowerAnklet,
    "powerband" => Item::PowerBand,
    "powerbelt" => Item::PowerBelt,
    "powerbracer" => Item::PowerBracer,
    "powerlens" => Item::PowerLens,
    "powerweight" => Item::PowerWeight,
    "quickpowder" => Item::QuickPowder,

    "silkscarf" => Item::TypeBoost(Type::Normal),
    "charcoal" => Item::TypeBoost(Type::Fire),
    "mysticwater" => Item::TypeBoost(Type::Water),
    "magnet" => Item::TypeBoost(Type::Electric),
    "miracleseed" => Item::TypeBoost(Type::Grass),
    "nevermeltice" => Item::TypeBoost(Type::Ice),
    "blackbelt" => Item::TypeBoost(Type::Fighting),
    "poisonbarb" => Item::TypeBoost(Type::Poison),
    "softsand" => Item::TypeBoost(Type::Ground),
    "sharpbeak" => Item::TypeBoost(Type::Flying),
    "twistedspoon" => Item::TypeBoost(Type::Psychic),
    "silverpowder" => Item::TypeBoost(Type::Bug),
    "hardstone" => Item::TypeBoost(Type::Rock),
    "spelltag" => Item::TypeBoost(Type::Ghost),
    "dragonfang" => Item::TypeBoost(Type::Dragon),
    "blackglasses" => Item::TypeBoost(Type::Dark),
    "metalcoat" => Item::TypeBoost(Type::Steel),

    "flameplate" => Item::TypeBoost(Type::Fire),
    "splashplate" => Item::TypeBoost(Type::Water),
    "zapplate" => Item::TypeBoost(Type::Electric),
    "meadowplate" => Item::TypeBoost(Type::Grass),
    "icicleplate" => Item::TypeBoost(Type::Ice),
    "fistplate" => Item::TypeBoost(Type::Fighting),
    "toxicplate" => Item::TypeBoost(Type::Poison),
    "earthplate" => Item::TypeBoost(Type::Ground),
    "skyplate" => Item::TypeBoost(Type::Flying),
    "mindplate" => Item::TypeBoost(Type::Psychic),
    "insectplate" => Item::TypeBoost(Type::Bug),
    "stoneplate" => Item::TypeBoost(Type::Rock),
    "spookyplate" => Item::TypeBoost(Type::Ghost),
    "dracoplate" => Item::TypeBoost(Type::Dragon),
    "dreadplate" => Item::TypeBoost(Type::Dark),
    "ironplate" => Item::TypeBoost(Type::Steel),
    "pixieplate" => Item::TypeBoost(Type::Fairy),

    "chilanberry" => Item::ResistBerry(Type::Normal),
    "occaberry" => Item::ResistBerry(Type::Fire),
    "passhoberry" => Item::ResistBerry(Type::Water),
    "wacanberry" => Item::ResistBerry(Type::Electric),
    "rindoberry" => Item::ResistBerry(Type::Grass),
    "yacheberry" => Item::ResistBerry(Type::Ice),
    "chopleberry" => Item::ResistBerry(Type::Fighting),
    "kebiaberry" => Item::ResistBerry(Type::Poison),
    "shucaberry" => Item::ResistBerry(Type::Ground),
    "cobaberry" => Item::ResistBerry(Type::Flying),
    "payapaberry" => Item::ResistBerry(Type::Psychic),
    "tangaberry" => Item::ResistBerry(Type::Bug),
    "chartiberry" => Item::ResistBerry(Type::Rock),
    "kasibberry" => Item::ResistBerry(Type::Ghost),
    "habanberry" => Item::ResistBerry(Type::Dragon),
    "colburberry" => Item::ResistBerry(Type::Dark),
    "babiriberry" => Item::ResistBerry(Type::Steel),
    "roseliberry" => Item::ResistBerry(Type::Fairy),
};

impl Item {
    /// Parse an item name (case, spacing and punctuation are ignored).
    pub fn from_str(s: &str) -> Option<Self> {
        ITEMS.get(to_id(s).as_str()).copied()
    }

    /// Attacker-side damage multiplier.
    ///
    /// `raw_effectiveness` is the matchup before any resist berry, which is
    /// what Expert Belt checks.
    pub fn attack_modifier(
        self,
        category: MoveCategory,
        move_type: Option<Type>,
        raw_effectiveness: Modifier,
    ) -> Modifier {
        match (self, category) {
            (Item::ChoiceBand, MoveCategory::Physical) => Modifier::ONE_POINT_FIVE,
            (Item::ChoiceSpecs, MoveCategory::Special) => Modifier::ONE_POINT_FIVE,
            (Item::LifeOrb, _) => Modifier::ONE_POINT_THREE,
            (Item::ExpertBelt, _) if raw_effectiveness.is_boost() => Modifier::ONE_POINT_TWO,
            (Item::MuscleBand, MoveCategory::Physical) => Modifier::ONE_POINT_ONE,
            (Item::WiseGlasses, MoveCategory::Special) => Modifier::ONE_POINT_ONE,
            (Item::TypeBoost(t), _) if move_type == Some(t) => Modifier::ONE_POINT_TWO,
            _ => Modifier::ONE,
        }
    }

    /// Defender-side multiplier on the defending stat.
    pub fn defense_modifier(self, category: MoveCategory) -> Modifier {
        match (self, category) {
            (Item::AssaultVest, MoveCategory::Special) => Modifier::ONE_POINT_FIVE,
            _ => Modifier::ONE,
        }
    }

    /// Whether this is the resist berry for `move_type`.
    pub fn resists(self, move_type: Type) -> bool {
        matches!(self, Item::ResistBerry(t) if t == move_type)
    }

    /// Speed multiplier for the holder.
    pub fn speed_modifier(self, is_ditto: bool) -> Modifier {
        match self {
            Item::ChoiceScarf => Modifier::ONE_POINT_FIVE,
            Item::IronBall
            | Item::MachoBrace
            | Item::PowerAnklet
            | Item::PowerBand
            | Item::PowerBelt
            | Item::PowerBracer
            | Item::PowerLens
            | Item::PowerWeight => Modifier::HALF,
            Item::QuickPowder if is_ditto => Modifier::DOUBLE,
            _ => Modifier::ONE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Item::ChoiceBand => "Choice Band",
            Item::ChoiceSpecs => "Choice Specs",
            Item::ChoiceScarf => "Choice Scarf",
            Item::LifeOrb => "Life Orb",
            Item::ExpertBelt => "Expert Belt",
            Item::MuscleBand => "Muscle Band",
            Item::WiseGlasses => "Wise Glasses",
            Item::LoadedDice => "Loaded Dice",
            Item::AssaultVest => "Assault Vest",
            Item::IronBall => "Iron Ball",
            Item::MachoBrace => "Macho Brace",
            Item::PowerAnklet => "Power Anklet",
            Item::PowerBand => "Power Band",
            Item::PowerBelt => "Power Belt",
            Item::PowerBracer => "Power Bracer",
            Item::PowerLens => "Power Lens",
            Item::PowerWeight => "Power Weight",
            Item::QuickPowder => "Quick Powder",
            Item::TypeBoost(t) => type_boost_name(t),
            Item::ResistBerry(t) => resist_berry_name(t),
        }
    }
}

const fn type_boost_name(t: Type) -> &'static str {
    match t {
        Type::Normal => "Silk Scarf",
        Type::Fire => "Charcoal",
        Type::Water => "Mystic Water",
        Type::Electric => "Magnet",
        Type::Grass => "Miracle Seed",
        Type::Ice => "Never-Melt Ice",
        Type::Fighting => "Black Belt",
        Type::Poison => "Poison Barb",
        Type::Ground => "Soft Sand",
        Type::Flying => "Sharp Beak",
        Type::Psychic => "Twisted Spoon",
        Type::Bug => "Silver Powder",
        Type::Rock => "Hard Stone",
        Type::Ghost => "Spell Tag",
        Type::Dragon => "Dragon Fang",
        Type::Dark => "Black Glasses",
        Type::Steel => "Metal Coat",
        Type::Fairy => "Pixie Plate",
    }
}

const fn resist_berry_name(t: Type) -> &'static str {
    match t {
        Type::Normal => "Chilan Berry",
        Type::Fire => "Occa Berry",
        Type::Water => "Passho Berry",
        Type::Electric => "Wacan Berry",
        Type::Grass => "Rindo Berry",
        Type::Ice => "Yache Berry",
        Type::Fighting => "Chople Berry",
        Type::Poison => "Kebia Berry",
        Type::Ground => "Shuca Berry",
        Type::Flying => "Coba Berry",
        Type::Psychic => "Payapa Berry",
        Type::Bug => "Tanga Berry",
        Type::Rock => "Charti Berry",
        Type::Ghost => "Kasib Berry",
        Type::Dragon => "Haban Berry",
        Type::Dark => "Colbur Berry",
        Type::Steel => "Babiri Berry",
        Type::Fairy => "Roseli Berry",
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
