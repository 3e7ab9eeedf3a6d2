//! Type definitions and the Gen 9 type chart.

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::damage::Modifier;
use crate::to_id;

/// Pokemon type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
}

pub const TYPE_COUNT: usize = 18;

static TYPE_NAMES: phf::Map<&'static str, Type> = phf_map! {
    "normal" => Type::Normal,
    "fire" => Type::Fire,
    "water" => Type::Water,
    "electric" => Type::Electric,
    "grass" => Type::Grass,
    "ice" => Type::Ice,
    "fighting" => Type::Fighting,
    "poison" => Type::Poison,
    "ground" => Type::Ground,
    "flying" => Type::Flying,
    "psychic" => Type::Psychic,
    "bug" => Type::Bug,
    "rock" => Type::Rock,
    "ghost" => Type::Ghost,
    "dragon" => Type::Dragon,
    "dark" => Type::Dark,
    "steel" => Type::Steel,
    "fairy" => Type::Fairy,
};

impl Type {
    pub const ALL: [Type; TYPE_COUNT] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    /// Parse a type name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        TYPE_NAMES.get(to_id(s).as_str()).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Type chart
// ============================================================================

/// Matchup of one attacking type against one defending type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeEffectiveness {
    Immune = 0,
    NotVeryEffective = 1,
    Neutral = 2,
    SuperEffective = 4,
}

impl TypeEffectiveness {
    pub const fn modifier(self) -> Modifier {
        match self {
            TypeEffectiveness::Immune => Modifier::ZERO,
            TypeEffectiveness::NotVeryEffective => Modifier::HALF,
            TypeEffectiveness::Neutral => Modifier::ONE,
            TypeEffectiveness::SuperEffective => Modifier::DOUBLE,
        }
    }
}

use TypeEffectiveness::{Immune as X, Neutral as N, NotVeryEffective as H, SuperEffective as S};

/// `TYPE_CHART[attacker][defender]`, columns in `Type` order.
pub static TYPE_CHART: [[TypeEffectiveness; TYPE_COUNT]; TYPE_COUNT] = [
    /* Normal   */ [N, N, N, N, N, N, N, N, N, N, N, N, H, X, N, N, H, N],
    /* Fire     */ [N, H, H, N, S, S, N, N, N, N, N, S, H, N, H, N, S, N],
    /* Water    */ [N, S, H, N, H, N, N, N, S, N, N, N, S, N, H, N, N, N],
    /* Electric */ [N, N, S, H, H, N, N, N, X, S, N, N, N, N, H, N, N, N],
    /* Grass    */ [N, H, S, N, H, N, N, H, S, H, N, H, S, N, H, N, H, N],
    /* Ice      */ [N, H, H, N, N, H, N, N, S, S, N, N, N, N, S, N, H, N],
    /* Fighting */ [S, N, N, N, N, S, N, H, N, H, H, H, S, X, N, S, S, H],
    /* Poison   */ [N, N, N, N, S, N, N, H, H, N, N, N, H, H, N, N, X, S],
    /* Ground   */ [N, S, N, S, H, N, N, S, N, X, N, H, S, N, N, N, S, N],
    /* Flying   */ [N, N, N, H, S, N, S, N, N, N, N, S, H, N, N, N, H, N],
    /* Psychic  */ [N, N, N, N, N, N, S, S, N, N, H, N, N, N, N, X, H, N],
    /* Bug      */ [N, H, N, N, S, N, H, H, N, H, S, N, N, H, N, S, H, H],
    /* Rock     */ [N, S, N, N, N, S, H, N, H, S, N, S, N, N, N, N, H, N],
    /* Ghost    */ [X, N, N, N, N, N, N, N, N, N, S, N, N, S, N, H, N, N],
    /* Dragon   */ [N, N, N, N, N, N, N, N, N, N, N, N, N, N, S, N, H, X],
    /* Dark     */ [N, N, N, N, N, N, H, N, N, N, S, N, N, S, N, H, N, H],
    /* Steel    */ [N, H, H, H, N, S, N, N, N, N, N, N, S, N, N, N, H, S],
    /* Fairy    */ [N, H, N, N, N, N, S, H, N, N, N, N, N, N, S, S, H, N],
];

/// Exact effectiveness of `move_type` against every defending type.
///
/// The product lands in {0, 1/4, 1/2, 1, 2, 4} for one or two defending types.
pub fn effectiveness_modifier(move_type: Type, defender_types: &TypeSet) -> Modifier {
    defender_types
        .iter()
        .map(|def| TYPE_CHART[move_type as usize][def as usize].modifier())
        .product()
}

/// Effectiveness of `move_type` against `defender_types` as a float.
pub fn effectiveness(move_type: Type, defender_types: &TypeSet) -> f64 {
    effectiveness_modifier(move_type, defender_types).value()
}

/// Name-based effectiveness lookup.
///
/// Names are matched case-insensitively. An unknown attacking or defending
/// type contributes a neutral 1x.
pub fn effectiveness_by_name<T: AsRef<str>>(move_type: &str, defender_types: &[T]) -> f64 {
    let Some(attacking) = Type::from_str(move_type) else {
        tracing::debug!(move_type, "unknown attacking type, treating as neutral");
        return 1.0;
    };

    defender_types
        .iter()
        .filter_map(|name| {
            let parsed = Type::from_str(name.as_ref());
            if parsed.is_none() {
                tracing::debug!(defender_type = name.as_ref(), "unknown defending type, treating as neutral");
            }
            parsed
        })
        .map(|def| TYPE_CHART[attacking as usize][def as usize].modifier())
        .product::<Modifier>()
        .value()
}

// ============================================================================
// Type sets
// ============================================================================

/// The one or two types of a combatant.
///
/// An empty set is allowed: it is what remains when every type name in the
/// data was unrecognised, and it takes neutral damage from everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TypeSet {
    primary: Option<Type>,
    secondary: Option<Type>,
}

impl TypeSet {
    pub const fn single(t: Type) -> Self {
        Self {
            primary: Some(t),
            secondary: None,
        }
    }

    pub fn dual(primary: Type, secondary: Type) -> Self {
        if primary == secondary {
            return Self::single(primary);
        }
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
        }
    }

    /// Build from up to two parsed types, skipping duplicates.
    pub fn from_types<I: IntoIterator<Item = Type>>(types: I) -> Self {
        let mut set = TypeSet::default();
        for t in types {
            match (set.primary, set.secondary) {
                (None, _) => set.primary = Some(t),
                (Some(p), None) if p != t => set.secondary = Some(t),
                _ => {}
            }
        }
        set
    }

    /// Build from type names. Unknown names are dropped.
    pub fn from_names<T: AsRef<str>>(names: &[T]) -> Self {
        Self::from_types(names.iter().filter_map(|n| {
            let parsed = Type::from_str(n.as_ref());
            if parsed.is_none() {
                tracing::debug!(type_name = n.as_ref(), "dropping unknown type name");
            }
            parsed
        }))
    }

    pub fn contains(&self, t: Type) -> bool {
        self.primary == Some(t) || self.secondary == Some(t)
    }

    pub fn iter(&self) -> impl Iterator<Item = Type> {
        self.primary.into_iter().chain(self.secondary)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }
}
