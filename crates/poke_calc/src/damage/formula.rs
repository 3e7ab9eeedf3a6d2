//! Core damage formula and rounding policy.
//!
//! Base damage is kept as an exact fraction. The only floor in the damage path
//! is the final one, per roll: `floor(base * modifier * roll / 100)`.

use super::Modifier;

/// Lowest random roll, in percent.
pub const ROLL_MIN: u8 = 85;

/// Number of random rolls (85..=100).
pub const ROLL_COUNT: usize = 16;

/// Base damage before modifiers, as an exact fraction.
///
/// Formula: `((2 * Level / 5 + 2) * Power * Attack / max(1, Defense)) / 50 + 2`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseDamage {
    num: u64,
    den: u64,
}

impl BaseDamage {
    /// # Arguments
    /// * `level` - Attacker's level
    /// * `power` - Move's base power
    /// * `attack` - Effective attack stat
    /// * `defense` - Effective defense stat (0 is treated as 1)
    pub fn new(level: u32, power: u32, attack: u32, defense: u32) -> Self {
        let defense = defense.max(1) as u64;
        // (2L/5 + 2) = (2L + 10) / 5, then / 50 and + 2 over a common denominator
        let level_factor = 2 * level as u64 + 10;
        let num = level_factor * power as u64 * attack as u64 + 500 * defense;
        let den = 250 * defense;
        Self { num, den }
    }

    pub fn value(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Damage for one roll: `floor(base * modifier * percent / 100)`.
    pub fn roll(self, modifier: Modifier, percent: u8) -> u32 {
        let num = self.num as u128 * modifier.num() as u128 * percent as u128;
        let den = self.den as u128 * modifier.den() as u128 * 100;
        (num / den).min(u32::MAX as u128) as u32
    }

    /// All 16 rolls, lowest first.
    pub fn rolls(self, modifier: Modifier) -> [u32; ROLL_COUNT] {
        let mut rolls = [0u32; ROLL_COUNT];
        for (i, slot) in rolls.iter_mut().enumerate() {
            *slot = self.roll(modifier, ROLL_MIN + i as u8);
        }
        rolls
    }
}

/// Percentage of `hp` dealt by `damage`, rounded half away from zero to one
/// decimal place.
pub fn percent_of_hp(damage: u32, hp: u32) -> f64 {
    let hp = hp.max(1) as u64;
    // tenths of a percent, rounded half up on exact integers
    let tenths = (damage as u64 * 2000 + hp) / (2 * hp);
    tenths as f64 / 10.0
}

/// `ceil(a / b)` for positive `b`.
#[inline]
pub fn div_ceil(a: u32, b: u32) -> u32 {
    let b = b.max(1);
    a / b + u32::from(a % b != 0)
}
