//! KO labels and OHKO probability.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};

use super::formula::{div_ceil, BaseDamage, ROLL_COUNT};
use super::Modifier;

// ============================================================================
// Labels
// ============================================================================

/// How many hits it takes to KO, best case to worst case.
///
/// A total of zero counts as one point of damage, so a move that can't
/// scratch the defender reads as needing `hp` hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KoLabel {
    /// The best roll KOs in one hit.
    Ohko,
    /// Best and worst case agree.
    Exact(u32),
    /// Best case to worst case.
    Range(u32, u32),
}

impl KoLabel {
    pub fn from_totals(hp: u32, min_total: u32, max_total: u32) -> Self {
        let best = div_ceil(hp, max_total.max(1));
        if best <= 1 {
            return KoLabel::Ohko;
        }
        let worst = div_ceil(hp, min_total.max(1));
        if best == worst {
            KoLabel::Exact(best)
        } else {
            KoLabel::Range(best, worst)
        }
    }

    /// Hits needed in the best case.
    pub fn best_case(self) -> u32 {
        match self {
            KoLabel::Ohko => 1,
            KoLabel::Exact(n) | KoLabel::Range(n, _) => n,
        }
    }
}

impl fmt::Display for KoLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KoLabel::Ohko => f.write_str("OHKO"),
            KoLabel::Exact(n) => write!(f, "{n}HKO"),
            KoLabel::Range(best, worst) => write!(f, "{best}–{worst}HKO"),
        }
    }
}

impl Serialize for KoLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether the attack KOs from full HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum KoVerdict {
    /// Even the lowest total KOs.
    Guaranteed,
    /// Only the higher totals KO.
    Possible,
    No,
}

impl KoVerdict {
    pub fn from_totals(hp: u32, min_total: u32, max_total: u32) -> Self {
        if min_total >= hp {
            KoVerdict::Guaranteed
        } else if max_total >= hp {
            KoVerdict::Possible
        } else {
            KoVerdict::No
        }
    }
}

// ============================================================================
// Distributions
// ============================================================================

/// Damage totals with their number of outcomes. Every roll is equally likely.
///
/// Counts are kept as `f64`: they grow as 16^hits and stay exact up to 2^53.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RollDistribution {
    counts: BTreeMap<u32, f64>,
    outcomes: f64,
}

impl RollDistribution {
    pub fn from_rolls(rolls: &[u32]) -> Self {
        let mut counts = BTreeMap::new();
        for &r in rolls {
            *counts.entry(r).or_insert(0.0) += 1.0;
        }
        Self {
            counts,
            outcomes: rolls.len() as f64,
        }
    }

    /// Zero hits: a single outcome dealing nothing.
    pub fn nothing() -> Self {
        Self {
            counts: BTreeMap::from([(0, 1.0)]),
            outcomes: 1.0,
        }
    }

    /// Distribution of the sum of one draw from each.
    pub fn convolve(&self, other: &RollDistribution) -> RollDistribution {
        let mut counts = BTreeMap::new();
        for (&a, &ca) in &self.counts {
            for (&b, &cb) in &other.counts {
                *counts.entry(a.saturating_add(b)).or_insert(0.0) += ca * cb;
            }
        }
        RollDistribution {
            counts,
            outcomes: self.outcomes * other.outcomes,
        }
    }

    /// P(total >= threshold)
    pub fn probability_at_least(&self, threshold: u32) -> f64 {
        if self.outcomes == 0.0 {
            return 0.0;
        }
        let hits: f64 = self.counts.range(threshold..).map(|(_, &c)| c).sum();
        hits / self.outcomes
    }

    pub fn outcomes(&self) -> f64 {
        self.outcomes
    }
}

/// OHKO probability estimator.
///
/// Keeps the per-hit distribution and every convolution built so far, so one
/// estimator can answer many HP thresholds and hit weightings.
#[derive(Clone, Debug)]
pub struct KoEstimator {
    per_hit: RollDistribution,
    cache: HashMap<u8, RollDistribution>,
}

impl KoEstimator {
    pub fn new(rolls: &[u32]) -> Self {
        Self {
            per_hit: RollDistribution::from_rolls(rolls),
            cache: HashMap::new(),
        }
    }

    pub fn from_base(base: BaseDamage, modifier: Modifier) -> Self {
        let rolls: [u32; ROLL_COUNT] = base.rolls(modifier);
        Self::new(&rolls)
    }

    /// Distribution of the total over `hits` hits.
    pub fn distribution(&mut self, hits: u8) -> &RollDistribution {
        match hits {
            0 => return self.cache.entry(0).or_insert_with(RollDistribution::nothing),
            1 => return &self.per_hit,
            _ => {}
        }

        if !self.cache.contains_key(&hits) {
            let (mut n, mut current) = (2..hits)
                .rev()
                .find_map(|k| self.cache.get(&k).map(|d| (k, d.clone())))
                .unwrap_or_else(|| (1, self.per_hit.clone()));
            while n < hits {
                current = current.convolve(&self.per_hit);
                n += 1;
                if n < hits {
                    self.cache.insert(n, current.clone());
                }
            }
            self.cache.insert(hits, current);
        }

        self.cache.entry(hits).or_default()
    }

    /// Probability that the total damage reaches `hp`, weighted over hit counts.
    pub fn probability(&mut self, hp: u32, weights: &[(u8, f64)]) -> f64 {
        let p: f64 = weights
            .iter()
            .map(|&(hits, weight)| weight * self.distribution(hits).probability_at_least(hp))
            .sum();
        p.clamp(0.0, 1.0)
    }
}

/// One-off OHKO probability.
pub fn ohko_probability(base: BaseDamage, modifier: Modifier, hp: u32, weights: &[(u8, f64)]) -> f64 {
    KoEstimator::from_base(base, modifier).probability(hp, weights)
}
