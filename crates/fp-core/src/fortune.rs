//! Daily fortune scorer.
//!
//! Scores one person's element against a day pillar. The baseline
//! algorithm weighs the stem affinity at 0.6 and the branch affinity at
//! 0.4, maps the 0..=5 scale up, then compresses by ⅔ — the compression
//! is applied after the first rounding, not before. Alternative
//! balance-aware algorithms plug in behind [`FortuneAlgorithm`] and
//! produce the same result shape, so callers never know which path ran.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::affinity::affinity;
use crate::chart::Pillar;
use crate::element::Element;

const STEM_WEIGHT: f64 = 0.6;
const BRANCH_WEIGHT: f64 = 0.4;

/// Fortune bucket derived from the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FortuneGrade {
    Excellent,
    Good,
    Neutral,
    Poor,
    Bad,
}

impl FortuneGrade {
    pub fn label(self) -> &'static str {
        match self {
            FortuneGrade::Excellent => "excellent",
            FortuneGrade::Good => "good",
            FortuneGrade::Neutral => "neutral",
            FortuneGrade::Poor => "poor",
            FortuneGrade::Bad => "bad",
        }
    }

    /// Bucket thresholds, checked in this order: the high bands first,
    /// then the low bands, neutral as the fallthrough.
    pub fn for_score(score: u8) -> FortuneGrade {
        if score >= 80 {
            FortuneGrade::Excellent
        } else if score >= 60 {
            FortuneGrade::Good
        } else if score <= 20 {
            FortuneGrade::Bad
        } else if score <= 40 {
            FortuneGrade::Poor
        } else {
            FortuneGrade::Neutral
        }
    }
}

impl fmt::Display for FortuneGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One daily fortune result. Computed fresh on every request; nothing
/// here persists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneReading {
    pub score: u8,
    pub stem_element: Element,
    pub branch_element: Element,
    pub grade: FortuneGrade,
}

/// Strategy seam for fortune scoring. The baseline is
/// [`StandardFortune`]; a balance-aware variant can consume
/// [`crate::chart::ElementTally`] and swap in without changing callers.
pub trait FortuneAlgorithm {
    fn assess(&self, person: Element, day: Pillar) -> FortuneReading;
}

/// The baseline weighted-affinity algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFortune;

impl FortuneAlgorithm for StandardFortune {
    fn assess(&self, person: Element, day: Pillar) -> FortuneReading {
        let stem_element = day.stem_element();
        let branch_element = day.branch_element();

        let stem_compat = affinity(person, stem_element).value as f64;
        let branch_compat = affinity(person, branch_element).value as f64;

        let weighted = stem_compat * STEM_WEIGHT + branch_compat * BRANCH_WEIGHT;
        // 0..=5 maps onto roughly 50..=150 before compression.
        let preliminary = (weighted * 20.0 + 50.0).round();
        let score = ((preliminary * 2.0 / 3.0).round()).min(100.0) as u8;

        FortuneReading {
            score,
            stem_element,
            branch_element,
            grade: FortuneGrade::for_score(score),
        }
    }
}

/// Score with the baseline algorithm.
pub fn daily_fortune(person: Element, day: Pillar) -> FortuneReading {
    StandardFortune.assess(person, day)
}
