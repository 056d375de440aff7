//! Basic pairwise element scorer.
//!
//! Maps an ordered element pair to a 0..=5 affinity value and a coarse
//! category. Restriction is scored asymmetrically on purpose: the
//! restricting side reads 2, the restricted side 1 — which of the two
//! people counts as dominant in a restriction relationship hangs off
//! this direction.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::Element;

/// Coarse category of an ordered element pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AffinityKind {
    Same,
    Generative,
    /// The first element restricts the second.
    RestrictiveActive,
    /// The first element is restricted by the second.
    RestrictivePassive,
    Neutral,
}

impl AffinityKind {
    pub fn label(self) -> &'static str {
        match self {
            AffinityKind::Same => "same",
            AffinityKind::Generative => "generative",
            AffinityKind::RestrictiveActive => "restrictive-active",
            AffinityKind::RestrictivePassive => "restrictive-passive",
            AffinityKind::Neutral => "neutral",
        }
    }
}

impl fmt::Display for AffinityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Affinity of an ordered element pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affinity {
    pub value: u8,
    pub kind: AffinityKind,
}

/// Score `e1` against `e2`: same 5, generative (either direction) 4,
/// restricting 2, restricted 1, otherwise 3.
pub fn affinity(e1: Element, e2: Element) -> Affinity {
    if e1 == e2 {
        Affinity {
            value: 5,
            kind: AffinityKind::Same,
        }
    } else if e1.generates(e2) || e2.generates(e1) {
        Affinity {
            value: 4,
            kind: AffinityKind::Generative,
        }
    } else if e1.restricts(e2) {
        Affinity {
            value: 2,
            kind: AffinityKind::RestrictiveActive,
        }
    } else if e2.restricts(e1) {
        Affinity {
            value: 1,
            kind: AffinityKind::RestrictivePassive,
        }
    } else {
        // Unreachable with five elements, but the contract keeps the arm.
        Affinity {
            value: 3,
            kind: AffinityKind::Neutral,
        }
    }
}

/// Direction-blind collapse of the affinity categories, used by the
/// simple compatibility path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleRelationship {
    MutualGeneration,
    MutualRestriction,
    Neutral,
}

impl SimpleRelationship {
    pub fn label(self) -> &'static str {
        match self {
            SimpleRelationship::MutualGeneration => "mutual_generation",
            SimpleRelationship::MutualRestriction => "mutual_restriction",
            SimpleRelationship::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SimpleRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn simple_relationship(e1: Element, e2: Element) -> SimpleRelationship {
    match affinity(e1, e2).kind {
        AffinityKind::Generative => SimpleRelationship::MutualGeneration,
        AffinityKind::RestrictiveActive | AffinityKind::RestrictivePassive => {
            SimpleRelationship::MutualRestriction
        }
        AffinityKind::Same | AffinityKind::Neutral => SimpleRelationship::Neutral,
    }
}

/// Draw a simple compatibility score from the relationship's bucket
/// range. The jitter keeps repeated simple readings from looking
/// mechanical; callers own the rng so tests can pin a seed. The
/// enhanced scorer never touches this path.
pub fn simple_score(relationship: SimpleRelationship, rng: &mut impl Rng) -> u8 {
    match relationship {
        SimpleRelationship::MutualGeneration => rng.random_range(70..=90),
        SimpleRelationship::MutualRestriction => rng.random_range(30..=60),
        SimpleRelationship::Neutral => rng.random_range(50..=75),
    }
}
