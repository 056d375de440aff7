//! Special branch and stem relation detectors.
//!
//! Small fixed tables of auspicious and inauspicious pairings:
//! three-harmony triads (三合), six-harmony pairs (六合), six-clash
//! pairs (六冲), and the five stem combinations (干合). Detection order
//! for branches is three-harmony → six-harmony → six-clash → ordinary;
//! first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::branch::EarthlyBranch;
use crate::branch::EarthlyBranch as B;
use crate::stem::HeavenlyStem;
use crate::stem::HeavenlyStem as S;

/// Three-harmony triads. Each triad shares an elemental frame:
/// shen-zi-chen (water), hai-mao-wei (wood), yin-wu-xu (fire),
/// si-you-chou (metal).
const THREE_HARMONY_TRIADS: [[EarthlyBranch; 3]; 4] = [
    [B::Shen, B::Zi, B::Chen],
    [B::Hai, B::Mao, B::Wei],
    [B::Yin, B::Wu, B::Xu],
    [B::Si, B::You, B::Chou],
];

/// Six-harmony pairs: zi-chou, yin-hai, mao-xu, chen-you, si-shen, wu-wei.
const SIX_HARMONY_PAIRS: [(EarthlyBranch, EarthlyBranch); 6] = [
    (B::Zi, B::Chou),
    (B::Yin, B::Hai),
    (B::Mao, B::Xu),
    (B::Chen, B::You),
    (B::Si, B::Shen),
    (B::Wu, B::Wei),
];

/// Six-clash pairs: zi-wu, chou-wei, yin-shen, mao-you, chen-xu, si-hai.
const SIX_CLASH_PAIRS: [(EarthlyBranch, EarthlyBranch); 6] = [
    (B::Zi, B::Wu),
    (B::Chou, B::Wei),
    (B::Yin, B::Shen),
    (B::Mao, B::You),
    (B::Chen, B::Xu),
    (B::Si, B::Hai),
];

/// Stem combinations: jia-ji, yi-geng, bing-xin, ding-ren, wu-gui.
/// Each pairs one yang stem with the yin stem five positions on.
const STEM_COMBINATION_PAIRS: [(HeavenlyStem, HeavenlyStem); 5] = [
    (S::Jia, S::Ji),
    (S::Geng, S::Yi),
    (S::Bing, S::Xin),
    (S::Ren, S::Ding),
    (S::Wu, S::Gui),
];

/// How two earthly branches relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchRelation {
    ThreeHarmony,
    SixHarmony,
    SixClash,
    Ordinary,
}

impl BranchRelation {
    /// Numeric weight fed into the compatibility composite.
    pub fn weight(self) -> f64 {
        match self {
            BranchRelation::ThreeHarmony => 100.0,
            BranchRelation::SixHarmony => 85.0,
            BranchRelation::SixClash => 60.0,
            BranchRelation::Ordinary => 50.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BranchRelation::ThreeHarmony => "three-harmony",
            BranchRelation::SixHarmony => "six-harmony",
            BranchRelation::SixClash => "six-clash",
            BranchRelation::Ordinary => "ordinary",
        }
    }
}

impl fmt::Display for BranchRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BranchRelation {
    type Err = crate::error::InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            BranchRelation::ThreeHarmony,
            BranchRelation::SixHarmony,
            BranchRelation::SixClash,
            BranchRelation::Ordinary,
        ]
        .into_iter()
        .find(|r| r.label() == s)
        .ok_or_else(|| crate::error::InvalidSymbol::new("relation", s))
    }
}

fn unordered_match(
    pairs: &[(EarthlyBranch, EarthlyBranch)],
    b1: EarthlyBranch,
    b2: EarthlyBranch,
) -> bool {
    pairs
        .iter()
        .any(|&(a, b)| (b1 == a && b2 == b) || (b1 == b && b2 == a))
}

/// True if the two branches are distinct members of the same triad.
fn in_same_triad(b1: EarthlyBranch, b2: EarthlyBranch) -> bool {
    b1 != b2
        && THREE_HARMONY_TRIADS
            .iter()
            .any(|triad| triad.contains(&b1) && triad.contains(&b2))
}

/// Classify the relation between two branches. The tables are disjoint
/// by construction, but the three-harmony → six-harmony → six-clash →
/// ordinary check order is part of the contract.
pub fn branch_relation(b1: EarthlyBranch, b2: EarthlyBranch) -> BranchRelation {
    if in_same_triad(b1, b2) {
        BranchRelation::ThreeHarmony
    } else if unordered_match(&SIX_HARMONY_PAIRS, b1, b2) {
        BranchRelation::SixHarmony
    } else if unordered_match(&SIX_CLASH_PAIRS, b1, b2) {
        BranchRelation::SixClash
    } else {
        BranchRelation::Ordinary
    }
}

/// True if the two stems form one of the five combination pairs.
pub fn stem_combination(s1: HeavenlyStem, s2: HeavenlyStem) -> bool {
    STEM_COMBINATION_PAIRS
        .iter()
        .any(|&(a, b)| (s1 == a && s2 == b) || (s1 == b && s2 == a))
}
