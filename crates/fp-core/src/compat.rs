//! Enhanced pairwise compatibility scorer.
//!
//! Consumes two complete charts plus each person's body strength, computes
//! five independent sub-scores, folds them into a weighted 0..=100
//! composite, and classifies the pair through an ordered decision tree.
//! Fully deterministic — no rng anywhere on this path — and free of side
//! effects; persisting the result is the record store's job.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::{BodyStrength, FourPillarsChart};
use crate::element::Element;
use crate::relation::{BranchRelation, branch_relation, stem_combination};

const W_YIN_YANG: f64 = 0.20;
const W_STRENGTH: f64 = 0.20;
const W_DAY_BRANCH: f64 = 0.25;
const W_USEFUL_GOD: f64 = 0.20;
const W_STEM_COMBINATION: f64 = 0.15;

/// Relationship type assigned by the classification tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipCategory {
    IdealPartner,
    GoodCooperation,
    StableRelationship,
    StimulatingRelationship,
    CautionRelationship,
    GeneralRelationship,
}

impl RelationshipCategory {
    pub fn label(self) -> &'static str {
        match self {
            RelationshipCategory::IdealPartner => "ideal_partner",
            RelationshipCategory::GoodCooperation => "good_cooperation",
            RelationshipCategory::StableRelationship => "stable_relationship",
            RelationshipCategory::StimulatingRelationship => "stimulating_relationship",
            RelationshipCategory::CautionRelationship => "caution_relationship",
            RelationshipCategory::GeneralRelationship => "general_relationship",
        }
    }
}

impl fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RelationshipCategory {
    type Err = crate::error::InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            RelationshipCategory::IdealPartner,
            RelationshipCategory::GoodCooperation,
            RelationshipCategory::StableRelationship,
            RelationshipCategory::StimulatingRelationship,
            RelationshipCategory::CautionRelationship,
            RelationshipCategory::GeneralRelationship,
        ]
        .into_iter()
        .find(|c| c.label() == s)
        .ok_or_else(|| crate::error::InvalidSymbol::new("category", s))
    }
}

/// The five sub-scores behind a composite, kept for display and for the
/// classification tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub yin_yang: f64,
    pub strength: f64,
    pub day_branch: f64,
    pub useful_god: f64,
    pub stem_combination: f64,
}

/// Result of scoring one unordered pair of charts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Weighted composite, rounded to the nearest integer.
    pub score: u8,
    pub category: RelationshipCategory,
    /// Day-branch relation, kept for display alongside its numeric weight.
    pub branch_relation: BranchRelation,
    pub breakdown: Breakdown,
}

/// Score two charts against each other.
pub fn score_pair(
    a: &FourPillarsChart,
    a_strength: BodyStrength,
    b: &FourPillarsChart,
    b_strength: BodyStrength,
) -> CompatibilityReport {
    let day_a = a.day;
    let day_b = b.day;

    let yin_yang = yin_yang_score(a, b);
    let strength = strength_score(a_strength, b_strength);

    let relation = branch_relation(day_a.branch, day_b.branch);
    let day_branch = relation.weight();

    let useful_god = (useful_god_direction(day_a.stem_element(), b)
        + useful_god_direction(day_b.stem_element(), a))
        / 2.0;

    let combined = stem_combination(day_a.stem, day_b.stem);
    let stem_combo = if combined { 100.0 } else { 50.0 };

    let breakdown = Breakdown {
        yin_yang,
        strength,
        day_branch,
        useful_god,
        stem_combination: stem_combo,
    };

    let total = (W_YIN_YANG * yin_yang
        + W_STRENGTH * strength
        + W_DAY_BRANCH * day_branch
        + W_USEFUL_GOD * useful_god
        + W_STEM_COMBINATION * stem_combo)
        .round() as u8;

    let category = classify(total, &breakdown, relation, combined);

    CompatibilityReport {
        score: total,
        category,
        branch_relation: relation,
        breakdown,
    }
}

/// Opposite Day Master polarities complement each other.
fn yin_yang_score(a: &FourPillarsChart, b: &FourPillarsChart) -> f64 {
    if a.day_master().polarity() != b.day_master().polarity() {
        100.0
    } else {
        50.0
    }
}

/// A strong/weak pairing balances; everything else (including either
/// side neutral) sits at 70.
fn strength_score(a: BodyStrength, b: BodyStrength) -> f64 {
    match (a, b) {
        (BodyStrength::Strong, BodyStrength::Weak)
        | (BodyStrength::Weak, BodyStrength::Strong) => 100.0,
        _ => 70.0,
    }
}

/// Useful-god alignment for one direction: how much of the counterpart
/// chart supplies the elements the Day Master cares about — the element
/// it generates and the element that restricts it. Matches are counted
/// over the counterpart's eight symbol slots.
fn useful_god_direction(day_master: Element, other: &FourPillarsChart) -> f64 {
    let generated = day_master.generation_target();
    let restricted = day_master.restrictor();

    let matches = other
        .symbol_elements()
        .into_iter()
        .filter(|&e| e == generated || e == restricted)
        .count();

    (matches as f64 / 8.0 * 100.0).min(100.0)
}

/// Ordered decision tree, first satisfied rule wins. The thresholds
/// overlap across rules; routing by order rather than by "best"
/// category is part of the observed contract, so two pairs with equal
/// totals can land in different buckets.
fn classify(
    total: u8,
    breakdown: &Breakdown,
    relation: BranchRelation,
    combined: bool,
) -> RelationshipCategory {
    if total >= 90
        && combined
        && relation == BranchRelation::ThreeHarmony
        && breakdown.yin_yang >= 80.0
    {
        RelationshipCategory::IdealPartner
    } else if total >= 80 && breakdown.useful_god >= 80.0 && breakdown.strength >= 80.0 {
        RelationshipCategory::GoodCooperation
    } else if total >= 70 && relation == BranchRelation::SixHarmony && breakdown.yin_yang >= 70.0 {
        RelationshipCategory::StableRelationship
    } else if total >= 60 && relation == BranchRelation::SixClash && breakdown.useful_god >= 50.0 {
        RelationshipCategory::StimulatingRelationship
    } else if total < 60
        && breakdown.yin_yang < 60.0
        && breakdown.strength < 60.0
        && breakdown.useful_god < 50.0
    {
        RelationshipCategory::CautionRelationship
    } else {
        RelationshipCategory::GeneralRelationship
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Pillar;

    fn chart(year: &str, month: &str, day: &str, hour: &str) -> FourPillarsChart {
        FourPillarsChart::new(
            year.parse::<Pillar>().unwrap(),
            month.parse::<Pillar>().unwrap(),
            day.parse::<Pillar>().unwrap(),
            hour.parse::<Pillar>().unwrap(),
        )
    }

    #[test]
    fn test_yin_yang_sub_score() {
        // jia (yang wood) vs yi (yin wood)
        let a = chart("jia-zi", "jia-zi", "jia-zi", "jia-zi");
        let b = chart("yi-chou", "yi-chou", "yi-chou", "yi-chou");
        assert_eq!(yin_yang_score(&a, &b), 100.0);
        assert_eq!(yin_yang_score(&a, &a), 50.0);
    }

    #[test]
    fn test_strength_sub_score() {
        assert_eq!(strength_score(BodyStrength::Strong, BodyStrength::Weak), 100.0);
        assert_eq!(strength_score(BodyStrength::Weak, BodyStrength::Strong), 100.0);
        assert_eq!(strength_score(BodyStrength::Strong, BodyStrength::Strong), 70.0);
        assert_eq!(strength_score(BodyStrength::Strong, BodyStrength::Neutral), 70.0);
        assert_eq!(strength_score(BodyStrength::Neutral, BodyStrength::Neutral), 70.0);
    }

    #[test]
    fn test_useful_god_sample() {
        // Day master wood cares about fire (generated) and metal (restrictor).
        // Counterpart carries exactly 2 fire and 1 metal among its eight
        // symbols: bing(fire) yin(wood) / ding(fire) mao(wood) /
        // jia(wood) zi(water) / geng(metal) hai(water) -> 3/8 -> 37.5.
        let other = chart("bing-yin", "ding-mao", "jia-zi", "geng-hai");
        let score = useful_god_direction(Element::Wood, &other);
        assert!((score - 37.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_useful_god_caps_at_100() {
        // Every slot fire for a wood day master: 8/8 generated matches.
        let other = chart("bing-si", "bing-si", "bing-si", "bing-si");
        assert_eq!(useful_god_direction(Element::Wood, &other), 100.0);
    }

    #[test]
    fn test_composite_deterministic() {
        let a = chart("jia-zi", "bing-yin", "wu-wu", "geng-shen");
        let b = chart("yi-chou", "ding-mao", "ji-wei", "xin-you");
        let first = score_pair(&a, BodyStrength::Strong, &b, BodyStrength::Weak);
        let second = score_pair(&a, BodyStrength::Strong, &b, BodyStrength::Weak);
        assert_eq!(first, second);
    }

    #[test]
    fn test_composite_in_range() {
        let a = chart("jia-zi", "bing-yin", "wu-wu", "geng-shen");
        let b = chart("yi-chou", "ding-mao", "ji-wei", "xin-you");
        let report = score_pair(&a, BodyStrength::Neutral, &b, BodyStrength::Neutral);
        assert!(report.score <= 100);
    }

    #[test]
    fn test_ideal_partner() {
        // Day masters wu/gui combine; day branches yin/wu share the fire
        // triad; polarities differ (wu yang, gui yin). Pack the rest of
        // both charts with each other's useful-god elements to push the
        // composite over 90.
        //
        // a: day master wu (earth) -> wants metal (generated) + wood
        //    (restrictor); b supplies metal/wood heavily.
        // b: day master gui (water) -> wants wood + earth; a supplies them.
        let a = chart("jia-chen", "yi-chou", "wu-yin", "jia-xu");
        let b = chart("geng-mao", "yi-mao", "gui-wu", "yi-wei");

        let report = score_pair(&a, BodyStrength::Strong, &b, BodyStrength::Weak);
        assert_eq!(report.branch_relation, BranchRelation::ThreeHarmony);
        assert!(report.score >= 90, "composite {} too low", report.score);
        assert_eq!(report.category, RelationshipCategory::IdealPartner);
    }

    #[test]
    fn test_stable_relationship() {
        // Day branches zi/chou six-harmony, polarities differ, moderate
        // useful-god supply (4/8 each way). Composite lands at 79 — no
        // stem combination keeps it out of the good-cooperation band.
        let a = chart("jia-zi", "bing-si", "jia-zi", "geng-shen");
        let b = chart("yi-chou", "ding-wu", "yi-chou", "xin-you");
        let report = score_pair(&a, BodyStrength::Strong, &b, BodyStrength::Weak);
        assert_eq!(report.branch_relation, BranchRelation::SixHarmony);
        assert_eq!(report.score, 79);
        assert_eq!(report.category, RelationshipCategory::StableRelationship);
    }

    #[test]
    fn test_stimulating_relationship() {
        // zi/wu day branches clash; counterparts supply enough useful-god
        // material to clear the 50 gate.
        // a: day master jia (wood) wants fire + metal; b carries fire and metal.
        // b: day master wu (earth) wants metal + wood; a carries wood.
        let a = chart("jia-yin", "yi-mao", "jia-zi", "yi-hai");
        let b = chart("bing-si", "geng-shen", "wu-wu", "ding-si");
        let report = score_pair(&a, BodyStrength::Strong, &b, BodyStrength::Weak);
        assert_eq!(report.branch_relation, BranchRelation::SixClash);
        assert!(
            report.breakdown.useful_god >= 50.0,
            "useful god {}",
            report.breakdown.useful_god
        );
        assert!(report.score >= 60, "composite {}", report.score);
        assert_eq!(report.category, RelationshipCategory::StimulatingRelationship);
    }

    #[test]
    fn test_general_fallback() {
        // Same polarity, same strength, ordinary day branches, no supply.
        let a = chart("jia-zi", "jia-zi", "jia-zi", "jia-zi");
        let b = chart("jia-yin", "jia-yin", "jia-yin", "jia-yin");
        let report = score_pair(&a, BodyStrength::Neutral, &b, BodyStrength::Neutral);
        assert_eq!(report.category, RelationshipCategory::GeneralRelationship);
    }

    #[test]
    fn test_equal_totals_can_classify_differently() {
        // Classification is routed by sub-score pattern, not by the
        // composite alone. Both pairs below total 79; the first satisfies
        // the stable rule (six-harmony day branches, useful-god 50), the
        // second has ordinary day branches with heavy useful-god supply
        // (93.75) and falls through to general.
        let stable_a = chart("jia-zi", "bing-si", "jia-zi", "geng-shen");
        let stable_b = chart("yi-chou", "ding-wu", "yi-chou", "xin-you");
        let stable = score_pair(&stable_a, BodyStrength::Strong, &stable_b, BodyStrength::Weak);

        let general_a = chart("ding-si", "geng-shen", "bing-si", "xin-you");
        let general_b = chart("wu-chen", "gui-hai", "yi-chen", "ji-chou");
        let general = score_pair(&general_a, BodyStrength::Strong, &general_b, BodyStrength::Weak);

        assert_eq!(stable.score, general.score, "pairs must share a composite");
        assert_eq!(stable.category, RelationshipCategory::StableRelationship);
        assert_eq!(general.category, RelationshipCategory::GeneralRelationship);
    }
}
