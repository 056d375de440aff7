//! Four-pillars (Bazi) element compatibility and fortune scoring engine.
//!
//! A fixed domain model of astrological primitives — ten heavenly stems,
//! twelve earthly branches, five elements with generation and restriction
//! cycles — plus the detectors and scorers built on top of it: special
//! branch/stem relation detection, a basic pairwise element scorer, the
//! enhanced five-factor compatibility scorer with its decision-tree
//! classifier, and the daily fortune scorer.
//!
//! Zero I/O — pure scoring engine with no opinions about transport or
//! persistence. The only randomness lives in the simple-compatibility
//! path and is caller-injected; everything else is deterministic.

pub mod affinity;
pub mod branch;
pub mod chart;
pub mod compat;
pub mod element;
pub mod error;
pub mod fortune;
pub mod relation;
pub mod stem;

pub use affinity::{
    Affinity, AffinityKind, SimpleRelationship, affinity, simple_relationship, simple_score,
};
pub use branch::EarthlyBranch;
pub use chart::{BodyStrength, ElementTally, FourPillarsChart, Pillar, PillarPosition};
pub use compat::{Breakdown, CompatibilityReport, RelationshipCategory, score_pair};
pub use element::{Element, Polarity};
pub use error::InvalidSymbol;
pub use fortune::{
    FortuneAlgorithm, FortuneGrade, FortuneReading, StandardFortune, daily_fortune,
};
pub use relation::{BranchRelation, branch_relation, stem_combination};
pub use stem::HeavenlyStem;
