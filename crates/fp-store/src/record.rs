use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fp_core::{BranchRelation, Breakdown, Element, RelationshipCategory};

/// Persisted compatibility result for one unordered pair of people.
///
/// Subjects are held in canonical order (`subject_a` is the
/// lexicographically smaller identifier), which is what makes
/// (A,B) and (B,A) address the same row. Once written, a record is only
/// ever read back — recomputation after a chart edit is an explicit
/// administrative action, not something the read path does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRecord {
    pub id: Uuid,
    pub subject_a: String,
    pub subject_b: String,
    /// Day-master element of each subject, canonical order.
    pub element_a: Element,
    pub element_b: Element,
    pub score: u8,
    pub category: RelationshipCategory,
    pub branch_relation: BranchRelation,
    pub breakdown: Breakdown,
}

/// Order a pair of person identifiers canonically: lexicographically
/// smaller first.
pub fn canonical_pair<'a>(id_a: &'a str, id_b: &'a str) -> (&'a str, &'a str) {
    if id_a <= id_b { (id_a, id_b) } else { (id_b, id_a) }
}
