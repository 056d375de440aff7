use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use fp_core::{
    BodyStrength, Breakdown, FortuneReading, FourPillarsChart, Pillar, PillarPosition,
    daily_fortune, score_pair,
};

use crate::error::{Result, StoreError};
use crate::record::{CompatibilityRecord, canonical_pair};
use crate::schema;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Charts ---

    /// Persist a chart, replacing any previous pillars for the person.
    pub fn save_chart(&self, person_id: &str, chart: &FourPillarsChart) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM charts WHERE person_id = ?1", [person_id])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO charts (person_id, position, stem, branch) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for position in PillarPosition::ALL {
                let pillar = chart.pillar(position);
                stmt.execute(params![
                    person_id,
                    position.name(),
                    pillar.stem.name(),
                    pillar.branch.name(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Load a chart. A person with no rows is `NotFound`; a person with
    /// some but not all four pillars is `IncompleteChart` — partial
    /// charts are rejected here, never silently defaulted.
    pub fn chart(&self, person_id: &str) -> Result<FourPillarsChart> {
        let mut stmt = self
            .conn
            .prepare("SELECT position, stem, branch FROM charts WHERE person_id = ?1")?;

        let rows: Vec<(String, String, String)> = stmt
            .query_map([person_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<std::result::Result<_, _>>()?;

        if rows.is_empty() {
            return Err(StoreError::NotFound {
                kind: "chart",
                key: person_id.to_string(),
            });
        }

        let mut pillars: [Option<Pillar>; 4] = [None; 4];
        for (position, stem, branch) in &rows {
            let position: PillarPosition = position.parse()?;
            let pillar = Pillar::new(stem.parse()?, branch.parse()?);
            let slot = match position {
                PillarPosition::Year => 0,
                PillarPosition::Month => 1,
                PillarPosition::Day => 2,
                PillarPosition::Hour => 3,
            };
            pillars[slot] = Some(pillar);
        }

        match pillars {
            [Some(year), Some(month), Some(day), Some(hour)] => {
                Ok(FourPillarsChart::new(year, month, day, hour))
            }
            _ => Err(StoreError::IncompleteChart {
                person: person_id.to_string(),
                pillars: rows.len(),
            }),
        }
    }

    // --- Body strength ---

    pub fn set_strength(&self, person_id: &str, strength: BodyStrength) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO strengths (person_id, classification) VALUES (?1, ?2)",
            params![person_id, strength.name()],
        )?;
        Ok(())
    }

    /// Missing classification degrades to neutral rather than failing —
    /// strength is advisory input, not a hard prerequisite.
    pub fn strength(&self, person_id: &str) -> Result<BodyStrength> {
        let mut stmt = self
            .conn
            .prepare("SELECT classification FROM strengths WHERE person_id = ?1")?;
        let row: Option<String> = stmt.query_row([person_id], |row| row.get(0)).optional()?;
        match row {
            Some(text) => Ok(text.parse()?),
            None => Ok(BodyStrength::Neutral),
        }
    }

    // --- Day pillars ---

    pub fn set_day_pillar(&self, date: &str, pillar: Pillar) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO day_pillars (date, stem, branch) VALUES (?1, ?2, ?3)",
            params![date, pillar.stem.name(), pillar.branch.name()],
        )?;
        Ok(())
    }

    pub fn day_pillar(&self, date: &str) -> Result<Pillar> {
        let mut stmt = self
            .conn
            .prepare("SELECT stem, branch FROM day_pillars WHERE date = ?1")?;
        let row: Option<(String, String)> = stmt
            .query_row([date], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        match row {
            Some((stem, branch)) => Ok(Pillar::new(stem.parse()?, branch.parse()?)),
            None => Err(StoreError::NotFound {
                kind: "day pillar",
                key: date.to_string(),
            }),
        }
    }

    // --- Daily fortune ---

    /// Chart → day-master element → day pillar → engine reading.
    pub fn daily_fortune(&self, person_id: &str, date: &str) -> Result<FortuneReading> {
        let chart = self.chart(person_id)?;
        let pillar = self.day_pillar(date)?;
        Ok(daily_fortune(chart.day_master().element(), pillar))
    }

    // --- Compatibility records ---

    /// Look up a record by its canonical pair; the argument order does
    /// not matter.
    pub fn find_compatibility(
        &self,
        id_a: &str,
        id_b: &str,
    ) -> Result<Option<CompatibilityRecord>> {
        let (first, second) = canonical_pair(id_a, id_b);
        let mut stmt = self.conn.prepare(
            "SELECT id, subject_a, subject_b, element_a, element_b, score, category,
                    branch_relation, yin_yang, strength, day_branch, useful_god,
                    stem_combination
             FROM compatibility WHERE subject_a = ?1 AND subject_b = ?2",
        )?;

        type Row = (
            String,
            String,
            String,
            String,
            String,
            i64,
            String,
            String,
            f64,
            f64,
            f64,
            f64,
            f64,
        );
        let row: Option<Row> = stmt
            .query_row([first, second], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                    row.get(9)?,
                    row.get(10)?,
                    row.get(11)?,
                    row.get(12)?,
                ))
            })
            .optional()?;

        let Some((
            id,
            subject_a,
            subject_b,
            element_a,
            element_b,
            score,
            category,
            branch_relation,
            yin_yang,
            strength,
            day_branch,
            useful_god,
            stem_combination,
        )) = row
        else {
            return Ok(None);
        };

        Ok(Some(CompatibilityRecord {
            id: parse_uuid(&id)?,
            subject_a,
            subject_b,
            element_a: element_a.parse()?,
            element_b: element_b.parse()?,
            score: score as u8,
            category: category.parse()?,
            branch_relation: branch_relation.parse()?,
            breakdown: Breakdown {
                yin_yang,
                strength,
                day_branch,
                useful_god,
                stem_combination,
            },
        }))
    }

    /// Get-or-create for one unordered pair. A hit returns the stored
    /// record unchanged even if the charts have been edited since —
    /// staleness is accepted; recomputation is an explicit
    /// administrative action. A miss fetches both charts (surfacing
    /// `NotFound`/`IncompleteChart`), runs the enhanced scorer, and
    /// writes under the canonical key with INSERT OR IGNORE: concurrent
    /// first-time callers race, exactly one row wins, and everyone
    /// returns the winner by re-reading.
    pub fn get_or_create_compatibility(
        &self,
        id_a: &str,
        id_b: &str,
    ) -> Result<CompatibilityRecord> {
        let (first, second) = canonical_pair(id_a, id_b);

        if let Some(record) = self.find_compatibility(first, second)? {
            return Ok(record);
        }

        let chart_a = self.chart(first)?;
        let chart_b = self.chart(second)?;
        let strength_a = self.strength(first)?;
        let strength_b = self.strength(second)?;

        let report = score_pair(&chart_a, strength_a, &chart_b, strength_b);
        tracing::debug!(
            "scored pair ({first}, {second}): {} / {}",
            report.score,
            report.category
        );

        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO compatibility
                (id, subject_a, subject_b, element_a, element_b, score, category,
                 branch_relation, yin_yang, strength, day_branch, useful_god,
                 stem_combination)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                Uuid::new_v4().to_string(),
                first,
                second,
                chart_a.day_master().element().name(),
                chart_b.day_master().element().name(),
                report.score,
                report.category.label(),
                report.branch_relation.label(),
                report.breakdown.yin_yang,
                report.breakdown.strength,
                report.breakdown.day_branch,
                report.breakdown.useful_god,
                report.breakdown.stem_combination,
            ],
        )?;
        if inserted == 0 {
            tracing::debug!("lost creation race for ({first}, {second}), reading winner");
        }

        self.find_compatibility(first, second)?
            .ok_or_else(|| StoreError::InvalidData(format!("record vanished for ({first}, {second})")))
    }
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| StoreError::InvalidData(format!("invalid UUID '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::{Element, FortuneGrade, RelationshipCategory};

    fn chart(year: &str, month: &str, day: &str, hour: &str) -> FourPillarsChart {
        FourPillarsChart::new(
            year.parse::<Pillar>().unwrap(),
            month.parse::<Pillar>().unwrap(),
            day.parse::<Pillar>().unwrap(),
            hour.parse::<Pillar>().unwrap(),
        )
    }

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store
            .save_chart("alice", &chart("jia-zi", "bing-yin", "wu-wu", "geng-shen"))
            .unwrap();
        store
            .save_chart("bob", &chart("yi-chou", "ding-mao", "ji-wei", "xin-you"))
            .unwrap();
        store
    }

    #[test]
    fn test_chart_roundtrip() {
        let store = seeded_store();
        let loaded = store.chart("alice").unwrap();
        assert_eq!(loaded, chart("jia-zi", "bing-yin", "wu-wu", "geng-shen"));
    }

    #[test]
    fn test_chart_not_found() {
        let store = Store::open_in_memory().unwrap();
        match store.chart("ghost") {
            Err(StoreError::NotFound { kind, key }) => {
                assert_eq!(kind, "chart");
                assert_eq!(key, "ghost");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_chart_incomplete() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn()
            .execute_batch(
                "INSERT INTO charts (person_id, position, stem, branch) VALUES
                    ('carol', 'year', 'jia', 'zi'),
                    ('carol', 'day', 'bing', 'yin');",
            )
            .unwrap();

        match store.chart("carol") {
            Err(StoreError::IncompleteChart { person, pillars }) => {
                assert_eq!(person, "carol");
                assert_eq!(pillars, 2);
            }
            other => panic!("expected IncompleteChart, got {other:?}"),
        }
    }

    #[test]
    fn test_save_chart_replaces() {
        let store = seeded_store();
        let replacement = chart("ren-shen", "gui-you", "jia-xu", "yi-hai");
        store.save_chart("alice", &replacement).unwrap();
        assert_eq!(store.chart("alice").unwrap(), replacement);

        let count: i64 = store
            .conn()
            .query_row(
                "SELECT count(*) FROM charts WHERE person_id = 'alice'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_strength_defaults_to_neutral() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.strength("nobody").unwrap(), BodyStrength::Neutral);

        store.set_strength("alice", BodyStrength::Strong).unwrap();
        assert_eq!(store.strength("alice").unwrap(), BodyStrength::Strong);
    }

    #[test]
    fn test_day_pillar_roundtrip() {
        let store = Store::open_in_memory().unwrap();
        let pillar: Pillar = "ren-zi".parse().unwrap();
        store.set_day_pillar("2026-08-07", pillar).unwrap();
        assert_eq!(store.day_pillar("2026-08-07").unwrap(), pillar);
    }

    #[test]
    fn test_day_pillar_not_found() {
        let store = Store::open_in_memory().unwrap();
        match store.day_pillar("1999-12-31") {
            Err(StoreError::NotFound { kind, .. }) => assert_eq!(kind, "day pillar"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_daily_fortune_through_store() {
        let store = seeded_store();
        // alice's day master is wu (earth); bing-si is fire/fire —
        // generative on both slots.
        store
            .set_day_pillar("2026-08-07", "bing-si".parse().unwrap())
            .unwrap();
        let reading = store.daily_fortune("alice", "2026-08-07").unwrap();
        assert_eq!(reading.score, 87);
        assert_eq!(reading.grade, FortuneGrade::Excellent);
    }

    #[test]
    fn test_daily_fortune_requires_day_pillar() {
        let store = seeded_store();
        assert!(matches!(
            store.daily_fortune("alice", "2026-08-07"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_or_create_creates_then_reads() {
        let store = seeded_store();

        let first = store.get_or_create_compatibility("alice", "bob").unwrap();
        assert_eq!(first.subject_a, "alice");
        assert_eq!(first.subject_b, "bob");
        assert_eq!(first.element_a, Element::Earth);
        assert_eq!(first.element_b, Element::Earth);
        assert!(first.score <= 100);

        // Second call is a pure read: same row, same id, no rescore.
        let second = store.get_or_create_compatibility("alice", "bob").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_or_create_order_independent() {
        let store = seeded_store();
        let ab = store.get_or_create_compatibility("alice", "bob").unwrap();
        let ba = store.get_or_create_compatibility("bob", "alice").unwrap();
        assert_eq!(ab, ba);

        let count: i64 = store
            .conn()
            .query_row("SELECT count(*) FROM compatibility", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_or_create_returns_stale_record() {
        let store = seeded_store();
        let before = store.get_or_create_compatibility("alice", "bob").unwrap();

        // Editing a chart does not invalidate the stored record.
        store
            .save_chart("alice", &chart("ren-shen", "gui-you", "jia-xu", "yi-hai"))
            .unwrap();
        let after = store.get_or_create_compatibility("alice", "bob").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_get_or_create_conflict_falls_back_to_read() {
        let store = seeded_store();

        // Simulate a concurrent winner already holding the canonical key.
        store
            .conn()
            .execute(
                "INSERT INTO compatibility
                    (id, subject_a, subject_b, element_a, element_b, score, category,
                     branch_relation, yin_yang, strength, day_branch, useful_god,
                     stem_combination)
                 VALUES (?1, 'alice', 'bob', 'earth', 'earth', 42, 'general_relationship',
                         'ordinary', 50.0, 70.0, 50.0, 0.0, 50.0)",
                [Uuid::new_v4().to_string()],
            )
            .unwrap();

        let record = store.get_or_create_compatibility("alice", "bob").unwrap();
        assert_eq!(record.score, 42, "must observe the winner, not rescore");
    }

    #[test]
    fn test_get_or_create_missing_chart_surfaces() {
        let store = seeded_store();
        assert!(matches!(
            store.get_or_create_compatibility("alice", "ghost"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_or_create_uses_strength() {
        let store = seeded_store();
        store.set_strength("alice", BodyStrength::Strong).unwrap();
        store.set_strength("bob", BodyStrength::Weak).unwrap();

        let record = store.get_or_create_compatibility("alice", "bob").unwrap();
        assert_eq!(record.breakdown.strength, 100.0);
        // wu/ji day masters differ in polarity, day branches wu/wei are a
        // six-harmony pair, and the composite lands at 79: stable.
        assert_eq!(record.score, 79);
        assert_eq!(record.category, RelationshipCategory::StableRelationship);
    }
}
