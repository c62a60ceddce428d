//! # Snapshot Module
//!
//! In-memory phase tables, evaluated with the same semantics as the hosted
//! lookup statement: distinct rows, branch match,
//! cutoff at or above the rank, no zero cutoffs for male-quota columns,
//! optional equality filters, ascending by cutoff.
//!
//! Ties on the cutoff are broken by the remaining columns so results are
//! deterministic.

use crate::catalog::Phase;
use crate::error::SnapshotError;
use crate::request::CutoffQuery;
use crate::row::{CutoffRecord, CutoffRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cutoff records keyed by phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    phases: BTreeMap<Phase, Vec<CutoffRecord>>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a snapshot from JSON: `{"<phase code>": [record, ...], ...}`.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Append a record to a phase table.
    pub fn insert(&mut self, phase: Phase, record: CutoffRecord) {
        self.phases.entry(phase).or_default().push(record);
    }

    /// Records in one phase table.
    #[must_use]
    pub fn records(&self, phase: Phase) -> &[CutoffRecord] {
        self.phases.get(&phase).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total records across all phases.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.phases.values().map(Vec::len).sum()
    }

    /// Run a lookup against the in-memory tables.
    #[must_use]
    pub fn evaluate(&self, query: &CutoffQuery) -> Vec<CutoffRow> {
        let mut rows: Vec<CutoffRow> = self
            .records(query.phase)
            .iter()
            .filter(|r| matches(r, query))
            .filter_map(|r| r.to_row(query.category))
            .collect();

        rows.sort_by(|a, b| a.last_rank.cmp(&b.last_rank).then_with(|| a.cmp(b)));
        rows.dedup();
        rows
    }
}

fn matches(record: &CutoffRecord, query: &CutoffQuery) -> bool {
    let Some(cutoff) = record.cutoff(query.category) else {
        return false;
    };
    if record.branch.as_deref() != Some(query.branch.code()) || cutoff < query.rank {
        return false;
    }
    if query.category.is_boys() && cutoff == 0 {
        return false;
    }

    eq_filter(record.college_type.as_deref(), query.college_type.map(|t| t.code()))
        && eq_filter(record.coed.as_deref(), query.coed.map(|c| c.code()))
        && eq_filter(
            record.affiliated.as_deref(),
            query.affiliation.map(|a| a.code()),
        )
}

/// An unset filter matches anything; a set one requires equality (NULL never matches).
fn eq_filter(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => value == Some(w),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Affiliation, Branch, Category, Coed, CollegeType};

    fn record(code: &str, branch: &str, kind: &str, coed: &str, aff: &str) -> CutoffRecord {
        CutoffRecord {
            inst_code: Some(code.to_string()),
            institute_name: Some(format!("{code} COLLEGE")),
            place: Some("HYDERABAD".to_string()),
            branch: Some(branch.to_string()),
            branch_name: Some(format!("{branch} BRANCH")),
            tuition_fee: Some(100_000),
            affiliated: Some(aff.to_string()),
            college_type: Some(kind.to_string()),
            coed: Some(coed.to_string()),
            cutoffs: BTreeMap::new(),
        }
    }

    fn with_cutoff(mut r: CutoffRecord, category: Category, value: Option<i64>) -> CutoffRecord {
        r.cutoffs.insert(category, value);
        r
    }

    fn fixture() -> Snapshot {
        let phase = Phase::FinalPhase2023;
        let mut s = Snapshot::new();
        s.insert(
            phase,
            with_cutoff(record("AAA", "CSE", "PVT", "COED", "OU"), Category::OcBoys, Some(3000)),
        );
        s.insert(
            phase,
            with_cutoff(record("BBB", "CSE", "UNIV", "COED", "JNTUH"), Category::OcBoys, Some(1200)),
        );
        s.insert(
            phase,
            with_cutoff(record("CCC", "CSE", "PVT", "GIRLS", "JNTUH"), Category::OcBoys, Some(0)),
        );
        s.insert(
            phase,
            with_cutoff(record("DDD", "CSE", "SF", "COED", "KU"), Category::OcBoys, Some(9000)),
        );
        // exact duplicate of AAA
        s.insert(
            phase,
            with_cutoff(record("AAA", "CSE", "PVT", "COED", "OU"), Category::OcBoys, Some(3000)),
        );
        s.insert(
            phase,
            with_cutoff(record("EEE", "ECE", "PVT", "COED", "OU"), Category::OcBoys, Some(5000)),
        );
        s.insert(
            phase,
            with_cutoff(record("FFF", "CSE", "PVT", "COED", "OU"), Category::OcBoys, None),
        );
        s
    }

    fn codes(rows: &[CutoffRow]) -> Vec<&str> {
        rows.iter().filter_map(|r| r.inst_code.as_deref()).collect()
    }

    fn query(rank: i64) -> CutoffQuery {
        CutoffQuery::new(rank, Category::OcBoys, Branch::Cse, Phase::FinalPhase2023)
    }

    #[test]
    fn evaluate_filters_and_orders() {
        let rows = fixture().evaluate(&query(1000));
        assert_eq!(codes(&rows), vec!["BBB", "AAA", "DDD"]);
        assert!(rows.windows(2).all(|w| w[0].last_rank <= w[1].last_rank));
    }

    #[test]
    fn evaluate_applies_rank_threshold() {
        let rows = fixture().evaluate(&query(3000));
        assert_eq!(codes(&rows), vec!["AAA", "DDD"]);
    }

    #[test]
    fn zero_cutoff_excluded_for_boys() {
        let rows = fixture().evaluate(&query(0));
        assert!(!codes(&rows).contains(&"CCC"));
    }

    #[test]
    fn zero_cutoff_kept_for_other_categories() {
        let mut s = Snapshot::new();
        s.insert(
            Phase::FinalPhase2023,
            with_cutoff(record("ZZZ", "CSE", "PVT", "COED", "OU"), Category::OcGirls, Some(0)),
        );
        let q = CutoffQuery {
            category: Category::OcGirls,
            ..query(0)
        };
        assert_eq!(codes(&s.evaluate(&q)), vec!["ZZZ"]);
    }

    #[test]
    fn optional_filters_restrict() {
        let s = fixture();

        let rows = s.evaluate(&query(1).with_college_type(CollegeType::Private));
        assert_eq!(codes(&rows), vec!["AAA"]);

        let rows = s.evaluate(&query(1).with_affiliation(Affiliation::Jntuh));
        assert_eq!(codes(&rows), vec!["BBB"]);

        let rows = s.evaluate(&query(1).with_coed(Coed::Girls));
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_phase_is_empty() {
        let q = CutoffQuery {
            phase: Phase::FirstPhase2022,
            ..query(1)
        };
        assert!(fixture().evaluate(&q).is_empty());
        assert!(fixture().records(Phase::FirstPhase2022).is_empty());
    }

    #[test]
    fn decode_from_json() {
        let json = br#"{
            "first_phase_2022": [
                {"INST_CODE": "X", "BRANCH": "CIV", "OC_GIRLS": 40}
            ]
        }"#;
        let snapshot = Snapshot::from_json_slice(json);
        assert!(snapshot.is_ok());
        let snapshot = snapshot.unwrap_or_default();
        assert_eq!(snapshot.record_count(), 1);

        let q = CutoffQuery::new(1, Category::OcGirls, Branch::Civ, Phase::FirstPhase2022);
        assert_eq!(snapshot.evaluate(&q).len(), 1);
    }

    #[test]
    fn decode_rejects_unknown_phase() {
        let json = br#"{"final_phase_2030": []}"#;
        assert!(Snapshot::from_json_slice(json).is_err());
    }
}
