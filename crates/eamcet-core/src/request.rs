//! # Request Module
//!
//! Turns raw form fields into a checked [`CutoffQuery`].
//!
//! Fields are checked in form order (rank, category, branch, phase, type,
//! coed, affiliation) and the first failure wins. Required fields reject the
//! empty string; optional filters treat it as "not set".

use crate::catalog::{Affiliation, Branch, Category, Coed, CollegeType, Phase};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

// =============================================================================
// RAW FORM
// =============================================================================

/// Form fields exactly as submitted. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictForm {
    pub rank: String,
    pub category: String,
    pub branch: String,
    #[serde(rename = "lastRank")]
    pub phase: String,
    #[serde(rename = "type")]
    pub college_type: String,
    pub coed: String,
    pub affiliated: String,
}

impl PredictForm {
    /// Validate every field and produce a query.
    pub fn validate(&self) -> Result<CutoffQuery, ValidationError> {
        let rank = parse_rank(&self.rank).ok_or(ValidationError::Rank)?;
        let category = Category::from_code(&self.category).ok_or(ValidationError::Category)?;
        let branch = Branch::from_code(&self.branch).ok_or(ValidationError::Branch)?;
        let phase = Phase::from_code(&self.phase).ok_or(ValidationError::Phase)?;
        let college_type = optional(
            &self.college_type,
            CollegeType::from_code,
            ValidationError::CollegeType,
        )?;
        let coed = optional(&self.coed, Coed::from_code, ValidationError::Coed)?;
        let affiliation = optional(
            &self.affiliated,
            Affiliation::from_code,
            ValidationError::Affiliation,
        )?;

        Ok(CutoffQuery {
            rank,
            category,
            branch,
            phase,
            college_type,
            coed,
            affiliation,
        })
    }
}

/// `^\d+$` over ASCII digits, and the value must fit the bind type.
fn parse_rank(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn optional<T>(
    raw: &str,
    parse: fn(&str) -> Option<T>,
    err: ValidationError,
) -> Result<Option<T>, ValidationError> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse(raw).map(Some).ok_or(err)
}

// =============================================================================
// VALIDATED QUERY
// =============================================================================

/// A fully validated lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoffQuery {
    /// Student rank; rows with a cutoff at or above it qualify.
    pub rank: i64,
    pub category: Category,
    pub branch: Branch,
    pub phase: Phase,
    pub college_type: Option<CollegeType>,
    pub coed: Option<Coed>,
    pub affiliation: Option<Affiliation>,
}

impl CutoffQuery {
    /// Create a query with no optional filters.
    #[must_use]
    pub fn new(rank: i64, category: Category, branch: Branch, phase: Phase) -> Self {
        Self {
            rank,
            category,
            branch,
            phase,
            college_type: None,
            coed: None,
            affiliation: None,
        }
    }

    #[must_use]
    pub fn with_college_type(mut self, college_type: CollegeType) -> Self {
        self.college_type = Some(college_type);
        self
    }

    #[must_use]
    pub fn with_coed(mut self, coed: Coed) -> Self {
        self.coed = Some(coed);
        self
    }

    #[must_use]
    pub fn with_affiliation(mut self, affiliation: Affiliation) -> Self {
        self.affiliation = Some(affiliation);
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_form() -> PredictForm {
        PredictForm {
            rank: "2500".to_string(),
            category: "OC_BOYS".to_string(),
            branch: "CSE".to_string(),
            phase: "final_phase_2023".to_string(),
            ..PredictForm::default()
        }
    }

    #[test]
    fn valid_form_without_filters() {
        let query = valid_form().validate();
        assert_eq!(
            query,
            Ok(CutoffQuery::new(
                2500,
                Category::OcBoys,
                Branch::Cse,
                Phase::FinalPhase2023
            ))
        );
    }

    #[test]
    fn valid_form_with_filters() {
        let form = PredictForm {
            college_type: "PVT".to_string(),
            coed: "COED".to_string(),
            affiliated: "SR UNIVERSITY".to_string(),
            ..valid_form()
        };
        let query = form.validate();
        let expected = CutoffQuery::new(2500, Category::OcBoys, Branch::Cse, Phase::FinalPhase2023)
            .with_college_type(CollegeType::Private)
            .with_coed(Coed::Coed)
            .with_affiliation(Affiliation::SrUniversity);
        assert_eq!(query, Ok(expected));
    }

    #[test]
    fn rank_rejections() {
        for bad in ["", "-1", "1.5", " 12", "12 ", "1e3", "abc", "+5", "١٢"] {
            let form = PredictForm {
                rank: bad.to_string(),
                ..valid_form()
            };
            assert_eq!(form.validate(), Err(ValidationError::Rank), "rank {bad:?}");
        }
    }

    #[test]
    fn rank_zero_and_leading_zeros_accepted() {
        let form = PredictForm {
            rank: "0".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().map(|q| q.rank), Ok(0));

        let form = PredictForm {
            rank: "000123".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().map(|q| q.rank), Ok(123));
    }

    #[test]
    fn rank_overflow_rejected() {
        let form = PredictForm {
            rank: "99999999999999999999".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Rank));
    }

    #[test]
    fn required_fields_rejected_when_empty() {
        let form = PredictForm {
            category: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Category));

        let form = PredictForm {
            branch: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Branch));

        let form = PredictForm {
            phase: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Phase));
    }

    #[test]
    fn optional_fields_rejected_when_unknown() {
        let form = PredictForm {
            college_type: "PRIVATE".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::CollegeType));

        let form = PredictForm {
            coed: "BOYS".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Coed));

        let form = PredictForm {
            affiliated: "ou".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Affiliation));
    }

    #[test]
    fn first_failure_wins() {
        let form = PredictForm {
            rank: "x".to_string(),
            branch: "NOPE".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Rank));

        let form = PredictForm {
            branch: "NOPE".to_string(),
            coed: "NOPE".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Branch));
    }

    #[test]
    fn form_field_names() {
        let json = r#"{"rank":"10","category":"SC_GIRLS","branch":"ECE","lastRank":"first_phase_2022","type":"GOV"}"#;
        let form: Result<PredictForm, _> = serde_json::from_str(json);
        let query = form.ok().map(|f| f.validate());
        let expected = CutoffQuery::new(10, Category::ScGirls, Branch::Ece, Phase::FirstPhase2022)
            .with_college_type(CollegeType::Government);
        assert_eq!(query, Some(Ok(expected)));
    }

    #[test]
    fn error_fields() {
        assert_eq!(ValidationError::Phase.field(), "lastRank");
        assert_eq!(ValidationError::CollegeType.to_string(), "Invalid Type Input");
    }

    proptest! {
        #[test]
        fn any_non_digit_rank_is_rejected(rank in ".*[^0-9].*") {
            let form = PredictForm { rank, ..valid_form() };
            prop_assert_eq!(form.validate(), Err(ValidationError::Rank));
        }

        #[test]
        fn any_digit_rank_in_range_is_accepted(rank in 0i64..=i64::MAX) {
            let form = PredictForm { rank: rank.to_string(), ..valid_form() };
            prop_assert_eq!(form.validate().map(|q| q.rank), Ok(rank));
        }

        #[test]
        fn unknown_categories_are_rejected(category in "[A-Z_]{1,14}") {
            prop_assume!(Category::from_code(&category).is_none());
            let form = PredictForm { category, ..valid_form() };
            prop_assert_eq!(form.validate(), Err(ValidationError::Category));
        }

        #[test]
        fn unknown_branches_are_rejected(branch in "[A-Za-z]{1,4}") {
            prop_assume!(Branch::from_code(&branch).is_none());
            let form = PredictForm { branch, ..valid_form() };
            prop_assert_eq!(form.validate(), Err(ValidationError::Branch));
        }

        #[test]
        fn unknown_phases_are_rejected(phase in "[a-z_0-9]{1,20}") {
            prop_assume!(Phase::from_code(&phase).is_none());
            let form = PredictForm { phase, ..valid_form() };
            prop_assert_eq!(form.validate(), Err(ValidationError::Phase));
        }
    }
}
