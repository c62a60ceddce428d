//! # Row Types
//!
//! [`CutoffRow`] is the response payload, one per distinct institute/branch
//! match. [`CutoffRecord`] is a raw table record as held by a [`Snapshot`].
//!
//! JSON keys keep the table's column names so the grid fields line up with
//! what the hosted tables return.
//!
//! [`Snapshot`]: crate::snapshot::Snapshot

use crate::catalog::Category;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CutoffRow {
    #[serde(rename = "INST_CODE")]
    pub inst_code: Option<String>,
    #[serde(rename = "INSTITUTE_NAME")]
    pub institute_name: Option<String>,
    #[serde(rename = "PLACE")]
    pub place: Option<String>,
    #[serde(rename = "BRANCH_NAME")]
    pub branch_name: Option<String>,
    #[serde(rename = "TUITION_FEE")]
    pub tuition_fee: Option<i64>,
    #[serde(rename = "AFFILIATED")]
    pub affiliated: Option<String>,
    /// Cutoff rank in the requested category column.
    pub last_rank: i64,
}

/// A raw phase-table record.
///
/// Category columns sit alongside the descriptive columns, as in the hosted
/// tables; a `null` cutoff means the column is empty for that row. Columns
/// that are neither descriptive nor a known category (`DIST`, `ESTD`, ...)
/// are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffRecord {
    #[serde(rename = "INST_CODE", default)]
    pub inst_code: Option<String>,
    #[serde(rename = "INSTITUTE_NAME", default)]
    pub institute_name: Option<String>,
    #[serde(rename = "PLACE", default)]
    pub place: Option<String>,
    #[serde(rename = "BRANCH", default)]
    pub branch: Option<String>,
    #[serde(rename = "BRANCH_NAME", default)]
    pub branch_name: Option<String>,
    #[serde(rename = "TUITION_FEE", default)]
    pub tuition_fee: Option<i64>,
    #[serde(rename = "AFFILIATED", default)]
    pub affiliated: Option<String>,
    #[serde(rename = "TYPE", default)]
    pub college_type: Option<String>,
    #[serde(rename = "COED", default)]
    pub coed: Option<String>,
    #[serde(flatten, deserialize_with = "category_columns")]
    pub cutoffs: BTreeMap<Category, Option<i64>>,
}

/// Keep only the category columns of a flattened record.
fn category_columns<'de, D>(deserializer: D) -> Result<BTreeMap<Category, Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let columns = BTreeMap::<String, Value>::deserialize(deserializer)?;
    let mut cutoffs = BTreeMap::new();
    for (name, value) in columns {
        let Some(category) = Category::from_code(&name) else {
            continue;
        };
        let cutoff = match value {
            Value::Null => None,
            Value::Number(n) => Some(n.as_i64().ok_or_else(|| {
                D::Error::custom(format!("cutoff {name} is not an integer: {n}"))
            })?),
            other => {
                return Err(D::Error::custom(format!(
                    "cutoff {name} is not a number: {other}"
                )));
            }
        };
        cutoffs.insert(category, cutoff);
    }
    Ok(cutoffs)
}

impl CutoffRecord {
    /// Cutoff in the given category column, if present and non-null.
    #[must_use]
    pub fn cutoff(&self, category: Category) -> Option<i64> {
        self.cutoffs.get(&category).copied().flatten()
    }

    /// Project into a result row using `category` as the cutoff column.
    #[must_use]
    pub fn to_row(&self, category: Category) -> Option<CutoffRow> {
        Some(CutoffRow {
            inst_code: self.inst_code.clone(),
            institute_name: self.institute_name.clone(),
            place: self.place.clone(),
            branch_name: self.branch_name.clone(),
            tuition_fee: self.tuition_fee,
            affiliated: self.affiliated.clone(),
            last_rank: self.cutoff(category)?,
        })
    }
}
