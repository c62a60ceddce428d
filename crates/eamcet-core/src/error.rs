//! # Error Types
//!
//! Validation failures carry the exact client-facing message; the HTTP layer
//! sends `Display` output verbatim with a 400 status.

use thiserror::Error;

/// A submitted form field failed its allow-list or pattern check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Rank Input")]
    Rank,
    #[error("Invalid Category Input")]
    Category,
    #[error("Invalid Branch Input")]
    Branch,
    #[error("Invalid Phase Input")]
    Phase,
    #[error("Invalid Type Input")]
    CollegeType,
    #[error("Invalid Coed Input")]
    Coed,
    #[error("Invalid Affiliation Input")]
    Affiliation,
}

impl ValidationError {
    /// Name of the offending form field.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Category => "category",
            Self::Branch => "branch",
            Self::Phase => "lastRank",
            Self::CollegeType => "type",
            Self::Coed => "coed",
            Self::Affiliation => "affiliated",
        }
    }
}

/// A code that is not a member of the named allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code: {code:?}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

impl UnknownCode {
    pub(crate) fn new(kind: &'static str, code: &str) -> Self {
        Self {
            kind,
            code: code.to_string(),
        }
    }
}

/// Failure decoding a cutoff snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
