//! Input document model: features, requirements and issues.
//!
//! The document is parsed once per render pass and never mutated by the
//! aggregation, layout or rendering code. Status fields are kept as the raw
//! strings found in the input so that an unrecognised value can be reported
//! with the id of the record that carries it.
//!
//! ```json
//! {
//!   "features": {
//!     "psm-feature-000": {
//!       "description": "Search by member id",
//!       "status": "InProgress",
//!       "startDate": "2018-03-01",
//!       "completedDate": null,
//!       "requirements": ["psm-FR-8.2", "psm-FR-8.3"]
//!     }
//!   },
//!   "requirements": {
//!     "psm-FR-8.2": { "description": "...", "status": "Completed", "issues": [12, 4] }
//!   },
//!   "issues": {
//!     "4": { "url": "https://tracker/4", "title": "Index members", "status": "Completed" }
//!   }
//! }
//! ```

pub mod status;

pub use status::Status;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{DashboardError, EntityKind, SourceError};

/// Issue numbers are the integer keys of the `issues` map.
pub type IssueNumber = u64;

/// A trackable unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// A specification item linked to tracker issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub issues: Vec<IssueNumber>,
}

/// An external tracker ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

impl Issue {
    /// Tracker statuses are free-form; only an exact `Completed`
    /// (or its legacy alias) counts as done.
    pub fn is_completed(&self) -> bool {
        matches!(self.status.parse::<Status>(), Ok(Status::Completed))
    }
}

/// The parsed input document.
///
/// `features` keeps document order, which is the final tie-break when
/// ordering bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureDocument {
    pub features: IndexMap<String, Feature>,
    #[serde(default)]
    pub requirements: IndexMap<String, Requirement>,
    #[serde(default)]
    pub issues: BTreeMap<IssueNumber, Issue>,
}

impl FeatureDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Checked feature lookup.
    pub fn feature(&self, id: &str) -> Result<&Feature, DashboardError> {
        self.features
            .get(id)
            .ok_or_else(|| DashboardError::UnknownFeature { id: id.to_string() })
    }

    /// Checked requirement lookup on behalf of `feature_id`.
    pub fn requirement_of(
        &self,
        feature_id: &str,
        requirement_id: &str,
    ) -> Result<&Requirement, DashboardError> {
        self.requirements
            .get(requirement_id)
            .ok_or_else(|| DashboardError::DanglingReference {
                from_kind: EntityKind::Feature,
                from_id: feature_id.to_string(),
                to_kind: EntityKind::Requirement,
                to_id: requirement_id.to_string(),
            })
    }

    /// Checked issue lookup on behalf of `requirement_id`.
    pub fn issue_of(
        &self,
        requirement_id: &str,
        number: IssueNumber,
    ) -> Result<&Issue, DashboardError> {
        self.issues
            .get(&number)
            .ok_or_else(|| DashboardError::DanglingReference {
                from_kind: EntityKind::Requirement,
                from_id: requirement_id.to_string(),
                to_kind: EntityKind::Issue,
                to_id: number.to_string(),
            })
    }

    /// Every dangling reference in the document, features first.
    pub fn check_references(&self) -> Vec<DashboardError> {
        let mut problems = Vec::new();
        for (feature_id, feature) in &self.features {
            for requirement_id in &feature.requirements {
                if let Err(e) = self.requirement_of(feature_id, requirement_id) {
                    problems.push(e);
                }
            }
        }
        for (requirement_id, requirement) in &self.requirements {
            for number in &requirement.issues {
                if let Err(e) = self.issue_of(requirement_id, *number) {
                    problems.push(e);
                }
            }
        }
        problems
    }
}

/// Resolve a raw status string, naming the record on failure.
pub fn parse_status(entity: EntityKind, id: &str, raw: &str) -> Result<Status, DashboardError> {
    raw.parse().map_err(|value| DashboardError::UnknownStatus {
        entity,
        id: id.to_string(),
        value,
    })
}
