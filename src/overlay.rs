//! Rows for the per-feature detail overlay.
//!
//! Requirements keep the feature's declared order; issues within each
//! requirement are sorted by number. Every lookup is checked, so a document
//! with a dangling id fails here with the ids of both ends rather than
//! producing a half-rendered table.

use serde::Serialize;

use crate::errors::{DashboardError, EntityKind};
use crate::model::{FeatureDocument, IssueNumber, Status, parse_status};

/// An issue link as shown in the requirements table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueLink {
    pub number: IssueNumber,
    pub url: String,
    pub title: String,
    pub completed: bool,
}

impl IssueLink {
    pub fn css_class(&self) -> &'static str {
        if self.completed {
            "completedIssueLink"
        } else {
            "issueLink"
        }
    }
}

/// One row of the requirements table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementRow {
    pub id: String,
    pub description: String,
    pub status: Status,
    pub issues: Vec<IssueLink>,
}

/// Resolve the requirements table for `feature_id`.
pub fn requirements_for(
    document: &FeatureDocument,
    feature_id: &str,
) -> Result<Vec<RequirementRow>, DashboardError> {
    let feature = document.feature(feature_id)?;

    feature
        .requirements
        .iter()
        .map(|requirement_id| {
            let requirement = document.requirement_of(feature_id, requirement_id)?;
            let status = parse_status(EntityKind::Requirement, requirement_id, &requirement.status)?;

            let mut numbers = requirement.issues.clone();
            numbers.sort_unstable();
            let issues = numbers
                .into_iter()
                .map(|number| {
                    let issue = document.issue_of(requirement_id, number)?;
                    Ok(IssueLink {
                        number,
                        url: issue.url.clone(),
                        title: issue.title.clone(),
                        completed: issue.is_completed(),
                    })
                })
                .collect::<Result<Vec<_>, DashboardError>>()?;

            Ok(RequirementRow {
                id: requirement_id.clone(),
                description: requirement.description.clone(),
                status,
                issues,
            })
        })
        .collect()
}
