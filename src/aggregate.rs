//! Summary statistics and bar ordering derived from the feature map.
//!
//! [`aggregate`] produces the per-status counts that feed the pie chart and
//! the ordered feature list that feeds the burn-down bars.

use std::cmp::Ordering;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::errors::{DashboardError, EntityKind};
use crate::model::{Feature, Status, parse_status};

/// Number of features in one status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub label: &'static str,
    pub count: usize,
}

/// A feature with its resolved status and display attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedFeature<'a> {
    pub id: &'a str,
    pub status: Status,
    pub percent_done: u8,
    pub feature: &'a Feature,
}

impl Serialize for AggregatedFeature<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AggregatedFeature", 7)?;
        s.serialize_field("id", self.id)?;
        s.serialize_field("description", &self.feature.description)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("percentDone", &self.percent_done)?;
        s.serialize_field("startDate", &self.feature.start_date)?;
        s.serialize_field("completedDate", &self.feature.completed_date)?;
        s.serialize_field("requirements", &self.feature.requirements)?;
        s.end()
    }
}

impl AggregatedFeature<'_> {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.feature.start_date
    }

    pub fn completed_date(&self) -> Option<NaiveDate> {
        self.feature.completed_date
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation<'a> {
    /// Always Completed, InProgress, NotStarted, in that order.
    pub status_counts: Vec<StatusCount>,
    pub ordered_features: Vec<AggregatedFeature<'a>>,
}

impl Aggregation<'_> {
    pub fn total(&self) -> usize {
        self.status_counts.iter().map(|c| c.count).sum()
    }
}

/// Resolve statuses, count them and order the features for display.
///
/// Fails on the first feature (in document order) whose status string is not
/// recognised.
pub fn aggregate(features: &IndexMap<String, Feature>) -> Result<Aggregation<'_>, DashboardError> {
    let mut ordered = Vec::with_capacity(features.len());
    for (id, feature) in features {
        let status = parse_status(EntityKind::Feature, id, &feature.status)?;
        ordered.push(AggregatedFeature {
            id: id.as_str(),
            status,
            percent_done: status.percent_done(),
            feature,
        });
    }

    let status_counts = Status::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            label: status.label(),
            count: ordered.iter().filter(|f| f.status == status).count(),
        })
        .collect();

    // sort_by is stable: document order survives full key ties
    ordered.sort_by(compare_for_display);

    tracing::debug!(features = ordered.len(), "aggregated features");

    Ok(Aggregation {
        status_counts,
        ordered_features: ordered,
    })
}

/// Status rank, then completion date, then start date. Missing dates sort
/// after present ones.
fn compare_for_display(a: &AggregatedFeature<'_>, b: &AggregatedFeature<'_>) -> Ordering {
    a.status
        .rank()
        .cmp(&b.status.rank())
        .then_with(|| cmp_dates_missing_last(a.completed_date(), b.completed_date()))
        .then_with(|| cmp_dates_missing_last(a.start_date(), b.start_date()))
}

fn cmp_dates_missing_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
