//! Typed error hierarchy for featureboard.
//!
//! Three top-level enums cover the failure domains:
//! - `DashboardError`: malformed document content found while aggregating,
//!   laying out or resolving overlay rows
//! - `SourceError`: failures loading the input document at all
//! - `ImportError`: failures reading a requirements matrix CSV

use chrono::NaiveDate;
use thiserror::Error;

/// Kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Feature,
    Requirement,
    Issue,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Feature => write!(f, "feature"),
            EntityKind::Requirement => write!(f, "requirement"),
            EntityKind::Issue => write!(f, "issue"),
        }
    }
}

/// Errors caused by the content of an otherwise well-formed document.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Unknown status '{value}' on {entity} '{id}'")]
    UnknownStatus {
        entity: EntityKind,
        id: String,
        value: String,
    },

    #[error("{from_kind} '{from_id}' references missing {to_kind} '{to_id}'")]
    DanglingReference {
        from_kind: EntityKind,
        from_id: String,
        to_kind: EntityKind,
        to_id: String,
    },

    #[error("Feature '{id}' not found")]
    UnknownFeature { id: String },

    #[error("Invalid date range: end {end} is not after start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Errors from loading the input document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read input file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse input document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from importing a requirements matrix.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to open requirements matrix at {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed requirements CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Requirements family '{family}' appears more than once (line {line})")]
    DuplicateFamily { family: String, line: u64 },

    #[error("Requirement '{id}' appears more than once (line {line})")]
    DuplicateRequirement { id: String, line: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_names_entity_and_value() {
        let err = DashboardError::UnknownStatus {
            entity: EntityKind::Feature,
            id: "psm-feature-007".to_string(),
            value: "Blocked".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("feature 'psm-feature-007'"));
        assert!(msg.contains("'Blocked'"));
    }

    #[test]
    fn dangling_reference_names_both_ends() {
        let err = DashboardError::DanglingReference {
            from_kind: EntityKind::Requirement,
            from_id: "psm-FR-8.2".to_string(),
            to_kind: EntityKind::Issue,
            to_id: "41".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "requirement 'psm-FR-8.2' references missing issue '41'"
        );
    }

    #[test]
    fn read_error_carries_path() {
        use std::path::PathBuf;
        let path = PathBuf::from("/data/features.json");
        let err = SourceError::Read {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        match &err {
            SourceError::Read { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Read"),
        }
    }

    #[test]
    fn parse_error_converts_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SourceError = json_err.into();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&DashboardError::UnknownFeature { id: "x".into() });
        assert_std_error(&SourceError::HttpStatus {
            url: "http://localhost".into(),
            status: 500,
        });
    }

    #[test]
    fn duplicate_requirement_names_id_and_line() {
        let err = ImportError::DuplicateRequirement {
            id: "psm-FR-1.1".to_string(),
            line: 42,
        };
        assert_eq!(
            err.to_string(),
            "Requirement 'psm-FR-1.1' appears more than once (line 42)"
        );
    }
}
