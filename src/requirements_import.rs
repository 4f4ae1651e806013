//! Requirements traceability matrix (RTM) import.
//!
//! The matrix is a CSV export with one section per requirements family.
//! Rows are classified by shape:
//!
//! | Row           | Shape                                               |
//! |---------------|-----------------------------------------------------|
//! | Family header | a single cell starting with `-------- `             |
//! | Category      | empty first cell, non-empty second cell             |
//! | Requirement   | 11 or more cells, first cell matches `psm-XX-n.n`   |
//! | Column header | the 11 column titles, skipped                       |
//!
//! Any other row inside a family section is reported and skipped. A family
//! that appears twice, or a requirement id that appears twice, aborts the
//! import.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::errors::ImportError;
use crate::model::{FeatureDocument, Requirement};

static REQUIREMENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^psm-([A-Z][A-Z])-([0-9.]+)").unwrap());

/// Header patterns in match order; `None` marks sections that hold no
/// requirements.
static FAMILY_HEADERS: LazyLock<Vec<(Regex, Option<Family>)>> = LazyLock::new(|| {
    [
        (r"func reqs", Some(Family::Functional)),
        (r"intermediary . interface", Some(Family::IntermediaryInterface)),
        (r"standards and conditions", Some(Family::StandardsAndConditions)),
        (r"information architecture", Some(Family::InformationArchitecture)),
        (r"integration and utility", Some(Family::IntegrationAndUtility)),
        (r"access and delivery", Some(Family::AccessAndDelivery)),
        (r"software quality", Some(Family::SoftwareQuality)),
        (r"performance", None),
        (r"pharmacy \(mmis\)", Some(Family::Pharmacy)),
        (r"selections", None),
    ]
    .into_iter()
    .map(|(pattern, family)| (Regex::new(pattern).unwrap(), family))
    .collect()
});

/// Column titles of the matrix, in order.
pub const COLUMN_HEADERS: [&str; 11] = [
    "Requirement ID Number",
    "Requirement Category",
    "Requirement Statement",
    "Priority",
    "Rank",
    "Source",
    "Source Document",
    "Release",
    "Design Reference",
    "Acceptance Test Reference",
    "Comment",
];

const FAMILY_HEADER_PREFIX: &str = "-------- ";

/// Requirements family, identified by the two-letter code in requirement ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    Functional,
    IntermediaryInterface,
    StandardsAndConditions,
    InformationArchitecture,
    IntegrationAndUtility,
    AccessAndDelivery,
    SoftwareQuality,
    Pharmacy,
}

impl Family {
    pub fn code(self) -> &'static str {
        match self {
            Family::Functional => "FR",
            Family::IntermediaryInterface => "II",
            Family::StandardsAndConditions => "SC",
            Family::InformationArchitecture => "IA",
            Family::IntegrationAndUtility => "IU",
            Family::AccessAndDelivery => "AD",
            Family::SoftwareQuality => "SQ",
            Family::Pharmacy => "PH",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// What a family header row introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyHeader {
    Family(Family),
    /// A known section without requirements.
    Skipped,
    Unrecognized,
}

/// Classify a family header by its (case-insensitive) title.
pub fn family_from_header(header: &str) -> FamilyHeader {
    let lower = header.to_lowercase();
    FAMILY_HEADERS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&lower))
        .map(|(_, family)| match family {
            Some(family) => FamilyHeader::Family(*family),
            None => FamilyHeader::Skipped,
        })
        .unwrap_or(FamilyHeader::Unrecognized)
}

/// One requirement row of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRequirement {
    pub family: Family,
    pub id: String,
    /// `<family code> <category title>`, when a category row preceded it.
    pub category: Option<String>,
    pub statement: String,
    pub priority: String,
    pub rank: String,
    pub source: String,
    pub source_document: String,
    pub release: String,
    pub design_reference: String,
    pub acceptance_test_reference: String,
    pub comment: String,
}

/// Parsed matrix plus the non-fatal problems found on the way.
#[derive(Debug, Default)]
pub struct MatrixImport {
    pub requirements: IndexMap<String, MatrixRequirement>,
    pub warnings: Vec<String>,
}

impl MatrixImport {
    fn warn(&mut self, line: u64, message: String) {
        tracing::warn!(line, "{}", message);
        self.warnings.push(format!("line {}: {}", line, message));
    }
}

/// Read a matrix CSV file.
pub fn read_matrix(path: &Path) -> Result<MatrixImport, ImportError> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let import = parse_matrix(file)?;
    tracing::info!(
        path = %path.display(),
        requirements = import.requirements.len(),
        warnings = import.warnings.len(),
        "read requirements matrix"
    );
    Ok(import)
}

/// Parse matrix CSV text from any reader.
pub fn parse_matrix<R: Read>(reader: R) -> Result<MatrixImport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut import = MatrixImport::default();
    let mut families_seen = Vec::new();
    let mut family: Option<Family> = None;
    let mut category: Option<String> = None;

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cell = |i: usize| record.get(i).unwrap_or("");

        if record.len() == 1 && cell(0).starts_with(FAMILY_HEADER_PREFIX) {
            family = match family_from_header(cell(0)) {
                FamilyHeader::Family(found) => {
                    if families_seen.contains(&found) {
                        return Err(ImportError::DuplicateFamily {
                            family: found.code().to_string(),
                            line,
                        });
                    }
                    families_seen.push(found);
                    Some(found)
                }
                FamilyHeader::Skipped => None,
                FamilyHeader::Unrecognized => {
                    import.warn(line, format!("unexpected family header \"{}\"", cell(0)));
                    None
                }
            };
        } else if record.len() > 1 && cell(0).is_empty() && !cell(1).is_empty() {
            category = family.map(|f| format!("{} {}", f, cell(1)));
        } else if let Some(current) = family
            && record.len() >= COLUMN_HEADERS.len()
            && let Some(captures) = REQUIREMENT_ID_REGEX.captures(cell(0))
        {
            let id = cell(0).to_string();
            if &captures[1] != current.code() {
                import.warn(
                    line,
                    format!("family \"{}\" does not match requirement \"{}\"", current, id),
                );
            }
            if category.is_none() {
                import.warn(line, format!("requirement '{}' has no category", id));
            }
            if import.requirements.contains_key(&id) {
                return Err(ImportError::DuplicateRequirement { id, line });
            }
            let requirement = MatrixRequirement {
                family: current,
                id: id.clone(),
                category: category.clone(),
                statement: cell(2).to_string(),
                priority: cell(3).to_string(),
                rank: cell(4).to_string(),
                source: cell(5).to_string(),
                source_document: cell(6).to_string(),
                release: cell(7).to_string(),
                design_reference: cell(8).to_string(),
                acceptance_test_reference: cell(9).to_string(),
                comment: cell(10).to_string(),
            };
            import.requirements.insert(id, requirement);
        } else if record.len() >= COLUMN_HEADERS.len()
            && COLUMN_HEADERS.iter().enumerate().all(|(i, title)| cell(i) == *title)
        {
            // repeated column header
        } else if family.is_some() {
            let row: Vec<&str> = record.iter().collect();
            import.warn(line, format!("unrecognised row {:?}", row));
        }
    }

    Ok(import)
}

/// Counts from [`merge_requirements`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
}

/// Merge imported requirements into `document`.
///
/// Existing requirements take the matrix statement as their description and
/// keep their status and issues. New ones start as NotStarted with no issues.
pub fn merge_requirements(
    document: &mut FeatureDocument,
    imported: &IndexMap<String, MatrixRequirement>,
) -> MergeStats {
    let mut stats = MergeStats::default();
    for (id, requirement) in imported {
        match document.requirements.get_mut(id) {
            Some(existing) => {
                existing.description = requirement.statement.clone();
                stats.updated += 1;
            }
            None => {
                document.requirements.insert(
                    id.clone(),
                    Requirement {
                        description: requirement.statement.clone(),
                        status: "NotStarted".to_string(),
                        issues: Vec::new(),
                    },
                );
                stats.added += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    const HEADER: &str = "Requirement ID Number,Requirement Category,Requirement Statement,Priority,Rank,Source,Source Document,Release,Design Reference,Acceptance Test Reference,Comment";

    fn matrix(rows: &[&str]) -> String {
        let mut text = rows.join("\n");
        text.push('\n');
        text
    }

    #[test]
    fn test_family_headers() {
        assert_eq!(
            family_from_header("-------- 1 - Func Reqs"),
            FamilyHeader::Family(Family::Functional)
        );
        assert_eq!(
            family_from_header("-------- 2 - Intermediary & Interface"),
            FamilyHeader::Family(Family::IntermediaryInterface)
        );
        assert_eq!(
            family_from_header("-------- 9 - Pharmacy (MMIS)"),
            FamilyHeader::Family(Family::Pharmacy)
        );
        assert_eq!(family_from_header("-------- 8 - Performance"), FamilyHeader::Skipped);
        assert_eq!(family_from_header("-------- Selections"), FamilyHeader::Skipped);
        assert_eq!(family_from_header("-------- Glossary"), FamilyHeader::Unrecognized);
    }

    #[test]
    fn test_requirement_rows_take_family_and_category() {
        let text = matrix(&[
            "-------- 1 - Func Reqs",
            HEADER,
            ",Search,,,,,,,,,",
            "psm-FR-8.2,ignored,Search accepts a partial id,High,1,Board,RFP,R1,DD-3,AT-7,",
            "psm-FR-8.3,,Search accepts a family name,Medium,2,Board,RFP,R2,,,\"note, with comma\"",
        ]);
        let import = parse_matrix(text.as_bytes()).unwrap();
        assert!(import.warnings.is_empty(), "{:?}", import.warnings);

        let ids: Vec<&String> = import.requirements.keys().collect();
        assert_eq!(ids, ["psm-FR-8.2", "psm-FR-8.3"]);
        let first = &import.requirements["psm-FR-8.2"];
        assert_eq!(first.family, Family::Functional);
        assert_eq!(first.category.as_deref(), Some("FR Search"));
        assert_eq!(first.statement, "Search accepts a partial id");
        assert_eq!(first.acceptance_test_reference, "AT-7");
        assert_eq!(import.requirements["psm-FR-8.3"].comment, "note, with comma");
    }

    #[test]
    fn test_trailing_cells_are_ignored() {
        let text = matrix(&[
            "-------- 1 - Func Reqs",
            ",Login,,,,,,,,,",
            "psm-FR-1.1,,Users sign in,High,1,,,,,,,,,,",
        ]);
        let import = parse_matrix(text.as_bytes()).unwrap();
        assert_eq!(import.requirements["psm-FR-1.1"].statement, "Users sign in");
    }

    #[test]
    fn test_rows_outside_a_family_are_ignored() {
        let text = matrix(&[
            "Exported from RTM",
            "psm-FR-1.1,,Before any family,,,,,,,,",
            "-------- 8 - Performance",
            ",Throughput,,,,,,,,,",
            ",,Pages load in two seconds,,,,,,,,",
        ]);
        let import = parse_matrix(text.as_bytes()).unwrap();
        assert!(import.requirements.is_empty());
        assert!(import.warnings.is_empty(), "{:?}", import.warnings);
    }

    #[test]
    fn test_unexpected_rows_are_reported() {
        let text = matrix(&[
            "-------- 1 - Func Reqs",
            "psm-FR-1.1,,No category yet,,,,,,,,",
            "not a requirement,,,,,,,,,,",
            "-------- Glossary",
        ]);
        let import = parse_matrix(text.as_bytes()).unwrap();
        assert_eq!(import.requirements.len(), 1);
        assert_eq!(import.warnings.len(), 3, "{:?}", import.warnings);
        assert!(import.warnings[0].contains("has no category"));
        assert!(import.warnings[1].starts_with("line 3: unrecognised row"));
        assert!(import.warnings[2].contains("unexpected family header"));
    }

    #[test]
    fn test_family_mismatch_is_reported() {
        let text = matrix(&[
            "-------- 7 - Software Quality",
            ",Reliability,,,,,,,,,",
            "psm-FR-2.1,,Filed under the wrong family,,,,,,,,",
        ]);
        let import = parse_matrix(text.as_bytes()).unwrap();
        assert_eq!(import.requirements["psm-FR-2.1"].family, Family::SoftwareQuality);
        assert_eq!(import.warnings.len(), 1);
        assert!(import.warnings[0].contains("does not match"));
    }

    #[test]
    fn test_repeated_family_fails() {
        let text = matrix(&[
            "-------- 1 - Func Reqs",
            "-------- 8 - Performance",
            "-------- 8 - Performance",
            "-------- 1 - Func Reqs again",
        ]);
        let err = parse_matrix(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::DuplicateFamily { ref family, line: 4 } if family == "FR"
        ));
    }

    #[test]
    fn test_duplicate_requirement_fails() {
        let text = matrix(&[
            "-------- 1 - Func Reqs",
            ",Login,,,,,,,,,",
            "psm-FR-1.1,,First,,,,,,,,",
            "psm-FR-1.1,,Second,,,,,,,,",
        ]);
        let err = parse_matrix(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::DuplicateRequirement { ref id, line: 4 } if id == "psm-FR-1.1"
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_matrix(Path::new("/nonexistent/RTM.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/RTM.csv"));
    }

    #[test]
    fn test_merge_keeps_progress_of_known_requirements() {
        let mut document = FeatureDocument::from_json(
            r#"{"features": {}, "requirements": {
                "psm-FR-1.1": {"description": "old", "status": "InProgress", "issues": [4]}
            }}"#,
        )
        .unwrap();
        let text = matrix(&[
            "-------- 1 - Func Reqs",
            ",Login,,,,,,,,,",
            "psm-FR-1.1,,Users sign in,,,,,,,,",
            "psm-FR-1.2,,Sessions expire,,,,,,,,",
        ]);
        let import = parse_matrix(text.as_bytes()).unwrap();

        let stats = merge_requirements(&mut document, &import.requirements);
        assert_eq!(stats, MergeStats { added: 1, updated: 1 });

        let known = &document.requirements["psm-FR-1.1"];
        assert_eq!(known.description, "Users sign in");
        assert_eq!(known.status, "InProgress");
        assert_eq!(known.issues, vec![4]);

        let added = &document.requirements["psm-FR-1.2"];
        assert_eq!(added.status, "NotStarted");
        assert!(added.status.parse::<Status>().is_ok());
        assert!(added.issues.is_empty());
    }
}
