//! Lifecycle status shared by features, requirements and issues.

use serde::Serialize;

/// Lifecycle status of a tracked item.
///
/// Declaration order is the display rank: Completed sorts first and
/// NotStarted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Status {
    Completed,
    InProgress,
    NotStarted,
}

impl Status {
    /// All statuses in display order (pie slices, legend, summary).
    pub const ALL: [Status; 3] = [Status::Completed, Status::InProgress, Status::NotStarted];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Completed => "Completed",
            Status::InProgress => "In Progress",
            Status::NotStarted => "Not Started",
        }
    }

    /// Sort rank: Completed < InProgress < NotStarted.
    pub fn rank(self) -> u8 {
        match self {
            Status::Completed => 0,
            Status::InProgress => 1,
            Status::NotStarted => 2,
        }
    }

    /// Placeholder completion percentage.
    ///
    /// In-progress work is reported as 50% regardless of elapsed time.
    pub fn percent_done(self) -> u8 {
        match self {
            Status::NotStarted => 0,
            Status::InProgress => 50,
            Status::Completed => 100,
        }
    }

    /// CSS classes for a burn-down bar.
    pub fn bar_class(self) -> &'static str {
        match self {
            Status::NotStarted => "bar barNotStarted",
            Status::InProgress => "bar barInProgress",
            Status::Completed => "bar barCompleted",
        }
    }

    /// CSS class for a pie slice and its legend swatch.
    pub fn slice_class(self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    /// Parses the document spelling. `Complete` is accepted as a legacy
    /// alias for `Completed`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NotStarted" => Ok(Status::NotStarted),
            "InProgress" => Ok(Status::InProgress),
            "Completed" | "Complete" => Ok(Status::Completed),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_spellings() {
        assert_eq!("NotStarted".parse::<Status>(), Ok(Status::NotStarted));
        assert_eq!("InProgress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("Completed".parse::<Status>(), Ok(Status::Completed));
        assert_eq!("Complete".parse::<Status>(), Ok(Status::Completed));
    }

    #[test]
    fn test_parse_rejects_labels_and_unknowns() {
        assert_eq!("In Progress".parse::<Status>(), Err("In Progress".to_string()));
        assert!("blocked".parse::<Status>().is_err());
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn test_rank_matches_ord() {
        let mut sorted = vec![Status::NotStarted, Status::Completed, Status::InProgress];
        sorted.sort();
        assert_eq!(sorted, Status::ALL.to_vec());
        for pair in Status::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_percent_done_placeholder() {
        assert_eq!(Status::NotStarted.percent_done(), 0);
        assert_eq!(Status::InProgress.percent_done(), 50);
        assert_eq!(Status::Completed.percent_done(), 100);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Status::NotStarted.to_string(), "Not Started");
        assert_eq!(Status::InProgress.slice_class(), "in-progress");
        assert_eq!(Status::Completed.bar_class(), "bar barCompleted");
    }
}
