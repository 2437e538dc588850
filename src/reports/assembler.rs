//! Turns a diff report into an ordered table of presentation rows.
//!
//! Each row has six cells: `owner, name, change_kind, field, old_value,
//! new_value`. Added, removed and unchanged ports give one row with empty
//! field and value cells. A modified port gives one row per changed field.
//! Summary rows (`change_kind = SUMMARY`) carry one count per kind.

use super::{ReportError, SummaryPosition};
use crate::diff::{ChangeKind, DiffEntry, DiffReport};
use serde::{Deserialize, Serialize};

/// Column headers matching [`ReportRow::cells`]
pub const ROW_HEADERS: [&str; 6] = [
    "owner",
    "name",
    "change_kind",
    "field",
    "old_value",
    "new_value",
];

/// `change_kind` cell of a summary row
pub const SUMMARY_KIND: &str = "SUMMARY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    pub summary_position: SummaryPosition,
    pub only_changes: bool,
}

/// One presentation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub owner: String,
    pub name: String,
    pub change_kind: String,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

impl ReportRow {
    fn entry(entry: &DiffEntry, field: &str, old: Option<&str>, new: Option<&str>) -> Self {
        Self {
            owner: entry.owner.to_string(),
            name: entry.name.clone(),
            change_kind: entry.kind.to_string(),
            field: field.to_string(),
            old_value: old.unwrap_or_default().to_string(),
            new_value: new.unwrap_or_default().to_string(),
        }
    }

    fn summary(kind: ChangeKind, count: usize) -> Self {
        Self {
            owner: String::new(),
            name: String::new(),
            change_kind: SUMMARY_KIND.to_string(),
            field: kind.to_string(),
            old_value: String::new(),
            new_value: count.to_string(),
        }
    }

    #[must_use]
    pub fn is_summary(&self) -> bool {
        self.change_kind == SUMMARY_KIND
    }

    /// Cells in column order
    #[must_use]
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.owner,
            &self.name,
            &self.change_kind,
            &self.field,
            &self.old_value,
            &self.new_value,
        ]
    }
}

/// Assemble presentation rows from a diff report.
///
/// Entry rows keep the report's order. Fails if the report is malformed.
pub fn assemble(
    report: &DiffReport,
    options: &AssembleOptions,
) -> Result<Vec<ReportRow>, ReportError> {
    report
        .check_well_formed()
        .map_err(ReportError::MalformedReport)?;

    let summary: Vec<ReportRow> = ChangeKind::ALL
        .iter()
        .map(|kind| ReportRow::summary(*kind, report.summary.count(*kind)))
        .collect();

    let mut entry_rows = Vec::with_capacity(report.entries.len());
    for entry in &report.entries {
        match entry.kind {
            ChangeKind::Unchanged if options.only_changes => {}
            ChangeKind::Modified => {
                entry_rows.extend(entry.field_changes.iter().map(|change| {
                    ReportRow::entry(
                        entry,
                        &change.field,
                        change.old_value.as_deref(),
                        change.new_value.as_deref(),
                    )
                }));
            }
            _ => entry_rows.push(ReportRow::entry(entry, "", None, None)),
        }
    }

    Ok(match options.summary_position {
        SummaryPosition::Top => summary.into_iter().chain(entry_rows).collect(),
        SummaryPosition::Bottom => entry_rows.into_iter().chain(summary).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PortDirection, PortRecord};

    fn port(owner: &str, name: &str) -> PortRecord {
        PortRecord::new(owner, name).unwrap()
    }

    fn sample() -> DiffReport {
        let old = port("Diag", "PortB")
            .with_direction(PortDirection::Provided)
            .with_source_id("0x0001");
        let new = port("Diag", "PortB")
            .with_direction(PortDirection::Required)
            .with_source_id("0x0002");
        let changes = old.payload_differences(&new);
        DiffReport::new(
            "base",
            "candidate",
            vec![
                DiffEntry::unchanged(port("Diag", "PortA"), port("Diag", "PortA")),
                DiffEntry::modified(old, new, changes),
                DiffEntry::added(port("Diag", "PortC")),
            ],
        )
    }

    #[test]
    fn test_summary_top() {
        let rows = assemble(&sample(), &AssembleOptions::default()).unwrap();
        assert_eq!(rows.len(), 4 + 4);
        let kinds: Vec<&str> = rows[..4].iter().map(|r| r.field.as_str()).collect();
        assert_eq!(kinds, vec!["ADDED", "REMOVED", "MODIFIED", "UNCHANGED"]);
        assert!(rows[..4].iter().all(ReportRow::is_summary));
        assert_eq!(rows[0].new_value, "1");
        assert_eq!(rows[1].new_value, "0");

        assert_eq!(rows[4].cells(), ["Diag", "PortA", "UNCHANGED", "", "", ""]);
        assert_eq!(
            rows[5].cells(),
            ["Diag", "PortB", "MODIFIED", "direction", "PROVIDED", "REQUIRED"]
        );
        assert_eq!(
            rows[6].cells(),
            ["Diag", "PortB", "MODIFIED", "source_id", "0x0001", "0x0002"]
        );
        assert_eq!(rows[7].change_kind, "ADDED");
    }

    #[test]
    fn test_summary_bottom_only_changes() {
        let options = AssembleOptions {
            summary_position: SummaryPosition::Bottom,
            only_changes: true,
        };
        let rows = assemble(&sample(), &options).unwrap();
        assert_eq!(rows.len(), 3 + 4);
        assert_eq!(rows[0].name, "PortB");
        assert!(rows[3..].iter().all(ReportRow::is_summary));
        // Counts still include the unchanged entry
        assert_eq!(rows[6].field, "UNCHANGED");
        assert_eq!(rows[6].new_value, "1");
    }

    #[test]
    fn test_empty_report_has_only_summary() {
        let report = DiffReport::new("a", "b", Vec::new());
        let rows = assemble(&report, &AssembleOptions::default()).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.new_value == "0"));
    }

    #[test]
    fn test_malformed_report_rejected() {
        let mut report = sample();
        report.entries.reverse();
        let err = assemble(&report, &AssembleOptions::default()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedReport(_)));
    }
}
