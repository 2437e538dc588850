//! Key-based diff engine implementation.

use super::consistency::check_comparable;
use super::{DiffEntry, DiffReport};
use crate::error::SwcDiffError;
use crate::model::{FieldChange, PortCollection, PortKey, PortRecord};

/// Diff engine for comparing port collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEngine {
    compare_source_id: bool,
    consistency_check: bool,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compare_source_id: true,
            consistency_check: true,
        }
    }

    /// Whether a changed item ID counts as a modification
    #[must_use]
    pub const fn compare_source_id(mut self, compare: bool) -> Self {
        self.compare_source_id = compare;
        self
    }

    /// Enable or disable the identity-scheme consistency check
    #[must_use]
    pub const fn consistency_check(mut self, enabled: bool) -> Self {
        self.consistency_check = enabled;
        self
    }

    #[must_use]
    pub const fn compares_source_id(&self) -> bool {
        self.compare_source_id
    }

    #[must_use]
    pub const fn checks_consistency(&self) -> bool {
        self.consistency_check
    }

    /// Compare two collections and return the diff report.
    ///
    /// Entries are sorted by `(owner, name)` regardless of input order.
    pub fn diff(
        &self,
        base: &PortCollection,
        candidate: &PortCollection,
    ) -> Result<DiffReport, SwcDiffError> {
        if self.consistency_check {
            check_comparable(base, candidate)?;
        }

        // Quick check: equal collections mean every port is unchanged.
        // Equality checks the hash first, then falls back to the records.
        if base == candidate {
            let entries = base
                .sorted_records()
                .into_iter()
                .filter_map(|record| {
                    candidate
                        .get(&record.key())
                        .map(|other| DiffEntry::unchanged(record.clone(), other.clone()))
                })
                .collect();
            return Ok(DiffReport::new(base.label(), candidate.label(), entries));
        }

        let mut keys: Vec<&PortKey> = base.keys().chain(candidate.keys()).collect();
        keys.sort();
        keys.dedup();

        let entries = keys
            .into_iter()
            .filter_map(|key| match (base.get(key), candidate.get(key)) {
                (None, Some(new)) => Some(DiffEntry::added(new.clone())),
                (Some(old), None) => Some(DiffEntry::removed(old.clone())),
                (Some(old), Some(new)) => Some(self.compare_pair(old, new)),
                (None, None) => None,
            })
            .collect();

        Ok(DiffReport::new(base.label(), candidate.label(), entries))
    }

    fn compare_pair(&self, old: &PortRecord, new: &PortRecord) -> DiffEntry {
        let changes: Vec<FieldChange> = old
            .payload_differences(new)
            .into_iter()
            .filter(|change| self.compare_source_id || change.field != "source_id")
            .collect();
        if changes.is_empty() {
            DiffEntry::unchanged(old.clone(), new.clone())
        } else {
            DiffEntry::modified(old.clone(), new.clone(), changes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;
    use crate::model::PortDirection;

    fn port(owner: &str, name: &str) -> PortRecord {
        PortRecord::new(owner, name).unwrap()
    }

    fn collection(label: &str, records: Vec<PortRecord>) -> PortCollection {
        let mut builder = PortCollection::builder(label);
        builder.extend(records);
        builder.build()
    }

    #[test]
    fn test_added_port() {
        let base = collection("v1", vec![port("Diag", "PortA")]);
        let candidate = collection("v2", vec![port("Diag", "PortA"), port("Diag", "PortB")]);
        let report = DiffEngine::new().diff(&base, &candidate).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].name, "PortA");
        assert_eq!(report.entries[0].kind, ChangeKind::Unchanged);
        assert_eq!(report.entries[1].name, "PortB");
        assert_eq!(report.entries[1].kind, ChangeKind::Added);
        assert_eq!(report.base_label, "v1");
        assert_eq!(report.candidate_label, "v2");
    }

    #[test]
    fn test_modified_direction() {
        let base = collection(
            "v1",
            vec![port("Diag", "PortA").with_direction(PortDirection::Provided)],
        );
        let candidate = collection(
            "v2",
            vec![port("Diag", "PortA").with_direction(PortDirection::Required)],
        );
        let report = DiffEngine::new().diff(&base, &candidate).unwrap();

        assert_eq!(report.entries.len(), 1);
        let entry = &report.entries[0];
        assert_eq!(entry.kind, ChangeKind::Modified);
        assert_eq!(entry.field_changes.len(), 1);
        assert_eq!(entry.field_changes[0].field, "direction");
        assert_eq!(entry.field_changes[0].old_value.as_deref(), Some("PROVIDED"));
        assert_eq!(entry.field_changes[0].new_value.as_deref(), Some("REQUIRED"));
    }

    #[test]
    fn test_source_id_comparison_toggle() {
        let base = collection("v1", vec![port("Diag", "PortA").with_source_id("0x0001")]);
        let candidate = collection("v2", vec![port("Diag", "PortA").with_source_id("0x0002")]);

        let strict = DiffEngine::new().diff(&base, &candidate).unwrap();
        assert_eq!(strict.summary.modified, 1);

        let relaxed = DiffEngine::new()
            .compare_source_id(false)
            .diff(&base, &candidate)
            .unwrap();
        assert_eq!(relaxed.summary.unchanged, 1);
        assert!(!relaxed.has_changes());
    }

    #[test]
    fn test_empty_sides() {
        let empty = PortCollection::empty("empty");
        let full = collection("full", vec![port("Diag", "PortA"), port("Com", "Tx")]);

        let added = DiffEngine::new().diff(&empty, &full).unwrap();
        assert_eq!(added.summary.added, 2);
        let removed = DiffEngine::new().diff(&full, &empty).unwrap();
        assert_eq!(removed.summary.removed, 2);
        let nothing = DiffEngine::new().diff(&empty, &empty).unwrap();
        assert!(nothing.entries.is_empty());
    }

    #[test]
    fn test_identical_inputs_short_circuit() {
        let a = collection("a", vec![port("Diag", "PortB"), port("Diag", "PortA")]);
        let b = collection("b", vec![port("Diag", "PortA"), port("Diag", "PortB")]);
        let report = DiffEngine::new().diff(&a, &b).unwrap();
        assert_eq!(report.summary.unchanged, 2);
        assert_eq!(report.entries[0].name, "PortA");
        assert!(report.check_well_formed().is_ok());
    }

    #[test]
    fn test_hash_collision_still_reports_changes() {
        let a = collection("a", vec![port("Diag", "PortA"), port("Diag", "PortB")]);
        let b = collection(
            "b",
            vec![
                port("Diag", "PortA").with_direction(PortDirection::Required),
                port("Diag", "PortC"),
            ],
        )
        .with_content_hash(a.content_hash());

        let report = DiffEngine::new().diff(&a, &b).unwrap();
        assert_eq!(report.summary.modified, 1);
        assert_eq!(report.summary.removed, 1);
        assert_eq!(report.summary.added, 1);
        assert_eq!(report.summary.unchanged, 0);
        assert!(report.check_well_formed().is_ok());
    }

    #[test]
    fn test_incomparable_inputs() {
        let a = collection("a", vec![port("Diag", "PortA")]);
        let b = collection("b", vec![port("diag", "PortA")]);
        let err = DiffEngine::new().diff(&a, &b).unwrap_err();
        assert!(matches!(err, SwcDiffError::Incomparable(_)));

        let unchecked = DiffEngine::new().consistency_check(false).diff(&a, &b).unwrap();
        assert_eq!(unchecked.summary.added, 1);
        assert_eq!(unchecked.summary.removed, 1);
    }

    #[test]
    fn test_ordering_is_case_sensitive_bytewise() {
        let base = PortCollection::empty("base");
        let candidate = collection(
            "candidate",
            vec![port("b", "x"), port("B", "y"), port("a", "z"), port("B", "a")],
        );
        let report = DiffEngine::new()
            .consistency_check(false)
            .diff(&base, &candidate)
            .unwrap();
        let keys: Vec<String> = report.entries.iter().map(|e| e.key().to_string()).collect();
        assert_eq!(keys, vec!["B/a", "B/y", "a/z", "b/x"]);
    }
}
