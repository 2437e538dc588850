//! Diff result structures.

use crate::model::{FieldChange, PortKey, PortRecord, SwcIdentifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Classification of a port between two collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl ChangeKind {
    /// All kinds in summary order
    pub const ALL: [Self; 4] = [Self::Added, Self::Removed, Self::Modified, Self::Unchanged];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Removed => "REMOVED",
            Self::Modified => "MODIFIED",
            Self::Unchanged => "UNCHANGED",
        }
    }

    /// True for every kind except `Unchanged`
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One port in a diff, tagged with how it changed.
///
/// `base` is set for `Removed`, `Modified` and `Unchanged`; `candidate` for
/// `Added`, `Modified` and `Unchanged`. Only `Modified` entries carry field
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub owner: SwcIdentifier,
    pub name: String,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<PortRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<PortRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_changes: Vec<FieldChange>,
}

impl DiffEntry {
    #[must_use]
    pub fn added(record: PortRecord) -> Self {
        Self::from_key(record.key(), ChangeKind::Added, None, Some(record), Vec::new())
    }

    #[must_use]
    pub fn removed(record: PortRecord) -> Self {
        Self::from_key(record.key(), ChangeKind::Removed, Some(record), None, Vec::new())
    }

    #[must_use]
    pub fn unchanged(base: PortRecord, candidate: PortRecord) -> Self {
        Self::from_key(
            base.key(),
            ChangeKind::Unchanged,
            Some(base),
            Some(candidate),
            Vec::new(),
        )
    }

    #[must_use]
    pub fn modified(base: PortRecord, candidate: PortRecord, changes: Vec<FieldChange>) -> Self {
        Self::from_key(
            base.key(),
            ChangeKind::Modified,
            Some(base),
            Some(candidate),
            changes,
        )
    }

    fn from_key(
        key: PortKey,
        kind: ChangeKind,
        base: Option<PortRecord>,
        candidate: Option<PortRecord>,
        field_changes: Vec<FieldChange>,
    ) -> Self {
        Self {
            owner: key.owner,
            name: key.name,
            kind,
            base,
            candidate,
            field_changes,
        }
    }

    #[must_use]
    pub fn key(&self) -> PortKey {
        PortKey {
            owner: self.owner.clone(),
            name: self.name.clone(),
        }
    }

    /// Check the entry's shape against its kind
    fn check_shape(&self) -> Result<(), String> {
        let sides = (self.base.is_some(), self.candidate.is_some());
        let expected = match self.kind {
            ChangeKind::Added => (false, true),
            ChangeKind::Removed => (true, false),
            ChangeKind::Modified | ChangeKind::Unchanged => (true, true),
        };
        if sides != expected {
            return Err(format!(
                "{} entry {}/{} has the wrong side records",
                self.kind, self.owner, self.name
            ));
        }
        match (self.kind, self.field_changes.is_empty()) {
            (ChangeKind::Modified, true) => Err(format!(
                "MODIFIED entry {}/{} has no field changes",
                self.owner, self.name
            )),
            (kind, false) if kind != ChangeKind::Modified => Err(format!(
                "{kind} entry {}/{} carries field changes",
                self.owner, self.name
            )),
            _ => Ok(()),
        }
    }
}

/// Counts per change kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub total: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            summary.record(entry.kind);
        }
        summary
    }

    fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Added => self.added += 1,
            ChangeKind::Removed => self.removed += 1,
            ChangeKind::Modified => self.modified += 1,
            ChangeKind::Unchanged => self.unchanged += 1,
        }
        self.total += 1;
    }

    #[must_use]
    pub const fn count(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Added => self.added,
            ChangeKind::Removed => self.removed,
            ChangeKind::Modified => self.modified,
            ChangeKind::Unchanged => self.unchanged,
        }
    }

    /// Number of entries that are not unchanged
    #[must_use]
    pub const fn changes(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

/// Per-SWC counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerBreakdown {
    pub owner: SwcIdentifier,
    #[serde(flatten)]
    pub counts: DiffSummary,
}

/// Complete result of comparing two port collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffReport {
    /// Label of the base input
    pub base_label: String,
    /// Label of the candidate input
    pub candidate_label: String,
    /// Counts per kind
    pub summary: DiffSummary,
    /// Entries sorted by `(owner, name)`
    pub entries: Vec<DiffEntry>,
}

impl DiffReport {
    /// Build a report from already sorted entries, computing the summary.
    pub fn new(
        base_label: impl Into<String>,
        candidate_label: impl Into<String>,
        entries: Vec<DiffEntry>,
    ) -> Self {
        Self {
            base_label: base_label.into(),
            candidate_label: candidate_label.into(),
            summary: DiffSummary::from_entries(&entries),
            entries,
        }
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.changes() > 0
    }

    #[must_use]
    pub fn entries_of_kind(&self, kind: ChangeKind) -> Vec<&DiffEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    #[must_use]
    pub fn entries_for_owner(&self, owner: &str) -> Vec<&DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.owner.as_str() == owner)
            .collect()
    }

    /// Per-SWC counts, sorted by owner
    #[must_use]
    pub fn owner_breakdown(&self) -> Vec<OwnerBreakdown> {
        let mut by_owner: BTreeMap<&SwcIdentifier, DiffSummary> = BTreeMap::new();
        for entry in &self.entries {
            by_owner.entry(&entry.owner).or_default().record(entry.kind);
        }
        by_owner
            .into_iter()
            .map(|(owner, counts)| OwnerBreakdown {
                owner: owner.clone(),
                counts,
            })
            .collect()
    }

    /// A copy of this report restricted to one SWC
    pub fn restricted_to_owner(&self, owner: &str) -> Self {
        Self::new(
            self.base_label.clone(),
            self.candidate_label.clone(),
            self.entries_for_owner(owner).into_iter().cloned().collect(),
        )
    }

    /// Verify the report's structural invariants.
    ///
    /// Entries must be strictly sorted by key, each entry must have the side
    /// records and field changes its kind implies, and the summary must match
    /// the entries.
    pub fn check_well_formed(&self) -> Result<(), String> {
        for pair in self.entries.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if (&prev.owner, &prev.name) >= (&next.owner, &next.name) {
                return Err(format!(
                    "entries out of order: {}/{} before {}/{}",
                    prev.owner, prev.name, next.owner, next.name
                ));
            }
        }
        for entry in &self.entries {
            entry.check_shape()?;
        }
        let actual = DiffSummary::from_entries(&self.entries);
        if actual != self.summary {
            return Err(format!(
                "summary counts {:?} do not match entries {:?}",
                self.summary, actual
            ));
        }
        Ok(())
    }
}
