//! Merge conflicts and the conflict log.

use crate::model::{FieldChange, PortKey, PortRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One payload field whose values disagreed between merged inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictField {
    pub field: String,
    /// Value carried by the winning input
    pub kept: Option<String>,
    /// Value that was overwritten
    pub discarded: Option<String>,
}

impl From<FieldChange> for ConflictField {
    fn from(change: FieldChange) -> Self {
        Self {
            field: change.field,
            kept: change.new_value,
            discarded: change.old_value,
        }
    }
}

/// A port declared by more than one input with differing payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConflict {
    pub key: PortKey,
    /// Position of the winning input in the merge argument list
    pub winner: usize,
    pub fields: Vec<ConflictField>,
}

impl MergeConflict {
    /// Describe a conflict where `kept` replaced `discarded`.
    #[must_use]
    pub fn new(discarded: &PortRecord, kept: &PortRecord, winner: usize) -> Self {
        Self {
            key: kept.key(),
            winner,
            fields: discarded
                .payload_differences(kept)
                .into_iter()
                .map(ConflictField::from)
                .collect(),
        }
    }
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (input #{} wins", self.key, self.winner)?;
        for field in &self.fields {
            write!(
                f,
                "; {}: kept {} over {}",
                field.field,
                field.kept.as_deref().unwrap_or("<none>"),
                field.discarded.as_deref().unwrap_or("<none>")
            )?;
        }
        f.write_str(")")
    }
}

/// Ordered list of merge conflicts, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictLog {
    conflicts: Vec<MergeConflict>,
}

impl ConflictLog {
    /// Build a log, sorting by key. Conflicts on the same key keep their order.
    #[must_use]
    pub fn from_conflicts(mut conflicts: Vec<MergeConflict>) -> Self {
        conflicts.sort_by(|a, b| a.key.cmp(&b.key));
        Self { conflicts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergeConflict> {
        self.conflicts.iter()
    }

    /// Conflicts touching one SWC
    #[must_use]
    pub fn for_owner(&self, owner: &str) -> Vec<&MergeConflict> {
        self.conflicts
            .iter()
            .filter(|c| c.key.owner.as_str() == owner)
            .collect()
    }

    /// Log a summary line plus one debug line per conflict.
    pub fn log_summary(&self) {
        if self.conflicts.is_empty() {
            return;
        }
        tracing::warn!(
            conflict_count = self.conflicts.len(),
            "{} ports were declared with differing payloads; the later input was kept",
            self.conflicts.len()
        );
        for conflict in &self.conflicts {
            tracing::debug!("Merge conflict: {conflict}");
        }
    }
}

impl<'a> IntoIterator for &'a ConflictLog {
    type Item = &'a MergeConflict;
    type IntoIter = std::slice::Iter<'a, MergeConflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.conflicts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortDirection;

    #[test]
    fn test_conflict_fields() {
        let old = PortRecord::new("Diag", "PortA")
            .unwrap()
            .with_direction(PortDirection::Provided);
        let new = PortRecord::new("Diag", "PortA")
            .unwrap()
            .with_direction(PortDirection::Required);
        let conflict = MergeConflict::new(&old, &new, 1);

        assert_eq!(conflict.key, PortKey::new("Diag", "PortA"));
        assert_eq!(conflict.fields.len(), 1);
        assert_eq!(conflict.fields[0].kept.as_deref(), Some("REQUIRED"));
        assert_eq!(conflict.fields[0].discarded.as_deref(), Some("PROVIDED"));
        assert!(conflict.to_string().contains("kept REQUIRED over PROVIDED"));
    }

    #[test]
    fn test_log_sorted_by_key() {
        let a = PortRecord::new("Diag", "PortB").unwrap();
        let b = PortRecord::new("Com", "Tx").unwrap();
        let log = ConflictLog::from_conflicts(vec![
            MergeConflict::new(&a, &a.clone().with_source_id("1"), 1),
            MergeConflict::new(&b, &b.clone().with_source_id("2"), 1),
        ]);
        let keys: Vec<String> = log.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(keys, vec!["Com/Tx", "Diag/PortB"]);
        assert_eq!(log.for_owner("Diag").len(), 1);
        assert!(!log.is_empty());
    }
}
