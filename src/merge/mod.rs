//! Merge engine for port collections.
//!
//! Merging is a union by `(owner, name)`. When two inputs declare the same
//! port with different payloads, the later argument wins and the
//! disagreement is recorded as a [`MergeConflict`]. Conflicts are never
//! fatal.
//!
//! Key membership of the result does not depend on argument order, but the
//! payload of a conflicting port does: `merge(a, b)` keeps `b`'s values and
//! `merge(b, a)` keeps `a`'s.

mod conflict;

pub use conflict::{ConflictField, ConflictLog, MergeConflict};

use crate::model::PortCollection;

/// Result of a merge: the combined collection plus any conflicts
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub collection: PortCollection,
    pub conflicts: ConflictLog,
}

impl MergeOutcome {
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Merge two collections; `b` wins on conflicting payloads.
#[must_use]
pub fn merge(a: &PortCollection, b: &PortCollection) -> MergeOutcome {
    merge_all([a, b])
}

/// Fold a merge over any number of collections, left to right.
///
/// The result keeps the first input's insertion order followed by keys new
/// in each later input. Its label joins the input labels with `" + "` and
/// its identity scheme is the first input's. Merging nothing yields an
/// empty collection.
#[must_use]
pub fn merge_all<'a, I>(collections: I) -> MergeOutcome
where
    I: IntoIterator<Item = &'a PortCollection>,
{
    let inputs: Vec<&PortCollection> = collections.into_iter().collect();
    let label = inputs
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(" + ");

    let mut builder = PortCollection::builder(label);
    let mut conflicts = Vec::new();

    let Some(first) = inputs.first() else {
        return MergeOutcome {
            collection: builder.build(),
            conflicts: ConflictLog::default(),
        };
    };
    if let Some(scheme) = first.explicit_identity_scheme() {
        builder = builder.identity_scheme(scheme);
    }

    for (index, input) in inputs.iter().enumerate() {
        if index > 0 && input.identity_scheme() != first.identity_scheme() {
            tracing::warn!(
                "Merging '{}' (identity scheme '{}') into '{}' (identity scheme '{}'); \
                 keeping '{}'",
                input.label(),
                input.identity_scheme(),
                first.label(),
                first.identity_scheme(),
                first.identity_scheme()
            );
        }

        for record in input.records() {
            if let Some(previous) = builder.upsert(record.clone()) {
                if !previous.same_payload(record) {
                    conflicts.push(MergeConflict::new(&previous, record, index));
                }
            }
        }
        builder.add_duplicates(input.duplicate_count());
    }

    MergeOutcome {
        collection: builder.build(),
        conflicts: ConflictLog::from_conflicts(conflicts),
    }
}

impl PortCollection {
    /// Merge `other` into a copy of this collection; `other` wins on conflicts.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> MergeOutcome {
        merge(self, other)
    }
}
