//! The immutable port collection and its builder.

use super::{PortKey, PortRecord, SwcIdentifier};
use crate::utils::hash_fields;
use indexmap::IndexMap;

/// Identity scheme assumed when a source does not declare one
pub const DEFAULT_IDENTITY_SCHEME: &str = "swc-name/port-name";

/// A set of ports, unique by `(owner, name)`.
///
/// Insertion order is retained for export only. Every ordered view is sorted
/// by [`PortKey`]. Collections have no public mutators; build them with
/// [`PortCollectionBuilder`], an extraction adapter, or a merge.
#[derive(Debug, Clone)]
pub struct PortCollection {
    label: String,
    identity_scheme: Option<String>,
    records: IndexMap<PortKey, PortRecord>,
    duplicate_count: usize,
    content_hash: u64,
}

impl PortCollection {
    /// An empty collection with the given label
    #[must_use]
    pub fn empty(label: impl Into<String>) -> Self {
        PortCollectionBuilder::new(label).build()
    }

    /// Start building a collection
    #[must_use]
    pub fn builder(label: impl Into<String>) -> PortCollectionBuilder {
        PortCollectionBuilder::new(label)
    }

    /// Source description used in logs and reports
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identity scheme tag, falling back to [`DEFAULT_IDENTITY_SCHEME`]
    #[must_use]
    pub fn identity_scheme(&self) -> &str {
        self.identity_scheme
            .as_deref()
            .unwrap_or(DEFAULT_IDENTITY_SCHEME)
    }

    /// Identity scheme tag only if the source declared one
    #[must_use]
    pub fn explicit_identity_scheme(&self) -> Option<&str> {
        self.identity_scheme.as_deref()
    }

    /// Number of repeated keys collapsed while building
    #[must_use]
    pub const fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }

    /// Hash over the sorted records, independent of label and insertion order
    #[must_use]
    pub const fn content_hash(&self) -> u64 {
        self.content_hash
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &PortKey) -> Option<&PortRecord> {
        self.records.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &PortKey) -> bool {
        self.records.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &PortKey> {
        self.records.keys()
    }

    /// Records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &PortRecord> {
        self.records.values()
    }

    /// Records sorted by `(owner, name)`
    #[must_use]
    pub fn sorted_records(&self) -> Vec<&PortRecord> {
        let mut records: Vec<_> = self.records.iter().collect();
        records.sort_by(|a, b| a.0.cmp(b.0));
        records.into_iter().map(|(_, record)| record).collect()
    }

    /// All ports of one SWC, sorted by port name.
    ///
    /// Matching is case-sensitive. Unknown SWCs yield an empty list.
    #[must_use]
    pub fn ports_of(&self, owner: &str) -> Vec<&PortRecord> {
        let mut ports: Vec<_> = self
            .records
            .values()
            .filter(|r| r.owner().as_str() == owner)
            .collect();
        ports.sort_by(|a, b| a.name().cmp(b.name()));
        ports
    }

    /// Distinct SWC identifiers, sorted
    #[must_use]
    pub fn owners(&self) -> Vec<&SwcIdentifier> {
        let mut owners: Vec<_> = self.records.keys().map(|k| &k.owner).collect();
        owners.sort();
        owners.dedup();
        owners
    }

    /// A collection holding only the ports of `owner`, in insertion order
    #[must_use]
    pub fn restricted_to_owner(&self, owner: &str) -> Self {
        let mut builder = PortCollectionBuilder::new(format!("{} [{owner}]", self.label));
        builder.identity_scheme = self.identity_scheme.clone();
        builder.extend(
            self.records
                .values()
                .filter(|r| r.owner().as_str() == owner)
                .cloned(),
        );
        builder.build()
    }

    /// Log a single summary line if duplicate keys were collapsed.
    pub fn log_duplicate_summary(&self) {
        if self.duplicate_count > 0 {
            tracing::info!(
                duplicate_count = self.duplicate_count,
                "{}: {} repeated SWC/port pairs were collapsed (last declaration wins)",
                self.label,
                self.duplicate_count
            );
        }
    }

    /// Overwrite the content hash to simulate a collision.
    #[cfg(test)]
    pub(crate) fn with_content_hash(mut self, content_hash: u64) -> Self {
        self.content_hash = content_hash;
        self
    }

    fn compute_hash(records: &IndexMap<PortKey, PortRecord>) -> u64 {
        let mut sorted: Vec<_> = records.values().collect();
        sorted.sort_by(|a, b| (a.owner(), a.name()).cmp(&(b.owner(), b.name())));
        hash_fields(sorted.into_iter().flat_map(|r| {
            [
                Some(r.owner().as_str()),
                Some(r.name()),
                Some(r.direction().as_str()),
                r.source_id(),
            ]
        }))
    }
}

impl PartialEq for PortCollection {
    /// Two collections are equal when they hold the same records
    fn eq(&self, other: &Self) -> bool {
        self.content_hash == other.content_hash
            && self.records.len() == other.records.len()
            && self
                .records
                .iter()
                .all(|(k, v)| other.records.get(k) == Some(v))
    }
}

impl Eq for PortCollection {}

/// Accumulates records into a [`PortCollection`].
///
/// A repeated key replaces the earlier record in place (last writer wins)
/// and is counted as a duplicate.
#[derive(Debug, Clone)]
pub struct PortCollectionBuilder {
    label: String,
    identity_scheme: Option<String>,
    records: IndexMap<PortKey, PortRecord>,
    duplicate_count: usize,
}

impl PortCollectionBuilder {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            identity_scheme: None,
            records: IndexMap::new(),
            duplicate_count: 0,
        }
    }

    /// Declare the identity scheme the records were built with
    #[must_use]
    pub fn identity_scheme(mut self, scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        self.identity_scheme = (!scheme.trim().is_empty()).then_some(scheme);
        self
    }

    /// Add a record.
    ///
    /// Returns `true` if a record with the same key was already present.
    pub fn push(&mut self, record: PortRecord) -> bool {
        let replaced = self.upsert(record).is_some();
        if replaced {
            self.duplicate_count += 1;
        }
        replaced
    }

    /// Add a record, consuming and returning the builder
    #[must_use]
    pub fn with_record(mut self, record: PortRecord) -> Self {
        self.push(record);
        self
    }

    /// Insert or replace without counting a duplicate
    pub(crate) fn upsert(&mut self, record: PortRecord) -> Option<PortRecord> {
        self.records.insert(record.key(), record)
    }

    pub(crate) fn add_duplicates(&mut self, count: usize) {
        self.duplicate_count += count;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn build(self) -> PortCollection {
        let content_hash = PortCollection::compute_hash(&self.records);
        PortCollection {
            label: self.label,
            identity_scheme: self.identity_scheme,
            records: self.records,
            duplicate_count: self.duplicate_count,
            content_hash,
        }
    }
}

impl Extend<PortRecord> for PortCollectionBuilder {
    fn extend<T: IntoIterator<Item = PortRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}
