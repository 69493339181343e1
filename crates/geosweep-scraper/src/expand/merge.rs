//! First-seen-wins merge of location records keyed by external id.

use std::collections::HashSet;

use geosweep_core::{ExternalId, LocationRecord};

/// External ids already placed in an expansion result.
#[derive(Debug, Default, Clone)]
pub struct DedupIndex {
    seen: HashSet<String>,
}

impl DedupIndex {
    /// Records `id`, returning `true` if it had not been seen before.
    pub fn insert(&mut self, id: &ExternalId) -> bool {
        self.seen.insert(id.key())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Counters describing one expansion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Records returned by the center query, all kept.
    pub center_records: usize,
    /// Grid queries dispatched.
    pub grid_queries: usize,
    /// Grid records appended to the result.
    pub grid_added: usize,
    /// Grid records dropped because their id was already present.
    pub duplicates_dropped: usize,
    /// Grid records dropped because they carry no external id.
    pub missing_id_dropped: usize,
}

/// Ordered, deduplicated output of one expansion run.
///
/// The center records form the prefix in their original order. Grid records
/// follow in the order they were merged.
#[derive(Debug, Clone, Default)]
pub struct ExpansionResult {
    records: Vec<LocationRecord>,
    index: DedupIndex,
    stats: ExpansionStats,
}

impl ExpansionResult {
    /// Starts a result from the center query. Every center record is kept, in
    /// order, and every id it carries is indexed.
    #[must_use]
    pub fn seeded(center: Vec<LocationRecord>) -> Self {
        let mut index = DedupIndex::default();
        for id in center.iter().filter_map(LocationRecord::external_id) {
            index.insert(&id);
        }
        Self {
            stats: ExpansionStats {
                center_records: center.len(),
                ..ExpansionStats::default()
            },
            records: center,
            index,
        }
    }

    /// Appends the records of one grid query whose ids are new, preserving
    /// their relative order. Returns how many were appended.
    pub fn merge(&mut self, records: Vec<LocationRecord>) -> usize {
        let mut added = 0;
        for record in records {
            let Some(id) = record.external_id() else {
                self.stats.missing_id_dropped += 1;
                continue;
            };
            if self.index.insert(&id) {
                self.records.push(record);
                added += 1;
            } else {
                self.stats.duplicates_dropped += 1;
            }
        }
        self.stats.grid_added += added;
        added
    }

    pub(crate) fn set_grid_queries(&mut self, grid_queries: usize) {
        self.stats.grid_queries = grid_queries;
    }

    #[must_use]
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<LocationRecord> {
        self.records
    }

    #[must_use]
    pub fn stats(&self) -> ExpansionStats {
        self.stats
    }

    #[must_use]
    pub fn index(&self) -> &DedupIndex {
        &self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
