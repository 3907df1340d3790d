//! Order-preserving, first-occurrence-wins deduplication.

use std::collections::HashSet;

use crate::models::record::{CompositeRecord, FlatRecord};

/// Drop flat records equal on `(date, department, time, soap_section, content)`
/// to an earlier one.
#[must_use]
pub fn dedupe_flat(records: Vec<FlatRecord>) -> Vec<FlatRecord> {
    let mut seen: HashSet<FlatRecord> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

/// Drop composite records structurally equal to an earlier one.
///
/// Equality covers every field and ignores section order.
#[must_use]
pub fn dedupe_composite(records: Vec<CompositeRecord>) -> Vec<CompositeRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.canonical_key()))
        .collect()
}
