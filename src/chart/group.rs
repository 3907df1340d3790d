//! Fold flat section records into one composite record per encounter.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::chart::timestamp::convert_to_timestamp;
use crate::models::record::{CompositeRecord, FlatRecord, RecordKey};

/// Group flat records by `(date, department, time)` and fold their sections.
///
/// The result is sorted by ascending timestamp; records without a timestamp
/// come first. The sort is stable, so encounters with equal timestamps keep
/// the order in which they first appeared.
#[must_use]
pub fn group_records(records: &[FlatRecord]) -> Vec<CompositeRecord> {
    let mut grouped: IndexMap<RecordKey, CompositeRecord> = IndexMap::new();

    for record in records {
        let composite = grouped.entry(record.key()).or_insert_with(|| {
            let timestamp =
                convert_to_timestamp(Some(record.date.as_str()), Some(record.time.as_str()));
            if timestamp.is_none() {
                debug!(date = %record.date, time = %record.time, "no timestamp for encounter");
            }
            CompositeRecord::new(timestamp, record.department.clone())
        });

        match composite.sections.entry(record.soap_section.field_name()) {
            Entry::Vacant(slot) => {
                slot.insert(record.content.trim().to_string());
            }
            Entry::Occupied(mut slot) => merge_content(slot.get_mut(), record.content.trim()),
        }
    }

    let mut out: Vec<CompositeRecord> = grouped.into_values().collect();
    out.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    out
}

/// Append `addition` on a new line unless it is already contained in
/// `existing`.
///
/// This is substring suppression, not exact-duplicate detection: a short
/// section fully contained in a longer one is dropped as well.
pub fn merge_content(existing: &mut String, addition: &str) {
    if existing.contains(addition) {
        return;
    }
    existing.push('\n');
    existing.push_str(addition);
}
