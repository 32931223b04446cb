//! Pure projections of an alert set. No state, no I/O.

use std::collections::HashSet;

use retention_core::models::{AlertCategory, AlertKey, AlertRecord, AlertSet};

/// Records of one category, in the order they were received.
pub fn by_category(set: &AlertSet, category: AlertCategory) -> Vec<&AlertRecord> {
    set.iter().filter(|r| r.category == category).collect()
}

/// Badge count: every record, duplicates included.
pub fn total_count(set: &AlertSet) -> usize {
    set.len()
}

/// Keys that occur more than once, each reported once in first-seen order.
/// Duplicates are a defect of the source; they are reported, never collapsed.
pub fn duplicate_keys(set: &AlertSet) -> Vec<AlertKey> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for record in set {
        let key = record.key();
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            duplicates.push(key);
        }
    }
    duplicates
}
