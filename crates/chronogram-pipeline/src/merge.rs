//! Group merger: collapse sub-task rows into one entry per
//! (product, solution) pair.
//!
//! Rows are stable-sorted by placement key first; that order decides
//! which row donates the representative scalar fields and the order of
//! the per-subtask status pairs. Boolean fields are OR'd across the
//! group, so a single critical or containerized row marks the whole
//! entry.

use std::collections::HashMap;

use chronogram_core::{placement_key, MergedEntry, Quarter, RawRecord, SubtaskStatus};

/// Collapse rows into merged entries.
///
/// The result is sorted by (placement key, product, solution) so
/// downstream rendering is deterministic. Each entry's `subtasks` length
/// equals the number of rows that contributed to it.
pub fn merge_rows(mut rows: Vec<RawRecord>) -> Vec<MergedEntry> {
    // Stable sort: ties keep original row order, which also fixes the
    // representative row for entries whose labels all fail the grammar.
    rows.sort_by_key(|row| placement_key(&row.quarter));

    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut entries: Vec<MergedEntry> = Vec::new();

    for row in rows {
        let key = (row.product.clone(), row.solution.clone());
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                entries.push(seed_entry(&row));
                index.insert(key, entries.len() - 1);
                entries.len() - 1
            }
        };

        let entry = &mut entries[slot];
        entry.full_kube |= row.full_kube;
        entry.full_z |= row.full_z;
        entry.mosart |= row.mosart;
        entry.critical |= row.critical;
        entry.decommissioned |= row.decommissioned;
        entry.validated |= row.validated;

        let subtask = SubtaskStatus::new(&row.subtask, &row.realization);
        entry.realized |= subtask.is_realized();
        entry.subtasks.push(subtask);
    }

    entries.sort_by(|a, b| {
        (a.sort_key, &a.product, &a.solution).cmp(&(b.sort_key, &b.product, &b.solution))
    });
    entries
}

/// Start an entry from its temporally-first row: identity plus the
/// representative scalar fields.
fn seed_entry(row: &RawRecord) -> MergedEntry {
    MergedEntry {
        product: row.product.clone(),
        solution: row.solution.clone(),
        quarter: row.quarter.trim().to_string(),
        tribe: row.tribe.clone(),
        squad: row.squad.trim().to_string(),
        sort_key: placement_key(&row.quarter),
        full_kube: false,
        full_z: false,
        mosart: false,
        critical: false,
        decommissioned: false,
        validated: false,
        realized: false,
        subtasks: Vec::new(),
    }
}

/// Optional carry-over of critical deliveries: for every critical row
/// with a parseable planning label, append a copy planned one year
/// later. Rows whose label fails the grammar are left alone. Disabled
/// by default; only the explicit configuration toggle enables it.
pub fn carry_critical_rows(rows: &mut Vec<RawRecord>) {
    let carried: Vec<RawRecord> = rows
        .iter()
        .filter(|row| row.critical)
        .filter_map(|row| {
            let quarter = Quarter::parse(&row.quarter)?;
            let mut copy = row.clone();
            copy.quarter = quarter.next_year().label();
            Some(copy)
        })
        .collect();
    rows.extend(carried);
}
