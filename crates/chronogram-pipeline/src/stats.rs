//! Per-tribe completion statistics.
//!
//! Plain counting over the merged entries, order-independent, recomputed
//! fresh for every tribe. "Late" compares each entry's placement key to
//! the key of the quarter containing the processing date.

use chrono::NaiveDate;
use chronogram_core::{MergedEntry, Quarter, TribeStats};

/// Count completion criteria over one tribe's merged entries.
pub fn compute(entries: &[MergedEntry], today: NaiveDate) -> TribeStats {
    let current_key = Quarter::from_date(today).sort_key();

    let mut stats = TribeStats {
        total: entries.len(),
        ..TribeStats::default()
    };

    for entry in entries {
        if entry.validated {
            stats.validated += 1;
        }
        if entry.realized {
            stats.realized += 1;
        }
        if entry.full_kube {
            stats.full_kube += 1;
        }
        if entry.full_z {
            stats.full_z += 1;
        }
        if entry.mosart {
            stats.mosart += 1;
        }
        // Planned in a past quarter and still not realized. Unplaceable
        // entries carry the +infinity key and are never counted late.
        if !entry.realized && entry.sort_key < current_key {
            stats.late += 1;
        }
    }

    stats
}
