//! # chronogram-pipeline
//!
//! The data transformation pipeline of the chronogram generator: raw
//! sub-task rows in, placement-ready merged entries and statistics out.
//!
//! This crate provides:
//! - Row normalization of boolean-like and text columns ([`normalize`])
//! - Exclusion of not-applicable rows ([`filter`])
//! - Group merging per (product, solution) pair ([`merge`])
//! - Per-tribe completion statistics ([`stats`])
//!
//! The pipeline has no fatal error paths: malformed input degrades to
//! false flags, empty text, or an infinite placement key. The only
//! anomaly signals are informational counts on the output.
//!
//! ## Example
//!
//! ```rust
//! use chronogram_core::RawRecord;
//! use chronogram_pipeline::Pipeline;
//!
//! let rows = vec![
//!     RawRecord::new("PRD-12", "SOL-3")
//!         .tribe("Payments")
//!         .quarter("T1/2025")
//!         .subtask("reconstruction")
//!         .realization("oui"),
//! ];
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2025, 8, 23).unwrap();
//! let chronogram = Pipeline::new().run("Payments", &rows, today);
//! assert_eq!(chronogram.entries.len(), 1);
//! assert_eq!(chronogram.stats.realized, 1);
//! ```

pub mod filter;
pub mod merge;
pub mod normalize;
pub mod stats;

pub use merge::{carry_critical_rows, merge_rows};

use chrono::NaiveDate;
use chronogram_core::{Quarter, RawRecord, TribeChronogram};

/// One-pass batch pipeline: normalize -> filter -> key -> merge -> count.
///
/// Tribes are processed independently; nothing carries over between
/// [`Pipeline::run`] calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pipeline {
    /// Duplicate critical rows one year out before merging. Off by
    /// default; source processes disagree on whether this step belongs
    /// to the pipeline, so it stays an explicit toggle.
    pub carry_critical: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the critical carry-over pass.
    pub fn carry_critical(mut self, enabled: bool) -> Self {
        self.carry_critical = enabled;
        self
    }

    /// Run the full pipeline for one tribe.
    ///
    /// `rows` may span several tribes; only rows matching `tribe` are
    /// consumed. `today` anchors the lateness comparison.
    pub fn run(&self, tribe: &str, rows: &[RawRecord], today: NaiveDate) -> TribeChronogram {
        let tribe_rows: Vec<RawRecord> =
            rows.iter().filter(|row| row.tribe == tribe).cloned().collect();

        let initial = tribe_rows.len();
        let mut surviving: Vec<RawRecord> = tribe_rows
            .into_iter()
            .filter(|row| !filter::is_not_applicable(&row.realization))
            .collect();
        let excluded_rows = initial - surviving.len();

        if self.carry_critical {
            carry_critical_rows(&mut surviving);
        }

        let observed_quarters = surviving
            .iter()
            .filter_map(|row| Quarter::parse(&row.quarter))
            .map(|quarter| quarter.label())
            .collect();

        let entries = merge_rows(surviving);
        let unplaced = entries.iter().filter(|entry| !entry.is_placed()).count();
        let stats = stats::compute(&entries, today);

        TribeChronogram {
            tribe: tribe.to_string(),
            entries,
            stats,
            observed_quarters,
            excluded_rows,
            unplaced,
        }
    }
}
