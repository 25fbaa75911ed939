//! # chronogram-core
//!
//! Core domain model for the chronogram delivery-timeline generator.
//!
//! This crate provides:
//! - Input/output types: [`RawRecord`], [`MergedEntry`], [`TribeChronogram`]
//! - Quarter labels and placement keys ([`quarter`])
//! - Squad color assignment ([`palette`])
//! - Error types for the rendering boundary
//!
//! ## Example
//!
//! ```rust
//! use chronogram_core::{placement_key, RawRecord};
//!
//! let row = RawRecord::new("PRD-12", "SOL-3")
//!     .tribe("Payments")
//!     .squad("Squad Alpha")
//!     .quarter("T3/2025")
//!     .full_kube(true);
//!
//! assert_eq!(placement_key(&row.quarter), 20253);
//! ```

pub mod palette;
pub mod quarter;

pub use palette::{derive_color, Rgb, SquadPalette};
pub use quarter::{placement_key, Quarter, UNPLACED_KEY};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Input rows
// ============================================================================

/// One normalized input row: a single sub-task of a (product, solution)
/// delivery. Immutable once loaded; the loader applies flag and text
/// normalization while building it.
///
/// `validated` and `realization` are distinct columns: `validated` is a
/// boolean sign-off flag, `realization` is the per-subtask completion
/// text ("oui"/"non"/"NR"/"NA"/...). Source tables disagree on which
/// column carries which meaning, so both are independently configurable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Product identifier
    pub product: String,
    /// Solution identifier (second half of the grouping key)
    pub solution: String,
    /// Organizational unit; one output deck per distinct value
    pub tribe: String,
    /// Owning sub-team; drives box colors
    pub squad: String,
    /// Free-text planning label, expected form `T<1-4>/<YYYY>`
    pub quarter: String,
    /// Fully containerized
    pub full_kube: bool,
    /// Fully on the Z platform
    pub full_z: bool,
    /// Mosart-managed
    pub mosart: bool,
    /// Criticality flag
    pub critical: bool,
    /// Scheduled for decommissioning
    pub decommissioned: bool,
    /// Sign-off flag
    pub validated: bool,
    /// Sub-task type label (e.g. "reconstruction"); empty when absent
    pub subtask: String,
    /// Per-subtask completion text; empty when absent
    pub realization: String,
}

impl RawRecord {
    /// Create a record for the given (product, solution) pair.
    pub fn new(product: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            solution: solution.into(),
            ..Self::default()
        }
    }

    /// Set the tribe
    pub fn tribe(mut self, tribe: impl Into<String>) -> Self {
        self.tribe = tribe.into();
        self
    }

    /// Set the squad
    pub fn squad(mut self, squad: impl Into<String>) -> Self {
        self.squad = squad.into();
        self
    }

    /// Set the planning label
    pub fn quarter(mut self, quarter: impl Into<String>) -> Self {
        self.quarter = quarter.into();
        self
    }

    /// Set the full-kube flag
    pub fn full_kube(mut self, value: bool) -> Self {
        self.full_kube = value;
        self
    }

    /// Set the full-z flag
    pub fn full_z(mut self, value: bool) -> Self {
        self.full_z = value;
        self
    }

    /// Set the mosart flag
    pub fn mosart(mut self, value: bool) -> Self {
        self.mosart = value;
        self
    }

    /// Set the criticality flag
    pub fn critical(mut self, value: bool) -> Self {
        self.critical = value;
        self
    }

    /// Set the decommissioning flag
    pub fn decommissioned(mut self, value: bool) -> Self {
        self.decommissioned = value;
        self
    }

    /// Set the sign-off flag
    pub fn validated(mut self, value: bool) -> Self {
        self.validated = value;
        self
    }

    /// Set the sub-task type label
    pub fn subtask(mut self, subtask: impl Into<String>) -> Self {
        self.subtask = subtask.into();
        self
    }

    /// Set the per-subtask completion text
    pub fn realization(mut self, realization: impl Into<String>) -> Self {
        self.realization = realization.into();
        self
    }
}

// ============================================================================
// Merged entries
// ============================================================================

/// One (type, status) pair of a merged entry, from one contributing row.
///
/// Both fields are stored trimmed and lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskStatus {
    /// Sub-task type label; may be empty
    pub kind: String,
    /// Completion text; may be empty
    pub status: String,
}

impl SubtaskStatus {
    /// Build from raw text, normalizing both fields.
    pub fn new(kind: &str, status: &str) -> Self {
        Self {
            kind: kind.trim().to_lowercase(),
            status: status.trim().to_lowercase(),
        }
    }

    /// A sub-task is individually realized iff its completion text is
    /// exactly "oui".
    pub fn is_realized(&self) -> bool {
        self.status == "oui"
    }
}

/// One timeline box: all rows of a (product, solution) pair collapsed.
///
/// Scalar fields come from the temporally-first contributing row; boolean
/// fields are OR'd across the group; `subtasks` keeps one pair per
/// contributing row in temporal order, never deduplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEntry {
    /// Product identifier
    pub product: String,
    /// Solution identifier
    pub solution: String,
    /// Planning label of the earliest contributing row
    pub quarter: String,
    /// Tribe of the earliest contributing row
    pub tribe: String,
    /// Squad of the earliest contributing row
    pub squad: String,
    /// Cached placement key of `quarter`
    pub sort_key: u32,
    /// Any contributing row fully containerized
    pub full_kube: bool,
    /// Any contributing row fully on Z
    pub full_z: bool,
    /// Any contributing row mosart-managed
    pub mosart: bool,
    /// Any contributing row critical
    pub critical: bool,
    /// Any contributing row scheduled for decommissioning
    pub decommissioned: bool,
    /// Any contributing row signed off
    pub validated: bool,
    /// Any contributing row with completion text "oui"
    pub realized: bool,
    /// Ordered (type, status) pairs, one per contributing row
    pub subtasks: Vec<SubtaskStatus>,
}

impl MergedEntry {
    /// Display label used on timeline boxes.
    pub fn title(&self) -> String {
        format!("{}-{}", self.product, self.solution)
    }

    /// True when the planning label parsed as a quarter.
    pub fn is_placed(&self) -> bool {
        self.sort_key != UNPLACED_KEY
    }

    /// Every non-empty sub-task type in the pair list has at least one
    /// realized row. Realization is settled per type, so a realized row
    /// covers duplicate pairs of the same type, exactly as
    /// [`has_pending_subtask`](Self::has_pending_subtask) sees them.
    /// Vacuously true when no pair has a type.
    pub fn fully_realized_by_type(&self) -> bool {
        self.subtasks
            .iter()
            .filter(|s| !s.kind.is_empty())
            .all(|s| !self.has_pending_subtask(&s.kind))
    }

    /// Whether any contributing row carries the given sub-task type and
    /// none of the rows of that type is realized yet.
    pub fn has_pending_subtask(&self, kind: &str) -> bool {
        let mut seen = false;
        let mut realized = false;
        for subtask in self.subtasks.iter().filter(|s| s.kind == kind) {
            seen = true;
            realized |= subtask.is_realized();
        }
        seen && !realized
    }
}

// ============================================================================
// Per-tribe output
// ============================================================================

/// Completion statistics over one tribe's merged entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TribeStats {
    /// Number of merged entries
    pub total: usize,
    /// Entries with the sign-off flag set
    pub validated: usize,
    /// Entries realized (any contributing row "oui")
    pub realized: usize,
    /// Entries fully containerized
    pub full_kube: usize,
    /// Entries fully on Z
    pub full_z: usize,
    /// Entries mosart-managed
    pub mosart: usize,
    /// Entries planned in a past quarter and not realized
    pub late: usize,
}

/// Everything the renderer needs for one tribe: merged entries in
/// placement order, statistics, the distinct quarter labels observed,
/// and the informational side channels of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TribeChronogram {
    /// Tribe name
    pub tribe: String,
    /// Merged entries, sorted by (placement key, product, solution)
    pub entries: Vec<MergedEntry>,
    /// Completion statistics over `entries`
    pub stats: TribeStats,
    /// Distinct parseable quarter labels seen in the input rows
    pub observed_quarters: BTreeSet<String>,
    /// Rows dropped by the NA/NR rule, for reporting
    pub excluded_rows: usize,
    /// Entries whose planning label failed the quarter grammar
    pub unplaced: usize,
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering for one tribe's deck.
///
/// The palette is shared across tribes so a squad keeps its derived
/// color throughout one run; rendering may extend it for unseen squads.
pub trait DeckRenderer {
    type Output;

    /// Render a tribe chronogram to the output format
    fn render(
        &self,
        chronogram: &TribeChronogram,
        palette: &mut SquadPalette,
    ) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry_with_subtasks(pairs: &[(&str, &str)]) -> MergedEntry {
        MergedEntry {
            product: "PRD".into(),
            solution: "SOL".into(),
            quarter: "T1/2025".into(),
            tribe: "Tribe".into(),
            squad: "Squad".into(),
            sort_key: 20251,
            full_kube: false,
            full_z: false,
            mosart: false,
            critical: false,
            decommissioned: false,
            validated: false,
            realized: false,
            subtasks: pairs
                .iter()
                .map(|(kind, status)| SubtaskStatus::new(kind, status))
                .collect(),
        }
    }

    #[test]
    fn record_builder() {
        let row = RawRecord::new("PRD-12", "SOL-3")
            .tribe("Payments")
            .squad("Squad Alpha")
            .quarter("T3/2025")
            .full_kube(true)
            .critical(true)
            .subtask("Reconstruction")
            .realization("oui");

        assert_eq!(row.product, "PRD-12");
        assert_eq!(row.solution, "SOL-3");
        assert!(row.full_kube);
        assert!(row.critical);
        assert!(!row.mosart);
        assert_eq!(row.realization, "oui");
    }

    #[test]
    fn subtask_status_normalizes() {
        let s = SubtaskStatus::new("  Reconstruction ", " OUI ");
        assert_eq!(s.kind, "reconstruction");
        assert_eq!(s.status, "oui");
        assert!(s.is_realized());

        assert!(!SubtaskStatus::new("resynchro", "non").is_realized());
        assert!(!SubtaskStatus::new("resynchro", "").is_realized());
    }

    #[test]
    fn fully_realized_all_types_done() {
        let entry = entry_with_subtasks(&[("reconstruction", "oui")]);
        assert!(entry.fully_realized_by_type());
    }

    #[test]
    fn fully_realized_fails_on_pending_type() {
        let entry = entry_with_subtasks(&[("reconstruction", "oui"), ("resynchro", "non")]);
        assert!(!entry.fully_realized_by_type());
    }

    #[test]
    fn fully_realized_settles_duplicate_types_per_type() {
        // One realized row covers its type; the pending "non" duplicate
        // does not hold the entry back.
        let entry = entry_with_subtasks(&[
            ("reconstruction", "non"),
            ("reconstruction", "oui"),
        ]);
        assert!(entry.fully_realized_by_type());
        assert!(!entry.has_pending_subtask("reconstruction"));
    }

    #[test]
    fn fully_realized_vacuous_without_types() {
        let entry = entry_with_subtasks(&[("", ""), ("", "non")]);
        assert!(entry.fully_realized_by_type());
    }

    #[test]
    fn pending_subtask_detection() {
        let entry = entry_with_subtasks(&[
            ("reconstruction", "non"),
            ("restauration bdd", "oui"),
        ]);
        assert!(entry.has_pending_subtask("reconstruction"));
        assert!(!entry.has_pending_subtask("restauration bdd"));
        assert!(!entry.has_pending_subtask("resynchronisation"));
    }

    #[test]
    fn pending_subtask_any_realized_row_clears_it() {
        // Duplicate type labels: one realized row clears the marker.
        let entry = entry_with_subtasks(&[
            ("reconstruction", "non"),
            ("reconstruction", "oui"),
        ]);
        assert!(!entry.has_pending_subtask("reconstruction"));
    }

    #[test]
    fn entry_title_and_placement() {
        let mut entry = entry_with_subtasks(&[]);
        assert_eq!(entry.title(), "PRD-SOL");
        assert!(entry.is_placed());

        entry.sort_key = UNPLACED_KEY;
        assert!(!entry.is_placed());
    }
}
