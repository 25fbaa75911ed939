//! Exclusion of not-applicable rows.
//!
//! A realization text of "NR" or "NA" marks a sub-task as not required
//! for this delivery, which is semantically distinct from "not yet
//! done". Such rows are dropped before grouping; the dropped count is
//! surfaced per tribe as an informational side channel.

/// True when the realization text marks the row as not applicable.
pub fn is_not_applicable(realization: &str) -> bool {
    matches!(realization.trim().to_uppercase().as_str(), "NR" | "NA")
}
