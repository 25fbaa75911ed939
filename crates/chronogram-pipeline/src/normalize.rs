//! Row-local normalization of boolean-like and free-text columns.
//!
//! Source tables encode the same flag as "oui", "OUI", "Lot 2", "non",
//! an empty cell, or whatever a hand-edited spreadsheet accumulated.
//! Everything here is a pure function of one cell: malformed input
//! degrades to `false` or the empty string, never to an error.

/// Canonical value of a boolean-like cell.
///
/// True iff the trimmed, lowercased text equals "oui" or starts with
/// "lot" (deliveries staged in lots count as committed).
pub fn flag(raw: &str) -> bool {
    let value = raw.trim().to_lowercase();
    value == "oui" || value.starts_with("lot")
}

/// Canonical value of a free-text cell: absent becomes empty, present
/// text is passed through untouched.
pub fn text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_oui_any_case_and_padding() {
        assert!(flag("oui"));
        assert!(flag("OUI"));
        assert!(flag(" oui "));
        assert!(flag("Oui"));
    }

    #[test]
    fn flag_accepts_lot_prefix() {
        assert!(flag("Lot 3"));
        assert!(flag("lot1"));
        assert!(flag("  LOT 2 - pilote "));
    }

    #[test]
    fn flag_rejects_everything_else() {
        assert!(!flag("non"));
        assert!(!flag(""));
        assert!(!flag("NA"));
        assert!(!flag("yes"));
        assert!(!flag("ou"));
    }

    #[test]
    fn text_defaults_missing_to_empty() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some("")), "");
    }

    #[test]
    fn text_passes_present_values_through() {
        // No trimming or case folding here; downstream consumers decide.
        assert_eq!(text(Some(" Reconstruction ")), " Reconstruction ");
    }
}
