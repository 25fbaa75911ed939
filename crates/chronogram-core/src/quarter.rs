//! Calendar quarter labels and placement keys.
//!
//! Delivery rows carry a free-text planning label with the fixed grammar
//! `T<1-4>/<four-digit year>` (e.g. `T3/2025`). Labels map to a total
//! order key `year * 10 + quarter`, which orders quarters chronologically
//! because consecutive years differ by 10 and quarters occupy offsets
//! 1..=4. A label that fails the grammar gets [`UNPLACED_KEY`] and sorts
//! last; the renderer reports such entries as "unknown placement".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Placement key for labels that fail the quarter grammar.
///
/// Acts as "+infinity": unplaceable rows sort after every real quarter.
pub const UNPLACED_KEY: u32 = u32::MAX;

/// A calendar quarter, `T<quarter>/<year>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quarter {
    /// Four-digit calendar year
    pub year: i32,
    /// Quarter number, 1..=4
    pub quarter: u8,
}

impl Quarter {
    pub const fn new(year: i32, quarter: u8) -> Self {
        Self { year, quarter }
    }

    /// Parse a planning label of the form `T<1-4>/<YYYY>` (surrounding
    /// whitespace ignored). Returns `None` for anything else; parsing
    /// never fails loudly.
    pub fn parse(label: &str) -> Option<Self> {
        let rest = label.trim().strip_prefix('T')?;
        let mut chars = rest.chars();
        let quarter = chars.next()?.to_digit(10)?;
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let year = chars.as_str().strip_prefix('/')?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            year: year.parse().ok()?,
            quarter: quarter as u8,
        })
    }

    /// Total-order placement key: `year * 10 + quarter`.
    pub fn sort_key(&self) -> u32 {
        self.year as u32 * 10 + u32::from(self.quarter)
    }

    /// The quarter containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as u8,
        }
    }

    /// Same quarter, one year later. Used by the optional critical
    /// carry-over pass.
    pub fn next_year(&self) -> Self {
        Self {
            year: self.year + 1,
            quarter: self.quarter,
        }
    }

    /// Canonical label form, `T<q>/<year>`.
    pub fn label(&self) -> String {
        format!("T{}/{:04}", self.quarter, self.year)
    }

    /// The quarter immediately after this one.
    pub fn succ(&self) -> Self {
        if self.quarter == 4 {
            Self { year: self.year + 1, quarter: 1 }
        } else {
            Self { year: self.year, quarter: self.quarter + 1 }
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Placement key for a raw planning label.
///
/// Parseable labels map to their [`Quarter::sort_key`]; everything else
/// maps to [`UNPLACED_KEY`] and sorts last.
pub fn placement_key(label: &str) -> u32 {
    Quarter::parse(label).map_or(UNPLACED_KEY, |q| q.sort_key())
}
