//! Quarter axis: the fixed sequence of quarter columns on a deck.
//!
//! Entries whose placement key falls outside the axis (including the
//! +infinity key of unparseable labels) have no column and end up on the
//! deck's unplaced panel.

use chronogram_core::Quarter;

/// Consecutive quarter columns, left to right.
#[derive(Clone, Debug)]
pub struct QuarterAxis {
    quarters: Vec<Quarter>,
}

impl QuarterAxis {
    /// Build an axis of `count` consecutive quarters starting at `start`.
    pub fn new(start: Quarter, count: usize) -> Self {
        let mut quarters = Vec::with_capacity(count);
        let mut current = start;
        for _ in 0..count {
            quarters.push(current);
            current = current.succ();
        }
        Self { quarters }
    }

    /// Default deck axis: eight quarters from T1/2025.
    pub fn default_axis() -> Self {
        Self::new(Quarter::new(2025, 1), 8)
    }

    /// Column index for a placement key, if the key is on the axis.
    pub fn column_for_key(&self, key: u32) -> Option<usize> {
        self.quarters.iter().position(|q| q.sort_key() == key)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.quarters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quarters.is_empty()
    }

    /// Column labels, left to right.
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        self.quarters.iter().map(Quarter::label)
    }
}

impl Default for QuarterAxis {
    fn default() -> Self {
        Self::default_axis()
    }
}
