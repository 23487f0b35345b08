//! Discretized weekly time grid.
//!
//! The week is a `days × slots_per_day` lattice. Slots are fixed-length
//! periods (e.g. 30 minutes) counted from the first teaching period of the
//! day; days are counted from the first teaching day of the week.
//!
//! # Indexing
//! All indices are 0-based. A `(slot, day)` pair identifies one cell of the
//! grid; a [`SlotKey`] additionally carries the job index so start decisions
//! can be addressed without going through display text.

use serde::{Deserialize, Serialize};

/// The discretized time domain of a timetabling run.
///
/// Immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Number of slots in one day.
    pub slots_per_day: usize,
    /// Number of days in the week.
    pub days: usize,
}

impl TimeGrid {
    /// Creates a new grid.
    pub fn new(slots_per_day: usize, days: usize) -> Self {
        Self {
            slots_per_day,
            days,
        }
    }

    /// Total number of (slot, day) cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.slots_per_day * self.days
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Whether `slot` is a valid slot index.
    #[inline]
    pub fn contains_slot(&self, slot: usize) -> bool {
        slot < self.slots_per_day
    }

    /// Whether `day` is a valid day index.
    #[inline]
    pub fn contains_day(&self, day: usize) -> bool {
        day < self.days
    }

    /// Last start slot at which a job of `duration` slots still ends inside
    /// the day. `None` if the job cannot fit at all.
    pub fn latest_start(&self, duration: usize) -> Option<usize> {
        if duration == 0 || duration > self.slots_per_day {
            None
        } else {
            Some(self.slots_per_day - duration)
        }
    }

    /// Iterates every `(slot, day)` cell, day-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.days).flat_map(move |day| (0..self.slots_per_day).map(move |slot| (slot, day)))
    }
}

/// Structured key of a start decision: job `job` starts at `slot` on `day`.
///
/// `job` is the declaration index in the job catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Job declaration index.
    pub job: usize,
    /// Slot index within the day.
    pub slot: usize,
    /// Day index within the week.
    pub day: usize,
}

impl SlotKey {
    /// Creates a new key.
    pub fn new(job: usize, slot: usize, day: usize) -> Self {
        Self { job, slot, day }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cells() {
        let grid = TimeGrid::new(3, 2);
        assert_eq!(grid.cell_count(), 6);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_grid_bounds() {
        let grid = TimeGrid::new(23, 5);
        assert!(grid.contains_slot(22));
        assert!(!grid.contains_slot(23));
        assert!(grid.contains_day(4));
        assert!(!grid.contains_day(5));
        assert!(!grid.is_empty());
        assert!(TimeGrid::new(0, 5).is_empty());
    }

    #[test]
    fn test_latest_start() {
        let grid = TimeGrid::new(4, 1);
        assert_eq!(grid.latest_start(2), Some(2));
        assert_eq!(grid.latest_start(4), Some(0));
        assert_eq!(grid.latest_start(5), None);
        assert_eq!(grid.latest_start(0), None);
    }
}
