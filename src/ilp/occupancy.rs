//! Occupancy derivation.
//!
//! A job with duration `p` started at slot `s` runs during `[s, s + p - 1]`.
//! Reading that backwards, the job is running at slot `t` iff it started in
//! the window `[max(0, t + 1 - p), t]`. The occupancy of `(job, t, day)` is
//! therefore the sum of the start variables over that window: a derived
//! linear expression, never a variable of its own.
//!
//! The plus-one window extends the upper end to `min(t + 1, T - 1)`. A job
//! that starts right after `t` then also counts as present at `t`, so two
//! jobs in the same plus-one group can neither overlap nor sit back to back.
//!
//! Windows are day-independent; [`OccupancyTable`] computes them once per
//! `(job, kind, slot)` and every constraint family reads them from there.

use std::ops::{Range, RangeInclusive};

use crate::models::{TimeGrid, WindowKind};

use super::{StartLayout, VarId};

/// Start slots whose job, of the given duration, occupies `slot`.
///
/// Clipped to the grid: never yields a slot outside `[0, slots_per_day)`.
/// `duration` must be at least 1 and `slot < slots_per_day`.
pub fn occupancy_window(
    duration: usize,
    slot: usize,
    slots_per_day: usize,
    kind: WindowKind,
) -> RangeInclusive<usize> {
    debug_assert!(duration >= 1 && slot < slots_per_day);
    let lo = (slot + 1).saturating_sub(duration);
    let hi = match kind {
        WindowKind::Standard => slot,
        WindowKind::PlusOne => (slot + 1).min(slots_per_day - 1),
    };
    lo..=hi
}

/// Slots in which a job started at `start` is counted as occupying,
/// clipped to the grid.
///
/// This is the forward view of [`occupancy_window`]:
/// `t ∈ occupied_slots(p, s, ..)` iff `s ∈ occupancy_window(p, t, ..)`.
pub fn occupied_slots(
    duration: usize,
    start: usize,
    slots_per_day: usize,
    kind: WindowKind,
) -> Range<usize> {
    let end = (start + duration).min(slots_per_day);
    match kind {
        WindowKind::Standard => start..end,
        WindowKind::PlusOne => start.saturating_sub(1)..end,
    }
}

/// Precomputed occupancy windows for every `(job, kind, slot)`.
#[derive(Debug, Clone)]
pub struct OccupancyTable {
    slots_per_day: usize,
    windows: Vec<RangeInclusive<usize>>,
}

impl OccupancyTable {
    /// Derives all windows for the given job durations.
    pub fn new(grid: TimeGrid, durations: &[usize]) -> Self {
        let t_max = grid.slots_per_day;
        let mut windows = Vec::with_capacity(durations.len() * WindowKind::ALL.len() * t_max);
        for &p in durations {
            for kind in WindowKind::ALL {
                for t in 0..t_max {
                    windows.push(occupancy_window(p, t, t_max, kind));
                }
            }
        }
        Self {
            slots_per_day: t_max,
            windows,
        }
    }

    /// Start window of `job` at `slot`.
    #[inline]
    pub fn window(&self, job: usize, kind: WindowKind, slot: usize) -> RangeInclusive<usize> {
        let idx = (job * WindowKind::ALL.len() + kind.index()) * self.slots_per_day + slot;
        self.windows[idx].clone()
    }

    /// Start variables summed by the occupancy of `(job, slot, day)`.
    pub fn terms<'a>(
        &self,
        layout: &'a StartLayout,
        job: usize,
        kind: WindowKind,
        slot: usize,
        day: usize,
    ) -> impl Iterator<Item = VarId> + 'a {
        self.window(job, kind, slot)
            .map(move |s| layout.start_var(job, s, day))
    }

    /// Number of cached windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standard_window() {
        // p = 4, T = 23
        assert_eq!(occupancy_window(4, 0, 23, WindowKind::Standard), 0..=0);
        assert_eq!(occupancy_window(4, 2, 23, WindowKind::Standard), 0..=2);
        assert_eq!(occupancy_window(4, 10, 23, WindowKind::Standard), 7..=10);
        assert_eq!(occupancy_window(4, 22, 23, WindowKind::Standard), 19..=22);
    }

    #[test]
    fn test_plus_one_window_clipped() {
        assert_eq!(occupancy_window(2, 0, 4, WindowKind::PlusOne), 0..=1);
        assert_eq!(occupancy_window(2, 2, 4, WindowKind::PlusOne), 1..=3);
        // upper end capped at T - 1
        assert_eq!(occupancy_window(2, 3, 4, WindowKind::PlusOne), 2..=3);
    }

    #[test]
    fn test_unit_duration() {
        assert_eq!(occupancy_window(1, 5, 10, WindowKind::Standard), 5..=5);
        assert_eq!(occupancy_window(1, 5, 10, WindowKind::PlusOne), 5..=6);
    }

    #[test]
    fn test_occupied_slots() {
        assert_eq!(occupied_slots(3, 2, 10, WindowKind::Standard), 2..5);
        assert_eq!(occupied_slots(3, 2, 10, WindowKind::PlusOne), 1..5);
        assert_eq!(occupied_slots(3, 0, 10, WindowKind::PlusOne), 0..3);
        // overflowing start is clipped at the day end
        assert_eq!(occupied_slots(3, 8, 10, WindowKind::Standard), 8..10);
    }

    #[test]
    fn test_table_lookup_matches_pure_function() {
        let grid = TimeGrid::new(6, 2);
        let durations = [1, 3, 6];
        let table = OccupancyTable::new(grid, &durations);
        assert_eq!(table.len(), 3 * 2 * 6);
        for (j, &p) in durations.iter().enumerate() {
            for kind in WindowKind::ALL {
                for t in 0..6 {
                    assert_eq!(table.window(j, kind, t), occupancy_window(p, t, 6, kind));
                }
            }
        }
    }

    #[test]
    fn test_terms_address_the_right_day() {
        let grid = TimeGrid::new(4, 2);
        let layout = StartLayout::new(grid, 2);
        let table = OccupancyTable::new(grid, &[2, 1]);
        let terms: Vec<_> = table.terms(&layout, 0, WindowKind::Standard, 2, 1).collect();
        assert_eq!(
            terms,
            vec![layout.start_var(0, 1, 1), layout.start_var(0, 2, 1)]
        );
    }

    proptest! {
        #[test]
        fn prop_standard_occupancy_is_start_plus_duration(
            t_max in 1usize..30,
            p_raw in 1usize..30,
            s_raw in 0usize..30,
        ) {
            let p = 1 + p_raw % t_max;
            let s = s_raw % t_max;
            for t in 0..t_max {
                let counted = occupancy_window(p, t, t_max, WindowKind::Standard).contains(&s);
                prop_assert_eq!(counted, t >= s && t < s + p);
            }
        }

        #[test]
        fn prop_plus_one_also_guards_adjacent_slot(
            t_max in 1usize..30,
            p_raw in 1usize..30,
            s_raw in 0usize..30,
        ) {
            let p = 1 + p_raw % t_max;
            let s = s_raw % t_max;
            for t in 0..t_max {
                let counted = occupancy_window(p, t, t_max, WindowKind::PlusOne).contains(&s);
                prop_assert_eq!(counted, t + 1 >= s && t < s + p);
            }
        }

        #[test]
        fn prop_forward_and_backward_views_agree(
            t_max in 1usize..25,
            p_raw in 1usize..25,
            s_raw in 0usize..25,
            plus_one in any::<bool>(),
        ) {
            let p = 1 + p_raw % t_max;
            let s = s_raw % t_max;
            let kind = if plus_one { WindowKind::PlusOne } else { WindowKind::Standard };
            let forward = occupied_slots(p, s, t_max, kind);
            for t in 0..t_max {
                prop_assert_eq!(
                    forward.contains(&t),
                    occupancy_window(p, t, t_max, kind).contains(&s)
                );
            }
        }
    }
}
