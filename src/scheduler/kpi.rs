//! Timetable quality metrics (KPIs).
//!
//! Recomputes the objective terms of a decoded timetable from the
//! configuration, independently of the solver.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Preference cost | Σ w[start slot] over all entries |
//! | Congestion penalty | Σ over cells of max(0, contended jobs running - 1) |
//! | Peak contended | Largest number of contended jobs running in one cell |
//! | Entries per day | Classes starting on each day |
//!
//! Preference cost plus congestion penalty equals the objective of an
//! optimal assignment.

use std::collections::HashSet;

use crate::config::TimetableConfig;
use crate::ilp::occupied_slots;
use crate::models::{Timetable, WindowKind};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Sum of start-slot weights of the active profile.
    pub preference_cost: f64,
    /// Sum of congestion excess over all cells.
    pub congestion_penalty: f64,
    /// Largest number of contended jobs running in one cell.
    pub peak_contended: usize,
    /// Number of entries per day index.
    pub entries_per_day: Vec<usize>,
}

impl TimetableKpi {
    /// Computes KPIs for a timetable decoded from `config`.
    ///
    /// Entries whose job is unknown to the configuration still count towards
    /// `entries_per_day` but carry no weight.
    pub fn calculate(timetable: &Timetable, config: &TimetableConfig) -> Self {
        let grid = config.grid;
        let weights = config
            .active_weights()
            .map(|p| p.weights.as_slice())
            .unwrap_or(&[]);

        let mut entries_per_day = vec![0; grid.days];
        let mut preference_cost = 0.0;
        for entry in &timetable.entries {
            if let Some(count) = entries_per_day.get_mut(entry.day) {
                *count += 1;
            }
            if config.jobs.contains(&entry.job_id) {
                preference_cost += weights.get(entry.start_slot).copied().unwrap_or(0.0);
            }
        }

        let contended: HashSet<&str> = config.contended.iter().map(String::as_str).collect();
        let mut running = vec![0usize; grid.cell_count()];
        for entry in &timetable.entries {
            if !contended.contains(entry.job_id.as_str()) || !grid.contains_day(entry.day) {
                continue;
            }
            let slots = occupied_slots(
                entry.duration(),
                entry.start_slot,
                grid.slots_per_day,
                WindowKind::Standard,
            );
            for slot in slots {
                running[entry.day * grid.slots_per_day + slot] += 1;
            }
        }
        let congestion_penalty = running.iter().map(|&n| n.saturating_sub(1) as f64).sum();
        let peak_contended = running.iter().copied().max().unwrap_or(0);

        Self {
            preference_cost,
            congestion_penalty,
            peak_contended,
            entries_per_day,
        }
    }

    /// Preference cost plus congestion penalty.
    pub fn total_cost(&self) -> f64 {
        self.preference_cost + self.congestion_penalty
    }

    /// Day with the most entries (lowest index on ties).
    pub fn busiest_day(&self) -> Option<usize> {
        self.entries_per_day
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(d, _)| d)
    }

    /// Whether the timetable stays within the given congestion budget.
    pub fn meets_thresholds(&self, max_congestion: f64, max_peak: usize) -> bool {
        self.congestion_penalty <= max_congestion && self.peak_contended <= max_peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, ScheduleEntry, SolveStatus, TimeGrid};

    fn entry(id: &str, day: usize, start: usize, duration: usize) -> ScheduleEntry {
        ScheduleEntry {
            job_id: id.into(),
            day,
            start_slot: start,
            end_slot: start + duration,
            day_label: String::new(),
            start_label: String::new(),
            end_label: String::new(),
            name: id.into(),
        }
    }

    fn config() -> TimetableConfig {
        TimetableConfig::new("kpi", TimeGrid::new(6, 3))
            .with_jobs([Job::new("A", 2), Job::new("B", 2), Job::new("C", 1)])
            .with_contended(["A", "B"])
            .with_weights([0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn test_kpi_basic() {
        let cfg = config();
        let t = Timetable::new(
            vec![entry("A", 0, 1, 2), entry("B", 0, 2, 2), entry("C", 2, 5, 1)],
            0.0,
            SolveStatus::Optimal,
        );
        let kpi = TimetableKpi::calculate(&t, &cfg);
        assert!((kpi.preference_cost - 8.0).abs() < 1e-12);
        // A and B share slot 2 on day 0
        assert!((kpi.congestion_penalty - 1.0).abs() < 1e-12);
        assert_eq!(kpi.peak_contended, 2);
        assert_eq!(kpi.entries_per_day, vec![2, 0, 1]);
        assert_eq!(kpi.busiest_day(), Some(0));
        assert!((kpi.total_cost() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_kpi_no_congestion_when_apart() {
        let cfg = config();
        let t = Timetable::new(
            vec![entry("A", 0, 0, 2), entry("B", 1, 0, 2), entry("C", 0, 0, 1)],
            0.0,
            SolveStatus::Optimal,
        );
        let kpi = TimetableKpi::calculate(&t, &cfg);
        assert_eq!(kpi.congestion_penalty, 0.0);
        assert_eq!(kpi.peak_contended, 1);
        assert!(kpi.meets_thresholds(0.0, 1));
        assert!(!kpi.meets_thresholds(0.0, 0));
    }

    #[test]
    fn test_kpi_empty_timetable() {
        let cfg = config();
        let t = Timetable::new(Vec::new(), 0.0, SolveStatus::Optimal);
        let kpi = TimetableKpi::calculate(&t, &cfg);
        assert_eq!(kpi.preference_cost, 0.0);
        assert_eq!(kpi.peak_contended, 0);
        assert_eq!(kpi.entries_per_day, vec![0, 0, 0]);
        assert_eq!(kpi.busiest_day(), Some(0));
    }

    #[test]
    fn test_busiest_day_tie_prefers_first() {
        let kpi = TimetableKpi {
            preference_cost: 0.0,
            congestion_penalty: 0.0,
            peak_contended: 0,
            entries_per_day: vec![1, 3, 3],
        };
        assert_eq!(kpi.busiest_day(), Some(1));
    }
}
