//! Timetable (decoded solution) model.
//!
//! A timetable holds one entry per job, carrying both the structured
//! position (slot and day indices) and its display labels, plus the
//! objective value the solver achieved.

use serde::{Deserialize, Serialize};

/// How good the returned assignment is known to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Best assignment found before a time or gap limit; possibly suboptimal.
    BestFound,
}

/// One scheduled job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Job id.
    pub job_id: String,
    /// Day index.
    pub day: usize,
    /// Start slot (inclusive).
    pub start_slot: usize,
    /// End slot (exclusive): `start_slot + duration`.
    pub end_slot: usize,
    /// Day label, e.g. `Mon`.
    pub day_label: String,
    /// Start time label, e.g. `0830`.
    pub start_label: String,
    /// End time label, e.g. `1030`.
    pub end_label: String,
    /// Display name.
    pub name: String,
}

impl ScheduleEntry {
    /// Number of slots the entry spans.
    #[inline]
    pub fn duration(&self) -> usize {
        self.end_slot - self.start_slot
    }

    /// Last slot the entry runs in (inclusive).
    #[inline]
    pub fn last_slot(&self) -> usize {
        self.end_slot.saturating_sub(1)
    }

    /// Whether the entry runs during `slot` on `day`.
    #[inline]
    pub fn occupies(&self, slot: usize, day: usize) -> bool {
        self.day == day && slot >= self.start_slot && slot < self.end_slot
    }

    /// Whether two entries run at the same time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_slot < other.end_slot
            && other.start_slot < self.end_slot
    }
}

/// A complete decoded timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Entries in job declaration order.
    pub entries: Vec<ScheduleEntry>,
    /// Objective value of the assignment.
    pub objective: f64,
    /// Optimality status.
    pub status: SolveStatus,
}

impl Timetable {
    /// Creates a timetable.
    pub fn new(entries: Vec<ScheduleEntry>, objective: f64, status: SolveStatus) -> Self {
        Self {
            entries,
            objective,
            status,
        }
    }

    /// Whether the solver proved optimality.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Finds the entry of a job.
    pub fn entry_for_job(&self, job_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.job_id == job_id)
    }

    /// Entries on a given day, ordered by start slot.
    pub fn entries_for_day(&self, day: usize) -> Vec<&ScheduleEntry> {
        let mut v: Vec<_> = self.entries.iter().filter(|e| e.day == day).collect();
        v.sort_by_key(|e| (e.start_slot, e.end_slot));
        v
    }

    /// Entries running during `(slot, day)`.
    pub fn entries_at(&self, slot: usize, day: usize) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.occupies(slot, day))
            .collect()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
