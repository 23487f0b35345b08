//! Placement rules: fixed pins, forbidden windows and start cutoffs.
//!
//! These are the static rules of a timetable other than exclusion groups.
//! Each becomes one or more linear constraints in the model.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which jobs a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobScope {
    /// Every job in the catalogue.
    All,
    /// Only the listed job ids.
    Only(Vec<String>),
}

impl JobScope {
    /// Scope over the listed job ids.
    pub fn only<I, S>(jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(jobs.into_iter().map(Into::into).collect())
    }

    /// Explicitly named job ids (empty for `All`).
    pub fn named(&self) -> &[String] {
        match self {
            JobScope::All => &[],
            JobScope::Only(ids) => ids,
        }
    }
}

/// A job whose start is fixed in advance.
///
/// Used for jobs outside the optimized scope that must still reserve
/// grid capacity (rooms, cohorts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssignment {
    /// Pinned job id.
    pub job: String,
    /// Start slot.
    pub slot: usize,
    /// Day.
    pub day: usize,
}

impl FixedAssignment {
    /// Creates a new pin.
    pub fn new(job: impl Into<String>, slot: usize, day: usize) -> Self {
        Self {
            job: job.into(),
            slot,
            day,
        }
    }
}

/// A region of the grid in which the scoped jobs may not run.
///
/// Slots are a half-open range `[start_slot, end_slot)` applied on each
/// listed day. Occupancy (not just the start) is checked, so a job starting
/// before the window but running into it is excluded too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenWindow {
    /// Window name (for diagnostics).
    pub name: String,
    /// Jobs the window applies to.
    pub jobs: JobScope,
    /// Days the window covers.
    pub days: Vec<usize>,
    /// First blocked slot (inclusive).
    pub start_slot: usize,
    /// End of the blocked range (exclusive).
    pub end_slot: usize,
}

impl ForbiddenWindow {
    /// Creates a new forbidden window.
    pub fn new(
        name: impl Into<String>,
        jobs: JobScope,
        days: Vec<usize>,
        slots: Range<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            jobs,
            days,
            start_slot: slots.start,
            end_slot: slots.end,
        }
    }

    /// Blocked slot range.
    #[inline]
    pub fn slots(&self) -> Range<usize> {
        self.start_slot..self.end_slot
    }

    /// Whether `(slot, day)` lies inside the window.
    pub fn covers(&self, slot: usize, day: usize) -> bool {
        self.days.contains(&day) && self.slots().contains(&slot)
    }
}

/// Latest allowed start for a set of jobs, on every day.
///
/// Starts at `from_slot` or later are forbidden. This is a start-event rule
/// (e.g. "classes start at 18:30 latest"), unlike a forbidden window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCutoff {
    /// Rule name (for diagnostics).
    pub name: String,
    /// Jobs the cutoff applies to.
    pub jobs: JobScope,
    /// First forbidden start slot.
    pub from_slot: usize,
}

impl StartCutoff {
    /// Creates a new cutoff.
    pub fn new(name: impl Into<String>, jobs: JobScope, from_slot: usize) -> Self {
        Self {
            name: name.into(),
            jobs,
            from_slot,
        }
    }
}
