//! Solution decoding.
//!
//! Maps a solver assignment back to one [`ScheduleEntry`] per job. The start
//! variable of each job is looked up through its structured key; display
//! labels are attached last.

use log::debug;

use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::ilp::{LinearModel, MipSolution};
use crate::models::{ScheduleEntry, Timetable};

/// Values above this count as 1 for binary variables.
const ACTIVE_THRESHOLD: f64 = 0.5;

/// Decodes a solver assignment into a timetable.
///
/// Entries follow job declaration order. The end slot is
/// `start + duration`, and may equal `slots_per_day` for a class that runs
/// until the end of the day.
///
/// # Errors
/// - [`TimetableError::InconsistentAssignment`] if a job has no active start
///   or more than one.
/// - [`TimetableError::SolverUnavailable`] if the assignment does not cover
///   every model variable.
pub fn decode(
    config: &TimetableConfig,
    model: &LinearModel,
    solution: &MipSolution,
) -> Result<Timetable> {
    if solution.values.len() < model.var_count() {
        return Err(TimetableError::SolverUnavailable(format!(
            "assignment has {} values for {} variables",
            solution.values.len(),
            model.var_count()
        )));
    }

    let layout = model.layout();
    let grid = config.grid;
    let labels = &config.labels;
    let mut entries = Vec::with_capacity(config.jobs.len());

    for (j, job) in config.jobs.iter().enumerate() {
        let active: Vec<(usize, usize)> = grid
            .cells()
            .filter(|&(slot, day)| {
                solution.values[layout.start_var(j, slot, day).index()] > ACTIVE_THRESHOLD
            })
            .collect();

        let &[(slot, day)] = active.as_slice() else {
            return Err(TimetableError::InconsistentAssignment {
                job: job.id.clone(),
                starts: active.len(),
            });
        };

        let end = slot + job.duration;
        entries.push(ScheduleEntry {
            job_id: job.id.clone(),
            day,
            start_slot: slot,
            end_slot: end,
            day_label: labels.day(day),
            start_label: labels.time(slot),
            end_label: labels.time(end),
            name: job.name.clone(),
        });
    }

    debug!("Decoded {} entries", entries.len());
    Ok(Timetable::new(entries, solution.objective, solution.status))
}
