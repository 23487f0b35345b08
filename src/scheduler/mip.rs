//! Exact timetable scheduler.
//!
//! # Pipeline
//!
//! 1. Validate the configuration.
//! 2. Build the binary integer program ([`ModelBuilder`]).
//! 3. Solve it through a [`MipSolver`].
//! 4. Decode the assignment into a [`Timetable`].
//!
//! The scheduler holds no state between runs; the same configuration
//! solved twice with a deterministic backend yields the same objective.

use log::info;

use crate::config::TimetableConfig;
use crate::error::Result;
use crate::ilp::{GoodLpSolver, LinearModel, MipSolver, ModelBuilder};
use crate::models::Timetable;

use super::decode::decode;

/// Mixed-integer timetable scheduler.
///
/// # Example
///
/// ```
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::models::{Job, TimeGrid};
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let config = TimetableConfig::new("one-job", TimeGrid::new(4, 1))
///     .with_job(Job::new("A", 2))
///     .with_weights([3, 2, 1, 0]);
///
/// let timetable = TimetableScheduler::new().schedule(&config).unwrap();
/// let a = timetable.entry_for_job("A").unwrap();
/// assert_eq!((a.start_slot, a.last_slot()), (2, 3));
/// assert!((timetable.objective - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableScheduler<S = GoodLpSolver> {
    solver: S,
}

impl TimetableScheduler<GoodLpSolver> {
    /// Creates a scheduler backed by the default `good_lp` solver.
    pub fn new() -> Self {
        Self {
            solver: GoodLpSolver::new(),
        }
    }
}

impl Default for TimetableScheduler<GoodLpSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MipSolver> TimetableScheduler<S> {
    /// Creates a scheduler backed by `solver`.
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// The backing solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Builds the model for `config` without solving it.
    pub fn build_model(&self, config: &TimetableConfig) -> Result<LinearModel> {
        ModelBuilder::build(config)
    }

    /// Computes an optimal timetable for `config`.
    ///
    /// # Errors
    /// - [`InvalidConfig`](crate::error::TimetableError::InvalidConfig)
    ///   before any solving happens.
    /// - [`Infeasible`](crate::error::TimetableError::Infeasible)
    ///   if no timetable satisfies every hard constraint.
    /// - [`SolverUnavailable`](crate::error::TimetableError::SolverUnavailable)
    ///   for backend failures.
    /// - [`InconsistentAssignment`](crate::error::TimetableError::InconsistentAssignment)
    ///   if the solver returns a job without exactly one start.
    pub fn schedule(&self, config: &TimetableConfig) -> Result<Timetable> {
        let model = self.build_model(config)?;
        let solution = self.solver.solve(&model)?;
        let timetable = decode(config, &model, &solution)?;
        info!(
            "Scheduled {} classes for '{}' (objective {})",
            timetable.entry_count(),
            config.name,
            timetable.objective
        );
        Ok(timetable)
    }
}
