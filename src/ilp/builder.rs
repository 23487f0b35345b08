//! Constraint and objective assembly.
//!
//! [`ModelBuilder`] turns a validated configuration into a [`LinearModel`].
//! Each public operation adds one constraint family; [`ModelBuilder::build`]
//! runs them all in a fixed order.
//!
//! # Constraint families
//!
//! | Operation | Constraint |
//! |-----------|-----------|
//! | `enforce_single_start` | `Σ_{s,d} X[j,s,d] = 1` |
//! | `enforce_mutual_exclusion` | `Σ_{j∈G} occ_w(j,t,d) ≤ 1` for every `(t,d)` |
//! | `pin_fixed_assignment` | `X[j,s,d] = 1` |
//! | `forbid_window` | `Σ_{j∈J, d∈D, t∈R} occ(j,t,d) = 0` |
//! | `cut_late_starts` | `Σ_{d, s≥c} X[j,s,d] = 0` per job |
//! | `limit_same_day_repeat` | `Σ_{j∈G, s} X[j,s,d] ≤ 1` for every `d` |
//! | `enforce_day_bound` | `Σ_{d, s>T-p} X[j,s,d] = 0` per job |
//! | `add_congestion_counters` | `Y[t,d] - Σ_{j∈C} occ(j,t,d) ≥ -1`, `Y ≥ 0` |
//!
//! Objective: `min Σ w[s]·X[j,s,d] + Σ Y[t,d]`.

use log::{debug, info, trace};

use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::models::{
    ExclusionGroup, FixedAssignment, ForbiddenWindow, GroupKind, JobScope, StartCutoff,
    WindowKind,
};
use crate::validation::{validate_config, ValidationError, ValidationErrorKind};

use super::{
    ConstraintFamily, LinearExpr, LinearModel, OccupancyTable, Relation, StartLayout, VarDomain,
    VarId, VarKind,
};

/// Builds the integer program of one timetabling instance.
///
/// # Example
/// ```
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::ilp::ModelBuilder;
/// use u_timetable::models::{Job, TimeGrid};
///
/// let config = TimetableConfig::new("demo", TimeGrid::new(4, 1))
///     .with_job(Job::new("A", 2))
///     .with_weights([3, 2, 1, 0]);
/// let model = ModelBuilder::build(&config).unwrap();
/// assert_eq!(model.var_count(), 4);
/// ```
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    config: &'a TimetableConfig,
    layout: StartLayout,
    occupancy: OccupancyTable,
    model: LinearModel,
    congestion: Vec<VarId>,
}

impl<'a> ModelBuilder<'a> {
    /// Validates the configuration and builds the complete model.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if validation fails.
    pub fn build(config: &'a TimetableConfig) -> Result<LinearModel> {
        validate_config(config)?;
        let mut builder = Self::new(config);

        for job in 0..config.jobs.len() {
            builder.enforce_single_start(job);
        }
        if config.enforce_day_bound {
            for job in 0..config.jobs.len() {
                builder.enforce_day_bound(job);
            }
        }
        for group in &config.groups {
            match group.effective_window() {
                Some(window) => builder.enforce_mutual_exclusion(group, window)?,
                None => builder.limit_same_day_repeat(group)?,
            }
        }
        for pin in &config.pins {
            builder.pin_fixed_assignment(pin)?;
        }
        for window in &config.forbidden_windows {
            builder.forbid_window(window)?;
        }
        for cutoff in &config.start_cutoffs {
            builder.cut_late_starts(cutoff)?;
        }
        builder.add_congestion_counters()?;
        builder.set_objective()?;

        let model = builder.finish();
        info!(
            "Built model '{}': {} variables, {} constraints",
            model.name,
            model.var_count(),
            model.constraint_count()
        );
        Ok(model)
    }

    /// Creates a builder with start variables declared and occupancy
    /// windows precomputed, but no constraints.
    ///
    /// Does not validate; [`build`](Self::build) does.
    pub fn new(config: &'a TimetableConfig) -> Self {
        let layout = StartLayout::new(config.grid, config.jobs.len());
        let durations: Vec<usize> = config.jobs.iter().map(|j| j.duration).collect();
        let occupancy = OccupancyTable::new(config.grid, &durations);
        let model = LinearModel::new(config.name.clone(), layout);
        Self {
            config,
            layout,
            occupancy,
            model,
            congestion: Vec::new(),
        }
    }

    /// Returns the assembled model.
    pub fn finish(self) -> LinearModel {
        self.model
    }

    /// Occupancy expression of `(job, slot, day)` under a window kind.
    pub fn occupancy(&self, job: usize, kind: WindowKind, slot: usize, day: usize) -> LinearExpr {
        LinearExpr::sum_of(self.occupancy.terms(&self.layout, job, kind, slot, day))
    }

    /// `Σ_{slot, day} X[job, slot, day] = 1`.
    pub fn enforce_single_start(&mut self, job: usize) {
        let expr = LinearExpr::sum_of(self.layout.job_vars(job));
        let label = format!("start_once[{}]", self.job_id(job));
        self.model
            .add_constraint(ConstraintFamily::SingleStart, label, expr, Relation::Eq, 1.0);
    }

    /// Forbids starts whose run would overflow the end of the day.
    ///
    /// No constraint is added for jobs that fit from every slot or cannot
    /// fit in a day at all.
    pub fn enforce_day_bound(&mut self, job: usize) {
        let grid = self.config.grid;
        let duration = self.config.jobs.at(job).map_or(1, |j| j.duration);
        let Some(last) = grid.latest_start(duration) else {
            return;
        };
        let first_overflow = last + 1;
        if first_overflow >= grid.slots_per_day {
            return;
        }
        let mut expr = LinearExpr::new();
        for day in 0..grid.days {
            expr.extend_vars(
                (first_overflow..grid.slots_per_day).map(|s| self.layout.start_var(job, s, day)),
            );
        }
        let label = format!("day_bound[{}]", self.job_id(job));
        self.model
            .add_constraint(ConstraintFamily::DayBound, label, expr, Relation::Eq, 0.0);
    }

    /// For every `(slot, day)`, at most one job of `group` occupies the cell
    /// under `window`.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the group names an unknown job.
    pub fn enforce_mutual_exclusion(
        &mut self,
        group: &ExclusionGroup,
        window: WindowKind,
    ) -> Result<()> {
        let owner = format!("{:?} group '{}'", group.kind, group.name);
        let jobs = self.resolve(&owner, &group.jobs)?;
        if jobs.len() < 2 {
            debug!("Skipping {owner}: fewer than two jobs");
            return Ok(());
        }

        let grid = self.config.grid;
        for day in 0..grid.days {
            for slot in 0..grid.slots_per_day {
                let mut expr = LinearExpr::new();
                for &job in &jobs {
                    expr.extend_vars(self.occupancy.terms(&self.layout, job, window, slot, day));
                }
                let label = format!("{}[{}] slot {slot} day {day}", kind_tag(group), group.name);
                self.model.add_constraint(
                    ConstraintFamily::MutualExclusion(group.kind),
                    label,
                    expr,
                    Relation::Le,
                    1.0,
                );
            }
        }
        debug!(
            "Added {} exclusion constraints for {owner} ({:?} window, {} jobs)",
            grid.cell_count(),
            window,
            jobs.len()
        );
        Ok(())
    }

    /// `X[job, slot, day] = 1`.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the job is unknown or the pin
    /// lies outside the grid.
    pub fn pin_fixed_assignment(&mut self, pin: &FixedAssignment) -> Result<()> {
        let owner = format!("Pin of '{}'", pin.job);
        let job = self.resolve_one(&owner, &pin.job)?;
        let grid = self.config.grid;
        if !grid.contains_slot(pin.slot) || !grid.contains_day(pin.day) {
            return Err(config_error(
                ValidationErrorKind::OutOfRange,
                format!("{owner} at (slot {}, day {}) lies outside the grid", pin.slot, pin.day),
            ));
        }
        trace!("Pinning '{}' at slot {} day {}", pin.job, pin.slot, pin.day);
        let expr = LinearExpr::sum_of([self.layout.start_var(job, pin.slot, pin.day)]);
        self.model.add_constraint(
            ConstraintFamily::FixedAssignment,
            format!("pin[{}]", pin.job),
            expr,
            Relation::Eq,
            1.0,
        );
        Ok(())
    }

    /// No scoped job may occupy any slot of the window on any listed day.
    ///
    /// Slot and day indices outside the grid are ignored.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the scope names an unknown job.
    pub fn forbid_window(&mut self, window: &ForbiddenWindow) -> Result<()> {
        let owner = format!("Forbidden window '{}'", window.name);
        let jobs = self.resolve_scope(&owner, &window.jobs)?;
        let grid = self.config.grid;
        let slots = window.start_slot..window.end_slot.min(grid.slots_per_day);

        let mut expr = LinearExpr::new();
        for &job in &jobs {
            for &day in window.days.iter().filter(|&&d| grid.contains_day(d)) {
                for slot in slots.clone() {
                    expr.extend_vars(self.occupancy.terms(
                        &self.layout,
                        job,
                        WindowKind::Standard,
                        slot,
                        day,
                    ));
                }
            }
        }
        debug!("{owner}: {} jobs, {} terms", jobs.len(), expr.len());
        self.model.add_constraint(
            ConstraintFamily::ForbiddenWindow,
            format!("forbid[{}]", window.name),
            expr,
            Relation::Eq,
            0.0,
        );
        Ok(())
    }

    /// No scoped job may start at `from_slot` or later, on any day.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the scope names an unknown job.
    pub fn cut_late_starts(&mut self, cutoff: &StartCutoff) -> Result<()> {
        let owner = format!("Start cutoff '{}'", cutoff.name);
        let jobs = self.resolve_scope(&owner, &cutoff.jobs)?;
        let grid = self.config.grid;
        if cutoff.from_slot >= grid.slots_per_day {
            return Ok(());
        }
        for job in jobs {
            let mut expr = LinearExpr::new();
            for day in 0..grid.days {
                expr.extend_vars(
                    (cutoff.from_slot..grid.slots_per_day)
                        .map(|s| self.layout.start_var(job, s, day)),
                );
            }
            let label = format!("cutoff[{}][{}]", cutoff.name, self.job_id(job));
            self.model
                .add_constraint(ConstraintFamily::StartCutoff, label, expr, Relation::Eq, 0.0);
        }
        Ok(())
    }

    /// For every day, at most one job of `group` starts.
    ///
    /// Counts start events, not occupancy: two sessions of one subject may
    /// not both begin on the same day even if they would never overlap.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the group names an unknown job.
    pub fn limit_same_day_repeat(&mut self, group: &ExclusionGroup) -> Result<()> {
        let owner = format!("{:?} group '{}'", group.kind, group.name);
        let jobs = self.resolve(&owner, &group.jobs)?;
        if jobs.len() < 2 {
            debug!("Skipping {owner}: fewer than two jobs");
            return Ok(());
        }
        let grid = self.config.grid;
        for day in 0..grid.days {
            let mut expr = LinearExpr::new();
            for &job in &jobs {
                expr.extend_vars(
                    (0..grid.slots_per_day).map(|s| self.layout.start_var(job, s, day)),
                );
            }
            self.model.add_constraint(
                ConstraintFamily::SameDayRepeat,
                format!("same_day[{}] day {day}", group.name),
                expr,
                Relation::Le,
                1.0,
            );
        }
        Ok(())
    }

    /// Declares `Y[t, d] ≥ 0` with `Y[t, d] ≥ Σ_{j∈C} occ(j, t, d) - 1` for
    /// the contended set `C`.
    ///
    /// Nothing is added when the contended set is empty.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the set names an unknown job.
    pub fn add_congestion_counters(&mut self) -> Result<()> {
        let jobs = self.resolve("Contended set", &self.config.contended)?;
        if jobs.is_empty() {
            return Ok(());
        }
        let grid = self.config.grid;
        for day in 0..grid.days {
            for slot in 0..grid.slots_per_day {
                let y = self.model.add_var(
                    VarKind::Congestion { slot, day },
                    VarDomain::Continuous { min: 0.0 },
                );
                let mut expr = LinearExpr::sum_of([y]);
                for &job in &jobs {
                    for v in self
                        .occupancy
                        .terms(&self.layout, job, WindowKind::Standard, slot, day)
                    {
                        expr.add_term(v, -1.0);
                    }
                }
                self.model.add_constraint(
                    ConstraintFamily::Congestion,
                    format!("congestion slot {slot} day {day}"),
                    expr,
                    Relation::Ge,
                    -1.0,
                );
                self.congestion.push(y);
            }
        }
        debug!(
            "Added {} congestion counters over {} contended jobs",
            self.congestion.len(),
            jobs.len()
        );
        Ok(())
    }

    /// Sets `Σ w[slot]·X + Σ Y` as the objective.
    ///
    /// Call after [`add_congestion_counters`](Self::add_congestion_counters)
    /// so the counters are included.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] if the active profile is missing or
    /// its length differs from `slots_per_day`.
    pub fn set_objective(&mut self) -> Result<()> {
        let grid = self.config.grid;
        let profile = self.config.active_weights().ok_or_else(|| {
            config_error(
                ValidationErrorKind::UnknownWeightProfile,
                format!(
                    "Active weight profile '{}' is not defined",
                    self.config.active_profile
                ),
            )
        })?;
        if profile.weights.len() != grid.slots_per_day {
            return Err(config_error(
                ValidationErrorKind::WeightLengthMismatch,
                format!(
                    "Weight profile '{}' has {} entries for {} slots",
                    profile.name,
                    profile.weights.len(),
                    grid.slots_per_day
                ),
            ));
        }

        let mut objective = LinearExpr::new();
        for job in 0..self.layout.jobs() {
            for (slot, day) in grid.cells() {
                let w = profile.weights[slot];
                if w != 0.0 {
                    objective.add_term(self.layout.start_var(job, slot, day), w);
                }
            }
        }
        objective.extend_vars(self.congestion.iter().copied());
        debug!(
            "Objective uses profile '{}' with {} terms",
            profile.name,
            objective.len()
        );
        self.model.set_objective(objective);
        Ok(())
    }

    fn job_id(&self, job: usize) -> &str {
        self.config.jobs.at(job).map_or("?", |j| j.id.as_str())
    }

    fn resolve(&self, owner: &str, ids: &[String]) -> Result<Vec<usize>> {
        let mut jobs = Vec::with_capacity(ids.len());
        for id in ids {
            let job = self.resolve_one(owner, id)?;
            if jobs.contains(&job) {
                return Err(config_error(
                    ValidationErrorKind::DuplicateMember,
                    format!("{owner} lists job '{id}' more than once"),
                ));
            }
            jobs.push(job);
        }
        Ok(jobs)
    }

    fn resolve_one(&self, owner: &str, id: &str) -> Result<usize> {
        self.config.jobs.index_of(id).ok_or_else(|| {
            config_error(
                ValidationErrorKind::UnknownJob,
                format!("{owner} references unknown job '{id}'"),
            )
        })
    }

    fn resolve_scope(&self, owner: &str, scope: &JobScope) -> Result<Vec<usize>> {
        match scope {
            JobScope::All => Ok((0..self.config.jobs.len()).collect()),
            JobScope::Only(ids) => self.resolve(owner, ids),
        }
    }
}

fn kind_tag(group: &ExclusionGroup) -> &'static str {
    match group.kind {
        GroupKind::Room => "room",
        GroupKind::Instructor => "instructor",
        GroupKind::Cohort => "cohort",
        GroupKind::Subject => "subject",
    }
}

fn config_error(kind: ValidationErrorKind, message: String) -> TimetableError {
    TimetableError::InvalidConfig(vec![ValidationError { kind, message }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightProfile;
    use crate::models::{Job, TimeGrid};

    fn two_jobs(slots: usize, days: usize) -> TimetableConfig {
        TimetableConfig::new("t", TimeGrid::new(slots, days))
            .with_job(Job::new("A", 1))
            .with_job(Job::new("B", 1))
            .with_weights(vec![1.0; slots])
    }

    /// One-hot value vector placing each listed job at `(slot, day)`.
    fn placement(model: &LinearModel, starts: &[(usize, usize, usize)]) -> Vec<f64> {
        let mut values = vec![0.0; model.var_count()];
        for &(job, slot, day) in starts {
            values[model.layout().start_var(job, slot, day).index()] = 1.0;
        }
        values
    }

    #[test]
    fn test_build_single_job() {
        let cfg = TimetableConfig::new("a", TimeGrid::new(4, 1))
            .with_job(Job::new("A", 2))
            .with_weights([3, 2, 1, 0]);
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(model.var_count(), 4);
        assert_eq!(model.count_family(ConstraintFamily::SingleStart), 1);
        assert_eq!(model.count_family(ConstraintFamily::DayBound), 1);
        // weight 0 at slot 3 is dropped
        assert_eq!(model.objective().len(), 3);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let cfg = two_jobs(3, 1).with_group(ExclusionGroup::room("R", ["A", "Z"]));
        match ModelBuilder::build(&cfg) {
            Err(TimetableError::InvalidConfig(errors)) => {
                assert!(errors.iter().any(|e| e.message.contains("'Z'")));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_occupancy_expression() {
        let cfg = TimetableConfig::new("o", TimeGrid::new(6, 2))
            .with_job(Job::new("A", 3))
            .with_weights(vec![0.0; 6]);
        let builder = ModelBuilder::new(&cfg);
        let layout = StartLayout::new(cfg.grid, 1);
        let occ = builder.occupancy(0, WindowKind::Standard, 4, 1);
        let vars: Vec<_> = occ.terms.iter().map(|&(v, _)| v).collect();
        assert_eq!(
            vars,
            vec![
                layout.start_var(0, 2, 1),
                layout.start_var(0, 3, 1),
                layout.start_var(0, 4, 1)
            ]
        );
        let plus = builder.occupancy(0, WindowKind::PlusOne, 4, 1);
        assert_eq!(plus.len(), 4);
    }

    #[test]
    fn test_day_bound_blocks_overflowing_starts() {
        let cfg = TimetableConfig::new("b", TimeGrid::new(5, 2))
            .with_job(Job::new("A", 3))
            .with_weights(vec![0.0; 5]);
        let model = ModelBuilder::build(&cfg).unwrap();
        let c = model
            .constraints()
            .iter()
            .find(|c| c.family == ConstraintFamily::DayBound)
            .unwrap();
        // slots 3 and 4 on both days
        assert_eq!(c.expr.len(), 4);

        let ok = placement(&model, &[(0, 2, 1)]);
        assert!(model.violated(&ok, 1e-6).is_empty());
        let overflow = placement(&model, &[(0, 3, 0)]);
        assert_eq!(model.violated(&overflow, 1e-6).len(), 1);
    }

    #[test]
    fn test_day_bound_can_be_disabled() {
        let cfg = TimetableConfig::new("b", TimeGrid::new(5, 1))
            .with_job(Job::new("A", 3))
            .with_weights(vec![0.0; 5])
            .with_day_bound(false);
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(model.count_family(ConstraintFamily::DayBound), 0);
    }

    #[test]
    fn test_room_exclusion_allows_back_to_back() {
        let cfg = two_jobs(4, 1).with_group(ExclusionGroup::room("R", ["A", "B"]));
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(
            model.count_family(ConstraintFamily::MutualExclusion(GroupKind::Room)),
            4
        );
        let adjacent = placement(&model, &[(0, 0, 0), (1, 1, 0)]);
        assert!(model.violated(&adjacent, 1e-6).is_empty());
        let clash = placement(&model, &[(0, 2, 0), (1, 2, 0)]);
        assert!(!model.violated(&clash, 1e-6).is_empty());
    }

    #[test]
    fn test_instructor_exclusion_forbids_back_to_back() {
        let cfg = two_jobs(4, 1).with_group(ExclusionGroup::instructor("P", ["A", "B"]));
        let model = ModelBuilder::build(&cfg).unwrap();
        let adjacent = placement(&model, &[(0, 0, 0), (1, 1, 0)]);
        assert!(!model.violated(&adjacent, 1e-6).is_empty());
        let gap = placement(&model, &[(0, 0, 0), (1, 2, 0)]);
        assert!(model.violated(&gap, 1e-6).is_empty());
    }

    #[test]
    fn test_single_member_group_is_skipped() {
        let cfg = two_jobs(4, 1).with_group(ExclusionGroup::cohort("C", ["A"]));
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(
            model.count_family(ConstraintFamily::MutualExclusion(GroupKind::Cohort)),
            0
        );
    }

    #[test]
    fn test_same_day_repeat_counts_starts_only() {
        let cfg = two_jobs(6, 2).with_group(ExclusionGroup::subject("S", ["A", "B"]));
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(model.count_family(ConstraintFamily::SameDayRepeat), 2);

        let same_day = placement(&model, &[(0, 0, 0), (1, 5, 0)]);
        let bad = model.violated(&same_day, 1e-6);
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].family, ConstraintFamily::SameDayRepeat);

        let split = placement(&model, &[(0, 0, 0), (1, 0, 1)]);
        assert!(model.violated(&split, 1e-6).is_empty());
    }

    #[test]
    fn test_pin() {
        let cfg = two_jobs(3, 2).with_pin(FixedAssignment::new("B", 1, 1));
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(model.count_family(ConstraintFamily::FixedAssignment), 1);
        let elsewhere = placement(&model, &[(0, 0, 0), (1, 1, 0)]);
        assert_eq!(model.violated(&elsewhere, 1e-6).len(), 1);
        let pinned = placement(&model, &[(0, 0, 0), (1, 1, 1)]);
        assert!(model.violated(&pinned, 1e-6).is_empty());
    }

    #[test]
    fn test_pin_rejects_unknown_job_directly() {
        let cfg = two_jobs(3, 1);
        let mut builder = ModelBuilder::new(&cfg);
        let err = builder
            .pin_fixed_assignment(&FixedAssignment::new("Q", 0, 0))
            .unwrap_err();
        assert!(err.to_string().contains("'Q'"));
    }

    #[test]
    fn test_build_rejects_repeated_group_member() {
        let cfg = two_jobs(4, 1).with_group(ExclusionGroup::room("R", ["A", "A", "B"]));
        match ModelBuilder::build(&cfg) {
            Err(TimetableError::InvalidConfig(errors)) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateMember);
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_contended_job_rejected_without_validation() {
        let cfg = two_jobs(2, 1).with_contended(["A", "A"]);
        let mut builder = ModelBuilder::new(&cfg);
        let err = builder.add_congestion_counters().unwrap_err();
        assert!(matches!(
            &err,
            TimetableError::InvalidConfig(errors)
                if errors[0].kind == ValidationErrorKind::DuplicateMember
        ));
    }

    #[test]
    fn test_forbidden_window_catches_runs_into_window() {
        let cfg = TimetableConfig::new("f", TimeGrid::new(8, 2))
            .with_job(Job::new("A", 3))
            .with_weights(vec![0.0; 8])
            .with_forbidden_window(ForbiddenWindow::new("pm", JobScope::All, vec![1], 5..8));
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(model.count_family(ConstraintFamily::ForbiddenWindow), 1);

        // starts at 3, runs 3..6: enters the window on day 1
        let into = placement(&model, &[(0, 3, 1)]);
        assert!(!model.violated(&into, 1e-6).is_empty());
        // ends right before the window
        let before = placement(&model, &[(0, 2, 1)]);
        assert!(model.violated(&before, 1e-6).is_empty());
        // other day unaffected
        let other_day = placement(&model, &[(0, 5, 0)]);
        assert!(model.violated(&other_day, 1e-6).is_empty());
    }

    #[test]
    fn test_start_cutoff() {
        let cfg = two_jobs(6, 2).with_start_cutoff(StartCutoff::new(
            "late",
            JobScope::only(["A"]),
            4,
        ));
        let model = ModelBuilder::build(&cfg).unwrap();
        assert_eq!(model.count_family(ConstraintFamily::StartCutoff), 1);
        let late_a = placement(&model, &[(0, 4, 1), (1, 0, 0)]);
        assert_eq!(model.violated(&late_a, 1e-6).len(), 1);
        let late_b = placement(&model, &[(0, 3, 1), (1, 5, 0)]);
        assert!(model.violated(&late_b, 1e-6).is_empty());
    }

    #[test]
    fn test_congestion_counters() {
        let cfg = two_jobs(3, 2).with_contended(["A", "B"]);
        let model = ModelBuilder::build(&cfg).unwrap();
        // 2 jobs x 6 cells + 6 counters
        assert_eq!(model.var_count(), 18);
        assert_eq!(model.count_family(ConstraintFamily::Congestion), 6);
        let counters = model
            .vars()
            .iter()
            .filter(|v| matches!(v.kind, VarKind::Congestion { .. }))
            .count();
        assert_eq!(counters, 6);
        // 12 weighted starts + 6 counters
        assert_eq!(model.objective().len(), 18);

        // Both at (0, 0): the counter of that cell must be at least 1.
        let mut values = placement(&model, &[(0, 0, 0), (1, 0, 0)]);
        assert_eq!(model.violated(&values, 1e-6).len(), 1);
        let y = model
            .vars()
            .iter()
            .position(|v| v.kind == VarKind::Congestion { slot: 0, day: 0 })
            .unwrap();
        values[y] = 1.0;
        assert!(model.violated(&values, 1e-6).is_empty());
    }

    #[test]
    fn test_objective_uses_active_profile() {
        let cfg = two_jobs(2, 1)
            .with_weight_profile(WeightProfile::new("tuned", [5, 7]))
            .with_active_profile("tuned");
        let model = ModelBuilder::build(&cfg).unwrap();
        let values = placement(&model, &[(0, 0, 0), (1, 1, 0)]);
        assert!((model.objective().evaluate(&values) - 12.0).abs() < 1e-9);
    }
}
