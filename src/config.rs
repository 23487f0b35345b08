//! Timetabling instance configuration.
//!
//! A [`TimetableConfig`] is the complete, static description of one run:
//! the grid, the job catalogue, every grouping and placement rule, the
//! preference weights and the display labels. The model builder consumes it
//! as a value; it never reads files or globals.
//!
//! # Preference Profiles
//! Start-time preference tables are kept as named [`WeightProfile`]s so a
//! retuned table sits next to the one it replaces. Exactly one profile is
//! active per run.

use serde::{Deserialize, Serialize};

use crate::models::{
    ExclusionGroup, FixedAssignment, ForbiddenWindow, Job, JobCatalogue, JobScope,
    ScheduleLabels, StartCutoff, TimeGrid,
};

/// A named per-slot start preference table (lower = more desirable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    /// Profile name.
    pub name: String,
    /// One weight per slot of the day.
    pub weights: Vec<f64>,
}

impl WeightProfile {
    /// Creates a new profile.
    pub fn new<I, W>(name: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<f64>,
    {
        Self {
            name: name.into(),
            weights: weights.into_iter().map(Into::into).collect(),
        }
    }
}

/// Complete configuration of one timetabling instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Instance name (used as the model name).
    pub name: String,
    /// Time grid.
    pub grid: TimeGrid,
    /// Jobs in declaration order.
    pub jobs: JobCatalogue,
    /// Exclusion groups of every kind.
    #[serde(default)]
    pub groups: Vec<ExclusionGroup>,
    /// Fixed starts.
    #[serde(default)]
    pub pins: Vec<FixedAssignment>,
    /// Blocked regions.
    #[serde(default)]
    pub forbidden_windows: Vec<ForbiddenWindow>,
    /// Latest-start rules.
    #[serde(default)]
    pub start_cutoffs: Vec<StartCutoff>,
    /// Jobs whose simultaneous occupancy is penalized beyond the first.
    #[serde(default)]
    pub contended: Vec<String>,
    /// Available preference tables.
    #[serde(default)]
    pub weight_profiles: Vec<WeightProfile>,
    /// Name of the profile used by the objective.
    #[serde(default)]
    pub active_profile: String,
    /// Display labels.
    #[serde(default)]
    pub labels: ScheduleLabels,
    /// Forbid starts whose run would overflow the end of the day.
    #[serde(default = "default_true")]
    pub enforce_day_bound: bool,
}

fn default_true() -> bool {
    true
}

impl TimetableConfig {
    /// Creates an empty configuration over a grid.
    pub fn new(name: impl Into<String>, grid: TimeGrid) -> Self {
        Self {
            name: name.into(),
            grid,
            jobs: JobCatalogue::new(),
            groups: Vec::new(),
            pins: Vec::new(),
            forbidden_windows: Vec::new(),
            start_cutoffs: Vec::new(),
            contended: Vec::new(),
            weight_profiles: Vec::new(),
            active_profile: String::new(),
            labels: ScheduleLabels::default(),
            enforce_day_bound: true,
        }
    }

    /// Adds a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Adds several jobs.
    pub fn with_jobs(mut self, jobs: impl IntoIterator<Item = Job>) -> Self {
        for job in jobs {
            self.jobs.push(job);
        }
        self
    }

    /// Adds an exclusion group.
    pub fn with_group(mut self, group: ExclusionGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a fixed start.
    pub fn with_pin(mut self, pin: FixedAssignment) -> Self {
        self.pins.push(pin);
        self
    }

    /// Adds a forbidden window.
    pub fn with_forbidden_window(mut self, window: ForbiddenWindow) -> Self {
        self.forbidden_windows.push(window);
        self
    }

    /// Adds a start cutoff.
    pub fn with_start_cutoff(mut self, cutoff: StartCutoff) -> Self {
        self.start_cutoffs.push(cutoff);
        self
    }

    /// Sets the contended job set.
    pub fn with_contended<I, S>(mut self, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contended = jobs.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a weight profile. The first profile added becomes active unless
    /// one was already selected.
    pub fn with_weight_profile(mut self, profile: WeightProfile) -> Self {
        if self.active_profile.is_empty() {
            self.active_profile = profile.name.clone();
        }
        self.weight_profiles.push(profile);
        self
    }

    /// Adds a single `default` profile and activates it.
    pub fn with_weights<I, W>(self, weights: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<f64>,
    {
        self.with_weight_profile(WeightProfile::new("default", weights))
            .with_active_profile("default")
    }

    /// Selects the active profile.
    pub fn with_active_profile(mut self, name: impl Into<String>) -> Self {
        self.active_profile = name.into();
        self
    }

    /// Sets display labels.
    pub fn with_labels(mut self, labels: ScheduleLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Enables or disables the end-of-day fit rule.
    pub fn with_day_bound(mut self, enforce: bool) -> Self {
        self.enforce_day_bound = enforce;
        self
    }

    /// The active preference profile, if it exists.
    pub fn active_weights(&self) -> Option<&WeightProfile> {
        self.weight_profiles
            .iter()
            .find(|p| p.name == self.active_profile)
    }

    /// Job indices covered by a scope, in declaration order. Unknown ids
    /// are skipped; validation reports them.
    pub fn resolve_scope(&self, scope: &JobScope) -> Vec<usize> {
        match scope {
            JobScope::All => (0..self.jobs.len()).collect(),
            JobScope::Only(ids) => self.resolve_ids(ids),
        }
    }

    /// Job indices of a list of ids. Unknown ids are skipped.
    pub fn resolve_ids(&self, ids: &[String]) -> Vec<usize> {
        ids.iter().filter_map(|id| self.jobs.index_of(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupKind;

    fn small() -> TimetableConfig {
        TimetableConfig::new("small", TimeGrid::new(4, 1))
            .with_job(Job::new("A", 2))
            .with_job(Job::new("B", 1))
            .with_group(ExclusionGroup::room("R", ["A", "B"]))
            .with_weights([3.0, 2.0, 1.0, 0.0])
    }

    #[test]
    fn test_builder() {
        let cfg = small();
        assert_eq!(cfg.jobs.len(), 2);
        assert_eq!(cfg.groups[0].kind, GroupKind::Room);
        assert_eq!(cfg.active_profile, "default");
        assert_eq!(
            cfg.active_weights().map(|p| p.weights.clone()),
            Some(vec![3.0, 2.0, 1.0, 0.0])
        );
        assert!(cfg.enforce_day_bound);
    }

    #[test]
    fn test_profile_selection() {
        let cfg = TimetableConfig::new("p", TimeGrid::new(2, 1))
            .with_weight_profile(WeightProfile::new("legacy", [1, 0]))
            .with_weight_profile(WeightProfile::new("tuned", [0, 1]));
        assert_eq!(cfg.active_profile, "legacy");

        let cfg = cfg.with_active_profile("tuned");
        assert_eq!(cfg.active_weights().map(|p| p.weights[1]), Some(1.0));

        let cfg = cfg.with_active_profile("missing");
        assert!(cfg.active_weights().is_none());
    }

    #[test]
    fn test_resolve_scope() {
        let cfg = small();
        assert_eq!(cfg.resolve_scope(&JobScope::All), vec![0, 1]);
        assert_eq!(cfg.resolve_scope(&JobScope::only(["B", "X"])), vec![1]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let cfg = small();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: TimetableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.jobs.len(), 2);
        assert_eq!(back.jobs.index_of("B"), Some(1));
        assert_eq!(back.groups, cfg.groups);
        assert_eq!(back.active_profile, "default");
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{
            "name": "min",
            "grid": { "slots_per_day": 2, "days": 1 },
            "jobs": [{ "id": "A", "duration": 1 }]
        }"#;
        let cfg: TimetableConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.enforce_day_bound);
        assert!(cfg.groups.is_empty());
        assert_eq!(cfg.labels.day(0), "Mon");
    }
}
