//! Built-in timetabling instances.
//!
//! A [`DatasetProvider`] supplies a ready-made [`TimetableConfig`]; the model
//! builder never sees where it came from.
//!
//! # ESD Term Instance
//!
//! [`EsdTermDataset`] is the weekly timetable of an engineering systems
//! department for one term:
//!
//! | Item | Content |
//! |------|---------|
//! | Grid | 23 half-hour slots (08:30 to 19:30) × Mon..Fri |
//! | Jobs | `J01`..`J38` without `J35`; `J01`..`J27` are department classes |
//! | Pins | `J28`..`J38`: classes owned by other departments |
//! | Blackouts | Wed/Fri afternoons for all; five HASS/TAE blocks for department classes |
//! | Cutoff | Department classes start by 18:30 |
//! | Contended | Term-7 electives `J14`..`J27` |
//!
//! Two preference tables ship with it: `legacy` and `tuned` (active).

use crate::config::{TimetableConfig, WeightProfile};
use crate::models::{
    ExclusionGroup, FixedAssignment, ForbiddenWindow, GroupKind, Job, JobScope, ScheduleLabels,
    StartCutoff, TimeGrid,
};

/// Source of a complete timetabling configuration.
pub trait DatasetProvider {
    /// Dataset name.
    fn name(&self) -> &str;

    /// Builds the configuration.
    fn config(&self) -> TimetableConfig;
}

/// Slots per day: 08:30 to 19:30 in half hours.
pub const ESD_SLOTS_PER_DAY: usize = 23;
/// Monday to Friday.
pub const ESD_DAYS: usize = 5;

/// Name of the first-generation preference table.
pub const LEGACY_PROFILE: &str = "legacy";
/// Name of the retuned preference table.
pub const TUNED_PROFILE: &str = "tuned";

const LEGACY_WEIGHTS: [u8; ESD_SLOTS_PER_DAY] = [
    2, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4, 4, 4,
];

const TUNED_WEIGHTS: [u8; ESD_SLOTS_PER_DAY] = [
    2, 1, 0, 0, 1, 1, 5, 5, 5, 5, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8,
];

/// `(id, duration, display name)`.
const JOBS: &[(&str, usize, &str)] = &[
    ("J01", 4, "40.004 Statistics CS01 Period 1"),
    ("J02", 4, "40.004 Statistics CS01 Period 2"),
    ("J03", 4, "40.004 Statistics CS02 Period 1"),
    ("J04", 4, "40.004 Statistics CS02 Period 2"),
    ("J05", 4, "40.012 Manufacturing and Service Operations LS01"),
    ("J06", 4, "40.012 Manufacturing and Service Operations CS01 Period 1"),
    ("J07", 4, "40.012 Manufacturing and Service Operations CS01 Period 2"),
    ("J08", 4, "40.012 Manufacturing and Service Operations CS02 Period 1"),
    ("J09", 4, "40.012 Manufacturing and Service Operations CS02 Period 2"),
    ("J10", 4, "40.014 Engineering Systems Architecture CS01 Period 1"),
    ("J11", 4, "40.014 Engineering Systems Architecture CS01 Period 2"),
    ("J12", 4, "40.014 Engineering Systems Architecture CS02 Period 1"),
    ("J13", 4, "40.014 Engineering Systems Architecture CS02 Period 2"),
    ("J14", 2, "40.319 Statistical and Machine Learning LS01 (Lecture)"),
    ("J15", 4, "40.319 Statistical and Machine Learning CS01 Period 1"),
    ("J16", 4, "40.319 Statistical and Machine Learning CS01 Period 2"),
    ("J17", 4, "40.319 Statistical and Machine Learning CS02 Period 1"),
    ("J18", 4, "40.319 Statistical and Machine Learning CS02 Period 2"),
    ("J19", 4, "40.242 Derivative Pricing and Risk Management Period 1"),
    ("J20", 4, "40.242 Derivative Pricing and Risk Management Period 2"),
    ("J21", 2, "40.302 Advanced Topics in Optimisation#/\
          40.305 Advanced Topics in Stochastic Modelling# Lesson 1"),
    ("J22", 4, "40.302 Advanced Topics in Optimisation#/\
          40.305 Advanced Topics in Stochastic Modelling# Lesson 2"),
    ("J23", 4, "40.302 Advanced Topics in Optimisation#/\
          40.305 Advanced Topics in Stochastic Modelling# Lesson 3"),
    ("J24", 4, "40.321 Airport Systems Modelling and Simulation Period 1"),
    ("J25", 4, "40.321 Airport Systems Modelling and Simulation Period 2"),
    ("J26", 4, "40.323 Equity Valuation Period 1"),
    ("J27", 4, "40.323 Equity Valuation Period 2"),
    ("J28", 2, ""),
    ("J29", 2, ""),
    ("J30", 4, ""),
    ("J31", 3, ""),
    ("J32", 3, ""),
    ("J33", 4, ""),
    ("J34", 4, ""),
    ("J36", 3, ""),
    ("J37", 3, ""),
    ("J38", 4, ""),
];

const ROOMS: &[&[&str]] = &[
    &["J14", "J36", "J37", "J38"],
    &["J17", "J18"],
    &["J21", "J24", "J25"],
    &["J22", "J23", "J26", "J27"],
    &["J19", "J20"],
    &[
        "J01", "J02", "J06", "J07", "J28", "J29", "J30", "J31", "J32", "J33", "J34",
    ],
    &["J03", "J04", "J10", "J11", "J12", "J13", "J15", "J16"],
    &["J05", "J08", "J09"],
];

const INSTRUCTORS: &[&[&str]] = &[
    &["J01", "J02", "J03", "J04"],
    &["J05", "J06", "J07", "J08", "J09"],
    &["J10", "J11", "J12", "J13"],
    &["J14", "J15", "J16", "J17", "J18"],
    &["J19", "J20"],
    &["J21", "J22", "J23"],
    &["J24", "J25"],
    &["J26", "J27"],
];

const COHORTS: &[&[&str]] = &[
    &["J01", "J02", "J05", "J06", "J07", "J10", "J11"],
    &["J03", "J04", "J05", "J08", "J09", "J12", "J13"],
    &["J19", "J20", "J26", "J27"],
    &["J14", "J15", "J16", "J17", "J18", "J21", "J22", "J23"],
];

const SUBJECTS: &[&[&str]] = &[
    &["J01", "J02"],
    &["J03", "J04"],
    &["J05", "J06", "J07"],
    &["J05", "J08", "J09"],
    &["J10", "J11"],
    &["J12", "J13"],
    &["J14", "J15", "J16"],
    &["J14", "J17", "J18"],
    &["J19", "J20"],
    &["J21", "J22", "J23"],
    &["J24", "J25"],
    &["J26", "J27"],
];

/// `(job, slot, day)`.
const PINS: &[(&str, usize, usize)] = &[
    ("J28", 1, 3),
    ("J29", 4, 0),
    ("J30", 11, 0),
    ("J31", 6, 0),
    ("J32", 16, 1),
    ("J33", 15, 0),
    ("J34", 0, 4),
    ("J36", 1, 0),
    ("J37", 13, 1),
    ("J38", 9, 1),
];

/// HASS/TAE blocks for department classes: `(day, start slot, end slot)`.
const HASS_BLOCKS: &[(usize, usize, usize)] = &[
    (0, 13, 19),
    (1, 0, 9),
    (3, 13, 19),
    (3, 1, 5),
    (4, 4, 10),
];

/// The ESD term timetable.
#[derive(Debug, Clone, Copy, Default)]
pub struct EsdTermDataset;

impl EsdTermDataset {
    /// Creates the provider.
    pub fn new() -> Self {
        Self
    }

    /// Department classes (`J01`..`J27`).
    pub fn department_jobs() -> Vec<String> {
        JOBS.iter()
            .take(27)
            .map(|&(id, _, _)| id.to_string())
            .collect()
    }

    /// Term-7 electives whose overlap is penalised.
    pub fn contended_jobs() -> Vec<String> {
        (14..=27).map(|n| format!("J{n:02}")).collect()
    }
}

impl DatasetProvider for EsdTermDataset {
    fn name(&self) -> &str {
        "esd-term"
    }

    fn config(&self) -> TimetableConfig {
        let department = JobScope::Only(Self::department_jobs());

        let grid = TimeGrid::new(ESD_SLOTS_PER_DAY, ESD_DAYS);
        let mut config = TimetableConfig::new(self.name(), grid)
            .with_jobs(
                JOBS.iter()
                    .map(|&(id, duration, name)| Job::new(id, duration).with_name(name)),
            )
            .with_labels(ScheduleLabels::weekdays());

        let families: [(GroupKind, &str, &[&[&str]]); 4] = [
            (GroupKind::Room, "room", ROOMS),
            (GroupKind::Instructor, "instructor", INSTRUCTORS),
            (GroupKind::Cohort, "cohort", COHORTS),
            (GroupKind::Subject, "subject", SUBJECTS),
        ];
        for (kind, prefix, groups) in families {
            for (i, &jobs) in groups.iter().enumerate() {
                config = config.with_group(ExclusionGroup::new(
                    format!("{prefix}-{}", i + 1),
                    kind,
                    jobs.iter().copied(),
                ));
            }
        }
        for &(job, slot, day) in PINS {
            config = config.with_pin(FixedAssignment::new(job, slot, day));
        }

        config = config.with_forbidden_window(ForbiddenWindow::new(
            "wed-fri-afternoon",
            JobScope::All,
            vec![2, 4],
            9..ESD_SLOTS_PER_DAY,
        ));
        for (i, &(day, start, end)) in HASS_BLOCKS.iter().enumerate() {
            config = config.with_forbidden_window(ForbiddenWindow::new(
                format!("hass-tae-{}", i + 1),
                department.clone(),
                vec![day],
                start..end,
            ));
        }

        config
            .with_start_cutoff(StartCutoff::new("evening-start", department, 21))
            .with_contended(Self::contended_jobs())
            .with_weight_profile(WeightProfile::new(LEGACY_PROFILE, LEGACY_WEIGHTS))
            .with_weight_profile(WeightProfile::new(TUNED_PROFILE, TUNED_WEIGHTS))
            .with_active_profile(TUNED_PROFILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::{ConstraintFamily, ModelBuilder};
    use crate::validation::validate_config;

    #[test]
    fn test_esd_config_is_valid() {
        let config = EsdTermDataset::new().config();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.jobs.len(), 37);
        assert!(!config.jobs.contains("J35"));
        assert_eq!(config.pins.len(), 10);
        assert_eq!(config.forbidden_windows.len(), 6);
        assert_eq!(config.active_weights().map(|p| p.name.as_str()), Some(TUNED_PROFILE));
    }

    #[test]
    fn test_esd_durations() {
        let config = EsdTermDataset::new().config();
        let duration = |id: &str| config.jobs.get(id).map(|j| j.duration);
        assert_eq!(duration("J01"), Some(4));
        assert_eq!(duration("J14"), Some(2));
        assert_eq!(duration("J29"), Some(2));
        assert_eq!(duration("J37"), Some(3));
    }

    #[test]
    fn test_esd_groups() {
        let config = EsdTermDataset::new().config();
        let count = |kind: GroupKind| config.groups.iter().filter(|g| g.kind == kind).count();
        assert_eq!(count(GroupKind::Room), 8);
        assert_eq!(count(GroupKind::Instructor), 8);
        assert_eq!(count(GroupKind::Cohort), 4);
        assert_eq!(count(GroupKind::Subject), 12);
    }

    #[test]
    fn test_pinned_jobs_have_no_name() {
        let config = EsdTermDataset::new().config();
        let j30 = config.jobs.get("J30").unwrap();
        assert!(j30.name.is_empty());
        assert_eq!(
            config.jobs.get("J05").map(|j| j.name.as_str()),
            Some("40.012 Manufacturing and Service Operations LS01")
        );
    }

    #[test]
    fn test_legacy_profile_can_be_selected() {
        let config = EsdTermDataset::new()
            .config()
            .with_active_profile(LEGACY_PROFILE);
        let weights = &config.active_weights().unwrap().weights;
        assert_eq!(weights.len(), ESD_SLOTS_PER_DAY);
        assert_eq!(weights[16], 4.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_esd_model_size() {
        let config = EsdTermDataset::new().config();
        let model = ModelBuilder::build(&config).unwrap();
        let starts = 37 * ESD_SLOTS_PER_DAY * ESD_DAYS;
        let counters = ESD_SLOTS_PER_DAY * ESD_DAYS;
        assert_eq!(model.var_count(), starts + counters);
        assert_eq!(model.count_family(ConstraintFamily::SingleStart), 37);
        assert_eq!(model.count_family(ConstraintFamily::FixedAssignment), 10);
        assert_eq!(model.count_family(ConstraintFamily::ForbiddenWindow), 6);
        assert_eq!(model.count_family(ConstraintFamily::Congestion), counters);
        // 12 subjects × 5 days
        assert_eq!(model.count_family(ConstraintFamily::SameDayRepeat), 60);
        // 20 room/instructor/cohort groups × 115 cells
        assert_eq!(
            model.count_family(ConstraintFamily::MutualExclusion(GroupKind::Room))
                + model.count_family(ConstraintFamily::MutualExclusion(GroupKind::Instructor))
                + model.count_family(ConstraintFamily::MutualExclusion(GroupKind::Cohort)),
            20 * counters
        );
    }
}
