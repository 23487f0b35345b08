//! Input validation for timetabling instances.
//!
//! Checks the structural integrity of a [`TimetableConfig`] before any model
//! is built. Detects:
//! - Empty grids and missing labels
//! - Duplicate job IDs and unusable durations
//! - References to unknown jobs (groups, pins, windows, cutoffs, contended set)
//! - Job sets listing the same job twice
//! - Out-of-range slot and day indices
//! - Missing or mis-sized preference weights
//! - Conflicting pins
//!
//! All violations are collected; the caller sees every problem at once.

use crate::config::TimetableConfig;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the violated reference.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The grid has no slots or no days.
    EmptyGrid,
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job has zero duration or cannot fit in one day.
    InvalidDuration,
    /// A rule references a job that is not in the catalogue.
    UnknownJob,
    /// A job set (group, scope, contended set) lists the same job twice.
    DuplicateMember,
    /// A slot or day index lies outside the grid.
    OutOfRange,
    /// A slot range is empty or inverted.
    EmptyRange,
    /// The active weight profile does not exist.
    UnknownWeightProfile,
    /// A weight profile does not have one entry per slot.
    WeightLengthMismatch,
    /// One job is pinned to two different starts.
    ConflictingPins,
    /// Fewer day labels than days.
    MissingLabel,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a timetabling configuration.
///
/// Checks:
/// 1. Grid has at least one slot and one day; every day has a label
/// 2. No duplicate job IDs; every duration is in `1..=slots_per_day`
/// 3. Every job referenced by a group, pin, window, cutoff or the contended
///    set exists
/// 4. Pin, window and cutoff indices lie inside the grid
/// 5. Forbidden window slot ranges are non-empty
/// 6. The active weight profile exists and every profile has
///    `slots_per_day` entries
/// 7. No job is pinned to two different starts
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &TimetableConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let grid = config.grid;

    if grid.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyGrid,
            format!(
                "Grid must have at least one slot and one day (got {} slots x {} days)",
                grid.slots_per_day, grid.days
            ),
        ));
    }

    if config.labels.day_names.len() < grid.days {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingLabel,
            format!(
                "{} day labels for {} days",
                config.labels.day_names.len(),
                grid.days
            ),
        ));
    }

    // Jobs
    let mut job_ids = HashSet::new();
    for job in &config.jobs {
        if !job_ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        if job.duration == 0 || job.duration > grid.slots_per_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Job '{}' has duration {} (must be 1..={})",
                    job.id, job.duration, grid.slots_per_day
                ),
            ));
        }
    }

    let check_job = |errors: &mut Vec<ValidationError>, owner: &str, id: &str| {
        if !job_ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownJob,
                format!("{owner} references unknown job '{id}'"),
            ));
        }
    };

    // Job sets are sets: each member at most once.
    let check_members = |errors: &mut Vec<ValidationError>, owner: &str, ids: &[String]| {
        let mut seen = HashSet::new();
        for id in ids {
            check_job(errors, owner, id);
            if !seen.insert(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateMember,
                    format!("{owner} lists job '{id}' more than once"),
                ));
            }
        }
    };

    // Groups
    for group in &config.groups {
        let owner = format!("{:?} group '{}'", group.kind, group.name);
        check_members(&mut errors, &owner, &group.jobs);
    }

    // Contended set
    check_members(&mut errors, "Contended set", &config.contended);

    // Pins
    let mut pinned: HashMap<&str, (usize, usize)> = HashMap::new();
    for pin in &config.pins {
        let owner = format!("Pin of '{}'", pin.job);
        check_job(&mut errors, &owner, &pin.job);

        if !grid.contains_slot(pin.slot) || !grid.contains_day(pin.day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!(
                    "{owner} at (slot {}, day {}) lies outside the grid",
                    pin.slot, pin.day
                ),
            ));
        }

        match pinned.get(pin.job.as_str()) {
            Some(&(slot, day)) if (slot, day) != (pin.slot, pin.day) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ConflictingPins,
                    format!(
                        "Job '{}' pinned to both (slot {slot}, day {day}) and (slot {}, day {})",
                        pin.job, pin.slot, pin.day
                    ),
                ));
            }
            Some(_) => {}
            None => {
                pinned.insert(&pin.job, (pin.slot, pin.day));
            }
        }
    }

    // Forbidden windows
    for window in &config.forbidden_windows {
        let owner = format!("Forbidden window '{}'", window.name);
        check_members(&mut errors, &owner, window.jobs.named());
        if window.start_slot >= window.end_slot {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRange,
                format!(
                    "{owner} has empty slot range {}..{}",
                    window.start_slot, window.end_slot
                ),
            ));
        } else if window.end_slot > grid.slots_per_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!(
                    "{owner} slot range {}..{} exceeds {} slots",
                    window.start_slot, window.end_slot, grid.slots_per_day
                ),
            ));
        }
        for &day in &window.days {
            if !grid.contains_day(day) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OutOfRange,
                    format!("{owner} references day {day} outside the grid"),
                ));
            }
        }
    }

    // Start cutoffs
    for cutoff in &config.start_cutoffs {
        let owner = format!("Start cutoff '{}'", cutoff.name);
        check_members(&mut errors, &owner, cutoff.jobs.named());
        if cutoff.from_slot > grid.slots_per_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!(
                    "{owner} starts at slot {} beyond {} slots",
                    cutoff.from_slot, grid.slots_per_day
                ),
            ));
        }
    }

    // Weights
    if config.active_weights().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownWeightProfile,
            format!("Active weight profile '{}' is not defined", config.active_profile),
        ));
    }
    for profile in &config.weight_profiles {
        if profile.weights.len() != grid.slots_per_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeightLengthMismatch,
                format!(
                    "Weight profile '{}' has {} entries for {} slots",
                    profile.name,
                    profile.weights.len(),
                    grid.slots_per_day
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
