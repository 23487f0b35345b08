//! Timetabling domain models.
//!
//! Provides the data types describing one weekly timetabling instance and
//! its decoded solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Clinic | Sports |
//! |-------------|-----------|--------|--------|
//! | Job | Class period | Appointment | Training session |
//! | ExclusionGroup | Room/Instructor/Cohort | Room/Doctor | Pitch/Coach/Squad |
//! | ForbiddenWindow | Common-curriculum block | Ward round | Match day |
//! | Timetable | Term timetable | Weekly roster | Weekly plan |

mod constraint;
mod grid;
mod group;
mod job;
mod labels;
mod schedule;

pub use constraint::{FixedAssignment, ForbiddenWindow, JobScope, StartCutoff};
pub use grid::{SlotKey, TimeGrid};
pub use group::{ExclusionGroup, GroupKind, WindowKind};
pub use job::{Job, JobCatalogue};
pub use labels::{ScheduleLabels, SlotClock};
pub use schedule::{ScheduleEntry, SolveStatus, Timetable};
