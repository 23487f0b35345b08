//! Weekly class timetabling as a binary integer program.
//!
//! Places every class of a term on a weekly grid of half-hour slots so that
//! no room, instructor or student cohort is double-booked, pinned classes
//! keep their slot, blocked periods stay free, and the total start-time
//! preference cost plus overlap between contended electives is minimal.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeGrid`, `Job`, `ExclusionGroup`,
//!   `FixedAssignment`, `ForbiddenWindow`, `StartCutoff`, `Timetable`
//! - **`config`**: `TimetableConfig`, the complete static input of one run
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown jobs, ranges)
//! - **`ilp`**: Occupancy windows, model assembly and the solver seam
//! - **`scheduler`**: End-to-end pipeline, decoding and KPIs
//! - **`dataset`**: Built-in instances
//! - **`report`**: Pipe-delimited text output
//!
//! # Architecture
//!
//! Data flows one way: configuration → occupancy derivation → constraint and
//! objective assembly → solver → decoder. The integer search itself is
//! delegated to `good_lp`; this crate owns the formulation only.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 9
//! - Wolsey (1998), "Integer Programming"

pub mod config;
pub mod dataset;
pub mod error;
pub mod ilp;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
