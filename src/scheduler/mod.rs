//! Exact timetable scheduling and KPI evaluation.
//!
//! # Algorithm
//!
//! `TimetableScheduler` formulates the weekly timetable as a binary integer
//! program over start variables `X[job, slot, day]` and hands it to a
//! mixed-integer solver. Unlike greedy placement it returns a proven optimum
//! (or the best incumbent when a limit stops the solver).
//!
//! # KPI
//!
//! `TimetableKpi` splits the achieved objective into preference cost and
//! congestion penalty, and reports per-day load.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Wolsey (1998), "Integer Programming", Ch. 1

mod decode;
mod kpi;
mod mip;

pub use decode::decode;
pub use kpi::TimetableKpi;
pub use mip::TimetableScheduler;
