//! Plain-text timetable report.
//!
//! One pipe-delimited line per entry, in job declaration order, followed by
//! the objective:
//!
//! ```text
//! Mon | 0830 | 1030 | 50.001 Modelling and Analysis LEC
//! Tue | 0930 | 1030 | 50.004 Introduction to Algorithms CS
//! Obj: 12
//! ```
//!
//! The field order and separators are consumed by downstream tooling and
//! must not change.

use std::fmt;

use crate::models::{ScheduleEntry, Timetable};

/// Renders a [`Timetable`] as the textual report.
#[derive(Debug, Clone, Copy)]
pub struct TimetableReport<'a> {
    timetable: &'a Timetable,
}

impl<'a> TimetableReport<'a> {
    /// Wraps a timetable for rendering.
    pub fn new(timetable: &'a Timetable) -> Self {
        Self { timetable }
    }

    /// Report line of a single entry.
    pub fn entry_line(entry: &ScheduleEntry) -> String {
        format!(
            "{} | {} | {} | {}",
            entry.day_label, entry.start_label, entry.end_label, entry.name
        )
    }

    /// Final objective line.
    pub fn objective_line(&self) -> String {
        format!("Obj: {}", format_g(self.timetable.objective))
    }

    /// All report lines, objective last.
    pub fn lines(&self) -> Vec<String> {
        self.timetable
            .entries
            .iter()
            .map(Self::entry_line)
            .chain(std::iter::once(self.objective_line()))
            .collect()
    }
}

impl fmt::Display for TimetableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.timetable.entries {
            writeln!(f, "{}", Self::entry_line(entry))?;
        }
        write!(f, "{}", self.objective_line())
    }
}

/// Formats like C's `%g`: six significant digits, trailing zeros dropped,
/// scientific notation below `1e-4` and from `1e6`.
pub fn format_g(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    // Exponent after rounding to the target precision.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SolveStatus;

    fn entry(day: &str, start: &str, end: &str, name: &str) -> ScheduleEntry {
        ScheduleEntry {
            job_id: name.into(),
            day: 0,
            start_slot: 0,
            end_slot: 1,
            day_label: day.into(),
            start_label: start.into(),
            end_label: end.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_report_format() {
        let t = Timetable::new(
            vec![
                entry("Mon", "0830", "1030", "50.001 Modelling and Analysis LEC"),
                entry("Fri", "1900", "2030", ""),
            ],
            12.0,
            SolveStatus::Optimal,
        );
        let report = TimetableReport::new(&t);
        assert_eq!(
            report.to_string(),
            "Mon | 0830 | 1030 | 50.001 Modelling and Analysis LEC\n\
             Fri | 1900 | 2030 | \n\
             Obj: 12"
        );
        assert_eq!(report.lines().len(), 3);
        assert_eq!(report.lines()[2], "Obj: 12");
    }

    #[test]
    fn test_empty_report_has_objective_only() {
        let t = Timetable::new(Vec::new(), 0.0, SolveStatus::Optimal);
        assert_eq!(TimetableReport::new(&t).to_string(), "Obj: 0");
    }

    #[test]
    fn test_format_g() {
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(-3.0), "-3");
        assert_eq!(format_g(123.456), "123.456");
        assert_eq!(format_g(2.5), "2.5");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001234), "1.234e-05");
        assert_eq!(format_g(999999.0), "999999");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(1.0 / 3.0), "0.333333");
        assert_eq!(format_g(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_g_absorbs_solver_noise() {
        assert_eq!(format_g(41.999999999), "42");
        assert_eq!(format_g(1e-12 + 7.0), "7");
    }
}
