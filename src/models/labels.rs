//! Display labels for grid indices.
//!
//! Maps day indices to names and slot indices to wall-clock times.
//!
//! # Time Model
//! Slot `i` starts at `first_minute + i * slot_minutes` minutes after
//! midnight. Labels are `HHMM` with no separator (`0830`, `1930`). The clock
//! is not bounded by the grid: an end slot past the last slot of the day
//! (a class ending at 20:30) still renders.

use serde::{Deserialize, Serialize};

/// Wall-clock mapping of slot indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotClock {
    /// Start of slot 0 in minutes after midnight.
    pub first_minute: u32,
    /// Slot length in minutes.
    pub slot_minutes: u32,
}

impl SlotClock {
    /// Creates a new clock.
    pub fn new(first_minute: u32, slot_minutes: u32) -> Self {
        Self {
            first_minute,
            slot_minutes,
        }
    }

    /// Half-hour slots starting at `hour:minute`.
    pub fn half_hourly_from(hour: u32, minute: u32) -> Self {
        Self::new(hour * 60 + minute, 30)
    }

    /// Minutes after midnight at which `slot` begins.
    #[inline]
    pub fn minute_of(&self, slot: usize) -> u64 {
        u64::from(self.first_minute) + slot as u64 * u64::from(self.slot_minutes)
    }

    /// `HHMM` label of the boundary at the start of `slot`.
    pub fn label(&self, slot: usize) -> String {
        let minute = self.minute_of(slot);
        format!("{:02}{:02}", minute / 60, minute % 60)
    }
}

impl Default for SlotClock {
    /// 30-minute slots from 08:30.
    fn default() -> Self {
        Self::half_hourly_from(8, 30)
    }
}

/// Day names and the slot clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLabels {
    /// Day names, indexed by day.
    pub day_names: Vec<String>,
    /// Slot-to-time mapping.
    pub clock: SlotClock,
}

impl ScheduleLabels {
    /// Creates labels from day names and a clock.
    pub fn new<I, S>(day_names: I, clock: SlotClock) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            day_names: day_names.into_iter().map(Into::into).collect(),
            clock,
        }
    }

    /// Monday to Friday with the default clock.
    pub fn weekdays() -> Self {
        Self::new(["Mon", "Tue", "Wed", "Thu", "Fri"], SlotClock::default())
    }

    /// Name of a day. Unknown days render as `D<index>`.
    pub fn day(&self, day: usize) -> String {
        self.day_names
            .get(day)
            .cloned()
            .unwrap_or_else(|| format!("D{day}"))
    }

    /// Time label of a slot boundary.
    pub fn time(&self, slot: usize) -> String {
        self.clock.label(slot)
    }
}

impl Default for ScheduleLabels {
    fn default() -> Self {
        Self::weekdays()
    }
}
