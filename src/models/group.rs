//! Exclusion groups.
//!
//! An exclusion group is a named set of jobs that share a scarce resource
//! (a room, an instructor, a cohort or track) or a logical grouping (the
//! sessions of one subject). Membership is not exclusive across groups: a
//! job usually appears in one room group, one instructor group and one or
//! more cohort groups at the same time.
//!
//! | Kind | Enforced as | Window |
//! |------|-------------|--------|
//! | Room | occupancy sum ≤ 1 per cell | standard |
//! | Instructor | occupancy sum ≤ 1 per cell | plus-one |
//! | Cohort | occupancy sum ≤ 1 per cell | plus-one |
//! | Subject | start count ≤ 1 per day | n/a |

use serde::{Deserialize, Serialize};

/// Occupancy windowing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// A job started at `s` occupies `[s, s + p - 1]`.
    Standard,
    /// As standard, plus slot `s + p`: forbids back-to-back placement.
    PlusOne,
}

impl WindowKind {
    /// All window kinds.
    pub const ALL: [WindowKind; 2] = [WindowKind::Standard, WindowKind::PlusOne];

    /// Dense index for table lookups.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            WindowKind::Standard => 0,
            WindowKind::PlusOne => 1,
        }
    }
}

/// What a group of jobs shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Same location.
    Room,
    /// Same teaching staff.
    Instructor,
    /// Same class or track of students.
    Cohort,
    /// Sessions of the same subject: at most one start per day.
    Subject,
}

impl GroupKind {
    /// Default occupancy window for this kind. `None` for subject groups,
    /// which constrain start events rather than occupancy.
    pub fn default_window(self) -> Option<WindowKind> {
        match self {
            GroupKind::Room => Some(WindowKind::Standard),
            GroupKind::Instructor | GroupKind::Cohort => Some(WindowKind::PlusOne),
            GroupKind::Subject => None,
        }
    }
}

/// A named set of mutually exclusive jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionGroup {
    /// Group name (for diagnostics).
    pub name: String,
    /// What the jobs share.
    pub kind: GroupKind,
    /// Member job ids.
    pub jobs: Vec<String>,
    /// Window override. `None` = the kind's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowKind>,
}

impl ExclusionGroup {
    /// Creates a new group.
    pub fn new<I, S>(name: impl Into<String>, kind: GroupKind, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            jobs: jobs.into_iter().map(Into::into).collect(),
            window: None,
        }
    }

    /// Creates a room group.
    pub fn room<I, S>(name: impl Into<String>, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, GroupKind::Room, jobs)
    }

    /// Creates an instructor group.
    pub fn instructor<I, S>(name: impl Into<String>, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, GroupKind::Instructor, jobs)
    }

    /// Creates a cohort group.
    pub fn cohort<I, S>(name: impl Into<String>, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, GroupKind::Cohort, jobs)
    }

    /// Creates a subject group.
    pub fn subject<I, S>(name: impl Into<String>, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, GroupKind::Subject, jobs)
    }

    /// Overrides the occupancy window.
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = Some(window);
        self
    }

    /// Effective occupancy window, `None` for subject groups.
    pub fn effective_window(&self) -> Option<WindowKind> {
        match self.kind {
            GroupKind::Subject => None,
            kind => self.window.or(kind.default_window()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        assert_eq!(GroupKind::Room.default_window(), Some(WindowKind::Standard));
        assert_eq!(GroupKind::Instructor.default_window(), Some(WindowKind::PlusOne));
        assert_eq!(GroupKind::Cohort.default_window(), Some(WindowKind::PlusOne));
        assert_eq!(GroupKind::Subject.default_window(), None);
    }

    #[test]
    fn test_window_override() {
        let g = ExclusionGroup::room("R1", ["A", "B"]).with_window(WindowKind::PlusOne);
        assert_eq!(g.effective_window(), Some(WindowKind::PlusOne));

        // Subject groups never use occupancy.
        let s = ExclusionGroup::subject("S1", ["A", "B"]).with_window(WindowKind::Standard);
        assert_eq!(s.effective_window(), None);
    }

    #[test]
    fn test_group_members() {
        let g = ExclusionGroup::instructor("prof", vec!["J01".to_string(), "J02".to_string()]);
        assert_eq!(g.kind, GroupKind::Instructor);
        assert_eq!(g.jobs, vec!["J01", "J02"]);
    }
}
