//! Job (class session) model.
//!
//! A job is one atomic teaching activity: a lecture or a cohort class
//! period. It occupies a fixed number of consecutive slots once started.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A schedulable activity with a fixed slot duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Number of consecutive slots the job occupies ("processing time").
    pub duration: usize,
    /// Human-readable name used in the report. May be empty.
    #[serde(default)]
    pub name: String,
}

impl Job {
    /// Creates a new job.
    pub fn new(id: impl Into<String>, duration: usize) -> Self {
        Self {
            id: id.into(),
            duration,
            name: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// The fixed, ordered set of jobs of one run.
///
/// Declaration order is the canonical job index used by every model
/// structure ([`SlotKey::job`](super::SlotKey)).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Job>", into = "Vec<Job>")]
pub struct JobCatalogue {
    jobs: Vec<Job>,
    index: HashMap<String, usize>,
}

impl JobCatalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a job. A duplicate id keeps the first index for lookups;
    /// validation reports the duplicate.
    pub fn push(&mut self, job: Job) {
        let idx = self.jobs.len();
        self.index.entry(job.id.clone()).or_insert(idx);
        self.jobs.push(job);
    }

    /// Builder: appends a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.push(job);
        self
    }

    /// Declaration index of a job id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Looks up a job by id.
    pub fn get(&self, id: &str) -> Option<&Job> {
        self.index_of(id).map(|i| &self.jobs[i])
    }

    /// Job at a declaration index.
    pub fn at(&self, idx: usize) -> Option<&Job> {
        self.jobs.get(idx)
    }

    /// Whether a job id is declared.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Jobs in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Jobs as a slice.
    pub fn as_slice(&self) -> &[Job] {
        &self.jobs
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl From<Vec<Job>> for JobCatalogue {
    fn from(jobs: Vec<Job>) -> Self {
        let mut catalogue = Self::new();
        for job in jobs {
            catalogue.push(job);
        }
        catalogue
    }
}

impl From<JobCatalogue> for Vec<Job> {
    fn from(catalogue: JobCatalogue) -> Self {
        catalogue.jobs
    }
}

impl<'a> IntoIterator for &'a JobCatalogue {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
