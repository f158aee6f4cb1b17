use crate::filter::{Filter, FilterEngine};
use crate::registry::DataStore;
use hdf_report::ControlStatus;
use serde::{Deserialize, Serialize};

/// Per-status histogram over one filtered control set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
    pub not_reviewed: usize,
    pub profile_error: usize,
    pub from_profile: usize,
}

impl StatusCounts {
    /// Run one filtered query and count the outcomes
    pub fn tally(engine: &mut FilterEngine, store: &DataStore, filter: &Filter) -> Self {
        let mut counts = Self::default();
        for control in engine.controls(store, filter).iter() {
            match control.status {
                ControlStatus::Passed => counts.passed += 1,
                ControlStatus::Failed => counts.failed += 1,
                ControlStatus::NotApplicable => counts.not_applicable += 1,
                ControlStatus::NotReviewed => counts.not_reviewed += 1,
                ControlStatus::ProfileError => counts.profile_error += 1,
                ControlStatus::FromProfile => counts.from_profile += 1,
            }
        }
        counts
    }

    #[must_use]
    pub const fn get(&self, status: ControlStatus) -> usize {
        match status {
            ControlStatus::Passed => self.passed,
            ControlStatus::Failed => self.failed,
            ControlStatus::NotApplicable => self.not_applicable,
            ControlStatus::NotReviewed => self.not_reviewed,
            ControlStatus::ProfileError => self.profile_error,
            ControlStatus::FromProfile => self.from_profile,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed
            + self.failed
            + self.not_applicable
            + self.not_reviewed
            + self.profile_error
            + self.from_profile
    }
}
