use clap::ValueEnum;
use hdf_report::{ControlStatus, Severity};

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum StatusFlag {
    Passed,
    Failed,
    NotApplicable,
    NotReviewed,
    ProfileError,
    FromProfile,
}

impl StatusFlag {
    pub(crate) const fn as_domain(self) -> ControlStatus {
        match self {
            StatusFlag::Passed => ControlStatus::Passed,
            StatusFlag::Failed => ControlStatus::Failed,
            StatusFlag::NotApplicable => ControlStatus::NotApplicable,
            StatusFlag::NotReviewed => ControlStatus::NotReviewed,
            StatusFlag::ProfileError => ControlStatus::ProfileError,
            StatusFlag::FromProfile => ControlStatus::FromProfile,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum SeverityFlag {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityFlag {
    pub(crate) const fn as_domain(self) -> Severity {
        match self {
            SeverityFlag::None => Severity::None,
            SeverityFlag::Low => Severity::Low,
            SeverityFlag::Medium => Severity::Medium,
            SeverityFlag::High => Severity::High,
            SeverityFlag::Critical => Severity::Critical,
        }
    }
}
