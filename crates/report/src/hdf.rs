use crate::schema::ControlDef;
use serde::{Deserialize, Serialize};

/// Resolved outcome of a control, derived from its run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlStatus {
    Passed,
    Failed,
    NotApplicable,
    NotReviewed,
    ProfileError,
    /// Control came from a profile definition, so it has no outcome
    FromProfile,
}

impl ControlStatus {
    /// Human-readable name, matching scanner terminology
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::NotApplicable => "Not Applicable",
            Self::NotReviewed => "Not Reviewed",
            Self::ProfileError => "Profile Error",
            Self::FromProfile => "From Profile",
        }
    }
}

/// Severity band derived from a control's impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Band an impact score: 0 none, then 0.4 / 0.7 / 0.9 cutoffs
    #[must_use]
    pub fn from_impact(impact: f64) -> Self {
        if impact <= 0.0 {
            Self::None
        } else if impact < 0.4 {
            Self::Low
        } else if impact < 0.7 {
            Self::Medium
        } else if impact < 0.9 {
            Self::High
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Resolve the status of an evaluation-sourced control.
///
/// Priority: errored segments win, then zero impact, then missing or
/// all-skipped results, then any failure.
#[must_use]
pub fn resolve_status(control: &ControlDef) -> ControlStatus {
    let errored = control
        .results
        .iter()
        .any(|r| r.status == "error" || r.backtrace.is_some());
    if errored {
        return ControlStatus::ProfileError;
    }
    if control.impact <= 0.0 {
        return ControlStatus::NotApplicable;
    }
    if control.results.is_empty() || control.results.iter().all(|r| r.status == "skipped") {
        return ControlStatus::NotReviewed;
    }
    if control.results.iter().any(|r| r.status == "failed") {
        ControlStatus::Failed
    } else {
        ControlStatus::Passed
    }
}

/// Flatten a control's per-test outcomes into one displayable block.
/// Empty string when the control has no results.
#[must_use]
pub fn finding_details(control: &ControlDef) -> String {
    let mut lines = Vec::with_capacity(control.results.len());
    for result in &control.results {
        let desc = result.code_desc.as_deref().unwrap_or("");
        let mut line = format!("{}: {}", result.status, desc);
        if let Some(message) = result.message.as_deref() {
            line.push(' ');
            line.push_str(message);
        }
        lines.push(line);
    }
    lines.join("\n")
}
