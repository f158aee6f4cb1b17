use serde::{Deserialize, Serialize};

/// A full scan run: the output of executing one or more profiles
/// against a target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecReport {
    /// Scanner version that produced the run
    #[serde(default)]
    pub version: Option<String>,

    /// Target platform, when reported
    #[serde(default)]
    pub platform: Option<Platform>,

    /// The run's own profile plus any profiles it extends
    pub profiles: Vec<ProfileDef>,

    /// Run statistics
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// A profile definition document: a control set that has not been run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileReport {
    #[serde(flatten)]
    pub profile: ProfileDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    #[serde(default)]
    pub duration: Option<f64>,
}

/// One profile inside a report: a named, versioned collection of controls,
/// possibly overlaying other profiles via `depends`/`parent_profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDef {
    pub name: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub sha256: Option<String>,

    /// Profiles this one overlays, by name
    #[serde(default)]
    pub depends: Vec<Dependency>,

    /// Alternative parent link emitted by some scanner versions
    #[serde(default)]
    pub parent_profile: Option<String>,

    #[serde(default)]
    pub controls: Vec<ControlDef>,
}

/// A named dependency edge between profiles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dependency {
    #[serde(default)]
    pub name: Option<String>,
}

/// A single checkable compliance requirement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlDef {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub desc: Option<String>,

    /// Source listing of the control, when the scanner includes it
    #[serde(default)]
    pub code: Option<String>,

    /// 0.0 (informational / not applicable) through 1.0 (critical)
    #[serde(default)]
    pub impact: f64,

    #[serde(default)]
    pub tags: ControlTags,

    /// Per-test outcomes; empty for profile definitions
    #[serde(default)]
    pub results: Vec<ControlResult>,
}

/// Free-form control tags; `nist` carries the category tag strings used
/// for classification filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControlTags {
    #[serde(default)]
    pub nist: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of one test segment within a control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlResult {
    /// "passed", "failed", "skipped", or "error"
    pub status: String,

    #[serde(default)]
    pub code_desc: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub skip_message: Option<String>,

    #[serde(default)]
    pub backtrace: Option<Vec<String>>,
}
