use crate::file::FileId;
use hdf_report::{
    finding_details, resolve_status, CategoryPath, ControlDef, ControlStatus, ExecReport,
    Platform, ProfileDef, ProfileReport, Severity,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Identifies a control within a sibling profile, for overlay edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLink {
    pub profile: String,
    pub id: String,
}

/// A control enriched with derived fields and overlay cross-links.
/// Immutable once built; the registry owns it behind `Arc` and consumers
/// hold read-only shared references.
#[derive(Debug, Clone)]
pub struct ContextualizedControl {
    /// Back-reference to the owning file
    pub from_file: FileId,
    /// Name of the profile that directly contains this control
    pub profile_name: String,
    /// The raw parsed control
    pub data: ControlDef,

    pub status: ControlStatus,
    pub severity: Severity,
    pub finding_details: String,
    /// Parsed classification tags (unparseable tag strings are skipped)
    pub categories: Vec<CategoryPath>,

    /// Controls in overlay profiles that refine or replace this one.
    /// Non-empty means this control is superseded for default display.
    pub extended_by: Vec<ControlLink>,
    /// Controls in base profiles this one refines
    pub extends_from: Vec<ControlLink>,
}

impl ContextualizedControl {
    /// Whether an overlay layer supersedes this control
    #[must_use]
    pub fn is_overlaid(&self) -> bool {
        !self.extended_by.is_empty()
    }
}

/// A profile enriched with overlay edges and its contextualized controls
#[derive(Debug, Clone)]
pub struct ContextualizedProfile {
    /// Back-reference to the owning file. For an evaluation-sourced
    /// profile this is the evaluation's file, reached two hops up.
    pub from_file: FileId,
    /// True when the profile was loaded as part of a scan run
    pub from_evaluation: bool,

    pub name: String,
    pub version: Option<String>,

    /// Names of base profiles this one overlays
    pub extends_from: Vec<String>,
    /// Names of overlay profiles that extend this one
    pub extended_by: Vec<String>,

    /// Controls directly contained by this profile
    pub controls: Vec<Arc<ContextualizedControl>>,
}

/// A scan run: the run's own profile plus any it extends
#[derive(Debug, Clone)]
pub struct ContextualizedEvaluation {
    pub from_file: FileId,
    pub version: Option<String>,
    pub platform: Option<Platform>,
    pub profiles: Vec<Arc<ContextualizedProfile>>,
}

/// Build the contextualized tree for a scan run.
///
/// Profiles are linked child -> parent when the child's `depends` names
/// the parent, or the child's `parent_profile` equals the parent's name.
/// For every parent control whose id reappears in a child profile, the
/// parent control gains an `extended_by` edge and the child control the
/// matching `extends_from` edge.
pub fn contextualize_evaluation(
    from_file: FileId,
    report: ExecReport,
) -> ContextualizedEvaluation {
    let mut profiles: Vec<ProfileInProgress> = report
        .profiles
        .into_iter()
        .map(|def| ProfileInProgress::new(from_file, true, def))
        .collect();

    link_overlays(&mut profiles);

    ContextualizedEvaluation {
        from_file,
        version: report.version,
        platform: report.platform,
        profiles: profiles.into_iter().map(ProfileInProgress::seal).collect(),
    }
}

/// Build the contextualized form of a standalone profile definition.
/// Its controls carry no run outcome, so they resolve to `FromProfile`.
pub fn contextualize_profile(from_file: FileId, report: ProfileReport) -> ContextualizedProfile {
    ProfileInProgress::new(from_file, false, report.profile)
        .seal_unwrapped()
}

/// Mutable staging form of a profile while overlay edges are wired up
struct ProfileInProgress {
    from_file: FileId,
    from_evaluation: bool,
    name: String,
    version: Option<String>,
    depends: Vec<String>,
    parent_profile: Option<String>,
    extends_from: Vec<String>,
    extended_by: Vec<String>,
    controls: Vec<ContextualizedControl>,
}

impl ProfileInProgress {
    fn new(from_file: FileId, from_evaluation: bool, def: ProfileDef) -> Self {
        let controls = def
            .controls
            .into_iter()
            .map(|control| contextualize_control(from_file, &def.name, from_evaluation, control))
            .collect();

        Self {
            from_file,
            from_evaluation,
            name: def.name,
            version: def.version,
            depends: def.depends.into_iter().filter_map(|d| d.name).collect(),
            parent_profile: def.parent_profile,
            extends_from: Vec::new(),
            extended_by: Vec::new(),
            controls,
        }
    }

    /// Names of profiles this one declares as its bases
    fn parent_names(&self) -> Vec<String> {
        let mut names = self.depends.clone();
        if let Some(parent) = &self.parent_profile {
            if !names.contains(parent) {
                names.push(parent.clone());
            }
        }
        names
    }

    fn seal(self) -> Arc<ContextualizedProfile> {
        Arc::new(self.seal_unwrapped())
    }

    fn seal_unwrapped(self) -> ContextualizedProfile {
        ContextualizedProfile {
            from_file: self.from_file,
            from_evaluation: self.from_evaluation,
            name: self.name,
            version: self.version,
            extends_from: self.extends_from,
            extended_by: self.extended_by,
            controls: self.controls.into_iter().map(Arc::new).collect(),
        }
    }
}

fn contextualize_control(
    from_file: FileId,
    profile_name: &str,
    from_evaluation: bool,
    data: ControlDef,
) -> ContextualizedControl {
    let status = if from_evaluation {
        resolve_status(&data)
    } else {
        ControlStatus::FromProfile
    };
    let severity = Severity::from_impact(data.impact);
    let details = finding_details(&data);
    let categories = data
        .tags
        .nist
        .iter()
        .filter_map(|tag| CategoryPath::parse_tag(tag))
        .collect();

    ContextualizedControl {
        from_file,
        profile_name: profile_name.to_string(),
        data,
        status,
        severity,
        finding_details: details,
        categories,
        extended_by: Vec::new(),
        extends_from: Vec::new(),
    }
}

/// Wire overlay edges between sibling profiles of one run
fn link_overlays(profiles: &mut [ProfileInProgress]) {
    let index_by_name: HashMap<String, usize> = profiles
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.clone(), i))
        .collect();

    // (child index, parent index) pairs, child declared the edge
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (child_idx, child) in profiles.iter().enumerate() {
        for parent_name in child.parent_names() {
            match index_by_name.get(&parent_name) {
                Some(&parent_idx) if parent_idx != child_idx => {
                    edges.push((child_idx, parent_idx));
                }
                Some(_) => {}
                None => {
                    log::warn!(
                        "Profile {} depends on {parent_name}, which is not present in the run",
                        child.name
                    );
                }
            }
        }
    }

    for (child_idx, parent_idx) in edges {
        let child_name = profiles[child_idx].name.clone();
        let parent_name = profiles[parent_idx].name.clone();

        profiles[child_idx].extends_from.push(parent_name.clone());
        profiles[parent_idx].extended_by.push(child_name.clone());

        // The overlay's version of a control supersedes the base's
        let child_ids: Vec<String> = profiles[child_idx]
            .controls
            .iter()
            .map(|c| c.data.id.clone())
            .collect();

        for parent_control in &mut profiles[parent_idx].controls {
            if child_ids.contains(&parent_control.data.id) {
                parent_control.extended_by.push(ControlLink {
                    profile: child_name.clone(),
                    id: parent_control.data.id.clone(),
                });
            }
        }

        let parent_ids: Vec<String> = profiles[parent_idx]
            .controls
            .iter()
            .map(|c| c.data.id.clone())
            .collect();

        for child_control in &mut profiles[child_idx].controls {
            if parent_ids.contains(&child_control.data.id) {
                child_control.extends_from.push(ControlLink {
                    profile: parent_name.clone(),
                    id: child_control.data.id.clone(),
                });
            }
        }
    }
}
