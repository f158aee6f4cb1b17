use crate::context::{ContextualizedEvaluation, ContextualizedProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a loaded file.
///
/// Monotonically-informative: if file A is loaded after file B, then
/// `A.id > B.id`, so ids double as load order. Never reused or mutated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque pass-through metadata supplied by an external persistence
/// collaborator. Nothing in the query layer interprets these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileMeta {
    /// The filename this document was uploaded under
    pub filename: String,

    pub database_id: Option<u64>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl FileMeta {
    pub fn named(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }
}

/// The single payload a file carries: a scan run or a profile definition
#[derive(Debug, Clone)]
pub enum Payload {
    Evaluation(Arc<ContextualizedEvaluation>),
    Profile(Arc<ContextualizedProfile>),
}

/// A loaded source file: identity, display metadata, and exactly one
/// payload kind
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub meta: FileMeta,
    pub payload: Payload,
}

impl SourceFile {
    #[must_use]
    pub fn is_evaluation(&self) -> bool {
        matches!(self.payload, Payload::Evaluation(_))
    }

    #[must_use]
    pub fn is_profile(&self) -> bool {
        matches!(self.payload, Payload::Profile(_))
    }

    /// The wrapped evaluation, when this is an evaluation file
    #[must_use]
    pub fn evaluation(&self) -> Option<&Arc<ContextualizedEvaluation>> {
        match &self.payload {
            Payload::Evaluation(evaluation) => Some(evaluation),
            Payload::Profile(_) => None,
        }
    }

    /// The wrapped profile, when this is a profile file
    #[must_use]
    pub fn profile(&self) -> Option<&Arc<ContextualizedProfile>> {
        match &self.payload {
            Payload::Profile(profile) => Some(profile),
            Payload::Evaluation(_) => None,
        }
    }
}
