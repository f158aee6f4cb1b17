use crate::context::{ContextualizedEvaluation, ContextualizedProfile};
use crate::file::{FileId, Payload, SourceFile};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of loaded source files, in load order.
///
/// The registry exclusively owns every registered tree; queries hand out
/// shared `Arc` references and never mutate the trees.
#[derive(Debug, Default)]
pub struct DataStore {
    next_id: u64,
    files: BTreeMap<FileId, SourceFile>,
}

impl DataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next file id. Ids are strictly increasing and never reused.
    pub fn fresh_id(&mut self) -> FileId {
        self.next_id += 1;
        FileId(self.next_id)
    }

    pub fn insert(&mut self, file: SourceFile) {
        log::info!(
            "Registered {} file {} ({})",
            if file.is_evaluation() { "evaluation" } else { "profile" },
            file.id,
            file.meta.filename
        );
        self.files.insert(file.id, file);
    }

    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All files, in load order
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// Files wrapping a scan run, in load order
    pub fn evaluation_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files().filter(|f| f.is_evaluation())
    }

    /// Files wrapping a profile definition, in load order
    pub fn profile_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files().filter(|f| f.is_profile())
    }

    /// Evaluations owned by the given files. Unknown ids contribute nothing.
    #[must_use]
    pub fn evaluations(&self, ids: &[FileId]) -> Vec<Arc<ContextualizedEvaluation>> {
        self.files()
            .filter(|f| ids.contains(&f.id))
            .filter_map(|f| f.evaluation().cloned())
            .collect()
    }

    /// Profiles rooted in the given files: a profile file's own profile,
    /// or every profile of an owning evaluation whose file is listed.
    /// Unknown ids contribute nothing.
    #[must_use]
    pub fn profiles(&self, ids: &[FileId]) -> Vec<Arc<ContextualizedProfile>> {
        let mut profiles = Vec::new();
        for file in self.files() {
            if !ids.contains(&file.id) {
                continue;
            }
            match &file.payload {
                Payload::Profile(profile) => profiles.push(Arc::clone(profile)),
                Payload::Evaluation(evaluation) => {
                    profiles.extend(evaluation.profiles.iter().cloned());
                }
            }
        }
        profiles
    }
}
