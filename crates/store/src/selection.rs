use crate::file::FileId;
use crate::registry::DataStore;
use std::collections::BTreeSet;

/// Ternary answer to "is everything selected?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trinary {
    On,
    Off,
    Mixed,
}

/// Tracks which loaded files are active for querying, independently for
/// evaluation files and profile files. Both are true sets: duplicate
/// adds are no-ops, clearing an unknown id is harmless.
#[derive(Debug, Default)]
pub struct Selection {
    evaluations: BTreeSet<FileId>,
    profiles: BTreeSet<FileId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_evaluations(&mut self, ids: &[FileId]) {
        self.evaluations.extend(ids.iter().copied());
    }

    pub fn select_profiles(&mut self, ids: &[FileId]) {
        self.profiles.extend(ids.iter().copied());
    }

    pub fn clear_evaluation(&mut self, id: FileId) {
        self.evaluations.remove(&id);
    }

    pub fn clear_profile(&mut self, id: FileId) {
        self.profiles.remove(&id);
    }

    pub fn clear_all_evaluations(&mut self) {
        self.evaluations.clear();
    }

    pub fn clear_all_profiles(&mut self) {
        self.profiles.clear();
    }

    /// Drop the id from both kinds
    pub fn clear_file(&mut self, id: FileId) {
        self.clear_evaluation(id);
        self.clear_profile(id);
    }

    pub fn toggle_evaluation(&mut self, id: FileId) {
        if !self.evaluations.remove(&id) {
            self.evaluations.insert(id);
        }
    }

    pub fn toggle_profile(&mut self, id: FileId) {
        if !self.profiles.remove(&id) {
            self.profiles.insert(id);
        }
    }

    pub fn select_exclusive_evaluation(&mut self, id: FileId) {
        self.clear_all_evaluations();
        self.select_evaluations(&[id]);
    }

    pub fn select_exclusive_profile(&mut self, id: FileId) {
        self.clear_all_profiles();
        self.select_profiles(&[id]);
    }

    /// Select every evaluation file unless all already are, in which case
    /// clear them
    pub fn toggle_all_evaluations(&mut self, store: &DataStore) {
        if self.all_evaluations_selected(store) == Trinary::On {
            self.clear_all_evaluations();
        } else {
            let ids: Vec<FileId> = store.evaluation_files().map(|f| f.id).collect();
            self.select_evaluations(&ids);
        }
    }

    pub fn toggle_all_profiles(&mut self, store: &DataStore) {
        if self.all_profiles_selected(store) == Trinary::On {
            self.clear_all_profiles();
        } else {
            let ids: Vec<FileId> = store.profile_files().map(|f| f.id).collect();
            self.select_profiles(&ids);
        }
    }

    /// Selected evaluation ids, excluding any id that is actually
    /// registered as a profile file
    #[must_use]
    pub fn selected_evaluations(&self, store: &DataStore) -> Vec<FileId> {
        self.evaluations
            .iter()
            .copied()
            .filter(|id| store.profile_files().all(|f| f.id != *id))
            .collect()
    }

    /// Selected profile ids, excluding any id that is actually registered
    /// as an evaluation file
    #[must_use]
    pub fn selected_profiles(&self, store: &DataStore) -> Vec<FileId> {
        self.profiles
            .iter()
            .copied()
            .filter(|id| store.evaluation_files().all(|f| f.id != *id))
            .collect()
    }

    /// Union of both selected sets
    #[must_use]
    pub fn selected_file_ids(&self) -> Vec<FileId> {
        let mut ids: Vec<FileId> = self.evaluations.iter().copied().collect();
        ids.extend(self.profiles.iter().copied());
        ids
    }

    #[must_use]
    pub fn all_evaluations_selected(&self, store: &DataStore) -> Trinary {
        match self.selected_evaluations(store).len() {
            0 => Trinary::Off,
            n if n == store.evaluation_files().count() => Trinary::On,
            _ => Trinary::Mixed,
        }
    }

    #[must_use]
    pub fn all_profiles_selected(&self, store: &DataStore) -> Trinary {
        match self.selected_profiles(store).len() {
            0 => Trinary::Off,
            n if n == store.profile_files().count() => Trinary::On,
            _ => Trinary::Mixed,
        }
    }
}
