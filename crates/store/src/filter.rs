use crate::context::{ContextualizedControl, ContextualizedEvaluation, ContextualizedProfile};
use crate::file::FileId;
use crate::registry::DataStore;
use hdf_report::{CategoryPath, ControlStatus, Severity};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bound on memoized query results
pub const MAX_CACHE_ENTRIES: usize = 20;

/// A frozen query result: shared, immutable, returned as-is on cache hits
pub type ControlSet = Arc<[Arc<ContextualizedControl>]>;

/// A composite query over the loaded data. A plain value object: two
/// filters that are semantically equal after normalization produce the
/// same cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Which files to draw controls from
    pub from_file: Vec<FileId>,

    /// Keep only controls with this resolved status
    pub status: Option<ControlStatus>,

    /// Keep only controls with this severity
    pub severity: Option<Severity>,

    /// Keep only the control with exactly this id
    pub control_id: Option<String>,

    /// Case-insensitive substring looked for in id, title, code,
    /// severity, status, and finding details
    pub search_term: Option<String>,

    /// Drop controls superseded by an overlay layer
    pub omit_overlayed_controls: Option<bool>,

    /// Classification tree path; keeps controls with a covered tag
    pub tree_path: Vec<String>,
}

impl Filter {
    /// Query everything in the given files
    #[must_use]
    pub fn for_files(ids: Vec<FileId>) -> Self {
        Self {
            from_file: ids,
            ..Default::default()
        }
    }

    /// Normalized copy: absent search term becomes empty, a present one
    /// is trimmed, and the overlay flag gets its default. All other
    /// fields pass through unchanged.
    fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.search_term = Some(
            self.search_term
                .as_deref()
                .map_or(String::new(), |term| term.trim().to_string()),
        );
        normalized.omit_overlayed_controls = Some(self.omit_overlayed_controls.unwrap_or(false));
        normalized
    }

    /// Deterministic serialization of the normalized filter. The key is a
    /// complete function of every input that affects the query result,
    /// which is what lets the cache skip explicit invalidation: new data
    /// arrives under new file ids and therefore new keys.
    #[must_use]
    pub fn cache_key(&self) -> String {
        serde_json::to_string(&self.normalized()).expect("filter serialization is infallible")
    }
}

/// Evaluates filters against the registry and memoizes the results by
/// canonical filter identity. Construct once and reuse; the cache is an
/// instance field, not hidden per-call state.
pub struct FilterEngine {
    cache: LruCache<String, ControlSet>,
}

impl FilterEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_CACHE_ENTRIES)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is non-zero");
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Evaluations owned by the given files
    #[must_use]
    pub fn evaluations(
        &self,
        store: &DataStore,
        ids: &[FileId],
    ) -> Vec<Arc<ContextualizedEvaluation>> {
        store.evaluations(ids)
    }

    /// Profiles rooted in the given files
    #[must_use]
    pub fn profiles(&self, store: &DataStore, ids: &[FileId]) -> Vec<Arc<ContextualizedProfile>> {
        store.profiles(ids)
    }

    /// All controls matching `filter`, in profile traversal order.
    ///
    /// Each predicate is a pure intersection, applied in a fixed order.
    /// Results are frozen and memoized; a hit returns the same shared
    /// instance without recomputation. Unknown file ids contribute no
    /// controls and are not an error.
    pub fn controls(&mut self, store: &DataStore, filter: &Filter) -> ControlSet {
        let key = filter.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Filter cache hit for {key}");
            return Arc::clone(cached);
        }

        let mut controls: Vec<Arc<ContextualizedControl>> = store
            .profiles(&filter.from_file)
            .iter()
            .flat_map(|profile| profile.controls.iter().cloned())
            .collect();

        if let Some(control_id) = &filter.control_id {
            controls.retain(|c| c.data.id == *control_id);
        }

        if let Some(status) = filter.status {
            controls.retain(|c| c.status == status);
        }

        if let Some(severity) = filter.severity {
            controls.retain(|c| c.severity == severity);
        }

        if filter.omit_overlayed_controls.unwrap_or(false) {
            controls.retain(|c| !c.is_overlaid());
        }

        if let Some(term) = filter.search_term.as_deref() {
            let term = term.trim().to_lowercase();
            if !term.is_empty() {
                controls.retain(|c| contains_term(c, &term));
            }
        }

        if !filter.tree_path.is_empty() {
            let matcher = CategoryPath::from_segments(filter.tree_path.clone());
            controls.retain(|c| c.categories.iter().any(|tag| matcher.covers(tag)));
        }

        let frozen: ControlSet = controls.into();
        self.cache.put(key, Arc::clone(&frozen));
        frozen
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the lowercased `term` occurs in any searchable field of the
/// control. Absent fields are skipped, never matched.
fn contains_term(control: &ContextualizedControl, term: &str) -> bool {
    let searchables = [
        Some(control.data.id.as_str()),
        control.data.title.as_deref(),
        control.data.code.as_deref(),
        Some(control.severity.as_str()),
        Some(control.status.as_str()),
        Some(control.finding_details.as_str()),
    ];

    searchables
        .into_iter()
        .flatten()
        .any(|s| s.to_lowercase().contains(term))
}
