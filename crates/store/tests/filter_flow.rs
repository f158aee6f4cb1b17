use hdf_report::{ControlStatus, Severity};
use hdf_store::{
    load_text, DataStore, Filter, FilterEngine, Selection, StatusCounts, StoreError,
    TextLoadOptions,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

mod common;

struct Workbench {
    store: DataStore,
    selection: Selection,
    engine: FilterEngine,
}

impl Workbench {
    fn new() -> Self {
        Self {
            store: DataStore::new(),
            selection: Selection::new(),
            engine: FilterEngine::new(),
        }
    }

    fn load(&mut self, filename: &str, text: String) -> hdf_store::FileId {
        load_text(
            &mut self.store,
            &mut self.selection,
            TextLoadOptions::new(filename, text),
        )
        .expect("fixture loads")
    }
}

#[test]
fn loading_registers_and_selects_the_file() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx-a.json", common::nginx_run(true));

    assert_eq!(bench.store.len(), 1);
    assert_eq!(bench.selection.selected_file_ids(), vec![id]);
    assert!(bench.store.get(id).expect("registered").is_evaluation());
}

#[test]
fn same_filename_twice_yields_independent_files() {
    let mut bench = Workbench::new();
    let a = bench.load("nginx.json", common::nginx_run(true));
    let b = bench.load("nginx.json", common::nginx_run(true));

    assert_ne!(a, b);
    assert!(a < b, "later load gets the larger id");
    assert_eq!(bench.store.len(), 2);
}

#[test]
fn unparseable_text_leaves_the_registry_unchanged() {
    let mut bench = Workbench::new();
    bench.load("nginx.json", common::nginx_run(true));

    let err = load_text(
        &mut bench.store,
        &mut bench.selection,
        TextLoadOptions::new("garbage.json", "not a recognized document".to_string()),
    )
    .unwrap_err();

    assert!(matches!(err, StoreError::Parse(_)));
    assert_eq!(bench.store.len(), 1);
    assert_eq!(bench.selection.selected_file_ids().len(), 1);
}

#[test]
fn flattening_walks_profiles_in_order() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let all = bench
        .engine
        .controls(&bench.store, &Filter::for_files(vec![id]));
    // Wrapper controls first, then baseline; instances, not logical ids
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].profile_name, "nginx-wrapper");
    assert_eq!(all[3].profile_name, "nginx-baseline");
}

#[test]
fn unknown_file_ids_contribute_nothing() {
    let mut bench = Workbench::new();
    let missing = Filter::for_files(vec![hdf_store::FileId(99)]);
    assert!(bench.engine.controls(&bench.store, &missing).is_empty());
}

#[test]
fn overlay_omission_drops_superseded_instances() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let mut filter = Filter::for_files(vec![id]);
    filter.omit_overlayed_controls = Some(true);
    let visible = bench.engine.controls(&bench.store, &filter);

    assert_eq!(visible.len(), 3);
    assert!(visible.iter().all(|c| c.profile_name == "nginx-wrapper"));
    assert!(visible.iter().all(|c| !c.is_overlaid()));

    // Flag absent keeps both layers
    let all = bench
        .engine
        .controls(&bench.store, &Filter::for_files(vec![id]));
    assert_eq!(all.len(), 6);
}

#[test]
fn status_severity_and_id_predicates_intersect() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let mut failed = Filter::for_files(vec![id]);
    failed.status = Some(ControlStatus::Failed);
    failed.omit_overlayed_controls = Some(true);
    let failed = bench.engine.controls(&bench.store, &failed);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].data.id, "V-2");

    let mut critical = Filter::for_files(vec![id]);
    critical.severity = Some(Severity::Critical);
    critical.omit_overlayed_controls = Some(true);
    let critical = bench.engine.controls(&bench.store, &critical);
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].data.id, "V-13613");

    let mut by_id = Filter::for_files(vec![id]);
    by_id.control_id = Some("V-1".to_string());
    let by_id = bench.engine.controls(&bench.store, &by_id);
    assert_eq!(by_id.len(), 2, "both layers carry the id");
}

#[test]
fn search_is_case_insensitive_and_skips_absent_fields() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let mut search = Filter::for_files(vec![id]);
    search.omit_overlayed_controls = Some(true);
    search.search_term = Some("v-13613".to_string());
    let hits = bench.engine.controls(&bench.store, &search);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].data.id, "V-13613");

    // Finding details are searchable too
    search.search_term = Some("expected 0644".to_string());
    let hits = bench.engine.controls(&bench.store, &search);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].data.id, "V-2");

    search.search_term = Some("no such needle".to_string());
    assert!(bench.engine.controls(&bench.store, &search).is_empty());
}

#[test]
fn category_path_filters_by_prefix() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let mut by_family = Filter::for_files(vec![id]);
    by_family.omit_overlayed_controls = Some(true);
    by_family.tree_path = vec!["AC".to_string()];
    let hits = bench.engine.controls(&bench.store, &by_family);
    assert_eq!(hits.len(), 2);

    by_family.tree_path = vec!["AU".to_string()];
    let hits = bench.engine.controls(&bench.store, &by_family);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].data.id, "V-2");

    by_family.tree_path = vec!["AC".to_string(), "3".to_string(), "1".to_string()];
    let hits = bench.engine.controls(&bench.store, &by_family);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].data.id, "V-13613");
}

#[test]
fn repeated_queries_return_the_same_frozen_instance() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let filter = Filter::for_files(vec![id]);
    let first = bench.engine.controls(&bench.store, &filter);
    let second = bench.engine.controls(&bench.store, &filter);
    assert!(Arc::ptr_eq(&first, &second));

    // A textually different but canonically equal filter hits the same entry
    let mut padded = filter.clone();
    padded.search_term = Some("   ".to_string());
    padded.omit_overlayed_controls = Some(false);
    let third = bench.engine.controls(&bench.store, &padded);
    assert!(Arc::ptr_eq(&first, &third));
}

#[test]
fn new_files_produce_new_keys_instead_of_staling_old_ones() {
    let mut bench = Workbench::new();
    let a = bench.load("nginx-a.json", common::nginx_run(true));

    let only_a = Filter::for_files(vec![a]);
    let before = bench.engine.controls(&bench.store, &only_a);

    let b = bench.load("nginx-b.json", common::nginx_run(false));

    // The old query is still served from cache, untouched
    let after = bench.engine.controls(&bench.store, &only_a);
    assert!(Arc::ptr_eq(&before, &after));

    // The widened query is a different key and sees the new data
    let both = bench
        .engine
        .controls(&bench.store, &Filter::for_files(vec![a, b]));
    assert_eq!(both.len(), 12);
}

#[test]
fn lru_pressure_evicts_the_oldest_entry() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));
    bench.engine = FilterEngine::with_capacity(2);

    let f1 = Filter::for_files(vec![id]);
    let mut f2 = f1.clone();
    f2.status = Some(ControlStatus::Passed);
    let mut f3 = f1.clone();
    f3.status = Some(ControlStatus::Failed);

    let first = bench.engine.controls(&bench.store, &f1);
    bench.engine.controls(&bench.store, &f2);
    bench.engine.controls(&bench.store, &f3); // evicts f1

    let recomputed = bench.engine.controls(&bench.store, &f1);
    assert!(!Arc::ptr_eq(&first, &recomputed));
    assert_eq!(first.len(), recomputed.len());
}

#[test]
fn status_tally_matches_the_fixture() {
    let mut bench = Workbench::new();
    let id = bench.load("nginx.json", common::nginx_run(true));

    let mut filter = Filter::for_files(vec![id]);
    filter.omit_overlayed_controls = Some(true);
    let counts = StatusCounts::tally(&mut bench.engine, &bench.store, &filter);

    assert_eq!(counts.passed, 2);
    assert_eq!(counts.failed, 1);
    assert_eq!(counts.total(), 3);
    assert_eq!(counts.get(ControlStatus::ProfileError), 0);
}

#[test]
fn profile_files_expose_from_profile_controls() {
    let mut bench = Workbench::new();
    let id = bench.load("baseline.json", common::baseline_profile());

    assert!(bench.store.get(id).expect("registered").is_profile());
    let controls = bench
        .engine
        .controls(&bench.store, &Filter::for_files(vec![id]));
    assert_eq!(controls.len(), 2);
    assert!(controls
        .iter()
        .all(|c| c.status == ControlStatus::FromProfile));
}
