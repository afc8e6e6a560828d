//! Snapshot loading and the views built on top of it, against the fixtures
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use deps_explorer::error::GraphError;
use deps_explorer::packages::{
    LinkKind, PackageGraph, list_data_files, load_graph_file, resolve_data_file,
};
use deps_explorer::views::{Column, InvestigateState, ListState, OrphansState};

fn fixture(name: &str) -> PackageGraph {
    load_graph_file(&Path::new("tests/fixtures").join(name)).expect("fixture loads")
}

#[test]
fn snapshot_counts_links_and_defaults() {
    let graph = fixture("snapshot.json");
    let counts = graph.counts();
    assert_eq!((counts.total, counts.explicit, counts.dependency), (8, 2, 6));
    assert_eq!(graph.links().len(), 6);
    assert_eq!(graph.node("python").unwrap().version, "unknown");

    let info = graph.info().expect("info block");
    assert_eq!(info.hostname, "workstation");

    let firefox = graph.index_of("firefox").unwrap();
    let explicit_links = graph
        .links()
        .iter()
        .filter(|link| link.kind == LinkKind::Explicit)
        .collect::<Vec<_>>();
    // libpulse is not part of the snapshot
    assert_eq!(explicit_links.iter().filter(|l| l.source == firefox).count(), 2);
}

#[test]
fn orphans_are_unrequired_dependencies() {
    let graph = fixture("snapshot.json");
    let orphans = graph.orphaned().into_iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
    assert_eq!(orphans, ["python-six"]);

    let mut state = OrphansState::default();
    state.toggle("python-six");
    let deps = state
        .selected_dependencies(&graph)
        .into_iter()
        .map(|n| n.id.clone())
        .collect::<Vec<_>>();
    assert_eq!(deps, ["python"]);
}

#[test]
fn cyclic_snapshot_terminates() {
    let graph = fixture("cyclic.json");
    let closure = graph.collect_dependencies("alpha");
    assert_eq!(closure.len(), 3);
    assert_eq!(graph.subgraph("beta").nodes.len(), 3);
    assert_eq!(graph.orphan_count(), 0);
}

#[test]
fn list_view_pins_selection_then_related() {
    let graph = fixture("snapshot.json");
    let maps = graph.dependency_maps();
    let mut state = ListState::default();
    state.click("glib2", Column::Dependency);

    let explicit = state
        .rows(&graph, &maps, Column::Explicit)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(explicit, ["firefox", "htop"]);
    assert!(state.is_highlighted(&maps, Column::Explicit, "firefox"));
    assert!(!state.is_highlighted(&maps, Column::Explicit, "htop"));

    assert_eq!(maps.needed_by("glib2"), ["firefox".to_owned()]);
    assert!(maps.needed_by("python").is_empty());
}

#[test]
fn investigate_tree_of_explicit_package() {
    let graph = fixture("snapshot.json");
    let mut state = InvestigateState::default();
    state.select(&graph, "firefox");
    assert_eq!(
        state.tree_summary(),
        "Showing 4 packages in the tree (4 connections)"
    );
}

#[test]
fn malformed_snapshot_reports_missing_nodes() {
    let error = load_graph_file(Path::new("tests/fixtures/malformed.json")).unwrap_err();
    assert!(matches!(error, GraphError::MissingNodes));
}

#[test]
fn unreadable_snapshot_reports_path() {
    let error = load_graph_file(Path::new("tests/fixtures/nope.json")).unwrap_err();
    assert!(matches!(error, GraphError::Read { .. }));
    assert!(error.to_string().contains("nope.json"));
}

#[test]
fn data_files_are_json_only_and_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("older.json"), "{}").unwrap();
    // mtime resolution on some filesystems is coarse
    thread::sleep(Duration::from_millis(1100));
    fs::write(dir.path().join("newer.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
    fs::create_dir(dir.path().join("nested.json")).unwrap();

    let files = list_data_files(dir.path()).unwrap();
    assert_eq!(files, ["newer.json", "older.json"]);
}

#[test]
fn missing_data_dir_has_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let files = list_data_files(&dir.path().join("absent")).unwrap();
    assert!(files.is_empty());
}

#[test]
fn file_names_resolve_inside_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("snap.json"), "{}").unwrap();

    assert_eq!(resolve_data_file(dir.path(), "snap.json"), dir.path().join("snap.json"));
    assert_eq!(
        resolve_data_file(dir.path(), "tests/fixtures/cyclic.json"),
        Path::new("tests/fixtures/cyclic.json")
    );
}
