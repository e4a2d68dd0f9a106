//! Integration tests for the progress lifecycle audit across two scans.

use ctxtree::config::NamingConfig;
use ctxtree::progress::{self, TransitionKind};
use ctxtree::scanner;
use ctxtree::snapshot::Snapshot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Should create fixture directories");
    }
    fs::write(path, content).expect("Should write fixture file");
}

fn readme_with_lines(lines: usize) -> String {
    let mut content = String::from("---\nverified: 2026-08-01\n---\n# Payments\n");
    for i in 0..lines {
        content.push_str(&format!("detail {i}\n"));
    }
    content
}

fn scan(root: &Path) -> Snapshot {
    scanner::scan(root, &NamingConfig::default()).expect("Should scan")
}

#[test]
fn test_resolved_merged_when_readme_grows() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "knowledge/INDEX.md", "- [p](payments/README.md)\n");
    write_file(temp.path(), "knowledge/payments/README.md", &readme_with_lines(76));
    write_file(temp.path(), "knowledge/payments/_progress.md", "- refunds in flight\n");
    let previous = scan(temp.path());

    fs::remove_file(temp.path().join("knowledge/payments/_progress.md"))
        .expect("Should remove progress file");
    write_file(temp.path(), "knowledge/payments/README.md", &readme_with_lines(91));
    let current = scan(temp.path());

    let transitions = progress::audit(&previous, &current);
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].module, "payments");
    assert_eq!(transitions[0].kind, TransitionKind::ResolvedMerged);
    assert!(!transitions[0].kind.is_warning());
}

#[test]
fn test_lost_progress_when_readme_unchanged() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "knowledge/INDEX.md", "- [p](payments/README.md)\n");
    write_file(temp.path(), "knowledge/payments/README.md", &readme_with_lines(76));
    write_file(temp.path(), "knowledge/payments/_progress.md", "- refunds in flight\n");
    let previous = scan(temp.path());

    fs::remove_file(temp.path().join("knowledge/payments/_progress.md"))
        .expect("Should remove progress file");
    let current = scan(temp.path());

    let transitions = progress::audit(&previous, &current);
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].kind, TransitionKind::LostProgress);
    assert!(transitions[0].kind.is_warning());
}

#[test]
fn test_session_suspended_when_progress_appears() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "knowledge/INDEX.md", "- [p](payments/README.md)\n");
    write_file(temp.path(), "knowledge/payments/README.md", &readme_with_lines(40));
    let previous = scan(temp.path());

    write_file(temp.path(), "knowledge/payments/_progress.md", "- started refunds\n");
    let current = scan(temp.path());

    let transitions = progress::audit(&previous, &current);
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].kind, TransitionKind::SessionSuspended);
}

#[test]
fn test_audit_against_cached_snapshot_file() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "knowledge/INDEX.md", "- [p](payments/README.md)\n");
    write_file(temp.path(), "knowledge/payments/README.md", &readme_with_lines(40));
    write_file(temp.path(), "knowledge/payments/_progress.md", "- in flight\n");

    let cache = temp.path().join("snapshot.json");
    scan(temp.path())
        .write_json(&cache)
        .expect("Should cache snapshot");

    fs::remove_file(temp.path().join("knowledge/payments/README.md"))
        .expect("Should remove README");
    let current = scan(temp.path());

    let previous = Snapshot::read_json(&cache).expect("Should reload cached snapshot");
    let transitions = progress::audit(&previous, &current);
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].kind, TransitionKind::OrphanedProgress);
    assert!(transitions[0].kind.is_warning());
}
