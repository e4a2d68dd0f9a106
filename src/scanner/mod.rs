//! Filesystem scanner: one walk, one immutable snapshot.
//!
//! Classification happens here and nowhere else. Unrecognized files are
//! ignored; hidden directories and common build output are skipped. The
//! walk refuses to loop: revisiting a directory (symlink cycle) is a
//! `ScanError`, not an infinite traversal.

mod classify;

use crate::config::NamingConfig;
use crate::error::ScanError;
use crate::parser::{frontmatter, links};
use crate::snapshot::{Node, Snapshot};
use classify::Classification;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory names never descended into
const SKIP_DIRS: &[&str] = &["target", "node_modules", "__pycache__"];

/// Walk `root` and classify files into the two trees.
///
/// Fails fast on a missing or unreadable root and on symlink cycles;
/// everything else that can be wrong with the tree is a violation for the
/// audit commands, not a scan failure.
pub fn scan(root: &Path, naming: &NamingConfig) -> Result<Snapshot, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ScanError::RootNotADirectory {
            path: root.to_path_buf(),
        });
    }

    let root = fs::canonicalize(root).map_err(|source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let rule_pattern =
        glob::Pattern::new(&naming.rule_pattern).map_err(|source| ScanError::InvalidRulePattern {
            pattern: naming.rule_pattern.clone(),
            source,
        })?;

    let mut nodes = Vec::new();
    let mut walk = WalkState::default();
    walk_directory(&root, &root, naming, &rule_pattern, &mut walk, &mut nodes)?;

    nodes.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("scanned {} nodes under {}", nodes.len(), root.display());

    Ok(Snapshot { root, nodes })
}

/// Canonicalized directories seen during one walk.
///
/// `ancestors` holds the current recursion path: re-entering one of those
/// is a genuine symlink cycle. `visited` holds everything walked so far:
/// reaching an already-walked directory again (symlinks converging on a
/// shared directory) is loop-free and just skipped.
#[derive(Default)]
struct WalkState {
    ancestors: HashSet<PathBuf>,
    visited: HashSet<PathBuf>,
}

fn walk_directory(
    dir: &Path,
    root: &Path,
    naming: &NamingConfig,
    rule_pattern: &glob::Pattern,
    walk: &mut WalkState,
    nodes: &mut Vec<Node>,
) -> Result<(), ScanError> {
    let canonical = fs::canonicalize(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    if walk.ancestors.contains(&canonical) {
        return Err(ScanError::SymlinkCycle {
            path: dir.to_path_buf(),
        });
    }
    if !walk.visited.insert(canonical.clone()) {
        debug!("already walked {}, skipping", dir.display());
        return Ok(());
    }
    walk.ancestors.insert(canonical.clone());

    let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        if path.is_dir() {
            let rel_dir = relative_path(&path, root);
            if should_descend(&name, &rel_dir, naming) {
                walk_directory(&path, root, naming, rule_pattern, walk, nodes)?;
            } else {
                debug!("skipping directory {rel_dir}");
            }
        } else if path.is_file() {
            let rel = relative_path(&path, root);
            if let Some(classification) = classify::classify(&rel, &name, naming, rule_pattern) {
                nodes.push(read_node(&path, rel, classification)?);
            }
        }
    }

    walk.ancestors.remove(&canonical);
    Ok(())
}

/// Hidden directories are skipped unless they lead to the configured
/// knowledge root (which may itself be hidden, e.g. `.knowledge/`).
fn should_descend(name: &str, rel_dir: &str, naming: &NamingConfig) -> bool {
    if SKIP_DIRS.contains(&name) {
        return false;
    }
    if name.starts_with('.') {
        let kroot = naming.knowledge_root.as_str();
        return rel_dir == kroot || kroot.starts_with(&format!("{rel_dir}/"));
    }
    true
}

fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_node(path: &Path, rel: String, classification: Classification) -> Result<Node, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = match rel.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    };
    let outbound_links = links::extract_links(&content)
        .iter()
        .map(|target| links::resolve_link(&base_dir, target))
        .collect();

    Ok(Node {
        path: rel,
        kind: classification.kind,
        scope_dir: classification.scope_dir,
        verified: frontmatter::verified_date(&content),
        line_count: content.lines().count(),
        outbound_links,
        module_id: classification.module_id,
    })
}
