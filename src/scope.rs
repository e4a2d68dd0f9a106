//! Tree-1 scope resolution: which rule files auto-load for a working path.
//!
//! Pure function of the snapshot - no I/O, deterministic. The working path
//! does not need to exist; resolution is lexical.

use crate::error::OutOfScopeError;
use crate::snapshot::{Node, Snapshot};
use std::path::{Component, Path};

/// Every rule node whose scope directory is an ancestor of (or equal to)
/// `working_path`, ordered from the project root inward.
///
/// Later entries are more specific and take precedence when rules conflict.
/// Fails with [`OutOfScopeError`] when the working path escapes the project
/// root (absolute paths outside the root, or relative paths climbing past it).
pub fn resolve_scope<'a>(
    snapshot: &'a Snapshot,
    working_path: &Path,
) -> Result<Vec<&'a Node>, OutOfScopeError> {
    let rel = normalize_working_path(snapshot, working_path)?;

    let mut rules: Vec<&Node> = snapshot
        .rule_nodes()
        .filter(|node| {
            node.scope_dir
                .as_deref()
                .is_some_and(|scope| is_ancestor_or_equal(scope, &rel))
        })
        .collect();

    rules.sort_by_key(|node| scope_depth(node));
    Ok(rules)
}

/// Normalize to a root-relative slash-separated path
fn normalize_working_path(snapshot: &Snapshot, path: &Path) -> Result<String, OutOfScopeError> {
    let out_of_scope = || OutOfScopeError {
        path: path.display().to_string(),
    };

    let relative = if path.is_absolute() {
        path.strip_prefix(&snapshot.root)
            .map_err(|_| out_of_scope())?
            .to_path_buf()
    } else {
        path.to_path_buf()
    };

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(out_of_scope());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(out_of_scope()),
        }
    }

    Ok(parts.join("/"))
}

fn is_ancestor_or_equal(scope: &str, working: &str) -> bool {
    scope.is_empty() || working == scope || working.starts_with(&format!("{scope}/"))
}

fn scope_depth(node: &Node) -> usize {
    match node.scope_dir.as_deref() {
        Some("") | None => 0,
        Some(scope) => scope.split('/').count(),
    }
}
