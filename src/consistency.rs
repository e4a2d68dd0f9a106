//! Whole-tree consistency audit: dangling links, orphans, duplicates,
//! progress files without a module, and link cycles.
//!
//! Always runs to completion and returns every finding; nothing here
//! short-circuits.

use crate::graph::KnowledgeGraph;
use crate::snapshot::{NodeKind, Snapshot};
use crate::violation::Violation;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Cross-reference the snapshot and its knowledge graph.
pub fn check(snapshot: &Snapshot, graph: &KnowledgeGraph) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_dangling_links(snapshot, &mut violations);
    check_duplicate_modules(snapshot, &mut violations);
    check_duplicate_rule_scopes(snapshot, &mut violations);
    check_orphaned_progress(snapshot, &mut violations);
    check_orphans(snapshot, graph, &mut violations);
    check_cycles(graph, &mut violations);

    violations
}

/// Every declared link must resolve to a node in the snapshot
fn check_dangling_links(snapshot: &Snapshot, violations: &mut Vec<Violation>) {
    for node in &snapshot.nodes {
        for target in &node.outbound_links {
            if snapshot.node(target).is_none() {
                violations.push(Violation::DanglingLink {
                    from: node.path.clone(),
                    target: target.clone(),
                });
            }
        }
    }
}

/// At most one README may claim a module id.
///
/// The scanner cannot produce duplicates (one README filename per
/// directory), but cached or hand-built snapshots are audited honestly.
fn check_duplicate_modules(snapshot: &Snapshot, violations: &mut Vec<Violation>) {
    let mut by_module: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for node in snapshot.nodes_of_kind(NodeKind::ModuleReadme) {
        if let Some(module) = node.module_id.as_deref() {
            by_module.entry(module).or_default().push(node.path.clone());
        }
    }

    for (module, paths) in by_module {
        if paths.len() > 1 {
            violations.push(Violation::DuplicateModule {
                module: module.to_string(),
                paths,
            });
        }
    }
}

/// At most one rule file may auto-load per directory.
///
/// Reachable with a glob rule pattern (`*.rules.md` matching two files in
/// one directory); scope resolution over such a tree has no defined
/// precedence between the duplicates.
fn check_duplicate_rule_scopes(snapshot: &Snapshot, violations: &mut Vec<Violation>) {
    let mut by_scope: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for node in snapshot.rule_nodes() {
        if let Some(scope) = node.scope_dir.as_deref() {
            by_scope.entry(scope).or_default().push(node.path.clone());
        }
    }

    for (scope, paths) in by_scope {
        if paths.len() > 1 {
            violations.push(Violation::DuplicateRuleScope {
                scope: scope.to_string(),
                paths,
            });
        }
    }
}

/// Progress implies an existing (or about-to-exist) module README
fn check_orphaned_progress(snapshot: &Snapshot, violations: &mut Vec<Violation>) {
    for node in snapshot.nodes_of_kind(NodeKind::Progress) {
        let Some(module) = node.module_id.as_deref() else {
            continue;
        };
        if snapshot.module_readme(module).is_none() {
            violations.push(Violation::OrphanedProgress {
                module: module.to_string(),
                path: node.path.clone(),
            });
        }
    }
}

/// Module nodes must be reachable from the index by some link path.
/// With no index at all, every module node is an orphan.
fn check_orphans(snapshot: &Snapshot, graph: &KnowledgeGraph, violations: &mut Vec<Violation>) {
    let mut reachable: HashSet<&str> = HashSet::new();
    if let Some(index) = graph.index_path() {
        let mut queue = VecDeque::from([index]);
        reachable.insert(index);
        while let Some(path) = queue.pop_front() {
            for neighbor in graph.neighbors(path) {
                if reachable.insert(neighbor.as_str()) {
                    queue.push_back(neighbor.as_str());
                }
            }
        }
    }

    for node in &snapshot.nodes {
        let is_module_node = matches!(
            node.kind,
            NodeKind::ModuleReadme | NodeKind::Architecture
        );
        if is_module_node && !reachable.contains(node.path.as_str()) {
            violations.push(Violation::Orphan {
                path: node.path.clone(),
            });
        }
    }
}

/// Report link cycles (the navigator already refuses to loop, so these are
/// hygiene findings, not traversal hazards).
fn check_cycles(graph: &KnowledgeGraph, violations: &mut Vec<Violation>) {
    let mut visited: HashSet<String> = HashSet::new();
    let mut seen_cycles: HashSet<Vec<String>> = HashSet::new();

    for start in graph.node_paths() {
        if !visited.contains(start) {
            let mut rec_stack = HashSet::new();
            let mut path = Vec::new();
            dfs_collect_cycles(
                graph,
                start,
                &mut visited,
                &mut rec_stack,
                &mut path,
                &mut seen_cycles,
                violations,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn dfs_collect_cycles(
    graph: &KnowledgeGraph,
    node: &str,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
    seen_cycles: &mut HashSet<Vec<String>>,
    violations: &mut Vec<Violation>,
) {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    for neighbor in graph.neighbors(node) {
        if !visited.contains(neighbor) {
            dfs_collect_cycles(
                graph,
                neighbor,
                visited,
                rec_stack,
                path,
                seen_cycles,
                violations,
            );
        } else if rec_stack.contains(neighbor) {
            // back edge - extract the cycle from the current path
            let start_idx = path.iter().position(|p| p == neighbor).unwrap_or(0);
            let members: Vec<String> = path[start_idx..].to_vec();
            if seen_cycles.insert(canonical_rotation(&members)) {
                let mut closed = members;
                closed.push(neighbor.to_string());
                violations.push(Violation::Cycle { members: closed });
            }
        }
    }

    path.pop();
    rec_stack.remove(node);
}

/// Rotate a cycle so its smallest member comes first, making the same
/// cycle discovered from different entry points compare equal
fn canonical_rotation(members: &[String]) -> Vec<String> {
    let Some(min_idx) = members
        .iter()
        .enumerate()
        .min_by_key(|(_, m)| m.as_str())
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(members.len());
    rotated.extend_from_slice(&members[min_idx..]);
    rotated.extend_from_slice(&members[..min_idx]);
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Node;
    use std::path::PathBuf;

    fn node(path: &str, kind: NodeKind, module: Option<&str>, links: &[&str]) -> Node {
        Node {
            path: path.to_string(),
            kind,
            scope_dir: None,
            verified: None,
            line_count: 10,
            outbound_links: links.iter().map(|s| s.to_string()).collect(),
            module_id: module.map(str::to_string),
        }
    }

    fn snapshot(nodes: Vec<Node>) -> Snapshot {
        Snapshot {
            root: PathBuf::from("/p"),
            nodes,
        }
    }

    fn check_all(nodes: Vec<Node>) -> Vec<Violation> {
        let snapshot = snapshot(nodes);
        let graph = KnowledgeGraph::build(&snapshot);
        check(&snapshot, &graph)
    }

    #[test]
    fn test_clean_tree_is_empty() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &["k/a/README.md"]),
            node("k/a/README.md", NodeKind::ModuleReadme, Some("a"), &[]),
        ]);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_dangling_link_reported_once() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &["k/a/README.md"]),
            node(
                "k/a/README.md",
                NodeKind::ModuleReadme,
                Some("a"),
                &["k/ghost/README.md"],
            ),
        ]);
        assert_eq!(
            violations,
            vec![Violation::DanglingLink {
                from: "k/a/README.md".to_string(),
                target: "k/ghost/README.md".to_string(),
            }]
        );
    }

    #[test]
    fn test_orphan_through_unreferenced_intermediate() {
        // b is linked only from a, and a is never linked from the index
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &[]),
            node("k/a/README.md", NodeKind::ModuleReadme, Some("a"), &["k/b/README.md"]),
            node("k/b/README.md", NodeKind::ModuleReadme, Some("b"), &[]),
        ]);
        let orphans: Vec<_> = violations
            .iter()
            .filter_map(|v| match v {
                Violation::Orphan { path } => Some(path.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(orphans, vec!["k/a/README.md", "k/b/README.md"]);
    }

    #[test]
    fn test_no_index_orphans_everything() {
        let violations = check_all(vec![
            node("k/a/README.md", NodeKind::ModuleReadme, Some("a"), &[]),
            node("k/a/ARCHITECTURE.md", NodeKind::Architecture, Some("a"), &[]),
        ]);
        let orphan_count = violations
            .iter()
            .filter(|v| matches!(v, Violation::Orphan { .. }))
            .count();
        assert_eq!(orphan_count, 2);
    }

    #[test]
    fn test_duplicate_module_ids() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &[]),
            node("k/pay/README.md", NodeKind::ModuleReadme, Some("payments"), &[]),
            node("k/payments/README.md", NodeKind::ModuleReadme, Some("payments"), &[]),
        ]);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::DuplicateModule { module, paths }
                if module == "payments" && paths.len() == 2
        )));
    }

    fn rule(path: &str, scope: &str) -> Node {
        Node {
            scope_dir: Some(scope.to_string()),
            ..node(path, NodeKind::Rule, None, &[])
        }
    }

    #[test]
    fn test_duplicate_rule_scope() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &[]),
            rule("a.rules.md", ""),
            rule("b.rules.md", ""),
            rule("src/c.rules.md", "src"),
        ]);
        assert_eq!(
            violations,
            vec![Violation::DuplicateRuleScope {
                scope: String::new(),
                paths: vec!["a.rules.md".to_string(), "b.rules.md".to_string()],
            }]
        );
    }

    #[test]
    fn test_progress_without_readme() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &[]),
            node("k/a/_progress.md", NodeKind::Progress, Some("a"), &[]),
        ]);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::OrphanedProgress { module, .. } if module == "a"
        )));
    }

    #[test]
    fn test_cycle_reported_once_not_fatal() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &["k/a/README.md"]),
            node("k/a/README.md", NodeKind::ModuleReadme, Some("a"), &["k/b/README.md"]),
            node("k/b/README.md", NodeKind::ModuleReadme, Some("b"), &["k/a/README.md"]),
        ]);
        let cycles: Vec<_> = violations
            .iter()
            .filter(|v| matches!(v, Violation::Cycle { .. }))
            .collect();
        assert_eq!(cycles.len(), 1);
        if let Violation::Cycle { members } = cycles[0] {
            assert_eq!(members.first(), members.last());
            assert_eq!(members.len(), 3);
        }
    }

    #[test]
    fn test_self_link_cycle() {
        let violations = check_all(vec![
            node("k/INDEX.md", NodeKind::Index, None, &["k/a/README.md"]),
            node("k/a/README.md", NodeKind::ModuleReadme, Some("a"), &["k/a/README.md"]),
        ]);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::Cycle { members } if members.len() == 2)));
    }
}
