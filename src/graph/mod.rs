//! The tree-2 knowledge graph: index and module nodes, link edges.
//!
//! Built once from a snapshot and read-only afterwards. Edges keep the
//! declaration order of the links they came from, which makes traversal
//! deterministic. Only edges that resolve to graph nodes are materialized -
//! dangling targets are the consistency checker's business, not the
//! navigator's.

pub mod navigate;

pub use navigate::{navigate, Navigation};

use crate::snapshot::{NodeKind, Snapshot};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub kind: NodeKind,
    pub module_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: BTreeMap<String, GraphNode>,
    edges: BTreeMap<String, Vec<String>>,
    index: Option<String>,
}

impl KnowledgeGraph {
    /// Build the graph over index/README/architecture nodes of a snapshot
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut nodes = BTreeMap::new();
        let mut index = None;

        for node in &snapshot.nodes {
            match node.kind {
                NodeKind::Index => {
                    index = Some(node.path.clone());
                }
                NodeKind::ModuleReadme | NodeKind::Architecture => {}
                NodeKind::Rule | NodeKind::Progress => continue,
            }
            nodes.insert(
                node.path.clone(),
                GraphNode {
                    kind: node.kind,
                    module_id: node.module_id.clone(),
                },
            );
        }

        let mut edges = BTreeMap::new();
        for node in &snapshot.nodes {
            if !nodes.contains_key(&node.path) {
                continue;
            }
            let targets: Vec<String> = node
                .outbound_links
                .iter()
                .filter(|target| nodes.contains_key(*target))
                .cloned()
                .collect();
            edges.insert(node.path.clone(), targets);
        }

        Self {
            nodes,
            edges,
            index,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn module_id_of(&self, path: &str) -> Option<&str> {
        self.nodes.get(path)?.module_id.as_deref()
    }

    /// Outgoing edges in declaration order
    pub fn neighbors(&self, path: &str) -> &[String] {
        self.edges.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The index node's path, if the snapshot had one
    pub fn index_path(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn node_paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
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

    #[test]
    fn test_build_filters_non_graph_nodes_and_dangling_edges() {
        let snapshot = Snapshot {
            root: PathBuf::from("/p"),
            nodes: vec![
                node("CLAUDE.md", NodeKind::Rule, None, &["knowledge/INDEX.md"]),
                node(
                    "knowledge/INDEX.md",
                    NodeKind::Index,
                    None,
                    &["knowledge/payments/README.md", "knowledge/ghost/README.md"],
                ),
                node(
                    "knowledge/payments/README.md",
                    NodeKind::ModuleReadme,
                    Some("payments"),
                    &[],
                ),
                node(
                    "knowledge/payments/_progress.md",
                    NodeKind::Progress,
                    Some("payments"),
                    &[],
                ),
            ],
        };

        let graph = KnowledgeGraph::build(&snapshot);
        assert_eq!(graph.len(), 2);
        assert!(!graph.contains("CLAUDE.md"));
        assert!(!graph.contains("knowledge/payments/_progress.md"));
        assert_eq!(graph.index_path(), Some("knowledge/INDEX.md"));
        // the dangling ghost edge is not materialized
        assert_eq!(
            graph.neighbors("knowledge/INDEX.md"),
            &["knowledge/payments/README.md".to_string()]
        );
        assert_eq!(
            graph.module_id_of("knowledge/payments/README.md"),
            Some("payments")
        );
    }
}
