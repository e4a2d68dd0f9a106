//! The immutable scan result: typed nodes over a project tree.
//!
//! A `Snapshot` is produced once per invocation by the scanner and never
//! mutated afterwards. Every query component (scope resolver, navigator,
//! validators) reads the same snapshot, so concurrent queries are safe by
//! construction. Snapshots serialize to JSON so a caller can cache one and
//! feed it back to `progress-audit --previous`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which tree (and role within it) a file belongs to.
///
/// Resolved once at scan time from the filename conventions; the rest of the
/// engine never re-derives kind from string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Tree 1: auto-loaded rule file scoped to its containing directory.
    #[serde(rename = "rule")]
    Rule,

    /// Tree 2: the single knowledge-root index.
    #[serde(rename = "index")]
    Index,

    /// Tree 2: a module's README.
    #[serde(rename = "module-readme")]
    ModuleReadme,

    /// Tree 2: a module's optional architecture file.
    #[serde(rename = "architecture")]
    Architecture,

    /// Tree 2: a module's transient progress artifact.
    #[serde(rename = "progress")]
    Progress,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Rule => "rule",
            NodeKind::Index => "index",
            NodeKind::ModuleReadme => "module README",
            NodeKind::Architecture => "architecture",
            NodeKind::Progress => "progress",
        }
    }

    /// All node kinds, in reporting order
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Rule,
            NodeKind::Index,
            NodeKind::ModuleReadme,
            NodeKind::Architecture,
            NodeKind::Progress,
        ]
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single classified file in either tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Normalized slash-separated path relative to the project root.
    pub path: String,

    pub kind: NodeKind,

    /// For rule nodes: the directory under which the rule auto-loads
    /// ("" for the project root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_dir: Option<String>,

    /// Declared verification date from frontmatter; absent means
    /// "unknown, treat as stale".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<NaiveDate>,

    pub line_count: usize,

    /// Declared references to other nodes, in declaration order, resolved
    /// to root-relative paths. Targets need not exist; unresolved entries
    /// surface as dangling-link violations.
    #[serde(default)]
    pub outbound_links: Vec<String>,

    /// For module README/architecture/progress nodes: the module directory
    /// name under the knowledge root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

/// Immutable view of one scan: the root plus all classified nodes,
/// sorted by path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: PathBuf,
    pub nodes: Vec<Node>,
}

impl Snapshot {
    /// Look up a node by its root-relative path
    pub fn node(&self, path: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.path == path)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn rule_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes_of_kind(NodeKind::Rule)
    }

    /// The knowledge-root index node, if the tree has one
    pub fn index(&self) -> Option<&Node> {
        self.nodes_of_kind(NodeKind::Index).next()
    }

    pub fn module_readme(&self, module_id: &str) -> Option<&Node> {
        self.nodes_of_kind(NodeKind::ModuleReadme)
            .find(|n| n.module_id.as_deref() == Some(module_id))
    }

    pub fn progress(&self, module_id: &str) -> Option<&Node> {
        self.nodes_of_kind(NodeKind::Progress)
            .find(|n| n.module_id.as_deref() == Some(module_id))
    }

    /// All module ids present in the snapshot, sorted and deduplicated
    pub fn module_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .nodes
            .iter()
            .filter_map(|n| n.module_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Write the snapshot as pretty JSON (the cacheable form consumed by
    /// `progress-audit --previous`).
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot previously written by [`Snapshot::write_json`]
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot file {}", path.display()))
    }
}
