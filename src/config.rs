//! Scan-time naming conventions and audit thresholds.

use crate::snapshot::NodeKind;

/// Default auto-loaded rule filename (matched anywhere below the root).
pub const DEFAULT_RULE_PATTERN: &str = "CLAUDE.md";
/// Default knowledge root directory, relative to the project root.
pub const DEFAULT_KNOWLEDGE_ROOT: &str = "knowledge";
/// Default knowledge index filename.
pub const DEFAULT_INDEX_FILE: &str = "INDEX.md";
/// Default per-module README filename.
pub const DEFAULT_README_FILE: &str = "README.md";
/// Default per-module architecture filename.
pub const DEFAULT_ARCHITECTURE_FILE: &str = "ARCHITECTURE.md";
/// Default transient progress filename.
pub const DEFAULT_PROGRESS_FILE: &str = "_progress.md";

/// Default line ceiling for rule files before they stop being "minimal context"
pub const DEFAULT_RULE_MAX_LINES: usize = 60;
/// Default line ceiling for the knowledge index
pub const DEFAULT_INDEX_MAX_LINES: usize = 80;
/// Default line ceiling for module READMEs
pub const DEFAULT_README_MAX_LINES: usize = 120;
/// Default line ceiling for architecture files
pub const DEFAULT_ARCHITECTURE_MAX_LINES: usize = 200;
/// Default line ceiling for progress files
pub const DEFAULT_PROGRESS_MAX_LINES: usize = 150;
/// Default staleness window in days
pub const DEFAULT_STALENESS_DAYS: i64 = 90;

/// Filename conventions mapped to node kinds, resolved once at scan time.
///
/// The rule entry is a glob pattern matched against bare filenames so the
/// tool is not married to one ecosystem's convention; the tree-2 entries
/// are exact filenames within the knowledge root.
#[derive(Debug, Clone)]
pub struct NamingConfig {
    pub rule_pattern: String,
    pub knowledge_root: String,
    pub index_file: String,
    pub readme_file: String,
    pub architecture_file: String,
    pub progress_file: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            rule_pattern: DEFAULT_RULE_PATTERN.to_string(),
            knowledge_root: DEFAULT_KNOWLEDGE_ROOT.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            readme_file: DEFAULT_README_FILE.to_string(),
            architecture_file: DEFAULT_ARCHITECTURE_FILE.to_string(),
            progress_file: DEFAULT_PROGRESS_FILE.to_string(),
        }
    }
}

/// Per-kind line ceilings and the staleness window for `validate`.
#[derive(Debug, Clone)]
pub struct BudgetConfig {
    pub rule_max_lines: usize,
    pub index_max_lines: usize,
    pub readme_max_lines: usize,
    pub architecture_max_lines: usize,
    pub progress_max_lines: usize,
    pub staleness_days: i64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            rule_max_lines: DEFAULT_RULE_MAX_LINES,
            index_max_lines: DEFAULT_INDEX_MAX_LINES,
            readme_max_lines: DEFAULT_README_MAX_LINES,
            architecture_max_lines: DEFAULT_ARCHITECTURE_MAX_LINES,
            progress_max_lines: DEFAULT_PROGRESS_MAX_LINES,
            staleness_days: DEFAULT_STALENESS_DAYS,
        }
    }
}

impl BudgetConfig {
    /// Line ceiling for a node kind
    pub fn ceiling(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Rule => self.rule_max_lines,
            NodeKind::Index => self.index_max_lines,
            NodeKind::ModuleReadme => self.readme_max_lines,
            NodeKind::Architecture => self.architecture_max_lines,
            NodeKind::Progress => self.progress_max_lines,
        }
    }
}
