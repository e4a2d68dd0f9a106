//! Non-fatal audit findings shared by the validators.
//!
//! Violations are always collected in full and returned to the caller;
//! the engine reports, it never fixes.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A node's measured line count exceeds its kind's ceiling
    OverBudget {
        path: String,
        lines: usize,
        ceiling: usize,
    },

    /// A node's verification date is absent or older than the staleness window
    Stale {
        path: String,
        verified: Option<NaiveDate>,
    },

    /// A declared link whose target matches no node in the snapshot
    DanglingLink { from: String, target: String },

    /// A module node unreachable from the index by any link path
    Orphan { path: String },

    /// More than one module README claims the same module id
    DuplicateModule { module: String, paths: Vec<String> },

    /// More than one rule file auto-loads for the same directory
    DuplicateRuleScope { scope: String, paths: Vec<String> },

    /// A link cycle in the knowledge graph (reported, not fatal - the
    /// navigator's hop budget already guarantees termination)
    Cycle { members: Vec<String> },

    /// A progress file for a module that has no README
    OrphanedProgress { module: String, path: String },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::OverBudget {
                path,
                lines,
                ceiling,
            } => write!(f, "{path} has {lines} lines (max: {ceiling})"),
            Violation::Stale { path, verified } => match verified {
                Some(date) => write!(f, "{path} last verified {date}"),
                None => write!(f, "{path} has no verified date"),
            },
            Violation::DanglingLink { from, target } => {
                write!(f, "{from} links to missing {target}")
            }
            Violation::Orphan { path } => {
                write!(f, "{path} is unreachable from the index")
            }
            Violation::DuplicateModule { module, paths } => {
                write!(f, "module '{module}' has {} READMEs: {}", paths.len(), paths.join(", "))
            }
            Violation::DuplicateRuleScope { scope, paths } => {
                let scope = if scope.is_empty() { "." } else { scope };
                write!(
                    f,
                    "directory '{scope}' has {} rule files: {}",
                    paths.len(),
                    paths.join(", ")
                )
            }
            Violation::Cycle { members } => {
                write!(f, "link cycle: {}", members.join(" -> "))
            }
            Violation::OrphanedProgress { module, path } => {
                write!(f, "{path} has no README for module '{module}'")
            }
        }
    }
}
