//! Progress-file lifecycle audit between two snapshots.
//!
//! Progress files record in-flight work on a module. Comparing an earlier
//! snapshot with the current one tells us how each session ended: suspended
//! mid-work, resolved and folded into the README, or silently dropped.

use crate::snapshot::{NodeKind, Snapshot};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Progress file appeared: a session left work in flight
    SessionSuspended,
    /// Progress file removed and the module README changed: work landed
    ResolvedMerged,
    /// Progress file removed but the README did not change
    LostProgress,
    /// Progress file persists for a module whose README is gone
    OrphanedProgress,
}

impl TransitionKind {
    pub fn is_warning(self) -> bool {
        matches!(self, TransitionKind::LostProgress | TransitionKind::OrphanedProgress)
    }

    pub fn label(self) -> &'static str {
        match self {
            TransitionKind::SessionSuspended => "session suspended",
            TransitionKind::ResolvedMerged => "resolved and merged",
            TransitionKind::LostProgress => "lost progress",
            TransitionKind::OrphanedProgress => "orphaned progress",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub module: String,
    pub kind: TransitionKind,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransitionKind::SessionSuspended => {
                write!(f, "{}: progress file appeared ({})", self.module, self.kind.label())
            }
            TransitionKind::ResolvedMerged => {
                write!(f, "{}: progress file removed, README updated ({})", self.module, self.kind.label())
            }
            TransitionKind::LostProgress => {
                write!(
                    f,
                    "{}: progress file removed but README is unchanged ({})",
                    self.module,
                    self.kind.label()
                )
            }
            TransitionKind::OrphanedProgress => {
                write!(
                    f,
                    "{}: progress file persists but the module README is gone ({})",
                    self.module,
                    self.kind.label()
                )
            }
        }
    }
}

/// Classify every module that carried a progress file in either snapshot.
/// Modules with no transition of interest produce nothing.
pub fn audit(previous: &Snapshot, current: &Snapshot) -> Vec<Transition> {
    let mut modules: BTreeSet<String> = BTreeSet::new();
    for snapshot in [previous, current] {
        for node in &snapshot.nodes {
            if node.kind == NodeKind::Progress {
                if let Some(module) = node.module_id.as_deref() {
                    modules.insert(module.to_string());
                }
            }
        }
    }

    let mut transitions = Vec::new();
    for module in &modules {
        let before = previous.progress(module);
        let after = current.progress(module);
        let kind = match (before, after) {
            (None, Some(_)) => Some(TransitionKind::SessionSuspended),
            (Some(_), None) => {
                if readme_changed(previous, current, module) {
                    Some(TransitionKind::ResolvedMerged)
                } else {
                    Some(TransitionKind::LostProgress)
                }
            }
            (Some(_), Some(_)) => {
                if current.module_readme(module).is_none() {
                    Some(TransitionKind::OrphanedProgress)
                } else {
                    None
                }
            }
            (None, None) => None,
        };
        if let Some(kind) = kind {
            transitions.push(Transition {
                module: module.clone(),
                kind,
            });
        }
    }
    transitions
}

/// A README counts as changed if it appeared, or if its length or
/// verification date moved between the two snapshots
fn readme_changed(previous: &Snapshot, current: &Snapshot, module: &str) -> bool {
    match (previous.module_readme(module), current.module_readme(module)) {
        (None, Some(_)) => true,
        (Some(before), Some(after)) => {
            before.line_count != after.line_count || before.verified != after.verified
        }
        _ => false,
    }
}
