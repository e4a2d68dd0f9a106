//! Typed errors for the engine's fatal failure modes.
//!
//! Violations (budget overruns, dangling links, lifecycle warnings) are not
//! errors - they are collected and returned in full by the audit functions.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while building a snapshot. Aborts the invocation.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("project root not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("project root is not a directory: {}", path.display())]
    RootNotADirectory { path: PathBuf },

    #[error("symlink cycle detected while walking {}", path.display())]
    SymlinkCycle { path: PathBuf },

    #[error("invalid rule file pattern '{pattern}': {source}")]
    InvalidRulePattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A queried working path does not lie under the project root.
/// Fatal to that query only; the snapshot remains usable.
#[derive(Debug, Error)]
#[error("path escapes the project root: {path}")]
pub struct OutOfScopeError {
    pub path: String,
}
