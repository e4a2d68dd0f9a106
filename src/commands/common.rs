//! Shared helpers for command implementations.

use crate::config::NamingConfig;
use crate::scanner;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Scan the project root into a fresh snapshot, wrapping scan failures
/// with the path that was being scanned.
pub fn load_snapshot(root: &Path, naming: &NamingConfig) -> Result<Snapshot> {
    scanner::scan(root, naming)
        .with_context(|| format!("failed to scan project root {}", root.display()))
}

/// Exit codes encode finding counts for scripting; anything past 255
/// saturates rather than wrapping.
pub fn count_exit_code(count: usize) -> i32 {
    count.min(255) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_exit_code_saturates() {
        assert_eq!(count_exit_code(0), 0);
        assert_eq!(count_exit_code(7), 7);
        assert_eq!(count_exit_code(255), 255);
        assert_eq!(count_exit_code(300), 255);
    }
}
