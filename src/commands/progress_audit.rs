//! Progress-audit command - compare the current tree against a cached snapshot.

use crate::config::NamingConfig;
use crate::progress;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::{count_exit_code, load_snapshot};

pub fn execute(
    root: &Path,
    naming: &NamingConfig,
    previous: PathBuf,
    save: Option<PathBuf>,
) -> Result<i32> {
    let previous_snapshot = Snapshot::read_json(&previous)
        .with_context(|| format!("failed to read previous snapshot {}", previous.display()))?;
    let current = load_snapshot(root, naming)?;

    let transitions = progress::audit(&previous_snapshot, &current);
    let warnings = transitions.iter().filter(|t| t.kind.is_warning()).count();

    if transitions.is_empty() {
        println!("{} No progress transitions since last snapshot", "✓".green().bold());
    } else {
        println!("{}", "Progress transitions:".cyan().bold());
        for transition in &transitions {
            let icon = if transition.kind.is_warning() {
                "✗".red()
            } else {
                "✓".green()
            };
            println!("  {icon} {transition}");
        }
        if warnings > 0 {
            println!("\n{} {} warning(s)", "✗".red().bold(), warnings);
        }
    }

    if let Some(path) = save {
        current
            .write_json(&path)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        println!("{} Saved current snapshot to {}", "✓".green(), path.display());
    }

    Ok(count_exit_code(warnings))
}
