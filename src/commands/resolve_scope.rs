//! Resolve-scope command - list the rule files governing a working path.

use crate::config::NamingConfig;
use crate::scope;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::load_snapshot;

pub fn execute(root: &Path, naming: &NamingConfig, working_path: &str) -> Result<i32> {
    let snapshot = load_snapshot(root, naming)?;
    let rules = scope::resolve_scope(&snapshot, Path::new(working_path))?;

    if rules.is_empty() {
        println!(
            "{} No rule files govern {}",
            "○".yellow(),
            working_path.bold()
        );
        return Ok(0);
    }

    println!(
        "{} (root first, most specific last):",
        format!("Rules for {working_path}").cyan().bold()
    );
    for node in &rules {
        println!("  {} {}", "✓".green(), node.path);
    }
    Ok(0)
}
