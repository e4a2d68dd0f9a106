//! Check command - structural consistency audit of the context tree.

use crate::config::NamingConfig;
use crate::consistency;
use crate::graph::KnowledgeGraph;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{count_exit_code, load_snapshot};

pub fn execute(root: &Path, naming: &NamingConfig) -> Result<i32> {
    let snapshot = load_snapshot(root, naming)?;
    let graph = KnowledgeGraph::build(&snapshot);
    let violations = consistency::check(&snapshot, &graph);

    if snapshot.index().is_none() {
        println!(
            "{} No index file under {}/ (every module counts as orphaned)",
            "○".yellow(),
            naming.knowledge_root
        );
    }

    if violations.is_empty() {
        println!("{} Context tree is consistent", "✓".green().bold());
        return Ok(0);
    }

    println!("{}", "Consistency findings:".cyan().bold());
    for violation in &violations {
        println!("  {} {}", "✗".red(), violation);
    }
    println!("\n{} {} violation(s)", "✗".red().bold(), violations.len());
    Ok(count_exit_code(violations.len()))
}
