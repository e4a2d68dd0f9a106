//! Navigate command - bounded traversal of the knowledge graph toward a module.

use crate::config::NamingConfig;
use crate::graph::{self, KnowledgeGraph};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::load_snapshot;

pub fn execute(
    root: &Path,
    naming: &NamingConfig,
    target_module: &str,
    from: Option<&str>,
    max_hops: usize,
) -> Result<i32> {
    let snapshot = load_snapshot(root, naming)?;
    let graph = KnowledgeGraph::build(&snapshot);

    let start = match from {
        Some(path) => path,
        None => match graph.index_path() {
            Some(index) => index,
            None => {
                println!(
                    "{} No index file found under {}/",
                    "✗".red().bold(),
                    naming.knowledge_root
                );
                return Ok(1);
            }
        },
    };

    let navigation = graph::navigate(&graph, start, target_module, max_hops);

    if navigation.found {
        println!(
            "{} Found {} in {} hop(s):",
            "✓".green().bold(),
            target_module.bold(),
            navigation.visited.len().saturating_sub(1)
        );
        for (i, path) in navigation.visited.iter().enumerate() {
            println!("  {i}. {path}");
        }
        Ok(0)
    } else {
        println!(
            "{} {} not reachable within {} hop(s)",
            "✗".red().bold(),
            target_module.bold(),
            max_hops
        );
        if !navigation.visited.is_empty() {
            println!("  visited: {}", navigation.visited.join(" -> ").dimmed());
        }
        Ok(1)
    }
}
