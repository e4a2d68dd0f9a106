//! Scan command - build a snapshot of the context tree and report it.

use crate::config::NamingConfig;
use crate::snapshot::NodeKind;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::load_snapshot;

pub fn execute(
    root: &Path,
    naming: &NamingConfig,
    json: bool,
    output: Option<PathBuf>,
) -> Result<i32> {
    let snapshot = load_snapshot(root, naming)?;

    if let Some(path) = &output {
        snapshot
            .write_json(path)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    }

    // with --json, stdout carries nothing but the JSON so it stays pipeable
    if json {
        let rendered = serde_json::to_string_pretty(&snapshot.nodes)
            .context("failed to serialize snapshot")?;
        println!("{rendered}");
        return Ok(0);
    }

    println!("{}", "Context Tree".bold());
    println!();

    for kind in NodeKind::all() {
        let nodes: Vec<_> = snapshot.nodes_of_kind(*kind).collect();
        if nodes.is_empty() {
            continue;
        }
        println!("{}", format!("{}:", kind.label()).cyan().bold());
        for node in nodes {
            let mut detail = format!("{} lines", node.line_count);
            if let Some(verified) = node.verified {
                detail.push_str(&format!(", verified {verified}"));
            }
            println!("  {} ({})", node.path, detail.dimmed());
        }
        println!();
    }

    let modules = snapshot.module_ids();
    if !modules.is_empty() {
        println!("{} {}", "Modules:".cyan().bold(), modules.join(", "));
        println!();
    }

    if let Some(path) = output {
        println!(
            "{} Wrote snapshot of {} files to {}",
            "✓".green(),
            snapshot.nodes.len(),
            path.display()
        );
    }

    println!(
        "{} {} context files under {}",
        "✓".green().bold(),
        snapshot.nodes.len(),
        root.display()
    );
    Ok(0)
}
