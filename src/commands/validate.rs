//! Validate command - budget and staleness audit over the whole tree.

use crate::config::{BudgetConfig, NamingConfig};
use crate::validate;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use std::path::Path;

use super::common::{count_exit_code, load_snapshot};

pub fn execute(
    root: &Path,
    naming: &NamingConfig,
    budget: &BudgetConfig,
    now: Option<NaiveDate>,
) -> Result<i32> {
    let snapshot = load_snapshot(root, naming)?;
    let now = now.unwrap_or_else(|| Local::now().date_naive());
    let violations = validate::validate(&snapshot, budget, now);

    if violations.is_empty() {
        println!(
            "{} All {} context files within budget and fresh",
            "✓".green().bold(),
            snapshot.nodes.len()
        );
        return Ok(0);
    }

    println!("{}", "Validation findings:".cyan().bold());
    for violation in &violations {
        println!("  {} {}", "✗".red(), violation);
    }
    println!(
        "\n{} {} violation(s)",
        "✗".red().bold(),
        violations.len()
    );
    Ok(count_exit_code(violations.len()))
}
