//! Budget and staleness audit over a whole snapshot.

use crate::config::BudgetConfig;
use crate::snapshot::Snapshot;
use crate::violation::Violation;
use chrono::NaiveDate;

/// Check every node against its kind's line ceiling and the staleness
/// window relative to `now`.
///
/// Pure and read-only: the same snapshot, config, and `now` always produce
/// the same violations in the same order.
pub fn validate(snapshot: &Snapshot, config: &BudgetConfig, now: NaiveDate) -> Vec<Violation> {
    let mut violations = Vec::new();

    for node in &snapshot.nodes {
        let ceiling = config.ceiling(node.kind);
        if node.line_count > ceiling {
            violations.push(Violation::OverBudget {
                path: node.path.clone(),
                lines: node.line_count,
                ceiling,
            });
        }

        let stale = match node.verified {
            None => true,
            Some(date) => now.signed_duration_since(date).num_days() > config.staleness_days,
        };
        if stale {
            violations.push(Violation::Stale {
                path: node.path.clone(),
                verified: node.verified,
            });
        }
    }

    violations
}
