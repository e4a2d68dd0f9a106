//! CLI command implementations.
//!
//! Each command scans (or loads) a snapshot, runs one engine query against
//! it, prints a human-readable report, and returns the process exit code.

pub mod check;
pub mod common;
pub mod navigate;
pub mod progress_audit;
pub mod resolve_scope;
pub mod scan;
pub mod validate;
