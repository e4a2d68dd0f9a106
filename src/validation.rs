//! Input validation for user-supplied CLI arguments.
//!
//! Module ids end up in progress lookups and report output; filenames end
//! up in path construction. Both are checked here before any command uses
//! them, rejecting path traversal and control characters up front.

use anyhow::{bail, Result};

/// Maximum allowed length for module ids.
pub const MAX_MODULE_ID_LENGTH: usize = 64;

/// Validates that a module id is safe to use in lookups and output.
///
/// A module id is valid if:
/// - It is not empty
/// - It is no longer than MAX_MODULE_ID_LENGTH characters
/// - It contains only alphanumeric characters, dashes, and underscores
pub fn validate_module_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("module id cannot be empty");
    }

    if id.len() > MAX_MODULE_ID_LENGTH {
        bail!(
            "module id too long: {} characters (max {})",
            id.len(),
            MAX_MODULE_ID_LENGTH
        );
    }

    if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        bail!("module id contains invalid characters (allowed: alphanumeric, dash, underscore)");
    }

    Ok(())
}

/// Validates a configurable filename (index, README, progress).
///
/// Filenames must be bare names: no path separators and no traversal
/// components, since they are joined onto scanned directories.
pub fn validate_filename(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("filename cannot be empty");
    }

    if name.contains('/') || name.contains('\\') {
        bail!("filename cannot contain path separators: {name}");
    }

    if name == "." || name == ".." {
        bail!("filename cannot be a traversal component: {name}");
    }

    if name.chars().any(|c| c.is_control()) {
        bail!("filename cannot contain control characters");
    }

    Ok(())
}

/// Validates the knowledge-root directory path.
///
/// May be nested ("docs/kb") but must stay relative and traversal-free.
pub fn validate_relative_dir(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("directory path cannot be empty");
    }

    if path.starts_with('/') || path.contains('\\') {
        bail!("directory path must be relative: {path}");
    }

    if path.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
        bail!("directory path cannot contain empty or traversal components: {path}");
    }

    Ok(())
}

/// Clap value parser for module id arguments.
///
/// # Examples
///
/// ```ignore
/// #[arg(value_parser = clap_module_id_validator)]
/// module: String,
/// ```
pub fn clap_module_id_validator(s: &str) -> Result<String, String> {
    validate_module_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for filename arguments.
pub fn clap_filename_validator(s: &str) -> Result<String, String> {
    validate_filename(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for the knowledge-root argument.
pub fn clap_relative_dir_validator(s: &str) -> Result<String, String> {
    validate_relative_dir(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
