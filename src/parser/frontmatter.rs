//! Lenient YAML frontmatter extraction.
//!
//! Knowledge and rule files are written by humans and agents; most carry no
//! frontmatter at all. A missing or malformed block therefore means "no
//! declared metadata", never an error.

use chrono::NaiveDate;
use tracing::debug;

/// Frontmatter key carrying the declared verification date
const VERIFIED_KEY: &str = "verified";

/// Extract the YAML frontmatter block, if the content starts with one.
///
/// Expects frontmatter delimited by `---` on the first line and a matching
/// closing `---`. Returns `None` for content without a block or with YAML
/// that does not parse.
pub fn extract_frontmatter(content: &str) -> Option<serde_yaml::Value> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || lines[0].trim() != "---" {
        return None;
    }

    let end_idx = lines.iter().skip(1).position(|line| line.trim() == "---")? + 1;
    let yaml_content = lines[1..end_idx].join("\n");

    match serde_yaml::from_str(&yaml_content) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("ignoring malformed frontmatter: {e}");
            None
        }
    }
}

/// Extract a single scalar frontmatter field as a string
pub fn frontmatter_field(content: &str, field: &str) -> Option<String> {
    let yaml = extract_frontmatter(content)?;
    match &yaml[field] {
        serde_yaml::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The declared `verified: YYYY-MM-DD` date, if present and well-formed.
///
/// A malformed date is treated as absent (the node will surface as stale,
/// which is the correct pressure on whoever wrote it).
pub fn verified_date(content: &str) -> Option<NaiveDate> {
    let raw = frontmatter_field(content, VERIFIED_KEY)?;
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            debug!("ignoring unparseable verified date: {raw}");
            None
        }
    }
}
