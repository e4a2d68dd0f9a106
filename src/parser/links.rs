//! Outbound link extraction - the one documented cross-reference rule.
//!
//! A reference is an inline markdown link `[text](target.md)` whose target
//! is a relative path ending in `.md` with no URL scheme. Anchors are
//! stripped. Targets are resolved against the linking file's directory so
//! the rest of the engine only ever sees root-relative paths.

use regex::Regex;
use std::sync::OnceLock;

static LINK_RE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| Regex::new(r"(!?)\[[^\]]*\]\(([^)\s]+)\)").expect("valid link regex"))
}

/// Extract raw relative `.md` link targets from markdown content,
/// in declaration order.
///
/// Fenced code blocks are example text, not references, and image syntax
/// embeds a file rather than linking to a node; both are skipped.
pub fn extract_links(content: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        for cap in link_re().captures_iter(line) {
            if &cap[1] == "!" {
                continue;
            }
            let target = cap[2].split('#').next().unwrap_or("");
            let is_relative = !target.contains("://") && !target.starts_with('/');
            if is_relative && target.ends_with(".md") {
                links.push(target.to_string());
            }
        }
    }

    links
}

/// Resolve a link target against the linking file's directory, lexically.
///
/// `base_dir` is root-relative ("" for the root itself). `..` components
/// that climb past the root are kept verbatim, so such links can never
/// match a node and surface as dangling.
pub fn resolve_link(base_dir: &str, target: &str) -> String {
    let mut stack: Vec<&str> = base_dir.split('/').filter(|c| !c.is_empty()).collect();
    let mut escaped: Vec<&str> = Vec::new();

    for component in target.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if stack.pop().is_some() {
                    continue;
                }
                if escaped.last().is_some_and(|c| *c != "..") {
                    escaped.pop();
                } else {
                    escaped.push("..");
                }
            }
            other => {
                if escaped.is_empty() {
                    stack.push(other);
                } else {
                    escaped.push(other);
                }
            }
        }
    }

    escaped.extend(stack);
    escaped.join("/")
}
