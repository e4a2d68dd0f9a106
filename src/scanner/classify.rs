//! Filename-convention classification, resolved into typed tags.

use crate::config::NamingConfig;
use crate::snapshot::NodeKind;

/// The typed outcome of classifying one file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: NodeKind,
    pub scope_dir: Option<String>,
    pub module_id: Option<String>,
}

/// Classify a root-relative path, or `None` for files the engine ignores.
///
/// Tree-2 conventions win over the rule pattern so a knowledge root using
/// the rule filename for module READMEs still classifies correctly.
pub fn classify(
    rel: &str,
    name: &str,
    naming: &NamingConfig,
    rule_pattern: &glob::Pattern,
) -> Option<Classification> {
    if let Some(classification) = classify_knowledge(rel, name, naming) {
        return Some(classification);
    }

    if rule_pattern.matches(name) {
        let scope_dir = match rel.rsplit_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => String::new(),
        };
        return Some(Classification {
            kind: NodeKind::Rule,
            scope_dir: Some(scope_dir),
            module_id: None,
        });
    }

    None
}

fn classify_knowledge(rel: &str, name: &str, naming: &NamingConfig) -> Option<Classification> {
    let kroot = naming.knowledge_root.as_str();
    let inside = rel.strip_prefix(kroot)?.strip_prefix('/')?;

    // The single index file directly under the knowledge root
    if inside == naming.index_file {
        return Some(Classification {
            kind: NodeKind::Index,
            scope_dir: None,
            module_id: None,
        });
    }

    // Module files live exactly one directory deep: <kroot>/<module>/<file>
    let (module, file) = inside.split_once('/')?;
    if file.contains('/') || module.is_empty() {
        return None;
    }

    let kind = if file == naming.readme_file {
        NodeKind::ModuleReadme
    } else if file == naming.architecture_file {
        NodeKind::Architecture
    } else if file == naming.progress_file {
        NodeKind::Progress
    } else {
        return None;
    };

    debug_assert_eq!(file, name);
    Some(Classification {
        kind,
        scope_dir: None,
        module_id: Some(module.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> glob::Pattern {
        glob::Pattern::new("CLAUDE.md").unwrap()
    }

    fn classify_default(rel: &str) -> Option<Classification> {
        let name = rel.rsplit('/').next().unwrap();
        classify(rel, name, &NamingConfig::default(), &pattern())
    }

    #[test]
    fn test_rule_at_any_depth() {
        let root_rule = classify_default("CLAUDE.md").unwrap();
        assert_eq!(root_rule.kind, NodeKind::Rule);
        assert_eq!(root_rule.scope_dir.as_deref(), Some(""));

        let nested = classify_default("src/api/CLAUDE.md").unwrap();
        assert_eq!(nested.kind, NodeKind::Rule);
        assert_eq!(nested.scope_dir.as_deref(), Some("src/api"));
    }

    #[test]
    fn test_knowledge_tree_kinds() {
        assert_eq!(
            classify_default("knowledge/INDEX.md").unwrap().kind,
            NodeKind::Index
        );

        let readme = classify_default("knowledge/payments/README.md").unwrap();
        assert_eq!(readme.kind, NodeKind::ModuleReadme);
        assert_eq!(readme.module_id.as_deref(), Some("payments"));

        assert_eq!(
            classify_default("knowledge/payments/ARCHITECTURE.md")
                .unwrap()
                .kind,
            NodeKind::Architecture
        );
        assert_eq!(
            classify_default("knowledge/payments/_progress.md")
                .unwrap()
                .kind,
            NodeKind::Progress
        );
    }

    #[test]
    fn test_unrecognized_files_ignored() {
        assert!(classify_default("src/main.rs").is_none());
        assert!(classify_default("README.md").is_none());
        assert!(classify_default("knowledge/notes.md").is_none());
        // too deep for module files
        assert!(classify_default("knowledge/payments/sub/README.md").is_none());
    }

    #[test]
    fn test_glob_rule_pattern() {
        let pattern = glob::Pattern::new("*.rules.md").unwrap();
        let naming = NamingConfig {
            rule_pattern: "*.rules.md".to_string(),
            ..NamingConfig::default()
        };
        let result = classify("src/api.rules.md", "api.rules.md", &naming, &pattern).unwrap();
        assert_eq!(result.kind, NodeKind::Rule);
        assert_eq!(result.scope_dir.as_deref(), Some("src"));
    }
}
