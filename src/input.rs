//! Loading the analysis document produced by external detectors
//!
//! Expected shape (every key optional):
//!
//! ```json
//! {
//!   "analysis_metadata": { "timestamp": "2026-01-01T12:00:00" },
//!   "complexity_metrics": { "maintainability_index": 65, "comment_density": 0.1 },
//!   "code_smells":        { "src/app.py": [ { "type": "long_function", "severity": "medium",
//!                                             "line": 42, "description": "..." } ] },
//!   "security_issues":    { },
//!   "performance_issues": { },
//!   "style_issues":       { },
//!   "best_practices":     { "python": ["Follow PEP 8"] },
//!   "duplicated_code":    [ { "size_lines": 8, "sample": "...", "instances": [] } ]
//! }
//! ```
//!
//! Relative issue paths are resolved against the project root and lexically
//! normalized (`.` dropped, `..` folded) so they match the paths the collector
//! produces.

use crate::error::{ReportError, Result};
use crate::models::{
    BestPractices, CategorizedIssues, ComplexityMetrics, DuplicatedBlock, Issue, IssueCategory,
    Severity,
};
use crate::report::IssueInput;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct IssueRecord {
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default, alias = "line")]
    line_number: Option<u32>,
    #[serde(rename = "type", default)]
    kind: String,
    severity: Severity,
    #[serde(default)]
    description: String,
    #[serde(default)]
    context: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AnalysisDocument {
    #[serde(default)]
    analysis_metadata: Metadata,
    #[serde(default)]
    complexity_metrics: ComplexityMetrics,
    #[serde(default)]
    code_smells: IndexMap<String, Vec<IssueRecord>>,
    #[serde(default)]
    security_issues: IndexMap<String, Vec<IssueRecord>>,
    #[serde(default)]
    performance_issues: IndexMap<String, Vec<IssueRecord>>,
    #[serde(default)]
    style_issues: IndexMap<String, Vec<IssueRecord>>,
    #[serde(default)]
    best_practices: BestPractices,
    #[serde(default)]
    duplicated_code: Vec<DuplicatedBlock>,
}

/// Parsed analysis document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisInput {
    pub timestamp: Option<String>,
    pub issues: IssueInput,
}

/// Read and parse the analysis document at `path`
pub fn load_analysis(path: &Path, project_root: &Path) -> Result<AnalysisInput> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let input = parse_analysis(&content, project_root)?;
    debug!(
        "Loaded analysis from {} ({} issue files)",
        path.display(),
        IssueCategory::ALL
            .iter()
            .map(|c| input.issues.issues.map(*c).len())
            .sum::<usize>()
    );
    Ok(input)
}

/// Parse an analysis document from a string
pub fn parse_analysis(content: &str, project_root: &Path) -> Result<AnalysisInput> {
    let doc: AnalysisDocument = serde_json::from_str(content)?;

    let mut issues = CategorizedIssues::default();
    let maps = [
        (IssueCategory::Smell, doc.code_smells),
        (IssueCategory::Security, doc.security_issues),
        (IssueCategory::Performance, doc.performance_issues),
        (IssueCategory::Style, doc.style_issues),
    ];
    for (category, map) in maps {
        for (key, records) in map {
            let file_path = resolve(&key, project_root);
            for record in records {
                issues.push(Issue {
                    file_path: record
                        .file_path
                        .map(|p| resolve(&p, project_root))
                        .unwrap_or_else(|| file_path.clone()),
                    line_number: record.line_number,
                    category,
                    kind: record.kind,
                    severity: record.severity,
                    description: record.description,
                    context: record.context,
                });
            }
        }
    }

    Ok(AnalysisInput {
        timestamp: doc.analysis_metadata.timestamp,
        issues: IssueInput {
            issues,
            complexity: doc.complexity_metrics,
            best_practices: doc.best_practices,
            duplicated_code: doc.duplicated_code,
        },
    })
}

fn resolve(path: &str, project_root: &Path) -> String {
    let p = Path::new(path);
    let joined = if p.is_absolute() {
        p.to_path_buf()
    } else {
        project_root.join(p)
    };
    normalize(&joined).to_string_lossy().to_string()
}

/// Lexical cleanup without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "analysis_metadata": { "timestamp": "2026-03-01T09:30:00" },
        "complexity_metrics": {
            "maintainability_index": 65,
            "technical_debt_days": 5,
            "comment_density": 0.1,
            "avg_function_complexity": 3.5,
            "avg_function_size": 15,
            "avg_function_params": 2.5,
            "duplicated_code_blocks": 2
        },
        "code_smells": {
            "test.py": [
                { "type": "long_function", "description": "Function is too long", "severity": "medium", "line": 42 }
            ]
        },
        "security_issues": {
            "/abs/db.py": [
                { "type": "sql_injection", "description": "Raw query", "severity": "critical", "line_number": 7,
                  "context": "cursor.execute(q)" }
            ]
        },
        "best_practices": {
            "python": ["Use list comprehensions", "Follow PEP 8"],
            "go": []
        }
    }"#;

    #[test]
    fn test_parse_full_document() {
        let input = parse_analysis(DOC, Path::new("/proj")).unwrap();
        assert_eq!(input.timestamp.as_deref(), Some("2026-03-01T09:30:00"));

        let issues = &input.issues.issues;
        let smell = &issues.code_smells["/proj/test.py"][0];
        assert_eq!(smell.category, IssueCategory::Smell);
        assert_eq!(smell.kind, "long_function");
        assert_eq!(smell.line_number, Some(42));
        assert_eq!(smell.file_path, "/proj/test.py");

        let sec = &issues.security_issues["/abs/db.py"][0];
        assert_eq!(sec.severity, Severity::Critical);
        assert_eq!(sec.line_number, Some(7));
        assert_eq!(sec.context.as_deref(), Some("cursor.execute(q)"));

        assert_eq!(input.issues.complexity.maintainability_index, 65.0);
        assert_eq!(input.issues.complexity.duplicated_code_blocks, 2);
        let langs: Vec<&String> = input.issues.best_practices.keys().collect();
        assert_eq!(langs, vec!["python", "go"]);
    }

    #[test]
    fn test_empty_document() {
        let input = parse_analysis("{}", Path::new("/proj")).unwrap();
        assert!(input.issues.issues.is_empty());
        assert!(input.issues.best_practices.is_empty());
        assert_eq!(input.issues.complexity, ComplexityMetrics::default());
        assert!(input.timestamp.is_none());
    }

    #[test]
    fn test_unknown_severity_is_an_error() {
        let doc = r#"{ "style_issues": { "a.py": [ { "type": "x", "severity": "urgent" } ] } }"#;
        assert!(matches!(
            parse_analysis(doc, Path::new("/proj")),
            Err(ReportError::Parse(_))
        ));
    }

    #[test]
    fn test_paths_are_normalized() {
        let root = Path::new("/proj");
        assert_eq!(resolve("./app.py", root), "/proj/app.py");
        assert_eq!(resolve("src/../app.py", root), "/proj/app.py");
        assert_eq!(resolve("src/./lib/../mod.rs", root), "/proj/src/mod.rs");
        assert_eq!(resolve("/abs/./x/../db.py", root), "/abs/db.py");
        assert_eq!(resolve("/../db.py", root), "/db.py");
    }

    #[test]
    fn test_dotted_keys_reach_the_scanned_file() {
        let doc = r#"{
            "code_smells": { "./app.py": [ { "type": "long_function", "severity": "low" } ] },
            "style_issues": {
                "src/../app.py": [ { "type": "naming", "severity": "low" } ],
                "other.py": [ { "type": "naming", "severity": "low", "file_path": "./lib/../app.py" } ]
            }
        }"#;
        let input = parse_analysis(doc, Path::new("/proj")).unwrap();
        let issues = &input.issues.issues;
        assert_eq!(issues.count_for_file(IssueCategory::Smell, "/proj/app.py"), 1);
        assert_eq!(issues.count_for_file(IssueCategory::Style, "/proj/app.py"), 2);

        let files = [crate::models::tests::file(
            "/proj/app.py",
            10,
            crate::models::Language::Python,
        )];
        let merged = crate::aggregate::merge_issue_counts(&files, issues);
        assert_eq!(merged[0].issue_count, 3);
    }

    #[test]
    fn test_severity_case_is_ignored() {
        let doc = r#"{ "security_issues": { "db.py": [
            { "type": "sql_injection", "severity": "Critical" },
            { "type": "xss", "severity": "HIGH" }
        ] } }"#;
        let input = parse_analysis(doc, Path::new("/proj")).unwrap();
        let severities: Vec<Severity> = input
            .issues
            .issues
            .iter_category(IssueCategory::Security)
            .map(|i| i.severity)
            .collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::High]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = load_analysis(Path::new("/definitely/not/here.json"), Path::new("/"));
        assert!(matches!(result, Err(ReportError::Read { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, DOC).unwrap();
        let input = load_analysis(&path, dir.path()).unwrap();
        assert_eq!(input.issues.issues.code_smells.len(), 1);
    }
}
