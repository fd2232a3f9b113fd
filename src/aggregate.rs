//! Merging file metrics and issue maps into report aggregates
//!
//! Every function here takes borrowed input and returns fresh values. Sorting
//! always uses the stable `sort_by`, so ties keep the order in which the
//! collector or the issue source produced them.

use crate::models::{CategorizedIssues, FileMetric, IssueCategory, IssueMap, Language};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Default length of the largest-files ranking
pub const LARGEST_FILES: usize = 10;

/// Default length of the code smell histogram
pub const SMELL_HISTOGRAM: usize = 3;

/// Issue counts per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTotals {
    pub code_smells: usize,
    pub security: usize,
    pub performance: usize,
    pub style: usize,
    pub total: usize,
}

impl IssueTotals {
    pub fn get(&self, category: IssueCategory) -> usize {
        match category {
            IssueCategory::Smell => self.code_smells,
            IssueCategory::Security => self.security,
            IssueCategory::Performance => self.performance,
            IssueCategory::Style => self.style,
        }
    }
}

/// Entry of the file browser, ordered by issue count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeEntry {
    pub name: String,
    pub path: String,
    pub issues: usize,
    pub language: Language,
}

/// Entry of the largest-files table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedFile {
    pub name: String,
    pub path: String,
    pub lines: usize,
    pub issues: usize,
    pub language: Language,
}

/// Share of the scanned files written in one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: Language,
    pub count: usize,
    pub percentage: f64,
}

/// Count per category, plus the overall total
pub fn issue_totals(issues: &CategorizedIssues) -> IssueTotals {
    let code_smells = issues.count(IssueCategory::Smell);
    let security = issues.count(IssueCategory::Security);
    let performance = issues.count(IssueCategory::Performance);
    let style = issues.count(IssueCategory::Style);
    IssueTotals {
        code_smells,
        security,
        performance,
        style,
        total: code_smells + security + performance + style,
    }
}

/// Copy of `files` with `issue_count` set from all four issue maps
///
/// Issues that point at a path the collector never produced are not
/// attributed to any file.
pub fn merge_issue_counts(files: &[FileMetric], issues: &CategorizedIssues) -> Vec<FileMetric> {
    let merged: Vec<FileMetric> = files
        .iter()
        .map(|file| {
            let issue_count = IssueCategory::ALL
                .iter()
                .map(|category| issues.count_for_file(*category, &file.path))
                .sum();
            FileMetric {
                issue_count,
                ..file.clone()
            }
        })
        .collect();

    let known: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
    for category in IssueCategory::ALL {
        for path in issues.map(category).keys() {
            if !known.contains(path.as_str()) {
                debug!("Ignoring {} issues for unscanned file {}", category, path);
            }
        }
    }

    merged
}

/// Path of `path` relative to `root`, or the path itself when outside it
pub fn relative_path(path: &str, root: &Path) -> String {
    Path::new(path)
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| path.to_string())
}

/// File browser entries, most issues first
pub fn build_file_tree(files: &[FileMetric], project_root: &Path) -> Vec<FileTreeEntry> {
    let mut tree: Vec<FileTreeEntry> = files
        .iter()
        .map(|f| FileTreeEntry {
            name: f.name.clone(),
            path: relative_path(&f.path, project_root),
            issues: f.issue_count,
            language: f.language,
        })
        .collect();
    tree.sort_by(|a, b| b.issues.cmp(&a.issues));
    tree
}

/// The `limit` longest files, ties in first-seen order
pub fn largest_files(files: &[FileMetric], limit: usize) -> Vec<RankedFile> {
    let mut ranked: Vec<&FileMetric> = files.iter().collect();
    ranked.sort_by(|a, b| b.lines.cmp(&a.lines));
    ranked
        .into_iter()
        .take(limit)
        .map(|f| RankedFile {
            name: f.name.clone(),
            path: f.path.clone(),
            lines: f.lines,
            issues: f.issue_count,
            language: f.language,
        })
        .collect()
}

/// File count per language, in first-seen order
pub fn language_counts(files: &[FileMetric]) -> IndexMap<Language, usize> {
    let mut counts = IndexMap::new();
    for f in files {
        *counts.entry(f.language).or_insert(0) += 1;
    }
    counts
}

/// Percentage of files per language, largest share first
///
/// Percentages are taken against `total_files` and rounded to one decimal
/// each. Every entry is off by at most 0.05, so the sum stays within 0.5 of
/// 100 for up to ten languages; more languages can drift further.
pub fn language_distribution(
    counts: &IndexMap<Language, usize>,
    total_files: usize,
) -> Vec<LanguageShare> {
    if total_files == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = counts
        .iter()
        .map(|(language, count)| LanguageShare {
            language: *language,
            count: *count,
            percentage: round1(*count as f64 / total_files as f64 * 100.0),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Most frequent smell types, ties in first-seen order
pub fn smell_histogram(code_smells: &IssueMap, limit: usize) -> Vec<(String, usize)> {
    let mut frequency: IndexMap<&str, usize> = IndexMap::new();
    for issue in code_smells.values().flatten() {
        *frequency.entry(issue.kind.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = frequency
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{file, issue};

    fn sample_issues() -> CategorizedIssues {
        let mut issues = CategorizedIssues::default();
        issues.push(issue("/repo/a.py", IssueCategory::Smell, "long_function"));
        issues.push(issue("/repo/b.py", IssueCategory::Smell, "deep_nesting"));
        issues.push(issue("/repo/b.py", IssueCategory::Security, "eval"));
        issues.push(issue("/repo/b.py", IssueCategory::Style, "naming"));
        issues.push(issue("/repo/c.rs", IssueCategory::Performance, "clone"));
        issues.push(issue("/elsewhere/ghost.py", IssueCategory::Smell, "long_function"));
        issues
    }

    fn sample_files() -> Vec<FileMetric> {
        vec![
            file("/repo/a.py", 10, Language::Python),
            file("/repo/b.py", 50, Language::Python),
            file("/repo/c.rs", 5, Language::Rust),
            file("/repo/d.py", 50, Language::Python),
        ]
    }

    #[test]
    fn test_totals_sum_categories() {
        let totals = issue_totals(&sample_issues());
        assert_eq!(totals.code_smells, 3);
        assert_eq!(totals.security, 1);
        assert_eq!(totals.performance, 1);
        assert_eq!(totals.style, 1);
        assert_eq!(
            totals.total,
            totals.code_smells + totals.security + totals.performance + totals.style
        );
    }

    #[test]
    fn test_totals_empty() {
        let totals = issue_totals(&CategorizedIssues::default());
        assert_eq!(totals, IssueTotals::default());
    }

    #[test]
    fn test_merge_counts_on_copy() {
        let files = sample_files();
        let merged = merge_issue_counts(&files, &sample_issues());

        assert!(files.iter().all(|f| f.issue_count == 0));
        let counts: Vec<usize> = merged.iter().map(|f| f.issue_count).collect();
        assert_eq!(counts, vec![1, 3, 1, 0]);
    }

    #[test]
    fn test_file_tree_stable_by_issues() {
        let merged = merge_issue_counts(&sample_files(), &sample_issues());
        let tree = build_file_tree(&merged, Path::new("/repo"));
        let paths: Vec<&str> = tree.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["b.py", "a.py", "c.rs", "d.py"]);
    }

    #[test]
    fn test_file_tree_outside_root_keeps_path() {
        let files = vec![file("/other/x.go", 3, Language::Go)];
        let tree = build_file_tree(&files, Path::new("/repo"));
        assert_eq!(tree[0].path, "/other/x.go");
    }

    #[test]
    fn test_largest_files_ties_keep_first_seen() {
        let ranked = largest_files(&sample_files(), 2);
        let paths: Vec<&str> = ranked.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["/repo/b.py", "/repo/d.py"]);
    }

    #[test]
    fn test_largest_files_short_input() {
        let ranked = largest_files(&sample_files(), LARGEST_FILES);
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[3].lines, 5);
    }

    #[test]
    fn test_language_distribution() {
        let files = sample_files();
        let shares = language_distribution(&language_counts(&files), files.len());
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].language, Language::Python);
        assert_eq!(shares[0].count, 3);
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn test_language_distribution_rounding_sums_to_100() {
        let files = vec![
            file("a.py", 1, Language::Python),
            file("b.rs", 1, Language::Rust),
            file("c.go", 1, Language::Go),
        ];
        let shares = language_distribution(&language_counts(&files), files.len());
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.5, "sum was {sum}");
        assert_eq!(shares[0].percentage, 33.3);
        // equal counts keep first-seen order
        assert_eq!(shares[0].language, Language::Python);
        assert_eq!(shares[2].language, Language::Go);
    }

    #[test]
    fn test_language_distribution_many_languages_keeps_per_entry_rounding() {
        let small = [
            Language::JavaScript,
            Language::Java,
            Language::CCpp,
            Language::CSharp,
            Language::Ruby,
            Language::Php,
            Language::Swift,
            Language::Go,
            Language::Rust,
            Language::Html,
            Language::Css,
            Language::Sql,
        ];
        let mut counts = IndexMap::new();
        counts.insert(Language::Python, 11);
        for language in small {
            counts.insert(language, 1);
        }

        let shares = language_distribution(&counts, 23);
        assert_eq!(shares.len(), 13);
        assert_eq!(shares[0].language, Language::Python);
        assert_eq!(shares[0].percentage, 47.8);
        assert!(shares[1..].iter().all(|s| s.percentage == 4.3));

        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 99.4).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn test_language_distribution_zero_files() {
        assert!(language_distribution(&IndexMap::new(), 0).is_empty());
        let mut counts = IndexMap::new();
        counts.insert(Language::Rust, 3);
        assert!(language_distribution(&counts, 0).is_empty());
    }

    #[test]
    fn test_smell_histogram_ties_first_seen() {
        let mut issues = CategorizedIssues::default();
        for kind in ["magic_number", "deep_nesting", "long_function", "deep_nesting", "long_function", "god_class"] {
            issues.push(issue("a.py", IssueCategory::Smell, kind));
        }
        let histogram = smell_histogram(&issues.code_smells, SMELL_HISTOGRAM);
        assert_eq!(
            histogram,
            vec![
                ("deep_nesting".to_string(), 2),
                ("long_function".to_string(), 2),
                ("magic_number".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(0.0), 0.0);
    }
}
