//! Chart datasets for the visual report
//!
//! All values are integers. Fractional metrics are rounded to the nearest
//! whole number (`f64::round`), the same rounding the text report uses.

use crate::aggregate::{relative_path, IssueTotals, LanguageShare};
use crate::models::{CategorizedIssues, ComplexityMetrics, FileMetric, IssueCategory, Language};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages shown in the distribution chart
pub const TOP_LANGUAGES: usize = 5;

/// Average complexity is scaled so it sits next to 0-100 values
const COMPLEXITY_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

/// Named ordered series of points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartDataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: i64) {
        self.points.push(ChartPoint {
            label: label.into(),
            value,
        });
    }

    /// Keep only the first `limit` points
    pub fn capped(mut self, limit: usize) -> Self {
        self.points.truncate(limit);
        self
    }
}

/// Issue counts for one file, by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIssueCounts {
    pub code_smells: usize,
    pub security: usize,
    pub performance: usize,
    pub style: usize,
}

/// Everything the file-details panel shows for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetail {
    pub name: String,
    pub language: Language,
    pub lines: usize,
    pub code: usize,
    pub comments: usize,
    pub blank: usize,
    pub issues: FileIssueCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub issue_categories: ChartDataset,
    pub languages: ChartDataset,
    pub complexity: ChartDataset,
    /// Keyed by path relative to the project root
    pub file_details: IndexMap<String, FileDetail>,
}

/// Builds [`ChartData`] from aggregates
#[derive(Debug, Clone, Copy)]
pub struct ChartDataBuilder {
    top_languages: usize,
}

impl Default for ChartDataBuilder {
    fn default() -> Self {
        Self {
            top_languages: TOP_LANGUAGES,
        }
    }
}

impl ChartDataBuilder {
    pub fn with_top_languages(top_languages: usize) -> Self {
        Self { top_languages }
    }

    pub fn issue_categories(&self, totals: &IssueTotals) -> ChartDataset {
        let mut dataset = ChartDataset::new("issues_by_category");
        for category in IssueCategory::ALL {
            dataset.push(category.label(), totals.get(category) as i64);
        }
        dataset
    }

    /// `shares` must already be ordered by file count
    pub fn languages(&self, shares: &[LanguageShare]) -> ChartDataset {
        let mut dataset = ChartDataset::new("language_distribution");
        for share in shares {
            dataset.push(share.language.name(), share.count as i64);
        }
        dataset.capped(self.top_languages)
    }

    pub fn complexity(&self, metrics: &ComplexityMetrics) -> ChartDataset {
        let mut dataset = ChartDataset::new("code_quality_metrics");
        dataset.push("Maintainability", to_int(metrics.maintainability_index));
        dataset.push(
            "Function Complexity",
            to_int(metrics.avg_function_complexity * COMPLEXITY_SCALE),
        );
        dataset.push("Avg Function Size", to_int(metrics.avg_function_size));
        dataset.push("Technical Debt (days)", to_int(metrics.technical_debt_days));
        dataset
    }

    pub fn file_details(
        &self,
        files: &[FileMetric],
        issues: &CategorizedIssues,
        project_root: &Path,
    ) -> IndexMap<String, FileDetail> {
        files
            .iter()
            .map(|f| {
                let count = |category| issues.count_for_file(category, &f.path);
                let detail = FileDetail {
                    name: f.name.clone(),
                    language: f.language,
                    lines: f.lines,
                    code: f.code,
                    comments: f.comments,
                    blank: f.blank,
                    issues: FileIssueCounts {
                        code_smells: count(IssueCategory::Smell),
                        security: count(IssueCategory::Security),
                        performance: count(IssueCategory::Performance),
                        style: count(IssueCategory::Style),
                    },
                };
                (relative_path(&f.path, project_root), detail)
            })
            .collect()
    }

    pub fn build(
        &self,
        totals: &IssueTotals,
        shares: &[LanguageShare],
        metrics: &ComplexityMetrics,
        files: &[FileMetric],
        issues: &CategorizedIssues,
        project_root: &Path,
    ) -> ChartData {
        ChartData {
            issue_categories: self.issue_categories(totals),
            languages: self.languages(shares),
            complexity: self.complexity(metrics),
            file_details: self.file_details(files, issues, project_root),
        }
    }
}

fn to_int(value: f64) -> i64 {
    value.round() as i64
}
