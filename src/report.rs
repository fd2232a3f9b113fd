//! The report model and the pipeline that builds it
//!
//! ```text
//! files + issues ─► aggregate ─┬─► rating
//!                              ├─► recommendations
//!                              └─► charts ─► ReportModel ─► reporters
//! ```
//!
//! [`build_report`] performs no I/O and reads no clock. The caller passes the
//! timestamp and the flavor source, so two builds of the same input with the
//! same seed produce identical models.

use crate::aggregate::{
    build_file_tree, issue_totals, language_counts, language_distribution, largest_files,
    merge_issue_counts, round1, smell_histogram, FileTreeEntry, IssueTotals, LanguageShare,
    RankedFile, LARGEST_FILES, SMELL_HISTOGRAM,
};
use crate::charts::{ChartData, ChartDataBuilder, TOP_LANGUAGES};
use crate::error::Result;
use crate::models::{
    BestPractices, CategorizedIssues, ComplexityMetrics, DuplicatedBlock, FileMetric,
};
use crate::rating::{FlavorSource, Rating, RatingClassifier};
use crate::recommend::{RecommendationEngine, RecommendationInput};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Issue-side input, as supplied by the issue source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueInput {
    pub issues: CategorizedIssues,
    pub complexity: ComplexityMetrics,
    pub best_practices: BestPractices,
    pub duplicated_code: Vec<DuplicatedBlock>,
}

/// Knobs for one build
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub project_root: PathBuf,
    pub analysis_date: String,
    pub largest_files: usize,
    pub top_languages: usize,
}

impl ReportOptions {
    pub fn new(project_root: impl Into<PathBuf>, analysis_date: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            analysis_date: analysis_date.into(),
            largest_files: LARGEST_FILES,
            top_languages: TOP_LANGUAGES,
        }
    }
}

/// Line totals across all scanned files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    pub total: usize,
    pub code: usize,
    pub comments: usize,
    pub blank: usize,
}

/// Aggregate root handed to the reporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
    pub project_root: PathBuf,
    pub analysis_date: String,
    pub maintainability_score: u32,
    pub rating: Rating,
    pub complexity: ComplexityMetrics,
    /// Comment density as a percentage, one decimal
    pub comment_density_pct: f64,
    pub totals: IssueTotals,
    pub total_files: usize,
    pub lines: LineTotals,
    pub language_stats: Vec<LanguageShare>,
    pub largest_files: Vec<RankedFile>,
    pub file_tree: Vec<FileTreeEntry>,
    pub files: Vec<FileMetric>,
    pub issues: CategorizedIssues,
    pub smell_histogram: Vec<(String, usize)>,
    pub duplicated_code: Vec<DuplicatedBlock>,
    pub recommendations: Vec<String>,
    pub best_practices: BestPractices,
    pub charts: ChartData,
}

impl ReportModel {
    /// Final path component of the project root
    pub fn project_name(&self) -> String {
        self.project_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string())
    }
}

/// Run the whole engine over one set of inputs
///
/// Fails only on malformed input: an issue filed under the wrong category or
/// a metric outside its range.
pub fn build_report<S: FlavorSource>(
    files: &[FileMetric],
    input: IssueInput,
    classifier: &mut RatingClassifier<S>,
    options: &ReportOptions,
) -> Result<ReportModel> {
    input.issues.validate()?;
    input.complexity.validate()?;

    let files = merge_issue_counts(files, &input.issues);
    let totals = issue_totals(&input.issues);
    let total_files = files.len();
    debug!(
        "Building report for {} files and {} issues",
        total_files, totals.total
    );

    let lines = files.iter().fold(LineTotals::default(), |acc, f| LineTotals {
        total: acc.total + f.lines,
        code: acc.code + f.code,
        comments: acc.comments + f.comments,
        blank: acc.blank + f.blank,
    });

    let maintainability_score = input.complexity.maintainability_score();
    let rating = classifier.classify(f64::from(maintainability_score));

    let language_stats = language_distribution(&language_counts(&files), total_files);

    let recommendations = RecommendationEngine::new().recommend(&RecommendationInput {
        maintainability_score,
        comment_density: input.complexity.comment_density,
        best_practices: &input.best_practices,
        code_smells: &input.issues.code_smells,
        security_issue_count: totals.security,
    });

    let charts = ChartDataBuilder::with_top_languages(options.top_languages).build(
        &totals,
        &language_stats,
        &input.complexity,
        &files,
        &input.issues,
        &options.project_root,
    );

    Ok(ReportModel {
        project_root: options.project_root.clone(),
        analysis_date: options.analysis_date.clone(),
        maintainability_score,
        rating,
        comment_density_pct: round1(input.complexity.comment_density * 100.0),
        totals,
        total_files,
        lines,
        largest_files: largest_files(&files, options.largest_files),
        file_tree: build_file_tree(&files, &options.project_root),
        smell_histogram: smell_histogram(&input.issues.code_smells, SMELL_HISTOGRAM),
        language_stats,
        recommendations,
        charts,
        files,
        complexity: input.complexity,
        issues: input.issues,
        duplicated_code: input.duplicated_code,
        best_practices: input.best_practices,
    })
}
